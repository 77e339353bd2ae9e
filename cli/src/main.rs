use std::io;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{Board, GameConfig};

use args::Args;
use command::CoordinateOrder;
use session::Session;

mod args;
mod command;
mod render;
mod session;

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(args::known_args(std::env::args_os()));
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("{args:?}");

    let config = GameConfig::new((args.width, args.height), args.mines).with_context(|| {
        format!(
            "cannot play a {}x{} board with {} mines",
            args.width, args.height, args.mines
        )
    })?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let order = if args.cartesian {
        CoordinateOrder::ColumnFirst
    } else {
        CoordinateOrder::RowFirst
    };

    let mut session = Session::new(Board::new(config, seed), order);
    session
        .run(&mut io::stdin().lock(), &mut io::stdout().lock())
        .context("terminal I/O failed")?;
    log::debug!("Exiting on turn {}", session.board().turns());
    Ok(())
}
