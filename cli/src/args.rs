use std::ffi::OsString;

use clap::Parser;
use sweeper_core::{CellCount, Coord, DEFAULT_MINES, DEFAULT_SIZE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Board width
    #[arg(long, default_value_t = DEFAULT_SIZE.0)]
    pub width: Coord,

    /// Board height
    #[arg(long, default_value_t = DEFAULT_SIZE.1)]
    pub height: Coord,

    /// Number of mines
    #[arg(long, default_value_t = DEFAULT_MINES)]
    pub mines: CellCount,

    /// Force a hexadecimal seed instead of random
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Read coordinates column first (x y) instead of row first
    #[arg(long)]
    pub cartesian: bool,
}

fn parse_seed(value: &str) -> Result<u64, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16).map_err(|err| format!("invalid hex seed {value:?}: {err}"))
}

const VALUE_FLAGS: [&str; 4] = ["--width", "--height", "--mines", "--seed"];
const SWITCHES: [&str; 5] = ["--cartesian", "--verbose", "--quiet", "--help", "--version"];

/// Long switches plus short `-h`, `-V` and stacked `-vvv` / `-qq`.
fn is_known_switch(arg: &str) -> bool {
    if SWITCHES.contains(&arg) {
        return true;
    }
    match arg.strip_prefix('-') {
        Some("h" | "V") => true,
        Some(short) if !short.is_empty() => {
            short.chars().all(|c| c == 'v') || short.chars().all(|c| c == 'q')
        }
        _ => false,
    }
}

/// Drops every argument the game does not understand so that unknown flags
/// are ignored instead of rejected. The program name is always kept.
pub fn known_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            continue;
        };
        let (name, inline_value) = match text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (text, false),
        };

        if VALUE_FLAGS.contains(&name) {
            kept.push(arg.clone());
            if !inline_value {
                kept.extend(args.next());
            }
        } else if !inline_value && is_known_switch(name) {
            kept.push(arg.clone());
        }
    }

    kept
}
