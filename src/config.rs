//! Command-line configuration and logging setup.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::debug;

use crate::{
    generator::Algorithm,
    schedule::{ScheduleOptions, DEFAULT_FRAME_DURATION_MS, DEFAULT_PAUSE_FRAMES},
    seed::{SeedSource, DATE_FORMAT},
};

/// Maze shapes selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeKind {
    /// Rooms on a rectangular board.
    Rectangular,
    /// Concentric rings of sectors.
    Radial,
}

/// Generate a maze, solve it with A* and print the animation schedule as JSON.
#[derive(Debug, Parser)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Shape of the maze
    #[arg(value_enum, short, long, default_value_t = ShapeKind::Rectangular)]
    pub shape: ShapeKind,

    /// Board width in grid units, odd (rectangular only)
    #[arg(long, default_value_t = 21)]
    pub width: usize,

    /// Board height in grid units, odd (rectangular only)
    #[arg(long, default_value_t = 21)]
    pub height: usize,

    /// Number of rings (radial only)
    #[arg(long, default_value_t = 8)]
    pub rings: usize,

    /// Sectors in the innermost ring, doubled every two rings (radial only)
    #[arg(long, default_value_t = 8)]
    pub sectors: usize,

    /// Carving algorithm [default: depth-first for rectangular, prim for radial]
    #[arg(value_enum, short, long)]
    pub algorithm: Option<Algorithm>,

    /// Explicit seed
    #[arg(long, conflicts_with = "date")]
    pub seed: Option<u64>,

    /// Date the daily seed is derived from, as YYYY-MM-DD [default: today]
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<String>,

    /// Start cell as x,y or ring,sector [default: first room or innermost cell]
    #[arg(long, value_parser = parse_pair)]
    pub start: Option<(usize, usize)>,

    /// End cell as x,y or ring,sector [default: far corner or outermost exit]
    #[arg(long, value_parser = parse_pair)]
    pub end: Option<(usize, usize)>,

    /// Frames to hold the final picture before looping
    #[arg(long, default_value_t = DEFAULT_PAUSE_FRAMES)]
    pub pause_frames: usize,

    /// Real-time duration of a frame in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_DURATION_MS)]
    pub frame_duration_ms: u64,

    /// Indent the JSON output
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Returns the carving algorithm, falling back to the usual one for the shape.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(match self.shape {
            ShapeKind::Rectangular => Algorithm::DepthFirst,
            ShapeKind::Radial => Algorithm::Prim,
        })
    }

    /// Returns where the seed comes from: an explicit seed, a given date, or today.
    #[must_use]
    pub fn seed_source(&self) -> SeedSource {
        match (self.seed, &self.date) {
            (Some(seed), _) => SeedSource::Explicit(seed),
            (None, Some(date)) => SeedSource::Date(date.clone()),
            (None, None) => SeedSource::today(),
        }
    }

    /// Returns the renderer-facing schedule knobs.
    #[must_use]
    pub const fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions {
            pause_frames: self.pause_frames,
            frame_duration_ms: self.frame_duration_ms,
        }
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence. Without it only warnings are shown, or debug messages when
/// `--verbose` is set. Messages go to standard error so they never mix with the JSON output.
pub fn init_logging(args: &Args) {
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("Logging initialized with default filter {default_filter}");
}

/// Parses a cell given as two comma-separated indices.
fn parse_pair(value: &str) -> Result<(usize, usize), String> {
    let (first, second) = value
        .split_once(',')
        .ok_or_else(|| format!("expected two indices separated by a comma, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid index `{}`: {err}", part.trim()))
    };

    Ok((parse(first)?, parse(second)?))
}

/// Checks that a date is a real calendar day written as YYYY-MM-DD.
fn parse_date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|_| value.to_owned())
        .map_err(|err| format!("invalid date `{value}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["labyrintrace"]).expect("no arguments are required");

        assert_eq!(args.shape, ShapeKind::Rectangular, "rectangular by default");
        assert_eq!((args.width, args.height), (21, 21), "21x21 by default");
        assert_eq!(args.algorithm(), Algorithm::DepthFirst, "depth-first for boards");
        assert_eq!(
            args.schedule_options(),
            ScheduleOptions::default(),
            "default schedule knobs"
        );
        assert!(
            matches!(args.seed_source(), SeedSource::Date(_)),
            "seeded from today's date"
        );
    }

    #[test]
    fn test_radial_defaults_to_prim() {
        let args = Args::try_parse_from(["labyrintrace", "--shape", "radial"])
            .expect("valid arguments");

        assert_eq!(args.algorithm(), Algorithm::Prim, "prim for rings");
        assert_eq!((args.rings, args.sectors), (8, 8), "eight rings of eight");
    }

    #[test]
    fn test_explicit_algorithm_wins() {
        let args = Args::try_parse_from(["labyrintrace", "-s", "radial", "-a", "depth-first"])
            .expect("valid arguments");

        assert_eq!(args.algorithm(), Algorithm::DepthFirst, "explicit choice kept");
    }

    #[test]
    fn test_seed_sources() {
        let explicit =
            Args::try_parse_from(["labyrintrace", "--seed", "42"]).expect("valid arguments");
        let dated = Args::try_parse_from(["labyrintrace", "--date", "2024-01-01"])
            .expect("valid arguments");

        assert_eq!(explicit.seed_source(), SeedSource::Explicit(42), "explicit seed");
        assert_eq!(
            dated.seed_source(),
            SeedSource::Date("2024-01-01".to_owned()),
            "dated seed"
        );
    }

    #[test]
    fn test_seed_and_date_conflict() {
        assert!(
            Args::try_parse_from(["labyrintrace", "--seed", "1", "--date", "2024-01-01"]).is_err(),
            "only one seed source at a time"
        );
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(
            Args::try_parse_from(["labyrintrace", "--date", "2024-02-30"]).is_err(),
            "not a calendar day"
        );
        assert!(
            Args::try_parse_from(["labyrintrace", "--date", "yesterday"]).is_err(),
            "not a date"
        );
    }

    #[test]
    fn test_cells_parse() {
        let args = Args::try_parse_from(["labyrintrace", "--start", "3,5", "--end", " 7 , 9 "])
            .expect("valid arguments");

        assert_eq!(args.start, Some((3, 5)), "start pair");
        assert_eq!(args.end, Some((7, 9)), "whitespace is tolerated");
    }

    #[test]
    fn test_parse_pair_errors() {
        assert!(parse_pair("3").is_err(), "missing comma");
        assert!(parse_pair("3,x").is_err(), "non-numeric index");
        assert!(parse_pair("-1,2").is_err(), "negative index");
    }
}
