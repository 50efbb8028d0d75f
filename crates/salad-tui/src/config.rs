//! Command line and environment configuration

use clap::Parser;
use salad_core::DEFAULT_NAMESPACE;
use std::path::PathBuf;

/// Puzzle directory used when neither `--puzzles` nor `SALAD_PUZZLE_DIR` is set
pub const DEFAULT_PUZZLE_DIR: &str = "data/puzzles";

/// Where best times are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// File in the local data directory
    Local,
    /// In-memory only, nothing touches disk
    Test,
}

impl Environment {
    /// Detect environment from SALAD_ENV variable
    pub fn detect() -> Self {
        Self::from_value(std::env::var("SALAD_ENV").ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("test") | Some("testing") => Environment::Test,
            _ => Environment::Local,
        }
    }
}

/// Word salad puzzles in the terminal
#[derive(Debug, Parser)]
#[command(name = "newsalad", version, about)]
pub struct Args {
    /// Puzzle id to play (file name without `.json`)
    pub id: Option<String>,

    /// Play today's puzzle
    #[arg(long, conflicts_with_all = ["id", "random"])]
    pub daily: bool,

    /// Play a random puzzle
    #[arg(long, conflicts_with = "id")]
    pub random: bool,

    /// Print the available puzzle ids and exit
    #[arg(long)]
    pub list: bool,

    /// Directory holding `<id>.json` puzzle files
    #[arg(long, value_name = "DIR")]
    pub puzzles: Option<PathBuf>,

    /// Prefix for best-time keys
    #[arg(long, value_name = "NS", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

/// What to show first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPoint {
    Catalog,
    Puzzle(String),
    Daily,
    Random,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub puzzle_dir: PathBuf,
    pub data_dir: PathBuf,
    pub namespace: String,
    pub start: StartPoint,
    pub list_only: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let env_dir = std::env::var_os("SALAD_PUZZLE_DIR").map(PathBuf::from);
        Self::resolve(args, env_dir, Environment::detect())
    }

    fn resolve(args: Args, env_dir: Option<PathBuf>, environment: Environment) -> Self {
        let puzzle_dir = args
            .puzzles
            .or(env_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUZZLE_DIR));

        let start = if args.daily {
            StartPoint::Daily
        } else if args.random {
            StartPoint::Random
        } else if let Some(id) = args.id {
            StartPoint::Puzzle(id)
        } else {
            StartPoint::Catalog
        };

        Self {
            environment,
            puzzle_dir,
            data_dir: data_dir(),
            namespace: args.namespace,
            start,
            list_only: args.list,
        }
    }
}

/// Local data directory, or the working directory when there is none
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."))
}
