//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use tapcalc::keypad::Layout;

/// tapcalc: pocket calculator driven by key sequences
#[derive(Parser, Debug)]
#[command(name = "tapcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Decimal separator shown on the display
    #[arg(long, default_value = ".", env = "TAPCALC_SEPARATOR", global = true)]
    pub separator: char,

    /// Magnitude above which values are shown in scientific notation
    #[arg(
        long,
        default_value = "1e9",
        env = "TAPCALC_SCIENTIFIC_ABOVE",
        global = true
    )]
    pub scientific_above: f64,

    /// Maximum fractional digits shown for results
    #[arg(long, default_value = "9", env = "TAPCALC_FRACTION_DIGITS", global = true)]
    pub fraction_digits: usize,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a key sequence and print the display
    ///
    /// Keys: 0-9 . + - * / = c (clear) n (±) s (x²) r (√) i (1/x) ! p (π) e < (delete)
    Keys(KeysArgs),

    /// Read key sequences from stdin, one line at a time
    Repl(ReplArgs),

    /// Print the keypad layout
    Keypad(KeypadArgs),

    /// Show the resolved configuration
    Config,
}

/// Arguments for the keys command
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Key sequences, applied in order
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    pub steps: bool,

    /// Print the final state as JSON
    #[arg(long, conflicts_with = "steps")]
    pub json: bool,
}

/// Arguments for the repl command
#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Echo each input line before its display
    #[arg(long)]
    pub echo: bool,
}

/// Arguments for the keypad command
#[derive(Args, Debug)]
pub struct KeypadArgs {
    /// Layout to print
    #[arg(long, value_enum, default_value = "portrait")]
    pub layout: LayoutArg,
}

/// Keypad layout argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutArg {
    /// 4 columns × 5 rows
    #[default]
    Portrait,
    /// 5 columns × 4 rows
    Landscape,
    /// Portrait plus scientific keys
    Scientific,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Portrait => Self::Portrait,
            LayoutArg::Landscape => Self::Landscape,
            LayoutArg::Scientific => Self::Scientific,
        }
    }
}
