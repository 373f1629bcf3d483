//! tapcalc: pocket calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! tapcalc keys 17+25r=            # prints 22
//! tapcalc keys --steps 1.5*2=     # display after every key
//! echo "12+30=" | tapcalc repl    # one key sequence per line
//! tapcalc keypad --layout landscape
//! ```

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tapcalc::display::DisplayConfig;
use tapcalc_cli::{
    logging, run_config, run_keypad, run_keys, run_repl, Cli, CliConfig, CliResult, Commands,
    Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    logging::init(config.verbosity);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Keys(args) => run_keys(&config, &args, &mut out)?,
        Commands::Repl(args) => run_repl(&config, &args, io::stdin().lock(), &mut out)?,
        Commands::Keypad(args) => run_keypad(&args, &mut out)?,
        Commands::Config => run_config(&config, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let display = DisplayConfig::new()
        .with_decimal_separator(cli.separator)
        .with_scientific_above(cli.scientific_above)
        .with_max_fraction_digits(cli.fraction_digits);

    let config = CliConfig::new()
        .with_verbosity(verbosity)
        .with_display(display);
    config.validate()?;
    Ok(config)
}
