//! Command execution
//!
//! Each command writes to a caller-supplied writer so it can run against
//! stdout in the binary and against a buffer in tests.

use std::io::{BufRead, Write};

use serde::Serialize;
use tapcalc::core::{CalcError, Readout};
use tapcalc::driver::{CalculatorDriver, KeypadSession};
use tapcalc::keypad::{parse_keys, Button, Keypad};
use tracing::{info, warn};

use crate::commands::{KeypadArgs, KeysArgs, ReplArgs};
use crate::config::CliConfig;
use crate::error::CliResult;

/// Final state printed by `keys --json`
#[derive(Debug, Serialize)]
pub struct KeysReport {
    /// Keys pressed, in their canonical form
    pub keys: String,
    /// Display text after the last key
    pub display: String,
    /// Engine readout after the last key
    pub readout: Readout,
}

fn parse_all(sequences: &[String]) -> CliResult<Vec<Button>> {
    let mut buttons = Vec::new();
    for sequence in sequences {
        buttons.extend(parse_keys(sequence)?);
    }
    Ok(buttons)
}

/// Runs `tapcalc keys`
pub fn run_keys<W: Write>(config: &CliConfig, args: &KeysArgs, out: &mut W) -> CliResult<()> {
    let buttons = parse_all(&args.keys)?;
    info!(count = buttons.len(), "pressing keys");

    let mut session = KeypadSession::with_config(config.display.clone());
    for button in &buttons {
        session.press(*button);
        if args.steps {
            writeln!(out, "{:>3} -> {}", button.label(), session.display_text())?;
        }
    }

    if args.json {
        let report = KeysReport {
            keys: buttons.iter().map(|b| b.key()).collect(),
            display: session.display(),
            readout: session.readout(),
        };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else if !args.steps {
        writeln!(out, "{}", session.display_text())?;
    }
    Ok(())
}

/// Runs `tapcalc repl`, one key sequence per input line
///
/// The engine lives for the whole session. Lines with unknown keys are
/// reported and skipped; `q` or end of input ends the session.
pub fn run_repl<R: BufRead, W: Write>(
    config: &CliConfig,
    args: &ReplArgs,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let mut session = KeypadSession::with_config(config.display.clone());
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line == "q" || line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        match parse_keys(line) {
            Ok(buttons) => {
                session.press_all(&buttons);
                if args.echo {
                    writeln!(out, "{line} -> {}", session.display_text())?;
                } else {
                    writeln!(out, "{}", session.display_text())?;
                }
            }
            Err(CalcError::UnknownKey(key)) => {
                warn!(?key, "skipping line");
                writeln!(out, "unknown key {key:?}, line ignored")?;
            }
            Err(err) => return Err(err.into()),
        }
        out.flush()?;
    }
    Ok(())
}

/// Runs `tapcalc keypad`
pub fn run_keypad<W: Write>(args: &KeypadArgs, out: &mut W) -> CliResult<()> {
    let keypad = Keypad::new(args.layout.into());
    writeln!(out, "{}", keypad.render())?;
    Ok(())
}

/// Runs `tapcalc config`
pub fn run_config<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(())
}
