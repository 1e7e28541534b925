//! Interactive calculator prompt.
//!
//! Reads lines through rustyline, feeds them to [`process_line`] together
//! with a caller-owned [`Session`], and prints whatever comes back.

mod session;

pub use session::{Session, Step, process_line};

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::ReplConfig;

/// Default history file location.
fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("scicalc").join("history.txt"))
}

/// Save prompt history to disk.
fn save_history(rl: &mut DefaultEditor, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Failed to create history directory: {}", e);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

fn is_not_found(err: &ReadlineError) -> bool {
    matches!(
        err,
        ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Run the interactive prompt until `exit` or end of input.
pub fn run(config: &ReplConfig) -> Result<()> {
    println!("scicalc v{}", env!("CARGO_PKG_VERSION"));
    println!("Type help for commands, exit to quit.\n");

    let mut rl = DefaultEditor::new().context("Failed to create line editor")?;

    let history_path = if config.history { history_path() } else { None };
    if let Some(ref path) = history_path
        && let Err(e) = rl.load_history(path)
    {
        // A missing file is expected on first run
        if !is_not_found(&e) {
            tracing::warn!("Failed to load history: {}", e);
        }
    }

    let mut session = Session::new();

    loop {
        let prompt = format!("({}) {}", session.expecting(), config.prompt);

        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty()
                    && let Err(e) = rl.add_history_entry(line.as_str())
                {
                    tracing::warn!("Failed to add history entry: {}", e);
                }

                match process_line(&mut session, &line) {
                    Step::Continue(Some(output)) => println!("{}", output),
                    Step::Continue(None) => {}
                    Step::Exit => {
                        println!("Exiting.");
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C drops the current line only
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("Exiting.");
                break;
            }
            Err(e) => {
                save_history(&mut rl, &history_path);
                return Err(e).context("Failed to read input");
            }
        }
    }

    save_history(&mut rl, &history_path);
    Ok(())
}
