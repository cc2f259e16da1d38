// Quill - prompt assembly with live file context
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use std::io::{self, IsTerminal};
use tokio::sync::mpsc::unbounded_channel;

use quill::cli::{spawn_input_worker, App, Args, PromptClipboard, TerminalDisplay};
use quill::config::{load_config, Config};
use quill::logging::init_logging;
use quill::session::{Session, SessionOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    config.apply_overrides(&args.overrides());

    init_logging(&config.log_level);

    let options = session_options(&config, &args);

    if args.once {
        return run_once(options, &args);
    }

    let (tx, rx) = unbounded_channel();
    let session = Session::new(options, tx.clone());
    let mut app = App::new(session, TerminalDisplay::new(), rx);

    if io::stdout().is_terminal() {
        println!("{}", "Quill - prompt builder with live file context".bold());
        println!("Task: {}. Type /help for commands.", app.session().task());
        if !app.session().is_watching() {
            println!("{}", "File watching is off".dark_grey());
        }
        println!();
    }

    app.drop_paths(&args.paths);

    spawn_input_worker(tx).context("Failed to start input reader")?;

    app.run().await
}

fn session_options(config: &Config, args: &Args) -> SessionOptions {
    SessionOptions {
        task: config.task(),
        instruction: args.instruction.clone().unwrap_or_default(),
        watch: config.watch.enabled,
        match_by: config.watch.match_by,
        follow_symlinks: config.collect.follow_symlinks,
    }
}

/// Render once to stdout, optionally copy, and exit.
fn run_once(options: SessionOptions, args: &Args) -> Result<()> {
    // No watcher is started, so nothing ever reads this queue
    let (tx, _rx) = unbounded_channel();
    let mut session = Session::new(options, tx);

    let report = session.drop_paths(&args.paths);
    for (path, error) in &report.failed {
        eprintln!("Skipped {}: {}", path.display(), error);
    }

    let prompt = session.render();
    print!("{}", prompt);

    if args.copy {
        PromptClipboard::new().copy(&prompt)?;
        eprintln!("Copied {} chars to clipboard", prompt.chars().count());
    }

    Ok(())
}
