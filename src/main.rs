//! keystack driver
//!
//! Reads event lines (`KEY_PRESS '' a`, `MODE_BIND ...`) from the given
//! files and then stdin, and prints every command and variable write the
//! session produces, one per line.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use keystack::cli::{CliArgs, StartupConfig};
use keystack::config::EngineConfig;
use keystack::keymap::{install_binds, load_default_keymap, load_keymap_file, Registry};
use keystack::{Cmd, Session};

fn main() -> Result<()> {
    keystack::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let engine = match &startup.config {
        Some(path) => EngineConfig::load_or_default(path),
        None => EngineConfig::load(),
    };
    let registry = build_registry(&startup)?;
    let mut session = Session::from_config(&engine, registry);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    flush(&mut session, &mut out, startup.echo)?;

    for path in &startup.inputs {
        replay_file(&mut session, path, &mut out, startup.echo)?;
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        feed(&mut session, &line, &mut out, startup.echo)?;
    }

    Ok(())
}

fn build_registry(startup: &StartupConfig) -> Result<Registry> {
    if startup.use_defaults {
        return Ok(load_default_keymap(startup.keymap.as_deref()));
    }

    let mut registry = Registry::new();
    if let Some(path) = &startup.keymap {
        let binds = load_keymap_file(path)
            .with_context(|| format!("Failed to load keymap {}", path.display()))?;
        install_binds(&mut registry, &binds);
    }
    Ok(registry)
}

fn replay_file(
    session: &mut Session,
    path: &Path,
    out: &mut impl Write,
    echo: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::info!("Replaying events from {}", path.display());
    for line in text.lines() {
        feed(session, line, out, echo)?;
    }
    Ok(())
}

/// Handle one input line; bad lines are reported and skipped
fn feed(session: &mut Session, line: &str, out: &mut impl Write, echo: bool) -> Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    if let Err(e) = session.handle_line(line) {
        tracing::warn!("Rejected {:?}: {}", line, e);
        eprintln!("error: {}", e);
    }
    flush(session, out, echo)
}

/// Print queued commands, feeding host round trips back in when `echo` is on
fn flush(session: &mut Session, out: &mut impl Write, echo: bool) -> Result<()> {
    let mut pending: VecDeque<Cmd> = session.take_commands().into();

    while let Some(cmd) = pending.pop_front() {
        writeln!(out, "{}", cmd)?;

        let Some(event) = cmd.echo_event().filter(|_| echo) else {
            continue;
        };
        if let Err(e) = session.handle_line(&event) {
            tracing::warn!("Echoed {:?} rejected: {}", event, e);
        }
        pending.extend(session.take_commands());
    }

    out.flush()?;
    Ok(())
}
