//! Affect Sim - Entry Point
//!
//! Serves the line protocol over stdin/stdout: one request per line in, one
//! JSON response per line out. Logs go to stderr so stdout stays parseable.
//!
//! Usage: `affect-sim [config.toml]`

use affect_sim::command::CommandExecutor;
use affect_sim::core::config::{set_config, SimulationConfig};
use affect_sim::core::error::Result;
use affect_sim::simulation::engine::Session;

use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("affect_sim=info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(path) = std::env::args().nth(1) {
        let config = SimulationConfig::load(Path::new(&path))?;
        tracing::info!("loaded config from {}", path);
        if set_config(config).is_err() {
            tracing::warn!("config already initialized, ignoring {}", path);
        }
    }

    let mut session = Session::new();
    tracing::info!("Affect Sim ready (state, catalog [category], action <name>, reset, quit)");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = CommandExecutor::handle_line(&mut session, &line);
        writeln!(stdout, "{}", result.response.to_json()?)?;
        stdout.flush()?;

        if result.quit {
            break;
        }
    }

    tracing::info!(
        "Goodbye! {:.2} simulated hours elapsed, recent actions: {:?}",
        session.subject().clock_hours,
        session.subject().history.names()
    );
    Ok(())
}
