//! `folio` command-line driver
//!
//! - `folio simulate`: run the random-event simulation and print a report
//! - `folio repl`: interactive catalog shell

mod repl;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_sim::{run_simulation, SimulationConfig, SimulationReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Folio library catalog
#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Multi-index library catalog and simulator")]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the random-event simulation
    Simulate {
        /// TOML file with simulation settings; flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of simulation steps
        #[arg(long)]
        steps: Option<usize>,

        /// Random seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Name of the simulated catalog
        #[arg(long)]
        library_name: Option<String>,

        /// Check index invariants after every mutation
        #[arg(long)]
        verify: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive catalog shell
    Repl {
        /// Catalog name
        #[arg(long, default_value = "Main Library")]
        library_name: String,
    },
}

/// Initialize tracing with RUST_LOG, falling back to `default_filter`
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

/// Load the optional config file, then apply flag overrides
fn build_config(
    path: Option<PathBuf>,
    steps: Option<usize>,
    seed: Option<u64>,
    library_name: Option<String>,
    verify: bool,
) -> anyhow::Result<SimulationConfig> {
    let mut cfg = match path {
        Some(path) => SimulationConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(steps) = steps {
        cfg = cfg.steps(steps);
    }
    if let Some(seed) = seed {
        cfg = cfg.seed(seed);
    }
    if let Some(name) = library_name {
        cfg = cfg.library_name(name);
    }
    if verify {
        cfg = cfg.verify_invariants(true);
    }
    Ok(cfg)
}

fn simulate(cfg: &SimulationConfig) -> anyhow::Result<SimulationReport> {
    info!(
        steps = cfg.steps,
        seed = ?cfg.seed,
        library = %cfg.library_name,
        verify = cfg.verify_invariants,
        "starting simulation"
    );
    let report = run_simulation(cfg)?;
    info!(
        seed = report.seed,
        books = report.final_books,
        skipped = report.skipped,
        "simulation finished"
    );
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    match cli.command {
        Commands::Simulate {
            config,
            steps,
            seed,
            library_name,
            verify,
            json,
        } => {
            let cfg = build_config(config, steps, seed, library_name, verify)?;
            let report = simulate(&cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
        Commands::Repl { library_name } => repl::run(&library_name)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let cfg = build_config(None, Some(7), Some(3), Some("Branch".to_string()), true).unwrap();
        assert_eq!(cfg.steps, 7);
        assert_eq!(cfg.seed, Some(3));
        assert_eq!(cfg.library_name, "Branch");
        assert!(cfg.verify_invariants);
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let err = build_config(Some(PathBuf::from("/nonexistent/folio.toml")), None, None, None, false)
            .unwrap_err();
        assert!(err.to_string().contains("loading /nonexistent/folio.toml"));
    }

    #[test]
    fn test_simulate_logs_start_and_finish() {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let cfg = SimulationConfig::default().steps(5).seed(11);
        let report = tracing::subscriber::with_default(subscriber, || simulate(&cfg)).unwrap();
        assert_eq!(report.seed, 11);

        let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("starting simulation"));
        assert!(logs.contains("simulation finished"));
        assert!(logs.contains("seed=11"));
    }
}
