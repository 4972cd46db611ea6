// SPDX-License-Identifier: PMPL-1.0-or-later
//! uiscanbot CLI - run accessibility rules over captured UI snapshots

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use uiscanbot::config::{self, Config, LogConfig};
use uiscanbot::report::{generate_report, OutputFormat};
use uiscanbot::Scanner;

/// Accessibility rule engine for captured UI tree snapshots
#[derive(Parser)]
#[command(name = "uiscanbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a snapshot file or a directory of snapshots
    Check {
        /// Snapshot JSON file or directory
        path: PathBuf,

        /// Configuration file (TOML or YAML)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Display density, overriding the configuration
        #[arg(long)]
        density: Option<f32>,

        /// Evaluate nodes in parallel
        #[arg(long)]
        parallel: bool,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the enabled rules
    Rules {
        /// Configuration file (TOML or YAML)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to .uiscanbot/config.toml)
        path: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn env_filter(log: &LogConfig, verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("uiscanbot=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("uiscanbot={}", log.level)))
    }
}

fn init_logging(log: &LogConfig, verbose: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log, verbose))
        .with_target(false)
        .with_writer(std::io::stderr);

    if log.format == "compact" {
        builder.compact().init();
    } else {
        builder.init();
    }
}

fn load(path: Option<&Path>, verbose: bool) -> anyhow::Result<Config> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path);
    load_with_writer(&path, verbose, std::io::stderr)
}

/// Load the configuration under a default-level subscriber, since the
/// configured logging is not installed until the file has been read.
fn load_with_writer<W>(path: &Path, verbose: bool, writer: W) -> anyhow::Result<Config>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&LogConfig::default(), verbose))
        .with_target(false)
        .with_writer(writer)
        .finish();
    Ok(tracing::subscriber::with_default(bootstrap, || {
        config::load_config(path)
    })?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { path, config, format, output, density, parallel, verbose } => {
            let mut cfg = load(config.as_deref(), verbose)?;
            init_logging(&cfg.log, verbose);

            if let Some(d) = density {
                cfg.rules.touch_target.density = d;
            }
            if parallel {
                cfg.engine.parallel = true;
            }

            let scanner = Scanner::from_config(&cfg)?;
            let results = if path.is_dir() {
                scanner.scan_directory(&path)?
            } else {
                vec![scanner.scan_file(&path)?]
            };

            let report = generate_report(&results, format.into());
            write_output(&report, output.as_deref())?;

            if results.iter().any(|r| r.has_errors()) {
                std::process::exit(1);
            }
        }

        Commands::Rules { config } => {
            let cfg = load(config.as_deref(), false)?;
            for rule in cfg.build_rules()? {
                println!("{:<28} {}", rule.id(), rule.description());
            }
        }

        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)?;
            eprintln!("Default configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
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
    fn test_config_loading_is_logged_when_verbose() {
        let dir = tempfile::TempDir::new().unwrap();
        let captured = Captured::default();
        let sink = captured.clone();

        let cfg = load_with_writer(&dir.path().join("missing.toml"), true, move || sink.clone())
            .unwrap();
        assert!(cfg.rules.touch_target.enabled);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Config file not found"), "{}", output);
    }

    #[test]
    fn test_config_errors_still_propagate() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "rules = 3").unwrap();
        assert!(load_with_writer(&path, false, std::io::sink).is_err());
    }
}
