use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::discovery::{parse_managed_method_name, ParsedMethodName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Isolation {
    /// Enumerate inside this process
    #[default]
    InProcess,
    /// Enumerate each assembly in a child worker process
    Process,
}

#[derive(Parser, Debug)]
#[command(name = "test-discover")]
#[command(about = "Discover unit tests in compiled assembly manifests", long_about = None)]
pub struct Args {
    /// Assembly manifest, or a directory to search for manifests
    #[arg(long, value_name = "PATH", required_unless_present = "worker")]
    pub path: Option<PathBuf>,

    /// Discovery settings file (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short = 'f', long, default_value = "json")]
    pub format: OutputFormat,

    /// Only report tests matching this managed method name. Can be specified multiple times.
    #[arg(long, value_name = "NAME")]
    pub filter: Vec<String>,

    /// Where assembly enumeration runs
    #[arg(long, value_enum, default_value_t = Isolation::InProcess)]
    pub isolation: Isolation,

    /// Output file path (prints to stdout if not specified)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Serve one enumeration request on stdin/stdout
    #[arg(long, hide = true)]
    pub worker: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.path {
            match path.metadata() {
                Err(_) => anyhow::bail!("Path does not exist: {}", path.display()),
                Ok(meta) if !meta.is_file() && !meta.is_dir() => {
                    anyhow::bail!("Not a manifest file or directory: {}", path.display())
                }
                Ok(_) => {}
            }
        }
        if let Some(ref settings) = self.settings {
            if !settings.is_file() {
                anyhow::bail!("Settings file does not exist: {}", settings.display());
            }
        }
        self.parsed_filters()?;
        Ok(())
    }

    pub fn parsed_filters(&self) -> Result<Vec<ParsedMethodName>> {
        self.filter
            .iter()
            .map(|f| {
                parse_managed_method_name(f).with_context(|| format!("Invalid --filter '{f}'"))
            })
            .collect()
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}
