use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::Parser;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "song-import")]
#[command(about = "Batch-import a songs CSV into a Supabase table")]
pub struct CliConfig {
    /// Path to the semicolon-delimited source file
    #[arg(long, default_value = "songs2.csv")]
    pub csv_path: PathBuf,

    /// Directory for failed-record artifacts
    #[arg(long, default_value = "failed_imports")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Sink credentials, supplied via the environment (optionally from `.env`).
/// Absence of either is fatal at startup, before any row is processed.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub supabase_url: String,
    pub supabase_key: String,
}

impl SinkConfig {
    pub fn from_env() -> Result<Self> {
        let supabase_url = env::var("SUPABASE_URL").map_err(|_| ImportError::ConfigError {
            message: "SUPABASE_URL is not set".to_string(),
        })?;
        let supabase_key = env::var("SUPABASE_KEY").map_err(|_| ImportError::ConfigError {
            message: "SUPABASE_KEY is not set".to_string(),
        })?;
        Ok(Self {
            supabase_url,
            supabase_key,
        })
    }
}

impl Validate for SinkConfig {
    fn validate(&self) -> Result<()> {
        validate_url("SUPABASE_URL", &self.supabase_url)?;
        validate_non_empty_string("SUPABASE_KEY", &self.supabase_key)?;
        Ok(())
    }
}
