use crate::config::{AppConfig, LogFormat, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Flags left unset fall back to the TOML file given with `--config`, then to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "edubase")]
#[command(about = "Manage students and the courses they take from the terminal")]
pub struct CliConfig {
    #[arg(long, help = "Directory holding the data files [default: ./data]")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Student data file name [default: students.json]")]
    pub students_file: Option<String>,

    #[arg(long, help = "Course data file name [default: courses.json]")]
    pub courses_file: Option<String>,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Log output format: compact or json")]
    pub log_format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the TOML file if one was given and layers these flags on top.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            tracing::debug!("Loaded configuration file {}", path);
            config = config.merge_toml(&file)?;
        }

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(name) = &self.students_file {
            config.students_file = name.clone();
        }
        if let Some(name) = &self.courses_file {
            config.courses_file = name.clone();
        }
        if let Some(format) = &self.log_format {
            config.log_format = format.parse::<LogFormat>()?;
        }
        config.verbose |= self.verbose;

        Ok(config)
    }
}
