#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_STUDENTS_FILE: &str = "students.json";
pub const DEFAULT_COURSES_FILE: &str = "courses.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = crate::utils::error::EduError;

    fn from_str(s: &str) -> Result<Self> {
        validation::validate_one_of("log_format", s, &toml_config::LOG_FORMATS)?;
        if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Ok(LogFormat::Compact)
        }
    }
}

/// Settings after merging command line flags over the TOML file over the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_dir: String,
    pub students_file: String,
    pub courses_file: String,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            students_file: DEFAULT_STUDENTS_FILE.to_string(),
            courses_file: DEFAULT_COURSES_FILE.to_string(),
            log_level: None,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Fills every field the file sets, leaving the rest untouched.
    pub fn merge_toml(mut self, file: &TomlConfig) -> Result<Self> {
        file.validate()?;

        if let Some(dir) = file.data_dir() {
            self.data_dir = dir.to_string();
        }
        if let Some(name) = file.students_file() {
            self.students_file = name.to_string();
        }
        if let Some(name) = file.courses_file() {
            self.courses_file = name.to_string();
        }
        if let Some(level) = file.log_level() {
            self.log_level = Some(level.to_lowercase());
        }
        if let Some(format) = file.log_format() {
            self.log_format = format.parse()?;
        }
        Ok(self)
    }
}

impl ConfigProvider for AppConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn students_file(&self) -> &str {
        &self.students_file
    }

    fn courses_file(&self) -> &str {
        &self.courses_file
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_file_name("students_file", &self.students_file)?;
        validation::validate_file_name("courses_file", &self.courses_file)?;
        if self.students_file == self.courses_file {
            return Err(crate::utils::error::EduError::InvalidConfigValueError {
                field: "courses_file".to_string(),
                value: self.courses_file.clone(),
                reason: "Students and courses must be stored in different files".to_string(),
            });
        }
        if let Some(level) = &self.log_level {
            validation::validate_one_of("log_level", level, &toml_config::LOG_LEVELS)?;
        }
        Ok(())
    }
}
