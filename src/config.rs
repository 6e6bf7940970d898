//! Deployment configuration
//!
//! Captured once at process start; nothing below `main` reads the
//! environment itself.
use std::path::{Path, PathBuf};

use crate::ortholog::OrthologLayout;

pub const DEFAULT_DATA_DIR: &str = "/var/data/cgd";
pub const DEFAULT_LOG_DIR: &str = "/var/log/cgd";

pub const DEFAULT_OUTPUT_NAME: &str = "cglab_orthologs.txt";
pub const DEFAULT_LOG_NAME: &str = "getCglab.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            log_dir: log_dir.into(),
        }
    }

    /// DATA_DIR and LOG_DIR, falling back to the standard install locations
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let non_empty = |key: &str| lookup(key).filter(|p| !p.as_os_str().is_empty());
        Config {
            data_dir: non_empty("DATA_DIR").unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            log_dir: non_empty("LOG_DIR").unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    pub fn cgob_dir(&self) -> PathBuf {
        self.data_dir.join("CGOB")
    }

    pub fn default_output(&self) -> PathBuf {
        self.cgob_dir().join(DEFAULT_OUTPUT_NAME)
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join(DEFAULT_LOG_NAME)
    }
}

/// Everything one pipeline run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_file: PathBuf,
    pub layout: OrthologLayout,
}

impl RunOptions {
    /// Default output, log file and layout for `input` under `config`
    pub fn new(config: &Config, input: impl AsRef<Path>) -> Self {
        RunOptions {
            input: input.as_ref().to_path_buf(),
            output: config.default_output(),
            log_file: config.default_log_file(),
            layout: OrthologLayout::ygob(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    pub fn with_layout(mut self, layout: OrthologLayout) -> Self {
        self.layout = layout;
        self
    }
}
