//! File-backed configuration (std only).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Error, Result};

use super::{ConfigStore, FeederConfig, Tuning};

fn io_error(e: std::io::Error) -> Error {
    let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
    Error::Config(ConfigError::IoError(msg))
}

fn parse_error(e: toml::de::Error) -> Error {
    let msg = heapless::String::try_from(e.message()).unwrap_or_default();
    Error::Config(ConfigError::ParseError(msg))
}

/// Load tuning parameters from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use filament_feeder::load_tuning;
///
/// let tuning = load_tuning("feeder.toml")?;
/// ```
pub fn load_tuning<P: AsRef<Path>>(path: P) -> Result<Tuning> {
    let content = fs::read_to_string(path.as_ref()).map_err(io_error)?;
    parse_tuning(&content)
}

/// Parse tuning parameters from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_tuning(content: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(content).map_err(parse_error)?;

    super::validation::validate_tuning(&tuning)?;

    Ok(tuning)
}

/// Parse a stored feeder configuration document.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or a value is out of range.
pub fn parse_feeder_config(content: &str) -> Result<FeederConfig> {
    toml::from_str(content).map_err(parse_error)
}

/// Render a feeder configuration as a TOML document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_feeder_config(config: &FeederConfig) -> Result<String> {
    toml::to_string(config).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::SerializeError(msg))
    })
}

/// Stores the [`FeederConfig`] as a small TOML file.
///
/// ```toml
/// speed_level = 1
/// direction = 1
/// ```
///
/// Saves write a sibling temporary file and rename it over the target, so
/// a reader never observes a partially written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigStore for FileStore {
    fn load(&mut self) -> Result<FeederConfig> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_feeder_config(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FeederConfig::default()),
            Err(e) => Err(io_error(e)),
        }
    }

    fn save(&mut self, config: &FeederConfig) -> Result<()> {
        let rendered = render_feeder_config(config)?;
        let temp = self.temp_path();
        fs::write(&temp, rendered).map_err(io_error)?;
        fs::rename(&temp, &self.path).map_err(io_error)
    }
}
