//! Error types for filament-feeder.
//!
//! Only programmatic and hardware failures are errors. Filament runout and
//! user stop requests are normal outcomes of a motion run and are reported
//! through [`RunOutcome`](crate::motion::RunOutcome) instead.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all filament-feeder operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing, validation or persistence error
    Config(ConfigError),
    /// Stepper driver pin error
    Motor(MotorError),
    /// Button or sensor read error
    Input(InputError),
    /// LED output error
    Indicator(IndicatorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Failed to serialize configuration
    SerializeError(heapless::String<128>),
    /// Stored speed level is not 0, 1 or 2
    InvalidSpeedLevel(u8),
    /// Stored direction is not 0 or 1
    InvalidDirection(u8),
    /// A timing parameter that must be positive was zero
    ZeroDuration(&'static str),
    /// A count that must be positive was zero
    ZeroCount(&'static str),
    /// LED brightness exceeds the duty range
    InvalidBrightness {
        /// Requested brightness
        brightness: u16,
        /// Duty range the brightness is expressed in
        range: u16,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Stepper driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Enable pin write failed
    EnablePin,
    /// Step pin write failed
    StepPin,
    /// Direction pin write failed
    DirectionPin,
}

/// Digital input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Button pin read failed
    Button,
    /// Filament sensor pin read failed
    Sensor,
}

/// LED output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// Setting the duty cycle of an LED failed
    DutyCycle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Input(e) => write!(f, "Input error: {}", e),
            Error::Indicator(e) => write!(f, "Indicator error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {}", msg),
            ConfigError::InvalidSpeedLevel(v) => {
                write!(f, "Invalid speed level: {}. Valid values: 0, 1, 2", v)
            }
            ConfigError::InvalidDirection(v) => {
                write!(f, "Invalid direction: {}. Valid values: 0, 1", v)
            }
            ConfigError::ZeroDuration(name) => write!(f, "{} must be > 0", name),
            ConfigError::ZeroCount(name) => write!(f, "{} must be at least 1", name),
            ConfigError::InvalidBrightness { brightness, range } => {
                write!(f, "Invalid LED brightness {}: must be <= {}", brightness, range)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::EnablePin => write!(f, "Enable pin operation failed"),
            MotorError::StepPin => write!(f, "Step pin operation failed"),
            MotorError::DirectionPin => write!(f, "Direction pin operation failed"),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Button => write!(f, "Button read failed"),
            InputError::Sensor => write!(f, "Filament sensor read failed"),
        }
    }
}

impl fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorError::DutyCycle => write!(f, "LED duty cycle update failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Error::Input(e)
    }
}

impl From<IndicatorError> for Error {
    fn from(e: IndicatorError) -> Self {
        Error::Indicator(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for InputError {}

#[cfg(feature = "std")]
impl std::error::Error for IndicatorError {}
