//! Persisted feeder configuration: speed level and direction.
//!
//! Both values are stored as small integers (`speed_level` 0/1/2,
//! `direction` 0/1) so the stored document round-trips exactly.

use serde::{Deserialize, Serialize};

use super::units::Micros;
use crate::error::ConfigError;

/// Cruise speed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedLevel {
    /// 400 µs cruise half-period.
    Slow,
    /// 300 µs cruise half-period.
    #[default]
    Normal,
    /// 200 µs cruise half-period.
    Fast,
}

impl SpeedLevel {
    /// All levels in cycling order.
    pub const ALL: [SpeedLevel; 3] = [SpeedLevel::Slow, SpeedLevel::Normal, SpeedLevel::Fast];

    /// Cruise delay for this level.
    #[inline]
    pub const fn cruise_delay(self) -> Micros {
        match self {
            SpeedLevel::Slow => Micros(400),
            SpeedLevel::Normal => Micros(300),
            SpeedLevel::Fast => Micros(200),
        }
    }

    /// The next level, wrapping from Fast back to Slow.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            SpeedLevel::Slow => SpeedLevel::Normal,
            SpeedLevel::Normal => SpeedLevel::Fast,
            SpeedLevel::Fast => SpeedLevel::Slow,
        }
    }

    /// Stored integer representation.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            SpeedLevel::Slow => 0,
            SpeedLevel::Normal => 1,
            SpeedLevel::Fast => 2,
        }
    }
}

impl TryFrom<u8> for SpeedLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SpeedLevel::Slow),
            1 => Ok(SpeedLevel::Normal),
            2 => Ok(SpeedLevel::Fast),
            other => Err(ConfigError::InvalidSpeedLevel(other)),
        }
    }
}

impl From<SpeedLevel> for u8 {
    fn from(level: SpeedLevel) -> Self {
        level.index()
    }
}

/// Feed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Stored as 0, DIR line low, right LED.
    Reverse,
    /// Stored as 1, DIR line high, left LED.
    #[default]
    Forward,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Stored integer representation.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Direction::Reverse => 0,
            Direction::Forward => 1,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Reverse),
            1 => Ok(Direction::Forward),
            other => Err(ConfigError::InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.index()
    }
}

macro_rules! serde_as_u8 {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_u8(self.index())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use core::fmt::Write;
                let value = u8::deserialize(deserializer)?;
                <$ty>::try_from(value).map_err(|e| {
                    let mut buf = heapless::String::<128>::new();
                    let _ = write!(buf, "{}", e);
                    serde::de::Error::custom(buf.as_str())
                })
            }
        }
    };
}

serde_as_u8!(SpeedLevel);
serde_as_u8!(Direction);

/// User-selectable configuration, persisted across restarts.
///
/// Mutated only during the startup configuration phase; read-only while
/// the feeder is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeederConfig {
    /// Selected cruise speed.
    pub speed_level: SpeedLevel,
    /// Selected feed direction.
    pub direction: Direction,
}

impl FeederConfig {
    /// Create a configuration from its parts.
    pub const fn new(speed_level: SpeedLevel, direction: Direction) -> Self {
        Self {
            speed_level,
            direction,
        }
    }

    /// Build from the stored integer pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is out of range.
    pub fn from_indices(speed_level: u8, direction: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            speed_level: SpeedLevel::try_from(speed_level)?,
            direction: Direction::try_from(direction)?,
        })
    }

    /// Cruise delay resolved through the speed table.
    #[inline]
    pub fn cruise_delay(&self) -> Micros {
        self.speed_level.cruise_delay()
    }

    /// Advance to the next speed level.
    pub fn cycle_speed(&mut self) {
        self.speed_level = self.speed_level.next();
    }

    /// Reverse the feed direction.
    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }
}
