//! Configuration persistence boundary.

use crate::error::Result;

use super::FeederConfig;

/// Persistent storage for the [`FeederConfig`].
///
/// `load` returns the default configuration when nothing has been stored
/// yet. `save` replaces the stored value as a whole.
pub trait ConfigStore {
    /// Load the stored configuration, or the default if none exists.
    fn load(&mut self) -> Result<FeederConfig>;

    /// Overwrite the stored configuration.
    fn save(&mut self, config: &FeederConfig) -> Result<()>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &mut T {
    fn load(&mut self) -> Result<FeederConfig> {
        (**self).load()
    }

    fn save(&mut self, config: &FeederConfig) -> Result<()> {
        (**self).save(config)
    }
}

/// In-memory store, usable without an allocator or filesystem.
///
/// Useful on targets where the configuration lives in RAM-backed flash
/// shadows, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stored: Option<FeederConfig>,
    saves: u32,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            stored: None,
            saves: 0,
        }
    }

    /// Create a store that already holds `config`.
    pub const fn with_config(config: FeederConfig) -> Self {
        Self {
            stored: Some(config),
            saves: 0,
        }
    }

    /// The stored configuration, if any.
    pub fn stored(&self) -> Option<&FeederConfig> {
        self.stored.as_ref()
    }

    /// Number of `save` calls since creation.
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl ConfigStore for MemoryStore {
    fn load(&mut self) -> Result<FeederConfig> {
        Ok(self.stored.unwrap_or_default())
    }

    fn save(&mut self, config: &FeederConfig) -> Result<()> {
        self.stored = Some(*config);
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}
