//! # Machine Configuration
//!
//! What the machine holds when it is switched on.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VEND_SLOT_CAPACITY=12                                              │
//! │     VEND_FLOAT_5=20   (twenty PHP 5 coins in the starting float)       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/halo-vend/machine.toml (Linux)                           │
//! │     ~/Library/Application Support/com.halo.vend/machine.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Nine standard items, 10 each, empty cash reserve                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [machine]
//! slot_capacity = 10
//!
//! [[slots]]
//! index = 0
//! name = "Red Bean"
//! price = 5.0
//! calories = 50.0
//! quantity = 10
//!
//! [[float]]
//! denomination = 5
//! count = 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vend_core::validation::{validate_calories, validate_capacity, validate_item_name, validate_price};
use vend_core::{Denomination, Item, Money, DEFAULT_SLOT_CAPACITY, SLOT_COUNT};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Machine Settings
// =============================================================================

/// Machine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Units every slot can hold.
    #[serde(default = "default_slot_capacity")]
    pub slot_capacity: u32,
}

fn default_slot_capacity() -> u32 {
    DEFAULT_SLOT_CAPACITY
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            slot_capacity: default_slot_capacity(),
        }
    }
}

// =============================================================================
// Slot Planogram
// =============================================================================

/// Initial contents of one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Position, `0..SLOT_COUNT`.
    pub index: usize,
    pub name: String,
    /// Unit price in pesos.
    pub price: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub quantity: u32,
}

impl SlotConfig {
    fn new(index: usize, name: &str, price: f64, calories: f64) -> Self {
        SlotConfig {
            index,
            name: name.to_string(),
            price,
            calories,
            quantity: DEFAULT_SLOT_CAPACITY,
        }
    }

    /// The item this slot starts with.
    pub fn item(&self) -> Item {
        Item::new(self.name.trim(), Money::from_decimal(self.price), self.calories)
    }
}

/// The nine items a freshly installed machine is stocked with.
fn default_slots() -> Vec<SlotConfig> {
    vec![
        SlotConfig::new(0, "Red Bean", 5.0, 50.0),
        SlotConfig::new(1, "Ube Ice Cream", 65.0, 200.0),
        SlotConfig::new(2, "Leche Flan", 8.0, 80.0),
        SlotConfig::new(3, "Banana", 12.0, 30.0),
        SlotConfig::new(4, "Nata de Coco", 15.0, 20.0),
        SlotConfig::new(5, "Kaong", 20.0, 25.0),
        SlotConfig::new(6, "Jackfruit", 10.0, 30.0),
        SlotConfig::new(7, "Pinipig", 5.0, 40.0),
        SlotConfig::new(8, "Milk", 30.0, 40.0),
    ]
}

// =============================================================================
// Cash Float
// =============================================================================

/// Pieces of one denomination loaded into the register at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatConfig {
    /// Face value in pesos.
    pub denomination: u32,
    pub count: u32,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete machine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub machine: MachineSettings,

    /// Initial planogram. Positions not listed start unbound.
    #[serde(default = "default_slots")]
    pub slots: Vec<SlotConfig>,

    /// Initial cash reserve.
    #[serde(default)]
    pub float: Vec<FloatConfig>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            machine: MachineSettings::default(),
            slots: default_slots(),
            float: Vec::new(),
        }
    }
}

impl MachineConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (machine.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading machine config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load machine config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without applying overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text without applying overrides or validation.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Machine config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let capacity = self.machine.slot_capacity;
        validate_capacity(capacity)?;

        let mut seen = [false; SLOT_COUNT];
        for slot in &self.slots {
            if slot.index >= SLOT_COUNT {
                return Err(ConfigError::InvalidConfig(format!(
                    "slot index {} is outside 0..{}",
                    slot.index, SLOT_COUNT
                )));
            }
            if seen[slot.index] {
                return Err(ConfigError::InvalidConfig(format!(
                    "slot {} is configured twice",
                    slot.index
                )));
            }
            seen[slot.index] = true;

            validate_item_name(&slot.name)?;
            validate_price(Money::from_decimal(slot.price))?;
            validate_calories(slot.calories)?;

            if slot.quantity > capacity {
                return Err(ConfigError::InvalidConfig(format!(
                    "slot {} starts with {} units but holds at most {}",
                    slot.index, slot.quantity, capacity
                )));
            }
        }

        for entry in &self.float {
            Denomination::try_from(entry.denomination)?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(capacity) = std::env::var("VEND_SLOT_CAPACITY") {
            match capacity.parse::<u32>() {
                Ok(c) => {
                    debug!(capacity = c, "Overriding slot capacity from environment");
                    self.machine.slot_capacity = c;
                }
                Err(_) => warn!(value = %capacity, "Ignoring non-numeric VEND_SLOT_CAPACITY"),
            }
        }

        for denomination in Denomination::ALL {
            let key = format!("VEND_FLOAT_{}", denomination.pesos());
            let Ok(value) = std::env::var(&key) else {
                continue;
            };
            let Ok(count) = value.parse::<u32>() else {
                warn!(key = %key, value = %value, "Ignoring non-numeric float override");
                continue;
            };
            debug!(key = %key, count, "Overriding float from environment");
            self.set_float(denomination, count);
        }
    }

    /// Sets the starting count of one denomination, replacing any entry.
    pub fn set_float(&mut self, denomination: Denomination, count: u32) {
        self.float.retain(|f| f.denomination != denomination.pesos());
        self.float.push(FloatConfig {
            denomination: denomination.pesos(),
            count,
        });
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "halo", "vend")
            .map(|dirs| dirs.config_dir().join("machine.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slots.len(), SLOT_COUNT);
        assert_eq!(config.machine.slot_capacity, 10);
        assert!(config.float.is_empty());
        assert_eq!(config.slots[1].item().unit_price(), Money::from_pesos(65));
    }

    #[test]
    fn test_parse_toml() {
        let config = MachineConfig::from_toml(
            r#"
            [machine]
            slot_capacity = 12

            [[slots]]
            index = 4
            name = "Sago"
            price = 7.5
            calories = 35.0
            quantity = 12

            [[float]]
            denomination = 5
            count = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.machine.slot_capacity, 12);
        assert_eq!(config.slots.len(), 1);
        assert_eq!(config.slots[0].item().unit_price(), Money::from_cents(750));
        assert_eq!(
            config.float,
            vec![FloatConfig {
                denomination: 5,
                count: 20
            }]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = MachineConfig::from_toml("").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_slots() {
        let mut config = MachineConfig::default();
        config.slots[0].index = 9;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        let mut config = MachineConfig::default();
        config.slots[1].index = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        let mut config = MachineConfig::default();
        config.slots[2].quantity = 11;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        let mut config = MachineConfig::default();
        config.slots[3].price = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = MachineConfig::default();
        config.slots[3].name = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_bad_float_and_capacity() {
        let mut config = MachineConfig::default();
        config.float.push(FloatConfig {
            denomination: 2,
            count: 1,
        });
        assert!(matches!(config.validate(), Err(ConfigError::Cash(_))));

        let mut config = MachineConfig::default();
        config.machine.slot_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_set_float_replaces_entry() {
        let mut config = MachineConfig::default();
        config.set_float(Denomination::TEN, 3);
        config.set_float(Denomination::TEN, 7);
        assert_eq!(config.float.len(), 1);
        assert_eq!(config.float[0].count, 7);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("halo-vend-does-not-exist.toml");
        let config = MachineConfig::load_or_default(Some(path));
        assert_eq!(config.slots.len(), SLOT_COUNT);
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!(
            "halo-vend-{}.toml",
            uuid::Uuid::new_v4()
        ));
        let mut config = MachineConfig::default();
        config.set_float(Denomination::ONE, 50);
        config.save(Some(path.clone())).unwrap();

        let reloaded = MachineConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
        let _ = std::fs::remove_file(path);
    }
}
