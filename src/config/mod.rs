#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};

/// The two deployed form variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// 08:00–20:00, 8 to 13 digit phones
    #[default]
    Extended,
    /// 08:00–19:00, 8 to 11 digit phones
    Standard,
}

impl Preset {
    pub fn hours(self) -> (u32, u32) {
        match self {
            Preset::Extended => (8, 20),
            Preset::Standard => (8, 19),
        }
    }

    pub fn phone_digits(self) -> (usize, usize) {
        match self {
            Preset::Extended => (8, 13),
            Preset::Standard => (8, 11),
        }
    }
}
