//! User Configuration Region
//!
//! Board-specific settings programmed once into the read-only customer/OTP
//! words: the HFXO load capacitance and the FEM pin assignment. Reading
//! the words is hardware specific (see `hal::uicr`); decoding lives here.

use crate::config::ERASED_WORD;
use crate::radio::fem::FemPinPlan;

/// Crystal oscillator load capacitance setting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HfxoTrim {
    /// Word erased: keep the factory setting
    Factory,
    /// Internal load capacitors disabled
    CapsDisabled,
    /// Internal load capacitors enabled
    Internal {
        /// Input to the device capacitance calculation (stored word / 4)
        capacitance: u32,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for HfxoTrim {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Factory => defmt::write!(f, "factory"),
            Self::CapsDisabled => defmt::write!(f, "internal caps off"),
            Self::Internal { capacitance } => defmt::write!(f, "internal caps {}", capacitance),
        }
    }
}

/// Raw user configuration words
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserConfig {
    /// HFXO load capacitance word
    pub load_cap: u32,
    /// FEM pins word A
    pub fem_word_a: u32,
    /// FEM pins word B
    pub fem_word_b: u32,
}

impl UserConfig {
    /// All words erased
    pub const ERASED: Self = Self {
        load_cap: ERASED_WORD,
        fem_word_a: ERASED_WORD,
        fem_word_b: ERASED_WORD,
    };

    /// FEM pin plan, if a FEM is configured
    #[must_use]
    pub const fn fem_plan(&self) -> Option<FemPinPlan> {
        FemPinPlan::from_config_words(self.fem_word_a, self.fem_word_b)
    }

    /// HFXO load capacitance setting
    #[must_use]
    pub const fn hfxo_trim(&self) -> HfxoTrim {
        match self.load_cap {
            ERASED_WORD => HfxoTrim::Factory,
            0 => HfxoTrim::CapsDisabled,
            word => HfxoTrim::Internal {
                capacitance: word / 4,
            },
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self::ERASED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::fem::FemRole;

    #[test]
    fn erased_region_has_no_fem() {
        assert!(UserConfig::ERASED.fem_plan().is_none());
        assert_eq!(UserConfig::ERASED.hfxo_trim(), HfxoTrim::Factory);
    }

    #[test]
    fn fem_word_b_alone_enables_plan() {
        let cfg = UserConfig {
            fem_word_b: 0xFFFF_FF07,
            ..UserConfig::ERASED
        };
        let plan = cfg.fem_plan().unwrap();
        assert_eq!(plan.pin(FemRole::AntennaSelect), Some(7));
        assert_eq!(plan.pin(FemRole::PowerDown), None);
    }

    #[test]
    fn zero_load_cap_disables_internal_caps() {
        let cfg = UserConfig {
            load_cap: 0,
            ..UserConfig::ERASED
        };
        assert_eq!(cfg.hfxo_trim(), HfxoTrim::CapsDisabled);
    }

    #[test]
    fn load_cap_word_is_quartered() {
        let cfg = UserConfig {
            load_cap: 60,
            ..UserConfig::ERASED
        };
        assert_eq!(cfg.hfxo_trim(), HfxoTrim::Internal { capacitance: 15 });
    }
}
