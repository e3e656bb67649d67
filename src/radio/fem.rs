//! FEM GPIO Sequencer
//!
//! Drives the optional front-end module (PA/LNA and antenna switch) through
//! up to five GPIO lines. Which lines exist is decided once at boot from the
//! user configuration words; lines assigned the unused sentinel are never
//! touched.

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::{ERASED_WORD, UNUSED_PIN};
use crate::types::FemConfig;

/// Function of a FEM control line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FemRole {
    /// Power-down (high = enabled)
    PowerDown,
    /// Transmit path enable
    TxEnable,
    /// Receive path enable
    RxEnable,
    /// Mode select (gain/bypass, FEM specific)
    Mode,
    /// Antenna select
    AntennaSelect,
}

impl FemRole {
    /// All roles in configuration order
    pub const ALL: [Self; 5] = [
        Self::PowerDown,
        Self::TxEnable,
        Self::RxEnable,
        Self::Mode,
        Self::AntennaSelect,
    ];

    /// Level driven at startup
    #[must_use]
    pub const fn idle_state(self) -> PinState {
        match self {
            Self::PowerDown | Self::RxEnable => PinState::High,
            Self::TxEnable | Self::Mode | Self::AntennaSelect => PinState::Low,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FemRole {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::PowerDown => defmt::write!(f, "PDN"),
            Self::TxEnable => defmt::write!(f, "TX_EN"),
            Self::RxEnable => defmt::write!(f, "RX_EN"),
            Self::Mode => defmt::write!(f, "MODE"),
            Self::AntennaSelect => defmt::write!(f, "ANT_SEL"),
        }
    }
}

/// GPIO assignment of the FEM control lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FemPinPlan {
    power_down: Option<u8>,
    tx_enable: Option<u8>,
    rx_enable: Option<u8>,
    mode: Option<u8>,
    antenna_select: Option<u8>,
}

const fn assigned(pin: u8) -> Option<u8> {
    if pin == UNUSED_PIN {
        None
    } else {
        Some(pin)
    }
}

impl FemPinPlan {
    /// Derive the plan from the two configuration words
    ///
    /// Word A holds power-down, tx-enable, rx-enable and mode in bytes 0..=3;
    /// word B holds antenna-select in byte 0. Returns `None` when both words
    /// are erased (no FEM fitted).
    #[must_use]
    pub const fn from_config_words(word_a: u32, word_b: u32) -> Option<Self> {
        if word_a == ERASED_WORD && word_b == ERASED_WORD {
            return None;
        }

        let [pdn, tx_en, rx_en, mode] = word_a.to_le_bytes();
        let [ant_sel, ..] = word_b.to_le_bytes();

        Some(Self {
            power_down: assigned(pdn),
            tx_enable: assigned(tx_en),
            rx_enable: assigned(rx_en),
            mode: assigned(mode),
            antenna_select: assigned(ant_sel),
        })
    }

    /// Pin assigned to `role`
    #[must_use]
    pub const fn pin(&self, role: FemRole) -> Option<u8> {
        match role {
            FemRole::PowerDown => self.power_down,
            FemRole::TxEnable => self.tx_enable,
            FemRole::RxEnable => self.rx_enable,
            FemRole::Mode => self.mode,
            FemRole::AntennaSelect => self.antenna_select,
        }
    }

    /// Assigned pins with their roles
    pub fn pins(&self) -> impl Iterator<Item = (FemRole, u8)> + '_ {
        FemRole::ALL
            .into_iter()
            .filter_map(|role| self.pin(role).map(|pin| (role, pin)))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FemPinPlan {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "FEM pins(pdn {}, tx_en {}, rx_en {}, mode {}, ant_sel {})",
            self.power_down,
            self.tx_enable,
            self.rx_enable,
            self.mode,
            self.antenna_select
        );
    }
}

/// Applies FEM pin levels for a radio test run
///
/// Writes are fire-and-forget: pin errors are ignored and never block the
/// command path.
pub struct FemSequencer<P> {
    power_down: Option<P>,
    tx_enable: Option<P>,
    rx_enable: Option<P>,
    mode: Option<P>,
    antenna_select: Option<P>,
}

impl<P: OutputPin> FemSequencer<P> {
    /// Configure every assigned line as an output at its idle level
    ///
    /// `bind` turns a pin number into an output driver; it receives the idle
    /// level so the line can come up without glitching and may return
    /// `None` for a pin the board cannot drive.
    pub fn new<F>(plan: &FemPinPlan, mut bind: F) -> Self
    where
        F: FnMut(FemRole, u8, PinState) -> Option<P>,
    {
        let mut bind_role =
            |role: FemRole| plan.pin(role).and_then(|pin| bind(role, pin, role.idle_state()));

        let mut sequencer = Self {
            power_down: bind_role(FemRole::PowerDown),
            tx_enable: bind_role(FemRole::TxEnable),
            rx_enable: bind_role(FemRole::RxEnable),
            mode: bind_role(FemRole::Mode),
            antenna_select: bind_role(FemRole::AntennaSelect),
        };

        for role in FemRole::ALL {
            sequencer.write(role, role.idle_state());
        }

        sequencer
    }

    /// Drive the lines for a command
    ///
    /// Mode and antenna-select follow `fem`; when `transmitting`, the TX
    /// path is enabled and the RX path disabled.
    pub fn apply(&mut self, fem: FemConfig, transmitting: bool) {
        debug!("FEM config: {:?}", fem);

        self.write(FemRole::Mode, PinState::from(fem.mode_high()));
        self.write(FemRole::AntennaSelect, PinState::from(fem.antenna_high()));

        if transmitting {
            self.write(FemRole::TxEnable, PinState::High);
            self.write(FemRole::RxEnable, PinState::Low);
        }
    }

    /// Output bound to `role`, if any
    #[must_use]
    pub fn pin(&self, role: FemRole) -> Option<&P> {
        match role {
            FemRole::PowerDown => self.power_down.as_ref(),
            FemRole::TxEnable => self.tx_enable.as_ref(),
            FemRole::RxEnable => self.rx_enable.as_ref(),
            FemRole::Mode => self.mode.as_ref(),
            FemRole::AntennaSelect => self.antenna_select.as_ref(),
        }
    }

    fn write(&mut self, role: FemRole, state: PinState) {
        let slot = match role {
            FemRole::PowerDown => &mut self.power_down,
            FemRole::TxEnable => &mut self.tx_enable,
            FemRole::RxEnable => &mut self.rx_enable,
            FemRole::Mode => &mut self.mode,
            FemRole::AntennaSelect => &mut self.antenna_select,
        };

        if let Some(pin) = slot {
            let _ = pin.set_state(state);
        }
    }
}
