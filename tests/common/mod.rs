//! Recording test doubles for the hardware collaborators

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use rf_test_firmware::protocol::RadioPayload;
use rf_test_firmware::radio::engine::RadioTestEngine;
use rf_test_firmware::radio::fem::{FemPinPlan, FemRole, FemSequencer};
use rf_test_firmware::radio::link::{LinkConfig, LinkError, RadioLink};
use rf_test_firmware::radio::mapper::RadioTestConfig;

// ============================================================================
// Radio link
// ============================================================================

/// Call made on the mock link
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkCall {
    Init(LinkConfig),
    SetChannel(u8),
    StartRx,
    Write(RadioPayload),
    Disable,
}

/// Radio link that records every call and can be told to fail
#[derive(Default)]
pub struct MockLink {
    pub calls: Vec<LinkCall>,
    pub fail_init: Option<i32>,
    pub fail_channel: Option<i32>,
    pub fail_rx: Option<i32>,
    pub fail_write: Option<i32>,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> Vec<RadioPayload> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                LinkCall::Write(payload) => Some(*payload),
                _ => None,
            })
            .collect()
    }

    pub fn disabled(&self) -> bool {
        self.calls.contains(&LinkCall::Disable)
    }
}

fn result(fail: Option<i32>) -> Result<(), LinkError> {
    fail.map_or(Ok(()), |code| Err(LinkError(code)))
}

impl RadioLink for MockLink {
    fn init(&mut self, config: &LinkConfig) -> Result<(), LinkError> {
        self.calls.push(LinkCall::Init(*config));
        result(self.fail_init)
    }

    fn set_channel(&mut self, channel: u8) -> Result<(), LinkError> {
        self.calls.push(LinkCall::SetChannel(channel));
        result(self.fail_channel)
    }

    fn start_rx(&mut self) -> Result<(), LinkError> {
        self.calls.push(LinkCall::StartRx);
        result(self.fail_rx)
    }

    fn write_payload(&mut self, payload: &RadioPayload) -> Result<(), LinkError> {
        self.calls.push(LinkCall::Write(*payload));
        result(self.fail_write)
    }

    fn disable(&mut self) {
        self.calls.push(LinkCall::Disable);
    }
}

// ============================================================================
// Test engine
// ============================================================================

/// Call made on the mock engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineCall {
    Init(RadioTestConfig),
    Start(RadioTestConfig),
}

/// Test engine that records every call
#[derive(Default)]
pub struct MockEngine {
    pub calls: Vec<EngineCall>,
}

impl RadioTestEngine for MockEngine {
    fn init(&mut self, config: &RadioTestConfig) {
        self.calls.push(EngineCall::Init(*config));
    }

    fn start(&mut self, config: &RadioTestConfig) {
        self.calls.push(EngineCall::Start(*config));
    }
}

// ============================================================================
// GPIO
// ============================================================================

/// Shared log of `(pin, level)` writes across all recording pins
pub type PinLog = Rc<RefCell<Vec<(u8, PinState)>>>;

/// Output pin that appends its writes to a shared log
pub struct RecordingPin {
    pub number: u8,
    pub log: PinLog,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.number, PinState::Low));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.number, PinState::High));
        Ok(())
    }
}

/// Build a sequencer over recording pins
///
/// Returns the sequencer, the write log and the `(role, pin, initial)`
/// bindings requested by the sequencer.
pub fn recording_sequencer(
    plan: &FemPinPlan,
) -> (
    FemSequencer<RecordingPin>,
    PinLog,
    Vec<(FemRole, u8, PinState)>,
) {
    let log = PinLog::default();
    let mut bound = Vec::new();
    let sequencer = FemSequencer::new(plan, |role, number, initial| {
        bound.push((role, number, initial));
        Some(RecordingPin {
            number,
            log: Rc::clone(&log),
        })
    });
    (sequencer, log, bound)
}

/// Plan with every line assigned: pdn 1, tx_en 2, rx_en 3, mode 4, ant_sel 5
pub fn full_plan() -> FemPinPlan {
    FemPinPlan::from_config_words(0x0403_0201, 0xFFFF_FF05).expect("FEM configured")
}

/// Last level written to `pin`, if any
pub fn last_level(log: &PinLog, pin: u8) -> Option<PinState> {
    log.borrow()
        .iter()
        .rev()
        .find(|(number, _)| *number == pin)
        .map(|(_, state)| *state)
}
