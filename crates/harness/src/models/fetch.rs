//! Sequential fetch stream model.
//!
//! A minimal core model for exercising the full harness path. After reset
//! releases it issues one instruction fetch per rising edge at consecutive
//! word addresses. The fetched data is ignored; the model generates bus
//! traffic, it does not execute. A trap address can be armed to exercise
//! the trap path.

use crate::core::{Core, InputSignals, OutputSignals};

/// Core model that fetches sequential words over the memory bus.
#[derive(Debug, Clone, Default)]
pub struct FetchStream {
    pc: u32,
    inputs: InputSignals,
    outputs: OutputSignals,
    prev_clock: bool,
    trap_at: Option<(u32, u32)>,
}

impl FetchStream {
    /// A fetch stream starting at address zero with no trap armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a trap: when the fetch address reaches `address`, the model
    /// asserts its trap output with `cause` instead of fetching.
    pub fn with_trap(mut self, address: u32, cause: u32) -> Self {
        self.trap_at = Some((address, cause));
        self
    }

    /// Address of the next fetch.
    pub fn pc(&self) -> u32 {
        self.pc
    }
}

impl Core for FetchStream {
    fn apply(&mut self, inputs: &InputSignals) {
        self.inputs = *inputs;
    }

    fn eval(&mut self) {
        let rising = self.inputs.clock && !self.prev_clock;
        self.prev_clock = self.inputs.clock;
        if !rising {
            return;
        }
        if self.inputs.reset {
            self.pc = 0;
            self.outputs = OutputSignals::default();
            return;
        }
        if let Some((address, cause)) = self.trap_at {
            if self.pc == address {
                self.outputs = OutputSignals {
                    address,
                    trap: true,
                    trap_cause: cause,
                    ..OutputSignals::default()
                };
                return;
            }
        }
        self.outputs = OutputSignals {
            address: self.pc,
            read_strobe: true,
            ..OutputSignals::default()
        };
        self.pc = self.pc.wrapping_add(4);
    }

    fn sample(&self) -> OutputSignals {
        self.outputs
    }
}
