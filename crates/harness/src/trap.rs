//! Trap monitor.
//!
//! The core reports unrecoverable conditions through a dedicated trap output
//! paired with a cause code. The monitor checks that output once per rising
//! edge; the first assertion is terminal and ends the run at the current
//! iteration boundary.

use std::fmt;

use crate::core::OutputSignals;

/// A latched trap: the first edge on which the core asserted its trap output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapEvent {
    /// Cause code the core drove alongside the trap output.
    pub cause: u32,
    /// Program counter value sampled on the trapping edge.
    pub location: u32,
}

impl fmt::Display for TrapEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trap cause 0x{:x} at pc 0x{:x}",
            self.cause, self.location
        )
    }
}

/// Returns the trap event for this edge, if the core asserted its trap
/// output in the sampled set.
pub fn check(outputs: &OutputSignals) -> Option<TrapEvent> {
    if outputs.trap {
        Some(TrapEvent {
            cause: outputs.trap_cause,
            location: outputs.address,
        })
    } else {
        None
    }
}
