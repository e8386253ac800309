//! Built-in simulated models.
//!
//! Three small models ship with the harness:
//! 1. **[`counter::Counter`]:** An 8-bit enable-gated counter driven by a fixed stimulus schedule.
//! 2. **[`updown::UpDownCounter`]:** The same counter with a direction input that alternates on a fixed schedule.
//! 3. **[`fetch::FetchStream`]:** A core model that issues sequential instruction fetches over the memory bus.
//!
//! The counters are plain stimulus-loop demos with no bus protocol; only
//! the fetch stream implements the full [`crate::core::Core`] interface.

pub mod counter;
pub mod fetch;
pub mod updown;

pub use counter::Counter;
pub use fetch::FetchStream;
pub use updown::UpDownCounter;
