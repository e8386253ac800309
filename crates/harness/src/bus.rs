//! Synchronous memory bus responder.
//!
//! On every rising clock edge the harness samples the core's bus outputs and
//! services them against the word store in the same edge. The responder:
//! 1. **Samples:** Captures address, read strobe, write data, and write mask into a [`BusRequest`].
//! 2. **Reads:** Looks up the addressed word when the read strobe is high.
//! 3. **Writes:** Expands the four-bit lane mask and merges the selected bytes.
//!
//! Responses carry completion records rather than printing directly, so the
//! sequencer owns all console output and the responder stays testable in
//! isolation.

use crate::common::constants::WORD_SHIFT;
use crate::core::OutputSignals;
use crate::mem::WordStore;

/// One sampled bus transaction, captured at a rising clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusRequest {
    /// Byte address driven by the core.
    pub address: u32,
    /// High when the core requests a word read this edge.
    pub read_strobe: bool,
    /// Word to store when any write lane is selected.
    pub write_data: u32,
    /// Byte-lane write select; one bit per lane, zero means no write.
    pub write_mask: u8,
}

impl BusRequest {
    /// Captures the bus-facing fields of a sampled output set.
    pub fn sample(outputs: &OutputSignals) -> Self {
        Self {
            address: outputs.address,
            read_strobe: outputs.read_strobe,
            write_data: outputs.write_data,
            write_mask: outputs.write_mask,
        }
    }

    /// Word index addressed by this request.
    pub fn word_index(&self) -> u32 {
        self.address >> WORD_SHIFT
    }

    /// Whether any write lane is selected.
    pub fn is_write(&self) -> bool {
        self.write_mask != 0
    }
}

/// A serviced read: the value handed back to the core on this edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCompletion {
    /// Byte address the core drove.
    pub address: u32,
    /// Word returned; the filler encoding when out of range.
    pub value: u32,
    /// True when the address fell outside the store.
    pub out_of_range: bool,
}

/// A serviced write: what the store merged, or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteCompletion {
    /// Byte address the core drove.
    pub address: u32,
    /// Word the core presented on the write lanes.
    pub value: u32,
    /// Original four-bit lane mask.
    pub mask: u8,
    /// True when the address fell outside the store and nothing merged.
    pub dropped: bool,
}

/// Everything the responder did for one sampled request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Present when the read strobe was high.
    pub read: Option<ReadCompletion>,
    /// Present when any write lane was selected.
    pub write: Option<WriteCompletion>,
}

/// Expands a four-bit lane mask into a 32-bit byte mask.
///
/// Each low mask bit selects one byte lane; bit 0 covers bits 7..0 of the
/// word, bit 3 covers bits 31..24. High mask bits are ignored.
pub fn expand_mask(lane_mask: u8) -> u32 {
    let mut byte_mask = 0;
    for lane in 0..4 {
        if lane_mask & (1 << lane) != 0 {
            byte_mask |= 0xFF << (lane * 8);
        }
    }
    byte_mask
}

/// Services one sampled request against the store.
///
/// The read is looked up first, then the write merges, matching the fixed
/// per-edge ordering of the sequencer. A request with the strobe low and an
/// empty mask returns an empty response.
pub fn respond(store: &mut WordStore, request: &BusRequest) -> BusResponse {
    let mut response = BusResponse::default();
    let word_index = request.word_index();

    if request.read_strobe {
        let out_of_range = !store.contains(word_index);
        response.read = Some(ReadCompletion {
            address: request.address,
            value: store.read(word_index),
            out_of_range,
        });
    }

    if request.is_write() {
        let dropped = !store.contains(word_index);
        store.write(word_index, request.write_data, expand_mask(request.write_mask));
        response.write = Some(WriteCompletion {
            address: request.address,
            value: request.write_data,
            mask: request.write_mask,
            dropped,
        });
    }

    response
}
