//! Contract-violation errors raised by the bit primitives and the aggregation engine.
//!
//! Valid, single-family input never produces one of these. Seeing one means the
//! caller passed an offset outside the address width or skipped the family split.

use crate::models::AddressFamily;

/// Error signalled by [`crate::bits`] and [`crate::processing`] on caller bugs.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixError {
    /// A bit offset was outside the byte buffer.
    #[error("bit index {index} out of range for {bit_len} bit address")]
    IndexOutOfRange {
        /// The requested bit offset.
        index: usize,
        /// Width of the buffer in bits.
        bit_len: usize,
    },
    /// Containment or adjacency was checked across address families.
    #[error("address family mismatch: {left} vs {right}")]
    FamilyMismatch {
        left: AddressFamily,
        right: AddressFamily,
    },
}
