//! Persisted scroll position.

use super::error::SavedStateError;
use serde::{Deserialize, Serialize};

/// Size in bytes of the encoded record.
pub const SAVED_STATE_LEN: usize = 8;

/// The only state that survives save/restore: the anchor item and its pixel offset.
///
/// `anchor_offset` is the distance from the viewport's top padding edge to the anchor
/// item's top edge (negative when the anchor is partially scrolled out at the top).
///
/// Encoded as two little-endian `i32`s: position, then offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SavedState {
    /// Adapter position of the anchor item.
    pub anchor_position: i32,
    /// Anchor top edge relative to the top padding.
    pub anchor_offset: i32,
}

impl SavedState {
    /// Create a record.
    pub fn new(anchor_position: i32, anchor_offset: i32) -> Self {
        Self {
            anchor_position,
            anchor_offset,
        }
    }

    /// Encode into the 8-byte wire form.
    pub fn to_bytes(&self) -> [u8; SAVED_STATE_LEN] {
        let mut out = [0u8; SAVED_STATE_LEN];
        out[..4].copy_from_slice(&self.anchor_position.to_le_bytes());
        out[4..].copy_from_slice(&self.anchor_offset.to_le_bytes());
        out
    }

    /// Decode the 8-byte wire form.
    ///
    /// # Errors
    /// [`SavedStateError::WrongLength`] if `bytes` is not exactly 8 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SavedStateError> {
        let record: &[u8; SAVED_STATE_LEN] = bytes
            .try_into()
            .map_err(|_| SavedStateError::WrongLength(bytes.len()))?;
        let [p0, p1, p2, p3, o0, o1, o2, o3] = *record;
        Ok(Self {
            anchor_position: i32::from_le_bytes([p0, p1, p2, p3]),
            anchor_offset: i32::from_le_bytes([o0, o1, o2, o3]),
        })
    }
}
