// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing item indices into 24-bit RGB ids.

/// Id reserved for background pixels.
pub const NO_ITEM: u32 = 0;

/// Largest id an item can receive. `0xFFFFFF` is left unused so a cleared
/// white buffer never decodes to an item.
pub const MAX_ID: u32 = (1 << 24) - 2;

/// Id for the item at `index` in its container, or `None` once ids run out.
///
/// ```
/// use plotscene_picking::{id_for_index, MAX_ID};
///
/// assert_eq!(id_for_index(0), Some(1));
/// assert_eq!(id_for_index(MAX_ID as usize - 1), Some(MAX_ID));
/// assert_eq!(id_for_index(MAX_ID as usize), None);
/// ```
pub fn id_for_index(index: usize) -> Option<u32> {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add(1))
        .filter(|&id| id <= MAX_ID)
}

/// Encode an id as big-endian RGB bytes. Bits above 24 are dropped.
pub fn encode_id(id: u32) -> [u8; 3] {
    let [_, r, g, b] = id.to_be_bytes();
    [r, g, b]
}

/// Decode big-endian RGB bytes back to an id.
pub fn decode_id(rgb: [u8; 3]) -> u32 {
    let [r, g, b] = rgb;
    u32::from_be_bytes([0, r, g, b])
}

/// Clamp a raw pick result to `-1 ..= item_count - 1`.
///
/// Anything outside that range, including stale ids left over from a larger
/// scene, becomes `-1` ("no item").
///
/// ```
/// use plotscene_picking::normalize_index;
///
/// assert_eq!(normalize_index(2, 3), 2);
/// assert_eq!(normalize_index(3 + 5, 3), -1);
/// assert_eq!(normalize_index(-100, 3), -1);
/// ```
pub fn normalize_index(raw: i64, item_count: usize) -> i32 {
    let in_range = usize::try_from(raw).is_ok_and(|i| i < item_count);
    if !in_range {
        return -1;
    }
    i32::try_from(raw).unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_known_values() {
        assert_eq!(encode_id(1), [0, 0, 1]);
        assert_eq!(encode_id(0x01_02_03), [1, 2, 3]);
        assert_eq!(encode_id(MAX_ID), [0xFF, 0xFF, 0xFE]);
        assert_eq!(decode_id([0xFF, 0xFF, 0xFE]), MAX_ID);
        assert_eq!(decode_id([0, 1, 0]), 256);
        // High byte is discarded.
        assert_eq!(decode_id(encode_id(0xAB00_0005)), 5);
    }

    #[test]
    fn ids_are_one_based_and_capped() {
        assert_eq!(id_for_index(4), Some(5));
        assert_eq!(id_for_index(usize::MAX), None);
        assert_ne!(id_for_index(0), Some(NO_ITEM));
    }

    #[test]
    fn normalize_edges() {
        assert_eq!(normalize_index(0, 0), -1, "empty scene never picks");
        assert_eq!(normalize_index(0, 1), 0);
        assert_eq!(normalize_index(-1, 5), -1);
        assert_eq!(normalize_index(i64::MAX, 5), -1);
    }
}
