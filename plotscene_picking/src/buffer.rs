// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-back storage for an id render pass.

use alloc::vec::Vec;

use crate::id::{NO_ITEM, normalize_index};

/// Per-pixel item ids for one viewport, as read back from a device.
///
/// The buffer starts out dirty. It becomes clean only through
/// [`PickingBuffer::set_values`] with data matching the given size, and goes
/// dirty again through [`PickingBuffer::invalidate`].
///
/// ```
/// use plotscene_picking::PickingBuffer;
///
/// let mut buf = PickingBuffer::new();
/// assert!(buf.needs_update(2, 1));
/// assert!(buf.set_values(2, 1, vec![0, 2]));
/// assert!(!buf.needs_update(2, 1));
/// assert_eq!(buf.picked_index(1, 0, 3), 1);
/// assert_eq!(buf.picked_index(0, 0, 3), -1);
/// ```
#[derive(Clone, Debug)]
pub struct PickingBuffer {
    width: u32,
    height: u32,
    ids: Vec<u32>,
    dirty: bool,
}

impl Default for PickingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PickingBuffer {
    /// An empty, dirty buffer.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            ids: Vec::new(),
            dirty: true,
        }
    }

    /// Width of the stored ids.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the stored ids.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the contents are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether a new id pass is required for a `width` x `height` viewport.
    pub fn needs_update(&self, width: u32, height: u32) -> bool {
        self.dirty || self.width != width || self.height != height
    }

    /// Mark the contents as stale. The old ids stay readable until replaced.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Store a row-major id read-back. Returns `false` (and stays dirty) if
    /// `ids` does not hold exactly `width * height` values.
    pub fn set_values(&mut self, width: u32, height: u32, ids: Vec<u32>) -> bool {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(ids.len()) {
            log::warn!(
                "picking read-back has {} ids, expected {width}x{height}",
                ids.len()
            );
            self.dirty = true;
            return false;
        }
        self.width = width;
        self.height = height;
        self.ids = ids;
        self.dirty = false;
        true
    }

    /// Id stored at pixel `(x, y)`; [`NO_ITEM`] outside the buffer.
    pub fn id_at(&self, x: i32, y: i32) -> u32 {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return NO_ITEM;
        };
        if x >= self.width || y >= self.height {
            return NO_ITEM;
        }
        let i = y as usize * self.width as usize + x as usize;
        self.ids.get(i).copied().unwrap_or(NO_ITEM)
    }

    /// Container index picked at `(x, y)`, clamped to `-1 ..= item_count - 1`.
    pub fn picked_index(&self, x: i32, y: i32, item_count: usize) -> i32 {
        match self.id_at(x, y) {
            NO_ITEM => -1,
            id => normalize_index(i64::from(id) - 1, item_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn size_change_requires_update() {
        let mut buf = PickingBuffer::new();
        assert!(buf.set_values(2, 2, vec![1, 1, 2, 2]));
        assert!(!buf.needs_update(2, 2));
        assert!(buf.needs_update(3, 2));
        buf.invalidate();
        assert!(buf.needs_update(2, 2));
        // Stale ids still readable.
        assert_eq!(buf.id_at(0, 1), 2);
    }

    #[test]
    fn mismatched_read_back_is_rejected() {
        let mut buf = PickingBuffer::new();
        assert!(!buf.set_values(2, 2, vec![1, 2, 3]));
        assert!(buf.is_dirty());
        assert_eq!(buf.width(), 0);
    }

    #[test]
    fn row_major_lookup_and_bounds() {
        let mut buf = PickingBuffer::new();
        buf.set_values(3, 2, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(buf.id_at(2, 0), 2);
        assert_eq!(buf.id_at(0, 1), 3);
        assert_eq!(buf.id_at(3, 0), NO_ITEM);
        assert_eq!(buf.id_at(-1, 0), NO_ITEM);
        assert_eq!(buf.id_at(0, 2), NO_ITEM);
    }

    #[test]
    fn stale_ids_clamp_to_no_item() {
        let mut buf = PickingBuffer::new();
        buf.set_values(2, 1, vec![2, 9]);
        assert_eq!(buf.picked_index(0, 0, 2), 1);
        assert_eq!(buf.picked_index(1, 0, 2), -1, "id past item count");
        assert_eq!(buf.picked_index(0, 0, 0), -1, "scene emptied since last pass");
    }
}
