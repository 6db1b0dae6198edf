// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotscene Picking: pixel-to-item lookup through an id render pass.
//!
//! Each top-level item is drawn once with a flat color encoding its id. Reading the color back at a
//! pixel recovers the item in O(1), exactly for any shape the item draws.
//!
//! - Id `0` ([`NO_ITEM`]) is the background. Items receive `index + 1`, up to [`MAX_ID`].
//! - [`encode_id`] / [`decode_id`] pack ids into 24-bit big-endian RGB.
//! - [`PickingBuffer`] stores a read-back and reports when it must be rebuilt.
//! - [`normalize_index`] clamps every result to `-1 ..= item_count - 1`, so stale ids from a
//!   resize or a shrinking scene read as "no item".
//!
//! This crate does not render; the `plotscene` crate drives the id pass through its device trait.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod buffer;
mod id;

pub use buffer::PickingBuffer;
pub use id::{MAX_ID, NO_ITEM, decode_id, encode_id, id_for_index, normalize_index};
