// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-call contexts handed to items.

use peniko::Color;
use plotscene_tree::ItemId;

/// Context for an event handler.
///
/// Handlers cannot reach the scene directly. Repaint requests are collected
/// here and applied once dispatch has returned.
#[derive(Clone, Debug)]
pub struct EventContext {
    item: ItemId,
    geometry: (u32, u32),
    repaint: bool,
}

impl EventContext {
    pub(crate) fn new(item: ItemId, geometry: (u32, u32)) -> Self {
        Self {
            item,
            geometry,
            repaint: false,
        }
    }

    /// The receiving item.
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Scene size in pixels.
    pub fn geometry(&self) -> (u32, u32) {
        self.geometry
    }

    /// Mark the scene dirty after this dispatch.
    pub fn request_repaint(&mut self) {
        self.repaint = true;
    }

    /// Whether a repaint was requested.
    pub fn repaint_requested(&self) -> bool {
        self.repaint
    }
}

/// Context for [`Item::paint`](crate::Item::paint).
#[derive(Clone, Debug)]
pub struct PaintContext {
    item: ItemId,
    opacity: f32,
    geometry: (u32, u32),
    id_pass: bool,
    repaint: bool,
}

impl PaintContext {
    pub(crate) fn new(item: ItemId, opacity: f32, geometry: (u32, u32), id_pass: bool) -> Self {
        Self {
            item,
            opacity,
            geometry,
            id_pass,
            repaint: false,
        }
    }

    /// The item being painted.
    pub fn item(&self) -> ItemId {
        self.item
    }

    /// Effective opacity: the product of this item's and all ancestors' opacities.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// `color` with its alpha scaled by [`PaintContext::opacity`].
    pub fn apply_opacity(&self, color: Color) -> Color {
        color.multiply_alpha(self.opacity)
    }

    /// Scene size in pixels.
    pub fn geometry(&self) -> (u32, u32) {
        self.geometry
    }

    /// Whether this is an id pass. Colors are ignored by the device, so items
    /// may skip purely decorative drawing.
    pub fn is_id_pass(&self) -> bool {
        self.id_pass
    }

    /// Keep the scene dirty after this paint pass (for animation).
    ///
    /// Ignored during id passes.
    pub fn request_repaint(&mut self) {
        self.repaint = true;
    }

    pub(crate) fn repaint_requested(&self) -> bool {
        self.repaint && !self.id_pass
    }
}
