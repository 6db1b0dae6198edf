// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene: item ownership, painting, picking, and event dispatch.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;

use kurbo::Point;
use log::{debug, trace, warn};
use plotscene_event_state::{
    ClickCounter, DEFAULT_CLICK_DISTANCE, DEFAULT_CLICK_INTERVAL, EventState, KeyEvent, Modifiers,
    MouseButton, MouseEvent, ScreenPos,
};
use plotscene_picking::{MAX_ID, PickingBuffer, id_for_index, normalize_index};
use plotscene_responder::{Hierarchy, Outcome, Router, dispatcher};
use plotscene_tree::{Detached, ItemFlags, ItemId, ItemTree, LocalItem, Transform2D, TreeError};
use smallvec::SmallVec;

use crate::context::{EventContext, PaintContext};
use crate::error::SceneError;
use crate::item::Item;
use crate::painter::Painter;

/// A boxed item as stored in the scene tree.
pub type BoxedItem = Box<dyn Item>;

/// Scene options.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Pick through an id pass when the device supports it.
    pub use_buffer_id: bool,
    /// Maximum distance between presses that form a double click, or `None` for unlimited.
    pub click_distance: Option<f64>,
    /// Maximum milliseconds between presses that form a double click, or `None` for unlimited.
    pub click_interval: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            use_buffer_id: true,
            click_distance: Some(DEFAULT_CLICK_DISTANCE),
            click_interval: Some(DEFAULT_CLICK_INTERVAL),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Action {
    Move,
    Press,
    Release,
    DoubleClick,
    Wheel(f64),
}

struct TreeHierarchy<'a>(&'a ItemTree<BoxedItem>);

impl Hierarchy<ItemId> for TreeHierarchy<'_> {
    fn parent_of(&self, node: &ItemId) -> Option<ItemId> {
        self.0.parent_of(*node)
    }

    fn map_to_parent(&self, node: &ItemId, point: Point) -> Option<Point> {
        self.0.map_to_parent(*node, point)
    }
}

struct PaintPass {
    geometry: (u32, u32),
    id_pass: bool,
    painted: bool,
    repaint: bool,
}

/// The root of a chart scene.
///
/// A scene owns the item tree, the rendering device, and the pointer state.
/// It paints items in container order (first added is painted first), and
/// resolves input in the reverse order so the item drawn on top is the one
/// that receives the event.
///
/// Screen pixels map 1:1 onto scene space. An optional scene transform sits
/// between scene space and the top-level items. Events report a pixel at its
/// integer corner; picking samples the pixel centre.
///
/// ```
/// use kurbo::Rect;
/// use peniko::Color;
/// use plotscene::{
///     EventContext, Item, MouseButton, MouseEvent, PaintContext, Painter, Scene, ScreenPos,
///     SoftwareDevice,
/// };
///
/// struct Button {
///     pressed: bool,
/// }
///
/// impl Item for Button {
///     fn paint(&mut self, painter: &mut dyn Painter, _: &mut PaintContext) -> bool {
///         painter.fill_rect(Rect::new(0.0, 0.0, 40.0, 20.0), Color::from_rgb8(0, 0, 0));
///         true
///     }
///     fn bounds(&self) -> Option<Rect> {
///         Some(Rect::new(0.0, 0.0, 40.0, 20.0))
///     }
///     fn button_press(&mut self, _: &MouseEvent, _: &mut EventContext) -> bool {
///         self.pressed = true;
///         true
///     }
/// }
///
/// let mut scene = Scene::new(SoftwareDevice::new());
/// scene.set_geometry(100, 100);
/// let button = scene.add_item(Button { pressed: false });
///
/// assert!(scene.button_press(MouseButton::Left, ScreenPos::new(10, 10)));
/// assert!(scene.downcast_item::<Button>(button).is_some_and(|b| b.pressed));
/// assert_eq!(scene.captured_item(), Some(button));
/// ```
pub struct Scene<D> {
    tree: ItemTree<BoxedItem>,
    device: D,
    config: SceneConfig,
    geometry: (u32, u32),
    transform: Option<Transform2D>,
    dirty: bool,
    state: EventState<ItemId>,
    clicks: ClickCounter,
    picking: PickingBuffer,
    id_readback_failed: bool,
}

impl<D: fmt::Debug> fmt::Debug for Scene<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("items", &self.tree.len())
            .field("device", &self.device)
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("transform", &self.transform)
            .field("dirty", &self.dirty)
            .field("hovered", &self.state.hovered())
            .field("captured", &self.state.captured())
            .finish_non_exhaustive()
    }
}

impl<D: Painter> Scene<D> {
    /// Create an empty scene with the default configuration.
    pub fn new(device: D) -> Self {
        Self::with_config(device, SceneConfig::default())
    }

    /// Create an empty scene.
    ///
    /// The scene starts dirty and with a zero-size viewport; call
    /// [`Scene::set_geometry`] before painting or picking.
    pub fn with_config(device: D, config: SceneConfig) -> Self {
        let clicks = ClickCounter::with_thresholds(config.click_distance, config.click_interval);
        Self {
            tree: ItemTree::new(),
            device,
            config,
            geometry: (0, 0),
            transform: None,
            dirty: true,
            state: EventState::new(),
            clicks,
            picking: PickingBuffer::new(),
            id_readback_failed: false,
        }
    }

    // --- configuration and accessors ---

    /// Current configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Enable or disable id-buffer picking.
    ///
    /// Re-enabling also retries a device whose read-back failed earlier.
    pub fn set_use_buffer_id(&mut self, enabled: bool) {
        self.config.use_buffer_id = enabled;
        self.id_readback_failed = false;
        self.picking.invalidate();
    }

    /// The rendering device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the rendering device.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the scene and return its device.
    pub fn into_device(self) -> D {
        self.device
    }

    /// The item tree, for structural queries.
    pub fn tree(&self) -> &ItemTree<BoxedItem> {
        &self.tree
    }

    /// The pointer state.
    pub fn event_state(&self) -> &EventState<ItemId> {
        &self.state
    }

    /// The item under the pointer, if it is still in the scene.
    pub fn hovered_item(&self) -> Option<ItemId> {
        self.state.hovered().filter(|&id| self.tree.is_alive(id))
    }

    /// The item holding the pointer capture, if it is still in the scene.
    pub fn captured_item(&self) -> Option<ItemId> {
        self.state.captured().filter(|&id| self.tree.is_alive(id))
    }

    /// Viewport size in pixels.
    pub fn geometry(&self) -> (u32, u32) {
        self.geometry
    }

    /// Resize the viewport.
    pub fn set_geometry(&mut self, width: u32, height: u32) {
        if self.geometry != (width, height) {
            self.geometry = (width, height);
            self.set_dirty(true);
        }
    }

    /// The scene transform applied above all top-level items.
    pub fn transform(&self) -> Option<Transform2D> {
        self.transform
    }

    /// Set the scene transform.
    pub fn set_transform(&mut self, transform: Option<Transform2D>) {
        if self.transform != transform {
            self.transform = transform;
            self.set_dirty(true);
        }
    }

    /// Whether the scene needs painting.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the scene dirty (or clean).
    ///
    /// Marking dirty also invalidates the picking buffer. Item mutations made
    /// through the scene call this already.
    pub fn set_dirty(&mut self, dirty: bool) {
        if dirty {
            self.picking.invalidate();
        }
        self.dirty = dirty;
    }

    // --- item management ---

    /// Number of top-level items.
    pub fn item_count(&self) -> usize {
        self.tree.roots().len()
    }

    /// Add a top-level item on top of the others.
    pub fn add_item<I: Item>(&mut self, item: I) -> ItemId {
        let boxed: BoxedItem = Box::new(item);
        let id = self.tree.insert_root(LocalItem::default(), boxed);
        self.set_dirty(true);
        id
    }

    /// Add `item` on top of `parent`'s children.
    pub fn add_child<I: Item>(&mut self, parent: ItemId, item: I) -> Result<ItemId, SceneError> {
        self.add_item_with(Some(parent), LocalItem::default(), item)
    }

    /// Add `item` with explicit local state under `parent` (or at the top level).
    pub fn add_item_with<I: Item>(
        &mut self,
        parent: Option<ItemId>,
        local: LocalItem,
        item: I,
    ) -> Result<ItemId, SceneError> {
        let boxed: BoxedItem = Box::new(item);
        let id = self.tree.insert(parent, local, boxed)?;
        self.set_dirty(true);
        Ok(id)
    }

    /// Re-attach a subtree previously returned by [`Scene::remove_item`].
    pub fn attach(
        &mut self,
        parent: Option<ItemId>,
        detached: Detached<BoxedItem>,
    ) -> Result<ItemId, SceneError> {
        let id = self.tree.attach(parent, detached)?;
        self.set_dirty(true);
        Ok(id)
    }

    /// Remove an item and its subtree.
    ///
    /// Hover and capture on removed items are dropped silently. Returns `None`
    /// for stale ids.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Detached<BoxedItem>> {
        let detached = self.tree.remove(id)?;
        self.forget_stale();
        self.set_dirty(true);
        Some(detached)
    }

    /// Remove every item.
    pub fn clear_items(&mut self) -> Vec<Detached<BoxedItem>> {
        let removed = self.tree.clear(None);
        if !removed.is_empty() {
            self.forget_stale();
            self.set_dirty(true);
        }
        removed
    }

    /// Move `id` to the top of its container. Returns its new index.
    pub fn raise_item(&mut self, id: ItemId) -> Result<usize, SceneError> {
        let index = self.tree.raise(id)?;
        self.set_dirty(true);
        Ok(index)
    }

    /// Move `id` to the bottom of its container. Returns its new index.
    pub fn lower_item(&mut self, id: ItemId) -> Result<usize, SceneError> {
        let index = self.tree.lower(id)?;
        self.set_dirty(true);
        Ok(index)
    }

    /// Restack `id` directly above its sibling `under`.
    pub fn stack_above(&mut self, id: ItemId, under: ItemId) -> Result<usize, SceneError> {
        let index = self.tree.stack_above(id, under)?;
        self.set_dirty(true);
        Ok(index)
    }

    /// Restack `id` directly below its sibling `above`.
    pub fn stack_under(&mut self, id: ItemId, above: ItemId) -> Result<usize, SceneError> {
        let index = self.tree.stack_under(id, above)?;
        self.set_dirty(true);
        Ok(index)
    }

    /// Move `id` (with its subtree) on top of `parent`'s children.
    pub fn reparent_item(&mut self, id: ItemId, parent: Option<ItemId>) -> Result<(), SceneError> {
        self.tree.reparent(id, parent)?;
        self.set_dirty(true);
        Ok(())
    }

    // --- item state ---

    /// Set an item's local transform. Returns whether anything changed.
    pub fn set_item_transform(&mut self, id: ItemId, transform: Option<Transform2D>) -> bool {
        let changed = self.tree.set_transform(id, transform);
        if changed {
            self.set_dirty(true);
        }
        changed
    }

    /// Set an item's opacity (clamped to `[0, 1]`). Returns whether anything changed.
    pub fn set_item_opacity(&mut self, id: ItemId, opacity: f32) -> bool {
        let changed = self.tree.set_opacity(id, opacity);
        if changed {
            self.set_dirty(true);
        }
        changed
    }

    /// Show or hide an item and its subtree. Returns whether anything changed.
    pub fn set_item_visible(&mut self, id: ItemId, visible: bool) -> bool {
        self.set_item_flag(id, ItemFlags::VISIBLE, visible)
    }

    /// Allow or forbid picking an item and its subtree. Returns whether anything changed.
    pub fn set_item_interactive(&mut self, id: ItemId, interactive: bool) -> bool {
        self.set_item_flag(id, ItemFlags::INTERACTIVE, interactive)
    }

    fn set_item_flag(&mut self, id: ItemId, flag: ItemFlags, on: bool) -> bool {
        let Some(mut flags) = self.tree.local(id).map(|l| l.flags) else {
            return false;
        };
        flags.set(flag, on);
        let changed = self.tree.set_flags(id, flags);
        if changed {
            self.set_dirty(true);
        }
        changed
    }

    /// The item behind `id`.
    pub fn item(&self, id: ItemId) -> Option<&dyn Item> {
        self.tree.payload(id).map(|b| &**b)
    }

    /// Mutable access to the item behind `id`.
    ///
    /// This does not mark the scene dirty; prefer [`Scene::update_item`] for
    /// visual changes.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut dyn Item> {
        self.tree.payload_mut(id).map(|b| &mut **b)
    }

    /// The item behind `id` as a concrete type.
    pub fn downcast_item<T: Item>(&self, id: ItemId) -> Option<&T> {
        let item: &dyn Any = self.item(id)?;
        item.downcast_ref()
    }

    /// The item behind `id` as a concrete mutable type.
    pub fn downcast_item_mut<T: Item>(&mut self, id: ItemId) -> Option<&mut T> {
        let item: &mut dyn Any = self.item_mut(id)?;
        item.downcast_mut()
    }

    /// Mutate a concrete item and mark the scene dirty.
    pub fn update_item<T: Item, R>(
        &mut self,
        id: ItemId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, SceneError> {
        if !self.tree.is_alive(id) {
            return Err(TreeError::StaleItem(id).into());
        }
        let item = self.downcast_item_mut::<T>(id).ok_or(SceneError::WrongType {
            item: id,
            expected: type_name::<T>(),
        })?;
        let out = f(item);
        self.set_dirty(true);
        Ok(out)
    }

    // --- coordinate mapping ---

    /// Map a point from top-level item space into scene space.
    pub fn map_to_parent(&self, p: Point) -> Point {
        match self.transform {
            Some(tf) => tf.map_point(p),
            None => p,
        }
    }

    /// Map a point from scene space into top-level item space.
    ///
    /// Returns `None` if the scene transform is not invertible.
    pub fn map_from_parent(&self, p: Point) -> Option<Point> {
        match self.transform {
            Some(tf) => tf.inverse_map_point(p),
            None => Some(p),
        }
    }

    /// Map a point from `id`'s local space into scene space.
    pub fn map_to_scene(&self, id: ItemId, p: Point) -> Option<Point> {
        self.tree.map_to_root(id, p).map(|r| self.map_to_parent(r))
    }

    /// Map a point from scene space into `id`'s local space.
    pub fn map_from_scene(&self, id: ItemId, p: Point) -> Option<Point> {
        let root = self.map_from_parent(p)?;
        self.tree.map_from_root(id, root)
    }

    // --- painting ---

    /// Paint every visible item and mark the scene clean.
    ///
    /// Items that call [`PaintContext::request_repaint`] leave the scene dirty.
    /// Returns whether any item drew something. A zero-size viewport or a
    /// non-invertible scene transform paints nothing and leaves the scene dirty.
    pub fn paint(&mut self) -> bool {
        let (width, height) = self.geometry;
        if width == 0 || height == 0 {
            debug!("skipping paint of a {width}x{height} viewport");
            return false;
        }
        if self.has_degenerate_transform() {
            debug!("skipping paint under a degenerate scene transform");
            return false;
        }
        let pass = self.traverse(false);
        debug!(
            "painted {} items, repaint requested: {}",
            self.tree.len(),
            pass.repaint
        );
        self.dirty = false;
        if pass.repaint {
            self.set_dirty(true);
        }
        pass.painted
    }

    fn has_degenerate_transform(&self) -> bool {
        self.transform.is_some_and(|tf| !tf.is_invertible())
    }

    fn traverse(&mut self, id_pass: bool) -> PaintPass {
        let mut pass = PaintPass {
            geometry: self.geometry,
            id_pass,
            painted: false,
            repaint: false,
        };
        let Self {
            tree,
            device,
            transform,
            ..
        } = self;
        if let Some(tf) = *transform {
            device.push_transform(tf.as_affine());
        }
        let roots: SmallVec<[ItemId; 16]> = tree.roots().paint_order().collect();
        for (index, id) in roots.into_iter().enumerate() {
            if id_pass {
                if !tree.local(id).is_some_and(LocalItem::is_pickable) {
                    continue;
                }
                let Some(buffer_id) = id_for_index(index) else {
                    warn!("only {MAX_ID} top-level items can be picked by id");
                    break;
                };
                device.set_buffer_id(buffer_id);
            }
            paint_subtree(tree, device, id, 1.0, &mut pass);
        }
        if transform.is_some() {
            device.pop_transform();
        }
        pass
    }

    // --- picking ---

    /// Index of the top-level item under `pos`, or `-1`.
    ///
    /// Uses the id buffer when enabled and supported, otherwise tests the
    /// top-level subtrees geometrically. The result is always within
    /// `-1 ..= item_count - 1`.
    pub fn picked_item_index(&mut self, pos: ScreenPos) -> i32 {
        if !self.in_viewport(pos) {
            return -1;
        }
        let count = self.item_count();
        if self.refresh_picking_buffer() {
            return self.picking.picked_index(pos.x, pos.y, count);
        }
        let Some(root_pos) = self.map_from_parent(pos.pixel_center()) else {
            return -1;
        };
        let probe = self.probe_event(pos);
        let hit = self
            .tree
            .roots()
            .as_slice()
            .iter()
            .rposition(|&id| self.pick_subtree(id, root_pos, &probe).is_some());
        hit.map_or(-1, |i| {
            normalize_index(i64::try_from(i).unwrap_or(-1), count)
        })
    }

    /// The deepest item under `pos`.
    ///
    /// Invisible and non-interactive items (with their subtrees) and items
    /// whose transform cannot be inverted are never picked. Hit tests sample
    /// the centre of the pixel.
    ///
    /// With an id buffer the top-level item painted at `pos` is tried first;
    /// its subtree is then refined with [`Item::hit_test`], and if that
    /// disagrees the items beneath it are tested in hit order. Both strategies
    /// therefore resolve to the same item.
    pub fn pick(&mut self, pos: ScreenPos) -> Option<ItemId> {
        if !self.in_viewport(pos) {
            return None;
        }
        let root_pos = self.map_from_parent(pos.pixel_center())?;
        let probe = self.probe_event(pos);
        let roots = if self.refresh_picking_buffer() {
            let index = self
                .picking
                .picked_index(pos.x, pos.y, self.tree.roots().len());
            let top = usize::try_from(index).ok()?;
            self.tree.roots().as_slice().get(..=top)?
        } else {
            self.tree.roots().as_slice()
        };
        roots
            .iter()
            .rev()
            .find_map(|&id| self.pick_subtree(id, root_pos, &probe))
    }

    fn in_viewport(&self, pos: ScreenPos) -> bool {
        let (width, height) = self.geometry;
        u32::try_from(pos.x).is_ok_and(|x| x < width)
            && u32::try_from(pos.y).is_ok_and(|y| y < height)
    }

    fn probe_event(&self, pos: ScreenPos) -> MouseEvent {
        MouseEvent {
            scene_pos: pos.to_point(),
            screen_pos: pos,
            ..*self.state.mouse()
        }
    }

    /// Children first in hit order, then `id` itself. `parent_pos` is in the parent's space.
    fn pick_subtree(&self, id: ItemId, parent_pos: Point, probe: &MouseEvent) -> Option<ItemId> {
        if !self.tree.local(id)?.is_pickable() {
            return None;
        }
        let pos = self.tree.map_from_parent(id, parent_pos)?;
        for &child in self.tree.children(id).iter().rev() {
            if let Some(hit) = self.pick_subtree(child, pos, probe) {
                return Some(hit);
            }
        }
        let item = self.tree.payload(id)?;
        item.hit_test(&probe.localized(pos, pos)).then_some(id)
    }

    /// Make sure the id buffer is current. Returns whether it can be used.
    fn refresh_picking_buffer(&mut self) -> bool {
        if !self.config.use_buffer_id
            || self.id_readback_failed
            || self.has_degenerate_transform()
            || !self.device.supports_buffer_id()
        {
            return false;
        }
        let (width, height) = self.geometry;
        if width == 0 || height == 0 {
            return false;
        }
        if !self.picking.needs_update(width, height) {
            return true;
        }
        debug!("rebuilding picking buffer at {width}x{height}");
        self.device.begin_buffer_id_mode(width, height);
        self.traverse(true);
        self.device.end_buffer_id_mode();
        let mut ids = Vec::new();
        if !self.device.read_buffer_ids(&mut ids) {
            warn!("device cannot read back item ids, falling back to geometric picking");
            self.id_readback_failed = true;
            return false;
        }
        self.picking.set_values(width, height, ids)
    }

    // --- interactor surface ---

    /// Set the modifiers reported with subsequent events.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.state.set_modifiers(modifiers);
    }

    /// The pointer moved to `pos`.
    ///
    /// Without a capture, the item under the pointer is re-picked; a change
    /// sends Leave to the old item and Enter to the new one, then Move goes to
    /// the hovered item. While an item holds the capture it receives every Move
    /// and hover is left unchanged.
    pub fn mouse_move(&mut self, pos: ScreenPos) -> bool {
        self.begin_event(pos);
        let consumed = if let Some(captured) = self.state.captured() {
            self.dispatch(captured, Action::Move)
        } else {
            let picked = self.pick(pos);
            let transition = self.state.set_hovered(picked);
            if let Some(left) = transition.leave {
                self.deliver_hover(left, false);
            }
            if let Some(entered) = transition.enter {
                self.deliver_hover(entered, true);
            }
            match self.state.hovered() {
                Some(hovered) => self.dispatch(hovered, Action::Move),
                None => false,
            }
        };
        self.state.commit_last();
        consumed
    }

    /// A button was pressed at `pos`.
    ///
    /// The picked item captures the pointer whether or not it consumed the press.
    pub fn button_press(&mut self, button: MouseButton, pos: ScreenPos) -> bool {
        self.press(button, pos, Action::Press)
    }

    /// A button was pressed at `pos` on a platform that does not report repeat counts.
    ///
    /// A second press of the same button close enough in space and time is
    /// delivered as a double click.
    pub fn button_press_at(
        &mut self,
        button: MouseButton,
        pos: ScreenPos,
        timestamp_ms: u64,
    ) -> bool {
        let count = self.clicks.on_press(button, pos.to_point(), timestamp_ms);
        if count >= 2 {
            self.clicks.reset();
            self.double_click(button, pos)
        } else {
            self.button_press(button, pos)
        }
    }

    /// A button was released at `pos`.
    ///
    /// Only the captured item is notified. The capture and the button state are
    /// cleared whether or not it consumed the release.
    pub fn button_release(&mut self, button: MouseButton, pos: ScreenPos) -> bool {
        self.begin_event(pos);
        let consumed = match self.state.captured() {
            Some(captured) => {
                self.state.set_button(button);
                self.dispatch(captured, Action::Release)
            }
            None => false,
        };
        self.state.release();
        self.state.commit_last();
        consumed
    }

    /// A double click at `pos`, as reported by the platform.
    pub fn double_click(&mut self, button: MouseButton, pos: ScreenPos) -> bool {
        self.press(button, pos, Action::DoubleClick)
    }

    /// The wheel turned at `pos`. Always re-picked; capture does not apply.
    pub fn wheel(&mut self, delta: f64, pos: ScreenPos) -> bool {
        self.begin_event(pos);
        let consumed = match self.pick(pos) {
            Some(id) => self.dispatch(id, Action::Wheel(delta)),
            None => false,
        };
        self.state.commit_last();
        consumed
    }

    /// A key was pressed. Delivered to the item under the last pointer position.
    ///
    /// The event's modifiers travel with the key event only; pointer events keep
    /// the modifiers last given to [`Scene::set_modifiers`].
    pub fn key_press(&mut self, event: KeyEvent) -> bool {
        self.key(event, true)
    }

    /// A key was released. Delivered to the item under the last pointer position.
    pub fn key_release(&mut self, event: KeyEvent) -> bool {
        self.key(event, false)
    }

    fn press(&mut self, button: MouseButton, pos: ScreenPos, action: Action) -> bool {
        self.begin_event(pos);
        self.state.commit_last();
        let picked = self.pick(pos);
        self.state.capture(picked, button);
        match picked {
            Some(id) => self.dispatch(id, action),
            None => {
                trace!("{action:?} at {pos:?} hit no item");
                false
            }
        }
    }

    fn key(&mut self, mut event: KeyEvent, press: bool) -> bool {
        self.forget_stale();
        let pos = self.state.mouse().screen_pos;
        event.screen_pos = pos;
        let Some(id) = self.pick(pos) else {
            return false;
        };
        let mut cx = EventContext::new(id, self.geometry);
        let Some(item) = self.tree.payload_mut(id) else {
            return false;
        };
        trace!("key {:?} (press: {press}) -> {id:?}", event.key);
        let consumed = if press {
            item.key_press(&event, &mut cx)
        } else {
            item.key_release(&event, &mut cx)
        };
        if cx.repaint_requested() {
            self.set_dirty(true);
        }
        consumed
    }

    fn begin_event(&mut self, pos: ScreenPos) {
        self.forget_stale();
        self.state.begin(pos, pos.to_point());
    }

    fn forget_stale(&mut self) {
        let tree = &self.tree;
        self.state.retain(|&id| tree.is_alive(id));
    }

    /// Enter/Leave go to the item alone.
    fn deliver_hover(&mut self, id: ItemId, enter: bool) {
        let mouse = *self.state.mouse();
        let pos = self
            .map_from_scene(id, mouse.scene_pos)
            .unwrap_or(mouse.scene_pos);
        let last = self.map_from_scene(id, mouse.last_scene_pos).unwrap_or(pos);
        let event = mouse.localized(pos, last);
        let mut cx = EventContext::new(id, self.geometry);
        let Some(item) = self.tree.payload_mut(id) else {
            return;
        };
        if enter {
            trace!("enter {id:?}");
            item.mouse_enter(&event, &mut cx);
        } else {
            trace!("leave {id:?}");
            item.mouse_leave(&event, &mut cx);
        }
        if cx.repaint_requested() {
            self.set_dirty(true);
        }
    }

    /// Deliver to `target`, bubbling to ancestors until one consumes the event.
    fn dispatch(&mut self, target: ItemId, action: Action) -> bool {
        let mouse = *self.state.mouse();
        let (Some(pos), Some(last)) = (
            self.map_from_scene(target, mouse.scene_pos),
            self.map_from_scene(target, mouse.last_scene_pos),
        ) else {
            trace!("{action:?} dropped: {target:?} has no invertible mapping");
            return false;
        };
        let chain = Router::new(TreeHierarchy(&self.tree)).bubble(target, pos, last);

        let geometry = self.geometry;
        let tree = &mut self.tree;
        let mut repaint = false;
        let consumed_by = dispatcher::run(&chain, |d| {
            let Some(item) = tree.payload_mut(d.node) else {
                return Outcome::Continue;
            };
            let event = mouse.localized(d.pos, d.last_pos);
            let mut cx = EventContext::new(d.node, geometry);
            let consumed = match action {
                Action::Move => item.mouse_move(&event, &mut cx),
                Action::Press => item.button_press(&event, &mut cx),
                Action::Release => item.button_release(&event, &mut cx),
                Action::DoubleClick => item.double_click(&event, &mut cx),
                Action::Wheel(delta) => item.wheel(&event, delta, &mut cx),
            };
            repaint |= cx.repaint_requested();
            Outcome::from(consumed)
        });
        match consumed_by {
            Some(d) => trace!("{action:?} consumed by {:?} ({:?})", d.node, d.phase),
            None => trace!("{action:?} on {target:?} not consumed"),
        }
        if repaint {
            self.set_dirty(true);
        }
        consumed_by.is_some()
    }
}

fn paint_subtree<D: Painter>(
    tree: &mut ItemTree<BoxedItem>,
    device: &mut D,
    id: ItemId,
    parent_opacity: f32,
    pass: &mut PaintPass,
) {
    let Some(local) = tree.local(id) else {
        return;
    };
    if !local.is_visible() || (pass.id_pass && !local.is_pickable()) {
        return;
    }
    let opacity = parent_opacity * local.opacity;
    let transform = local.transform;
    if let Some(tf) = transform {
        device.push_transform(tf.as_affine());
    }
    if let Some(item) = tree.payload_mut(id) {
        let mut cx = PaintContext::new(id, opacity, pass.geometry, pass.id_pass);
        pass.painted |= item.paint(device, &mut cx);
        pass.repaint |= cx.repaint_requested();
    }
    let children: SmallVec<[ItemId; 16]> = tree.children(id).iter().copied().collect();
    for child in children {
        paint_subtree(tree, device, child, opacity, pass);
    }
    if transform.is_some() {
        device.pop_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::{DrawOp, SoftwareDevice};
    use kurbo::Rect;
    use peniko::Color;

    struct Block {
        rect: Rect,
        animate: bool,
    }

    impl Block {
        fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
            Self {
                rect: Rect::new(x0, y0, x1, y1),
                animate: false,
            }
        }
    }

    impl Item for Block {
        fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
            painter.fill_rect(self.rect, cx.apply_opacity(Color::from_rgb8(10, 20, 30)));
            if self.animate {
                cx.request_repaint();
            }
            true
        }

        fn bounds(&self) -> Option<Rect> {
            Some(self.rect)
        }
    }

    fn scene() -> Scene<SoftwareDevice> {
        let mut scene = Scene::new(SoftwareDevice::new());
        scene.set_geometry(100, 100);
        scene
    }

    #[test]
    fn dirty_lifecycle() {
        let mut scene = scene();
        assert!(scene.is_dirty());
        let a = scene.add_item(Block::new(0.0, 0.0, 10.0, 10.0));
        assert!(scene.paint());
        assert!(!scene.is_dirty());

        assert!(scene.set_item_transform(a, Some(Transform2D::translate(1.0, 0.0))));
        assert!(scene.is_dirty());
        scene.paint();
        assert!(!scene.is_dirty());

        assert!(!scene.set_item_transform(a, Some(Transform2D::translate(1.0, 0.0))));
        assert!(!scene.is_dirty(), "no-op mutation keeps the scene clean");

        scene.update_item::<Block, _>(a, |b| b.animate = true).unwrap();
        scene.paint();
        assert!(scene.is_dirty(), "animating item keeps the scene dirty");
    }

    #[test]
    fn invalid_geometry_paints_and_picks_nothing() {
        let mut scene = Scene::new(SoftwareDevice::new());
        scene.add_item(Block::new(0.0, 0.0, 10.0, 10.0));
        assert!(!scene.paint());
        assert!(scene.is_dirty());
        assert_eq!(scene.picked_item_index(ScreenPos::new(1, 1)), -1);
        assert_eq!(scene.pick(ScreenPos::new(1, 1)), None);

        scene.set_geometry(100, 100);
        scene.set_transform(Some(Transform2D::scale(0.0, 1.0)));
        assert!(!scene.paint(), "zero scale paints nothing");
        assert!(scene.is_dirty(), "skipped paint leaves the scene dirty");
        assert!(scene.device().ops().is_empty(), "no draw calls were issued");
        assert_eq!(scene.picked_item_index(ScreenPos::new(1, 1)), -1);
        assert_eq!(scene.pick(ScreenPos::new(1, 1)), None);

        scene.set_transform(None);
        assert!(scene.paint());
        assert!(!scene.is_dirty());
    }

    #[test]
    fn paint_order_transforms_and_opacity() {
        let mut scene = scene();
        scene.set_transform(Some(Transform2D::scale(2.0, 2.0)));
        let a = scene.add_item(Block::new(0.0, 0.0, 10.0, 10.0));
        scene
            .add_item_with(
                Some(a),
                LocalItem::with_transform(Transform2D::translate(5.0, 5.0)),
                Block::new(0.0, 0.0, 1.0, 1.0),
            )
            .unwrap();
        scene.set_item_opacity(a, 0.5);
        let hidden = scene.add_item(Block::new(0.0, 0.0, 3.0, 3.0));
        scene.set_item_visible(hidden, false);
        scene.paint();

        let fills: Vec<_> = scene
            .device()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect {
                    rect,
                    color,
                    transform,
                } => Some((*rect, color.components[3], *transform)),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 2, "hidden item is not painted");
        assert_eq!(fills[0].0, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(fills[0].1, 0.5);
        assert_eq!(
            fills[1].2,
            (Transform2D::scale(2.0, 2.0) * Transform2D::translate(5.0, 5.0)).as_affine()
        );
        assert_eq!(fills[1].1, 0.5, "opacity is inherited");
        assert_eq!(scene.device().stack_depth(), 0);
    }

    #[test]
    fn scene_transform_round_trip() {
        let mut scene = scene();
        scene.set_transform(Some(
            Transform2D::translate(3.0, -2.0) * Transform2D::scale(2.0, 0.5),
        ));
        let a = scene.add_item_with(
            None,
            LocalItem::with_transform(Transform2D::translate(7.0, 1.0)),
            Block::new(0.0, 0.0, 1.0, 1.0),
        );
        let a = a.unwrap();
        let p = Point::new(12.5, -4.25);
        let back = scene.map_to_parent(scene.map_from_parent(p).unwrap());
        assert!(back.distance(p) < 1e-9);
        let back = scene
            .map_to_scene(a, scene.map_from_scene(a, p).unwrap())
            .unwrap();
        assert!(back.distance(p) < 1e-9);
    }

    #[test]
    fn degenerate_scene_transform_picks_nothing() {
        let mut scene = scene();
        scene.add_item(Block::new(0.0, 0.0, 100.0, 100.0));
        scene.set_transform(Some(Transform2D::scale(0.0, 1.0)));
        assert_eq!(scene.pick(ScreenPos::new(5, 5)), None);
        assert!(!scene.button_press(MouseButton::Left, ScreenPos::new(5, 5)));
    }

    #[test]
    fn update_item_errors() {
        let mut scene = scene();
        let a = scene.add_item(Block::new(0.0, 0.0, 1.0, 1.0));
        struct Other;
        impl Item for Other {
            fn paint(&mut self, _: &mut dyn Painter, _: &mut PaintContext) -> bool {
                false
            }
        }
        let err = scene.update_item::<Other, _>(a, |_| ()).unwrap_err();
        assert!(matches!(err, SceneError::WrongType { item, .. } if item == a));
        scene.remove_item(a);
        let err = scene.update_item::<Block, _>(a, |_| ()).unwrap_err();
        assert_eq!(
            err,
            SceneError::Tree(TreeError::StaleItem(a))
        );
    }

    #[test]
    fn id_pass_skips_non_interactive_items() {
        let mut scene = scene();
        let bottom = scene.add_item(Block::new(0.0, 0.0, 50.0, 50.0));
        let top = scene.add_item(Block::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(scene.picked_item_index(ScreenPos::new(10, 10)), 1);
        scene.set_item_interactive(top, false);
        assert_eq!(scene.picked_item_index(ScreenPos::new(10, 10)), 0);
        assert_eq!(scene.pick(ScreenPos::new(10, 10)), Some(bottom));
        assert_eq!(scene.picked_item_index(ScreenPos::new(60, 60)), -1);
        assert_eq!(scene.picked_item_index(ScreenPos::new(-1, 10)), -1);
        assert_eq!(scene.picked_item_index(ScreenPos::new(100, 10)), -1);
    }

    #[test]
    fn restacking_changes_pick_order() {
        let mut scene = scene();
        let a = scene.add_item(Block::new(0.0, 0.0, 50.0, 50.0));
        let b = scene.add_item(Block::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(scene.pick(ScreenPos::new(1, 1)), Some(b));
        assert_eq!(scene.raise_item(a), Ok(1));
        assert!(scene.is_dirty());
        assert_eq!(scene.pick(ScreenPos::new(1, 1)), Some(a));
        assert_eq!(scene.stack_under(a, b), Ok(0));
        assert_eq!(scene.pick(ScreenPos::new(1, 1)), Some(b));
    }
}
