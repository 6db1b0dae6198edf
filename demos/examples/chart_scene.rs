// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small chart built on `plotscene`, driven by a scripted input sequence.
//!
//! The scene holds a pannable, zoomable plot area, a line series inside
//! it, a decorative axis that never takes input, and a legend whose entries toggle on click.
//! The script replays hover, drag, wheel, double click, and key input, and the log shows which
//! item each event reached.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p plotscene_demos --example chart_scene`
//! - `RUST_LOG=trace` additionally shows the bubbling chain of every dispatch.

use kurbo::{BezPath, ParamCurveNearest, Point, Rect, Shape, Vec2};
use log::info;
use peniko::Color;
use plotscene::{
    DrawOp, EventContext, Item, Key, KeyEvent, LocalItem, MouseButton, MouseEvent, PaintContext,
    Painter, Scene, ScreenPos, SoftwareDevice, Transform2D,
};

/// Background of the plot; drag pans, wheel zooms, double click or `r` resets.
struct PlotArea {
    size: Rect,
    pan: Vec2,
    zoom: f64,
    dragging: bool,
}

impl PlotArea {
    fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rect::new(0.0, 0.0, width, height),
            pan: Vec2::ZERO,
            zoom: 1.0,
            dragging: false,
        }
    }

    fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

impl Item for PlotArea {
    fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
        painter.fill_rect(self.size, cx.apply_opacity(Color::from_rgb8(245, 245, 240)));
        true
    }

    fn bounds(&self) -> Option<Rect> {
        Some(self.size)
    }

    fn mouse_enter(&mut self, _: &MouseEvent, _: &mut EventContext) -> bool {
        info!("plot area: enter");
        true
    }

    fn mouse_leave(&mut self, _: &MouseEvent, _: &mut EventContext) -> bool {
        info!("plot area: leave");
        true
    }

    fn button_press(&mut self, event: &MouseEvent, _: &mut EventContext) -> bool {
        self.dragging = event.button == MouseButton::Left;
        self.dragging
    }

    fn mouse_move(&mut self, event: &MouseEvent, cx: &mut EventContext) -> bool {
        if !self.dragging {
            return false;
        }
        self.pan += event.delta();
        info!("plot area: pan now ({:.1}, {:.1})", self.pan.x, self.pan.y);
        cx.request_repaint();
        true
    }

    fn button_release(&mut self, _: &MouseEvent, _: &mut EventContext) -> bool {
        let was_dragging = self.dragging;
        self.dragging = false;
        was_dragging
    }

    fn double_click(&mut self, _: &MouseEvent, cx: &mut EventContext) -> bool {
        info!("plot area: view reset");
        self.reset();
        cx.request_repaint();
        true
    }

    fn wheel(&mut self, event: &MouseEvent, delta: f64, cx: &mut EventContext) -> bool {
        self.zoom = (self.zoom * 1.1_f64.powf(delta)).clamp(0.1, 10.0);
        info!(
            "plot area: zoom {:.2} around ({:.0}, {:.0})",
            self.zoom, event.pos.x, event.pos.y
        );
        cx.request_repaint();
        true
    }

    fn key_press(&mut self, event: &KeyEvent, cx: &mut EventContext) -> bool {
        if event.key != Key::Character('r') {
            return false;
        }
        info!("plot area: view reset from keyboard");
        self.reset();
        cx.request_repaint();
        true
    }
}

/// A polyline that is hit within a few units of its stroke.
struct Series {
    name: &'static str,
    path: BezPath,
    color: Color,
    width: f64,
}

impl Series {
    fn new(name: &'static str, points: &[(f64, f64)], color: Color) -> Self {
        let mut path = BezPath::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                path.move_to((x, y));
            } else {
                path.line_to((x, y));
            }
        }
        Self {
            name,
            path,
            color,
            width: 2.0,
        }
    }
}

impl Item for Series {
    fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
        painter.stroke_path(&self.path, self.width, cx.apply_opacity(self.color));
        true
    }

    fn bounds(&self) -> Option<Rect> {
        Some(self.path.bounding_box().inflate(self.width, self.width))
    }

    fn hit_test(&self, event: &MouseEvent) -> bool {
        let reach = self.width / 2.0 + 3.0;
        self.path
            .segments()
            .any(|seg| seg.nearest(event.pos, 1e-6).distance_sq <= reach * reach)
    }

    fn mouse_enter(&mut self, _: &MouseEvent, cx: &mut EventContext) -> bool {
        info!("series {}: highlighted", self.name);
        self.width = 4.0;
        cx.request_repaint();
        true
    }

    fn mouse_leave(&mut self, _: &MouseEvent, cx: &mut EventContext) -> bool {
        info!("series {}: unhighlighted", self.name);
        self.width = 2.0;
        cx.request_repaint();
        true
    }

    fn mouse_move(&mut self, event: &MouseEvent, _: &mut EventContext) -> bool {
        info!(
            "series {}: tooltip at ({:.1}, {:.1})",
            self.name, event.pos.x, event.pos.y
        );
        // Let the plot area keep panning underneath.
        false
    }
}

/// Axis line with ticks. Purely decorative.
struct Axis {
    length: f64,
    ticks: u32,
}

impl Item for Axis {
    fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((self.length, 0.0));
        let step = self.length / f64::from(self.ticks.max(1));
        for i in 0..=self.ticks {
            let x = step * f64::from(i);
            path.move_to((x, 0.0));
            path.line_to((x, 5.0));
        }
        painter.stroke_path(&path, 1.0, cx.apply_opacity(Color::from_rgb8(60, 60, 60)));
        true
    }

    fn bounds(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, self.length, 5.0))
    }
}

/// Legend box. Children are its entries.
struct Legend;

impl Item for Legend {
    fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
        let frame = Rect::new(0.0, 0.0, 90.0, 50.0);
        painter.fill_rect(frame, cx.apply_opacity(Color::from_rgb8(255, 255, 255)));
        true
    }

    fn bounds(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 90.0, 50.0))
    }
}

/// One legend row. Clicking toggles it on and off.
struct LegendEntry {
    label: &'static str,
    color: Color,
    enabled: bool,
}

impl Item for LegendEntry {
    fn paint(&mut self, painter: &mut dyn Painter, cx: &mut PaintContext) -> bool {
        let swatch = Rect::new(0.0, 0.0, 12.0, 12.0);
        let color = if self.enabled {
            self.color
        } else {
            self.color.multiply_alpha(0.3)
        };
        painter.fill_rect(swatch, cx.apply_opacity(color));
        true
    }

    fn bounds(&self) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 80.0, 14.0))
    }

    fn button_press(&mut self, _: &MouseEvent, cx: &mut EventContext) -> bool {
        self.enabled = !self.enabled;
        info!("legend {}: enabled = {}", self.label, self.enabled);
        cx.request_repaint();
        true
    }
}

/// Scripted platform input.
#[derive(Clone, Copy, Debug)]
enum Input {
    Move(i32, i32),
    Press(i32, i32, u64),
    Release(i32, i32),
    Wheel(i32, i32, f64),
    Key(char),
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new(SoftwareDevice::new());
    scene.set_geometry(400, 300);

    let blue = Color::from_rgb8(40, 90, 200);
    let orange = Color::from_rgb8(230, 120, 30);

    let plot = scene.add_item(PlotArea::new(300.0, 200.0));
    scene.set_item_transform(plot, Some(Transform2D::translate(40.0, 20.0)));

    let rising = scene
        .add_child(
            plot,
            Series::new(
                "rising",
                &[(0.0, 180.0), (80.0, 120.0), (160.0, 90.0), (300.0, 20.0)],
                blue,
            ),
        )
        .expect("plot area is alive");
    let falling = scene
        .add_child(
            plot,
            Series::new("falling", &[(0.0, 30.0), (150.0, 100.0), (300.0, 170.0)], orange),
        )
        .expect("plot area is alive");

    let axis = scene
        .add_item_with(
            None,
            LocalItem::with_transform(Transform2D::translate(40.0, 225.0)),
            Axis {
                length: 300.0,
                ticks: 6,
            },
        )
        .expect("top-level insert");
    scene.set_item_interactive(axis, false);

    let legend = scene
        .add_item_with(
            None,
            LocalItem::with_transform(Transform2D::translate(300.0, 30.0)),
            Legend,
        )
        .expect("top-level insert");
    scene.set_item_opacity(legend, 0.9);
    for (row, (label, color)) in [("rising", blue), ("falling", orange)].into_iter().enumerate() {
        let y = 6.0 + 20.0 * row as f64;
        scene
            .add_item_with(
                Some(legend),
                LocalItem::with_transform(Transform2D::translate(6.0, y)),
                LegendEntry {
                    label,
                    color,
                    enabled: true,
                },
            )
            .expect("legend is alive");
    }

    scene.paint();
    info!("initial paint: {} draw ops", scene.device().ops().len());

    let script = [
        Input::Move(5, 5),
        Input::Move(100, 150),
        Input::Move(120, 140),
        Input::Press(120, 140, 0),
        Input::Move(130, 150),
        Input::Move(150, 160),
        Input::Release(150, 160),
        Input::Wheel(200, 100, 2.0),
        Input::Move(150, 250),
        Input::Move(320, 40),
        Input::Press(320, 40, 1_000),
        Input::Release(320, 40),
        Input::Move(200, 100),
        Input::Press(200, 100, 2_000),
        Input::Release(200, 100),
        Input::Press(201, 101, 2_200),
        Input::Release(201, 101),
        Input::Key('r'),
    ];

    for input in script {
        let consumed = match input {
            Input::Move(x, y) => scene.mouse_move(ScreenPos::new(x, y)),
            Input::Press(x, y, t) => {
                scene.button_press_at(MouseButton::Left, ScreenPos::new(x, y), t)
            }
            Input::Release(x, y) => scene.button_release(MouseButton::Left, ScreenPos::new(x, y)),
            Input::Wheel(x, y, delta) => scene.wheel(delta, ScreenPos::new(x, y)),
            Input::Key(c) => scene.key_press(KeyEvent::character(c)),
        };
        info!(
            "{input:?}: consumed = {consumed}, hovered = {:?}, captured = {:?}",
            scene.hovered_item(),
            scene.captured_item()
        );
        if scene.is_dirty() {
            scene.device_mut().clear_ops();
            scene.paint();
            let strokes = scene
                .device()
                .ops()
                .iter()
                .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
                .count();
            info!("  repainted: {strokes} strokes");
        }
    }

    for (name, id) in [("rising", rising), ("falling", falling)] {
        let local = scene.map_from_scene(id, Point::new(200.0, 100.0));
        info!("scene (200, 100) in {name} space: {local:?}");
    }
    let pick = scene.pick(ScreenPos::new(45, 226));
    info!("pick over the axis: {pick:?} (the axis is not interactive)");
}
