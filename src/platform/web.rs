//! Browser backends: LocalStorage and Canvas 2D

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Storage};

use crate::persistence::KeyValueStore;
use crate::render::{DrawCommand, Paint, Renderer, Stroke, to_css};
use crate::sim::Aabb;

/// `window.localStorage`, silently absent in private modes that forbid it
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - high score will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {} to LocalStorage", key);
            }
        }
    }
}

/// Replays draw commands onto a `<canvas>` 2D context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the play field
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&to_css(*color)),
            Paint::Linear(gradient) => {
                let g = self.ctx.create_linear_gradient(
                    gradient.from.x as f64,
                    gradient.from.y as f64,
                    gradient.to.x as f64,
                    gradient.to.y as f64,
                );
                for (offset, color) in &gradient.stops {
                    let _ = g.add_color_stop(*offset, &to_css(*color));
                }
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
        }
    }

    fn set_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&to_css(stroke.color));
        self.ctx.set_line_width(stroke.width as f64);
    }

    fn rounded_rect_path(&self, rect: &Aabb, radius: f32) {
        let (x, y) = (rect.min.x as f64, rect.min.y as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        let _ = self.ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = self.ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = self.ctx.arc_to(x, y + h, x, y, r);
        let _ = self.ctx.arc_to(x, y, x + w, y, r);
        self.ctx.close_path();
    }

    fn draw(&self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::FillRect { rect, paint } => {
                self.set_fill(paint);
                ctx.fill_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCommand::StrokeRect { rect, stroke } => {
                self.set_stroke(stroke);
                ctx.stroke_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCommand::FillRoundedRect { rect, radius, paint } => {
                self.rounded_rect_path(rect, *radius);
                self.set_fill(paint);
                ctx.fill();
            }
            DrawCommand::Line { from, to, stroke } => {
                self.set_stroke(stroke);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Polygon { points, fill, outline } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.set_fill_style_str(&to_css(*fill));
                ctx.fill();
                if let Some(stroke) = outline {
                    self.set_stroke(stroke);
                    ctx.stroke();
                }
            }
            DrawCommand::Circle { center, radius, color } => {
                ctx.set_fill_style_str(&to_css(*color));
                ctx.begin_path();
                let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                ctx.fill();
            }
            DrawCommand::Ellipse { center, radii, color } => {
                ctx.set_fill_style_str(&to_css(*color));
                ctx.begin_path();
                let _ = ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    0.0,
                    0.0,
                    TAU,
                );
                ctx.fill();
            }
            DrawCommand::Text { text, pos, font_px, fill, outline } => {
                ctx.set_font(&format!("bold {}px Arial", font_px));
                if let Some(stroke) = outline {
                    self.set_stroke(stroke);
                    let _ = ctx.stroke_text(text, pos.x as f64, pos.y as f64);
                }
                ctx.set_fill_style_str(&to_css(*fill));
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
            DrawCommand::PushTransform { translate, rotate } => {
                ctx.save();
                let _ = ctx.translate(translate.x as f64, translate.y as f64);
                if *rotate != 0.0 {
                    let _ = ctx.rotate(*rotate as f64);
                }
            }
            DrawCommand::PopTransform => ctx.restore(),
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}
