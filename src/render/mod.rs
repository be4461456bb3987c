//! Declarative 2D rendering
//!
//! The simulation never draws. Each frame is translated into an ordered
//! list of [`DrawCommand`]s which any immediate-mode surface can replay.

pub mod scene;

use glam::Vec2;

use crate::sim::Aabb;

/// Linear RGBA, components in 0..=1
pub type Rgba = [f32; 4];

/// Opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Rgba {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// CSS `rgba()` string for canvas style properties
pub fn to_css(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

/// Colors for game elements
pub mod colors {
    use super::{Rgba, rgb};

    pub const SKY_TOP: Rgba = rgb(0x1e1b4b);
    pub const SKY_MID: Rgba = rgb(0x312e81);
    pub const SKY_BOTTOM: Rgba = rgb(0x4c1d95);
    pub const STAR: Rgba = rgb(0xffffff);
    pub const GROUND: Rgba = rgb(0x1f2937);
    pub const GROUND_LINE: Rgba = rgb(0x10b981);
    pub const GROUND_GRID: Rgba = rgb(0x374151);
    pub const SHADOW: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER_TOP: Rgba = rgb(0xf59e0b);
    pub const PLAYER_BOTTOM: Rgba = rgb(0xef4444);
    pub const EYE: Rgba = rgb(0xffffff);
    pub const PUPIL: Rgba = rgb(0x000000);
    pub const BOX_TOP: Rgba = rgb(0x8b5cf6);
    pub const BOX_BOTTOM: Rgba = rgb(0x6366f1);
    pub const BOX_OUTLINE: Rgba = rgb(0xa78bfa);
    pub const SPIKE: Rgba = rgb(0xdc2626);
    pub const SPIKE_OUTLINE: Rgba = rgb(0x991b1b);
    pub const TALL_TOP: Rgba = rgb(0x14b8a6);
    pub const TALL_BOTTOM: Rgba = rgb(0x0d9488);
    pub const TALL_OUTLINE: Rgba = rgb(0x2dd4bf);
    pub const EMERALD: Rgba = rgb(0x10b981);
    pub const AMBER: Rgba = rgb(0xf59e0b);
    pub const RED: Rgba = rgb(0xef4444);
    pub const PINK: Rgba = rgb(0xec4899);
    pub const VIOLET: Rgba = rgb(0x8b5cf6);
    pub const SCORE_TEXT: Rgba = rgb(0xffffff);
    pub const SCORE_OUTLINE: Rgba = rgb(0x000000);
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// Linear gradient between two points, stops at offsets in 0..=1
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub from: Vec2,
    pub to: Vec2,
    pub stops: Vec<(f32, Rgba)>,
}

/// Fill style
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(Gradient),
}

impl Paint {
    /// Top-to-bottom two-color gradient spanning `rect`
    pub fn vertical(rect: &Aabb, top: Rgba, bottom: Rgba) -> Self {
        Paint::Linear(Gradient {
            from: rect.min,
            to: Vec2::new(rect.min.x, rect.max().y),
            stops: vec![(0.0, top), (1.0, bottom)],
        })
    }
}

/// One drawing primitive, in play-field pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Aabb, paint: Paint },
    StrokeRect { rect: Aabb, stroke: Stroke },
    FillRoundedRect { rect: Aabb, radius: f32, paint: Paint },
    Line { from: Vec2, to: Vec2, stroke: Stroke },
    /// Closed path (triangles, spikes)
    Polygon {
        points: Vec<Vec2>,
        fill: Rgba,
        outline: Option<Stroke>,
    },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Ellipse { center: Vec2, radii: Vec2, color: Rgba },
    Text {
        text: String,
        pos: Vec2,
        font_px: f32,
        fill: Rgba,
        outline: Option<Stroke>,
    },
    /// Translate then rotate every command until the matching pop
    PushTransform { translate: Vec2, rotate: f32 },
    PopTransform,
}

/// A drawing surface that replays one frame of commands
pub trait Renderer {
    fn render(&mut self, commands: &[DrawCommand]);
}

/// Renderer that keeps the most recent frame (headless runs and tests)
#[derive(Debug, Default)]
pub struct CommandLog {
    pub frames: u64,
    pub last: Vec<DrawCommand>,
}

impl Renderer for CommandLog {
    fn render(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.last.clear();
        self.last.extend_from_slice(commands);
    }
}
