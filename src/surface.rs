//! Drawing surface adapter.
//!
//! Engines draw through [`Context2d`], a small immediate-mode 2D API modelled on
//! a canvas context (rectangles, arcs, paths, text). The host owns the
//! [`Surface`] and lends it to one engine at a time through a [`SharedSurface`]
//! handle. [`RecordingSurface`] captures each frame as a list of
//! [`DrawCommand`]s, which the terminal host replays and tests inspect.

use std::cell::RefCell;
use std::rc::Rc;

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composite this colour over an opaque background.
    pub fn over(self, background: Rgba) -> Rgba {
        let alpha = self.a as u16;
        let mix = |fg: u8, bg: u8| ((fg as u16 * alpha + bg as u16 * (255 - alpha)) / 255) as u8;
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// Immediate-mode 2D drawing primitives. Coordinates are logical surface units
/// with the origin in the top-left corner and y growing downward.
pub trait Context2d {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgba,
    );

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);

    /// Fill the closed path through `points`.
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);

    /// Draw `text` with its baseline-left corner at (x, y).
    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Rgba);
}

/// A fixed-size raster surface.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// The 2D context, or `None` when the surface cannot be drawn on.
    fn context_2d(&mut self) -> Option<&mut dyn Context2d>;

    /// Called once after every complete frame.
    fn present(&mut self) {}
}

/// Shared handle the host lends to the running engine.
pub type SharedSurface = Rc<RefCell<dyn Surface>>;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    RoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgba,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgba,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgba,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        color: Rgba,
    },
}

/// A surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    has_context: bool,
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            has_context: true,
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
        }
    }

    /// A surface whose 2D context cannot be obtained.
    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            has_context: false,
            ..Self::new(width, height)
        }
    }

    /// Wrap in the shared handle type engines expect.
    pub fn into_shared(self) -> Rc<RefCell<RecordingSurface>> {
        Rc::new(RefCell::new(self))
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Texts drawn in the last frame, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Context2d for RecordingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.pending.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgba,
    ) {
        self.pending.push(DrawCommand::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.pending.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgba) {
        self.pending.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.pending.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size: f64, color: Rgba) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        if self.has_context {
            Some(self)
        } else {
            None
        }
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}
