//! Replays a recorded frame into the terminal.
//!
//! The frame is rasterized onto a pixel grid sized to the play field: one
//! pixel per terminal column horizontally and two per row vertically. Pairs of
//! vertical pixels are packed into one terminal row using the `▀` (upper half
//! block) character with fg=top, bg=bottom colors. Text commands are printed
//! over the pixels as ordinary terminal text.

use crate::surface::{DrawCommand, Rgba};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HALF_TOP: char = '\u{2580}'; // ▀
const EMPTY_BG: Rgba = Rgba::rgb(12, 12, 18);

/// A text label positioned in pixel-grid columns and terminal rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub column: usize,
    pub row: usize,
    pub color: Rgba,
}

/// Pixel buffer holding one rasterized frame.
#[derive(Debug, Clone)]
pub struct Raster {
    columns: usize,
    pixel_rows: usize,
    // Logical surface units per pixel
    scale_x: f64,
    scale_y: f64,
    pixels: Vec<Rgba>,
    labels: Vec<Label>,
}

impl Raster {
    /// Rasterize `commands` from a `surface_width` x `surface_height` surface
    /// into `columns` x `pixel_rows` pixels.
    pub fn new(
        commands: &[DrawCommand],
        surface_width: u32,
        surface_height: u32,
        columns: usize,
        pixel_rows: usize,
    ) -> Self {
        let columns = columns.max(1);
        let pixel_rows = pixel_rows.max(1);
        let mut raster = Self {
            columns,
            pixel_rows,
            scale_x: surface_width as f64 / columns as f64,
            scale_y: surface_height as f64 / pixel_rows as f64,
            pixels: vec![EMPTY_BG; columns * pixel_rows],
            labels: Vec::new(),
        };
        for command in commands {
            raster.draw(command);
        }
        raster
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn pixel_rows(&self) -> usize {
        self.pixel_rows
    }

    pub fn pixel(&self, column: usize, row: usize) -> Rgba {
        self.pixels[row * self.columns + column]
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (left, right) = ordered(*x, x + width);
                let (top, bottom) = ordered(*y, y + height);
                self.fill((left, top, right, bottom), *color, |px, py| {
                    px >= left && px < right && py >= top && py < bottom
                });
            }
            DrawCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                color,
            } => {
                let (left, right) = ordered(*x, x + width);
                let (top, bottom) = ordered(*y, y + height);
                let r = radius.min((right - left) / 2.0).min((bottom - top) / 2.0).max(0.0);
                self.fill((left, top, right, bottom), *color, |px, py| {
                    if px < left || px >= right || py < top || py >= bottom {
                        return false;
                    }
                    // Distance from the nearest corner circle centre
                    let dx = (left + r - px).max(px - (right - r)).max(0.0);
                    let dy = (top + r - py).max(py - (bottom - r)).max(0.0);
                    dx * dx + dy * dy <= r * r
                });
            }
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                color,
            } => {
                let r = radius.abs();
                self.fill((cx - r, cy - r, cx + r, cy + r), *color, |px, py| {
                    let (dx, dy) = (px - cx, py - cy);
                    dx * dx + dy * dy <= r * r
                });
            }
            DrawCommand::Polygon { points, color } => {
                if points.len() < 3 {
                    return;
                }
                let bounds = points.iter().fold(
                    (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                    |(l, t, r, b), &(x, y)| (l.min(x), t.min(y), r.max(x), b.max(y)),
                );
                self.fill(bounds, *color, |px, py| point_in_polygon(points, px, py));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                // Never thinner than one pixel, or thin lines vanish
                let half = (width / 2.0).max(self.scale_x.max(self.scale_y) / 2.0);
                let bounds = (
                    from.0.min(to.0) - half,
                    from.1.min(to.1) - half,
                    from.0.max(to.0) + half,
                    from.1.max(to.1) + half,
                );
                let (from, to) = (*from, *to);
                self.fill(bounds, *color, |px, py| {
                    segment_distance(from, to, (px, py)) <= half
                });
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                // (x, y) is the baseline; put the label on the row holding the
                // middle of the glyphs
                let column = (x / self.scale_x).floor().max(0.0) as usize;
                let pixel_row = ((y - size / 2.0) / self.scale_y).floor().max(0.0) as usize;
                self.labels.push(Label {
                    text: text.clone(),
                    column: column.min(self.columns - 1),
                    row: (pixel_row / 2).min((self.pixel_rows - 1) / 2),
                    color: *color,
                });
            }
        }
    }

    /// Blend `color` into every pixel inside `bounds` whose centre passes
    /// `inside`. Bounds and test are in surface units.
    fn fill(
        &mut self,
        (left, top, right, bottom): (f64, f64, f64, f64),
        color: Rgba,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        if color.a == 0 || !(left < right && top < bottom) {
            return;
        }
        let first_col = ((left / self.scale_x).floor().max(0.0) as usize).min(self.columns);
        let last_col = ((right / self.scale_x).ceil().max(0.0) as usize).min(self.columns);
        let first_row = ((top / self.scale_y).floor().max(0.0) as usize).min(self.pixel_rows);
        let last_row = ((bottom / self.scale_y).ceil().max(0.0) as usize).min(self.pixel_rows);

        for row in first_row..last_row {
            let py = (row as f64 + 0.5) * self.scale_y;
            for col in first_col..last_col {
                let px = (col as f64 + 0.5) * self.scale_x;
                if inside(px, py) {
                    let pixel = &mut self.pixels[row * self.columns + col];
                    *pixel = color.over(*pixel);
                }
            }
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Even-odd rule.
fn point_in_polygon(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn segment_distance(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Play field size in terminal cells for a surface shown in `area`, keeping
/// the surface's aspect ratio (half-blocks make cells square pixels).
pub fn fit_area(area: Rect, surface_width: u32, surface_height: u32) -> Rect {
    if surface_width == 0 || surface_height == 0 || area.width == 0 || area.height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let aspect = surface_width as f64 / surface_height as f64;
    let max_pixel_rows = area.height as f64 * 2.0;
    let mut width = area.width as f64;
    let mut pixel_rows = width / aspect;
    if pixel_rows > max_pixel_rows {
        pixel_rows = max_pixel_rows;
        width = pixel_rows * aspect;
    }
    let width = (width.floor() as u16).clamp(1, area.width);
    let height = ((pixel_rows / 2.0).floor() as u16).clamp(1, area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Rasterize `commands` and draw them centred in `area`.
pub fn render_canvas(
    frame: &mut Frame,
    area: Rect,
    commands: &[DrawCommand],
    surface_width: u32,
    surface_height: u32,
) {
    let field = fit_area(area, surface_width, surface_height);
    if field.width == 0 || field.height == 0 {
        return;
    }

    let raster = Raster::new(
        commands,
        surface_width,
        surface_height,
        field.width as usize,
        field.height as usize * 2,
    );

    for term_row in 0..field.height as usize {
        let mut spans: Vec<Span> = Vec::new();

        // Batch consecutive cells with the same style
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();

        for col in 0..raster.columns() {
            let fg = to_color(raster.pixel(col, term_row * 2));
            let bg = to_color(raster.pixel(col, term_row * 2 + 1));
            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }

        let row_area = Rect::new(field.x, field.y + term_row as u16, field.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }

    for label in raster.labels() {
        let x = field.x + label.column as u16;
        let y = field.y + label.row as u16;
        let width = (field.x + field.width).saturating_sub(x);
        if width == 0 || y >= field.y + field.height {
            continue;
        }
        // Keep the pixel behind the label as its background
        let behind = raster.pixel(label.column, label.row * 2);
        let text = Paragraph::new(Span::styled(
            label.text.as_str(),
            Style::default()
                .fg(to_color(label.color))
                .bg(to_color(behind))
                .add_modifier(Modifier::BOLD),
        ));
        let width = width.min(label.text.chars().count() as u16);
        frame.render_widget(text, Rect::new(x, y, width, 1));
    }
}
