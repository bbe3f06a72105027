//! Software framebuffer renderer
//!
//! Draws a level as filled rectangles into an RGBA buffer. Grid units are
//! scaled to pixels per axis (`screen / grid`), truncating toward zero.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::Renderer;
use super::palette::{self, Rgba};
use crate::sim::level::Level;
use crate::sim::objects::Rect;

/// Pause overlay strength
const PAUSE_DIM: f64 = 0.5;

/// RGBA pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a pixel rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgba) {
        let x0 = x.clamp(0, i64::from(self.width)) as usize;
        let y0 = y.clamp(0, i64::from(self.height)) as usize;
        let x1 = (x + w).clamp(0, i64::from(self.width)) as usize;
        let y1 = (y + h).clamp(0, i64::from(self.height)) as usize;
        let stride = self.width as usize;
        for row in y0..y1 {
            self.pixels[row * stride + x0..row * stride + x1].fill(color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Apply `f` to every pixel
    pub fn map(&mut self, f: impl Fn(Rgba) -> Rgba) {
        for p in &mut self.pixels {
            *p = f(*p);
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Binary PPM (P6); alpha is dropped
    pub fn write_ppm(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for chunk in self.as_bytes().chunks_exact(4) {
            out.write_all(&chunk[..3])?;
        }
        Ok(())
    }

    pub fn save_ppm(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()
    }
}

/// Renders into an owned [`Framebuffer`] and remembers title and pause state
#[derive(Debug, Clone)]
pub struct FramebufferRenderer {
    framebuffer: Framebuffer,
    title: String,
    paused: bool,
    frames: u64,
}

impl FramebufferRenderer {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            framebuffer: Framebuffer::new(screen_width, screen_height),
            title: String::new(),
            paused: false,
            frames: 0,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for FramebufferRenderer {
    fn render(&mut self, level: &Level) {
        let sx = f64::from(self.framebuffer.width()) / level.grid_width();
        let sy = f64::from(self.framebuffer.height()) / level.grid_height();
        let fb = &mut self.framebuffer;
        let mut draw = |rect: &Rect, color: Rgba| {
            let p = rect.top_left();
            fb.fill_rect(
                (p.x * sx) as i64,
                (p.y * sy) as i64,
                (rect.width() * sx) as i64,
                (rect.height() * sy) as i64,
                color,
            );
        };

        draw_level(level, &mut draw);
        if self.paused {
            self.framebuffer.map(|p| p.darker(PAUSE_DIM));
        }
        self.frames += 1;
    }

    fn set_title(&mut self, title: &str) {
        if self.title != title {
            log::debug!("Title: {title}");
            self.title = title.to_string();
        }
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

fn draw_level(level: &Level, draw: &mut impl FnMut(&Rect, Rgba)) {
    // Background first, the rest in the same order as collisions
    let full = Rect::new(
        crate::sim::geometry::Point::ZERO,
        level.grid_width(),
        level.grid_height(),
    );
    draw(&full, palette::BACKGROUND);
    draw(&level.ball.rect, palette::BALL);
    draw(&level.platform.rect, palette::PLATFORM);
    for wall in level.walls() {
        draw(&wall.rect, palette::WALL);
    }
    for brick in level.bricks.iter().filter(|b| !b.is_destroyed()) {
        draw(&brick.rect, palette::brick_color(brick.hitpoints()));
    }
    for brick in &level.indestructible_bricks {
        draw(&brick.rect, palette::INDESTRUCTIBLE_BRICK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{DifficultyParameters, parse_level};

    fn level() -> Level {
        // 10 x 20 interior, 12 x 21 with walls
        let text = "W 10 H 20\nX 1 Y 2 W 2 H 1 HP 1\nX 5 Y 2 W 2 H 1\n";
        Level::new(&parse_level(text).unwrap(), DifficultyParameters::default())
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(4, 3);
        fb.fill_rect(-2, 1, 10, 1, Rgba::hex(0xFF0000));
        assert_eq!(fb.pixel(0, 1), Some(Rgba::hex(0xFF0000)));
        assert_eq!(fb.pixel(3, 1), Some(Rgba::hex(0xFF0000)));
        assert_eq!(fb.pixel(0, 0), Some(Rgba::default()));
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(fb.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_ppm_header_and_size() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Rgba::hex(0x102030));
        let mut out = Vec::new();
        fb.write_ppm(&mut out).unwrap();
        let header = b"P6\n2 2\n255\n";
        assert!(out.starts_with(header));
        assert_eq!(out.len(), header.len() + 2 * 2 * 3);
        assert_eq!(&out[header.len()..header.len() + 3], &[0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_render_scales_grid_to_pixels() {
        // 10 pixels per grid unit on both axes
        let mut renderer = FramebufferRenderer::new(120, 210);
        let level = level();
        renderer.render(&level);
        let fb = renderer.framebuffer();

        assert_eq!(fb.pixel(5, 100), Some(palette::WALL));
        assert_eq!(fb.pixel(115, 100), Some(palette::WALL));
        assert_eq!(fb.pixel(60, 5), Some(palette::WALL));
        // Brick at (2, 3) after the wall offset
        assert_eq!(fb.pixel(25, 35), Some(palette::brick_color(1)));
        assert_eq!(fb.pixel(65, 35), Some(palette::INDESTRUCTIBLE_BRICK));
        assert_eq!(fb.pixel(60, 100), Some(palette::BACKGROUND));
        // Platform: x 4..8, y 20..20.5
        assert_eq!(fb.pixel(50, 202), Some(palette::PLATFORM));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut renderer = FramebufferRenderer::new(120, 210);
        let mut level = level();
        level.bricks[0].decrease_hitpoints();
        renderer.render(&level);
        assert_eq!(renderer.framebuffer().pixel(25, 35), Some(palette::BACKGROUND));
    }

    #[test]
    fn test_pause_dims_frame() {
        let mut renderer = FramebufferRenderer::new(120, 210);
        renderer.set_paused(true);
        renderer.render(&level());
        assert!(renderer.is_paused());
        assert_eq!(
            renderer.framebuffer().pixel(60, 100),
            Some(palette::BACKGROUND.darker(PAUSE_DIM))
        );
    }
}
