//! Rendering module
//!
//! The game hands the renderer a read-only level once per frame. The bundled
//! implementation draws into a software framebuffer.

pub mod framebuffer;
pub mod palette;

pub use framebuffer::{Framebuffer, FramebufferRenderer};
pub use palette::Rgba;

use crate::sim::level::Level;

/// Presentation boundary
pub trait Renderer {
    fn render(&mut self, level: &Level);
    fn set_title(&mut self, title: &str);
    fn set_paused(&mut self, paused: bool);
}

/// Window title with the session counters
pub fn make_title(level: usize, lives: u32, score: u64, highscore: u64) -> String {
    format!("Level: {level}     Lives: {lives}     Score: {score}     Highscore: {highscore}")
}
