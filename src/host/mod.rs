//! Host abstraction layer
//!
//! Handles everything between the simulation and the outside world that is
//! not drawing or sound:
//! - Input sources (scripted, demo autopilot)
//! - Frame pacing

pub mod autopilot;
pub mod clock;
pub mod input;

pub use autopilot::Autopilot;
pub use clock::FramePacer;
pub use input::ScriptedInput;

use crate::sim::level::Level;
use crate::sim::tick::TickInput;

/// Per-frame input poll
///
/// The source may look at the level, the way a player looks at the screen.
pub trait InputSource {
    fn poll(&mut self, level: &Level) -> TickInput;
}
