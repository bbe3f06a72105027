//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (elapsed milliseconds are passed in)
//! - Stable iteration order (walls, indestructible bricks, bricks, platform)
//! - No rendering, audio or file I/O

pub mod collision;
pub mod geometry;
pub mod level;
pub mod objects;
pub mod state;
pub mod tick;

pub use collision::{HitObject, Surface, Target, WallSide, resolve_collisions};
pub use geometry::{Angle, Point, Quadrant};
pub use level::{
    DifficultyParameters, Level, LevelDescription, ParseError, ParseErrorKind,
    all_bricks_are_destroyed, parse_level,
};
pub use objects::{Ball, Brick, IndestructibleBrick, Platform, Rect, Wall};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{TickInput, tick};
