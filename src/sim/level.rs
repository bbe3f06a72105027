//! Levels: the text format, the playfield, and difficulty scaling
//!
//! Level text is line oriented:
//!
//! ```text
//! W 10 H 20
//! # comment
//! X 1.2 Y 3.4 W 5.6 H 7.8 HP 9
//! X 9.8 Y 7.6 W 5.4 H 3.2
//! ```
//!
//! The first line declares the grid. Every other non-comment line is a brick;
//! a valid `HP` pair makes it destructible, otherwise it is indestructible.
//! Coordinates in the file are relative to the playfield interior. Building a
//! [`Level`] shifts them past the walls and grows the grid to include the walls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::{Angle, Point};
use super::objects::{Ball, Brick, IndestructibleBrick, Platform, Rect, Wall};
use crate::consts::*;

/// Difficulty step applied after every full clear
pub const PLATFORM_VELOCITY_STEP: f64 = 2.0;
pub const PLATFORM_WIDTH_STEP: f64 = 0.5;
pub const BALL_VELOCITY_STEP: f64 = 2.0;
pub const BALL_GRAVITY_STEP: f64 = 0.5;

/// Difficulty caps
pub const PLATFORM_VELOCITY_MAX: f64 = 28.0;
pub const PLATFORM_WIDTH_MIN: f64 = 2.0;
pub const BALL_VELOCITY_MAX: f64 = 30.0;
pub const BALL_GRAVITY_MAX: f64 = 5.0;

/// The four tunables that escalate after each full clear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyParameters {
    pub platform_velocity: f64,
    pub platform_width: f64,
    pub ball_velocity: f64,
    pub ball_gravity: f64,
}

impl Default for DifficultyParameters {
    fn default() -> Self {
        Self {
            platform_velocity: 20.0,
            platform_width: 4.0,
            ball_velocity: 15.0,
            ball_gravity: 0.0,
        }
    }
}

impl DifficultyParameters {
    /// One step harder, clamped to the caps
    ///
    /// A parameter never moves back past its current value, even when it
    /// already sits beyond its cap.
    pub fn increased(&self) -> Self {
        Self {
            platform_velocity: step_up(
                self.platform_velocity,
                PLATFORM_VELOCITY_STEP,
                PLATFORM_VELOCITY_MAX,
            ),
            platform_width: step_down(self.platform_width, PLATFORM_WIDTH_STEP, PLATFORM_WIDTH_MIN),
            ball_velocity: step_up(self.ball_velocity, BALL_VELOCITY_STEP, BALL_VELOCITY_MAX),
            ball_gravity: step_up(self.ball_gravity, BALL_GRAVITY_STEP, BALL_GRAVITY_MAX),
        }
    }

    /// Positive finite sizes and speeds, non-negative finite gravity
    pub fn is_playable(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.platform_velocity)
            && positive(self.platform_width)
            && positive(self.ball_velocity)
            && self.ball_gravity.is_finite()
            && self.ball_gravity >= 0.0
    }
}

fn step_up(value: f64, step: f64, max: f64) -> f64 {
    (value + step).min(max.max(value))
}

fn step_down(value: f64, step: f64, min: f64) -> f64 {
    (value - step).max(min.min(value))
}

/// Why a level text was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// The text has no header line
    MissingHeader,
    /// The header is not `W <int> H <int>` with positive values
    MalformedHeader,
    /// An expected tag was missing or wrong
    UnexpectedToken { expected: &'static str, found: String },
    /// A value did not parse as a finite number
    InvalidNumber { tag: &'static str, value: String },
    /// A coordinate lies outside the declared grid
    OutOfBounds { x: f64, y: f64 },
    /// A width or height is not positive
    NonPositiveSize { width: f64, height: f64 },
    /// An `HP` count above the strongest brick
    HitpointsOutOfRange { value: String },
}

/// A level text error with the 1-based line it occurred on
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "missing `W <int> H <int>` header"),
            Self::MalformedHeader => {
                write!(f, "malformed header: expected `W <int> H <int>` with positive values")
            }
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected `{expected}`, found `{found}`")
            }
            Self::InvalidNumber { tag, value } => write!(f, "invalid value for `{tag}`: `{value}`"),
            Self::OutOfBounds { x, y } => write!(f, "position ({x}, {y}) lies outside the grid"),
            Self::NonPositiveSize { width, height } => {
                write!(f, "size {width} x {height} must be positive")
            }
            Self::HitpointsOutOfRange { value } => {
                write!(f, "hitpoints `{value}` exceed the maximum of {MAX_HITPOINTS}")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// A brick as written in the level text (interior coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickDescription {
    pub top_left: Point,
    pub width: f64,
    pub height: f64,
    /// `None` for an indestructible brick
    pub hitpoints: Option<u32>,
}

/// Parsed level text, before walls are added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub grid_width: u32,
    pub grid_height: u32,
    pub bricks: Vec<BrickDescription>,
    pub indestructible_bricks: Vec<BrickDescription>,
}

impl FromStr for LevelDescription {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_level(s)
    }
}

/// Parse a whole level text; any bad line rejects the level
pub fn parse_level(text: &str) -> Result<LevelDescription, ParseError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (header_line, header) = lines
        .next()
        .ok_or(ParseError::new(1, ParseErrorKind::MissingHeader))?;
    let (grid_width, grid_height) = parse_header(header)
        .ok_or(ParseError::new(header_line, ParseErrorKind::MalformedHeader))?;

    let mut description = LevelDescription {
        grid_width,
        grid_height,
        bricks: Vec::new(),
        indestructible_bricks: Vec::new(),
    };

    for (line_no, line) in lines {
        if is_comment(line) {
            continue;
        }
        let brick = parse_brick(line, grid_width, grid_height)
            .map_err(|kind| ParseError::new(line_no, kind))?;
        if brick.hitpoints.is_some() {
            description.bricks.push(brick);
        } else {
            description.indestructible_bricks.push(brick);
        }
    }

    Ok(description)
}

/// Comments start with `#`; blank lines are skipped the same way
fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn parse_header(line: &str) -> Option<(u32, u32)> {
    let mut tokens = line.split_whitespace();
    let width = tagged(&mut tokens, "W")?.parse::<u32>().ok()?;
    let height = tagged(&mut tokens, "H")?.parse::<u32>().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

fn tagged<'a>(tokens: &mut impl Iterator<Item = &'a str>, tag: &str) -> Option<&'a str> {
    match tokens.next() {
        Some(t) if t == tag => tokens.next(),
        _ => None,
    }
}

fn parse_brick(
    line: &str,
    grid_width: u32,
    grid_height: u32,
) -> Result<BrickDescription, ParseErrorKind> {
    let mut tokens = line.split_whitespace();

    let x = number(&mut tokens, "X")?;
    let y = number(&mut tokens, "Y")?;
    if x < 0.0 || y < 0.0 || x > f64::from(grid_width) || y > f64::from(grid_height) {
        return Err(ParseErrorKind::OutOfBounds { x, y });
    }

    let width = number(&mut tokens, "W")?;
    let height = number(&mut tokens, "H")?;
    if width <= 0.0 || height <= 0.0 {
        return Err(ParseErrorKind::NonPositiveSize { width, height });
    }

    Ok(BrickDescription {
        top_left: Point::new(x, y),
        width,
        height,
        hitpoints: hitpoints(&mut tokens)?,
    })
}

fn number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    tag: &'static str,
) -> Result<f64, ParseErrorKind> {
    match tokens.next() {
        Some(t) if t == tag => {}
        found => {
            return Err(ParseErrorKind::UnexpectedToken {
                expected: tag,
                found: found.unwrap_or("end of line").to_string(),
            });
        }
    }
    let value = tokens.next().unwrap_or("");
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseErrorKind::InvalidNumber {
            tag,
            value: value.to_string(),
        })
}

/// `HP <n>` with n in 1..=MAX_HITPOINTS
///
/// A missing pair, a value that is not an unsigned integer, or 0 means
/// indestructible. Counts above the maximum reject the line.
fn hitpoints<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<Option<u32>, ParseErrorKind> {
    let Some(value) = tagged(tokens, "HP") else {
        return Ok(None);
    };
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    match value.parse::<u32>() {
        Ok(0) => Ok(None),
        Ok(hp) if hp <= MAX_HITPOINTS => Ok(Some(hp)),
        _ => Err(ParseErrorKind::HitpointsOutOfRange {
            value: value.to_string(),
        }),
    }
}

/// A playable level: walls, platform, ball and bricks
#[derive(Debug, Clone)]
pub struct Level {
    grid_width: f64,
    grid_height: f64,
    pub(crate) left_wall: Wall,
    pub(crate) right_wall: Wall,
    pub(crate) top_wall: Wall,
    pub platform: Platform,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub indestructible_bricks: Vec<IndestructibleBrick>,
    difficulty: DifficultyParameters,
}

impl Level {
    pub fn new(description: &LevelDescription, difficulty: DifficultyParameters) -> Self {
        let width = f64::from(description.grid_width);
        let height = f64::from(description.grid_height);
        assert!(width > 0.0 && height > 0.0, "level grid must be positive");

        let grid_width = width + 2.0 * WALL_THICKNESS;
        let grid_height = height + WALL_THICKNESS;

        let bricks = description
            .bricks
            .iter()
            .filter_map(|b| b.hitpoints.map(|hp| Brick::new(interior_rect(b), hp)))
            .collect();
        let indestructible_bricks = description
            .indestructible_bricks
            .iter()
            .map(|b| IndestructibleBrick::new(interior_rect(b)))
            .collect();

        Self {
            grid_width,
            grid_height,
            left_wall: Wall::new(Rect::new(
                Point::ZERO,
                WALL_THICKNESS,
                height + WALL_THICKNESS,
            )),
            right_wall: Wall::new(Rect::new(
                Point::new(width + WALL_THICKNESS, 0.0),
                WALL_THICKNESS,
                height + WALL_THICKNESS,
            )),
            top_wall: Wall::new(Rect::new(
                Point::new(WALL_THICKNESS, 0.0),
                width,
                WALL_THICKNESS,
            )),
            platform: make_platform(grid_width, grid_height, &difficulty),
            ball: make_ball(grid_width, grid_height, &difficulty),
            bricks,
            indestructible_bricks,
            difficulty,
        }
    }

    /// Grid width including both side walls
    #[inline]
    pub fn grid_width(&self) -> f64 {
        self.grid_width
    }

    /// Grid height including the top wall
    #[inline]
    pub fn grid_height(&self) -> f64 {
        self.grid_height
    }

    pub fn left_wall(&self) -> &Wall {
        &self.left_wall
    }

    pub fn right_wall(&self) -> &Wall {
        &self.right_wall
    }

    pub fn top_wall(&self) -> &Wall {
        &self.top_wall
    }

    pub fn walls(&self) -> [&Wall; 3] {
        [&self.left_wall, &self.right_wall, &self.top_wall]
    }

    pub fn difficulty(&self) -> &DifficultyParameters {
        &self.difficulty
    }

    /// Swap difficulty and put ball and platform back at their start
    pub fn set_difficulty_parameters(&mut self, difficulty: DifficultyParameters) {
        self.difficulty = difficulty;
        self.reset_ball();
        self.reset_platform();
    }

    pub fn reset_ball(&mut self) {
        self.ball = make_ball(self.grid_width, self.grid_height, &self.difficulty);
    }

    pub fn reset_platform(&mut self) {
        self.platform = make_platform(self.grid_width, self.grid_height, &self.difficulty);
    }

    /// Horizontal span between the inner faces of the side walls
    pub fn interior_x(&self) -> (f64, f64) {
        (
            self.left_wall.rect.bottom_right().x,
            self.right_wall.rect.top_left().x,
        )
    }

    /// The ball's bottom edge reached the open bottom of the grid
    pub fn ball_is_lost(&self) -> bool {
        self.ball.rect.bottom_right().y >= self.grid_height
    }

    pub fn all_bricks_destroyed(&self) -> bool {
        all_bricks_are_destroyed(&self.bricks)
    }

    /// Bricks still standing
    pub fn remaining_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| !b.is_destroyed()).count()
    }
}

/// True when no brick has hitpoints left (vacuously true when empty)
pub fn all_bricks_are_destroyed(bricks: &[Brick]) -> bool {
    bricks.iter().all(Brick::is_destroyed)
}

fn interior_rect(brick: &BrickDescription) -> Rect {
    let offset = Point::splat(WALL_THICKNESS);
    Rect::new(brick.top_left + offset, brick.width, brick.height)
}

/// Centered horizontally, one unit above the bottom
fn make_platform(grid_width: f64, grid_height: f64, difficulty: &DifficultyParameters) -> Platform {
    let width = difficulty.platform_width;
    let top_left = Point::new(
        (grid_width / 2.0 - width / 2.0).max(0.0),
        grid_height - 1.0,
    );
    Platform::new(
        Rect::new(top_left, width, PLATFORM_HEIGHT),
        difficulty.platform_velocity,
    )
}

/// Centered horizontally, two units above the bottom
fn make_ball(grid_width: f64, grid_height: f64, difficulty: &DifficultyParameters) -> Ball {
    let top_left = Point::new(grid_width / 2.0 - BALL_WIDTH / 2.0, grid_height - 2.0);
    Ball::new(
        Rect::new(top_left, BALL_WIDTH, BALL_HEIGHT),
        difficulty.ball_velocity,
        Angle::from_degrees(BALL_START_ANGLE),
        difficulty.ball_gravity,
    )
}
