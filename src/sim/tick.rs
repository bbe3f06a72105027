//! Fixed timestep simulation tick
//!
//! One call advances the level and session by one frame.

use serde::{Deserialize, Serialize};

use super::collision::{HitObject, resolve_collisions};
use super::level::Level;
use super::state::{GameEvent, GamePhase, Session};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Leave the game
    pub quit: bool,
    /// Pause state changed this frame
    pub pause_toggled: bool,
    /// Current pause state
    pub paused: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Launch an inactive ball
    pub launch: bool,
}

impl TickInput {
    /// -1 for left, 1 for right, 0 when neither or both are held
    pub fn direction(&self) -> f64 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the simulation by `elapsed_ms` milliseconds
///
/// Quit wins over everything. While paused, or while the session waits for a
/// level transition, nothing moves. Otherwise the platform is steered, the
/// ball moves, a lost ball costs a life, collisions are resolved and scored,
/// and a cleared level ends the frame in a transition phase.
pub fn tick(
    level: &mut Level,
    session: &mut Session,
    input: &TickInput,
    elapsed_ms: f64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        session.phase = GamePhase::Exit;
        events.push(GameEvent::Exit);
        return events;
    }

    match session.phase {
        GamePhase::Playing => {}
        GamePhase::LifeLost => session.phase = GamePhase::Playing,
        _ => return events,
    }

    if input.paused {
        return events;
    }

    let (min_x, max_x) = level.interior_x();
    level
        .platform
        .steer(input.direction(), elapsed_ms, min_x, max_x);

    if !level.ball.is_active() {
        if !input.launch {
            return events;
        }
        level.ball.activate();
        events.push(GameEvent::BallLaunched);
    }

    level.ball.move_by(elapsed_ms);

    if level.ball_is_lost() {
        match session.lose_life() {
            GamePhase::GameOver => events.push(GameEvent::GameOver),
            _ => {
                level.reset_ball();
                level.reset_platform();
                events.push(GameEvent::BallLost);
            }
        }
        return events;
    }

    for hit in resolve_collisions(level) {
        let event = match hit {
            HitObject::Wall(side) => GameEvent::WallHit(side),
            HitObject::IndestructibleBrick { index } => {
                GameEvent::IndestructibleBrickHit { index }
            }
            HitObject::Brick {
                index,
                destroyed: false,
                ..
            } => GameEvent::BrickHit { index },
            HitObject::Brick {
                index,
                start_hitpoints,
                destroyed: true,
            } => {
                let points = session.brick_score(start_hitpoints);
                log::debug!("Brick {index} destroyed (+{points})");
                events.push(GameEvent::BrickDestroyed { index, points });
                let lives = session.add_score(points);
                if lives > 0 {
                    events.push(GameEvent::ExtraLife { lives });
                }
                continue;
            }
            HitObject::Platform => GameEvent::PlatformHit,
        };
        events.push(event);
    }

    if level.all_bricks_destroyed() {
        events.push(match session.finish_level() {
            GamePhase::AllLevelsCleared => GameEvent::AllLevelsCleared,
            _ => GameEvent::LevelCleared,
        });
    }

    events
}
