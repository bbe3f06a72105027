//! Collision detection and response for axis-aligned rectangles
//!
//! One pass per frame tests the ball against the left, right and top walls,
//! then every indestructible brick, then every live brick, then the platform.
//! Every overlapped target lands in the frame's hit set, which the game loop
//! turns into score and sound afterwards. The ball mirrors at most once per
//! axis per pass.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::objects::{Ball, Brick, IndestructibleBrick, Platform, Rect, Wall};

/// Which wall was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Top,
}

/// The surface orientation the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Top or bottom face: the vertical component flips
    Horizontal,
    /// Left or right face: the horizontal component flips
    Vertical,
}

/// An entity the ball overlapped during a collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitObject {
    Wall(WallSide),
    IndestructibleBrick {
        index: usize,
    },
    Brick {
        index: usize,
        start_hitpoints: u32,
        /// Whether this hit took the last hitpoint
        destroyed: bool,
    },
    Platform,
}

/// A collidable entity, borrowed for one collision pass
pub enum Target<'a> {
    Wall(WallSide, &'a Wall),
    IndestructibleBrick(usize, &'a IndestructibleBrick),
    Brick(usize, &'a mut Brick),
    Platform(&'a Platform),
}

impl Target<'_> {
    pub fn rect(&self) -> &Rect {
        match self {
            Target::Wall(_, wall) => &wall.rect,
            Target::IndestructibleBrick(_, brick) => &brick.rect,
            Target::Brick(_, brick) => &brick.rect,
            Target::Platform(platform) => &platform.rect,
        }
    }

    /// Destroyed bricks are inert and skipped entirely
    pub fn is_collidable(&self) -> bool {
        match self {
            Target::Brick(_, brick) => !brick.is_destroyed(),
            _ => true,
        }
    }

    /// Kind-specific effect of being hit, after the ball has been mirrored
    ///
    /// Bricks lose one hitpoint; walls, indestructible bricks and the
    /// platform have no state to change.
    pub fn on_hit(self) -> HitObject {
        match self {
            Target::Wall(side, _) => HitObject::Wall(side),
            Target::IndestructibleBrick(index, _) => HitObject::IndestructibleBrick { index },
            Target::Brick(index, brick) => {
                brick.decrease_hitpoints();
                HitObject::Brick {
                    index,
                    start_hitpoints: brick.start_hitpoints(),
                    destroyed: brick.is_destroyed(),
                }
            }
            Target::Platform(_) => HitObject::Platform,
        }
    }
}

/// Decide which face of `target` the ball went through
///
/// The axis with the shallower penetration is the one the ball crossed;
/// ties count as a horizontal face.
pub fn contact_surface(ball: &Rect, target: &Rect) -> Option<(Surface, DVec2)> {
    let penetration = ball.overlap(target)?;
    let surface = if penetration.x < penetration.y {
        Surface::Vertical
    } else {
        Surface::Horizontal
    };
    Some((surface, penetration))
}

/// Signed distance that moves `ball` out of `target` along the struck axis
fn push_out(ball: &Rect, target: &Rect, surface: Surface, penetration: DVec2) -> f64 {
    let (ball_center, target_center) = (ball.center(), target.center());
    match surface {
        Surface::Vertical if ball_center.x < target_center.x => -penetration.x,
        Surface::Vertical => penetration.x,
        Surface::Horizontal if ball_center.y < target_center.y => -penetration.y,
        Surface::Horizontal => penetration.y,
    }
}

/// Accumulated response of one collision pass
///
/// Each axis mirrors at most once per pass, and only when the ball is heading
/// into a struck surface. The push-out per axis is the deepest one seen.
#[derive(Debug, Default)]
struct Deflection {
    flip_x: bool,
    flip_y: bool,
    push: DVec2,
}

impl Deflection {
    fn add(&mut self, heading: DVec2, surface: Surface, push: f64) {
        let (flip, component, along) = match surface {
            Surface::Vertical => (&mut self.flip_x, heading.x, &mut self.push.x),
            Surface::Horizontal => (&mut self.flip_y, heading.y, &mut self.push.y),
        };
        // Heading in means moving against the push-out direction
        *flip |= push * component < 0.0;
        if push.abs() > along.abs() {
            *along = push;
        }
    }

    fn apply(self, ball: &mut Ball) {
        if self.flip_x {
            ball.angle = ball.angle.mirror_horizontal();
        }
        if self.flip_y {
            ball.angle = ball.angle.mirror_vertical();
        }
        ball.rect.translate(self.push);
    }
}

/// Mirror the ball off `target` if they overlap
///
/// The perpendicular component only flips when the ball is heading into the
/// face, so a ball already leaving is not turned back. The ball is then pushed
/// out along the same axis. Returns whether the two overlapped.
pub fn reflect(ball: &mut Ball, target: &Rect) -> bool {
    let Some((surface, penetration)) = contact_surface(&ball.rect, target) else {
        return false;
    };
    let mut deflection = Deflection::default();
    let push = push_out(&ball.rect, target, surface, penetration);
    deflection.add(ball.angle.heading(), surface, push);
    deflection.apply(ball);
    true
}

/// Run one collision pass over `targets`, in order
///
/// Every target is tested against the ball as it was when the pass started,
/// so a ball straddling two bricks damages both. Mirroring and push-out are
/// applied once, after all targets were tested.
pub fn reflect_from_targets<'a>(
    ball: &mut Ball,
    targets: impl IntoIterator<Item = Target<'a>>,
) -> Vec<HitObject> {
    let heading = ball.angle.heading();
    let mut deflection = Deflection::default();
    let mut hits = Vec::new();
    for target in targets {
        if !target.is_collidable() {
            continue;
        }
        let Some((surface, penetration)) = contact_surface(&ball.rect, target.rect()) else {
            continue;
        };
        let push = push_out(&ball.rect, target.rect(), surface, penetration);
        deflection.add(heading, surface, push);
        hits.push(target.on_hit());
    }
    if !hits.is_empty() {
        deflection.apply(ball);
    }
    hits
}

/// Walls, then indestructible bricks, then bricks
pub fn reflect_from_game_objects(
    ball: &mut Ball,
    walls: [&Wall; 3],
    indestructible_bricks: &[IndestructibleBrick],
    bricks: &mut [Brick],
) -> Vec<HitObject> {
    let [left, right, top] = walls;
    let walls = [
        Target::Wall(WallSide::Left, left),
        Target::Wall(WallSide::Right, right),
        Target::Wall(WallSide::Top, top),
    ];
    let indestructible = indestructible_bricks
        .iter()
        .enumerate()
        .map(|(index, brick)| Target::IndestructibleBrick(index, brick));
    let destructible = bricks
        .iter_mut()
        .enumerate()
        .map(|(index, brick)| Target::Brick(index, brick));

    reflect_from_targets(ball, walls.into_iter().chain(indestructible).chain(destructible))
}

/// Pure mirror reflection off the platform
pub fn reflect_from_platform(ball: &mut Ball, platform: &Platform) -> bool {
    !reflect_from_targets(ball, [Target::Platform(platform)]).is_empty()
}

/// Full collision pass for the level's ball, platform last
pub fn resolve_collisions(level: &mut Level) -> Vec<HitObject> {
    let walls = [&level.left_wall, &level.right_wall, &level.top_wall];
    let mut hits = reflect_from_game_objects(
        &mut level.ball,
        walls,
        &level.indestructible_bricks,
        &mut level.bricks,
    );
    if reflect_from_platform(&mut level.ball, &level.platform) {
        hits.push(HitObject::Platform);
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{Angle, Point};
    use proptest::prelude::*;

    fn ball(x: f64, y: f64, angle: f64) -> Ball {
        let mut ball = Ball::new(
            Rect::new(Point::new(x, y), 0.75, 0.75),
            10.0,
            Angle::from_degrees(angle),
            0.0,
        );
        ball.activate();
        ball
    }

    fn wall(x: f64, y: f64, w: f64, h: f64) -> Wall {
        Wall::new(Rect::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_no_overlap_no_hit() {
        let mut b = ball(5.0, 5.0, 45.0);
        let w = wall(0.0, 0.0, 1.0, 20.0);
        assert!(!reflect(&mut b, &w.rect));
        assert_eq!(b.angle.degrees(), 45.0);
    }

    #[test]
    fn test_left_wall_flips_horizontal() {
        // Ball moving up-left (225°) into the left wall
        let mut b = ball(0.9, 5.0, 225.0);
        let w = wall(0.0, 0.0, 1.0, 20.0);
        assert!(reflect(&mut b, &w.rect));
        assert!((b.angle.degrees() - 315.0).abs() < 1e-9);
        // Pushed out of the wall
        assert!(b.rect.top_left().x >= 1.0 - 1e-9);
    }

    #[test]
    fn test_top_wall_flips_vertical() {
        let mut b = ball(5.0, 0.8, 300.0);
        let w = wall(1.0, 0.0, 10.0, 1.0);
        assert!(reflect(&mut b, &w.rect));
        assert!((b.angle.degrees() - 60.0).abs() < 1e-9);
        assert!(b.rect.top_left().y >= 1.0 - 1e-9);
    }

    #[test]
    fn test_leaving_ball_is_not_turned_back() {
        // Overlapping the left wall but already heading right
        let mut b = ball(0.9, 5.0, 30.0);
        let w = wall(0.0, 0.0, 1.0, 20.0);
        assert!(reflect(&mut b, &w.rect));
        assert_eq!(b.angle.degrees(), 30.0);
    }

    #[test]
    fn test_brick_loses_one_hitpoint_per_pass() {
        let mut b = ball(3.0, 4.8, 300.0);
        let walls = [
            wall(0.0, 0.0, 1.0, 21.0),
            wall(11.0, 0.0, 1.0, 21.0),
            wall(1.0, 0.0, 10.0, 1.0),
        ];
        let mut bricks = vec![Brick::new(Rect::new(Point::new(2.0, 4.0), 3.0, 1.0), 2)];
        let hits =
            reflect_from_game_objects(&mut b, [&walls[0], &walls[1], &walls[2]], &[], &mut bricks);
        assert_eq!(
            hits,
            vec![HitObject::Brick {
                index: 0,
                start_hitpoints: 2,
                destroyed: false
            }]
        );
        assert_eq!(bricks[0].hitpoints(), 1);
        // Ball came from below heading up: now heading down
        assert!(b.angle.heading().y > 0.0);
    }

    #[test]
    fn test_destroyed_brick_is_skipped() {
        let mut b = ball(3.0, 4.5, 300.0);
        let walls = [
            wall(0.0, 0.0, 1.0, 21.0),
            wall(11.0, 0.0, 1.0, 21.0),
            wall(1.0, 0.0, 10.0, 1.0),
        ];
        let mut brick = Brick::new(Rect::new(Point::new(2.0, 4.0), 3.0, 1.0), 1);
        brick.decrease_hitpoints();
        let mut bricks = vec![brick];
        let hits =
            reflect_from_game_objects(&mut b, [&walls[0], &walls[1], &walls[2]], &[], &mut bricks);
        assert!(hits.is_empty());
        assert_eq!(b.angle.degrees(), 300.0);
    }

    #[test]
    fn test_indestructible_reflects_without_state() {
        let mut b = ball(3.0, 4.8, 300.0);
        let walls = [
            wall(0.0, 0.0, 1.0, 21.0),
            wall(11.0, 0.0, 1.0, 21.0),
            wall(1.0, 0.0, 10.0, 1.0),
        ];
        let blocks = vec![IndestructibleBrick::new(Rect::new(Point::new(2.0, 4.0), 3.0, 1.0))];
        let hits =
            reflect_from_game_objects(&mut b, [&walls[0], &walls[1], &walls[2]], &blocks, &mut []);
        assert_eq!(hits, vec![HitObject::IndestructibleBrick { index: 0 }]);
        assert!(b.angle.heading().y > 0.0);
    }

    #[test]
    fn test_adjacent_bricks_both_hit_with_one_mirror() {
        // Ball straddling two bricks in a row, moving up
        let mut b = ball(3.6, 4.8, 270.0);
        let walls = [
            wall(0.0, 0.0, 1.0, 21.0),
            wall(11.0, 0.0, 1.0, 21.0),
            wall(1.0, 0.0, 10.0, 1.0),
        ];
        let mut bricks = vec![
            Brick::new(Rect::new(Point::new(2.0, 4.0), 2.0, 1.0), 1),
            Brick::new(Rect::new(Point::new(4.0, 4.0), 2.0, 1.0), 1),
        ];
        let hits =
            reflect_from_game_objects(&mut b, [&walls[0], &walls[1], &walls[2]], &[], &mut bricks);
        assert_eq!(hits.len(), 2);
        assert!(bricks.iter().all(Brick::is_destroyed));
        // Mirrored once: 270 -> 90, not back to 270
        assert!((b.angle.degrees() - 90.0).abs() < 1e-9);
        // Pushed below both bricks
        assert!(b.rect.top_left().y >= 5.0 - 1e-9);
        assert!(!bricks.iter().any(|brick| brick.rect.overlaps(&b.rect)));
    }

    #[test]
    fn test_corner_hit_mirrors_both_axes() {
        // Up-left into the corner of the left wall and a brick touching it
        let mut b = ball(0.9, 4.8, 225.0);
        let walls = [
            wall(0.0, 0.0, 1.0, 21.0),
            wall(11.0, 0.0, 1.0, 21.0),
            wall(1.0, 0.0, 10.0, 1.0),
        ];
        let mut bricks = vec![Brick::new(Rect::new(Point::new(1.0, 4.0), 2.0, 1.0), 3)];
        let hits =
            reflect_from_game_objects(&mut b, [&walls[0], &walls[1], &walls[2]], &[], &mut bricks);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], HitObject::Wall(WallSide::Left));
        assert_eq!(bricks[0].hitpoints(), 2);
        assert!((b.angle.degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_platform_mirror() {
        let mut b = ball(5.0, 9.9, 45.0);
        let platform = Platform::new(Rect::new(Point::new(4.0, 10.5), 4.0, 0.5), 20.0);
        assert!(reflect_from_platform(&mut b, &platform));
        assert!((b.angle.degrees() - 315.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_wall_mirror_keeps_parallel_component(angle in 0.0f64..360.0) {
            // Side wall: x flips when heading in, y always kept
            let mut b = ball(0.9, 5.0, angle);
            let before = b.angle.heading();
            let w = wall(0.0, 0.0, 1.0, 20.0);
            prop_assert!(reflect(&mut b, &w.rect));
            let after = b.angle.heading();
            prop_assert!((after.y - before.y).abs() < 1e-9);
            prop_assert!((after.x.abs() - before.x.abs()).abs() < 1e-9);
            prop_assert!(after.x >= -1e-9);

            // Top wall: y flips when heading in, x always kept
            let mut b = ball(5.0, 0.8, angle);
            let before = b.angle.heading();
            let w = wall(1.0, 0.0, 10.0, 1.0);
            prop_assert!(reflect(&mut b, &w.rect));
            let after = b.angle.heading();
            prop_assert!((after.x - before.x).abs() < 1e-9);
            prop_assert!((after.y.abs() - before.y.abs()).abs() < 1e-9);
            prop_assert!(after.y >= -1e-9);
        }
    }
}
