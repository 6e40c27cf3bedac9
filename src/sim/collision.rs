//! Collision detection
//!
//! Axis-aligned boxes only: the avatar against the ground line, the ceiling,
//! and the upper/lower barriers of every obstacle it horizontally overlaps.
//! Any hit ends the run, so there is no response to compute.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::obstacle::Obstacle;

/// Axis-aligned rectangle in play coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap of the horizontal spans (touching edges don't count)
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }
}

/// What the avatar ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Ground,
    Ceiling,
    /// Index into the obstacle slice that was checked
    Obstacle { index: usize },
}

/// Avatar vertical span escapes the obstacle's gap
#[inline]
pub fn outside_gap(avatar: &Rect, obstacle: &Obstacle) -> bool {
    avatar.top() < obstacle.gap_top || avatar.bottom() > obstacle.gap_bottom()
}

/// Find the first fatal contact, if any
pub fn detect_collision(
    avatar: &Avatar,
    obstacles: &[Obstacle],
    play_height: f32,
    ground_margin: f32,
) -> Option<Collision> {
    let body = avatar.bounds();

    if body.bottom() >= play_height - ground_margin {
        return Some(Collision::Ground);
    }
    if body.top() <= 0.0 {
        return Some(Collision::Ceiling);
    }

    obstacles
        .iter()
        .position(|o| body.overlaps_horizontally(&o.span()) && outside_gap(&body, o))
        .map(|index| Collision::Obstacle { index })
}

/// True if the avatar touches the ground, the ceiling or a barrier
pub fn check_collision(
    avatar: &Avatar,
    obstacles: &[Obstacle],
    play_height: f32,
    ground_margin: f32,
) -> bool {
    detect_collision(avatar, obstacles, play_height, ground_margin).is_some()
}
