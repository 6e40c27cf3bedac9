//! Obstacle set: spawning, scrolling, pass detection and pruning
//!
//! All obstacles move at the same speed, so spawn order is also left-to-right
//! order and the `Vec` never needs sorting.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::PlayArea;
use crate::consts::*;

/// A pair of barriers with a vertical gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the upper barrier (top of the gap)
    pub gap_top: f32,
    /// Set once when the right edge crosses the avatar; never cleared
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Top of the lower barrier
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + GAP_SIZE
    }

    /// Full-height horizontal span, used for overlap tests
    pub fn span(&self) -> Rect {
        Rect {
            min: Vec2::new(self.x, f32::MIN),
            max: Vec2::new(self.right(), f32::MAX),
        }
    }

    /// Upper barrier rectangle
    pub fn upper(&self) -> Rect {
        Rect::from_min_size(Vec2::new(self.x, 0.0), Vec2::new(OBSTACLE_WIDTH, self.gap_top))
    }

    /// Lower barrier rectangle, down to the ground line
    pub fn lower(&self, ground_y: f32) -> Rect {
        let top = self.gap_bottom();
        Rect::from_min_size(
            Vec2::new(self.x, top),
            Vec2::new(OBSTACLE_WIDTH, (ground_y - top).max(0.0)),
        )
    }
}

/// Strategy for choosing where a new obstacle's gap starts
pub trait GapSource {
    /// A gap-top height in `[min, max)`
    fn gap_top(&mut self, min: f32, max: f32) -> f32;
}

/// Uniformly random gap placement
#[derive(Debug, Clone)]
pub struct RandomGaps {
    rng: Pcg32,
}

impl RandomGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for RandomGaps {
    fn gap_top(&mut self, min: f32, max: f32) -> f32 {
        // Degenerate play areas collapse the range instead of panicking
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Permitted gap-top range for a play area
pub fn gap_top_range(area: PlayArea) -> (f32, f32) {
    let min = SPAWN_MARGIN;
    let max = area.height - GAP_SIZE - SPAWN_MARGIN;
    (min, max)
}

/// In-flight obstacles in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Append an obstacle at the right end of the sequence
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Spawn on the spawn period, advance, and detect passes.
    ///
    /// Returns how many obstacles were passed this tick. Pruning is left to
    /// [`ObstacleSet::prune`] so the caller can run the collision check first.
    pub fn tick(&mut self, frame_count: u32, area: PlayArea, gaps: &mut dyn GapSource) -> u32 {
        if frame_count % SPAWN_PERIOD == 0 {
            self.spawn(area, gaps);
        }
        self.advance(OBSTACLE_SPEED);
        self.mark_passed(AVATAR_X)
    }

    /// Add a new obstacle at the right edge of the play area
    pub fn spawn(&mut self, area: PlayArea, gaps: &mut dyn GapSource) {
        let (min, max) = gap_top_range(area);
        let gap_top = gaps.gap_top(min, max);
        log::debug!("Obstacle spawned, gap top {:.1}", gap_top);
        self.obstacles.push(Obstacle::new(area.width, gap_top));
    }

    /// Scroll every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Flag obstacles whose right edge is now left of `avatar_x`.
    /// Returns the number newly flagged.
    pub fn mark_passed(&mut self, avatar_x: f32) -> u32 {
        let mut newly_passed = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.right() < avatar_x {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// Drop obstacles that have scrolled `PRUNE_MARGIN` past the left edge
    pub fn prune(&mut self) {
        self.obstacles.retain(|o| o.right() >= -PRUNE_MARGIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same height
    struct FixedGap(f32);

    impl GapSource for FixedGap {
        fn gap_top(&mut self, _min: f32, _max: f32) -> f32 {
            self.0
        }
    }

    /// Records the range it was asked for
    #[derive(Default)]
    struct RangeProbe(Option<(f32, f32)>);

    impl GapSource for RangeProbe {
        fn gap_top(&mut self, min: f32, max: f32) -> f32 {
            self.0 = Some((min, max));
            min
        }
    }

    #[test]
    fn test_spawns_on_period_only() {
        let mut set = ObstacleSet::new();
        let mut gaps = FixedGap(120.0);
        for frame in 1..SPAWN_PERIOD {
            set.tick(frame, PlayArea::STANDARD, &mut gaps);
        }
        assert!(set.is_empty());

        set.tick(SPAWN_PERIOD, PlayArea::STANDARD, &mut gaps);
        assert_eq!(set.len(), 1);
        // Spawned at the right edge, then advanced in the same tick
        assert_eq!(set.as_slice()[0].x, CANVAS_WIDTH - OBSTACLE_SPEED);
        assert_eq!(set.as_slice()[0].gap_top, 120.0);

        set.tick(2 * SPAWN_PERIOD, PlayArea::STANDARD, &mut gaps);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_gap_range_respects_margins() {
        let mut set = ObstacleSet::new();
        let mut probe = RangeProbe::default();
        set.spawn(PlayArea::STANDARD, &mut probe);
        // 520 - 160 - 50 = 310
        assert_eq!(probe.0, Some((50.0, 310.0)));
    }

    #[test]
    fn test_advance_ten_ticks() {
        let mut set = ObstacleSet::new();
        set.push(Obstacle::new(400.0, 100.0));
        for _ in 0..10 {
            set.advance(OBSTACLE_SPEED);
        }
        assert_eq!(set.as_slice()[0].x, 370.0);
    }

    #[test]
    fn test_prune_boundary() {
        let mut set = ObstacleSet::new();
        set.push(Obstacle::new(-80.0, 100.0));
        set.prune();
        assert_eq!(set.len(), 1, "right edge exactly at -10 is kept");

        set.advance(0.5);
        set.prune();
        assert!(set.is_empty());
    }

    #[test]
    fn test_pass_detected_once() {
        let mut set = ObstacleSet::new();
        // Right edge at 81, one unit right of the avatar
        set.push(Obstacle::new(AVATAR_X + 1.0 - OBSTACLE_WIDTH, 100.0));
        assert_eq!(set.mark_passed(AVATAR_X), 0);

        set.advance(OBSTACLE_SPEED);
        assert_eq!(set.mark_passed(AVATAR_X), 1);
        assert!(set.as_slice()[0].passed);

        for _ in 0..5 {
            set.advance(OBSTACLE_SPEED);
            assert_eq!(set.mark_passed(AVATAR_X), 0);
        }
        assert!(set.as_slice()[0].passed);
    }

    #[test]
    fn test_right_edge_at_avatar_not_yet_passed() {
        let mut set = ObstacleSet::new();
        set.push(Obstacle::new(AVATAR_X - OBSTACLE_WIDTH, 100.0));
        assert_eq!(set.mark_passed(AVATAR_X), 0);
    }

    #[test]
    fn test_spawn_order_is_left_to_right() {
        let mut set = ObstacleSet::new();
        let mut gaps = RandomGaps::new(7);
        for frame in 1..=(SPAWN_PERIOD * 4) {
            set.tick(frame, PlayArea::STANDARD, &mut gaps);
            set.prune();
        }
        let xs: Vec<f32> = set.iter().map(|o| o.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_random_gaps_within_range() {
        let mut gaps = RandomGaps::new(42);
        let (min, max) = gap_top_range(PlayArea::STANDARD);
        for _ in 0..1000 {
            let g = gaps.gap_top(min, max);
            assert!(g >= min && g < max);
        }
    }

    #[test]
    fn test_random_gaps_degenerate_range() {
        let mut gaps = RandomGaps::new(1);
        assert_eq!(gaps.gap_top(50.0, 10.0), 50.0);
    }

    #[test]
    fn test_barrier_rects() {
        let o = Obstacle::new(100.0, 120.0);
        assert_eq!(o.upper().bottom(), 120.0);
        assert_eq!(o.lower(520.0).top(), 280.0);
        assert_eq!(o.lower(520.0).bottom(), 520.0);
        assert_eq!(o.upper().width(), OBSTACLE_WIDTH);
    }
}
