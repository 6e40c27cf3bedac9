//! Scene assembly
//!
//! Turns a snapshot of the simulation into one triangle list, back to front:
//! sky, clouds, obstacles, ground, avatar.

use glam::{Affine2, Vec2};

use super::shapes::{self, Axis, Gradient};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Avatar, GameMode, GameState, Obstacle, Rect, idle_bob};

const SKY: [(f32, [f32; 4]); 3] = [
    (0.0, colors::SKY_TOP),
    (0.7, colors::SKY_HAZE),
    (1.0, colors::SKY_BOTTOM),
];

const PIPE: [(f32, [f32; 4]); 4] = [
    (0.0, colors::PIPE_DARK),
    (0.3, colors::PIPE_LIGHT),
    (0.7, colors::PIPE_DARK),
    (1.0, colors::PIPE_SHADOW),
];

/// Cap height and overhang on each side
const CAP_HEIGHT: f32 = 30.0;
const CAP_OVERHANG: f32 = 5.0;
const CAP_EDGE: f32 = 3.0;

const GRASS_HEIGHT: f32 = 15.0;
const GROUND_EDGE_HEIGHT: f32 = 10.0;
const BLADE_SPACING: f32 = 20.0;

const CIRCLE_SEGMENTS: u32 = 24;

/// Everything the renderer needs from one frame
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub mode: GameMode,
    pub avatar: Avatar,
    pub obstacles: &'a [Obstacle],
    /// Wall-clock time in milliseconds, for decorative animation
    pub time_ms: f64,
    /// False when reduced motion is requested
    pub animate: bool,
}

impl<'a> SceneView<'a> {
    pub fn from_state(state: &'a GameState, time_ms: f64, animate: bool) -> Self {
        Self {
            mode: state.mode,
            avatar: state.avatar,
            obstacles: state.obstacles.as_slice(),
            time_ms,
            animate,
        }
    }
}

/// How the avatar is drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPose {
    /// Top edge
    pub y: f32,
    pub tilt_degrees: f32,
    /// Vertical wing offset from the flutter animation
    pub wing_offset: f32,
}

impl AvatarPose {
    pub fn for_view(view: &SceneView) -> Self {
        let wing_offset = if view.animate {
            ((view.time_ms / 50.0).sin() * 3.0) as f32
        } else {
            0.0
        };
        match view.mode {
            GameMode::Idle => Self {
                y: if view.animate {
                    idle_bob(view.time_ms)
                } else {
                    AVATAR_START_Y
                },
                tilt_degrees: 0.0,
                wing_offset,
            },
            GameMode::Playing | GameMode::GameOver => Self {
                y: view.avatar.y,
                tilt_degrees: view.avatar.tilt_degrees(),
                wing_offset,
            },
        }
    }
}

/// Build the full frame
pub fn build_scene(view: &SceneView) -> Vec<Vertex> {
    let ground_y = CANVAS_HEIGHT - GROUND_HEIGHT;
    let mut vertices = Vec::with_capacity(2048);

    vertices.extend(background());
    vertices.extend(clouds());
    for obstacle in view.obstacles {
        vertices.extend(obstacle_pair(obstacle, ground_y));
    }
    vertices.extend(ground(ground_y));
    vertices.extend(avatar(&AvatarPose::for_view(view)));

    vertices
}

fn background() -> Vec<Vertex> {
    let canvas = Rect::from_min_size(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
    shapes::gradient_rect(
        canvas,
        &Gradient { stops: &SKY },
        Axis::Vertical,
        0.0,
        CANVAS_HEIGHT,
    )
}

/// Band height used to tessellate each cloud
const CLOUD_STEP: f32 = 1.0;

/// Each cloud is four overlapping lobes drawn as one translucent shape
fn clouds() -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for (x, y, scale) in [(50.0, 80.0, 1.0), (200.0, 120.0, 0.8), (350.0, 60.0, 1.2)] {
        let lobes = [
            (0.0, 0.0, 25.0),
            (25.0, -10.0, 20.0),
            (50.0, 0.0, 25.0),
            (25.0, 5.0, 18.0),
        ]
        .map(|(dx, dy, r)| (Vec2::new(x + dx * scale, y + dy * scale), r * scale));
        vertices.extend(shapes::circle_union(&lobes, colors::CLOUD, CLOUD_STEP));
    }
    vertices
}

/// Body plus cap, with the cap's dark-left / light-right edge strips
fn obstacle_pair(obstacle: &Obstacle, ground_y: f32) -> Vec<Vertex> {
    let gradient = Gradient { stops: &PIPE };
    let (from, to) = (obstacle.x, obstacle.right());
    let cap_width = OBSTACLE_WIDTH + 2.0 * CAP_OVERHANG;
    let cap_left = obstacle.x - CAP_OVERHANG;

    let upper_cap = Rect::from_min_size(
        Vec2::new(cap_left, obstacle.gap_top - CAP_HEIGHT),
        Vec2::new(cap_width, CAP_HEIGHT),
    );
    let lower_cap = Rect::from_min_size(
        Vec2::new(cap_left, obstacle.gap_bottom()),
        Vec2::new(cap_width, CAP_HEIGHT),
    );

    let mut vertices = Vec::new();
    for (body, cap) in [
        (obstacle.upper(), upper_cap),
        (obstacle.lower(ground_y), lower_cap),
    ] {
        vertices.extend(shapes::gradient_rect(
            body,
            &gradient,
            Axis::Horizontal,
            from,
            to,
        ));
        vertices.extend(shapes::gradient_rect(
            cap,
            &gradient,
            Axis::Horizontal,
            from,
            to,
        ));
        vertices.extend(shapes::rect(
            Rect::from_min_size(cap.min, Vec2::new(CAP_EDGE, CAP_HEIGHT)),
            colors::PIPE_SHADOW,
        ));
        vertices.extend(shapes::rect(
            Rect::from_min_size(
                Vec2::new(obstacle.right() + 2.0, cap.top()),
                Vec2::new(CAP_EDGE, CAP_HEIGHT),
            ),
            colors::PIPE_LIGHT,
        ));
    }
    vertices
}

fn ground(ground_y: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    vertices.extend(shapes::rect(
        Rect::from_min_size(
            Vec2::new(0.0, ground_y),
            Vec2::new(CANVAS_WIDTH, GROUND_HEIGHT),
        ),
        colors::GROUND,
    ));
    vertices.extend(shapes::rect(
        Rect::from_min_size(
            Vec2::new(0.0, ground_y),
            Vec2::new(CANVAS_WIDTH, GROUND_EDGE_HEIGHT),
        ),
        colors::GROUND_EDGE,
    ));
    vertices.extend(shapes::rect(
        Rect::from_min_size(
            Vec2::new(0.0, ground_y - GRASS_HEIGHT),
            Vec2::new(CANVAS_WIDTH, GRASS_HEIGHT),
        ),
        colors::GRASS,
    ));

    let mut x = 0.0;
    while x < CANVAS_WIDTH {
        vertices.extend(shapes::triangle(
            Affine2::IDENTITY,
            [
                Vec2::new(x, ground_y),
                Vec2::new(x + BLADE_SPACING / 2.0, ground_y - GRASS_HEIGHT),
                Vec2::new(x + BLADE_SPACING, ground_y),
            ],
            colors::GRASS_BLADE,
        ));
        x += BLADE_SPACING;
    }
    vertices
}

/// Body, wing, eye and beak in a frame centered on the avatar box
fn avatar(pose: &AvatarPose) -> Vec<Vertex> {
    let half = AVATAR_SIZE / 2.0;
    let frame = Affine2::from_angle_translation(
        pose.tilt_degrees.to_radians(),
        Vec2::new(AVATAR_X + half, pose.y + half),
    );

    let mut vertices = Vec::new();
    vertices.extend(shapes::ellipse(
        frame,
        Vec2::ZERO,
        Vec2::new(half, AVATAR_SIZE / 2.5),
        0.0,
        colors::AVATAR_BODY,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(shapes::ellipse(
        frame,
        Vec2::new(-5.0, pose.wing_offset),
        Vec2::new(12.0, 8.0),
        -0.3,
        colors::AVATAR_WING,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(shapes::ellipse(
        frame,
        Vec2::new(8.0, -5.0),
        Vec2::splat(8.0),
        0.0,
        colors::AVATAR_EYE,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(shapes::ellipse(
        frame,
        Vec2::new(10.0, -5.0),
        Vec2::splat(4.0),
        0.0,
        colors::AVATAR_PUPIL,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(shapes::triangle(
        frame,
        [
            Vec2::new(15.0, 0.0),
            Vec2::new(25.0, 3.0),
            Vec2::new(15.0, 8.0),
        ],
        colors::AVATAR_BEAK,
    ));
    vertices
}
