//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in play coordinates.

use glam::{Affine2, Vec2, Vec4};
use std::f32::consts::PI;

use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// Direction a gradient runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Piecewise-linear color ramp, stops sorted by offset in 0-1
#[derive(Debug, Clone, Copy)]
pub struct Gradient<'a> {
    pub stops: &'a [(f32, Color)],
}

impl Gradient<'_> {
    /// Color at `t`, clamped to the end stops
    pub fn sample(&self, t: f32) -> Color {
        let Some(&(first_t, first)) = self.stops.first() else {
            return [0.0; 4];
        };
        if t <= first_t {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                let u = if span > 0.0 { (t - t0) / span } else { 1.0 };
                return Vec4::from_array(c0).lerp(Vec4::from_array(c1), u).to_array();
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// Two triangles from corners given clockwise from top-left
fn quad(corners: [Vec2; 4], colors: [Color; 4]) -> [Vertex; 6] {
    let v = |i: usize| Vertex::new(corners[i].x, corners[i].y, colors[i]);
    [v(0), v(1), v(2), v(0), v(2), v(3)]
}

fn corners(r: &Rect) -> [Vec2; 4] {
    [
        r.min,
        Vec2::new(r.max.x, r.min.y),
        r.max,
        Vec2::new(r.min.x, r.max.y),
    ]
}

/// Generate vertices for a solid rectangle
pub fn rect(r: Rect, color: Color) -> Vec<Vertex> {
    if r.width() <= 0.0 || r.height() <= 0.0 {
        return Vec::new();
    }
    quad(corners(&r), [color; 4]).to_vec()
}

/// Generate vertices for a rectangle filled with a gradient.
///
/// The gradient runs from `from` to `to` along `axis`; parts of the
/// rectangle outside that span take the end colors.
pub fn gradient_rect(r: Rect, gradient: &Gradient, axis: Axis, from: f32, to: f32) -> Vec<Vertex> {
    if r.width() <= 0.0 || r.height() <= 0.0 {
        return Vec::new();
    }
    let (start, end) = match axis {
        Axis::Horizontal => (r.left(), r.right()),
        Axis::Vertical => (r.top(), r.bottom()),
    };
    let length = to - from;
    let t_at = |p: f32| if length != 0.0 { (p - from) / length } else { 0.0 };

    // Split at every stop that falls strictly inside the rectangle
    let mut cuts = vec![start];
    cuts.extend(
        gradient
            .stops
            .iter()
            .map(|&(t, _)| from + t * length)
            .filter(|&p| p > start && p < end),
    );
    cuts.push(end);

    let mut vertices = Vec::with_capacity((cuts.len() - 1) * 6);
    for pair in cuts.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (ca, cb) = (gradient.sample(t_at(a)), gradient.sample(t_at(b)));
        let band = match axis {
            Axis::Horizontal => Rect {
                min: Vec2::new(a, r.top()),
                max: Vec2::new(b, r.bottom()),
            },
            Axis::Vertical => Rect {
                min: Vec2::new(r.left(), a),
                max: Vec2::new(r.right(), b),
            },
        };
        let colors = match axis {
            Axis::Horizontal => [ca, cb, cb, ca],
            Axis::Vertical => [ca, ca, cb, cb],
        };
        vertices.extend_from_slice(&quad(corners(&band), colors));
    }
    vertices
}

/// Generate vertices for a filled ellipse.
///
/// The ellipse is built in a local frame (`center`, `radii`, `rotation`) and
/// then mapped through `transform`.
pub fn ellipse(
    transform: Affine2,
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let local = Affine2::from_angle_translation(rotation, center);
    let to_world = transform * local;
    let hub = to_world.transform_point2(Vec2::ZERO);
    let rim = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        to_world.transform_point2(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()))
    };

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let p1 = rim(i);
        let p2 = rim(i + 1);
        // Triangle from center to edge
        vertices.push(Vertex::new(hub.x, hub.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}

/// Generate vertices for the filled union of several circles.
///
/// The union is cut into horizontal bands no taller than `step`; each band
/// holds one trapezoid per run of overlapping circles, so every point is
/// covered once and translucent colors blend a single time.
pub fn circle_union(circles: &[(Vec2, f32)], color: Color, step: f32) -> Vec<Vertex> {
    let Some(top) = circles.iter().map(|&(c, r)| c.y - r).reduce(f32::min) else {
        return Vec::new();
    };
    let bottom = circles
        .iter()
        .map(|&(c, r)| c.y + r)
        .fold(f32::MIN, f32::max);
    let bands = ((bottom - top) / step.max(f32::EPSILON)).ceil().max(1.0) as u32;
    let band_height = (bottom - top) / bands as f32;

    // Horizontal half-extent of a circle at vertical offset `dy`
    let half_width = |r: f32, dy: f32| (r * r - dy * dy).max(0.0).sqrt();

    let mut vertices = Vec::new();
    let mut spans: Vec<(f32, f32, usize)> = Vec::with_capacity(circles.len());
    for i in 0..bands {
        let y0 = top + i as f32 * band_height;
        let y1 = if i + 1 == bands {
            bottom
        } else {
            top + (i + 1) as f32 * band_height
        };
        let mid = (y0 + y1) / 2.0;

        spans.clear();
        for (index, &(c, r)) in circles.iter().enumerate() {
            let dy = mid - c.y;
            if dy.abs() < r {
                let w = half_width(r, dy);
                spans.push((c.x - w, c.x + w, index));
            }
        }
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut start = 0;
        while start < spans.len() {
            // Grow the run while the next span starts inside it
            let mut reach = spans[start].1;
            let mut end = start + 1;
            while end < spans.len() && spans[end].0 <= reach {
                reach = reach.max(spans[end].1);
                end += 1;
            }

            let edges = |y: f32| {
                spans[start..end]
                    .iter()
                    .map(|&(_, _, index)| {
                        let (c, r) = circles[index];
                        let w = half_width(r, y - c.y);
                        (c.x - w, c.x + w)
                    })
                    .fold((f32::MAX, f32::MIN), |(l, r), (a, b)| (l.min(a), r.max(b)))
            };
            let (l0, r0) = edges(y0);
            let (l1, r1) = edges(y1);
            vertices.extend_from_slice(&quad(
                [
                    Vec2::new(l0, y0),
                    Vec2::new(r0, y0),
                    Vec2::new(r1, y1),
                    Vec2::new(l1, y1),
                ],
                [color; 4],
            ));
            start = end;
        }
    }
    vertices
}

/// Generate vertices for a single triangle
pub fn triangle(transform: Affine2, points: [Vec2; 3], color: Color) -> Vec<Vertex> {
    points
        .iter()
        .map(|&p| {
            let w = transform.transform_point2(p);
            Vertex::new(w.x, w.y, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::rgb;

    const RED: Color = [1.0, 0.0, 0.0, 1.0];
    const BLUE: Color = [0.0, 0.0, 1.0, 1.0];

    #[test]
    fn test_gradient_sample() {
        let stops = [(0.0, RED), (1.0, BLUE)];
        let g = Gradient { stops: &stops };
        assert_eq!(g.sample(-1.0), RED);
        assert_eq!(g.sample(0.5), [0.5, 0.0, 0.5, 1.0]);
        assert_eq!(g.sample(2.0), BLUE);
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let r = Rect::from_min_size(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0));
        let v = rect(r, RED);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| v.color == RED));
        assert!(rect(Rect::from_min_size(Vec2::ZERO, Vec2::new(0.0, 5.0)), RED).is_empty());
    }

    #[test]
    fn test_gradient_rect_splits_at_stops() {
        let stops = [(0.0, RED), (0.3, BLUE), (0.7, RED), (1.0, BLUE)];
        let g = Gradient { stops: &stops };
        let r = Rect::from_min_size(Vec2::ZERO, Vec2::new(100.0, 10.0));
        let v = gradient_rect(r, &g, Axis::Horizontal, 0.0, 100.0);
        // Cuts at 0, 30, 70, 100
        assert_eq!(v.len(), 3 * 6);
        assert_eq!(v[0].color, RED);
        assert!((v[1].position[0] - 30.0).abs() < 1e-3);
        assert!(v[1].color[2] > 0.99 && v[1].color[0] < 0.01);
    }

    #[test]
    fn test_gradient_rect_clamps_outside_span() {
        let stops = [(0.0, RED), (1.0, BLUE)];
        let g = Gradient { stops: &stops };
        // Rectangle 5 units wider than the gradient on each side
        let r = Rect::from_min_size(Vec2::new(-5.0, 0.0), Vec2::new(110.0, 10.0));
        let v = gradient_rect(r, &g, Axis::Horizontal, 0.0, 100.0);
        assert_eq!(v.first().map(|v| v.color), Some(RED));
        assert!(v.iter().any(|v| v.position[0] == 105.0 && v.color == BLUE));
    }

    #[test]
    fn test_vertical_gradient() {
        let stops = [(0.0, RED), (1.0, BLUE)];
        let g = Gradient { stops: &stops };
        let r = Rect::from_min_size(Vec2::ZERO, Vec2::new(10.0, 100.0));
        let v = gradient_rect(r, &g, Axis::Vertical, 0.0, 100.0);
        assert_eq!(v.len(), 6);
        let bottom_left = v.iter().find(|v| v.position == [0.0, 100.0]);
        assert_eq!(bottom_left.map(|v| v.color), Some(BLUE));
    }

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(50.0, 50.0);
        let v = ellipse(
            Affine2::IDENTITY,
            center,
            Vec2::splat(10.0),
            0.0,
            rgb(0xFFFFFF),
            16,
        );
        assert_eq!(v.len(), 16 * 3);
        for tri in v.chunks(3) {
            let rim = Vec2::from_array(tri[1].position);
            assert!((rim.distance(center) - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ellipse_transform_applied() {
        let transform = Affine2::from_translation(Vec2::new(100.0, 0.0));
        let v = ellipse(transform, Vec2::ZERO, Vec2::new(4.0, 2.0), 0.0, RED, 8);
        assert_eq!(v[0].position, [100.0, 0.0]);
        // First rim vertex lies on the x radius
        assert!((v[1].position[0] - 104.0).abs() < 1e-4);
    }

    fn covered_area(vertices: &[Vertex]) -> f32 {
        vertices
            .chunks(3)
            .map(|t| {
                let [a, b, c] = [t[0], t[1], t[2]].map(|v| Vec2::from_array(v.position));
                (b - a).perp_dot(c - a).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn test_circle_union_single_circle_area() {
        let v = circle_union(&[(Vec2::new(50.0, 50.0), 10.0)], RED, 0.5);
        assert_eq!(v.len() % 6, 0);
        let area = covered_area(&v);
        let expected = PI * 100.0;
        assert!((area - expected).abs() / expected < 0.01, "area {}", area);
    }

    #[test]
    fn test_circle_union_covers_overlap_once() {
        // Two radius-10 circles 10 apart: union is 2*pi*r^2 minus the lens
        let circles = [(Vec2::new(0.0, 0.0), 10.0), (Vec2::new(10.0, 0.0), 10.0)];
        let v = circle_union(&circles, RED, 0.5);
        let lens = 2.0 * 100.0 * (0.5f32).acos() - 5.0 * 300.0f32.sqrt();
        let expected = 2.0 * PI * 100.0 - lens;
        let area = covered_area(&v);
        assert!((area - expected).abs() / expected < 0.01, "area {}", area);
        // Two separate fans would count the lens twice
        assert!(area < 2.0 * PI * 100.0 - lens / 2.0);
    }

    #[test]
    fn test_circle_union_keeps_disjoint_runs_apart() {
        let circles = [(Vec2::new(0.0, 0.0), 5.0), (Vec2::new(100.0, 0.0), 5.0)];
        let v = circle_union(&circles, RED, 1.0);
        // Nothing drawn in the empty space between the circles
        assert!(
            v.iter()
                .all(|v| v.position[0] <= 5.0 + 1e-3 || v.position[0] >= 95.0 - 1e-3)
        );
        assert!(circle_union(&[], RED, 1.0).is_empty());
    }

    #[test]
    fn test_triangle_rotation() {
        let transform = Affine2::from_angle(PI / 2.0);
        let v = triangle(
            transform,
            [Vec2::new(1.0, 0.0), Vec2::ZERO, Vec2::ZERO],
            RED,
        );
        assert!((v[0].position[0]).abs() < 1e-5);
        assert!((v[0].position[1] - 1.0).abs() < 1e-5);
    }
}
