//! Scatter layout and per-frame bounce animation.
//!
//! This is deliberately not a converging layout algorithm: nodes drift with
//! a small constant velocity and reflect off the padded canvas edges for as
//! long as the view is mounted. `step` is called once per display frame by
//! the consumer; nodes never settle.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{GraphNode, NodeKind};

/// Margin in pixels kept between node centers and the canvas edges.
pub const CANVAS_PADDING: f64 = 16.0;

/// Velocity magnitude in px/frame per node kind. Heavier (larger) nodes
/// drift slower.
pub fn speed_for(kind: NodeKind) -> f64 {
    match kind {
        NodeKind::Category => 0.05,
        NodeKind::Subcategory => 0.12,
        NodeKind::Leaf => 0.2,
    }
}

/// 2D point / vector in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Vec2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a point into the padded interior of the canvas.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2 {
            x: p.x.clamp(CANVAS_PADDING, self.width - CANVAS_PADDING),
            y: p.y.clamp(CANVAS_PADDING, self.height - CANVAS_PADDING),
        }
    }

    /// Uniformly random point inside the padded canvas rectangle.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2 {
            x: rng.random_range(CANVAS_PADDING..self.width - CANVAS_PADDING),
            y: rng.random_range(CANVAS_PADDING..self.height - CANVAS_PADDING),
        }
    }
}

/// Random velocity with kind-dependent magnitude and uniform direction.
pub fn random_velocity(kind: NodeKind, rng: &mut impl Rng) -> Vec2 {
    let angle = rng.random_range(0.0..std::f64::consts::TAU);
    let speed = speed_for(kind);
    Vec2 {
        x: angle.cos() * speed,
        y: angle.sin() * speed,
    }
}

/// Advance every node by one animation frame.
///
/// position += velocity; a node crossing the padding margin on either axis
/// has that velocity component negated and its position clamped back into
/// bounds. Simple elastic wall reflection, not physically accurate
/// restitution.
pub fn step(nodes: &mut [GraphNode], bounds: &CanvasBounds) {
    let max_x = bounds.width - CANVAS_PADDING;
    let max_y = bounds.height - CANVAS_PADDING;

    for node in nodes {
        node.pos.x += node.vel.x;
        node.pos.y += node.vel.y;

        if node.pos.x < CANVAS_PADDING || node.pos.x > max_x {
            node.vel.x = -node.vel.x;
            node.pos.x = node.pos.x.clamp(CANVAS_PADDING, max_x);
        }
        if node.pos.y < CANVAS_PADDING || node.pos.y > max_y {
            node.vel.y = -node.vel.y;
            node.pos.y = node.pos.y.clamp(CANVAS_PADDING, max_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{radius_for, NodeId};

    fn leaf_at(pos: Vec2, vel: Vec2) -> GraphNode {
        GraphNode {
            id: NodeId::Leaf(1),
            kind: NodeKind::Leaf,
            title: "leaf".to_string(),
            description: None,
            color: "#fff".to_string(),
            group: "Misc".to_string(),
            pos,
            vel,
            radius: radius_for(NodeKind::Leaf),
            links: vec![],
        }
    }

    #[test]
    fn step_advances_position_by_velocity() {
        let bounds = CanvasBounds::new(400.0, 300.0);
        let mut nodes = vec![leaf_at(Vec2::new(100.0, 100.0), Vec2::new(0.2, -0.1))];

        step(&mut nodes, &bounds);

        assert_eq!(nodes[0].pos, Vec2::new(100.2, 99.9));
        assert_eq!(nodes[0].vel, Vec2::new(0.2, -0.1));
    }

    #[test]
    fn step_reflects_at_left_wall() {
        let bounds = CanvasBounds::new(400.0, 300.0);
        let mut nodes = vec![leaf_at(
            Vec2::new(CANVAS_PADDING + 0.05, 150.0),
            Vec2::new(-0.2, 0.0),
        )];

        step(&mut nodes, &bounds);

        assert!(nodes[0].vel.x > 0.0, "x velocity must flip sign at the wall");
        assert_eq!(nodes[0].pos.x, CANVAS_PADDING, "position clamps to the margin");
    }

    #[test]
    fn step_reflects_at_bottom_wall() {
        let bounds = CanvasBounds::new(400.0, 300.0);
        let max_y = bounds.height - CANVAS_PADDING;
        let mut nodes = vec![leaf_at(Vec2::new(200.0, max_y - 0.01), Vec2::new(0.0, 0.2))];

        step(&mut nodes, &bounds);

        assert!(nodes[0].vel.y < 0.0);
        assert_eq!(nodes[0].pos.y, max_y);
    }

    #[test]
    fn nodes_never_escape_bounds_over_many_frames() {
        let bounds = CanvasBounds::new(200.0, 120.0);
        let mut nodes = vec![
            leaf_at(Vec2::new(30.0, 30.0), Vec2::new(0.2, 0.17)),
            leaf_at(Vec2::new(150.0, 90.0), Vec2::new(-0.13, 0.2)),
        ];

        for _ in 0..10_000 {
            step(&mut nodes, &bounds);
        }

        for node in &nodes {
            assert!(node.pos.x >= CANVAS_PADDING && node.pos.x <= bounds.width - CANVAS_PADDING);
            assert!(node.pos.y >= CANVAS_PADDING && node.pos.y <= bounds.height - CANVAS_PADDING);
        }
    }

    #[test]
    fn random_point_stays_in_padded_rect() {
        use rand::SeedableRng;
        let bounds = CanvasBounds::new(100.0, 80.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let p = bounds.random_point(&mut rng);
            assert!(p.x >= CANVAS_PADDING && p.x <= bounds.width - CANVAS_PADDING);
            assert!(p.y >= CANVAS_PADDING && p.y <= bounds.height - CANVAS_PADDING);
        }
    }

    #[test]
    fn velocity_magnitude_matches_node_kind() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        for kind in [NodeKind::Category, NodeKind::Subcategory, NodeKind::Leaf] {
            let v = random_velocity(kind, &mut rng);
            let magnitude = (v.x * v.x + v.y * v.y).sqrt();
            assert!((magnitude - speed_for(kind)).abs() < 1e-9);
        }
    }
}
