//! Shape generation for 2D primitives
//!
//! All output is in field coordinates; [`RenderState`](super::RenderState)
//! maps it to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::settings::Palette;
use crate::sim::{Rect, Snapshot};

/// Segments used to tessellate the ball
pub const BALL_SEGMENTS: u32 = 24;

/// Center net dash geometry
const NET_WIDTH: f32 = 4.0;
const NET_DASH: f32 = 20.0;
const NET_GAP: f32 = 10.0;

/// Generate vertices for a filled rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Dashed vertical line down the middle of the field
pub fn net(color: [f32; 4]) -> Vec<Vertex> {
    let x = FIELD_WIDTH / 2.0 - NET_WIDTH / 2.0;
    let mut vertices = Vec::new();
    let mut y = 0.0;
    while y < FIELD_HEIGHT {
        let height = NET_DASH.min(FIELD_HEIGHT - y);
        vertices.extend(rect(&Rect::new(x, y, NET_WIDTH, height), color));
        y += NET_DASH + NET_GAP;
    }
    vertices
}

/// Full frame: net underneath, then paddles and ball
pub fn scene(snapshot: &Snapshot, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = net(palette.net);
    vertices.extend(rect(&snapshot.left_paddle, palette.paddle));
    vertices.extend(rect(&snapshot.right_paddle, palette.paddle));
    vertices.extend(circle(
        snapshot.ball_center,
        snapshot.ball_radius,
        palette.ball,
        BALL_SEGMENTS,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_rect_corners() {
        let verts = rect(&Rect::new(10.0, 20.0, 15.0, 100.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!(v.position[0] == 10.0 || v.position[0] == 25.0);
            assert!(v.position[1] == 20.0 || v.position[1] == 120.0);
        }
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(400.0, 300.0);
        let verts = circle(center, 7.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 3);
        for v in &verts {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 7.0 + 1e-4);
        }
    }

    #[test]
    fn test_net_covers_field_height() {
        let verts = net([1.0; 4]);
        // 600 / 30 = 20 dashes
        assert_eq!(verts.len(), 20 * 6);
        assert!(verts.iter().all(|v| v.position[1] >= 0.0 && v.position[1] <= FIELD_HEIGHT));
    }

    #[test]
    fn test_scene_vertex_count() {
        let state = GameState::new(1);
        let verts = scene(&state.snapshot(), &Palette::default());
        assert_eq!(verts.len(), 20 * 6 + 2 * 6 + (BALL_SEGMENTS * 3) as usize);
    }
}
