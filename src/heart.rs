//! Heart emitter: one upward-drifting, fading heart per emission. The
//! horizontal wander is derived from the heart id so a scene replays
//! identically for a given seed.

use crate::{
    core::{Affine, BezPath, Rgba8, Vec2, stable_hash64},
    ease::Ease,
    model::{Element, Motion, Node, Shape},
    timeline::{Animated, Timeline},
};
use kurbo::Shape as _;

pub const HEART_Z: i32 = 200;
pub const HEART_FILL: Rgba8 = Rgba8::rgb(0xff, 0x40, 0x81);
pub const DRIFT_SECS: f64 = 4.0;
/// Maximum horizontal wander either way, in px.
pub const WANDER: f64 = 100.0;

const BODY: f64 = 30.0;

/// One emitted heart. Never mutated after emission; the exit is purely
/// visual (opacity reaches 0 at `born_at + DRIFT_SECS`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeartInstance {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub born_at: f64,
}

/// Horizontal drift endpoint offset in [-WANDER, WANDER), keyed by id.
pub fn wander(id: u64) -> f64 {
    let h = stable_hash64(id, "heart-wander");
    let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
    -WANDER + 2.0 * WANDER * unit
}

/// The CSS-style heart: a square with two round lobes, rotated 45
/// degrees about its center.
fn heart_path() -> BezPath {
    let mut path = kurbo::Rect::new(0.0, 0.0, BODY, BODY).to_path(0.1);
    for el in kurbo::Circle::new((0.0, BODY / 2.0), BODY / 2.0).path_elements(0.1) {
        path.push(el);
    }
    for el in kurbo::Circle::new((BODY / 2.0, 0.0), BODY / 2.0).path_elements(0.1) {
        path.push(el);
    }
    path
}

pub fn heart_node(heart: &HeartInstance) -> Node {
    let timeline = Timeline::once(heart.born_at, DRIFT_SECS, Ease::OutQuad);
    let times = vec![0.0, 0.2, 0.8, 1.0];

    let motion = Motion {
        translate: Animated::from_to(
            Vec2::new(heart.x, heart.y),
            Vec2::new(heart.x + wander(heart.id), -100.0),
            timeline,
        ),
        scale: Animated::keyed(
            times.clone(),
            vec![
                Vec2::ZERO,
                Vec2::new(1.0, 1.0),
                Vec2::new(0.8, 0.8),
                Vec2::new(1.0, 1.0),
            ],
            timeline,
        ),
        opacity: Animated::keyed(times, vec![0.0, 1.0, 1.0, 0.0], timeline),
        anchor: Vec2::new(BODY / 2.0, BODY / 2.0),
        ..Motion::default()
    };

    let center = Affine::translate(Vec2::new(BODY / 2.0, BODY / 2.0));
    Node::Leaf(
        Element::new(format!("heart-{}", heart.id), HEART_Z, Shape::Path(heart_path()))
            .fill(HEART_FILL)
            .place(center * Affine::rotate(45f64.to_radians()) * center.inverse())
            .motion(motion),
    )
}
