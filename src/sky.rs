//! Ambient sky: looping clouds and bobbing birds. Stateless and fully
//! parameter-driven from the fixed descriptors below; nothing here reacts
//! to scene state.

use crate::{
    core::{Affine, Point, Rgba8, Vec2, Viewport},
    ease::Ease,
    model::{Element, Motion, Node, Shape},
    timeline::{Animated, Timeline},
};

pub const SKY_Z: i32 = 0;

const CLOUD_FILL: Rgba8 = Rgba8::rgba(0xff, 0xff, 0xff, 230);
const BIRD_STROKE: Rgba8 = Rgba8::rgb(0x33, 0x33, 0x33);

#[derive(Clone, Copy, Debug)]
pub struct CloudSpec {
    pub size: f64,
    /// Vertical position as a fraction of viewport height.
    pub y_frac: f64,
    pub duration: f64,
    pub start_x: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct BirdSpec {
    pub y: f64,
    pub duration: f64,
    pub delay: f64,
    pub start_x: f64,
}

pub const CLOUDS: [CloudSpec; 4] = [
    CloudSpec { size: 120.0, y_frac: 0.10, duration: 80.0, start_x: -200.0 },
    CloudSpec { size: 80.0, y_frac: 0.15, duration: 65.0, start_x: -400.0 },
    CloudSpec { size: 100.0, y_frac: 0.05, duration: 75.0, start_x: -600.0 },
    CloudSpec { size: 90.0, y_frac: 0.20, duration: 70.0, start_x: -800.0 },
];

pub const BIRDS: [BirdSpec; 4] = [
    BirdSpec { y: 100.0, duration: 15.0, delay: 0.0, start_x: -50.0 },
    BirdSpec { y: 150.0, duration: 18.0, delay: 2.0, start_x: -50.0 },
    BirdSpec { y: 80.0, duration: 20.0, delay: 4.0, start_x: -50.0 },
    BirdSpec { y: 120.0, duration: 17.0, delay: 6.0, start_x: -50.0 },
];

/// All ambient sky nodes for a viewport. Pure; looping timelines never end.
pub fn sky_nodes(viewport: Viewport) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(CLOUDS.len() + BIRDS.len());
    for (i, cloud) in CLOUDS.iter().enumerate() {
        nodes.push(cloud_node(i, cloud, viewport));
    }
    for (i, bird) in BIRDS.iter().enumerate() {
        nodes.push(bird_node(i, bird, viewport));
    }
    nodes
}

fn cloud_node(i: usize, spec: &CloudSpec, viewport: Viewport) -> Node {
    let y = spec.y_frac * viewport.height;
    let enter_x = -100.0;
    let exit_x = viewport.width + 100.0;

    // A cloud seeded further left takes proportionally longer to first
    // reach the viewport edge; afterwards every loop runs edge to edge.
    let span = exit_x - enter_x;
    let first_entry = (enter_x - spec.start_x).max(0.0) / span * spec.duration;

    let sweep = Motion {
        translate: Animated::from_to(
            Vec2::new(enter_x, y),
            Vec2::new(exit_x, y),
            Timeline::forever(first_entry, spec.duration, Ease::Linear, false),
        ),
        ..Motion::default()
    };

    let s = spec.size;
    let body = Element::new(
        format!("cloud-body-{i}"),
        SKY_Z,
        Shape::Rect {
            width: s,
            height: s * 0.4,
            radius: s * 0.2,
        },
    )
    .fill(CLOUD_FILL);
    let puff = |id: String, radius: f64, center: Vec2| {
        Node::Leaf(
            Element::new(id, SKY_Z, Shape::Circle { radius })
                .fill(CLOUD_FILL)
                .place(Affine::translate(center)),
        )
    };

    Node::Group {
        id: format!("cloud-{i}"),
        place: Affine::IDENTITY,
        motion: sweep,
        children: vec![
            Node::Leaf(body),
            puff(format!("cloud-puff-a-{i}"), s * 0.3, Vec2::new(s * 0.5, s * 0.1)),
            puff(format!("cloud-puff-b-{i}"), s * 0.2, Vec2::new(s * 0.6, s * 0.1)),
        ],
    }
}

fn bird_node(i: usize, spec: &BirdSpec, viewport: Viewport) -> Node {
    let enter = Vec2::new(spec.start_x, spec.y);
    let exit = Vec2::new(viewport.width + 50.0, spec.y);

    // The per-bird delay pads each loop cycle: the bird holds offscreen
    // for `delay` seconds, then sweeps for `duration`.
    let cycle = spec.delay + spec.duration;
    let sweep = if spec.delay > 0.0 {
        Animated::keyed(
            vec![0.0, spec.delay / cycle, 1.0],
            vec![enter, enter, exit],
            Timeline::forever(0.0, cycle, Ease::Linear, false),
        )
    } else {
        Animated::from_to(enter, exit, Timeline::forever(0.0, cycle, Ease::Linear, false))
    };

    let flutter = Motion {
        translate: Animated::keyed(
            vec![0.0, 0.5, 1.0],
            vec![Vec2::ZERO, Vec2::new(0.0, -20.0), Vec2::ZERO],
            Timeline::forever(0.0, 2.0, Ease::InOutQuad, false),
        ),
        rotation_deg: Animated::keyed(
            vec![0.0, 0.25, 0.5, 0.75, 1.0],
            vec![0.0, 5.0, 0.0, -5.0, 0.0],
            Timeline::forever(0.0, 2.0, Ease::InOutQuad, false),
        ),
        ..Motion::default()
    };

    let wing = |id: String, deg: f64| {
        Node::Leaf(
            Element::new(
                id,
                SKY_Z,
                Shape::Line {
                    from: Point::ORIGIN,
                    to: Point::new(15.0, 0.0),
                },
            )
            .stroke(BIRD_STROKE, 3.0)
            .place(Affine::rotate(deg.to_radians())),
        )
    };

    Node::Group {
        id: format!("bird-{i}"),
        place: Affine::IDENTITY,
        motion: Motion {
            translate: sweep,
            ..Motion::default()
        },
        children: vec![Node::Group {
            id: format!("bird-body-{i}"),
            place: Affine::IDENTITY,
            motion: flutter,
            children: vec![
                wing(format!("bird-wing-l-{i}"), -30.0),
                wing(format!("bird-wing-r-{i}"), 30.0),
            ],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0).unwrap()
    }

    #[test]
    fn four_clouds_and_four_birds() {
        let nodes = sky_nodes(viewport());
        assert_eq!(nodes.len(), 8);
        let clouds = nodes.iter().filter(|n| n.id().starts_with("cloud-")).count();
        let birds = nodes.iter().filter(|n| n.id().starts_with("bird-")).count();
        assert_eq!(clouds, 4);
        assert_eq!(birds, 4);
    }

    #[test]
    fn cloud_sweep_loops_edge_to_edge() {
        let vp = viewport();
        let node = cloud_node(0, &CLOUDS[0], vp);
        let Node::Group { motion, .. } = &node else {
            panic!("cloud is a group");
        };
        // First cycle begins after the stagger pre-roll.
        let first_entry = (-100.0 - CLOUDS[0].start_x) / (vp.width + 200.0) * CLOUDS[0].duration;
        let start = motion.translate.at(first_entry);
        assert_eq!(start.x, -100.0);
        let mid = motion.translate.at(first_entry + CLOUDS[0].duration / 2.0);
        assert!((mid.x - (vp.width / 2.0)).abs() < 1.0);
        // One full cycle later it is back at the left edge.
        let wrapped = motion.translate.at(first_entry + CLOUDS[0].duration);
        assert_eq!(wrapped.x, -100.0);
    }

    #[test]
    fn bird_holds_offscreen_for_its_delay() {
        let vp = viewport();
        let node = bird_node(1, &BIRDS[1], vp);
        let Node::Group { motion, .. } = &node else {
            panic!("bird is a group");
        };
        // BIRDS[1] waits 2s per cycle before sweeping.
        assert_eq!(motion.translate.at(0.0).x, -50.0);
        assert_eq!(motion.translate.at(1.9).x, -50.0);
        assert!(motion.translate.at(3.0).x > -50.0);
    }

    #[test]
    fn bird_bob_amplitude_is_twenty() {
        let node = bird_node(0, &BIRDS[0], viewport());
        let Node::Group { children, .. } = &node else {
            panic!("bird is a group");
        };
        let Node::Group { motion, .. } = &children[0] else {
            panic!("bird body is a group");
        };
        // Bob bottoms out mid-cycle.
        assert_eq!(motion.translate.at(1.0).y, -20.0);
        assert_eq!(motion.translate.at(0.0).y, 0.0);
        assert_eq!(motion.translate.at(2.0).y, 0.0);
    }
}
