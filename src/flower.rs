//! Procedural flower construction. Every flower is a nested group:
//! an entrance wrapper (rise + fade + pop), a perpetual sway group
//! (rotate-and-bob wind cycle), and the stem/head geometry, all staggered
//! off the flower's own delay.

use crate::{
    core::{Affine, BezPath, Point, Rgba8, Vec2, Viewport},
    ease::{Ease, Spring},
    error::{GardenError, GardenResult},
    model::{Element, Motion, Node, Shape},
    palette::{Family, Palette, Variant},
    timeline::{Animated, Timeline},
};

/// The fixed garden row, left to right.
pub const FLOWER_ROW: [Variant; 11] = [
    Variant::RoseRed,
    Variant::LilyWhite,
    Variant::RosePink,
    Variant::LilyOrange,
    Variant::RoseWhite,
    Variant::LilyPink,
    Variant::RoseRed,
    Variant::LilyWhite,
    Variant::RosePink,
    Variant::LilyOrange,
    Variant::RoseRed,
];

pub const STEM_HEIGHT: f64 = 160.0;
pub const GARDEN_Z: i32 = 3;

const ROSE_PETAL_PATHS: [&str; 3] = [
    "M0,0 C5,-5 10,-5 15,0 C20,5 20,10 15,15 C10,20 5,20 0,15 C-5,10 -5,5 0,0",
    "M-5,-5 C0,-10 5,-10 10,-5 C15,0 15,5 10,10 C5,15 0,15 -5,10 C-10,5 -10,0 -5,-5",
    "M5,-10 C10,-15 15,-15 20,-10 C25,-5 25,0 20,5 C15,10 10,10 5,5 C0,0 0,-5 5,-10",
];

// The rose center reuses the first petal curl as a tight spiral.
const ROSE_CENTER_PATH: &str = ROSE_PETAL_PATHS[0];

const LILY_PETAL_PATH: &str =
    "M0,-40 C10,-30 20,-20 20,0 C20,20 10,30 0,40 C-10,30 -20,20 -20,0 C-20,-20 -10,-30 0,-40";

const ENTER_SPRING: Spring = Spring::new(100.0, 10.0);
const ROSE_PETAL_SPRING: Spring = Spring::new(100.0, 10.0);
const LILY_PETAL_SPRING: Spring = Spring::new(80.0, 12.0);

const STEM_FILL: Rgba8 = Rgba8::rgb(0x4c, 0xaf, 0x50);
const LEAF_FILL: Rgba8 = Rgba8::rgb(0x2e, 0x7d, 0x32);

/// One slot in the garden row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FlowerSpec {
    pub variant: Variant,
    pub index: usize,
}

impl FlowerSpec {
    /// Horizontal position as percent of viewport width.
    pub fn position_pct(self) -> f64 {
        self.index as f64 * 8.0
    }

    /// Entrance stagger within the reveal, in seconds.
    pub fn delay_secs(self) -> f64 {
        self.index as f64 * 0.2
    }

    /// Build the flower's visual tree. `delay` is absolute scene time:
    /// the caller adds the reveal instant to [`FlowerSpec::delay_secs`].
    pub fn build(self, viewport: Viewport, delay: f64) -> GardenResult<Node> {
        let x = self.position_pct() / 100.0 * viewport.width;
        let ground = Affine::translate(Vec2::new(x, viewport.height))
            * Affine::scale(viewport.flower_scale());

        let head = match self.variant.family() {
            Family::Rose => self.rose_head(delay)?,
            Family::Lily => self.lily_head(delay)?,
        };

        let mut parts = self.stem(delay);
        parts.push(head);

        let sway = Node::Group {
            id: format!("sway-{}", self.index),
            place: Affine::IDENTITY,
            motion: Motion {
                rotation_deg: Animated::keyed(
                    vec![0.0, 0.25, 0.5, 0.75, 1.0],
                    vec![0.0, 2.0, 0.0, -2.0, 0.0],
                    Timeline::forever(delay, 4.0, Ease::InOutQuad, true),
                ),
                translate: Animated::keyed(
                    vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0],
                    vec![
                        Vec2::ZERO,
                        Vec2::ZERO,
                        Vec2::new(0.0, -3.0),
                        Vec2::ZERO,
                        Vec2::new(0.0, -2.0),
                        Vec2::ZERO,
                    ],
                    Timeline::forever(delay, 4.0, Ease::InOutQuad, true),
                ),
                ..Motion::default()
            },
            children: vec![Node::group(format!("parts-{}", self.index), parts)],
        };

        Ok(Node::Group {
            id: format!("flower-{}-{}", self.index, self.variant.as_str()),
            place: ground,
            motion: Motion {
                translate: Animated::from_to(
                    Vec2::new(0.0, 100.0),
                    Vec2::ZERO,
                    Timeline::spring(delay, ENTER_SPRING),
                ),
                opacity: Animated::from_to(0.0, 1.0, Timeline::spring(delay, ENTER_SPRING)),
                scale: Animated::from_to(
                    Vec2::ZERO,
                    Vec2::new(1.0, 1.0),
                    Timeline::once(delay, 0.8, Ease::OutCubic),
                ),
                ..Motion::default()
            },
            children: vec![sway],
        })
    }

    fn stem(self, delay: f64) -> Vec<Node> {
        let grow = Motion {
            scale: Animated::from_to(
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Timeline::spring(delay, ENTER_SPRING),
            ),
            ..Motion::default()
        };
        let stem = Element::new(
            format!("stem-{}", self.index),
            GARDEN_Z,
            Shape::Rect {
                width: 4.0,
                height: STEM_HEIGHT,
                radius: 2.0,
            },
        )
        .fill(STEM_FILL)
        .place(Affine::translate(Vec2::new(-2.0, -STEM_HEIGHT)))
        .motion(grow);

        let flare = |id: String, place: Affine| {
            Node::Leaf(
                Element::new(
                    id,
                    GARDEN_Z,
                    Shape::Rect {
                        width: 40.0,
                        height: 3.0,
                        radius: 2.0,
                    },
                )
                .fill(LEAF_FILL)
                .place(place)
                .motion(Motion {
                    opacity: Animated::from_to(
                        0.0,
                        1.0,
                        Timeline::once(delay + 0.5, 0.5, Ease::OutQuad),
                    ),
                    ..Motion::default()
                }),
            )
        };

        vec![
            Node::Leaf(stem),
            flare(
                format!("leaf-left-{}", self.index),
                Affine::translate(Vec2::new(-2.0, -STEM_HEIGHT * 0.6))
                    * Affine::rotate((-45.0f64).to_radians())
                    * Affine::translate(Vec2::new(-40.0, 0.0)),
            ),
            flare(
                format!("leaf-right-{}", self.index),
                Affine::translate(Vec2::new(2.0, -STEM_HEIGHT * 0.4))
                    * Affine::rotate(45.0f64.to_radians()),
            ),
        ]
    }

    fn rose_head(self, delay: f64) -> GardenResult<Node> {
        let palette = Palette::of(self.variant);
        let mut children = Vec::with_capacity(16);

        children.push(Node::Leaf(
            Element::new(
                format!("rose-center-{}", self.index),
                GARDEN_Z,
                Shape::Path(petal_path(ROSE_CENTER_PATH)?),
            )
            .fill(palette.primary)
            .motion(pop_in(Timeline::once(delay + 0.5, 1.0, Ease::OutQuad))),
        ));

        let petals: [BezPath; 3] = [
            petal_path(ROSE_PETAL_PATHS[0])?,
            petal_path(ROSE_PETAL_PATHS[1])?,
            petal_path(ROSE_PETAL_PATHS[2])?,
        ];

        for layer in 0..5usize {
            let layer_rot = Affine::rotate((layer as f64 * 72.0).to_radians());
            let fill = palette.variations[layer % palette.variations.len()];
            for (i, petal) in petals.iter().enumerate() {
                let place = layer_rot
                    * Affine::rotate((i as f64 * 120.0).to_radians())
                    * Affine::scale(1.0 + layer as f64 * 0.3);
                let stagger = delay + 0.7 + layer as f64 * 0.2 + i as f64 * 0.1;
                children.push(Node::Leaf(
                    Element::new(
                        format!("rose-petal-{}-{layer}-{i}", self.index),
                        GARDEN_Z,
                        Shape::Path(petal.clone()),
                    )
                    .fill(fill)
                    .stroke(palette.stroke, 2.0)
                    .place(place)
                    .motion(pop_in(Timeline::spring(stagger, ROSE_PETAL_SPRING))),
                ));
            }
        }

        Ok(Node::Group {
            id: format!("rose-head-{}", self.index),
            place: Affine::translate(Vec2::new(0.0, -STEM_HEIGHT)),
            motion: Motion::default(),
            children,
        })
    }

    fn lily_head(self, delay: f64) -> GardenResult<Node> {
        let palette = Palette::of(self.variant);
        let mut children = Vec::with_capacity(13);

        children.push(Node::Leaf(
            Element::new(
                format!("lily-center-{}", self.index),
                GARDEN_Z,
                Shape::Circle { radius: 10.0 },
            )
            .fill(palette.secondary)
            .motion(pop_in(Timeline::once(delay + 0.5, 0.5, Ease::OutQuad))),
        ));

        let petal = petal_path(LILY_PETAL_PATH)?;
        for i in 0..6usize {
            let angle = i as f64 * 60.0;
            children.push(Node::Leaf(
                Element::new(
                    format!("lily-petal-{}-{i}", self.index),
                    GARDEN_Z,
                    Shape::Path(petal.clone()),
                )
                .fill(palette.variations[i % palette.variations.len()])
                .stroke(palette.stroke, 2.0)
                .place(Affine::rotate(angle.to_radians()))
                .motion(pop_in(Timeline::spring(
                    delay + 0.7 + i as f64 * 0.1,
                    LILY_PETAL_SPRING,
                ))),
            ));
        }

        for i in 0..6usize {
            let theta = (i as f64 * 60.0).to_radians();
            children.push(Node::Leaf(
                Element::new(
                    format!("lily-stamen-{}-{i}", self.index),
                    GARDEN_Z,
                    Shape::Line {
                        from: Point::ORIGIN,
                        to: Point::new(15.0 * theta.cos(), 15.0 * theta.sin()),
                    },
                )
                .stroke(palette.stroke, 2.0)
                .motion(pop_in(Timeline::once(
                    delay + 1.0 + i as f64 * 0.1,
                    0.5,
                    Ease::OutQuad,
                ))),
            ));
        }

        Ok(Node::Group {
            id: format!("lily-head-{}", self.index),
            place: Affine::translate(Vec2::new(0.0, -STEM_HEIGHT)),
            motion: Motion::default(),
            children,
        })
    }
}

/// Scale-and-fade entrance shared by petals and centers.
fn pop_in(timeline: Timeline) -> Motion {
    Motion {
        scale: Animated::from_to(Vec2::ZERO, Vec2::new(1.0, 1.0), timeline),
        opacity: Animated::from_to(0.0, 1.0, timeline),
        ..Motion::default()
    }
}

fn petal_path(d: &str) -> GardenResult<BezPath> {
    BezPath::from_svg(d).map_err(|e| GardenError::validation(format!("invalid petal path: {e}")))
}

/// The 11 fixed descriptors of the garden row.
pub fn garden_row() -> [FlowerSpec; 11] {
    std::array::from_fn(|index| FlowerSpec {
        variant: FLOWER_ROW[index],
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0).unwrap()
    }

    #[test]
    fn position_and_delay_are_pure_in_index() {
        for (i, spec) in garden_row().iter().enumerate() {
            assert_eq!(spec.position_pct(), i as f64 * 8.0);
            assert_eq!(spec.delay_secs(), i as f64 * 0.2);
        }
    }

    #[test]
    fn row_has_eleven_flowers_in_fixed_order() {
        let row = garden_row();
        assert_eq!(row.len(), 11);
        assert_eq!(row[0].variant, Variant::RoseRed);
        assert_eq!(row[5].variant, Variant::LilyPink);
        assert_eq!(row[10].variant, Variant::RoseRed);
    }

    #[test]
    fn rose_tree_has_expected_shape_counts() {
        let spec = FlowerSpec {
            variant: Variant::RoseRed,
            index: 0,
        };
        let node = spec.build(viewport(), 0.0).unwrap();
        node.validate().unwrap();
        // stem + 2 leaf flares + center + 5 layers x 3 petals
        assert_eq!(node.leaf_count(), 3 + 1 + 15);
    }

    #[test]
    fn lily_tree_has_expected_shape_counts() {
        let spec = FlowerSpec {
            variant: Variant::LilyOrange,
            index: 3,
        };
        let node = spec.build(viewport(), 0.6).unwrap();
        node.validate().unwrap();
        // stem + 2 leaf flares + center + 6 petals + 6 stamens
        assert_eq!(node.leaf_count(), 3 + 1 + 6 + 6);
    }

    #[test]
    fn petal_paths_parse() {
        for d in ROSE_PETAL_PATHS {
            petal_path(d).unwrap();
        }
        petal_path(LILY_PETAL_PATH).unwrap();
    }
}
