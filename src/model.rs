//! Declarative visual tree. Leaves carry a shape plus per-channel
//! animated transform parameters; groups compose placement, motion and
//! opacity over their children.

use crate::{
    core::{Affine, BezPath, Point, Rgba8, Transform2D, Vec2},
    error::GardenResult,
    timeline::Animated,
};

#[derive(Clone, Debug, serde::Serialize)]
pub enum Shape {
    Path(BezPath),
    Circle { radius: f64 },
    Line { from: Point, to: Point },
    Rect { width: f64, height: f64, radius: f64 },
    Text { content: String, size_px: f64 },
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Stroke {
    pub color: Rgba8,
    pub width: f64,
}

/// Animated transform channels for one node. `anchor` is the static pivot
/// the rotation and scale act around.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Motion {
    pub translate: Animated<Vec2>,
    pub rotation_deg: Animated<f64>,
    pub scale: Animated<Vec2>,
    pub opacity: Animated<f64>,
    pub anchor: Vec2,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            translate: Animated::constant(Vec2::ZERO),
            rotation_deg: Animated::constant(0.0),
            scale: Animated::constant(Vec2::new(1.0, 1.0)),
            opacity: Animated::constant(1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Motion {
    pub fn validate(&self) -> GardenResult<()> {
        self.translate.validate()?;
        self.rotation_deg.validate()?;
        self.scale.validate()?;
        self.opacity.validate()
    }

    pub fn transform_at(&self, t: f64) -> Affine {
        Transform2D {
            translate: self.translate.at(t),
            rotation_rad: self.rotation_deg.at(t).to_radians(),
            scale: self.scale.at(t),
            anchor: self.anchor,
        }
        .to_affine()
    }

    pub fn opacity_at(&self, t: f64) -> f64 {
        self.opacity.at(t).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct Element {
    pub id: String,
    pub z: i32,
    pub shape: Shape,
    pub fill: Option<Rgba8>,
    pub stroke: Option<Stroke>,
    /// Static local placement, applied before the animated channels.
    pub place: Affine,
    pub motion: Motion,
}

impl Element {
    pub fn new(id: impl Into<String>, z: i32, shape: Shape) -> Self {
        Self {
            id: id.into(),
            z,
            shape,
            fill: None,
            stroke: None,
            place: Affine::IDENTITY,
            motion: Motion::default(),
        }
    }

    pub fn fill(mut self, color: Rgba8) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Rgba8, width: f64) -> Self {
        self.stroke = Some(Stroke { color, width });
        self
    }

    pub fn place(mut self, place: Affine) -> Self {
        self.place = place;
        self
    }

    pub fn motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }
}

/// Groups carry no z of their own; stacking is decided per leaf so
/// elements from different subtrees can interleave.
#[derive(Clone, Debug, serde::Serialize)]
pub enum Node {
    Leaf(Element),
    Group {
        id: String,
        place: Affine,
        motion: Motion,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn group(id: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Group {
            id: id.into(),
            place: Affine::IDENTITY,
            motion: Motion::default(),
            children,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Leaf(el) => &el.id,
            Self::Group { id, .. } => id,
        }
    }

    /// Number of leaf elements in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group { children, .. } => children.iter().map(Node::leaf_count).sum(),
        }
    }

    pub fn validate(&self) -> GardenResult<()> {
        match self {
            Self::Leaf(el) => el.motion.validate(),
            Self::Group {
                motion, children, ..
            } => {
                motion.validate()?;
                children.iter().try_for_each(Node::validate)
            }
        }
    }
}
