//! Pure frame evaluation: visual tree + scene time in, flat z-sorted
//! element list out. No IO, no state.

use crate::{
    core::{Affine, Rgba8},
    error::{GardenError, GardenResult},
    model::{Node, Shape, Stroke},
};

#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneFrame {
    pub time: f64,
    pub elements: Vec<ResolvedElement>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ResolvedElement {
    pub id: String,
    pub z: i32,
    pub shape: Shape,
    pub fill: Option<Rgba8>,
    pub stroke: Option<Stroke>,
    pub transform: Affine,
    pub opacity: f64,
}

/// Resolve every visible element at scene time `t`. Elements whose
/// combined opacity is 0 (not yet entered, or fully faded out) are
/// dropped. Output order is z-ascending, insertion-stable within a layer.
#[tracing::instrument(skip(nodes))]
pub fn evaluate(nodes: &[Node], t: f64) -> GardenResult<SceneFrame> {
    let mut elements = Vec::new();
    for node in nodes {
        walk(node, Affine::IDENTITY, 1.0, t, &mut elements)?;
    }
    elements.sort_by_key(|e| e.z);
    Ok(SceneFrame { time: t, elements })
}

fn walk(
    node: &Node,
    parent: Affine,
    parent_opacity: f64,
    t: f64,
    out: &mut Vec<ResolvedElement>,
) -> GardenResult<()> {
    match node {
        Node::Leaf(el) => {
            el.motion
                .validate()
                .map_err(|e| GardenError::evaluation(format!("element '{}': {e}", el.id)))?;
            let opacity = parent_opacity * el.motion.opacity_at(t);
            if opacity <= 0.0 {
                return Ok(());
            }
            out.push(ResolvedElement {
                id: el.id.clone(),
                z: el.z,
                shape: el.shape.clone(),
                fill: el.fill,
                stroke: el.stroke,
                transform: parent * el.motion.transform_at(t) * el.place,
                opacity,
            });
            Ok(())
        }
        Node::Group {
            id,
            place,
            motion,
            children,
        } => {
            motion
                .validate()
                .map_err(|e| GardenError::evaluation(format!("group '{id}': {e}")))?;
            let opacity = parent_opacity * motion.opacity_at(t);
            if opacity <= 0.0 {
                return Ok(());
            }
            let transform = parent * motion.transform_at(t) * *place;
            for child in children {
                walk(child, transform, opacity, t, out)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::Vec2,
        ease::Ease,
        model::{Element, Motion, Node},
        timeline::{Animated, Timeline},
    };

    fn circle(id: &str, z: i32) -> Element {
        Element::new(id, z, Shape::Circle { radius: 1.0 })
    }

    #[test]
    fn output_is_z_sorted_and_insertion_stable() {
        let nodes = vec![
            Node::Leaf(circle("high", 10)),
            Node::Leaf(circle("low-a", 0)),
            Node::Leaf(circle("low-b", 0)),
        ];
        let frame = evaluate(&nodes, 0.0).unwrap();
        let ids: Vec<&str> = frame.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["low-a", "low-b", "high"]);
    }

    #[test]
    fn group_opacity_multiplies_into_children() {
        let half = Motion {
            opacity: Animated::constant(0.5),
            ..Motion::default()
        };
        let node = Node::Group {
            id: "g".into(),
            place: Affine::IDENTITY,
            motion: half.clone(),
            children: vec![Node::Leaf(circle("child", 0).motion(half))],
        };
        let frame = evaluate(std::slice::from_ref(&node), 0.0).unwrap();
        assert_eq!(frame.elements.len(), 1);
        assert!((frame.elements[0].opacity - 0.25).abs() < 1e-12);
    }

    #[test]
    fn invisible_elements_are_dropped() {
        let hidden = Motion {
            opacity: Animated::from_to(0.0, 1.0, Timeline::once(5.0, 1.0, Ease::Linear)),
            ..Motion::default()
        };
        let nodes = vec![Node::Leaf(circle("late", 0).motion(hidden))];
        assert!(evaluate(&nodes, 0.0).unwrap().elements.is_empty());
        assert_eq!(evaluate(&nodes, 6.0).unwrap().elements.len(), 1);
    }

    #[test]
    fn group_transforms_compose_into_children() {
        let shift = Motion {
            translate: Animated::constant(Vec2::new(10.0, 0.0)),
            ..Motion::default()
        };
        let node = Node::Group {
            id: "g".into(),
            place: Affine::IDENTITY,
            motion: shift,
            children: vec![Node::Leaf(
                circle("child", 0).place(Affine::translate(Vec2::new(0.0, 5.0))),
            )],
        };
        let frame = evaluate(std::slice::from_ref(&node), 0.0).unwrap();
        let origin = frame.elements[0].transform * kurbo::Point::ORIGIN;
        assert_eq!(origin, kurbo::Point::new(10.0, 5.0));
    }

    #[test]
    fn leaf_z_orders_across_group_boundaries() {
        let nodes = vec![
            Node::group(
                "g",
                vec![
                    Node::Leaf(circle("inner-high", 5)),
                    Node::Leaf(circle("inner-low", 1)),
                ],
            ),
            Node::Leaf(circle("outer-mid", 3)),
        ];
        let frame = evaluate(&nodes, 0.0).unwrap();
        let ids: Vec<&str> = frame.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["inner-low", "outer-mid", "inner-high"]);
    }

    #[test]
    fn invalid_motion_reports_the_offending_node() {
        let bad = Motion {
            opacity: Animated::keyed(vec![], vec![], Timeline::once(0.0, 1.0, Ease::Linear)),
            ..Motion::default()
        };
        let nodes = vec![Node::Leaf(circle("torn", 0).motion(bad))];
        let err = evaluate(&nodes, 0.0).unwrap_err();
        assert!(matches!(err, GardenError::Evaluation(_)));
        assert!(err.to_string().contains("torn"));
    }
}
