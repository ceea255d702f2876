//! Scene controller: the single `revealed` flag, the heart list, and the
//! composition of sky, garden, button and caption into one visual tree.
//!
//! Emissions are not fire-and-forget timers. They sit in a pending queue
//! owned by the scene and are delivered by [`Scene::tick`], so tearing
//! the scene down (or calling [`Scene::cancel_pending`]) can never leave
//! dangling callbacks behind.

use crate::{
    core::{Affine, Rand, Rgba8, Vec2, Viewport},
    ease::Ease,
    error::GardenResult,
    eval::{self, SceneFrame},
    flower::garden_row,
    heart::{HeartInstance, heart_node},
    model::{Element, Motion, Node, Shape},
    sky::sky_nodes,
    timeline::{Animated, Timeline},
};

/// Hearts emitted per reveal.
pub const HEART_BURST: usize = 15;
/// Milliseconds between consecutive emissions. Due times are laid out on
/// this integer grid so an emission due at `t` is delivered by `tick(t)`
/// exactly, with no float drift across the burst.
pub const EMISSION_INTERVAL_MS: u64 = 200;
/// Seconds between consecutive emissions.
pub const EMISSION_INTERVAL: f64 = EMISSION_INTERVAL_MS as f64 / 1000.0;
/// Grass band height as a fraction of viewport height.
pub const GRASS_FRAC: f64 = 0.30;

pub const BUTTON_LABEL: &str = "Click Me \u{2764}\u{fe0f}";
pub const CAPTION: &str = "Flowers for my Flower \u{1f338}";

const BACKDROP_Z: i32 = -10;
const GRASS_Z: i32 = 1;
const OVERLAY_Z: i32 = 100;

const SKY_FILL: Rgba8 = Rgba8::rgb(0xb0, 0xe2, 0xff);
const GRASS_FILL: Rgba8 = Rgba8::rgb(0x32, 0xcd, 0x32);
const BUTTON_FILL: Rgba8 = Rgba8::rgb(0xff, 0x6b, 0x6b);
const BUTTON_TEXT_FILL: Rgba8 = Rgba8::rgb(0xff, 0xff, 0xff);
const CAPTION_FILL: Rgba8 = Rgba8::rgb(0xff, 0x40, 0x81);

#[derive(Clone, Copy, Debug)]
struct PendingEmission {
    due: f64,
    index: usize,
}

#[derive(Debug)]
pub struct Scene {
    viewport: Viewport,
    revealed: bool,
    revealed_at: Option<f64>,
    hearts: Vec<HeartInstance>,
    pending: Vec<PendingEmission>,
    rng: Rand,
}

impl Scene {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self {
            viewport,
            revealed: false,
            revealed_at: None,
            hearts: Vec::new(),
            pending: Vec::new(),
            rng: Rand::new(seed),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn hearts(&self) -> &[HeartInstance] {
        &self.hearts
    }

    pub fn pending_emissions(&self) -> usize {
        self.pending.len()
    }

    /// The one user action. The first call reveals the garden and
    /// schedules the heart burst; later calls are no-ops. Returns whether
    /// the call had any effect.
    pub fn activate(&mut self, now: f64) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.revealed_at = Some(now);
        for index in 0..HEART_BURST {
            let offset = (index as u64 * EMISSION_INTERVAL_MS) as f64 / 1000.0;
            self.pending.push(PendingEmission {
                due: now + offset,
                index,
            });
        }
        tracing::info!(at = now, scheduled = HEART_BURST, "garden revealed");
        true
    }

    /// Deliver every pending emission due by `now`, in due order.
    /// Returns the number of hearts emitted.
    pub fn tick(&mut self, now: f64) -> usize {
        self.pending.sort_by(|a, b| a.due.total_cmp(&b.due));
        let mut emitted = 0;
        while let Some(next) = self.pending.first().copied() {
            if next.due > now {
                break;
            }
            self.pending.remove(0);
            self.emit(next);
            emitted += 1;
        }
        emitted
    }

    /// Teardown guard: drop undelivered emissions. Returns how many were
    /// cancelled.
    pub fn cancel_pending(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    fn emit(&mut self, pending: PendingEmission) {
        // Due time in ms combined with the burst index keeps ids unique
        // even if two emissions share a millisecond.
        let due_ms = (pending.due * 1000.0).round().max(0.0) as u64;
        let id = due_ms
            .saturating_mul(HEART_BURST as u64 + 1)
            .saturating_add(pending.index as u64);
        let heart = HeartInstance {
            id,
            x: self.rng.uniform(0.0, self.viewport.width),
            y: self.viewport.height + self.rng.uniform(0.0, 100.0),
            born_at: pending.due,
        };
        tracing::debug!(id = heart.id, x = heart.x, "heart emitted");
        self.hearts.push(heart);
    }

    /// Compose the full visual tree for the current state.
    pub fn build(&self) -> GardenResult<Vec<Node>> {
        let vp = self.viewport;
        let mut nodes = Vec::new();

        nodes.push(Node::Leaf(
            Element::new(
                "backdrop",
                BACKDROP_Z,
                Shape::Rect {
                    width: vp.width,
                    height: vp.height,
                    radius: 0.0,
                },
            )
            .fill(SKY_FILL),
        ));

        nodes.extend(sky_nodes(vp));

        nodes.push(Node::Leaf(
            Element::new(
                "grass",
                GRASS_Z,
                Shape::Rect {
                    width: vp.width,
                    height: vp.height * GRASS_FRAC,
                    radius: 0.0,
                },
            )
            .fill(GRASS_FILL)
            .place(Affine::translate(Vec2::new(
                0.0,
                vp.height * (1.0 - GRASS_FRAC),
            ))),
        ));

        nodes.push(self.button_node());

        if let Some(reveal) = self.revealed_at {
            nodes.push(self.caption_node(reveal));
            for spec in garden_row() {
                nodes.push(spec.build(vp, reveal + spec.delay_secs())?);
            }
        }

        for heart in &self.hearts {
            nodes.push(heart_node(heart));
        }

        Ok(nodes)
    }

    /// Convenience: build and evaluate at `t`.
    pub fn frame(&self, t: f64) -> GardenResult<SceneFrame> {
        eval::evaluate(&self.build()?, t)
    }

    fn button_node(&self) -> Node {
        let vp = self.viewport;
        let (w, h) = if vp.is_narrow() { (160.0, 52.0) } else { (200.0, 66.0) };
        let label_px = if vp.is_narrow() { 20.0 } else { 24.0 };
        let center = Affine::translate(Vec2::new(vp.width / 2.0, vp.height / 2.0));

        // Once revealed, the button exits: fade and shrink over 0.3s,
        // then it is gone for good.
        let motion = match self.revealed_at {
            None => Motion::default(),
            Some(reveal) => Motion {
                opacity: Animated::from_to(1.0, 0.0, Timeline::once(reveal, 0.3, Ease::OutQuad)),
                scale: Animated::from_to(
                    Vec2::new(1.0, 1.0),
                    Vec2::new(0.8, 0.8),
                    Timeline::once(reveal, 0.3, Ease::OutQuad),
                ),
                ..Motion::default()
            },
        };

        Node::Group {
            id: "button".to_string(),
            place: center,
            motion,
            children: vec![
                Node::Leaf(
                    Element::new(
                        "button-face",
                        OVERLAY_Z,
                        Shape::Rect {
                            width: w,
                            height: h,
                            radius: h / 2.0,
                        },
                    )
                    .fill(BUTTON_FILL)
                    .place(Affine::translate(Vec2::new(-w / 2.0, -h / 2.0))),
                ),
                Node::Leaf(
                    Element::new(
                        "button-label",
                        OVERLAY_Z,
                        Shape::Text {
                            content: BUTTON_LABEL.to_string(),
                            size_px: label_px,
                        },
                    )
                    .fill(BUTTON_TEXT_FILL),
                ),
            ],
        }
    }

    fn caption_node(&self, reveal: f64) -> Node {
        let vp = self.viewport;
        let caption_px = if vp.is_narrow() { 32.0 } else { 48.0 };
        let timeline = Timeline::once(reveal + 0.5, 1.0, Ease::OutQuad);
        Node::Leaf(
            Element::new(
                "caption",
                OVERLAY_Z,
                Shape::Text {
                    content: CAPTION.to_string(),
                    size_px: caption_px,
                },
            )
            .fill(CAPTION_FILL)
            .place(Affine::translate(Vec2::new(
                vp.width / 2.0,
                vp.height * 0.4,
            )))
            .motion(Motion {
                opacity: Animated::from_to(0.0, 1.0, timeline),
                translate: Animated::from_to(Vec2::new(0.0, 20.0), Vec2::ZERO, timeline),
                ..Motion::default()
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(Viewport::new(1280.0, 720.0).unwrap(), 7)
    }

    #[test]
    fn fresh_scene_is_unrevealed_and_empty() {
        let s = scene();
        assert!(!s.revealed());
        assert!(s.hearts().is_empty());
        assert_eq!(s.pending_emissions(), 0);
    }

    #[test]
    fn activate_is_idempotent() {
        let mut s = scene();
        assert!(s.activate(1.0));
        assert!(s.revealed());
        assert_eq!(s.pending_emissions(), HEART_BURST);
        assert!(!s.activate(2.0));
        assert_eq!(s.pending_emissions(), HEART_BURST);
    }

    #[test]
    fn tick_delivers_emissions_at_200ms_intervals() {
        let mut s = scene();
        s.activate(0.0);
        // The first emission is due at the activation instant.
        assert_eq!(s.tick(0.0), 1);
        assert_eq!(s.tick(1.0), 5);
        assert_eq!(s.hearts().len(), 6);
        // The last timer fires at 14 * 0.2 = 2.8s.
        assert_eq!(s.tick(2.8), 9);
        assert_eq!(s.hearts().len(), HEART_BURST);
        assert_eq!(s.tick(100.0), 0);
    }

    #[test]
    fn hearts_have_unique_ids_and_in_range_spawns() {
        let mut s = scene();
        s.activate(0.5);
        s.tick(10.0);
        let hearts = s.hearts();
        assert_eq!(hearts.len(), HEART_BURST);
        for h in hearts {
            assert!((0.0..1280.0).contains(&h.x));
            assert!((720.0..820.0).contains(&h.y));
        }
        let mut ids: Vec<u64> = hearts.iter().map(|h| h.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), HEART_BURST);
    }

    #[test]
    fn cancel_pending_drops_undelivered_timers() {
        let mut s = scene();
        s.activate(0.0);
        s.tick(1.0);
        let delivered = s.hearts().len();
        assert_eq!(s.cancel_pending(), HEART_BURST - delivered);
        assert_eq!(s.tick(100.0), 0);
        assert_eq!(s.hearts().len(), delivered);
    }

    #[test]
    fn build_swaps_button_for_garden_on_reveal() {
        let mut s = scene();
        let before = s.build().unwrap();
        assert!(before.iter().any(|n| n.id() == "button"));
        assert!(!before.iter().any(|n| n.id().starts_with("flower-")));
        assert!(!before.iter().any(|n| n.id() == "caption"));

        s.activate(0.0);
        let after = s.build().unwrap();
        let flowers = after
            .iter()
            .filter(|n| n.id().starts_with("flower-"))
            .count();
        assert_eq!(flowers, 11);
        assert!(after.iter().any(|n| n.id() == "caption"));
    }

    #[test]
    fn same_seed_replays_the_same_hearts() {
        let mut a = scene();
        let mut b = scene();
        a.activate(0.0);
        b.activate(0.0);
        a.tick(3.0);
        b.tick(3.0);
        assert_eq!(a.hearts(), b.hearts());
    }
}
