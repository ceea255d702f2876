#![forbid(unsafe_code)]

pub mod core;
pub mod ease;
pub mod error;
pub mod eval;
pub mod flower;
pub mod heart;
pub mod model;
pub mod palette;
pub mod render_cpu;
pub mod scene;
pub mod sky;
pub mod text;
pub mod timeline;

pub use crate::core::{Rand, Rgba8, Transform2D, Viewport};
pub use ease::{Ease, Spring};
pub use error::{GardenError, GardenResult};
pub use eval::{ResolvedElement, SceneFrame, evaluate};
pub use flower::{FLOWER_ROW, FlowerSpec, garden_row};
pub use heart::HeartInstance;
pub use model::{Element, Motion, Node, Shape};
pub use palette::{Palette, Variant};
pub use render_cpu::{CpuRenderer, FrameRgba, RenderSettings};
pub use scene::{EMISSION_INTERVAL, HEART_BURST, Scene};
pub use text::{TextBrush, TextEngine};
pub use timeline::{Animated, Timeline, Track};
