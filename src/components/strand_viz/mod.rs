//! Layered radial visualization of strand goals and assessment moments.
//!
//! Renders a rotating 3D diagram on an HTML canvas:
//! - An outer goals ring plus one concentric inner ring per moment
//! - Item markers colored by a stable per-item assignment
//! - Smoothed connector curves tracing each item across the layers it recurs in
//! - Highlight filtering toggled per item by host events
//! - Orbit/dolly mouse controls around the layer stack
//!
//! # Example
//!
//! ```ignore
//! use strand_viz::{StrandVizCanvas, VizData};
//!
//! let data = VizData {
//!     strand_goals: vec!["g1".into(), "g2".into()],
//!     moments_assessment_points: vec![vec!["g1".into()], vec!["g2".into(), "g1".into()]],
//!     color_map: None,
//! };
//!
//! view! { <StrandVizCanvas data=Some(data).into() fullscreen=true /> }
//! ```

mod camera;
mod component;
pub mod config;
mod layout;
mod render;
mod scene;
mod state;
pub mod theme;
mod types;

pub use component::{BUILD_EVENT, SET_CURRENT_ITEM_EVENT, StrandVizCanvas};
pub use theme::Theme;
pub use types::{CurrentItemPayload, ItemId, VizData};
