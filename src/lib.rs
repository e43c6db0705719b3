//! strand-viz: Interactive 3D radial visualization of strand goals and
//! assessment moments.
//!
//! This crate provides a WASM-based visualization component that renders a
//! hierarchy of goal items on an outer ring and per-moment assessment points
//! on concentric inner rings, with smoothed connector curves tracing each
//! item across layers and per-item highlight filtering driven by host events.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::strand_viz::{StrandVizCanvas, Theme, VizData};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("strand-viz: logging initialized");
}

/// Load the initial dataset from a script element with id="strand-viz-data".
/// Expected format: JSON with { strand_goals: [...], moments_assessment_points: [[...]] }
fn load_viz_data() -> Option<VizData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("strand-viz-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<VizData>(&json_text) {
		Ok(data) => {
			info!(
				"strand-viz: loaded {} goals, {} moments",
				data.strand_goals.len(),
				data.moments_assessment_points.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("strand-viz: failed to parse viz data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the dataset from the DOM and renders the radial visualization.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// Load the dataset from the DOM; build events can replace it later.
	let viz_data = load_viz_data();
	let data_signal = Signal::derive(move || viz_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Strand Relationships" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-viz">
			<StrandVizCanvas data=data_signal fullscreen=true />
			<div class="viz-overlay">
				<h1>"Strand Relationships"</h1>
				<p class="subtitle">"Drag to orbit. Scroll to zoom."</p>
			</div>
		</div>
	}
}
