//! Leptos component wrapping the strand visualization canvas.
//!
//! The component creates an HTML canvas element, subscribes to the host's
//! inbound events (`strand-viz:build`, `strand-viz:set-current-item`), and
//! wires up mouse handlers for orbiting and dollying the camera. An animation
//! loop runs via `requestAnimationFrame`, rotating the scene and rendering
//! each frame until the component is torn down.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, CustomEvent, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::camera::OrbitCamera;
use super::config::VizConfig;
use super::render;
use super::scene::VizScene;
use super::state::VizState;
use super::theme::Theme;
use super::types::{CurrentItemPayload, VizData};

/// Inbound event replacing the whole dataset.
pub const BUILD_EVENT: &str = "strand-viz:build";
/// Inbound event toggling one item's highlight membership.
pub const SET_CURRENT_ITEM_EVENT: &str = "strand-viz:set-current-item";

/// Bundles the component-local state with the scene graph it drives and the
/// camera/config/theme the render loop reads.
struct VizContext {
	state: VizState,
	scene: VizScene,
	camera: OrbitCamera,
	config: VizConfig,
	theme: Theme,
}

/// Recompose the scene from the current state. The scene is a pure function
/// of `(dataset, colors, highlight)`, so this is safe to call after any state
/// mutation.
fn rebuild_scene(c: &mut VizContext) {
	c.scene.rebuild(
		&c.state.goals,
		&c.state.moments,
		&c.state.colors,
		&c.state.highlight,
		&c.config,
	);
}

/// Deserialize a custom event's detail. Accepts either a JSON string or a
/// plain JS object (stringified first). Malformed payloads are logged and
/// dropped.
fn event_detail<T: DeserializeOwned>(event: &CustomEvent) -> Option<T> {
	let detail = event.detail();
	let json = detail.as_string().or_else(|| {
		js_sys::JSON::stringify(&detail)
			.ok()
			.and_then(|s| s.as_string())
	})?;

	match serde_json::from_str(&json) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("strand-viz: malformed event detail: {}", e);
			None
		}
	}
}

/// Renders the layered radial relationship diagram on a canvas element.
///
/// Pass the initial dataset via the reactive `data` signal; later datasets
/// arrive through the [`BUILD_EVENT`] custom event on `window`, and highlight
/// toggles through [`SET_CURRENT_ITEM_EVENT`]. The component sizes itself to
/// its parent container by default; set `fullscreen = true` to fill the
/// viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing. Set `transparent = true` when
/// embedding over a host-styled page.
#[component]
pub fn StrandVizCanvas(
	#[prop(into)] data: Signal<Option<VizData>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = false)] transparent: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<VizContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let build_cb: Rc<RefCell<Option<Closure<dyn FnMut(CustomEvent)>>>> =
		Rc::new(RefCell::new(None));
	let set_item_cb: Rc<RefCell<Option<Closure<dyn FnMut(CustomEvent)>>>> =
		Rc::new(RefCell::new(None));
	let running: Rc<Cell<bool>> = Rc::new(Cell::new(true));
	let started: Rc<Cell<bool>> = Rc::new(Cell::new(false));

	let (context_init, animate_init, resize_cb_init, build_cb_init, set_item_cb_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		build_cb.clone(),
		set_item_cb.clone(),
	);
	let (running_init, started_init) = (running.clone(), started.clone());

	Effect::new(move |_| {
		let data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if started_init.get() {
			// Reactive dataset replacement after mount.
			if let Some(data) = data {
				if let Some(ref mut c) = *context_init.borrow_mut() {
					c.state.load(&data, &c.theme.palette);
					rebuild_scene(c);
				}
			}
			return;
		}
		started_init.set(true);

		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let config = VizConfig::default();
		let camera = OrbitCamera::new(&config.camera);
		let theme = if transparent {
			Theme::embedded()
		} else {
			Theme::default()
		};

		let mut state = VizState::new(w, h);
		if let Some(ref data) = data {
			state.load(data, &theme.palette);
			info!(
				"strand-viz: mounted with {} goals, {} moments",
				state.goals.len(),
				state.moments.len()
			);
		}

		let mut viz = VizContext {
			state,
			scene: VizScene::new(),
			camera,
			config,
			theme,
		};
		rebuild_scene(&mut viz);
		*context_init.borrow_mut() = Some(viz);

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let context_build = context_init.clone();
		*build_cb_init.borrow_mut() = Some(Closure::new(move |ev: CustomEvent| {
			let Some(data) = event_detail::<VizData>(&ev) else {
				return;
			};
			if let Some(ref mut c) = *context_build.borrow_mut() {
				info!(
					"strand-viz: build event with {} goals, {} moments",
					data.strand_goals.len(),
					data.moments_assessment_points.len()
				);
				c.state.load(&data, &c.theme.palette);
				rebuild_scene(c);
			}
		}));
		if let Some(ref cb) = *build_cb_init.borrow() {
			let _ =
				window.add_event_listener_with_callback(BUILD_EVENT, cb.as_ref().unchecked_ref());
		}

		let context_item = context_init.clone();
		*set_item_cb_init.borrow_mut() = Some(Closure::new(move |ev: CustomEvent| {
			let Some(payload) = event_detail::<CurrentItemPayload>(&ev) else {
				return;
			};
			if let Some(ref mut c) = *context_item.borrow_mut() {
				let highlighted = c.state.toggle_item(&payload.id);
				debug!(
					"strand-viz: item {} {}",
					payload.id,
					if highlighted { "highlighted" } else { "released" }
				);
				rebuild_scene(c);
			}
		}));
		if let Some(ref cb) = *set_item_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback(
				SET_CURRENT_ITEM_EVENT,
				cb.as_ref().unchecked_ref(),
			);
		}

		let (context_anim, animate_inner, running_anim) = (
			context_init.clone(),
			animate_init.clone(),
			running_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.get() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				c.state.tick(dt, &c.config);
				render::render(&c.state, &c.scene, &ctx, &c.camera, &c.config, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (context_cl, animate_cl, resize_cl, build_cl, set_item_cl, running_cl) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		build_cb.clone(),
		set_item_cb.clone(),
		running.clone(),
	);
	on_cleanup(move || {
		// Stop the loop first so a queued frame never touches a torn-down canvas.
		running_cl.set(false);
		if let Some(window) = web_sys::window() {
			if let Some(cb) = resize_cl.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			if let Some(cb) = build_cl.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback(BUILD_EVENT, cb.as_ref().unchecked_ref());
			}
			if let Some(cb) = set_item_cl.borrow_mut().take() {
				let _ = window.remove_event_listener_with_callback(
					SET_CURRENT_ITEM_EVENT,
					cb.as_ref().unchecked_ref(),
				);
			}
		}
		animate_cl.borrow_mut().take();
		context_cl.borrow_mut().take();
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.orbit.active = true;
			c.state.orbit.last_x = ev.client_x() as f64;
			c.state.orbit.last_y = ev.client_y() as f64;
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if !c.state.orbit.active {
				return;
			}
			let (x, y) = (ev.client_x() as f64, ev.client_y() as f64);
			let (dx, dy) = (x - c.state.orbit.last_x, y - c.state.orbit.last_y);
			c.state.orbit.last_x = x;
			c.state.orbit.last_y = y;

			let speed = c.config.camera.orbit_speed;
			c.camera.orbit(-dx * speed, dy * speed);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.orbit.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.orbit.active = false;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let step = c.config.camera.dolly_step;
			let factor = if ev.delta_y() > 0.0 { step } else { 1.0 / step };
			c.camera.dolly(factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="strand-viz-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
