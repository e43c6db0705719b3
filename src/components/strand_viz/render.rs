//! Canvas rendering for the strand visualization.
//!
//! Projects the composed 3D scene through the orbit camera and draws it in
//! back-to-front passes: background, layer rings, connectors, then markers
//! sorted far-to-near so closer discs overlap farther ones.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::camera::{OrbitCamera, Vec3, ViewFrame};
use super::config::VizConfig;
use super::scene::VizScene;
use super::state::VizState;
use super::theme::Theme;

/// Renders the complete scene to the canvas.
pub fn render(
	state: &VizState,
	scene: &VizScene,
	ctx: &CanvasRenderingContext2d,
	camera: &OrbitCamera,
	config: &VizConfig,
	theme: &Theme,
) {
	let frame = camera.frame();

	draw_background(state, ctx, theme);
	draw_rings(state, scene, ctx, &frame, config, theme);
	draw_connectors(state, scene, ctx, &frame, theme);
	draw_markers(state, scene, ctx, &frame, config, theme);
}

/// Apply the per-frame scene transform: rotation around the vertical axis,
/// then the stack-centering depth offset.
fn place(p: Vec3, rotation: f64, depth_offset: f64) -> Vec3 {
	let (sin_r, cos_r) = rotation.sin_cos();
	Vec3::new(
		p.x * cos_r - p.y * sin_r,
		p.x * sin_r + p.y * cos_r,
		p.z + depth_offset,
	)
}

fn draw_background(state: &VizState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.transparent {
		ctx.clear_rect(0.0, 0.0, state.width, state.height);
		return;
	}

	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Trace a projected polyline, breaking the path across culled points.
fn trace_path(
	ctx: &CanvasRenderingContext2d,
	frame: &ViewFrame,
	width: f64,
	height: f64,
	points: impl Iterator<Item = Vec3>,
) {
	ctx.begin_path();
	let mut pen_down = false;
	for point in points {
		match frame.project(point, width, height) {
			Some(p) if pen_down => ctx.line_to(p.x, p.y),
			Some(p) => {
				ctx.move_to(p.x, p.y);
				pen_down = true;
			}
			None => pen_down = false,
		}
	}
}

fn draw_rings(
	state: &VizState,
	scene: &VizScene,
	ctx: &CanvasRenderingContext2d,
	frame: &ViewFrame,
	config: &VizConfig,
	theme: &Theme,
) {
	let style = &theme.ring;
	ctx.set_stroke_style_str(&style.color.to_css());

	for ring in &scene.rings {
		if ring.dashed {
			ctx.set_line_width(style.width);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(style.dash.0),
				&JsValue::from_f64(style.dash.1),
			));
		} else {
			ctx.set_line_width(style.base_width);
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		let segments = config.ring_segments.max(3);
		let points = (0..=segments).map(|i| {
			let angle = TAU * i as f64 / segments as f64;
			place(
				Vec3::new(
					angle.cos() * config.radius,
					angle.sin() * config.radius,
					ring.depth,
				),
				state.rotation,
				scene.depth_offset,
			)
		});
		trace_path(ctx, frame, state.width, state.height, points);
		ctx.stroke();
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_connectors(
	state: &VizState,
	scene: &VizScene,
	ctx: &CanvasRenderingContext2d,
	frame: &ViewFrame,
	theme: &Theme,
) {
	ctx.set_line_width(theme.connector.width);

	for connector in &scene.connectors {
		let color = connector.color.with_alpha(theme.connector.alpha);
		ctx.set_stroke_style_str(&color.to_css());

		let points = connector
			.points
			.iter()
			.map(|p| place(*p, state.rotation, scene.depth_offset));
		trace_path(ctx, frame, state.width, state.height, points);
		ctx.stroke();
	}
}

fn draw_markers(
	state: &VizState,
	scene: &VizScene,
	ctx: &CanvasRenderingContext2d,
	frame: &ViewFrame,
	config: &VizConfig,
	theme: &Theme,
) {
	let mut projected: Vec<_> = scene
		.markers
		.iter()
		.filter_map(|marker| {
			let world = place(
				Vec3::new(
					marker.angle.cos() * config.radius,
					marker.angle.sin() * config.radius,
					marker.depth,
				),
				state.rotation,
				scene.depth_offset,
			);
			frame
				.project(world, state.width, state.height)
				.map(|p| (p, marker.color))
		})
		.collect();

	// Far markers first so near ones paint over them.
	projected.sort_by(|a, b| {
		b.0.depth
			.partial_cmp(&a.0.depth)
			.unwrap_or(Ordering::Equal)
	});

	for (p, color) in projected {
		let radius = (config.marker_radius * p.scale).max(theme.marker.min_radius);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, TAU);
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill();
	}
}
