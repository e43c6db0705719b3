//! Scene composition: primitive builders and the rebuildable scene graph.
//!
//! [`VizScene`] owns every primitive of the current diagram as flat,
//! generation-owned lists. A rebuild clears them in bulk and reconstructs the
//! scene as a pure function of `(dataset, color assignment, highlight set)`,
//! so repeating a rebuild with identical inputs always yields an identical
//! scene.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::camera::Vec3;
use super::config::VizConfig;
use super::layout::layout;
use super::state::HighlightSet;
use super::theme::Color;
use super::types::ItemId;

/// Color used when an item is missing from the color assignment.
const FALLBACK_COLOR: Color = Color::rgb(128, 128, 128);

/// One layer ring: a closed curve of the shared radius at a fixed depth.
/// The base (goals) ring is solid; moment rings are dashed.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
	pub depth: f64,
	pub dashed: bool,
}

/// One item occurrence: a small disc on its layer's ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
	pub item: ItemId,
	pub angle: f64,
	pub depth: f64,
	pub color: Color,
}

/// A smoothed curve linking two occurrences of the same item across layers.
///
/// `start` and `end` are `(angle, depth)` pairs; the end angle carries any
/// accumulated full-turn wraparound offset, so it can exceed `2π`.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
	pub start: (f64, f64),
	pub end: (f64, f64),
	/// Curve points in world space, ready to project.
	pub points: Vec<Vec3>,
	pub color: Color,
}

/// The mutable scene graph, rebuilt wholesale on every dataset or highlight
/// change. Primitive lists are owned per rebuild generation and freed in
/// bulk by the next [`VizScene::rebuild`].
#[derive(Debug, Default)]
pub struct VizScene {
	pub rings: Vec<Ring>,
	pub markers: Vec<Marker>,
	pub connectors: Vec<Connector>,
	/// Depth offset recentering the layer stack on `z = 0`.
	pub depth_offset: f64,
}

impl VizScene {
	pub fn new() -> Self {
		Self::default()
	}

	/// Discard the previous generation and compose the scene from scratch.
	///
	/// Layer 0 is the goals ring; moment layers follow in ring order. Items
	/// filtered out by the highlight set are never constructed. Connector
	/// chains walk each item's visible occurrences across layers in order,
	/// with wraparound accumulation keeping the rotational direction
	/// consistent; an item's chain starts at its first visible occurrence,
	/// whichever layer that is.
	pub fn rebuild(
		&mut self,
		goals: &[ItemId],
		moments: &[Vec<ItemId>],
		colors: &HashMap<ItemId, Color>,
		highlight: &HighlightSet,
		config: &VizConfig,
	) {
		self.rings.clear();
		self.markers.clear();
		self.connectors.clear();
		self.depth_offset = config.depth_offset(moments.len());

		let mut last_pos: HashMap<ItemId, (f64, f64)> = HashMap::new();

		let layers = std::iter::once(goals).chain(moments.iter().map(Vec::as_slice));
		for (layer_index, items) in layers.enumerate() {
			self.rings.push(Ring {
				depth: config.layer_depth(layer_index),
				dashed: layer_index > 0,
			});

			for slot in layout(items, layer_index, config) {
				if !highlight.matches(&slot.item) {
					continue;
				}

				let color = colors.get(&slot.item).copied().unwrap_or(FALLBACK_COLOR);
				self.markers.push(Marker {
					item: slot.item.clone(),
					angle: slot.angle,
					depth: slot.depth,
					color,
				});

				match last_pos.get_mut(&slot.item) {
					Some(last) => {
						let angle = wrap_forward(last.0, slot.angle);
						self.connectors.push(build_connector(
							*last,
							(angle, slot.depth),
							color,
							config,
						));
						*last = (angle, slot.depth);
					}
					None => {
						last_pos.insert(slot.item.clone(), (slot.angle, slot.depth));
					}
				}
			}
		}
	}
}

/// Advance `next` by whole turns until it is no longer numerically behind
/// `last`, so a connector keeps winding in the same rotational direction
/// instead of snapping backward across the 0/2π seam.
pub fn wrap_forward(last: f64, next: f64) -> f64 {
	let mut angle = next;
	while angle < last {
		angle += TAU;
	}
	angle
}

/// Build one connector: linearly interpolate angle and depth between the
/// endpoints, project each step onto the ring cylinder, then smooth the
/// control points with a Catmull-Rom pass.
fn build_connector(
	from: (f64, f64),
	to: (f64, f64),
	color: Color,
	config: &VizConfig,
) -> Connector {
	let steps = config.connector_steps.max(1);
	let mut control = Vec::with_capacity(steps + 1);
	for i in 0..=steps {
		let t = i as f64 / steps as f64;
		let angle = from.0 + (to.0 - from.0) * t;
		let depth = from.1 + (to.1 - from.1) * t;
		control.push(Vec3::new(
			angle.cos() * config.radius,
			angle.sin() * config.radius,
			depth,
		));
	}

	Connector {
		start: from,
		end: to,
		points: catmull_rom(&control, config.curve_samples),
		color,
	}
}

/// Sample a uniform Catmull-Rom spline through `control`, returning
/// `samples + 1` points. Endpoints are interpolated exactly; fewer than two
/// control points pass through unchanged.
fn catmull_rom(control: &[Vec3], samples: usize) -> Vec<Vec3> {
	if control.len() < 2 || samples == 0 {
		return control.to_vec();
	}

	let segments = control.len() - 1;
	let mut points = Vec::with_capacity(samples + 1);
	for s in 0..=samples {
		let t = s as f64 / samples as f64 * segments as f64;
		let seg = (t.floor() as usize).min(segments - 1);
		let local = t - seg as f64;

		let p0 = control[seg.saturating_sub(1)];
		let p1 = control[seg];
		let p2 = control[seg + 1];
		let p3 = control[(seg + 2).min(control.len() - 1)];

		points.push(catmull_rom_point(p0, p1, p2, p3, local));
	}
	points
}

fn catmull_rom_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f64) -> Vec3 {
	let t2 = t * t;
	let t3 = t2 * t;
	let blend = |a: f64, b: f64, c: f64, d: f64| {
		0.5 * ((2.0 * b)
			+ (-a + c) * t
			+ (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
			+ (-a + 3.0 * b - 3.0 * c + d) * t3)
	};
	Vec3::new(
		blend(p0.x, p1.x, p2.x, p3.x),
		blend(p0.y, p1.y, p2.y, p3.y),
		blend(p0.z, p1.z, p2.z, p3.z),
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::strand_viz::theme::VizPalette;
	use std::f64::consts::PI;

	const EPS: f64 = 1e-9;

	fn ids(names: &[&str]) -> Vec<ItemId> {
		names.iter().map(|s| s.to_string()).collect()
	}

	fn aligned_config() -> VizConfig {
		VizConfig {
			moment_angle_shift: 0.0,
			..VizConfig::default()
		}
	}

	fn colors_for(goals: &[ItemId], moments: &[Vec<ItemId>]) -> HashMap<ItemId, Color> {
		let data = crate::components::strand_viz::types::VizData {
			strand_goals: goals.to_vec(),
			moments_assessment_points: moments.to_vec(),
			color_map: None,
		};
		crate::components::strand_viz::state::assign_colors(&data, None, &VizPalette::spectrum())
	}

	fn build(
		goals: &[&str],
		moments: &[&[&str]],
		highlight: &HighlightSet,
		config: &VizConfig,
	) -> VizScene {
		let goals = ids(goals);
		let moments: Vec<Vec<ItemId>> = moments.iter().map(|m| ids(m)).collect();
		let colors = colors_for(&goals, &moments);
		let mut scene = VizScene::new();
		scene.rebuild(&goals, &moments, &colors, highlight, config);
		scene
	}

	#[test]
	fn wrap_forward_accumulates_a_full_turn() {
		let wrapped = wrap_forward(5.8, 0.3);
		assert!((wrapped - (0.3 + TAU)).abs() < EPS);
	}

	#[test]
	fn wrap_forward_leaves_forward_angles_alone() {
		assert_eq!(wrap_forward(0.3, 5.8), 5.8);
		assert_eq!(wrap_forward(1.0, 1.0), 1.0);
	}

	#[test]
	fn wrap_forward_can_accumulate_multiple_turns() {
		let wrapped = wrap_forward(2.0 * TAU + 1.0, 0.5);
		assert!((wrapped - (0.5 + 3.0 * TAU)).abs() < EPS);
	}

	#[test]
	fn recurring_item_gets_one_connector_per_recurrence() {
		let scene = build(
			&["x", "y"],
			&[&["x"], &["x"]],
			&HighlightSet::default(),
			&aligned_config(),
		);
		// x appears in layers 0, 1, 2 -> two links; y never recurs -> none.
		assert_eq!(scene.connectors.len(), 2);
	}

	#[test]
	fn item_appearing_once_gets_no_connector() {
		let scene = build(
			&["solo"],
			&[&[], &[]],
			&HighlightSet::default(),
			&aligned_config(),
		);
		assert!(scene.connectors.is_empty());
		assert_eq!(scene.markers.len(), 1);
	}

	#[test]
	fn moment_only_item_starts_its_own_chain() {
		let scene = build(
			&["g"],
			&[&["m"], &["m"]],
			&HighlightSet::default(),
			&aligned_config(),
		);
		// m first appears in layer 1, links once into layer 2.
		assert_eq!(scene.connectors.len(), 1);
		assert!((scene.connectors[0].start.1 + 24.0).abs() < EPS);
		assert!((scene.connectors[0].end.1 + 48.0).abs() < EPS);
	}

	#[test]
	fn empty_dataset_still_draws_the_base_ring() {
		let scene = build(&[], &[], &HighlightSet::default(), &aligned_config());
		assert_eq!(scene.rings.len(), 1);
		assert!(!scene.rings[0].dashed);
		assert!(scene.markers.is_empty());
		assert!(scene.connectors.is_empty());
	}

	#[test]
	fn base_ring_is_solid_and_moment_rings_are_dashed() {
		let scene = build(
			&["a"],
			&[&["a"], &["a"]],
			&HighlightSet::default(),
			&aligned_config(),
		);
		assert_eq!(scene.rings.len(), 3);
		assert!(!scene.rings[0].dashed);
		assert!(scene.rings[1].dashed && scene.rings[2].dashed);
	}

	#[test]
	fn end_to_end_scenario_matches_expected_geometry() {
		let scene = build(
			&["a", "b"],
			&[&["a"], &["b", "a"]],
			&HighlightSet::default(),
			&aligned_config(),
		);

		// Markers: layer 0 has a@0 and b@pi; layer 1 has a@0; layer 2 has b@0 and a@pi.
		assert_eq!(scene.markers.len(), 5);
		let marker = |item: &str, depth: f64| {
			scene
				.markers
				.iter()
				.find(|m| m.item == item && (m.depth - depth).abs() < EPS)
				.unwrap()
		};
		assert!(marker("a", 0.0).angle.abs() < EPS);
		assert!((marker("b", 0.0).angle - PI).abs() < EPS);
		assert!(marker("a", -24.0).angle.abs() < EPS);
		assert!(marker("b", -48.0).angle.abs() < EPS);
		assert!((marker("a", -48.0).angle - PI).abs() < EPS);

		// Connectors: a chains 0 -> 1 -> 2; b skips layer 1 and wraps.
		assert_eq!(scene.connectors.len(), 3);
		let b_link = scene
			.connectors
			.iter()
			.find(|c| (c.start.0 - PI).abs() < EPS && c.start.1 == 0.0)
			.unwrap();
		assert!((b_link.end.0 - TAU).abs() < EPS);
		assert!((b_link.end.1 + 48.0).abs() < EPS);
	}

	#[test]
	fn rebuild_is_idempotent() {
		let goals = ids(&["a", "b"]);
		let moments = vec![ids(&["a"]), ids(&["b", "a"])];
		let colors = colors_for(&goals, &moments);
		let highlight = HighlightSet::default();
		let config = VizConfig::default();

		let mut scene = VizScene::new();
		scene.rebuild(&goals, &moments, &colors, &highlight, &config);
		let first_markers = scene.markers.clone();
		let first_connectors = scene.connectors.clone();
		let first_rings = scene.rings.clone();

		scene.rebuild(&goals, &moments, &colors, &highlight, &config);
		assert_eq!(scene.markers, first_markers);
		assert_eq!(scene.connectors, first_connectors);
		assert_eq!(scene.rings, first_rings);
	}

	#[test]
	fn highlight_filters_without_moving_surviving_markers() {
		let config = aligned_config();
		let full = build(&["a", "b"], &[&["a"], &["b", "a"]], &HighlightSet::default(), &config);

		let mut only_b = HighlightSet::default();
		only_b.toggle("b");
		let filtered = build(&["a", "b"], &[&["a"], &["b", "a"]], &only_b, &config);

		assert_eq!(filtered.markers.len(), 2);
		assert_eq!(filtered.connectors.len(), 1);
		for marker in &filtered.markers {
			let unfiltered = full
				.markers
				.iter()
				.find(|m| m.item == marker.item && m.depth == marker.depth)
				.unwrap();
			assert!((marker.angle - unfiltered.angle).abs() < EPS);
		}
	}

	#[test]
	fn double_toggle_reproduces_the_full_scene() {
		let config = aligned_config();
		let full = build(&["a", "b"], &[&["a"], &["b", "a"]], &HighlightSet::default(), &config);

		let mut highlight = HighlightSet::default();
		highlight.toggle("b");
		highlight.toggle("b");
		let restored = build(&["a", "b"], &[&["a"], &["b", "a"]], &highlight, &config);

		assert_eq!(restored.markers, full.markers);
		assert_eq!(restored.connectors, full.connectors);
	}

	#[test]
	fn unknown_highlight_member_matches_nothing() {
		let mut highlight = HighlightSet::default();
		highlight.toggle("ghost");
		let scene = build(&["a"], &[&["a"]], &highlight, &aligned_config());
		// Rings still render; no marker matches the selection.
		assert_eq!(scene.rings.len(), 2);
		assert!(scene.markers.is_empty());
		assert!(scene.connectors.is_empty());
	}

	#[test]
	fn connector_curve_interpolates_its_endpoints() {
		let config = aligned_config();
		let scene = build(&["a"], &[&["a"]], &HighlightSet::default(), &config);
		let connector = &scene.connectors[0];
		assert_eq!(connector.points.len(), config.curve_samples + 1);

		let first = connector.points.first().unwrap();
		let last = connector.points.last().unwrap();
		assert!((first.x - config.radius).abs() < EPS);
		assert!(first.z.abs() < EPS);
		assert!((last.z + config.layer_distance).abs() < EPS);
	}

	#[test]
	fn connector_points_stay_on_the_ring_cylinder() {
		// Control points are cylinder-projected; spline smoothing may cut
		// corners slightly but must stay close to the ring radius.
		let config = aligned_config();
		let scene = build(&["a", "b"], &[&["b", "a"]], &HighlightSet::default(), &config);
		for connector in &scene.connectors {
			for p in &connector.points {
				let r = (p.x * p.x + p.y * p.y).sqrt();
				assert!((r - config.radius).abs() < config.radius * 0.05);
			}
		}
	}

	#[test]
	fn depth_offset_tracks_moment_count() {
		let scene = build(
			&["a"],
			&[&["a"], &["a"], &["a"]],
			&HighlightSet::default(),
			&aligned_config(),
		);
		assert_eq!(scene.depth_offset, 36.0);
	}
}
