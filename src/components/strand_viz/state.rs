//! Dataset, color assignment, and highlight state.
//!
//! [`VizState`] is the component-local state struct the render loop and event
//! bridge share: the current dataset, its stable color assignment, the
//! user-toggled highlight set, the scene rotation, and the viewport size.
//! Scene geometry itself lives in [`super::scene::VizScene`] and is rebuilt
//! from this state.

use std::collections::{HashMap, HashSet};

use super::config::VizConfig;
use super::theme::{Color, VizPalette};
use super::types::{ItemId, VizData};

/// User-toggled subset of items currently in focus.
///
/// Empty means "show everything". Non-empty means only member items are drawn,
/// in every layer where they appear. Members toggle in and out individually.
#[derive(Clone, Debug, Default)]
pub struct HighlightSet {
	items: HashSet<ItemId>,
}

impl HighlightSet {
	/// Toggle `id` in or out of the set. Returns `true` if it is now a member.
	/// Ids unknown to the dataset are accepted; they simply never match.
	pub fn toggle(&mut self, id: &str) -> bool {
		if self.items.remove(id) {
			false
		} else {
			self.items.insert(id.to_string());
			true
		}
	}

	/// Whether `item` should be drawn under the current selection.
	pub fn matches(&self, item: &str) -> bool {
		self.items.is_empty() || self.items.contains(item)
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn clear(&mut self) {
		self.items.clear();
	}
}

/// Derive the stable item-to-color assignment for one dataset.
///
/// Explicit entries from `overrides` win; every other item gets a palette
/// color cycled by first-appearance order, goals ring first, then moment
/// layers in ring order so moment-only items are colored too. The ordinal
/// advances for overridden items as well, keeping derived colors independent
/// of which items happen to carry overrides.
pub fn assign_colors(
	data: &VizData,
	overrides: Option<&HashMap<ItemId, String>>,
	palette: &VizPalette,
) -> HashMap<ItemId, Color> {
	let mut colors = HashMap::new();
	let mut ordinal = 0usize;

	let layers = std::iter::once(&data.strand_goals).chain(&data.moments_assessment_points);
	for layer in layers {
		for item in layer {
			if colors.contains_key(item) {
				continue;
			}
			let color = overrides
				.and_then(|map| map.get(item))
				.map(|css| Color::parse(css))
				.unwrap_or_else(|| palette.get(ordinal));
			colors.insert(item.clone(), color);
			ordinal += 1;
		}
	}

	colors
}

/// Tracks an in-progress camera orbit drag.
#[derive(Clone, Debug, Default)]
pub struct OrbitInput {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Component-local state shared by the event bridge and the render loop.
///
/// Created once when the component mounts, replaced wholesale by each build
/// event, and mutated in place by highlight toggles and per-frame ticks.
pub struct VizState {
	pub goals: Vec<ItemId>,
	pub moments: Vec<Vec<ItemId>>,
	pub colors: HashMap<ItemId, Color>,
	pub highlight: HighlightSet,
	/// Whole-scene rotation around the vertical axis, in radians.
	pub rotation: f64,
	pub orbit: OrbitInput,
	pub width: f64,
	pub height: f64,
}

impl VizState {
	/// Empty state: nothing to draw until a dataset arrives.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			goals: Vec::new(),
			moments: Vec::new(),
			colors: HashMap::new(),
			highlight: HighlightSet::default(),
			rotation: 0.0,
			orbit: OrbitInput::default(),
			width,
			height,
		}
	}

	/// Replace the dataset atomically: new layers, a freshly derived color
	/// assignment, and an empty highlight set. Rotation is left untouched so
	/// rebuilds do not visibly snap the scene.
	pub fn load(&mut self, data: &VizData, palette: &VizPalette) {
		self.colors = assign_colors(data, data.color_map.as_ref(), palette);
		self.goals = data.strand_goals.clone();
		self.moments = data.moments_assessment_points.clone();
		self.highlight.clear();
	}

	/// Toggle one item's highlight membership. Returns `true` if it is now
	/// highlighted.
	pub fn toggle_item(&mut self, id: &str) -> bool {
		self.highlight.toggle(id)
	}

	/// Advance the scene rotation by one frame of elapsed time.
	pub fn tick(&mut self, dt: f64, config: &VizConfig) {
		self.rotation += config.rotation_speed * dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn data(goals: &[&str], moments: &[&[&str]]) -> VizData {
		VizData {
			strand_goals: goals.iter().map(|s| s.to_string()).collect(),
			moments_assessment_points: moments
				.iter()
				.map(|m| m.iter().map(|s| s.to_string()).collect())
				.collect(),
			color_map: None,
		}
	}

	#[test]
	fn empty_highlight_matches_everything() {
		let highlight = HighlightSet::default();
		assert!(highlight.matches("anything"));
	}

	#[test]
	fn toggle_twice_restores_original_membership() {
		let mut highlight = HighlightSet::default();
		assert!(highlight.toggle("a"));
		assert!(!highlight.matches("b"));
		assert!(!highlight.toggle("a"));
		assert!(highlight.is_empty());
		assert!(highlight.matches("b"));
	}

	#[test]
	fn unknown_member_never_matches_dataset_items() {
		let mut highlight = HighlightSet::default();
		highlight.toggle("ghost");
		assert!(!highlight.matches("a"));
		assert!(highlight.matches("ghost"));
	}

	#[test]
	fn colors_cycle_in_first_appearance_order() {
		let palette = VizPalette::spectrum();
		let d = data(&["g0", "g1"], &[&["m0", "g0"]]);
		let colors = assign_colors(&d, None, &palette);
		assert_eq!(colors[&"g0".to_string()], palette.get(0));
		assert_eq!(colors[&"g1".to_string()], palette.get(1));
		// Moment-only item continues the cycle after the goals.
		assert_eq!(colors[&"m0".to_string()], palette.get(2));
	}

	#[test]
	fn colors_wrap_after_palette_exhaustion() {
		let palette = VizPalette::spectrum();
		let goals: Vec<String> = (0..9).map(|i| format!("g{i}")).collect();
		let d = VizData {
			strand_goals: goals,
			..VizData::default()
		};
		let colors = assign_colors(&d, None, &palette);
		assert_eq!(colors[&"g8".to_string()], palette.get(0));
	}

	#[test]
	fn explicit_color_map_wins_without_shifting_the_cycle() {
		let palette = VizPalette::spectrum();
		let mut overrides = HashMap::new();
		overrides.insert("g0".to_string(), "#112233".to_string());
		let d = data(&["g0", "g1"], &[]);
		let colors = assign_colors(&d, Some(&overrides), &palette);
		assert_eq!(colors[&"g0".to_string()], Color::rgb(0x11, 0x22, 0x33));
		// g1 keeps its ordinal slot even though g0 was overridden.
		assert_eq!(colors[&"g1".to_string()], palette.get(1));
	}

	#[test]
	fn same_item_keeps_one_color_across_layers() {
		let palette = VizPalette::spectrum();
		let d = data(&["a", "b"], &[&["a"], &["b", "a"]]);
		let colors = assign_colors(&d, None, &palette);
		assert_eq!(colors.len(), 2);
		assert_eq!(colors[&"a".to_string()], palette.get(0));
	}

	#[test]
	fn load_resets_highlight_but_keeps_rotation() {
		let mut state = VizState::new(800.0, 600.0);
		state.rotation = 1.5;
		state.toggle_item("a");
		state.load(&data(&["a"], &[]), &VizPalette::spectrum());
		assert!(state.highlight.is_empty());
		assert_eq!(state.rotation, 1.5);
		assert_eq!(state.goals, vec!["a".to_string()]);
	}

	#[test]
	fn tick_advances_rotation_at_constant_velocity() {
		let config = VizConfig::default();
		let mut state = VizState::new(800.0, 600.0);
		state.tick(0.5, &config);
		state.tick(0.5, &config);
		assert!((state.rotation - config.rotation_speed).abs() < 1e-12);
	}
}
