//! Ring layout engine.
//!
//! Assigns every item of a layer an angular slot on its ring and the layer's
//! depth. Slot angles depend only on the layer's own item count and order;
//! highlight filtering happens later, at scene composition, so toggling
//! highlights never moves the surviving markers.

use std::f64::consts::TAU;

use super::config::VizConfig;
use super::types::ItemId;

/// One positioned item: `(item, angle, depth)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
	pub item: ItemId,
	/// Angle on the ring, in radians. Includes the layer's cosmetic shift.
	pub angle: f64,
	/// Depth along the `-z` axis, shared by the whole layer.
	pub depth: f64,
}

/// Lay out one layer: position `i` of `k` items sits at `2π·i/k` plus the
/// layer's cosmetic shift. A layer with zero items yields no slots.
pub fn layout(items: &[ItemId], layer_index: usize, config: &VizConfig) -> Vec<Slot> {
	if items.is_empty() {
		return Vec::new();
	}

	let step = TAU / items.len() as f64;
	let shift = config.angle_shift(layer_index);
	let depth = config.layer_depth(layer_index);

	items
		.iter()
		.enumerate()
		.map(|(i, item)| Slot {
			item: item.clone(),
			angle: step * i as f64 + shift,
			depth,
		})
		.collect()
}
