//! Payload types for data pushed into the visualization.

use std::collections::HashMap;

use serde::Deserialize;

/// Opaque identifier shared across layers. Identity drives color assignment,
/// connector chaining, and highlight filtering.
pub type ItemId = String;

/// Full dataset for one build: the goals ring plus one ring per moment.
///
/// Matches the JSON shape of the `strand-viz:build` event detail and of the
/// optional `#strand-viz-data` bootstrap script element.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct VizData {
	/// Items on the outer base ring, in display order.
	#[serde(default)]
	pub strand_goals: Vec<ItemId>,
	/// One inner ring of items per moment, outermost first.
	#[serde(default)]
	pub moments_assessment_points: Vec<Vec<ItemId>>,
	/// Optional pre-computed item colors (CSS color strings). Items missing
	/// from the map fall back to palette cycling.
	#[serde(default)]
	pub color_map: Option<HashMap<ItemId, String>>,
}

/// Detail of the `strand-viz:set-current-item` event.
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentItemPayload {
	/// Item whose highlight membership is toggled.
	pub id: ItemId,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_full_build_payload() {
		let json = r##"{
			"strand_goals": ["g1", "g2"],
			"moments_assessment_points": [["g1"], ["g2", "g1"]],
			"color_map": {"g1": "#67e8f9"}
		}"##;
		let data: VizData = serde_json::from_str(json).unwrap();
		assert_eq!(data.strand_goals, vec!["g1", "g2"]);
		assert_eq!(data.moments_assessment_points.len(), 2);
		assert_eq!(
			data.color_map.unwrap().get("g1").map(String::as_str),
			Some("#67e8f9")
		);
	}

	#[test]
	fn missing_fields_default_to_empty() {
		let data: VizData = serde_json::from_str("{}").unwrap();
		assert!(data.strand_goals.is_empty());
		assert!(data.moments_assessment_points.is_empty());
		assert!(data.color_map.is_none());
	}

	#[test]
	fn parses_current_item_payload() {
		let payload: CurrentItemPayload = serde_json::from_str(r#"{"id": "ap-3"}"#).unwrap();
		assert_eq!(payload.id, "ap-3");
	}
}
