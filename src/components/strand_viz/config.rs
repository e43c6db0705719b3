//! Geometry and motion tunables for the strand visualization.
//!
//! This module centralizes the visual parameters of the radial diagram, making
//! it easy to understand and tune how the layer stack is shaped and animated.
//!
//! # Coordinate Space
//!
//! The scene lives in a right-handed world space with `+z` as the vertical
//! (rotation) axis. The base goals ring sits at `z = 0`; each moment ring sits
//! one [`VizConfig::layer_distance`] further down the `-z` axis. The whole
//! stack is recentered at render time so rotation pivots its middle.

use std::f64::consts::PI;

/// Perspective camera parameters.
///
/// The camera orbits the scene origin on a spherical mount: `azimuth` rotates
/// around the vertical axis, `elevation` tilts toward the poles, `distance`
/// dollies along the view ray.
#[derive(Clone, Debug)]
pub struct CameraConfig {
	/// Initial distance from the scene origin, in world units.
	pub distance: f64,
	/// Initial azimuth angle, in radians.
	pub azimuth: f64,
	/// Initial elevation angle, in radians.
	pub elevation: f64,
	/// Vertical field of view, in radians.
	pub fov_y: f64,
	/// Near clip distance; points closer than this are culled.
	pub near: f64,
	/// Dolly clamp bounds (min, max), in world units.
	pub distance_bounds: (f64, f64),
	/// Orbit sensitivity, in radians per dragged pixel.
	pub orbit_speed: f64,
	/// Multiplicative dolly step per wheel notch.
	pub dolly_step: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			distance: 200.0 * std::f64::consts::SQRT_2,
			azimuth: 0.0,
			elevation: PI / 4.0,
			fov_y: 40.0_f64.to_radians(),
			near: 0.1,
			distance_bounds: (120.0, 1200.0),
			orbit_speed: 0.005,
			dolly_step: 1.1,
		}
	}
}

/// Complete geometry and motion configuration for the visualization.
#[derive(Clone, Debug)]
pub struct VizConfig {
	/// Radius of every layer ring, in world units.
	pub radius: f64,
	/// Depth gap between consecutive layers, in world units.
	pub layer_distance: f64,
	/// Cosmetic per-layer angular offset applied to moment layers, in radians.
	///
	/// Moment layer `j` is rotated by `moment_angle_shift * j` so items that
	/// recur at the same base angle across layers do not stack visually. This
	/// is purely decorative: identity matching and highlight filtering never
	/// consider it. Set to `0.0` for strictly aligned layers.
	pub moment_angle_shift: f64,
	/// Item marker radius, in world units.
	pub marker_radius: f64,
	/// Number of segments used to sample each layer ring.
	pub ring_segments: usize,
	/// Number of linear interpolation steps between connector endpoints.
	pub connector_steps: usize,
	/// Number of points sampled along each smoothed connector curve.
	pub curve_samples: usize,
	/// Whole-scene rotation speed, in radians per second.
	pub rotation_speed: f64,
	/// Camera parameters.
	pub camera: CameraConfig,
}

impl Default for VizConfig {
	fn default() -> Self {
		let radius = 100.0;
		Self {
			radius,
			layer_distance: 24.0,
			moment_angle_shift: PI / 10.0,
			marker_radius: radius / 25.0,
			ring_segments: 50,
			connector_steps: 10,
			curve_samples: 50,
			rotation_speed: 0.1,
			camera: CameraConfig::default(),
		}
	}
}

impl VizConfig {
	/// Angular offset for a layer: zero for the goals layer, then one
	/// [`Self::moment_angle_shift`] increment per moment layer.
	pub fn angle_shift(&self, layer_index: usize) -> f64 {
		self.moment_angle_shift * layer_index as f64
	}

	/// Depth of a layer along the `-z` axis.
	pub fn layer_depth(&self, layer_index: usize) -> f64 {
		-self.layer_distance * layer_index as f64
	}

	/// Offset recentering a stack of `moment_count` moment layers on `z = 0`.
	pub fn depth_offset(&self, moment_count: usize) -> f64 {
		self.layer_distance * moment_count as f64 / 2.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn angle_shift_scales_with_layer_index() {
		let config = VizConfig::default();
		assert_eq!(config.angle_shift(0), 0.0);
		assert!((config.angle_shift(3) - 3.0 * PI / 10.0).abs() < 1e-12);
	}

	#[test]
	fn layer_depth_is_monotonic_and_evenly_spaced() {
		let config = VizConfig::default();
		for layer in 0..5 {
			let gap = config.layer_depth(layer) - config.layer_depth(layer + 1);
			assert!((gap - config.layer_distance).abs() < 1e-12);
		}
	}

	#[test]
	fn depth_offset_centers_the_stack() {
		let config = VizConfig::default();
		// Three moment layers span 0..-72; the offset puts the middle at z=0.
		assert_eq!(config.depth_offset(3), 36.0);
	}
}
