//! Orbiting perspective camera and world-to-screen projection.
//!
//! The scene is drawn on a 2D canvas, so the 3D illusion is produced here: an
//! orbit camera on a spherical mount around the scene origin, a look-at view
//! frame, and a perspective projection that maps world points to canvas
//! pixels plus a per-point scale factor for sizing markers.

use super::config::CameraConfig;

/// A point or direction in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn sub(self, other: Vec3) -> Vec3 {
		Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
	}

	pub fn dot(self, other: Vec3) -> f64 {
		self.x * other.x + self.y * other.y + self.z * other.z
	}

	pub fn cross(self, other: Vec3) -> Vec3 {
		Vec3::new(
			self.y * other.z - self.z * other.y,
			self.z * other.x - self.x * other.z,
			self.x * other.y - self.y * other.x,
		)
	}

	pub fn length(self) -> f64 {
		self.dot(self).sqrt()
	}

	/// Unit-length copy; the zero vector is returned unchanged.
	pub fn normalized(self) -> Vec3 {
		let len = self.length();
		if len < 1e-12 {
			self
		} else {
			Vec3::new(self.x / len, self.y / len, self.z / len)
		}
	}
}

/// A world point projected onto the canvas.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
	/// Canvas x coordinate, in pixels.
	pub x: f64,
	/// Canvas y coordinate, in pixels.
	pub y: f64,
	/// Distance along the view ray, in world units. Larger = farther.
	pub depth: f64,
	/// Pixels per world unit at this depth; scales marker radii.
	pub scale: f64,
}

/// Camera orbiting the scene origin with the world `+z` axis up.
///
/// Elevation is clamped just short of the poles so the view basis stays well
/// defined; distance is clamped to the configured dolly bounds.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
	azimuth: f64,
	elevation: f64,
	distance: f64,
	fov_y: f64,
	near: f64,
	distance_bounds: (f64, f64),
}

/// Keeps the view basis away from the degenerate straight-up/straight-down poses.
const ELEVATION_LIMIT: f64 = std::f64::consts::FRAC_PI_2 - 0.05;

impl OrbitCamera {
	pub fn new(config: &CameraConfig) -> Self {
		let mut camera = Self {
			azimuth: config.azimuth,
			elevation: config.elevation,
			distance: config.distance,
			fov_y: config.fov_y,
			near: config.near,
			distance_bounds: config.distance_bounds,
		};
		camera.clamp();
		camera
	}

	fn clamp(&mut self) {
		self.elevation = self.elevation.clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
		let (min, max) = self.distance_bounds;
		self.distance = self.distance.clamp(min, max);
	}

	/// Camera position in world space.
	pub fn position(&self) -> Vec3 {
		let (sin_e, cos_e) = self.elevation.sin_cos();
		let (sin_a, cos_a) = self.azimuth.sin_cos();
		Vec3::new(
			self.distance * cos_e * cos_a,
			self.distance * cos_e * sin_a,
			self.distance * sin_e,
		)
	}

	pub fn distance(&self) -> f64 {
		self.distance
	}

	/// Rotate the mount by the given azimuth/elevation deltas, in radians.
	pub fn orbit(&mut self, d_azimuth: f64, d_elevation: f64) {
		self.azimuth += d_azimuth;
		self.elevation += d_elevation;
		self.clamp();
	}

	/// Scale the camera distance by `factor` (>1 moves away), clamped.
	pub fn dolly(&mut self, factor: f64) {
		self.distance *= factor;
		self.clamp();
	}

	/// Compute the per-frame view frame looking at the scene origin.
	pub fn frame(&self) -> ViewFrame {
		let eye = self.position();
		let forward = Vec3::new(0.0, 0.0, 0.0).sub(eye).normalized();
		let right = forward.cross(Vec3::new(0.0, 0.0, 1.0)).normalized();
		let up = right.cross(forward);
		ViewFrame {
			eye,
			right,
			up,
			forward,
			fov_y: self.fov_y,
			near: self.near,
		}
	}
}

/// Precomputed look-at basis, valid for one frame.
#[derive(Clone, Copy, Debug)]
pub struct ViewFrame {
	eye: Vec3,
	right: Vec3,
	up: Vec3,
	forward: Vec3,
	fov_y: f64,
	near: f64,
}

impl ViewFrame {
	/// Project a world point onto a `width` x `height` canvas.
	///
	/// Returns `None` for points at or behind the near plane.
	pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<Projected> {
		let d = point.sub(self.eye);
		let depth = d.dot(self.forward);
		if depth <= self.near {
			return None;
		}

		let focal = (height / 2.0) / (self.fov_y / 2.0).tan();
		let scale = focal / depth;
		Some(Projected {
			x: width / 2.0 + d.dot(self.right) * scale,
			y: height / 2.0 - d.dot(self.up) * scale,
			depth,
			scale,
		})
	}
}
