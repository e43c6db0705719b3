//! Visual theming for the strand visualization.
//!
//! Provides the item color palette, ring/marker/connector styles, and
//! background configuration.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation;
	/// anything else falls back to mid gray.
	pub fn parse(color_str: &str) -> Color {
		if color_str.starts_with('#') && color_str.len() == 7 {
			let r = u8::from_str_radix(&color_str[1..3], 16).unwrap_or(128);
			let g = u8::from_str_radix(&color_str[3..5], 16).unwrap_or(128);
			let b = u8::from_str_radix(&color_str[5..7], 16).unwrap_or(128);
			Color::rgb(r, g, b)
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums
				.first()
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let g = nums
				.get(1)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let b = nums
				.get(2)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(r, g, b, a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// A curated color palette cycled over items by first appearance.
#[derive(Clone, Debug)]
pub struct VizPalette {
	pub colors: Vec<Color>,
}

impl VizPalette {
	/// Bright spectrum palette - cyan through orange (default).
	pub fn spectrum() -> Self {
		Self {
			colors: vec![
				Color::rgb(0x67, 0xe8, 0xf9), // Cyan
				Color::rgb(0xfd, 0xa4, 0xaf), // Rose
				Color::rgb(0xc4, 0xb5, 0xfd), // Violet
				Color::rgb(0xfd, 0xe0, 0x47), // Yellow
				Color::rgb(0xbe, 0xf2, 0x64), // Lime
				Color::rgb(0x93, 0xc5, 0xfd), // Blue
				Color::rgb(0xf0, 0xab, 0xfc), // Fuchsia
				Color::rgb(0xfd, 0xba, 0x74), // Orange
			],
		}
	}

	/// Muted, harmonious palette - slate blues and teals.
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Leave the canvas transparent so the host page shows through.
	pub transparent: bool,
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Layer ring visual style.
#[derive(Clone, Debug)]
pub struct RingStyle {
	/// Stroke color shared by all rings.
	pub color: Color,
	/// Stroke width for moment (dashed) rings, in pixels.
	pub width: f64,
	/// Stroke width for the solid base ring, in pixels.
	pub base_width: f64,
	/// Dash pattern (dash, gap) for moment rings, in pixels.
	pub dash: (f64, f64),
}

/// Item marker visual style.
#[derive(Clone, Debug)]
pub struct MarkerStyle {
	/// Markers never shrink below this projected radius, in pixels.
	pub min_radius: f64,
}

/// Connector curve visual style.
#[derive(Clone, Debug)]
pub struct ConnectorStyle {
	/// Stroke width in pixels.
	pub width: f64,
	/// Stroke opacity.
	pub alpha: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub ring: RingStyle,
	pub marker: MarkerStyle,
	pub connector: ConnectorStyle,
	pub palette: VizPalette,
}

impl Theme {
	/// Dark standalone theme with a subtle gradient backdrop (default).
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				transparent: false,
				color: Color::rgb(15, 23, 42),
				color_secondary: Color::rgb(30, 41, 59),
				use_gradient: true,
			},
			ring: RingStyle {
				color: Color::rgb(226, 232, 240),
				width: 1.0,
				base_width: 2.0,
				dash: (2.0, 4.0),
			},
			marker: MarkerStyle { min_radius: 1.5 },
			connector: ConnectorStyle {
				width: 1.5,
				alpha: 0.9,
			},
			palette: VizPalette::spectrum(),
		}
	}

	/// Transparent theme for embedding over a host-styled page.
	pub fn embedded() -> Self {
		Self {
			name: "embedded",
			background: BackgroundStyle {
				transparent: true,
				color: Color::rgba(0, 0, 0, 0.0),
				color_secondary: Color::rgba(0, 0, 0, 0.0),
				use_gradient: false,
			},
			..Self::default_theme()
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
