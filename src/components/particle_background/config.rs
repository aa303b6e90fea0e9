//! Tunable parameters for the particle background.
//!
//! Every knob of the effect lives in one [`ParticleConfig`] record: how many
//! particles to spawn, the per-type size/orbit/glow/opacity ranges, the motion
//! constants of the simulation step and the frame-rate cap. Named presets
//! cover the tunings the site has shipped with.

use super::types::{ParticleType, Range};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Opaque color from its channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with alpha clamped to [0, 1].
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// CSS `rgba(..)` string for canvas styles.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// How many particles the store spawns for a given surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleCount {
	/// Always exactly this many particles.
	Fixed(usize),
	/// One particle per `divisor` square pixels, capped at `max`.
	Density {
		/// Square pixels per particle.
		divisor: f64,
		/// Upper bound on the count.
		max: usize,
	},
}

impl ParticleCount {
	/// Number of particles for a `width` x `height` surface.
	///
	/// Non-positive dimensions yield zero for density-based counts.
	pub fn resolve(&self, width: f64, height: f64) -> usize {
		match *self {
			ParticleCount::Fixed(n) => n,
			ParticleCount::Density { divisor, max } => {
				if width <= 0.0 || height <= 0.0 || divisor <= 0.0 {
					return 0;
				}
				let area = (width * height / divisor).floor();
				if area >= max as f64 { max } else { area as usize }
			}
		}
	}
}

/// Secondary circle drawn on top of (or around) the particle body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccentStyle {
	/// Accent radius relative to the particle size.
	pub radius_scale: f64,
	/// Fill alpha relative to the particle opacity (capped at 1).
	pub alpha_scale: f64,
	/// Shadow blur in pixels per unit of particle size.
	pub blur_per_px: f64,
	/// Shadow alpha relative to the particle opacity (capped at 1).
	pub glow_alpha_scale: f64,
}

/// Creation ranges and draw style for one [`ParticleType`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypeStyle {
	/// Body radius in pixels.
	pub size: Range,
	/// Orbit radius in pixels.
	pub revolution_radius: Range,
	/// Glow strength multiplier.
	pub glow_intensity: Range,
	/// Opacity is always mapped into this closed range.
	pub opacity: Range,
	/// Twinkle and wobble frequency.
	pub twinkle_speed: Range,
	/// Frequency of the per-particle flow term.
	pub drift_speed: Range,
	/// Body shadow blur in pixels per unit of particle size.
	pub blur_per_px: f64,
	/// Body fill and shadow alpha multiplier.
	pub body_alpha: f64,
	/// Secondary disc drawn after the body.
	pub accent: AccentStyle,
}

/// Per-type styles.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeStyles {
	/// [`ParticleType::Star`] style.
	pub star: TypeStyle,
	/// [`ParticleType::Cosmic`] style.
	pub cosmic: TypeStyle,
	/// [`ParticleType::Nebula`] style.
	pub nebula: TypeStyle,
}

impl TypeStyles {
	/// Style for `particle_type`.
	pub fn get(&self, particle_type: ParticleType) -> &TypeStyle {
		match particle_type {
			ParticleType::Star => &self.star,
			ParticleType::Cosmic => &self.cosmic,
			ParticleType::Nebula => &self.nebula,
		}
	}
}

impl Default for TypeStyles {
	fn default() -> Self {
		let twinkle_speed = Range::new(0.03, 0.11);
		let drift_speed = Range::new(0.15, 0.55);
		Self {
			star: TypeStyle {
				size: Range::new(0.5, 2.0),
				revolution_radius: Range::new(15.0, 55.0),
				glow_intensity: Range::new(0.8, 2.0),
				opacity: Range::new(0.4, 1.0),
				twinkle_speed,
				drift_speed,
				blur_per_px: 12.5,
				body_alpha: 1.0,
				accent: AccentStyle {
					radius_scale: 0.2,
					alpha_scale: 2.0,
					blur_per_px: 6.0,
					glow_alpha_scale: 2.5,
				},
			},
			cosmic: TypeStyle {
				size: Range::new(1.0, 3.5),
				revolution_radius: Range::new(30.0, 110.0),
				glow_intensity: Range::new(0.5, 1.4),
				opacity: Range::new(0.3, 1.0),
				twinkle_speed,
				drift_speed,
				blur_per_px: 7.0,
				body_alpha: 1.0,
				accent: AccentStyle {
					radius_scale: 0.5,
					alpha_scale: 0.8,
					blur_per_px: 3.2,
					glow_alpha_scale: 0.9,
				},
			},
			nebula: TypeStyle {
				size: Range::new(1.5, 5.0),
				revolution_radius: Range::new(50.0, 170.0),
				glow_intensity: Range::new(0.3, 1.0),
				opacity: Range::new(0.2, 0.7),
				twinkle_speed,
				drift_speed,
				blur_per_px: 9.0,
				body_alpha: 0.7,
				accent: AccentStyle {
					radius_scale: 1.6,
					alpha_scale: 0.3,
					blur_per_px: 13.5,
					glow_alpha_scale: 0.4,
				},
			},
		}
	}
}

/// Constants of the per-frame motion model.
///
/// Time-based terms take the display timestamp in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
	/// Global drift heading in degrees, also used to rotate every orbit.
	pub drift_angle_deg: f64,
	/// Drift magnitude per frame, multiplied by each particle's `speed`.
	pub speed: Range,
	/// Magnitude of the per-frame orbital phase advance (sign is random).
	pub revolution_speed: Range,
	/// Orbit radius modulation depth (`r * (1 + k * sin(..))`).
	pub breathing_depth: f64,
	/// Breathing frequency per millisecond.
	pub breathing_frequency: f64,
	/// Wobble amplitude in pixels.
	pub wobble: f64,
	/// Off-surface distance that triggers wraparound, in pixels.
	pub buffer: f64,
}

impl Default for MotionConfig {
	fn default() -> Self {
		Self {
			drift_angle_deg: 135.0,
			speed: Range::new(0.5, 2.0),
			revolution_speed: Range::new(0.015, 0.055),
			breathing_depth: 0.1,
			breathing_frequency: 0.001,
			wobble: 2.0,
			buffer: 150.0,
		}
	}
}

impl MotionConfig {
	/// Unit drift vector, shared by all particles.
	pub fn drift_direction(&self) -> (f64, f64) {
		let rad = self.drift_angle_deg.to_radians();
		(rad.cos(), rad.sin())
	}
}

/// Complete particle background configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
	/// Preset name, used in log lines.
	pub name: &'static str,
	/// Population size policy.
	pub count: ParticleCount,
	/// Base particle color; alpha comes from each particle's opacity.
	pub color: Color,
	/// Per-type ranges and draw style.
	pub styles: TypeStyles,
	/// Simulation step constants.
	pub motion: MotionConfig,
	/// Frames arriving sooner than this after the last painted frame are
	/// skipped. `None` paints on every display refresh.
	pub min_frame_interval_ms: Option<f64>,
}

impl ParticleConfig {
	/// Density-scaled, 60 Hz capped starfield (default).
	pub fn cosmos() -> Self {
		Self {
			name: "cosmos",
			count: ParticleCount::Density {
				divisor: 8000.0,
				max: 150,
			},
			color: Color::WHITE,
			styles: TypeStyles::default(),
			motion: MotionConfig::default(),
			min_frame_interval_ms: Some(16.0),
		}
	}

	/// Fewer, slower particles with tighter orbits.
	pub fn calm() -> Self {
		let mut styles = TypeStyles::default();
		for style in [&mut styles.star, &mut styles.cosmic, &mut styles.nebula] {
			style.revolution_radius = Range::new(
				style.revolution_radius.min * 0.6,
				style.revolution_radius.max * 0.6,
			);
		}
		Self {
			name: "calm",
			count: ParticleCount::Fixed(60),
			color: Color::WHITE,
			styles,
			motion: MotionConfig {
				speed: Range::new(0.2, 0.8),
				revolution_speed: Range::new(0.005, 0.02),
				..MotionConfig::default()
			},
			min_frame_interval_ms: None,
		}
	}

	/// Busier field for large hero sections.
	pub fn dense() -> Self {
		Self {
			name: "dense",
			count: ParticleCount::Density {
				divisor: 5000.0,
				max: 250,
			},
			..Self::cosmos()
		}
	}
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self::cosmos()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn density_count_matches_formula() {
		let count = ParticleConfig::cosmos().count;
		assert_eq!(count.resolve(1920.0, 1080.0), 150);
		assert_eq!(count.resolve(800.0, 600.0), 60);
		assert_eq!(count.resolve(400.0, 300.0), 15);
		assert_eq!(count.resolve(89.0, 89.0), 0);
	}

	#[test]
	fn non_positive_area_yields_no_particles() {
		let count = ParticleConfig::cosmos().count;
		assert_eq!(count.resolve(0.0, 1080.0), 0);
		assert_eq!(count.resolve(1920.0, -5.0), 0);
	}

	#[test]
	fn fixed_count_ignores_area() {
		assert_eq!(ParticleCount::Fixed(60).resolve(0.0, 0.0), 60);
		assert_eq!(ParticleCount::Fixed(60).resolve(4000.0, 4000.0), 60);
	}

	#[test]
	fn drift_direction_points_down_left() {
		let (dx, dy) = MotionConfig::default().drift_direction();
		assert!((dx + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
		assert!((dy - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
	}

	#[test]
	fn alpha_is_clamped_in_css() {
		assert_eq!(Color::WHITE.with_alpha(1.7).to_css(), "rgba(255, 255, 255, 1)");
		assert_eq!(Color::WHITE.with_alpha(0.5).to_css(), "rgba(255, 255, 255, 0.5)");
	}
}
