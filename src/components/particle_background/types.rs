//! Particle state records.

/// Closed numeric interval used for every tunable random range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
	/// Lower bound.
	pub min: f64,
	/// Upper bound.
	pub max: f64,
}

impl Range {
	/// Range from `min` to `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Uniform sample in `[min, max)`.
	pub fn sample(&self, rng: &mut fastrand::Rng) -> f64 {
		self.min + rng.f64() * (self.max - self.min)
	}

	/// Maps `t` in [0, 1] onto the range, clamping `t` first.
	pub fn lerp(&self, t: f64) -> f64 {
		self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
	}

	/// Whether `value` lies inside the closed range.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}
}

/// Visual variant of a particle, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleType {
	/// Small, bright, fast-twinkling point with a hot core.
	Star,
	/// Mid-sized pulsing particle.
	Cosmic,
	/// Large, dim, slowly breathing haze.
	Nebula,
}

impl ParticleType {
	/// Every variant, in spawn-table order.
	pub const ALL: [ParticleType; 3] = [ParticleType::Star, ParticleType::Cosmic, ParticleType::Nebula];

	/// Uniform pick over [`ParticleType::ALL`].
	pub fn random(rng: &mut fastrand::Rng) -> Self {
		Self::ALL[rng.usize(..Self::ALL.len())]
	}
}

/// A single orbiting background particle.
///
/// Only `angle`, the center, the position and `opacity` change after
/// creation; every other field is fixed for the particle's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Stable index, used as a phase seed by the motion functions.
	pub id: usize,
	/// Drawn position: center plus orbit offset and wobble.
	pub x: f64,
	/// See [`Particle::x`].
	pub y: f64,
	/// Drifting orbit center.
	pub center_x: f64,
	/// See [`Particle::center_x`].
	pub center_y: f64,
	/// Body radius in pixels.
	pub size: f64,
	/// Drift multiplier.
	pub speed: f64,
	/// Orbital phase in radians. Never reduced modulo 2π.
	pub angle: f64,
	/// Orbit radius before breathing.
	pub revolution_radius: f64,
	/// Signed; the sign sets the orbit direction.
	pub revolution_speed: f64,
	/// Current opacity, inside the type's opacity range.
	pub opacity: f64,
	/// Glow strength multiplier.
	pub glow_intensity: f64,
	/// Fixed at creation.
	pub particle_type: ParticleType,
	/// Twinkle and wobble frequency.
	pub twinkle_speed: f64,
	/// Frequency of the per-particle flow term.
	pub drift_speed: f64,
}
