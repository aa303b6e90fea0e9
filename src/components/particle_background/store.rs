//! Particle population for one surface size.

use std::f64::consts::TAU;

use super::config::ParticleConfig;
use super::types::{Particle, ParticleType};

/// Owns the current particle set and the surface size it was built for.
///
/// The store is never resized in place: a new surface size means a new store.
#[derive(Clone, Debug)]
pub struct ParticleStore {
	/// Particles in id order.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleStore {
	/// Builds a fresh population for a `width` x `height` surface.
	pub fn initialize(
		config: &ParticleConfig,
		width: f64,
		height: f64,
		rng: &mut fastrand::Rng,
	) -> Self {
		let count = config.count.resolve(width, height);
		let particles = (0..count)
			.map(|id| spawn(id, config, width.max(0.0), height.max(0.0), rng))
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	/// Surface width the population was built for.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height the population was built for.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True for zero-area surfaces.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}

fn spawn(
	id: usize,
	config: &ParticleConfig,
	width: f64,
	height: f64,
	rng: &mut fastrand::Rng,
) -> Particle {
	let particle_type = ParticleType::random(rng);
	let style = config.styles.get(particle_type);
	let motion = &config.motion;
	let direction = if rng.bool() { 1.0 } else { -1.0 };

	Particle {
		id,
		x: rng.f64() * width,
		y: rng.f64() * height,
		center_x: rng.f64() * width,
		center_y: rng.f64() * height,
		size: style.size.sample(rng),
		speed: motion.speed.sample(rng),
		angle: rng.f64() * TAU,
		revolution_radius: style.revolution_radius.sample(rng),
		revolution_speed: motion.revolution_speed.sample(rng) * direction,
		opacity: style.opacity.sample(rng),
		glow_intensity: style.glow_intensity.sample(rng),
		particle_type,
		twinkle_speed: style.twinkle_speed.sample(rng),
		drift_speed: style.drift_speed.sample(rng),
	}
}
