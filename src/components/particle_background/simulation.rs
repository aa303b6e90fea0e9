//! Per-frame particle motion.
//!
//! Each particle orbits a slowly drifting center. The center drifts along a
//! single global heading (135° by default) perturbed by low-frequency sine
//! terms; the orbit itself is rotated by the same heading so all orbits stay
//! aligned with the flow. Opacity is recomputed every frame from time alone.
//!
//! The step only reads and writes the particle it is given, so particles can
//! be advanced in any order.

use std::f64::consts::TAU;

use super::config::{MotionConfig, ParticleConfig, TypeStyles};
use super::types::{Particle, ParticleType};

/// Advances `particle` to display time `now` (milliseconds).
///
/// The random source is only consumed when the particle wraps around an edge.
pub fn step(
	particle: &mut Particle,
	now: f64,
	width: f64,
	height: f64,
	config: &ParticleConfig,
	rng: &mut fastrand::Rng,
) {
	let motion = &config.motion;
	let id = particle.id as f64;

	particle.angle += particle.revolution_speed;

	let (dir_x, dir_y) = motion.drift_direction();
	let cosmic_flow = (now * particle.drift_speed + id * 0.2).sin() * 0.6;
	let universal_drift = (now * 0.0008 + id * 0.15).cos() * 0.4;
	let galaxy_spiral = (now * 0.0005 + particle.angle).sin() * 0.2;

	particle.center_x += (dir_x + cosmic_flow * 0.3 + universal_drift * 0.2) * particle.speed;
	particle.center_y += (dir_y + cosmic_flow * 0.2 + galaxy_spiral * 0.3) * particle.speed;

	let (offset_x, offset_y) = orbit_offset(particle, now, motion);
	let wobble = (now * particle.twinkle_speed + id).sin() * motion.wobble;

	particle.x = particle.center_x + offset_x + wobble;
	particle.y = particle.center_y + offset_y + wobble;

	particle.opacity = opacity(particle, now, &config.styles);

	wrap(particle, width, height, motion.buffer, rng);
}

/// Orbit offset from the center, rotated onto the drift heading.
fn orbit_offset(particle: &Particle, now: f64, motion: &MotionConfig) -> (f64, f64) {
	let breathing =
		1.0 + (now * motion.breathing_frequency + particle.id as f64).sin() * motion.breathing_depth;
	let radius = particle.revolution_radius * breathing;
	let (ox, oy) = (particle.angle.cos() * radius, particle.angle.sin() * radius);

	let (cos, sin) = motion.drift_direction();
	(ox * cos - oy * sin, ox * sin + oy * cos)
}

/// Opacity of `particle` at `now`, always inside its type's opacity range.
pub fn opacity(particle: &Particle, now: f64, styles: &TypeStyles) -> f64 {
	let id = particle.id as f64;
	let primary = (now * particle.twinkle_speed + id * 0.3).sin();
	let secondary = (now * particle.twinkle_speed * 1.5 + id * 0.2).cos() * 0.5;
	let pulse = (now * 0.002 + id * 0.1).sin() * 0.3;

	let level = match particle.particle_type {
		ParticleType::Star => (primary + secondary + 2.0) / 3.0,
		ParticleType::Cosmic => (primary + pulse + 2.0) / 3.0,
		ParticleType::Nebula => (pulse + 1.0) / 2.0,
	};

	styles.get(particle.particle_type).opacity.lerp(level)
}

/// Moves a center that left the surface by more than `buffer` to the
/// opposite edge, with a fresh cross-axis coordinate and orbital phase.
fn wrap(particle: &mut Particle, width: f64, height: f64, buffer: f64, rng: &mut fastrand::Rng) {
	if particle.center_x > width + buffer {
		particle.center_x = -buffer;
		particle.center_y = rng.f64() * height;
		particle.angle = rng.f64() * TAU;
	}
	if particle.center_y > height + buffer {
		particle.center_y = -buffer;
		particle.center_x = rng.f64() * width;
		particle.angle = rng.f64() * TAU;
	}
	if particle.center_x < -buffer {
		particle.center_x = width + buffer;
		particle.center_y = rng.f64() * height;
		particle.angle = rng.f64() * TAU;
	}
	if particle.center_y < -buffer {
		particle.center_y = height + buffer;
		particle.center_x = rng.f64() * width;
		particle.angle = rng.f64() * TAU;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_background::config::ParticleCount;
	use crate::components::particle_background::store::ParticleStore;

	fn store(count: usize, width: f64, height: f64) -> (ParticleConfig, ParticleStore) {
		let config = ParticleConfig {
			count: ParticleCount::Fixed(count),
			..ParticleConfig::cosmos()
		};
		let store = ParticleStore::initialize(&config, width, height, &mut fastrand::Rng::with_seed(5));
		(config, store)
	}

	#[test]
	fn step_is_deterministic_on_a_copy() {
		let (config, store) = store(50, 800.0, 600.0);
		let rng = fastrand::Rng::with_seed(99);

		for original in &store.particles {
			let (mut a, mut b) = (original.clone(), original.clone());
			step(&mut a, 1234.5, 800.0, 600.0, &config, &mut rng.clone());
			step(&mut b, 1234.5, 800.0, 600.0, &config, &mut rng.clone());
			assert_eq!(a, b);
		}
	}

	#[test]
	fn only_motion_fields_change() {
		let (config, mut store) = store(40, 800.0, 600.0);
		let before = store.particles.clone();
		let mut rng = fastrand::Rng::with_seed(1);

		for frame in 0..200 {
			for p in &mut store.particles {
				step(p, frame as f64 * 16.7, 800.0, 600.0, &config, &mut rng);
			}
		}

		for (old, new) in before.iter().zip(&store.particles) {
			assert_eq!(old.id, new.id);
			assert_eq!(old.particle_type, new.particle_type);
			assert_eq!(old.size, new.size);
			assert_eq!(old.speed, new.speed);
			assert_eq!(old.revolution_radius, new.revolution_radius);
			assert_eq!(old.revolution_speed, new.revolution_speed);
			assert_eq!(old.glow_intensity, new.glow_intensity);
			assert_eq!(old.twinkle_speed, new.twinkle_speed);
			assert_eq!(old.drift_speed, new.drift_speed);
		}
	}

	#[test]
	fn angle_advances_by_revolution_speed() {
		let (config, store) = store(1, 800.0, 600.0);
		let mut p = store.particles[0].clone();
		p.center_x = 400.0;
		p.center_y = 300.0;
		let start = p.angle;
		step(&mut p, 0.0, 800.0, 600.0, &config, &mut fastrand::Rng::with_seed(0));
		assert!((p.angle - (start + p.revolution_speed)).abs() < 1e-12);
	}

	#[test]
	fn crossing_right_edge_wraps_to_left_buffer() {
		let (config, store) = store(1, 800.0, 600.0);
		let buffer = config.motion.buffer;
		let mut p = store.particles[0].clone();
		p.center_x = 800.0 + buffer + 10.0;
		p.center_y = 300.0;

		step(&mut p, 0.0, 800.0, 600.0, &config, &mut fastrand::Rng::with_seed(8));

		assert_eq!(p.center_x, -buffer);
		assert!((0.0..600.0).contains(&p.center_y));
		assert!((0.0..TAU).contains(&p.angle));
	}

	#[test]
	fn crossing_top_edge_wraps_to_bottom_buffer() {
		let (config, store) = store(1, 800.0, 600.0);
		let buffer = config.motion.buffer;
		let mut p = store.particles[0].clone();
		p.center_x = 400.0;
		p.center_y = -buffer - 10.0;

		step(&mut p, 0.0, 800.0, 600.0, &config, &mut fastrand::Rng::with_seed(8));

		assert_eq!(p.center_y, 600.0 + buffer);
		assert!((0.0..800.0).contains(&p.center_x));
	}

	#[test]
	fn crossing_left_edge_wraps_to_right_buffer() {
		let (config, store) = store(1, 800.0, 600.0);
		let buffer = config.motion.buffer;
		let mut p = store.particles[0].clone();
		p.center_x = -buffer - 10.0;
		p.center_y = 300.0;

		step(&mut p, 0.0, 800.0, 600.0, &config, &mut fastrand::Rng::with_seed(8));

		assert_eq!(p.center_x, 800.0 + buffer);
		assert!((0.0..600.0).contains(&p.center_y));
		assert!((0.0..TAU).contains(&p.angle));
	}

	#[test]
	fn crossing_bottom_edge_wraps_to_top_buffer() {
		let (config, store) = store(1, 800.0, 600.0);
		let buffer = config.motion.buffer;
		let mut p = store.particles[0].clone();
		p.center_x = 400.0;
		p.center_y = 600.0 + buffer + 10.0;

		step(&mut p, 0.0, 800.0, 600.0, &config, &mut fastrand::Rng::with_seed(8));

		assert_eq!(p.center_y, -buffer);
		assert!((0.0..800.0).contains(&p.center_x));
		assert!((0.0..TAU).contains(&p.angle));
	}

	#[test]
	fn opacity_respects_type_range() {
		let (config, store) = store(90, 800.0, 600.0);
		for p in &store.particles {
			let range = config.styles.get(p.particle_type).opacity;
			for t in (0..2000).map(|i| i as f64 * 37.0) {
				assert!(range.contains(opacity(p, t, &config.styles)));
			}
		}
	}

	#[test]
	fn orbit_is_rotated_onto_drift_heading() {
		let motion = MotionConfig {
			breathing_depth: 0.0,
			..MotionConfig::default()
		};
		let (_, store) = store(1, 800.0, 600.0);
		let mut p = store.particles[0].clone();
		p.angle = 0.0;
		p.revolution_radius = 10.0;

		let (x, y) = orbit_offset(&p, 0.0, &motion);
		let (dx, dy) = motion.drift_direction();
		assert!((x - 10.0 * dx).abs() < 1e-9);
		assert!((y - 10.0 * dy).abs() < 1e-9);
	}
}
