//! Frame painting.
//!
//! Every frame starts from a fully cleared surface; each particle is a white
//! disc with a shadow glow plus one type-specific accent disc:
//! - star: small, near-opaque core
//! - cosmic: half-size inner glow
//! - nebula: wide, faint halo

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::config::{Color, ParticleConfig, TypeStyle};
use super::types::Particle;

/// A filled, glowing disc.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Radius in pixels.
	pub radius: f64,
	/// Fill color.
	pub fill: Color,
	/// Shadow blur radius in pixels.
	pub blur: f64,
	/// Shadow color.
	pub glow: Color,
}

/// Minimal 2D raster target the renderer draws into.
pub trait Surface {
	/// Wipes the whole `width` x `height` area to transparent.
	fn clear(&mut self, width: f64, height: f64);
	/// Fills `circle` with its shadow glow.
	fn fill_circle(&mut self, circle: &Circle);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, circle: &Circle) {
		self.save();
		self.set_shadow_blur(circle.blur);
		self.set_shadow_color(&circle.glow.to_css());
		self.begin_path();
		let _ = self.arc(circle.x, circle.y, circle.radius, 0.0, TAU);
		self.set_fill_style_str(&circle.fill.to_css());
		self.fill();
		self.restore();
	}
}

/// Paints one frame of `particles` onto `surface`.
pub fn render<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	width: f64,
	height: f64,
	config: &ParticleConfig,
) {
	surface.clear(width, height);

	for particle in particles {
		let style = config.styles.get(particle.particle_type);
		let [body, accent] = circles(particle, style, config.color);
		surface.fill_circle(&body);
		surface.fill_circle(&accent);
	}
}

/// Body and accent discs for one particle, in draw order.
fn circles(particle: &Particle, style: &TypeStyle, color: Color) -> [Circle; 2] {
	let opacity = particle.opacity;
	let body_alpha = opacity * style.body_alpha;
	let accent = &style.accent;

	[
		Circle {
			x: particle.x,
			y: particle.y,
			radius: particle.size,
			fill: color.with_alpha(body_alpha),
			blur: particle.size * style.blur_per_px,
			glow: color.with_alpha(body_alpha * particle.glow_intensity),
		},
		Circle {
			x: particle.x,
			y: particle.y,
			radius: particle.size * accent.radius_scale,
			fill: color.with_alpha(opacity * accent.alpha_scale),
			blur: particle.size * accent.blur_per_px,
			glow: color.with_alpha(opacity * accent.glow_alpha_scale),
		},
	]
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::particle_background::config::ParticleCount;
	use crate::components::particle_background::store::ParticleStore;
	use crate::components::particle_background::types::ParticleType;

	/// Records draw calls instead of rasterizing.
	#[derive(Default)]
	pub(crate) struct RecordingSurface {
		pub clears: Vec<(f64, f64)>,
		pub circles: Vec<Circle>,
	}

	impl Surface for RecordingSurface {
		fn clear(&mut self, width: f64, height: f64) {
			self.clears.push((width, height));
		}

		fn fill_circle(&mut self, circle: &Circle) {
			self.circles.push(circle.clone());
		}
	}

	fn particle_of(kind: ParticleType) -> (ParticleConfig, Particle) {
		let config = ParticleConfig {
			count: ParticleCount::Fixed(200),
			..ParticleConfig::cosmos()
		};
		let store = ParticleStore::initialize(&config, 500.0, 500.0, &mut fastrand::Rng::with_seed(21));
		let particle = store
			.particles
			.into_iter()
			.find(|p| p.particle_type == kind)
			.unwrap();
		(config, particle)
	}

	#[test]
	fn frame_clears_once_then_draws_two_discs_per_particle() {
		let config = ParticleConfig::cosmos();
		let store = ParticleStore::initialize(&config, 800.0, 600.0, &mut fastrand::Rng::with_seed(2));
		let mut surface = RecordingSurface::default();

		render(&mut surface, &store.particles, 800.0, 600.0, &config);

		assert_eq!(surface.clears, vec![(800.0, 600.0)]);
		assert_eq!(surface.circles.len(), store.len() * 2);
	}

	#[test]
	fn star_core_is_smaller_and_brighter() {
		let (config, p) = particle_of(ParticleType::Star);
		let [body, core] = circles(&p, config.styles.get(p.particle_type), Color::WHITE);
		assert!(core.radius < body.radius);
		assert!(core.fill.a >= body.fill.a);
		assert_eq!((body.x, body.y), (p.x, p.y));
		assert_eq!(body.fill.a, p.opacity);
	}

	#[test]
	fn nebula_halo_is_larger_fainter_and_wider() {
		let (config, p) = particle_of(ParticleType::Nebula);
		let [body, halo] = circles(&p, config.styles.get(p.particle_type), Color::WHITE);
		assert!(halo.radius > body.radius);
		assert!(halo.fill.a < body.fill.a);
		assert!(halo.blur > body.blur);
	}

	#[test]
	fn glow_scales_with_size() {
		let (config, mut p) = particle_of(ParticleType::Cosmic);
		let style = *config.styles.get(p.particle_type);
		let [small, _] = circles(&p, &style, Color::WHITE);
		p.size *= 2.0;
		let [large, _] = circles(&p, &style, Color::WHITE);
		assert!((large.blur - 2.0 * small.blur).abs() < 1e-9);
	}

	#[test]
	fn discs_are_white() {
		let (config, p) = particle_of(ParticleType::Cosmic);
		for circle in circles(&p, config.styles.get(p.particle_type), config.color) {
			assert_eq!((circle.fill.r, circle.fill.g, circle.fill.b), (255, 255, 255));
		}
	}
}
