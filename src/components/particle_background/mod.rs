//! Animated particle background.
//!
//! Draws a field of orbiting, twinkling white particles on a full-viewport
//! canvas layered behind the page:
//! - a [`ParticleStore`] rebuilt on mount and on every resize
//! - a per-frame [`simulation::step`] for each particle
//! - a [`render`](render::render) pass that clears and repaints the surface
//! - a [`FrameDriver`] that ties them to the display refresh
//!
//! # Example
//!
//! ```ignore
//! use tender_ai::components::particle_background::{ParticleBackground, ParticleConfig};
//!
//! view! { <ParticleBackground config=ParticleConfig::calm() /> }
//! ```

mod component;
pub mod config;
pub mod driver;
pub mod render;
pub mod simulation;
pub mod store;
pub mod types;

pub use component::ParticleBackground;
pub use config::{Color, ParticleConfig, ParticleCount};
pub use driver::{FrameDriver, FrameHandle, FrameScheduler};
pub use render::{Circle, Surface};
pub use store::ParticleStore;
pub use types::{Particle, ParticleType, Range};
