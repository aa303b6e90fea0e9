//! Self-rescheduling frame loop.
//!
//! The driver owns one particle store and one pending frame request. Every
//! frame callback runs the simulation step and the renderer for all particles
//! and then asks the scheduler for the next frame. Unmounting cancels the
//! pending request; after that, late callbacks do nothing.

use super::config::ParticleConfig;
use super::render::{self, Surface};
use super::simulation;
use super::store::ParticleStore;

/// Opaque id of a requested display frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(
	/// Id returned by the scheduler.
	pub i32,
);

/// Source of display-synchronized frame callbacks.
pub trait FrameScheduler {
	/// Requests one callback on the next display refresh.
	fn request(&mut self) -> Option<FrameHandle>;
	/// Cancels a request that has not fired yet.
	fn cancel(&mut self, handle: FrameHandle);
}

/// Drives the particle animation for one mounted surface.
pub struct FrameDriver<S: FrameScheduler> {
	config: ParticleConfig,
	store: ParticleStore,
	rng: fastrand::Rng,
	scheduler: S,
	pending: Option<FrameHandle>,
	last_frame: Option<f64>,
	running: bool,
}

impl<S: FrameScheduler> FrameDriver<S> {
	/// Builds the initial population and requests the first frame.
	pub fn mount(
		config: ParticleConfig,
		width: f64,
		height: f64,
		mut rng: fastrand::Rng,
		scheduler: S,
	) -> Self {
		let store = ParticleStore::initialize(&config, width, height, &mut rng);
		log::debug!(
			"tender-ai: particle background mounted ({}, {} particles, {}x{})",
			config.name,
			store.len(),
			width,
			height
		);

		let mut driver = Self {
			config,
			store,
			rng,
			scheduler,
			pending: None,
			last_frame: None,
			running: true,
		};
		driver.pending = driver.scheduler.request();
		driver
	}

	/// Handles one frame callback at display time `now` (milliseconds).
	///
	/// Returns whether the frame was simulated and painted. Frames inside the
	/// configured minimum interval are skipped but still rescheduled.
	pub fn on_frame<T: Surface + ?Sized>(&mut self, now: f64, surface: &mut T) -> bool {
		self.pending = None;
		if !self.running {
			return false;
		}

		let due = match (self.config.min_frame_interval_ms, self.last_frame) {
			(Some(min), Some(last)) => now - last >= min,
			_ => true,
		};

		if due {
			self.last_frame = Some(now);
			let (width, height) = (self.store.width(), self.store.height());
			for particle in &mut self.store.particles {
				simulation::step(particle, now, width, height, &self.config, &mut self.rng);
			}
			render::render(surface, &self.store.particles, width, height, &self.config);
		}

		self.pending = self.scheduler.request();
		due
	}

	/// Replaces the whole population for a new surface size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.store = ParticleStore::initialize(&self.config, width, height, &mut self.rng);
		log::debug!(
			"tender-ai: particle background resized to {}x{} ({} particles)",
			width,
			height,
			self.store.len()
		);
	}

	/// Stops the loop and cancels the outstanding frame request.
	pub fn unmount(&mut self) {
		if !self.running {
			return;
		}
		self.running = false;
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
		log::debug!("tender-ai: particle background unmounted");
	}

	/// Current population.
	pub fn store(&self) -> &ParticleStore {
		&self.store
	}

	/// False once unmounted.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Outstanding frame request, if any.
	pub fn pending(&self) -> Option<FrameHandle> {
		self.pending
	}

	/// The scheduler frames are requested from.
	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}
}

impl<S: FrameScheduler> Drop for FrameDriver<S> {
	fn drop(&mut self) {
		self.unmount();
	}
}
