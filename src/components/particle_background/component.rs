//! Leptos component wrapping the particle background canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page that
//! never receives pointer events. Frames are driven by
//! `requestAnimationFrame`; a window `resize` listener rebuilds the particle
//! population. Both are released when the component is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::config::ParticleConfig;
use super::driver::{FrameDriver, FrameHandle, FrameScheduler};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type SharedDriver = Rc<RefCell<Option<FrameDriver<RafScheduler>>>>;

const CANVAS_STYLE: &str = "position: fixed; inset: 0; pointer-events: none; z-index: 0; \
	opacity: 0.9; background: transparent; mix-blend-mode: screen;";

/// Schedules frames with `window.requestAnimationFrame`.
struct RafScheduler {
	window: Window,
	callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
	fn request(&mut self) -> Option<FrameHandle> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}
}

/// Everything a mounted background holds on to.
struct MountedBackground {
	window: Window,
	driver: SharedDriver,
	callback: FrameCallback,
	on_resize: Closure<dyn FnMut()>,
}

impl MountedBackground {
	fn teardown(self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		// Dropping the driver cancels the pending frame.
		self.driver.borrow_mut().take();
		self.callback.borrow_mut().take();
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	canvas.set_width(width.max(0.0) as u32);
	canvas.set_height(height.max(0.0) as u32);
}

/// Starts the animation on `canvas`. Returns `None` (and draws nothing) when
/// the window or a 2D context is unavailable.
fn mount(canvas: HtmlCanvasElement, config: ParticleConfig) -> Option<MountedBackground> {
	let window = web_sys::window()?;
	let (width, height) = viewport_size(&window)?;
	size_canvas(&canvas, width, height);

	let Some(ctx) = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
	else {
		log::warn!("tender-ai: 2d canvas context unavailable, particle background disabled");
		return None;
	};

	let driver: SharedDriver = Rc::new(RefCell::new(None));
	let callback: FrameCallback = Rc::new(RefCell::new(None));

	let (driver_frame, mut ctx) = (driver.clone(), ctx);
	*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
		if let Some(ref mut d) = *driver_frame.borrow_mut() {
			d.on_frame(now, &mut ctx);
		}
	}));

	*driver.borrow_mut() = Some(FrameDriver::mount(
		config,
		width,
		height,
		fastrand::Rng::new(),
		RafScheduler {
			window: window.clone(),
			callback: callback.clone(),
		},
	));

	let (driver_resize, canvas_resize) = (driver.clone(), canvas);
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		let Some((w, h)) = web_sys::window().as_ref().and_then(viewport_size) else {
			return;
		};
		size_canvas(&canvas_resize, w, h);
		if let Some(ref mut d) = *driver_resize.borrow_mut() {
			d.resize(w, h);
		}
	});
	let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

	Some(MountedBackground {
		window,
		driver,
		callback,
		on_resize,
	})
}

/// Animated particle field rendered behind page content.
///
/// Pass a [`ParticleConfig`] to pick a preset other than
/// [`ParticleConfig::cosmos`].
#[component]
pub fn ParticleBackground(#[prop(optional)] config: Option<ParticleConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted = StoredValue::new_local(None::<MountedBackground>);
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let config = config.clone();
		mounted.update_value(|slot| {
			if let Some(previous) = slot.take() {
				previous.teardown();
			}
			*slot = mount(canvas, config);
		});
	});

	on_cleanup(move || {
		mounted.update_value(|slot| {
			if let Some(background) = slot.take() {
				background.teardown();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}
