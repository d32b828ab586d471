//! Animation loops and window listeners that stop when their component goes away.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, Window};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Undo list for one mounted component.
///
/// Running it (or dropping it) clears the `alive` flag first, then undoes
/// every registered task newest first. Running twice does nothing.
pub struct Teardown {
	alive: Rc<Cell<bool>>,
	tasks: Vec<Box<dyn FnOnce()>>,
}

impl Default for Teardown {
	fn default() -> Self {
		Self {
			alive: Rc::new(Cell::new(true)),
			tasks: Vec::new(),
		}
	}
}

impl Teardown {
	pub fn is_alive(&self) -> bool {
		self.alive.get()
	}

	pub fn defer(&mut self, task: impl FnOnce() + 'static) {
		self.tasks.push(Box::new(task));
	}

	pub fn run(&mut self) {
		self.alive.set(false);
		while let Some(task) = self.tasks.pop() {
			task();
		}
	}

	/// Call `frame` on every display refresh until this teardown runs.
	pub fn start_loop(&mut self, mut frame: impl FnMut() + 'static) {
		let slot: FrameSlot = Rc::new(RefCell::new(None));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let (slot_inner, pending_inner, alive) = (slot.clone(), pending.clone(), self.alive.clone());

		*slot.borrow_mut() = Some(Closure::new(move || {
			if !alive.get() {
				return;
			}
			frame();
			if let Some(ref cb) = *slot_inner.borrow() {
				pending_inner.set(request_frame(cb));
			}
		}));
		if let Some(ref cb) = *slot.borrow() {
			pending.set(request_frame(cb));
		}

		self.defer(move || {
			if let (Some(window), Some(id)) = (web_sys::window(), pending.take()) {
				let _ = window.cancel_animation_frame(id);
			}
			// The closure holds its own slot; emptying the slot frees both.
			slot.borrow_mut().take();
		});
	}

	/// Add a window listener that is removed again when this teardown runs.
	pub fn listen(&mut self, window: &Window, event: &'static str, handler: impl FnMut(Event) + 'static) {
		let cb: Closure<dyn FnMut(Event)> = Closure::new(handler);
		if window
			.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
			.is_err()
		{
			log::warn!("could not listen for {event}");
			return;
		}
		let window = window.clone();
		self.defer(move || {
			let _ = window.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		});
	}
}

impl Drop for Teardown {
	fn drop(&mut self) {
		self.run();
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}
