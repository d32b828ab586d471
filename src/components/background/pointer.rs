use std::cell::Cell;
use std::rc::Rc;

/// Last known pointer position, shared between the mouse handlers that write
/// it and the plexus loop that reads it. Single-threaded, so a `Cell` is enough.
#[derive(Clone, Debug, Default)]
pub struct PointerContext {
	position: Rc<Cell<Option<(f64, f64)>>>,
}

impl PointerContext {
	pub fn set(&self, x: f64, y: f64) {
		self.position.set(Some((x, y)));
	}

	pub fn clear(&self) {
		self.position.set(None);
	}

	pub fn get(&self) -> Option<(f64, f64)> {
		self.position.get()
	}
}

#[cfg(test)]
mod tests {
	use super::PointerContext;

	#[test]
	fn clones_share_position() {
		let writer = PointerContext::default();
		let reader = writer.clone();
		assert_eq!(reader.get(), None);
		writer.set(3.0, 4.0);
		assert_eq!(reader.get(), Some((3.0, 4.0)));
		writer.clear();
		assert_eq!(reader.get(), None);
	}
}
