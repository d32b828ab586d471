use crate::config::{STAR_DENSITY, STAR_MIN_ALPHA};

/// Number of objects to place on a canvas of the given size at `density`
/// square pixels each. Degenerate sizes give zero.
pub fn count_for_area(width: f64, height: f64, density: f64) -> usize {
	let area = width * height;
	if !area.is_finite() || area <= 0.0 || width <= 0.0 {
		return 0;
	}
	(area / density).ceil() as usize
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub alpha: f64,
	pub initial_alpha: f64,
	pub twinkle_speed: f64,
}

impl Star {
	fn random(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
		let (x, y, radius) = (rng() * width, rng() * height, rng() * 1.2);
		let alpha = rng() * 0.5 + 0.2;
		Self {
			x,
			y,
			radius,
			alpha,
			initial_alpha: alpha,
			twinkle_speed: rng() * 0.015 + 0.005,
		}
	}

	/// Move opacity one step, turning around at the floor or the starting alpha.
	pub fn step(&mut self) {
		self.alpha += self.twinkle_speed;
		if self.alpha > self.initial_alpha || self.alpha < STAR_MIN_ALPHA {
			self.twinkle_speed = -self.twinkle_speed;
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct StarField {
	pub width: f64,
	pub height: f64,
	pub stars: Vec<Star>,
}

impl StarField {
	pub fn new(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
		let mut field = Self::default();
		field.resize(width, height, rng);
		field
	}

	/// Throw away every star and scatter a fresh set for the new size.
	pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl FnMut() -> f64) {
		self.width = width;
		self.height = height;
		let count = count_for_area(width, height, STAR_DENSITY);
		self.stars = (0..count).map(|_| Star::random(width, height, rng)).collect();
	}

	pub fn step(&mut self) {
		self.stars.iter_mut().for_each(Star::step);
	}
}
