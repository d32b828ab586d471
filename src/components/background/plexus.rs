use super::stars::count_for_area;
use crate::config::{PLEXUS_DENSITY, PLEXUS_FADE_DISTANCE_SQ, POINTER_RADIUS};

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub dx: f64,
	pub dy: f64,
	pub size: f64,
}

impl Particle {
	fn random(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
		let size = rng() * 1.5 + 0.5;
		Self {
			x: rng() * (width - size * 2.0) + size * 2.0,
			y: rng() * (height - size * 2.0) + size * 2.0,
			dx: rng() * 0.3 - 0.15,
			dy: rng() * 0.3 - 0.15,
			size,
		}
	}

	/// Bounce off the canvas edges, then advance one frame.
	fn step(&mut self, width: f64, height: f64) {
		if self.x > width || self.x < 0.0 {
			self.dx = -self.dx;
		}
		if self.y > height || self.y < 0.0 {
			self.dy = -self.dy;
		}
		self.x += self.dx;
		self.y += self.dy;
	}
}

/// A line to draw between particles `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	pub a: usize,
	pub b: usize,
	pub opacity: f64,
	pub near_pointer: bool,
}

impl Connection {
	pub fn stroke_style(&self) -> String {
		if self.near_pointer {
			format!("rgba(220,230,255,{})", self.opacity * 0.5)
		} else {
			format!("rgba(200,220,255,{})", self.opacity * 0.25)
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct Plexus {
	pub width: f64,
	pub height: f64,
	pub particles: Vec<Particle>,
}

impl Plexus {
	pub fn new(width: f64, height: f64, rng: &mut impl FnMut() -> f64) -> Self {
		let mut plexus = Self::default();
		plexus.resize(width, height, rng);
		plexus
	}

	/// Throw away every particle and scatter a fresh set for the new size.
	pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl FnMut() -> f64) {
		self.width = width;
		self.height = height;
		let count = count_for_area(width, height, PLEXUS_DENSITY);
		self.particles = (0..count)
			.map(|_| Particle::random(width, height, rng))
			.collect();
	}

	pub fn step(&mut self) {
		let (w, h) = (self.width, self.height);
		self.particles.iter_mut().for_each(|p| p.step(w, h));
	}

	/// Squared distance under which two particles are joined.
	pub fn link_threshold(&self) -> f64 {
		(self.width / 8.0) * (self.height / 8.0)
	}

	/// Every unique pair close enough to join. Quadratic in the particle count,
	/// which the density constant keeps small.
	pub fn connections(&self, pointer: Option<(f64, f64)>) -> Vec<Connection> {
		let threshold = self.link_threshold();
		let mut out = Vec::new();
		for (a, pa) in self.particles.iter().enumerate() {
			let near_pointer = pointer.is_some_and(|(mx, my)| {
				((mx - pa.x).powi(2) + (my - pa.y).powi(2)).sqrt() < POINTER_RADIUS
			});
			for (b, pb) in self.particles.iter().enumerate().skip(a + 1) {
				let dist_sq = (pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2);
				if dist_sq >= threshold {
					continue;
				}
				let opacity = (1.0 - dist_sq / PLEXUS_FADE_DISTANCE_SQ).clamp(0.0, 1.0);
				out.push(Connection {
					a,
					b,
					opacity,
					near_pointer,
				});
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn particle(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			dx: 0.0,
			dy: 0.0,
			size: 1.0,
		}
	}

	fn fixed(particles: Vec<Particle>) -> Plexus {
		Plexus {
			width: 800.0,
			height: 800.0,
			particles,
		}
	}

	#[test]
	fn count_follows_density_and_resize_resets() {
		let mut n = 0.0;
		let mut rng = move || {
			n = (n + 0.37) % 1.0;
			n
		};
		let mut plexus = Plexus::new(1200.0, 1000.0, &mut rng);
		assert_eq!(plexus.particles.len(), 100);
		plexus.resize(600.0, 500.0, &mut rng);
		assert_eq!(plexus.particles.len(), 25);
		assert!(plexus.particles.iter().all(|p| p.dx.abs() <= 0.15 && p.dy.abs() <= 0.15));
	}

	#[test]
	fn particles_reflect_off_edges() {
		let mut plexus = fixed(vec![Particle {
			x: 800.5,
			y: -0.5,
			dx: 0.1,
			dy: -0.1,
			size: 1.0,
		}]);
		plexus.step();
		let p = &plexus.particles[0];
		assert_eq!((p.dx, p.dy), (-0.1, 0.1));
		assert!(p.x < 800.5 && p.y > -0.5);
	}

	#[test]
	fn only_close_unique_pairs_connect() {
		// threshold is 100 * 100 = 10000
		let plexus = fixed(vec![
			particle(0.0, 0.0),
			particle(50.0, 0.0),
			particle(500.0, 500.0),
		]);
		let links = plexus.connections(None);
		assert_eq!(links.len(), 1);
		let link = links[0];
		assert_eq!((link.a, link.b), (0, 1));
		assert!((link.opacity - (1.0 - 2500.0 / 25000.0)).abs() < 1e-12);
		assert!(!link.near_pointer);
		assert!(link.stroke_style().starts_with("rgba(200,220,255,0.22"));
	}

	#[test]
	fn pointer_brightens_nearby_lines() {
		let plexus = fixed(vec![particle(100.0, 100.0), particle(120.0, 100.0)]);
		let near = plexus.connections(Some((110.0, 110.0)));
		assert!(near[0].near_pointer);
		let far = plexus.connections(Some((700.0, 700.0)));
		assert!(!far[0].near_pointer);
		assert!(near[0].stroke_style().starts_with("rgba(220,230,255,"));
	}

	#[test]
	fn empty_canvas_has_nothing_to_draw() {
		let mut rng = || 0.5;
		let mut plexus = Plexus::new(0.0, 0.0, &mut rng);
		plexus.step();
		assert!(plexus.connections(Some((1.0, 1.0))).is_empty());
	}
}
