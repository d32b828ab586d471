use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

use super::plexus::Plexus;
use super::pointer::PointerContext;
use super::stars::StarField;
use crate::components::teardown::Teardown;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn draw_stars(field: &StarField, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, field.width, field.height);
	for star in &field.stars {
		ctx.begin_path();
		let _ = ctx.arc(star.x, star.y, star.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", star.alpha));
		ctx.fill();
	}
}

fn draw_plexus(plexus: &Plexus, pointer: Option<(f64, f64)>, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, plexus.width, plexus.height);
	ctx.set_fill_style_str("rgba(200,220,255,0.6)");
	for p in &plexus.particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.size, 0.0, 2.0 * PI);
		ctx.fill();
	}

	ctx.set_line_width(0.8);
	for link in plexus.connections(pointer) {
		let (a, b) = (&plexus.particles[link.a], &plexus.particles[link.b]);
		ctx.set_stroke_style_str(&link.stroke_style());
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

/// Full-window twinkling stars with a drifting plexus on top.
#[component]
pub fn AmbientBackground() -> impl IntoView {
	let stars_ref = NodeRef::<leptos::html::Canvas>::new();
	let plexus_ref = NodeRef::<leptos::html::Canvas>::new();
	let pointer = PointerContext::default();
	let teardown = StoredValue::new_local(Teardown::default());
	let started = Rc::new(RefCell::new(false));
	on_cleanup(move || {
		teardown.try_update_value(Teardown::run);
	});

	Effect::new(move |_| {
		let (Some(stars_canvas), Some(plexus_canvas)) = (stars_ref.get(), plexus_ref.get()) else {
			return;
		};
		if std::mem::replace(&mut *started.borrow_mut(), true) {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let (Some((w, h)), Some(stars_ctx), Some(plexus_ctx)) = (
			window_size(&window),
			context_2d(&stars_canvas),
			context_2d(&plexus_canvas),
		) else {
			error!("background canvases could not be set up");
			return;
		};
		for canvas in [&stars_canvas, &plexus_canvas] {
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
		}

		let mut rng = js_sys::Math::random;
		let field = Rc::new(RefCell::new(StarField::new(w, h, &mut rng)));
		let plexus = Rc::new(RefCell::new(Plexus::new(w, h, &mut rng)));
		debug!(
			"background: {} stars, {} particles",
			field.borrow().stars.len(),
			plexus.borrow().particles.len()
		);

		let (field_resize, plexus_resize) = (field.clone(), plexus.clone());
		let (stars_resize, plexus_canvas_resize) = (stars_canvas.clone(), plexus_canvas.clone());
		let mut undo = Teardown::default();
		undo.listen(&window, "resize", move |_| {
			let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
				return;
			};
			for canvas in [&stars_resize, &plexus_canvas_resize] {
				canvas.set_width(nw as u32);
				canvas.set_height(nh as u32);
			}
			let mut rng = js_sys::Math::random;
			field_resize.borrow_mut().resize(nw, nh, &mut rng);
			plexus_resize.borrow_mut().resize(nw, nh, &mut rng);
		});

		let pointer_move = pointer.clone();
		undo.listen(&window, "mousemove", move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				pointer_move.set(ev.client_x() as f64, ev.client_y() as f64);
			}
		});
		let pointer_out = pointer.clone();
		undo.listen(&window, "mouseout", move |_| {
			pointer_out.clear();
		});

		undo.start_loop(move || {
			let mut field = field.borrow_mut();
			field.step();
			draw_stars(&field, &stars_ctx);
		});

		let pointer_read = pointer.clone();
		undo.start_loop(move || {
			let mut plexus = plexus.borrow_mut();
			plexus.step();
			draw_plexus(&plexus, pointer_read.get(), &plexus_ctx);
		});

		// Already unmounted: dropping `undo` stops what was just started.
		teardown.try_update_value(move |t| *t = undo);
	});

	view! {
		<canvas id="stars-bg" class="background-canvas" node_ref=stars_ref />
		<canvas id="plexus-bg" class="background-canvas" node_ref=plexus_ref />
	}
}
