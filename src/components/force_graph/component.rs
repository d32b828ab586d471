use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::types::{GraphClick, GraphData};
use crate::components::teardown::Teardown;
use crate::config::graph_physics;
use crate::data::NodeId;

fn viewport(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn local_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed graph drawn on a canvas.
///
/// Reports clicks (with the node under the pointer, if any) and hover
/// enter/leave per node. Dragging a node or panning the background never
/// reports a click.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_click: Option<Callback<GraphClick>>,
	#[prop(optional, into)] on_hover_node: Option<Callback<NodeId>>,
	#[prop(optional, into)] on_blur_node: Option<Callback<NodeId>>,
	#[prop(optional, into)] cursor: Option<Signal<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let teardown = StoredValue::new_local(Teardown::default());
	let started = Rc::new(Cell::new(false));
	let state_init = state.clone();
	on_cleanup(move || {
		teardown.try_update_value(Teardown::run);
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			match viewport(&window) {
				Some(size) => size,
				None => return,
			}
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			log::error!("canvas has no 2d context");
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&data.get(), graph_physics(), w, h));

		// The loop is already scheduled when the data changes; only the state is swapped.
		if started.replace(true) {
			return;
		}
		let mut undo = Teardown::default();
		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			undo.listen(&window, "resize", move |_| {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			});
		}

		let state_anim = state_init.clone();
		undo.start_loop(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
		});

		// Already unmounted: dropping `undo` stops what was just started.
		teardown.try_update_value(move |t| *t = undo);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press_start(x, y);
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);

		let mut hover_change = None;
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.press_move(x, y);

			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				if hovered != s.hover.node {
					let before = s.hover.node.and_then(|idx| s.node_id(idx));
					let after = hovered.and_then(|idx| s.node_id(idx));
					hover_change = Some((before, after));
				}
				s.set_hover(hovered);
			}

			let moved = s.press.as_ref().is_some_and(|p| p.moved);
			if s.drag.active {
				if let (true, Some(idx)) = (moved, s.drag.node_idx) {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}

		// Callbacks run after the borrow is released so they may touch the canvas again.
		if let Some((before, after)) = hover_change {
			if let (Some(id), Some(cb)) = (before, on_blur_node) {
				cb.run(id);
			}
			if let (Some(id), Some(cb)) = (after, on_hover_node) {
				cb.run(id);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);

		let mut click = None;
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			let was_click = s.press_end();
			if s.drag.active && !was_click {
				if let Some(idx) = s.drag.node_idx {
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.is_anchor = true;
						}
					});
				}
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;

			if was_click {
				let node = s.node_at_position(x, y).and_then(|idx| s.node_id(idx));
				click = Some(GraphClick { node });
			}
		}

		if let (Some(click), Some(cb)) = (click, on_click) {
			cb.run(click);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut blurred = None;
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.press = None;
			blurred = s.hover.node.and_then(|idx| s.node_id(idx));
			s.set_hover(None);
		}
		if let (Some(id), Some(cb)) = (blurred, on_blur_node) {
			cb.run(id);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = local_position(&canvas, &ev);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	let style = move || {
		let cursor = cursor.map(|c| c.get()).unwrap_or_else(|| "grab".into());
		format!("display: block; cursor: {cursor};")
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class=super::CANVAS_CLASS
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style=style
		/>
	}
}
