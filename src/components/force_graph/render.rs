use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use super::types::{GraphNode, NodeShape};
use crate::config::DEFAULT_EDGE_COLOR;

const BACKGROUND: &str = "#0d1117";
const BORDER_WIDTH: f64 = 2.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let style = &edge.user_data;
		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at 1.0; t=1: highlighted edges stay, others fade to 0.2
		let alpha = if is_highlighted { 1.0 } else { 1.0 - 0.8 * t };
		let base_width = style.width.unwrap_or(1.5);
		let width = if is_highlighted {
			base_width * (1.0 + 0.5 * t)
		} else {
			base_width
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(style.color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR));
		ctx.set_line_width(width / k.max(0.5));
		if style.dashes {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(8.0),
				&JsValue::from_f64(4.0),
			));
		}
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if let Some(label) = &style.label {
			ctx.set_fill_style_str("#8b949e");
			ctx.set_font("11px sans-serif");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 4.0);
		}
		ctx.set_global_alpha(1.0);
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	// Dimmed nodes first, highlighted ones on top.
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		ctx.set_global_alpha(1.0 - 0.7 * t);
		draw_node(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, 1.0);
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let scale = if state.is_hovered(idx) {
			1.0 + 0.1 * t
		} else {
			1.0 + 0.05 * t
		};

		if state.is_hovered(idx) && t > 0.01 {
			let (hw, hh) = info.half_extents();
			let glow_radius = hw.max(hh) * (1.3 + 0.4 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, hw.min(hh) * 0.5, x, y, glow_radius)
			{
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.25 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		draw_node(ctx, info, x, y, scale);
	});
}

fn draw_node(ctx: &CanvasRenderingContext2d, info: &GraphNode, x: f64, y: f64, scale: f64) {
	let (hw, hh) = info.half_extents();
	let (hw, hh) = (hw * scale, hh * scale);

	ctx.begin_path();
	match info.shape {
		NodeShape::Circle => {
			let _ = ctx.arc(x, y, hw, 0.0, 2.0 * PI);
		}
		NodeShape::Box => {
			ctx.rect(x - hw, y - hh, hw * 2.0, hh * 2.0);
		}
	}
	ctx.set_fill_style_str(&info.color.background);
	ctx.fill();
	ctx.set_stroke_style_str(&info.color.border);
	ctx.set_line_width(BORDER_WIDTH);
	ctx.stroke();

	if let Some(label) = &info.label {
		draw_label(ctx, info, label, x, y, hw * 2.0 - 8.0);
	}
}

/// Center the label inside the node, wrapping words to fit `max_width`.
fn draw_label(
	ctx: &CanvasRenderingContext2d,
	info: &GraphNode,
	label: &str,
	x: f64,
	y: f64,
	max_width: f64,
) {
	ctx.set_fill_style_str(&info.font.color);
	ctx.set_font(&format!("{}px sans-serif", info.font.size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let lines = wrap_words(label, max_width, |s| {
		ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
	});
	let line_height = info.font.size * 1.15;
	let max_lines = match info.shape {
		NodeShape::Circle => 3,
		NodeShape::Box => 2,
	};
	let shown = lines.len().min(max_lines);
	let top = y - line_height * (shown as f64 - 1.0) / 2.0;
	for (i, line) in lines.iter().take(shown).enumerate() {
		let text = if i + 1 == shown && lines.len() > shown {
			format!("{line}…")
		} else {
			line.clone()
		};
		let _ = ctx.fill_text(&text, x, top + line_height * i as f64);
	}
	ctx.set_text_baseline("alphabetic");
}

fn wrap_words(text: &str, max_width: f64, mut measure: impl FnMut(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		let candidate = if current.is_empty() {
			word.to_owned()
		} else {
			format!("{current} {word}")
		};
		if !current.is_empty() && measure(&candidate) > max_width {
			lines.push(std::mem::replace(&mut current, word.to_owned()));
		} else {
			current = candidate;
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::wrap_words;

	#[test]
	fn wraps_on_word_boundaries() {
		// Every character is 10 units wide.
		let lines = wrap_words("deep space radiation", 110.0, |s| s.len() as f64 * 10.0);
		assert_eq!(lines, vec!["deep space", "radiation"]);
	}

	#[test]
	fn overlong_word_gets_its_own_line() {
		let lines = wrap_words("a supercalifragilistic b", 50.0, |s| s.len() as f64 * 10.0);
		assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
	}
}
