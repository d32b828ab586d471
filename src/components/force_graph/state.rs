use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::types::{EdgeStyle, GraphData, GraphNode, NodeShape};
use crate::data::NodeId;

/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Where the current press started and whether it has moved far enough to stop being a click.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	pub x: f64,
	pub y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<GraphNode, EdgeStyle>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub press: Option<PressState>,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	ids: HashMap<DefaultNodeIdx, NodeId>,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		params: SimulationParameters,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(params);
		let mut id_to_idx = HashMap::new();
		let mut ids = HashMap::new();
		let mut edges = Vec::new();
		let ring = 60.0 * (data.nodes.len() as f64).sqrt().max(1.0);

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				warn!("duplicate node id {} ignored by canvas", node.id);
				continue;
			}
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: node.clone(),
			});
			id_to_idx.insert(node.id, idx);
			ids.insert(idx, node.id);
		}

		for link in &data.links {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(
						src,
						tgt,
						EdgeData {
							user_data: link.style.clone(),
						},
					);
					edges.push((src, tgt));
				}
				_ => warn!(
					"edge {} -> {} references an unknown node",
					link.source, link.target
				),
			}
		}

		Self {
			graph,
			edges,
			ids,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			press: None,
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let info = &node.data.user_data;
			let (hw, hh) = info.half_extents();
			let hit = match info.shape {
				NodeShape::Circle => (dx * dx + dy * dy).sqrt() < hw,
				NodeShape::Box => dx.abs() < hw && dy.abs() < hh,
			};
			// Later nodes are drawn on top, so they win.
			if hit {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		self.ids.get(&idx).copied()
	}

	pub fn press_start(&mut self, x: f64, y: f64) {
		self.press = Some(PressState { x, y, moved: false });
	}

	pub fn press_move(&mut self, x: f64, y: f64) {
		if let Some(press) = self.press.as_mut() {
			let (dx, dy) = (x - press.x, y - press.y);
			if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
				press.moved = true;
			}
		}
	}

	/// Finish a press; returns true when it was a click rather than a drag or pan.
	pub fn press_end(&mut self) -> bool {
		self.press.take().is_some_and(|p| !p.moved)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{GraphLink, NodeColor, NodeFont};
	use super::*;

	fn node(id: NodeId, shape: NodeShape) -> GraphNode {
		GraphNode {
			id,
			label: None,
			shape,
			size: 50.0,
			color: NodeColor {
				border: "#fff".into(),
				background: "#000".into(),
			},
			font: NodeFont {
				color: "white".into(),
				size: 14.0,
			},
			width_constraint: Some(150.0),
			height_constraint: Some(50.0),
			link: None,
		}
	}

	fn params() -> SimulationParameters {
		crate::config::graph_physics()
	}

	#[test]
	fn single_node_is_hit_at_view_center() {
		let data = GraphData {
			nodes: vec![node(1, NodeShape::Circle)],
			links: vec![],
		};
		let state = ForceGraphState::new(&data, params(), 800.0, 600.0);
		// A lone node sits on the ring at angle 0, i.e. 60 units right of origin.
		let idx = state.node_at_position(400.0 + 60.0, 300.0).unwrap();
		assert_eq!(state.node_id(idx), Some(1));
		assert!(state.node_at_position(10.0, 10.0).is_none());
	}

	#[test]
	fn dangling_edges_and_duplicate_ids_are_dropped() {
		let data = GraphData {
			nodes: vec![node(1, NodeShape::Circle), node(1, NodeShape::Box)],
			links: vec![GraphLink {
				source: 1,
				target: 99,
				style: EdgeStyle::default(),
			}],
		};
		let state = ForceGraphState::new(&data, params(), 800.0, 600.0);
		assert_eq!(state.ids.len(), 1);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn small_movement_still_counts_as_click() {
		let data = GraphData::default();
		let mut state = ForceGraphState::new(&data, params(), 800.0, 600.0);
		state.press_start(100.0, 100.0);
		state.press_move(102.0, 101.0);
		assert!(state.press_end());

		state.press_start(100.0, 100.0);
		state.press_move(130.0, 100.0);
		assert!(!state.press_end());
		assert!(!state.press_end());
	}

	#[test]
	fn hover_collects_neighbors() {
		let data = GraphData {
			nodes: vec![
				node(1, NodeShape::Circle),
				node(2, NodeShape::Box),
				node(3, NodeShape::Box),
			],
			links: vec![GraphLink {
				source: 1,
				target: 2,
				style: EdgeStyle::default(),
			}],
		};
		let mut state = ForceGraphState::new(&data, params(), 800.0, 600.0);
		let idx = |id| *state.ids.iter().find(|(_, v)| **v == id).unwrap().0;
		let (a, b, c) = (idx(1), idx(2), idx(3));
		state.set_hover(Some(a));
		assert!(state.is_highlighted(b));
		assert!(!state.is_highlighted(c));
		state.set_hover(None);
		assert!(state.is_hovered(a));
	}
}
