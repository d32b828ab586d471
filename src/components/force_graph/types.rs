use serde_json::{Map, Value};

use crate::data::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	Circle,
	Box,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeColor {
	pub border: String,
	pub background: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFont {
	pub color: String,
	pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub label: Option<String>,
	pub shape: NodeShape,
	/// Circle radius; boxes are sized by their constraints instead.
	pub size: f64,
	pub color: NodeColor,
	pub font: NodeFont,
	pub width_constraint: Option<f64>,
	pub height_constraint: Option<f64>,
	pub link: Option<String>,
}

impl GraphNode {
	/// Half extents of the node in world units.
	pub fn half_extents(&self) -> (f64, f64) {
		match self.shape {
			NodeShape::Circle => (self.size, self.size),
			NodeShape::Box => (
				self.width_constraint.unwrap_or(self.size * 2.0) / 2.0,
				self.height_constraint.unwrap_or(self.size) / 2.0,
			),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeStyle {
	pub color: Option<String>,
	pub width: Option<f64>,
	pub dashes: bool,
	pub label: Option<String>,
}

impl EdgeStyle {
	/// Pick out the styling keys the canvas understands; the rest is ignored.
	pub fn from_json(style: &Map<String, Value>) -> Self {
		let color = match style.get("color") {
			Some(Value::String(c)) => Some(c.clone()),
			Some(Value::Object(c)) => c.get("color").and_then(Value::as_str).map(str::to_owned),
			_ => None,
		};
		Self {
			color,
			width: style.get("width").and_then(Value::as_f64),
			dashes: style.get("dashes").and_then(Value::as_bool).unwrap_or(false),
			label: style.get("label").and_then(Value::as_str).map(str::to_owned),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
	pub style: EdgeStyle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Payload of a click on the canvas: the node under the pointer, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphClick {
	pub node: Option<NodeId>,
}
