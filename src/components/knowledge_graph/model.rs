//! Turns loaded records into the node and edge sets the canvas draws.
//!
//! Topic nodes use the cluster number as identifier and paper nodes use
//! `PAPER_ID_OFFSET + Id`. Topic clusters are kept below the offset and every
//! emitted identifier is checked, so no two nodes ever share one.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;

use crate::components::force_graph::{
	EdgeStyle, GraphData, GraphLink, GraphNode, NodeColor, NodeFont, NodeShape,
};
use crate::config::{
	PAPER_BOX_HEIGHT, PAPER_BOX_WIDTH, PAPER_FONT_SIZE, PAPER_ID_OFFSET, PAPER_SWATCH, Swatch,
	TOPIC_FONT_SIZE, TOPIC_NODE_SIZE, TOPIC_PALETTE,
};
use crate::data::{NodeId, PaperRecord, RecordStore, SelectedPaperRecord};

/// Papers grouped under one cluster, in the order they were read.
#[derive(Clone, Debug, PartialEq)]
pub struct Topic {
	pub cluster: i64,
	pub name: String,
	pub papers: Vec<PaperRecord>,
}

/// Cluster number to topic; remembers the order clusters were first seen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopicMap {
	topics: HashMap<i64, Topic>,
	order: Vec<i64>,
}

impl TopicMap {
	pub fn get(&self, cluster: i64) -> Option<&Topic> {
		self.topics.get(&cluster)
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Topic> + '_ {
		self.order.iter().filter_map(|c| self.topics.get(c))
	}
}

/// A record the builder left out, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skipped {
	PaperWithoutCluster { id: i64 },
	ClusterOutOfRange { cluster: i64 },
	SelectedWithoutId { title: String },
	DuplicateNode { id: NodeId },
}

impl fmt::Display for Skipped {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Skipped::PaperWithoutCluster { id } => write!(f, "paper {id} has no Cluster"),
			Skipped::ClusterOutOfRange { cluster } => {
				write!(f, "cluster {cluster} is outside 0..{PAPER_ID_OFFSET}")
			}
			Skipped::SelectedWithoutId { title } => write!(f, "selected paper {title:?} has no Id"),
			Skipped::DuplicateNode { id } => write!(f, "node id {id} is already taken"),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphModel {
	pub data: GraphData,
	pub topics: TopicMap,
	pub skipped: Vec<Skipped>,
}

impl GraphModel {
	pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
		self.data.nodes.iter().find(|n| n.id == id)
	}
}

pub fn topic_swatch(cluster: i64) -> Swatch {
	TOPIC_PALETTE[cluster.rem_euclid(TOPIC_PALETTE.len() as i64) as usize]
}

pub fn paper_node_id(paper_id: i64) -> NodeId {
	PAPER_ID_OFFSET + paper_id
}

fn topic_node(cluster: i64, name: &str) -> GraphNode {
	let swatch = topic_swatch(cluster);
	GraphNode {
		id: cluster,
		label: Some(name.to_owned()),
		shape: NodeShape::Circle,
		size: TOPIC_NODE_SIZE,
		color: NodeColor {
			border: swatch.border.into(),
			background: swatch.background.into(),
		},
		font: NodeFont {
			color: "white".into(),
			size: TOPIC_FONT_SIZE,
		},
		width_constraint: None,
		height_constraint: None,
		link: None,
	}
}

fn paper_node(id: NodeId, paper: &SelectedPaperRecord) -> GraphNode {
	GraphNode {
		id,
		label: Some(paper.title.clone()),
		shape: NodeShape::Box,
		size: TOPIC_NODE_SIZE,
		color: NodeColor {
			border: PAPER_SWATCH.border.into(),
			background: PAPER_SWATCH.background.into(),
		},
		font: NodeFont {
			color: "white".into(),
			size: PAPER_FONT_SIZE,
		},
		width_constraint: Some(PAPER_BOX_WIDTH),
		height_constraint: Some(PAPER_BOX_HEIGHT),
		link: paper.link.clone().filter(|l| !l.trim().is_empty()),
	}
}

pub fn build_graph_model(store: &RecordStore) -> GraphModel {
	let mut model = GraphModel::default();
	let mut used: HashSet<NodeId> = HashSet::new();

	for paper in &store.papers {
		let Some(topic) = paper.topic() else {
			model.skipped.push(Skipped::PaperWithoutCluster { id: paper.id });
			continue;
		};
		if !(0..PAPER_ID_OFFSET).contains(&topic.cluster) {
			model.skipped.push(Skipped::ClusterOutOfRange {
				cluster: topic.cluster,
			});
			continue;
		}

		if !model.topics.topics.contains_key(&topic.cluster) {
			used.insert(topic.cluster);
			model.data.nodes.push(topic_node(topic.cluster, &topic.name));
			model.topics.order.push(topic.cluster);
			model.topics.topics.insert(
				topic.cluster,
				Topic {
					cluster: topic.cluster,
					name: topic.name,
					papers: Vec::new(),
				},
			);
		}
		if let Some(entry) = model.topics.topics.get_mut(&topic.cluster) {
			entry.papers.push(paper.clone());
		}
	}

	for paper in &store.selected {
		let Some(paper_id) = paper.id else {
			model.skipped.push(Skipped::SelectedWithoutId {
				title: paper.title.clone(),
			});
			continue;
		};
		let id = paper_node_id(paper_id);
		if !used.insert(id) {
			model.skipped.push(Skipped::DuplicateNode { id });
			continue;
		}
		model.data.nodes.push(paper_node(id, paper));
	}

	model.data.links = store
		.edges
		.iter()
		.map(|edge| GraphLink {
			source: edge.from,
			target: edge.to,
			style: EdgeStyle::from_json(&edge.style),
		})
		.collect();

	for skipped in &model.skipped {
		warn!("graph record skipped: {skipped}");
	}
	model
}

#[cfg(test)]
mod tests {
	use super::*;

	fn paper(id: i64, cluster: i64, field: &str) -> PaperRecord {
		PaperRecord {
			id,
			title: format!("Paper {id}"),
			link: Some(format!("https://example.org/{id}")),
			abstract_text: None,
			results: None,
			conclusion: None,
			field: Some(field.into()),
			cluster: Some(cluster),
		}
	}

	fn selected(id: Option<i64>) -> SelectedPaperRecord {
		SelectedPaperRecord {
			id,
			title: "Selected".into(),
			link: Some("https://example.org/s".into()),
		}
	}

	fn store() -> RecordStore {
		RecordStore {
			papers: vec![
				paper(1, 2, "Plants"),
				paper(2, 0, "Radiation"),
				paper(3, 2, "Plants (dup name)"),
				paper(4, 2, "Plants"),
			],
			edges: serde_json::from_str(r##"[{"from": 0, "to": 2}, {"from": 2, "to": 10007, "color": "#f00"}]"##)
				.unwrap(),
			selected: vec![selected(Some(7)), selected(None)],
		}
	}

	#[test]
	fn one_topic_node_per_cluster_with_papers_in_order() {
		let model = build_graph_model(&store());
		let topic_nodes: Vec<_> = model
			.data
			.nodes
			.iter()
			.filter(|n| n.shape == NodeShape::Circle)
			.map(|n| n.id)
			.collect();
		assert_eq!(topic_nodes, vec![2, 0]);

		let plants = model.topics.get(2).unwrap();
		assert_eq!(plants.name, "Plants");
		let ids: Vec<_> = plants.papers.iter().map(|p| p.id).collect();
		assert_eq!(ids, vec![1, 3, 4]);
		assert_eq!(model.topics.iter().map(|t| t.cluster).collect::<Vec<_>>(), vec![2, 0]);
	}

	#[test]
	fn paper_nodes_are_offset_and_carry_link() {
		let model = build_graph_model(&store());
		let node = model.node(10_007).unwrap();
		assert_eq!(node.shape, NodeShape::Box);
		assert_eq!(node.link.as_deref(), Some("https://example.org/s"));
		assert_eq!(node.width_constraint, Some(150.0));
	}

	#[test]
	fn selected_without_id_is_skipped_and_reported() {
		let model = build_graph_model(&store());
		assert_eq!(model.data.nodes.len(), 3);
		assert!(
			model
				.skipped
				.contains(&Skipped::SelectedWithoutId { title: "Selected".into() })
		);
	}

	#[test]
	fn identifiers_never_collide() {
		let mut s = store();
		s.papers.push(paper(9, 10_003, "Huge cluster"));
		s.selected.push(selected(Some(7)));
		let model = build_graph_model(&s);

		let mut seen = HashSet::new();
		for node in &model.data.nodes {
			assert!(seen.insert(node.id), "duplicate id {}", node.id);
		}
		assert!(model.skipped.contains(&Skipped::ClusterOutOfRange { cluster: 10_003 }));
		assert!(model.skipped.contains(&Skipped::DuplicateNode { id: 10_007 }));
	}

	#[test]
	fn topic_color_depends_only_on_cluster_modulo_palette() {
		let a = build_graph_model(&store());
		let b = build_graph_model(&store());
		assert_eq!(a.data.nodes, b.data.nodes);

		let len = TOPIC_PALETTE.len() as i64;
		assert_eq!(topic_swatch(2), topic_swatch(2 + len));
		assert_eq!(topic_swatch(0), TOPIC_PALETTE[0]);
		assert_eq!(a.node(2).unwrap().color.border, TOPIC_PALETTE[2].border);
	}

	#[test]
	fn edges_pass_through() {
		let s = store();
		let model = build_graph_model(&s);
		assert_eq!(model.data.links.len(), s.edges.len());
		for (link, edge) in model.data.links.iter().zip(&s.edges) {
			assert_eq!((link.source, link.target), (edge.from, edge.to));
		}
		assert_eq!(model.data.links[1].style.color.as_deref(), Some("#f00"));
	}

	#[test]
	fn paper_without_cluster_is_reported() {
		let mut s = store();
		s.papers.push(PaperRecord {
			cluster: None,
			..paper(11, 0, "x")
		});
		let model = build_graph_model(&s);
		assert!(model.skipped.contains(&Skipped::PaperWithoutCluster { id: 11 }));
		assert_eq!(model.topics.get(0).unwrap().papers.len(), 1);
	}
}
