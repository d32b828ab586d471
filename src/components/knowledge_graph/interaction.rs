use super::model::GraphModel;
use crate::components::force_graph::NodeShape;
use crate::data::NodeId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
	#[default]
	Idle,
	PanelOpen {
		topic: i64,
	},
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
	#[default]
	Default,
	Pointer,
}

impl Cursor {
	pub fn as_css(self) -> &'static str {
		match self {
			Cursor::Default => "default",
			Cursor::Pointer => "pointer",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphEvent {
	/// Click on the canvas; `node` is `None` for empty space.
	Click { node: Option<NodeId> },
	HoverNode(NodeId),
	BlurNode(NodeId),
	CloseRequested,
	EscapePressed,
	/// Click somewhere that is neither the panel nor the canvas.
	OutsideClick,
}

/// What the page has to do in response to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	ShowTopic(i64),
	HidePanel,
	OpenLink(String),
	SetCursor(Cursor),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionController {
	panel: PanelState,
	cursor: Cursor,
}

impl InteractionController {
	pub fn panel(&self) -> PanelState {
		self.panel
	}

	pub fn cursor(&self) -> Cursor {
		self.cursor
	}

	pub fn handle(&mut self, event: GraphEvent, model: &GraphModel) -> Option<Command> {
		match event {
			GraphEvent::Click { node: Some(id) } => self.click_node(id, model),
			GraphEvent::Click { node: None }
			| GraphEvent::CloseRequested
			| GraphEvent::EscapePressed
			| GraphEvent::OutsideClick => self.close(),
			GraphEvent::HoverNode(_) => self.set_cursor(Cursor::Pointer),
			GraphEvent::BlurNode(_) => self.set_cursor(Cursor::Default),
		}
	}

	fn click_node(&mut self, id: NodeId, model: &GraphModel) -> Option<Command> {
		let node = model.node(id)?;
		match node.shape {
			NodeShape::Circle => {
				model.topics.get(id)?;
				if self.panel == (PanelState::PanelOpen { topic: id }) {
					return None;
				}
				self.panel = PanelState::PanelOpen { topic: id };
				Some(Command::ShowTopic(id))
			}
			NodeShape::Box => node.link.clone().map(Command::OpenLink),
		}
	}

	fn close(&mut self) -> Option<Command> {
		match self.panel {
			PanelState::Idle => None,
			PanelState::PanelOpen { .. } => {
				self.panel = PanelState::Idle;
				Some(Command::HidePanel)
			}
		}
	}

	fn set_cursor(&mut self, cursor: Cursor) -> Option<Command> {
		if self.cursor == cursor {
			return None;
		}
		self.cursor = cursor;
		Some(Command::SetCursor(cursor))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::model::build_graph_model;
	use crate::data::{PaperRecord, RecordStore, SelectedPaperRecord};

	fn model() -> GraphModel {
		let paper = |id, cluster| PaperRecord {
			id,
			title: format!("Paper {id}"),
			link: Some(format!("https://example.org/{id}")),
			abstract_text: None,
			results: None,
			conclusion: None,
			field: Some(format!("Topic {cluster}")),
			cluster: Some(cluster),
		};
		build_graph_model(&RecordStore {
			papers: vec![paper(1, 3), paper(2, 4), paper(3, 3)],
			edges: vec![],
			selected: vec![
				SelectedPaperRecord {
					id: Some(8),
					title: "Linked".into(),
					link: Some("https://example.org/8".into()),
				},
				SelectedPaperRecord {
					id: Some(9),
					title: "Unlinked".into(),
					link: None,
				},
			],
		})
	}

	#[test]
	fn clicking_topic_opens_panel() {
		let model = model();
		let mut c = InteractionController::default();
		let cmd = c.handle(GraphEvent::Click { node: Some(3) }, &model);
		assert_eq!(cmd, Some(Command::ShowTopic(3)));
		assert_eq!(c.panel(), PanelState::PanelOpen { topic: 3 });

		let papers: Vec<_> = model.topics.get(3).unwrap().papers.iter().map(|p| p.id).collect();
		assert_eq!(papers, vec![1, 3]);
	}

	#[test]
	fn clicking_another_topic_replaces_content() {
		let model = model();
		let mut c = InteractionController::default();
		c.handle(GraphEvent::Click { node: Some(3) }, &model);
		assert_eq!(
			c.handle(GraphEvent::Click { node: Some(4) }, &model),
			Some(Command::ShowTopic(4))
		);
		assert_eq!(c.handle(GraphEvent::Click { node: Some(4) }, &model), None);
	}

	#[test]
	fn every_close_trigger_returns_to_idle() {
		let model = model();
		for close in [
			GraphEvent::Click { node: None },
			GraphEvent::CloseRequested,
			GraphEvent::EscapePressed,
			GraphEvent::OutsideClick,
		] {
			let mut c = InteractionController::default();
			c.handle(GraphEvent::Click { node: Some(4) }, &model);
			assert_eq!(c.handle(close, &model), Some(Command::HidePanel));
			assert_eq!(c.panel(), PanelState::Idle);
			assert_eq!(c.handle(close, &model), None);
		}
	}

	#[test]
	fn paper_click_opens_link_without_touching_panel() {
		let model = model();
		let mut c = InteractionController::default();
		c.handle(GraphEvent::Click { node: Some(3) }, &model);
		assert_eq!(
			c.handle(GraphEvent::Click { node: Some(10_008) }, &model),
			Some(Command::OpenLink("https://example.org/8".into()))
		);
		assert_eq!(c.panel(), PanelState::PanelOpen { topic: 3 });
		assert_eq!(c.handle(GraphEvent::Click { node: Some(10_009) }, &model), None);
		assert_eq!(c.handle(GraphEvent::Click { node: Some(555) }, &model), None);
	}

	#[test]
	fn hover_toggles_pointer_cursor() {
		let model = model();
		let mut c = InteractionController::default();
		assert_eq!(
			c.handle(GraphEvent::HoverNode(3), &model),
			Some(Command::SetCursor(Cursor::Pointer))
		);
		assert_eq!(c.cursor().as_css(), "pointer");
		assert_eq!(
			c.handle(GraphEvent::BlurNode(3), &model),
			Some(Command::SetCursor(Cursor::Default))
		);
		assert_eq!(c.panel(), PanelState::Idle);
	}
}
