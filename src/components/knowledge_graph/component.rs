use leptos::ev;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use super::interaction::{Command, Cursor, GraphEvent, InteractionController};
use super::model::{GraphModel, build_graph_model};
use crate::components::error_panel::ErrorPanel;
use crate::components::force_graph::{CANVAS_CLASS, ForceGraphCanvas, GraphClick};
use crate::components::side_panel::{PanelContent, SidePanel};
use crate::config::DataSources;
use crate::data::{NodeId, RecordStore};

/// True when the event target is inside `panel` or on the graph canvas.
fn inside_graph_ui(target: Option<web_sys::EventTarget>, panel: Option<web_sys::HtmlElement>) -> bool {
	let Some(node) = target.and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
		return false;
	};
	if panel.is_some_and(|p| p.contains(Some(&node))) {
		return true;
	}
	node.dyn_ref::<web_sys::Element>()
		.and_then(|el| el.closest(&format!(".{CANVAS_CLASS}")).ok().flatten())
		.is_some()
}

/// Topic/paper graph with the side panel listing a clicked topic's papers.
#[component]
pub fn KnowledgeGraph() -> impl IntoView {
	let model: RwSignal<Option<GraphModel>> = RwSignal::new(None);
	let failure: RwSignal<Option<String>> = RwSignal::new(None);
	let controller = RwSignal::new(InteractionController::default());
	let panel = RwSignal::new(None::<PanelContent>);
	let cursor = RwSignal::new(Cursor::Default);
	let panel_ref = NodeRef::<leptos::html::Aside>::new();

	spawn_local(async move {
		match RecordStore::load(&DataSources::default()).await {
			Ok(store) => {
				let built = build_graph_model(&store);
				if built.topics.is_empty() {
					warn!("graph data contains no topics");
				}
				info!(
					"graph ready: {} topics, {} nodes, {} edges",
					built.topics.len(),
					built.data.nodes.len(),
					built.data.links.len()
				);
				for topic in built.topics.iter() {
					debug!(
						"topic {} {:?}: {} papers",
						topic.cluster,
						topic.name,
						topic.papers.len()
					);
				}
				model.set(Some(built));
			}
			Err(e) => failure.set(Some(e.to_string())),
		}
	});

	let dispatch = move |event: GraphEvent| {
		let command = model.with_untracked(|m| {
			let m = m.as_ref()?;
			controller.try_update(|c| c.handle(event, m)).flatten()
		});
		controller.with_untracked(|c| {
			debug!(
				"{event:?} -> {command:?} (panel {:?}, cursor {:?})",
				c.panel(),
				c.cursor()
			)
		});
		match command {
			Some(Command::ShowTopic(cluster)) => {
				let content = model.with_untracked(|m| {
					m.as_ref()
						.and_then(|m| m.topics.get(cluster))
						.map(|topic| PanelContent::new(&topic.name, &topic.papers))
				});
				panel.set(content);
			}
			Some(Command::HidePanel) => panel.set(None),
			Some(Command::OpenLink(url)) => {
				if let Err(e) = window().open_with_url_and_target(&url, "_blank") {
					warn!("could not open {url}: {e:?}");
				}
			}
			Some(Command::SetCursor(c)) => cursor.set(c),
			None => {}
		}
	};

	let on_click = Callback::new(move |click: GraphClick| dispatch(GraphEvent::Click { node: click.node }));
	let on_hover_node = Callback::new(move |id: NodeId| dispatch(GraphEvent::HoverNode(id)));
	let on_blur_node = Callback::new(move |id: NodeId| dispatch(GraphEvent::BlurNode(id)));
	let on_close = Callback::new(move |_: ()| dispatch(GraphEvent::CloseRequested));

	let escape = window_event_listener(ev::keydown, move |e| {
		if e.key() == "Escape" {
			dispatch(GraphEvent::EscapePressed);
		}
	});
	let outside = window_event_listener(ev::click, move |e| {
		let panel_el = panel_ref.get_untracked().map(|p| p.unchecked_into::<web_sys::HtmlElement>());
		if !inside_graph_ui(e.target(), panel_el) {
			dispatch(GraphEvent::OutsideClick);
		}
	});
	on_cleanup(move || {
		escape.remove();
		outside.remove();
	});

	let cursor_css = Signal::derive(move || cursor.get().as_css().to_owned());

	view! {
		<div id="knowledge-graph" class="graph-container">
			{move || {
				if let Some(message) = failure.get() {
					return view! {
						<ErrorPanel
							title="Failed to load data"
							message=format!("Check the graph data files or your connection. ({message})")
						/>
					}
					.into_any();
				}
				match model.with(|m| m.as_ref().map(|m| m.data.clone())) {
					Some(data) => {
						let data = Signal::derive(move || data.clone());
						view! {
							<ForceGraphCanvas
								data=data
								fullscreen=true
								on_click=on_click
								on_hover_node=on_hover_node
								on_blur_node=on_blur_node
								cursor=cursor_css
							/>
						}
						.into_any()
					}
					None => view! { <p class="loading">"Loading knowledge graph…"</p> }.into_any(),
				}
			}}
		</div>
		<SidePanel content=panel on_close=on_close node_ref=panel_ref />
	}
}
