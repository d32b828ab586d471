use leptos::prelude::*;

use crate::components::knowledge_graph::KnowledgeGraph;
use crate::components::side_nav::SideNav;

/// Full-window knowledge graph.
#[component]
pub fn GraphPage() -> impl IntoView {
	view! {
		<div class="fullscreen-graph">
			<KnowledgeGraph />
			<SideNav />
			<div class="graph-overlay">
				<h1>"Knowledge Graph"</h1>
				<p class="subtitle">
					"Click a topic to list its papers. Click a paper to open it. Drag to rearrange, scroll to zoom."
				</p>
			</div>
		</div>
	}
}
