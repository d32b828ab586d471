use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::background::AmbientBackground;
use crate::components::search_box::SearchBox;
use crate::components::side_nav::SideNav;
use crate::config::GRAPH_ROUTE;

/// Landing page: animated background, navigation and the search box.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<AmbientBackground />
		<SideNav />
		<div class="content-wrapper">
			<header>
				<h1>"Research Atlas"</h1>
				<p class="subtitle">"Explore the collection by topic, or search it by title."</p>
			</header>
			<main>
				<section id="search">
					<SearchBox />
				</section>
				<section id="graph">
					<A href=GRAPH_ROUTE>"Open the knowledge graph"</A>
				</section>
			</main>
		</div>
	}
}
