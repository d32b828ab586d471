use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_panel::ErrorPanel;
use crate::components::search_box::SearchBox;
use crate::config::DataSources;
use crate::data::{PaperRecord, load_search_records};
use crate::search::{details_url, search_all};

/// Every record whose title contains the `q` query parameter.
#[component]
pub fn ResultsPage() -> impl IntoView {
	let query = use_query_map();
	let records: RwSignal<Option<Result<Vec<PaperRecord>, String>>> = RwSignal::new(None);

	spawn_local(async move {
		let loaded = load_search_records(&DataSources::default())
			.await
			.map_err(|e| e.to_string());
		records.set(Some(loaded));
	});

	let q = move || query.with(|m| m.get("q")).unwrap_or_default();

	view! {
		<div class="results-page">
			<SearchBox />
			{move || {
				let q = q();
				if q.trim().is_empty() {
					return view! { <p class="hint">"Type a title, or part of one, to search."</p> }
						.into_any();
				}
				match records.get() {
					None => view! { <p class="loading">"Searching…"</p> }.into_any(),
					Some(Err(reason)) => view! {
						<ErrorPanel title="Search unavailable" message=reason />
					}
					.into_any(),
					Some(Ok(list)) => {
						let hits = search_all(&list, &q);
						let count = hits.len();
						view! {
							<h2>{format!("{count} result(s) for \"{}\"", q.trim())}</h2>
							<ul class="results">
								{hits
									.into_iter()
									.map(|hit| {
										view! {
											<li>
												<A href=details_url(hit.id)>{hit.title}</A>
											</li>
										}
									})
									.collect_view()}
							</ul>
						}
						.into_any()
					}
				}
			}}
		</div>
	}
}
