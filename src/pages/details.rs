use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_query_map;
use log::warn;
use wasm_bindgen_futures::spawn_local;

use crate::components::error_panel::ErrorPanel;
use crate::config::DataSources;
use crate::data::load_search_records;
use crate::detail::{DetailState, DetailView, parse_id, resolve};

fn section(heading: &'static str, body: Option<String>) -> impl IntoView {
	body.map(|text| {
		view! {
			<section class="detail-section">
				<h2>{heading}</h2>
				<p>{text}</p>
			</section>
		}
	})
}

fn found(view_data: DetailView) -> impl IntoView {
	let link = view_data.link.map(|href| {
		view! {
			<a id="original-link-sidebar" class="original-link" href=href target="_blank" rel="noopener">
				"Read the original paper"
			</a>
		}
	});
	view! {
		<article class="research-details">
			<h1 id="research-title">{view_data.title}</h1>
			<p id="research-field">{view_data.field_line}</p>
			{link}
			{section("Abstract", view_data.abstract_text)}
			{section("Results", view_data.results)}
			{section("Conclusion", view_data.conclusion)}
		</article>
	}
}

fn message(title: String, body: String) -> impl IntoView {
	view! {
		<article class="research-details">
			<h1 id="research-title">{title}</h1>
			<p id="research-abstract">{body}</p>
		</article>
	}
}

/// Shows one research record, chosen by the `id` query parameter.
#[component]
pub fn DetailsPage() -> impl IntoView {
	let query = use_query_map();
	let state = RwSignal::new(DetailState::Loading);

	Effect::new(move |_| {
		let raw = query.with(|q| q.get("id"));
		let id = match parse_id(raw.as_deref()) {
			Ok(id) => id,
			Err(e) => {
				warn!("details page: {e}");
				state.set(DetailState::BadRequest(e));
				return;
			}
		};
		state.set(DetailState::Loading);
		spawn_local(async move {
			let next = match load_search_records(&DataSources::default()).await {
				Ok(records) => resolve(&records, id),
				Err(e) => DetailState::Failed(e.to_string()),
			};
			if let DetailState::NotFound(id) = next {
				warn!("no research record with id {id}");
			}
			state.set(next);
		});
	});

	let page_title = move || match state.get() {
		DetailState::Found(view) => view.title,
		_ => "Research Details".to_owned(),
	};

	view! {
		<Title text=page_title />
		<div class="details-page">
			{move || match state.get() {
				DetailState::Loading => view! { <p class="loading">"Loading…"</p> }.into_any(),
				DetailState::BadRequest(_) => message(
						"Error: Research ID not found.".into(),
						"Please return to the search page and select a research paper.".into(),
					)
					.into_any(),
				DetailState::Found(view_data) => found(view_data).into_any(),
				DetailState::NotFound(id) => message(
						"Research Not Found".into(),
						format!("Could not find data for the research with ID: {id}."),
					)
					.into_any(),
				DetailState::Failed(reason) => view! {
					<ErrorPanel
						title="Error Loading Data"
						message=format!("There was a problem fetching the research data. Please try again later. ({reason})")
					/>
				}
				.into_any(),
			}}
		</div>
	}
}
