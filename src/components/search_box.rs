use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

use crate::config::DataSources;
use crate::data::{PaperRecord, load_search_records};
use crate::search::{self, Segment, Suggestion};

fn highlighted(segments: Vec<Segment>) -> impl IntoView {
	segments
		.into_iter()
		.map(|seg| {
			if seg.highlighted {
				view! { <span class="highlight">{seg.text}</span> }.into_any()
			} else {
				seg.text.into_any()
			}
		})
		.collect_view()
}

/// Search input suggesting matching titles as the user types.
#[component]
pub fn SearchBox() -> impl IntoView {
	let records = RwSignal::new(Vec::<PaperRecord>::new());
	let query = RwSignal::new(String::new());
	let shown = RwSignal::new(false);
	let container = NodeRef::<leptos::html::Div>::new();
	let navigate = use_navigate();

	spawn_local(async move {
		match load_search_records(&DataSources::default()).await {
			Ok(list) => records.set(list),
			Err(e) => warn!("search suggestions disabled: {e}"),
		}
	});

	let suggestions: Memo<Vec<Suggestion>> =
		Memo::new(move |_| records.with(|r| query.with(|q| search::suggest(r, q))));
	let list_visible = move || shown.get() && !suggestions.with(Vec::is_empty);

	// Navigation happens in an effect so the handlers below only touch signals.
	let pending = RwSignal::new(None::<String>);
	Effect::new(move |_| {
		if let Some(url) = pending.get() {
			navigate(&url, Default::default());
		}
	});
	let redirect = move |text: &str| {
		if let Some(url) = search::results_url(text) {
			pending.set(Some(url));
		}
	};

	let submit = move |_: web_sys::MouseEvent| redirect(&query.get_untracked());
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			ev.prevent_default();
			redirect(&query.get_untracked());
		}
	};

	let dismiss = window_event_listener(ev::click, move |e| {
		let inside = match (container.get_untracked(), e.target()) {
			(Some(el), Some(target)) => target
				.dyn_into::<web_sys::Node>()
				.is_ok_and(|node| el.contains(Some(&node))),
			_ => false,
		};
		if !inside {
			shown.set(false);
		}
	});
	on_cleanup(move || dismiss.remove());

	view! {
		<div class="box" node_ref=container>
			<input
				id="searchbox"
				type="text"
				placeholder="Search research papers…"
				autocomplete="off"
				prop:value=move || query.get()
				on:input=move |ev| {
					query.set(event_target_value(&ev));
					shown.set(true);
				}
				on:focus=move |_| shown.set(true)
				on:keydown=on_keydown
			/>
			<button id="searchBtn" type="button" on:click=submit>
				"Search"
			</button>
			<ul id="list" style:display=move || if list_visible() { "block" } else { "none" }>
				{move || {
					suggestions
						.get()
						.into_iter()
						.map(|s| {
							let title = s.title.clone();
							view! {
								<li on:click=move |_| {
									query.set(title.clone());
									shown.set(false);
									redirect(&title);
								}>{highlighted(s.segments)}</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}
