//! Leptos client-side app: landing page, knowledge graph and research details.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod config;
mod data;
mod detail;
mod error;
mod pages;
mod search;

// Top-Level pages
use crate::pages::details::DetailsPage;
use crate::pages::graph::GraphPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::results::ResultsPage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router for the landing, graph, search and details pages, with a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Research Atlas" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/graph") view=GraphPage />
				<Route path=path!("/search") view=ResultsPage />
				<Route path=path!("/details") view=DetailsPage />
			</Routes>
		</Router>
	}
}
