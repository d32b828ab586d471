use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::HOME_ROUTE;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Page not found"</h1>
			<A href=HOME_ROUTE>"Back to the home page"</A>
		</div>
	}
}
