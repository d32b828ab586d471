use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::{GRAPH_ROUTE, HOME_ROUTE, RESULTS_ROUTE};

/// Slide-in navigation menu with its opening button.
#[component]
pub fn SideNav() -> impl IntoView {
	let open = RwSignal::new(false);

	view! {
		<button id="menu-btn" class="menu-btn" on:click=move |_| open.set(true)>
			"☰"
		</button>
		<nav id="mySidenav" class="sidenav" class:open=move || open.get()>
			<button id="closeNavBtn" class="close-btn" on:click=move |_| open.set(false)>
				"×"
			</button>
			<div class="sidenav-links" on:click=move |_| open.set(false)>
				<A href=HOME_ROUTE>"Home"</A>
				<A href=GRAPH_ROUTE>"Knowledge Graph"</A>
				<A href=RESULTS_ROUTE>"Search"</A>
			</div>
		</nav>
	}
}
