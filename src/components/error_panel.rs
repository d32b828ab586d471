use leptos::prelude::*;

/// Static notice shown when a page cannot load its data.
#[component]
pub fn ErrorPanel(#[prop(into)] title: String, #[prop(into)] message: String) -> impl IntoView {
	view! {
		<div class="error-panel" role="alert">
			<h3>"⚠️ " {title}</h3>
			<p>{message}</p>
		</div>
	}
}
