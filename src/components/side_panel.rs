use std::time::Duration;

use leptos::prelude::*;

use crate::config::PANEL_STAGGER_MS;
use crate::data::PaperRecord;

/// One row of the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelItem {
	pub title: String,
	pub href: Option<String>,
	pub tooltip: String,
	pub delay_ms: u64,
}

/// What the panel shows for one topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelContent {
	pub topic: String,
	pub items: Vec<PanelItem>,
}

impl PanelContent {
	pub fn new(topic: &str, papers: &[PaperRecord]) -> Self {
		let items = papers
			.iter()
			.enumerate()
			.map(|(index, paper)| PanelItem {
				title: paper.title.clone(),
				href: paper.link().map(str::to_owned),
				tooltip: format!("ID: {}", paper.id),
				delay_ms: index as u64 * PANEL_STAGGER_MS,
			})
			.collect();
		Self {
			topic: topic.to_owned(),
			items,
		}
	}
}

#[component]
fn PanelRow(item: PanelItem) -> impl IntoView {
	let entered = RwSignal::new(false);
	set_timeout(
		move || entered.set(true),
		Duration::from_millis(item.delay_ms),
	);

	let style = move || {
		if entered.get() {
			"opacity: 1; transform: translateX(0); transition: all 0.3s ease;"
		} else {
			"opacity: 0; transform: translateX(20px); transition: all 0.3s ease;"
		}
	};

	let body = match item.href {
		Some(href) => view! {
			<a href=href target="_blank" rel="noopener" title=item.tooltip>
				{item.title}
			</a>
		}
		.into_any(),
		None => view! { <span title=item.tooltip>{item.title}</span> }.into_any(),
	};

	view! { <li style=style>{body}</li> }
}

/// Slide-in list of the papers in the selected topic.
#[component]
pub fn SidePanel(
	#[prop(into)] content: Signal<Option<PanelContent>>,
	#[prop(into)] on_close: Callback<()>,
	node_ref: NodeRef<leptos::html::Aside>,
) -> impl IntoView {
	let visible = move || content.with(Option::is_some);

	view! {
		<aside id="sidebar" class="sidebar" class:visible=visible node_ref=node_ref>
			<button id="close-sidebar" class="close-btn" on:click=move |_| on_close.run(())>
				"×"
			</button>
			{move || {
				content
					.get()
					.map(|content| {
						view! {
							<h3 id="sidebar-title">
								"Related research: \""
								<span class="topic-name">{content.topic}</span>
								"\""
							</h3>
							<ul id="paper-list">
								{content
									.items
									.into_iter()
									.map(|item| view! { <PanelRow item=item /> })
									.collect_view()}
							</ul>
						}
					})
			}}
		</aside>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn paper(id: i64, link: Option<&str>) -> PaperRecord {
		PaperRecord {
			id,
			title: format!("Title {id}"),
			link: link.map(str::to_owned),
			abstract_text: None,
			results: None,
			conclusion: None,
			field: None,
			cluster: Some(1),
		}
	}

	#[test]
	fn items_keep_order_and_stagger() {
		let papers = vec![
			paper(5, Some("https://a")),
			paper(2, Some("https://b")),
			paper(9, None),
		];
		let content = PanelContent::new("Plants", &papers);
		assert_eq!(content.topic, "Plants");
		let titles: Vec<_> = content.items.iter().map(|i| i.title.as_str()).collect();
		assert_eq!(titles, vec!["Title 5", "Title 2", "Title 9"]);
		let delays: Vec<_> = content.items.iter().map(|i| i.delay_ms).collect();
		assert_eq!(delays, vec![0, 100, 200]);
		assert_eq!(content.items[1].tooltip, "ID: 2");
		assert_eq!(content.items[1].href.as_deref(), Some("https://b"));
		assert_eq!(content.items[2].href, None);
	}

	#[test]
	fn empty_topic_has_no_items() {
		assert!(PanelContent::new("Empty", &[]).items.is_empty());
	}
}
