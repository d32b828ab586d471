use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::NOT_FOUND_SENTINEL;

/// Identifier of a node in the rendered graph.
pub type NodeId = i64;

/// One paper, as found in both the graph data file and the search data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
	#[serde(rename = "Id")]
	pub id: i64,
	#[serde(rename = "Title", default, deserialize_with = "text_or_empty")]
	pub title: String,
	#[serde(rename = "Link", default)]
	pub link: Option<String>,
	#[serde(rename = "Abstract", default)]
	pub abstract_text: Option<String>,
	#[serde(rename = "Results", default)]
	pub results: Option<String>,
	#[serde(rename = "Conclusion", default)]
	pub conclusion: Option<String>,
	#[serde(rename = "Field_Auto", default)]
	pub field: Option<String>,
	#[serde(rename = "Cluster", default)]
	pub cluster: Option<i64>,
}

/// The topic a paper belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicRecord {
	pub cluster: i64,
	pub name: String,
}

impl PaperRecord {
	pub fn topic(&self) -> Option<TopicRecord> {
		let cluster = self.cluster?;
		let name = present(self.field.as_deref())
			.map(str::to_owned)
			.unwrap_or_else(|| format!("Cluster {cluster}"));
		Some(TopicRecord { cluster, name })
	}

	pub fn link(&self) -> Option<&str> {
		present(self.link.as_deref())
	}
}

/// A paper drawn as its own node in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedPaperRecord {
	#[serde(rename = "Id", default)]
	pub id: Option<i64>,
	#[serde(rename = "Title", default, deserialize_with = "text_or_empty")]
	pub title: String,
	#[serde(rename = "Link", default)]
	pub link: Option<String>,
}

/// A connection between two graph nodes. Styling keys are kept verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	#[serde(alias = "source")]
	pub from: NodeId,
	#[serde(alias = "target")]
	pub to: NodeId,
	#[serde(flatten)]
	pub style: Map<String, Value>,
}

/// `null` titles decode as empty text; an empty title never matches a search.
fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat blank text and the `"Not Found"` placeholder as missing.
pub fn present(value: Option<&str>) -> Option<&str> {
	value
		.map(str::trim)
		.filter(|v| !v.is_empty() && *v != NOT_FOUND_SENTINEL)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_original_field_names() {
		let json = r#"[{
			"Id": 42,
			"Title": "Bone loss in microgravity",
			"Link": "https://example.org/42",
			"Abstract": "Mice were flown.",
			"Results": "Not Found",
			"Field_Auto": "Space Biology",
			"Cluster": 3
		}]"#;
		let papers: Vec<PaperRecord> = serde_json::from_str(json).unwrap();
		let paper = &papers[0];
		assert_eq!(paper.id, 42);
		assert_eq!(paper.link(), Some("https://example.org/42"));
		assert_eq!(paper.conclusion, None);
		assert_eq!(
			paper.topic(),
			Some(TopicRecord {
				cluster: 3,
				name: "Space Biology".into()
			})
		);
	}

	#[test]
	fn topic_name_falls_back_to_cluster_number() {
		let paper: PaperRecord = serde_json::from_str(r#"{"Id": 1, "Cluster": 7}"#).unwrap();
		assert_eq!(paper.topic().unwrap().name, "Cluster 7");
		assert_eq!(paper.title, "");
	}

	#[test]
	fn null_title_does_not_fail_the_list() {
		let papers: Vec<PaperRecord> =
			serde_json::from_str(r#"[{"Id": 1, "Title": "Bone loss"}, {"Id": 2, "Title": null}]"#)
				.unwrap();
		assert_eq!(papers.len(), 2);
		assert_eq!(papers[1].title, "");

		let selected: Vec<SelectedPaperRecord> =
			serde_json::from_str(r#"[{"Id": 3, "Title": null}]"#).unwrap();
		assert_eq!(selected[0].title, "");
	}

	#[test]
	fn selected_paper_tolerates_missing_id() {
		let selected: Vec<SelectedPaperRecord> =
			serde_json::from_str(r#"[{"Title": "orphan"}, {"Id": 5, "Title": "ok"}]"#).unwrap();
		assert_eq!(selected[0].id, None);
		assert_eq!(selected[1].id, Some(5));
	}

	#[test]
	fn edge_styling_passes_through() {
		let json = r##"{"from": 1, "to": 10005, "color": "#ff0000", "width": 3, "dashes": true}"##;
		let edge: EdgeRecord = serde_json::from_str(json).unwrap();
		assert_eq!((edge.from, edge.to), (1, 10005));
		assert_eq!(edge.style.get("color"), Some(&Value::from("#ff0000")));

		let back = serde_json::to_value(&edge).unwrap();
		assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
	}

	#[test]
	fn edge_accepts_source_target_names() {
		let edge: EdgeRecord = serde_json::from_str(r#"{"source": 2, "target": 3}"#).unwrap();
		assert_eq!((edge.from, edge.to), (2, 3));
		assert!(edge.style.is_empty());
	}

	#[test]
	fn sentinel_and_blank_are_absent() {
		assert_eq!(present(Some("Not Found")), None);
		assert_eq!(present(Some("   ")), None);
		assert_eq!(present(None), None);
		assert_eq!(present(Some(" text ")), Some("text"));
	}
}
