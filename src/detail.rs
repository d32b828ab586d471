//! Looks one research record up by identifier for the details page.

use crate::data::{PaperRecord, present};
use crate::error::DetailError;

/// Parse the `id` query parameter.
pub fn parse_id(raw: Option<&str>) -> Result<i64, DetailError> {
	let raw = raw.map(str::trim).unwrap_or_default();
	if raw.is_empty() {
		return Err(DetailError::MissingId);
	}
	raw.parse()
		.map_err(|_| DetailError::InvalidId(raw.to_owned()))
}

/// Text shown on the details page. Sections that are `None` stay hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
	pub title: String,
	pub field_line: String,
	pub abstract_text: Option<String>,
	pub results: Option<String>,
	pub conclusion: Option<String>,
	pub link: Option<String>,
}

impl From<&PaperRecord> for DetailView {
	fn from(record: &PaperRecord) -> Self {
		let owned = |v: &Option<String>| present(v.as_deref()).map(str::to_owned);
		Self {
			title: record.title.clone(),
			field_line: format!(
				"Research Field: {}",
				present(record.field.as_deref()).unwrap_or("N/A")
			),
			abstract_text: owned(&record.abstract_text),
			results: owned(&record.results),
			conclusion: owned(&record.conclusion),
			link: owned(&record.link),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
	Loading,
	/// The request itself was unusable; nothing was fetched.
	BadRequest(DetailError),
	Found(DetailView),
	NotFound(i64),
	/// The record list could not be loaded.
	Failed(String),
}

pub fn resolve(records: &[PaperRecord], id: i64) -> DetailState {
	records
		.iter()
		.find(|r| r.id == id)
		.map_or(DetailState::NotFound(id), |r| DetailState::Found(r.into()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn records() -> Vec<PaperRecord> {
		serde_json::from_str(
			r#"[
				{"Id": 7, "Title": "Other"},
				{
					"Id": 42,
					"Title": "Spaceflight and the immune system",
					"Link": "https://example.org/42",
					"Abstract": "T cells were studied.",
					"Results": "Not Found",
					"Conclusion": "Immunity drops.",
					"Field_Auto": "Immunology"
				}
			]"#,
		)
		.unwrap()
	}

	#[test]
	fn parses_ids_strictly() {
		assert_eq!(parse_id(Some("42")), Ok(42));
		assert_eq!(parse_id(Some(" 42 ")), Ok(42));
		assert_eq!(parse_id(None), Err(DetailError::MissingId));
		assert_eq!(parse_id(Some("")), Err(DetailError::MissingId));
		assert_eq!(
			parse_id(Some("42abc")),
			Err(DetailError::InvalidId("42abc".into()))
		);
	}

	#[test]
	fn found_record_populates_fields_and_hides_sentinels() {
		let DetailState::Found(view) = resolve(&records(), 42) else {
			panic!("record 42 should resolve");
		};
		assert_eq!(view.title, "Spaceflight and the immune system");
		assert_eq!(view.field_line, "Research Field: Immunology");
		assert_eq!(view.abstract_text.as_deref(), Some("T cells were studied."));
		assert_eq!(view.results, None);
		assert_eq!(view.conclusion.as_deref(), Some("Immunity drops."));
		assert_eq!(view.link.as_deref(), Some("https://example.org/42"));
	}

	#[test]
	fn sparse_record_hides_every_optional_section() {
		let DetailState::Found(view) = resolve(&records(), 7) else {
			panic!("record 7 should resolve");
		};
		assert_eq!(view.field_line, "Research Field: N/A");
		assert_eq!(
			(view.abstract_text, view.results, view.conclusion, view.link),
			(None, None, None, None)
		);
	}

	#[test]
	fn missing_record_names_the_id() {
		assert_eq!(resolve(&records(), 999_999), DetailState::NotFound(999_999));
	}
}
