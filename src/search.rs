//! Case-insensitive title matching for the inline suggestions and the results page.

use crate::config::{DETAILS_ROUTE, MAX_SUGGESTIONS, RESULTS_ROUTE};
use crate::data::PaperRecord;

/// A run of title text, marked when it is part of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
	pub text: String,
	pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
	pub id: i64,
	pub title: String,
	pub segments: Vec<Segment>,
}

/// Lower-cased query, or `None` when there is nothing to search for.
fn normalize(query: &str) -> Option<String> {
	let needle: String = query.trim().chars().flat_map(char::to_lowercase).collect();
	(!needle.is_empty()).then_some(needle)
}

/// Non-overlapping byte ranges of `hay` whose lower-cased text contains
/// `needle`, left to right.
///
/// The whole title is lower-cased first, so a needle can match part of a
/// character whose lower-case form is longer (`"i"` in `"İ"`). Such a match
/// is widened to cover the whole original character.
fn find_matches(hay: &str, needle: &str) -> Vec<(usize, usize)> {
	let mut lowered = String::with_capacity(hay.len());
	// Original character span for every byte of `lowered`.
	let mut origin: Vec<(usize, usize)> = Vec::with_capacity(hay.len());
	for (start, ch) in hay.char_indices() {
		let span = (start, start + ch.len_utf8());
		for lower in ch.to_lowercase() {
			lowered.push(lower);
			origin.extend(std::iter::repeat_n(span, lower.len_utf8()));
		}
	}

	let mut out: Vec<(usize, usize)> = Vec::new();
	for (at, found) in lowered.match_indices(needle) {
		let (start, _) = origin[at];
		let (_, end) = origin[at + found.len() - 1];
		match out.last_mut() {
			Some(last) if start < last.1 => last.1 = last.1.max(end),
			_ => out.push((start, end)),
		}
	}
	out
}

fn segments(title: &str, matches: &[(usize, usize)]) -> Vec<Segment> {
	let mut out = Vec::new();
	let mut last = 0;
	for &(start, end) in matches {
		if start > last {
			out.push(Segment {
				text: title[last..start].to_owned(),
				highlighted: false,
			});
		}
		out.push(Segment {
			text: title[start..end].to_owned(),
			highlighted: true,
		});
		last = end;
	}
	if last < title.len() {
		out.push(Segment {
			text: title[last..].to_owned(),
			highlighted: false,
		});
	}
	out
}

/// Records whose title contains the query, in list order.
pub fn matching<'a>(
	records: &'a [PaperRecord],
	query: &str,
) -> impl Iterator<Item = (&'a PaperRecord, Vec<(usize, usize)>)> + 'a {
	let needle = normalize(query);
	records.iter().filter_map(move |record| {
		let needle = needle.as_deref()?;
		let matches = find_matches(&record.title, needle);
		(!matches.is_empty()).then_some((record, matches))
	})
}

fn to_suggestion((record, matches): (&PaperRecord, Vec<(usize, usize)>)) -> Suggestion {
	Suggestion {
		id: record.id,
		title: record.title.clone(),
		segments: segments(&record.title, &matches),
	}
}

/// First few titles containing the query, with the matched text marked.
pub fn suggest(records: &[PaperRecord], query: &str) -> Vec<Suggestion> {
	matching(records, query)
		.take(MAX_SUGGESTIONS)
		.map(to_suggestion)
		.collect()
}

/// Every title containing the query.
pub fn search_all(records: &[PaperRecord], query: &str) -> Vec<Suggestion> {
	matching(records, query).map(to_suggestion).collect()
}

/// Results page address for a query; `None` when the query is blank.
pub fn results_url(query: &str) -> Option<String> {
	let query = query.trim();
	(!query.is_empty()).then(|| format!("{RESULTS_ROUTE}?q={}", urlencoding::encode(query)))
}

pub fn details_url(id: i64) -> String {
	format!("{DETAILS_ROUTE}?id={id}")
}
