//! Pre-baked JSON records and the fetches that load them.

mod records;

use futures_util::future::join3;
use gloo_net::http::Request;
use log::{error, info};
use serde::de::DeserializeOwned;

pub use records::{EdgeRecord, NodeId, PaperRecord, SelectedPaperRecord, TopicRecord, present};

use crate::config::DataSources;
use crate::error::DataError;

/// Everything the knowledge graph is built from. Never mutated after load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordStore {
	pub papers: Vec<PaperRecord>,
	pub edges: Vec<EdgeRecord>,
	pub selected: Vec<SelectedPaperRecord>,
}

impl RecordStore {
	/// All three files or nothing; the first failure in file order is reported.
	fn assemble(
		papers: Result<Vec<PaperRecord>, DataError>,
		edges: Result<Vec<EdgeRecord>, DataError>,
		selected: Result<Vec<SelectedPaperRecord>, DataError>,
	) -> Result<Self, DataError> {
		Ok(Self {
			papers: papers?,
			edges: edges?,
			selected: selected?,
		})
	}

	/// Request the three graph files together; any failure aborts the load.
	pub async fn load(sources: &DataSources) -> Result<Self, DataError> {
		let (papers, edges, selected) = join3(
			fetch_json::<Vec<PaperRecord>>(sources.papers),
			fetch_json::<Vec<EdgeRecord>>(sources.edges),
			fetch_json::<Vec<SelectedPaperRecord>>(sources.selected_papers),
		)
		.await;

		let store = Self::assemble(papers, edges, selected)?;
		info!(
			"loaded {} papers, {} edges, {} selected papers",
			store.papers.len(),
			store.edges.len(),
			store.selected.len()
		);
		Ok(store)
	}
}

/// Load the flat record list used by search and the details page.
pub async fn load_search_records(sources: &DataSources) -> Result<Vec<PaperRecord>, DataError> {
	let records = fetch_json::<Vec<PaperRecord>>(sources.search_records).await?;
	info!("loaded {} search records", records.len());
	Ok(records)
}

async fn fetch_json<T: DeserializeOwned>(path: &str) -> Result<T, DataError> {
	let result = fetch_json_inner(path).await;
	if let Err(e) = &result {
		error!("{e}");
	}
	result
}

async fn fetch_json_inner<T: DeserializeOwned>(path: &str) -> Result<T, DataError> {
	let resp = Request::get(path)
		.send()
		.await
		.map_err(|source| DataError::Network {
			path: path.to_owned(),
			source,
		})?;

	if !resp.ok() {
		return Err(DataError::Status {
			path: path.to_owned(),
			status: resp.status(),
		});
	}

	let text = resp.text().await.map_err(|source| DataError::Network {
		path: path.to_owned(),
		source,
	})?;
	serde_json::from_str(&text).map_err(|source| DataError::Decode {
		path: path.to_owned(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn missing(path: &str) -> DataError {
		DataError::Status {
			path: path.into(),
			status: 404,
		}
	}

	fn failed_path(err: DataError) -> String {
		match err {
			DataError::Status { path, .. } => path,
			other => panic!("unexpected error {other}"),
		}
	}

	#[test]
	fn any_failed_file_aborts_the_store() {
		let papers = || Ok(vec![]);
		let edges = || Ok(vec![]);
		let selected = || Ok(vec![]);

		let err = RecordStore::assemble(Err(missing("data.json")), edges(), selected()).unwrap_err();
		assert_eq!(failed_path(err), "data.json");
		let err = RecordStore::assemble(papers(), Err(missing("edges.json")), selected()).unwrap_err();
		assert_eq!(failed_path(err), "edges.json");
		let err = RecordStore::assemble(papers(), edges(), Err(missing("selected.json"))).unwrap_err();
		assert_eq!(failed_path(err), "selected.json");
	}

	#[test]
	fn first_failure_in_file_order_wins() {
		let err = RecordStore::assemble(
			Ok(vec![]),
			Err(missing("edges.json")),
			Err(missing("selected.json")),
		)
		.unwrap_err();
		assert_eq!(failed_path(err), "edges.json");
	}

	#[test]
	fn complete_load_keeps_every_list() {
		let store = RecordStore::assemble(
			Ok(serde_json::from_str(r#"[{"Id": 1, "Cluster": 0}]"#).unwrap()),
			Ok(serde_json::from_str(r#"[{"from": 0, "to": 10001}]"#).unwrap()),
			Ok(serde_json::from_str(r#"[{"Id": 1, "Title": "t"}]"#).unwrap()),
		)
		.unwrap();
		assert_eq!(
			(store.papers.len(), store.edges.len(), store.selected.len()),
			(1, 1, 1)
		);
	}
}
