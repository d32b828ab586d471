use thiserror::Error;

/// Failure to obtain one of the pre-baked JSON files.
#[derive(Debug, Error)]
pub enum DataError {
	#[error("request for {path} failed: {source}")]
	Network {
		path: String,
		#[source]
		source: gloo_net::Error,
	},
	#[error("request for {path} returned HTTP {status}")]
	Status { path: String, status: u16 },
	#[error("could not decode {path}: {source}")]
	Decode {
		path: String,
		#[source]
		source: serde_json::Error,
	},
}

/// Why the details page could not even start looking a record up.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DetailError {
	#[error("no research id was given")]
	MissingId,
	#[error("research id {0:?} is not a number")]
	InvalidId(String),
}
