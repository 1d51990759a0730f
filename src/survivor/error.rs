//! Errors raised while loading the dataset.

use thiserror::Error;

/// Failures while loading the contestant dataset from the page.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The embedded JSON did not match the expected shape.
	#[error("failed to parse dataset: {0}")]
	Parse(#[from] serde_json::Error),

	/// No element with the given id exists in the document.
	#[error("dataset element #{0} not found")]
	MissingElement(String),

	/// The browser environment was not usable (no window, no document, wrong element type).
	#[error("DOM error: {0}")]
	Dom(String),
}

/// Result alias for dataset loading.
pub type Result<T> = std::result::Result<T, DatasetError>;
