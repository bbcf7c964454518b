//! Error types for diagram validation and image export.

use thiserror::Error;

use crate::components::pathway::CategoryId;

/// A part of the diagram that cannot be drawn. Reported at startup and
/// skipped at render time; never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramIssue {
	/// Two nodes share an id; lookups resolve to the first.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),

	/// A node has zero or negative width or height.
	#[error("node `{0}` has empty bounds")]
	EmptyBounds(String),

	/// A node has no label lines.
	#[error("node `{0}` has no label lines")]
	MissingLabel(String),

	/// A node points at a category missing from the lookup table.
	#[error("node `{node}` uses unknown category {category:?}")]
	UnknownCategory {
		/// Offending node.
		node: String,
		/// Category that failed to resolve.
		category: CategoryId,
	},

	/// An edge endpoint does not name any node.
	#[error("edge `{from}` -> `{to}` references missing node `{missing}`")]
	DanglingEdge {
		/// Edge source id.
		from: String,
		/// Edge destination id.
		to: String,
		/// The endpoint that did not resolve.
		missing: String,
	},

	/// A routing rule detours around a node that does not exist.
	#[error("route rule detours around missing node `{0}`")]
	UnknownObstacle(String),
}

/// Failure while rasterizing or downloading the diagram image.
#[derive(Debug, Error)]
pub enum ExportError {
	/// The offscreen canvas could not be created.
	#[error("could not create export canvas: {0}")]
	Canvas(String),

	/// The 2D context was unavailable.
	#[error("canvas 2d context unavailable: {0}")]
	Context(String),

	/// The canvas refused to encode itself as PNG.
	#[error("could not encode image: {0}")]
	Encode(String),

	/// The download link could not be created or clicked.
	#[error("could not start download: {0}")]
	Download(String),
}

/// Alias used by the export path.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
