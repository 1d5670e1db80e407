use thiserror::Error;

use crate::mdl::Tag;
use crate::mdl::tag::tag_label;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MdlError>;

/// Errors produced while loading and decoding MDL data.
///
/// Decode-time variants carry the byte offset `at` where decoding stopped.
#[derive(Debug, Error)]
pub enum MdlError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input buffer holds no bytes.
	#[error("empty data")]
	EmptyData,
	/// Missing or malformed `BINVRSN{` version header.
	#[error("invalid header (not an MDL file)")]
	InvalidHeader,
	/// Version line parsed but does not match the supported revision.
	#[error("incompatible MDL revision {version} (expected {expected})")]
	IncompatibleVersion {
		/// Parsed revision number.
		version: i64,
		/// Supported revision number.
		expected: u32,
	},
	/// Nothing follows the version header.
	#[error("no content after version header")]
	NoContent,
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// File data does not begin with the root frame tag.
	#[error("expected root frame tag at {at}, got {}", tag_label(*got))]
	RootTagMismatch {
		/// Offset of the tag read.
		at: usize,
		/// Tag found instead.
		got: Tag,
	},
	/// Tag that is not accepted at this position.
	#[error("unexpected tag {} at {at}", tag_label(*tag))]
	UnexpectedTag {
		/// Offset of the tag.
		at: usize,
		/// Raw tag bytes.
		tag: Tag,
	},
	/// Material list structure could not be followed.
	#[error("malformed material list at {at}: {reason}")]
	MaterialList {
		/// Cursor offset when the anomaly was detected.
		at: usize,
		/// Which part of the list was malformed.
		reason: &'static str,
	},
	/// Decoded mesh misses required geometry.
	#[error("invalid mesh {name:?} ending at {at}")]
	InvalidMesh {
		/// Mesh name as read from the file.
		name: String,
		/// Offset after the mesh block.
		at: usize,
	},
	/// Decoded morph misses required geometry or a name.
	#[error("invalid morph {name:?} ending at {at}")]
	InvalidMorph {
		/// Morph name as read from the file.
		name: String,
		/// Offset after the morph block.
		at: usize,
	},
	/// Morph and target mesh disagree on vertex count.
	#[error("morph {morph:?} has {got} vertices, target {mesh:?} has {expected}")]
	MorphVertexCountMismatch {
		/// Morph name.
		morph: String,
		/// Target mesh name.
		mesh: String,
		/// Target vertex count.
		expected: usize,
		/// Morph vertex count.
		got: usize,
	},
	/// None of the given files contributed any model data.
	#[error("failed to load any model data from {files} file(s)")]
	NothingLoaded {
		/// Number of files attempted.
		files: usize,
	},
	/// Morph target mesh has no name to derive the shape from.
	#[error("morph {morph:?} targets an unnamed mesh")]
	UnnamedMorphTarget {
		/// Morph name.
		morph: String,
	},
}

impl MdlError {
	/// Return the byte offset at which decoding stopped, when known.
	pub fn offset(&self) -> Option<usize> {
		match self {
			Self::UnexpectedEof { at, .. }
			| Self::RootTagMismatch { at, .. }
			| Self::UnexpectedTag { at, .. }
			| Self::MaterialList { at, .. }
			| Self::InvalidMesh { at, .. }
			| Self::InvalidMorph { at, .. } => Some(*at),
			_ => None,
		}
	}
}
