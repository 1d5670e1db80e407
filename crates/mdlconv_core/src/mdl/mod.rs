mod error;
mod file;
mod frame;
mod header;
mod mesh;
mod morph;
mod navigator;
mod scene;
mod tag;
mod transform;

/// Error and result aliases.
pub use error::{MdlError, Result};
/// Loaded file and its per-file decode products.
pub use file::{DecodedFile, MORPH_FILE_MARKER, MdlFile, ShapeLink, TopLevelBlock};
/// Frame hierarchy node and decoder limits.
pub use frame::{BROKEN_SUFFIX, Frame, MAX_FRAME_DEPTH, UNKNOWN_FRAME_NAME};
/// Version header representation.
pub use header::MdlHeader;
/// Mesh geometry types.
pub use mesh::{Mesh, Reference, ShapeWeight, Triangle, VertexGroup};
/// Morph target type and naming.
pub use morph::{MORPH_PREFIX, Morph};
/// Bounded byte cursor and tag read outcome.
pub use navigator::{Navigator, TagRead};
/// Cross-file scene aggregate.
pub use scene::Scene;
/// Block tags and tag helpers.
pub use tag::{BONE, CLSN, FACE, FILE_TAGS, FRME, MESH, MESH_TAGS, MLST, MTRL, NRML, SKIN, TRNS, TSPC, TXUV, Tag, VRTX, is_tag_like, tag_label};
/// Column-major matrix conversion.
pub use transform::{ZERO_SNAP_EPSILON, affine_from_col_major, snapped_affine_from_col_major};
