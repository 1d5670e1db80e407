/// Four-byte ASCII block tag.
pub type Tag = [u8; 4];

/// Frame (root node or bone) block.
pub const FRME: Tag = *b"FRME";
/// Frame transform block.
pub const TRNS: Tag = *b"TRNS";
/// Mesh block (or morph block inside morph files).
pub const MESH: Tag = *b"MESH";
/// Collision block, skipped structurally.
pub const CLSN: Tag = *b"CLSN";

/// Vertex positions.
pub const VRTX: Tag = *b"VRTX";
/// Vertex normals.
pub const NRML: Tag = *b"NRML";
/// Texture coordinates.
pub const TXUV: Tag = *b"TXUV";
/// Triangle indices.
pub const FACE: Tag = *b"FACE";
/// Material list.
pub const MLST: Tag = *b"MLST";
/// Skin weights.
pub const SKIN: Tag = *b"SKIN";
/// Per-vertex 24-byte records of unknown meaning, skipped verbatim.
pub const TSPC: Tag = *b"TSPC";

/// Material entry inside a material list.
pub const MTRL: Tag = *b"MTRL";
/// Bone weight group inside a skin block.
pub const BONE: Tag = *b"BONE";

/// Top-level tags accepted after the root frame.
pub const FILE_TAGS: [Tag; 3] = [FRME, MESH, CLSN];
/// Sub-block tags known inside a mesh block.
pub const MESH_TAGS: [Tag; 7] = [VRTX, NRML, TXUV, FACE, MLST, SKIN, TSPC];

/// Render tag bytes as a printable label.
pub fn tag_label(tag: Tag) -> String {
	let mut out = String::new();
	for byte in tag {
		if byte.is_ascii_graphic() || byte == b' ' {
			out.push(char::from(byte));
		} else {
			out.push('.');
		}
	}
	out
}

/// Return `true` when `bytes` look like a block tag (four ASCII alphanumerics).
pub fn is_tag_like(bytes: &[u8]) -> bool {
	bytes.len() == 4 && bytes.iter().all(u8::is_ascii_alphanumeric)
}
