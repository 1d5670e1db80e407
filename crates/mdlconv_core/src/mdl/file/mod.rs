use std::fs;
use std::path::Path;

use crate::mdl::{FILE_TAGS, FRME, Frame, MESH, MdlError, MdlHeader, Mesh, Morph, Navigator, Result, Tag, TagRead};

/// Filename marker that classifies a file as a morph file.
pub const MORPH_FILE_MARKER: &str = "morph";

/// Loaded MDL file: validated header plus the raw byte buffer.
pub struct MdlFile {
	/// File name without directory or extension.
	pub name: String,
	/// Set when the name marks this as a morph file.
	pub is_morph: bool,
	/// Parsed version header.
	pub header: MdlHeader,
	bytes: Vec<u8>,
}

/// Morph result waiting to be registered as a shape on a candidate mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeLink {
	/// Index of the source mesh in the candidate list the file was decoded against.
	pub source: usize,
	/// Name of the morphed mesh.
	pub name: String,
}

/// Top-level block seen while decoding, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLevelBlock {
	/// Block tag.
	pub tag: Tag,
	/// Offset of the tag.
	pub at: usize,
}

/// Everything decoded from one file, ready to be merged into a [`crate::mdl::Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFile {
	/// Root frame of the file.
	pub root: Frame,
	/// Whether any frame was decoded from damaged data.
	pub corrupted: bool,
	/// Meshes in file order; morphed copies for morph files.
	pub meshes: Vec<Mesh>,
	/// Shape registrations for morph files.
	pub shape_links: Vec<ShapeLink>,
	/// Top-level blocks including the root frame.
	pub blocks: Vec<TopLevelBlock>,
	/// Offset where decoding stopped.
	pub end: usize,
	/// Copied from the source file.
	pub is_morph: bool,
}

impl MdlFile {
	/// Read and validate an MDL file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		let name = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
		Self::from_bytes(name, raw)
	}

	/// Validate an in-memory MDL buffer named `name`.
	pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
		if bytes.is_empty() {
			return Err(MdlError::EmptyData);
		}

		let header = MdlHeader::parse(&bytes)?;
		if !header.is_supported() {
			return Err(MdlError::IncompatibleVersion {
				version: header.version,
				expected: MdlHeader::SUPPORTED_VERSION,
			});
		}
		if header.data_start >= bytes.len() {
			return Err(MdlError::NoContent);
		}

		let name = name.into();
		Ok(Self {
			is_morph: name.contains(MORPH_FILE_MARKER),
			name,
			header,
			bytes,
		})
	}

	/// Return the raw bytes backing this file.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Create a navigator positioned at the first byte after the header.
	pub fn navigator(&self) -> Navigator<'_> {
		Navigator::at_data_start(&self.bytes, &self.header)
	}

	/// Decode the root frame and every top-level block.
	///
	/// Morph blocks are paired with the first mesh in `candidates` that has the same vertex count
	/// and whose name occurs in this file's name; unmatched morphs are skipped. Decoding stops
	/// without error at end of data or at a second root frame.
	pub fn decode(&self, candidates: &[Mesh]) -> Result<DecodedFile> {
		let mut nav = self.navigator();

		let at = nav.pos();
		match nav.read_tag() {
			Some(FRME) => {}
			Some(got) => return Err(MdlError::RootTagMismatch { at, got }),
			None => {
				return Err(MdlError::UnexpectedEof {
					at,
					need: FRME.len(),
					rem: nav.remaining(),
				});
			}
		}
		nav.skip_whitespace();
		let (root, corrupted) = Frame::parse(&mut nav);
		if corrupted {
			log::warn!("{}: frame hierarchy contains damaged frames", self.name);
		}
		nav.skip_whitespace();

		let mut decoded = DecodedFile {
			root,
			corrupted,
			meshes: Vec::new(),
			shape_links: Vec::new(),
			blocks: vec![TopLevelBlock { tag: FRME, at }],
			end: nav.pos(),
			is_morph: self.is_morph,
		};

		loop {
			let at = nav.pos();
			let tag = match nav.read_tag_in(&FILE_TAGS) {
				TagRead::Matched(tag) => tag,
				TagRead::EndOfData => break,
				TagRead::NoMatch => {
					let tag = nav.peek_tag().unwrap_or_default();
					return Err(MdlError::UnexpectedTag { at, tag });
				}
			};
			if tag == FRME {
				log::debug!("{}: second root frame at {at}, stopping", self.name);
				nav.set_pos(at);
				break;
			}

			decoded.blocks.push(TopLevelBlock { tag, at });
			match tag {
				MESH if self.is_morph => self.decode_morph(&mut nav, candidates, &mut decoded)?,
				MESH => {
					let mut mesh = Mesh::parse(&mut nav)?;
					mesh.origin_name = self.name.clone();
					decoded.meshes.push(mesh);
				}
				// CLSN carries no geometry.
				_ => {
					nav.seek_block_start();
					nav.seek_block_end();
				}
			}
			nav.skip_whitespace();
		}

		decoded.end = nav.pos();
		Ok(decoded)
	}

	fn decode_morph(&self, nav: &mut Navigator<'_>, candidates: &[Mesh], decoded: &mut DecodedFile) -> Result<()> {
		let morph = Morph::parse(nav)?;
		let source = candidates
			.iter()
			.position(|mesh| mesh.vertex_count() == morph.vertex_count() && !mesh.name.trim().is_empty() && self.name.contains(mesh.name.as_str()));
		let Some(source) = source else {
			log::debug!("{}: no mesh matches morph {:?}", self.name, morph.name);
			return Ok(());
		};

		let morphed = morph.apply(&candidates[source])?;
		decoded.shape_links.push(ShapeLink {
			source,
			name: morphed.name.clone(),
		});
		decoded.meshes.push(morphed);
		Ok(())
	}
}

#[cfg(test)]
mod tests;
