use std::sync::Arc;

use glam::Vec3;

use crate::mdl::mesh::{for_each_sub_block, read_normals, read_vertices, skip_tspc};
use crate::mdl::{Mesh, MdlError, NRML, Navigator, Result, TSPC, VRTX};

/// Prefix marking mesh names produced from morph targets.
pub const MORPH_PREFIX: &str = "morph";

/// Replacement geometry for an existing mesh, read from a morph file.
#[derive(Debug, Clone, PartialEq)]
pub struct Morph {
	/// Morph block name.
	pub name: String,
	/// Replacement vertex positions.
	pub vertices: Vec<Vec3>,
	/// Replacement normals.
	pub normals: Vec<Vec3>,
}

impl Morph {
	/// Decode a morph block whose `MESH` tag has already been consumed.
	///
	/// Only vertex, normal, and `TSPC` sub-blocks may appear; any other known mesh sub-block is an
	/// error.
	pub fn parse(nav: &mut Navigator<'_>) -> Result<Morph> {
		let name = nav.read_text();
		let mut vertices = Vec::new();
		let mut normals = Vec::new();

		nav.seek_block_start();
		let outcome = for_each_sub_block(nav, false, |nav, tag| match tag {
			VRTX => read_vertices(nav, &mut vertices),
			NRML => read_normals(nav, &mut normals),
			TSPC => skip_tspc(nav),
			other => Err(MdlError::UnexpectedTag { at: nav.pos(), tag: other }),
		});
		nav.seek_block_end();
		outcome?;

		let morph = Morph { name, vertices, normals };
		if !morph.is_valid() {
			return Err(MdlError::InvalidMorph {
				name: morph.name,
				at: nav.pos(),
			});
		}
		Ok(morph)
	}

	/// Return `true` when the morph has a name, more than two vertices, and a normal.
	pub fn is_valid(&self) -> bool {
		!self.name.is_empty() && self.vertices.len() > 2 && !self.normals.is_empty()
	}

	/// Number of vertex positions.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Name the morphed mesh will carry.
	pub fn shape_name(&self) -> String {
		if self.name.starts_with(MORPH_PREFIX) {
			self.name.clone()
		} else {
			format!("{MORPH_PREFIX}_{}", self.name)
		}
	}

	/// Build a morphed copy of `target` with this morph's geometry.
	///
	/// The copy shares every other geometry slice with `target`, records `target`'s name as its
	/// origin, and starts with an empty shape table. `target` is not modified.
	pub fn apply(self, target: &Mesh) -> Result<Mesh> {
		let got = self.vertex_count();
		if target.vertex_count() != got {
			return Err(MdlError::MorphVertexCountMismatch {
				morph: self.name,
				mesh: target.name.clone(),
				expected: target.vertex_count(),
				got,
			});
		}
		if target.name.trim().is_empty() {
			return Err(MdlError::UnnamedMorphTarget { morph: self.name });
		}

		Ok(Mesh {
			name: self.shape_name(),
			origin_name: target.name.clone(),
			vertices: Arc::from(self.vertices),
			normals: Arc::from(self.normals),
			tex_coords: Arc::clone(&target.tex_coords),
			triangles: Arc::clone(&target.triangles),
			materials: Arc::clone(&target.materials),
			weights: Arc::clone(&target.weights),
			shapes: Vec::new(),
			is_morphed: true,
		})
	}

	/// Like [`Morph::apply`], and also register the result as a shape of `target` at weight 0.
	pub fn merge(self, target: &mut Mesh) -> Result<Mesh> {
		let morphed = self.apply(target)?;
		target.set_shape_weight(&morphed.name, 0.0);
		Ok(morphed)
	}
}
