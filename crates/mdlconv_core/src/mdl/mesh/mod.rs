mod materials;
mod skin;

use std::sync::Arc;

use glam::{Affine3A, Vec2, Vec3};

use crate::mdl::tag::{is_tag_like, tag_label};
use crate::mdl::{FACE, MESH_TAGS, MLST, MdlError, NRML, Navigator, Result, SKIN, TSPC, TXUV, Tag, TagRead, VRTX};

pub(crate) use materials::read_material_list;
pub(crate) use skin::read_skin;

/// Size of one `TSPC` record in bytes.
const TSPC_RECORD_SIZE: usize = 24;

/// Three vertex indices forming one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
	/// Vertex indices in output winding.
	pub indices: [u16; 3],
}

impl Triangle {
	/// Return `true` when all three indices are distinct.
	pub fn is_valid(&self) -> bool {
		let [a, b, c] = self.indices;
		a != b && a != c && b != c
	}
}

/// Material slot bound to an inclusive range of triangle indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
	/// First triangle index.
	pub first: u32,
	/// Last triangle index.
	pub last: u32,
	/// Material name.
	pub name: String,
}

impl Reference {
	/// Number of triangles covered; a range with `first == last` counts as empty.
	pub fn index_count(&self) -> u64 {
		if self.first == self.last { 0 } else { u64::from(self.first.abs_diff(self.last)) + 1 }
	}
}

/// Per-bone vertex weights plus the bone's bind pose.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGroup {
	/// Bone name.
	pub name: String,
	/// `(vertex index, weight)` in the order indices first appeared.
	pub mapping: Vec<(u32, f32)>,
	/// Bind-pose transform.
	pub bind_matrix: Affine3A,
}

impl VertexGroup {
	/// Return `true` when no vertex is assigned to the group.
	pub fn is_unassigned(&self) -> bool {
		self.mapping.is_empty()
	}

	/// Look up the weight of `index`.
	pub fn weight_of(&self, index: u32) -> Option<f32> {
		self.mapping.iter().find(|(vertex, _)| *vertex == index).map(|(_, weight)| *weight)
	}
}

/// Named blend shape registered on a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeWeight {
	/// Name of the morphed mesh providing the shape.
	pub name: String,
	/// Blend weight in `0..=1`.
	pub weight: f32,
}

/// Decoded mesh geometry with materials and skin weights.
///
/// Geometry arrays are shared immutable slices, so cloning a mesh (as morph merging does) never
/// copies or aliases mutable data.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
	/// Mesh name.
	pub name: String,
	/// Identity before morphing: the source mesh name for morphs, the file name otherwise.
	pub origin_name: String,
	/// Vertex positions.
	pub vertices: Arc<[Vec3]>,
	/// Vertex normals.
	pub normals: Arc<[Vec3]>,
	/// Texture coordinates with top-left origin; empty when the mesh has none.
	pub tex_coords: Arc<[Vec2]>,
	/// Faces.
	pub triangles: Arc<[Triangle]>,
	/// Material slots.
	pub materials: Arc<[Reference]>,
	/// Skin weight groups.
	pub weights: Arc<[VertexGroup]>,
	/// Morph shapes derived from this mesh.
	pub shapes: Vec<ShapeWeight>,
	/// Set on meshes produced by morph merging.
	pub is_morphed: bool,
}

impl Mesh {
	/// Decode a mesh block whose `MESH` tag has already been consumed.
	///
	/// Unknown sub-blocks are skipped. Any failed sub-block aborts the mesh after its closing brace
	/// has been consumed; the cursor is then unreliable for the rest of the file.
	pub fn parse(nav: &mut Navigator<'_>) -> Result<Mesh> {
		let name = nav.read_text();
		let mut data = MeshData::default();

		nav.seek_block_start();
		let outcome = for_each_sub_block(nav, true, |nav, tag| match tag {
			VRTX => read_vertices(nav, &mut data.vertices),
			NRML => read_normals(nav, &mut data.normals),
			TXUV => read_tex_coords(nav, &mut data.tex_coords),
			FACE => read_faces(nav, &mut data.triangles),
			MLST => read_material_list(nav, &mut data.materials),
			SKIN => read_skin(nav, &mut data.weights),
			TSPC => skip_tspc(nav),
			other => {
				log::debug!("skipping mesh sub-block {} at {}", tag_label(other), nav.pos());
				Ok(())
			}
		});
		nav.seek_block_end();
		outcome?;

		let mesh = data.into_mesh(name);
		if !mesh.is_valid() {
			return Err(MdlError::InvalidMesh {
				name: mesh.name,
				at: nav.pos(),
			});
		}
		Ok(mesh)
	}

	/// Return `true` when the mesh has enough geometry to be exported.
	pub fn is_valid(&self) -> bool {
		self.vertices.len() > 2 && !self.normals.is_empty() && !self.triangles.is_empty() && !self.materials.is_empty() && !self.has_invalid_faces()
	}

	/// Number of vertex positions.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Return `true` when texture coordinates are present.
	pub fn has_uv(&self) -> bool {
		!self.tex_coords.is_empty()
	}

	/// Return `true` when any face repeats a vertex index.
	pub fn has_invalid_faces(&self) -> bool {
		self.triangles.iter().any(|triangle| !triangle.is_valid())
	}

	/// Return `true` when any weight group has no assigned vertex.
	pub fn has_unassigned_weights(&self) -> bool {
		self.weights.iter().any(VertexGroup::is_unassigned)
	}

	/// Total number of weight entries across all groups.
	pub fn weights_len(&self) -> usize {
		self.weights.iter().map(|group| group.mapping.len()).sum()
	}

	/// Look up a registered shape weight.
	pub fn shape_weight(&self, name: &str) -> Option<f32> {
		self.shapes.iter().find(|shape| shape.name == name).map(|shape| shape.weight)
	}

	/// Register `name` as a shape of this mesh, replacing the weight of an existing entry.
	pub fn set_shape_weight(&mut self, name: &str, weight: f32) {
		match self.shapes.iter_mut().find(|shape| shape.name == name) {
			Some(shape) => shape.weight = weight,
			None => self.shapes.push(ShapeWeight {
				name: name.to_owned(),
				weight,
			}),
		}
	}
}

#[derive(Default)]
struct MeshData {
	vertices: Vec<Vec3>,
	normals: Vec<Vec3>,
	tex_coords: Vec<Vec2>,
	triangles: Vec<Triangle>,
	materials: Vec<Reference>,
	weights: Vec<VertexGroup>,
}

impl MeshData {
	fn into_mesh(self, name: String) -> Mesh {
		Mesh {
			name,
			origin_name: String::new(),
			vertices: self.vertices.into(),
			normals: self.normals.into(),
			tex_coords: self.tex_coords.into(),
			triangles: self.triangles.into(),
			materials: self.materials.into(),
			weights: self.weights.into(),
			shapes: Vec::new(),
			is_morphed: false,
		}
	}
}

/// Walk the sub-blocks of a mesh or morph block until its closing brace.
///
/// Each known tag is handed to `handler` with the cursor inside its block; the block is closed
/// afterwards whether or not the handler succeeded. With `skip_unknown`, tag-like words outside
/// the known set are stepped over as whole blocks; otherwise they end the walk.
pub(crate) fn for_each_sub_block<'a, F>(nav: &mut Navigator<'a>, skip_unknown: bool, mut handler: F) -> Result<()>
where
	F: FnMut(&mut Navigator<'a>, Tag) -> Result<()>,
{
	loop {
		nav.skip_whitespace();
		let tag = match nav.read_tag_in(&MESH_TAGS) {
			TagRead::Matched(tag) => tag,
			TagRead::EndOfData => return Ok(()),
			TagRead::NoMatch => match nav.peek_tag() {
				Some(tag) if skip_unknown && is_tag_like(&tag) => {
					log::debug!("skipping unknown sub-block {} at {}", tag_label(tag), nav.pos());
					nav.skip_bytes(tag.len());
					nav.seek_block_start();
					nav.seek_block_end();
					continue;
				}
				_ => return Ok(()),
			},
		};

		nav.seek_block_start();
		let outcome = handler(nav, tag);
		nav.seek_block_end();
		outcome?;
	}
}

/// Read a `VRTX` sequence; each record is `x y z w` and `w` is dropped.
pub(crate) fn read_vertices(nav: &mut Navigator<'_>, out: &mut Vec<Vec3>) -> Result<()> {
	nav.read_counted(|nav| {
		let point = Vec3::new(nav.read_f32()?, nav.read_f32()?, nav.read_f32()?);
		nav.read_f32()?;
		out.push(point);
		Ok(())
	})?;
	Ok(())
}

/// Read an `NRML` sequence of `x y z` records.
pub(crate) fn read_normals(nav: &mut Navigator<'_>, out: &mut Vec<Vec3>) -> Result<()> {
	nav.read_counted(|nav| {
		out.push(Vec3::new(nav.read_f32()?, nav.read_f32()?, nav.read_f32()?));
		Ok(())
	})?;
	Ok(())
}

fn read_tex_coords(nav: &mut Navigator<'_>, out: &mut Vec<Vec2>) -> Result<()> {
	nav.read_counted(|nav| {
		let u = nav.read_f32()?;
		let v = nav.read_f32()?;
		out.push(Vec2::new(u, 1.0 - v));
		Ok(())
	})?;
	Ok(())
}

fn read_faces(nav: &mut Navigator<'_>, out: &mut Vec<Triangle>) -> Result<()> {
	nav.read_counted(|nav| {
		let [a, b, c] = [nav.read_u16()?, nav.read_u16()?, nav.read_u16()?];
		out.push(Triangle { indices: [c, b, a] });
		Ok(())
	})?;
	Ok(())
}

/// Skip a `TSPC` block: a `u32` count of opaque 24-byte records.
pub(crate) fn skip_tspc(nav: &mut Navigator<'_>) -> Result<()> {
	let count = nav.read_u32()? as usize;
	nav.skip_bytes(count.saturating_mul(TSPC_RECORD_SIZE));
	Ok(())
}
