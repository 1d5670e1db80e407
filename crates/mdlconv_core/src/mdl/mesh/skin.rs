use std::collections::HashMap;
use std::collections::hash_map::Entry;

use glam::Affine3A;

use crate::mdl::mesh::VertexGroup;
use crate::mdl::transform::affine_from_col_major;
use crate::mdl::{BONE, Navigator, Result};

const BIND_MATRIX_BYTES: usize = 64;

/// Read a `SKIN` block body: a run of `BONE` groups. Groups without vertices are dropped.
pub(crate) fn read_skin(nav: &mut Navigator<'_>, out: &mut Vec<VertexGroup>) -> Result<()> {
	loop {
		nav.skip_whitespace();
		if !nav.is_at_tag(&BONE) {
			return Ok(());
		}
		nav.skip_bytes(BONE.len());
		match read_vertex_group(nav)? {
			Some(group) => out.push(group),
			None => log::debug!("dropping empty bone group at {}", nav.pos()),
		}
	}
}

/// Read one `BONE` block whose tag has already been consumed.
///
/// Layout: name, `u32` count, `count` vertex indices, `count` weights, then a column-major bind
/// matrix. A short matrix is skipped and replaced by identity. Repeated indices keep their first
/// position and the last weight. Returns `None` for a group with no vertices.
fn read_vertex_group(nav: &mut Navigator<'_>) -> Result<Option<VertexGroup>> {
	nav.seek_block_start();
	let name = nav.read_text();
	let count = nav.read_u32()? as usize;
	let capacity = count.min(nav.remaining() / 8);

	let mut indices = Vec::with_capacity(capacity);
	for _ in 0..count {
		indices.push(nav.read_u32()?);
	}
	let mut weights = Vec::with_capacity(capacity);
	for _ in 0..count {
		weights.push(nav.read_f32()?);
	}

	let (values, read) = nav.read_f32_upto::<16>();
	let bind_matrix = if read == values.len() {
		affine_from_col_major(&values)
	} else {
		log::debug!("bone {name:?} has a short bind matrix ({read} values)");
		nav.skip_bytes(BIND_MATRIX_BYTES - read * 4);
		Affine3A::IDENTITY
	};
	nav.seek_block_end();

	if count == 0 {
		return Ok(None);
	}

	let mut mapping: Vec<(u32, f32)> = Vec::with_capacity(count);
	let mut slots: HashMap<u32, usize> = HashMap::with_capacity(count);
	for (index, weight) in indices.into_iter().zip(weights) {
		match slots.entry(index) {
			Entry::Occupied(slot) => mapping[*slot.get()].1 = weight,
			Entry::Vacant(slot) => {
				slot.insert(mapping.len());
				mapping.push((index, weight));
			}
		}
	}

	Ok(Some(VertexGroup { name, mapping, bind_matrix }))
}
