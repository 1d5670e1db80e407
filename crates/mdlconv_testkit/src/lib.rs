//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write `bytes` to `<target>/mdlconv-tests/<group>/<name>` and return the path.
pub fn write_scratch_file(group: &str, name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("mdlconv-tests").join(group);
	fs::create_dir_all(&dir).expect("scratch dir is creatable");
	let path = dir.join(name);
	fs::write(&path, bytes).expect("scratch file is writable");
	path
}

/// Identity matrix in the column-major layout used by `TRNS` and `BONE` blocks.
pub const IDENTITY: [f32; 16] = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];

/// One material entry for [`MdlBuilder::materials`].
#[derive(Debug, Clone, Copy)]
pub struct MaterialSpec<'a> {
	/// First triangle index.
	pub first: u32,
	/// Last triangle index.
	pub last: u32,
	/// Material name written on the `MTRL` line.
	pub name: &'a str,
	/// Number of binding blocks in the description.
	pub bindings: u32,
}

/// One bone group for [`MdlBuilder::skin`].
#[derive(Debug, Clone, Copy)]
pub struct BoneSpec<'a> {
	/// Bone name.
	pub name: &'a str,
	/// `(vertex index, weight)` pairs in file order.
	pub weights: &'a [(u32, f32)],
	/// Bind matrix; `None` truncates the block right after the weights.
	pub bind: Option<[f32; 16]>,
}

/// Byte-level writer for synthetic MDL files.
///
/// Block helpers emit the exact framing the decoder walks: tags followed by `{`, binary payloads
/// prefixed by `u32` counts, text fields terminated by NUL, and `}` closers.
#[derive(Debug, Default, Clone)]
pub struct MdlBuilder {
	bytes: Vec<u8>,
}

impl MdlBuilder {
	/// Start an empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a buffer with a `BINVRSN{` header for `version`.
	pub fn with_header(version: u32) -> Self {
		let mut builder = Self::new();
		builder.raw(format!("BINVRSN{{\r\n    {version}\r\n}}\r\n").as_bytes());
		builder
	}

	/// Return the bytes written so far.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Current length of the buffer.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Append raw bytes.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append NUL-terminated text.
	pub fn text(&mut self, text: &str) -> &mut Self {
		self.raw(text.as_bytes()).raw(&[0])
	}

	/// Append a little-endian `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append little-endian `f32` values.
	pub fn f32s(&mut self, values: &[f32]) -> &mut Self {
		for value in values {
			self.raw(&value.to_le_bytes());
		}
		self
	}

	/// Open a frame: `FRME<name>\0{`. Child frames conventionally start their name with a space.
	pub fn frame_start(&mut self, name: &str) -> &mut Self {
		self.raw(b"FRME").text(name).raw(b"{")
	}

	/// Emit a `TRNS{...}` block with `values` floats.
	pub fn transform(&mut self, values: &[f32]) -> &mut Self {
		self.raw(b"TRNS{").f32s(values).raw(b"}")
	}

	/// Close the innermost frame.
	pub fn frame_end(&mut self) -> &mut Self {
		self.raw(b"}")
	}

	/// Open a mesh or morph block: `MESH<name>\0{`.
	pub fn mesh_start(&mut self, name: &str) -> &mut Self {
		self.raw(b"MESH").text(name).raw(b"{")
	}

	/// Close a mesh block and terminate its line.
	pub fn mesh_end(&mut self) -> &mut Self {
		self.raw(b"}\r\n")
	}

	/// Emit a `VRTX` block; each position gets a trailing `w = 1`.
	pub fn vertices(&mut self, points: &[[f32; 3]]) -> &mut Self {
		self.raw(b"VRTX{").u32(points.len() as u32);
		for point in points {
			self.f32s(point).f32s(&[1.0]);
		}
		self.raw(b"}")
	}

	/// Emit a `NRML` block.
	pub fn normals(&mut self, normals: &[[f32; 3]]) -> &mut Self {
		self.raw(b"NRML{").u32(normals.len() as u32);
		for normal in normals {
			self.f32s(normal);
		}
		self.raw(b"}")
	}

	/// Emit a `TXUV` block.
	pub fn tex_coords(&mut self, coords: &[[f32; 2]]) -> &mut Self {
		self.raw(b"TXUV{").u32(coords.len() as u32);
		for coord in coords {
			self.f32s(coord);
		}
		self.raw(b"}")
	}

	/// Emit a `FACE` block with indices in file winding.
	pub fn faces(&mut self, faces: &[[u16; 3]]) -> &mut Self {
		self.raw(b"FACE{").u32(faces.len() as u32);
		for face in faces {
			for index in face {
				self.raw(&index.to_le_bytes());
			}
		}
		self.raw(b"}")
	}

	/// Emit an `MLST` block with one `MTRL` description per entry.
	pub fn materials(&mut self, materials: &[MaterialSpec<'_>]) -> &mut Self {
		self.raw(b"MLST{").u32(materials.len() as u32);
		for material in materials {
			self.u32(material.first).u32(material.last);
		}
		self.raw(b"\r\n");
		for material in materials {
			self.raw(format!("MTRL {}{{\r\n\tSBST{{\r\n\t\t{}\r\n", material.name, material.bindings).as_bytes());
			for _ in 0..material.bindings {
				self.raw(b"\t\tBIND{ diffuse }\r\n");
			}
			self.raw(b"\t}\r\n}\r\n");
		}
		self.raw(b"}")
	}

	/// Emit a `SKIN` block with one `BONE` group per entry.
	pub fn skin(&mut self, bones: &[BoneSpec<'_>]) -> &mut Self {
		self.raw(b"SKIN{");
		for bone in bones {
			self.raw(b"BONE{").text(bone.name).u32(bone.weights.len() as u32);
			for (index, _) in bone.weights {
				self.u32(*index);
			}
			for (_, weight) in bone.weights {
				self.f32s(&[*weight]);
			}
			if let Some(bind) = bone.bind {
				self.f32s(&bind);
			}
			self.raw(b"}");
		}
		self.raw(b"}")
	}

	/// Emit a `TSPC` block with `count` zeroed 24-byte records.
	pub fn tspc(&mut self, count: u32) -> &mut Self {
		self.raw(b"TSPC{").u32(count).raw(&vec![0_u8; count as usize * 24]).raw(b"}")
	}

	/// Emit a textual `CLSN` block.
	pub fn collision(&mut self) -> &mut Self {
		self.raw(b"CLSN{\r\n\tbox\r\n\t0 0 0\r\n\t1 1 1\r\n\t0\r\n}\r\n")
	}

	/// Emit a complete single-triangle mesh named `name` with one material.
	pub fn triangle_mesh(&mut self, name: &str) -> &mut Self {
		self.mesh_start(name)
			.vertices(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
			.normals(&[[0.0, 0.0, 1.0]])
			.faces(&[[0, 1, 2]])
			.materials(&[MaterialSpec {
				first: 0,
				last: 0,
				name: "default",
				bindings: 1,
			}])
			.mesh_end()
	}

	/// Emit a morph block for a single triangle offset along `+z` by `lift`.
	pub fn triangle_morph(&mut self, name: &str, lift: f32) -> &mut Self {
		self.mesh_start(name)
			.vertices(&[[0.0, 0.0, lift], [1.0, 0.0, lift], [0.0, 1.0, lift]])
			.normals(&[[0.0, 0.0, 1.0]])
			.mesh_end()
	}
}
