use crate::mdl::{DecodedFile, Frame, MdlFile, Mesh, Result};

/// Aggregate of every successfully decoded file: one skeleton plus the ordered mesh list.
///
/// Mesh order follows the order frames were appended below the root, which downstream skin
/// binding relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
	/// Root frame seeded by the first normal file.
	pub root: Option<Frame>,
	/// Meshes in append order.
	pub meshes: Vec<Mesh>,
}

impl Scene {
	/// Create an empty scene.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return `true` once a root frame exists.
	pub fn is_defined(&self) -> bool {
		self.root.is_some()
	}

	/// Return `true` when the root has children or any mesh exists.
	pub fn has_any(&self) -> bool {
		self.root.as_ref().is_some_and(Frame::has_children) || !self.meshes.is_empty()
	}

	/// Decode `file` against the current meshes and merge the result.
	///
	/// On error the scene is left exactly as it was.
	pub fn add_file(&mut self, file: &MdlFile) -> Result<()> {
		let decoded = file.decode(&self.meshes)?;
		self.merge(decoded);
		Ok(())
	}

	/// Fold one decoded file into the scene.
	///
	/// The first normal file seeds the scene. Later normal files contribute their root's
	/// children except the first one, which repeats the skeleton, and all of their meshes.
	/// Morph files contribute meshes only and register each as a shape of its source mesh, so
	/// `decoded` must come from decoding against this scene's current meshes. A morph file seen
	/// before any normal file contributes nothing.
	pub fn merge(&mut self, decoded: DecodedFile) {
		let DecodedFile {
			root,
			meshes,
			shape_links,
			is_morph,
			..
		} = decoded;

		let Some(scene_root) = self.root.as_mut() else {
			if is_morph {
				log::debug!("morph file arrived before any base model, ignoring {} meshes", meshes.len());
			} else {
				self.root = Some(root);
				self.meshes = meshes;
			}
			return;
		};

		if !is_morph {
			scene_root.children.extend(root.children.into_iter().skip(1));
		}
		for link in shape_links {
			match self.meshes.get_mut(link.source) {
				Some(source) => source.set_shape_weight(&link.name, 0.0),
				None => log::warn!("shape {:?} points past the mesh list ({})", link.name, link.source),
			}
		}
		self.meshes.extend(meshes);
	}
}
