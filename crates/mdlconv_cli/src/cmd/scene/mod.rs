use std::path::{Path, PathBuf};

use mdlconv::mdl::{Frame, MdlError, MdlFile, Mesh, Result, Scene};

use crate::cmd::util::{ErrorJson, emit_json, offset_label};

#[derive(clap::Args)]
pub struct Args {
	#[arg(required = true)]
	pub paths: Vec<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Load every path in order into one scene and print the frame tree and mesh table.
///
/// Files that fail to load or decode are skipped and reported; the command fails only when
/// nothing usable was loaded.
pub fn run(args: Args) -> Result<()> {
	let Args { paths, json } = args;

	let mut scene = Scene::new();
	let mut loaded = Vec::new();
	let mut failed = Vec::new();
	for path in &paths {
		match add_path(&mut scene, path) {
			Ok(()) => loaded.push(path.display().to_string()),
			Err(err) => {
				log::warn!("decoding of {} interrupted at byte {}: {err}", path.display(), offset_label(err.offset()));
				failed.push(FailureJson {
					path: path.display().to_string(),
					error: ErrorJson::from(&err),
				});
			}
		}
	}

	if !scene.has_any() {
		return Err(MdlError::NothingLoaded { files: paths.len() });
	}

	if json {
		let payload = SceneJson {
			loaded,
			failed,
			root: scene.root.as_ref().map(frame_json),
			meshes: scene.meshes.iter().map(mesh_json).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("loaded: {}", loaded.len());
	println!("failed: {}", failed.len());
	for failure in &failed {
		println!("  {} @ {}: {}", failure.path, offset_label(failure.error.offset), failure.error.message);
	}
	if let Some(root) = &scene.root {
		println!("frames:");
		print_frame(root, 1);
	}
	println!("meshes:");
	for mesh in &scene.meshes {
		println!(
			"  {} origin={} vertices={} triangles={} materials={} groups={} uv={} morphed={}",
			mesh.name,
			mesh.origin_name,
			mesh.vertex_count(),
			mesh.triangles.len(),
			mesh.materials.len(),
			mesh.weights.len(),
			mesh.has_uv(),
			mesh.is_morphed
		);
		for shape in &mesh.shapes {
			println!("    shape {} = {}", shape.name, shape.weight);
		}
	}

	Ok(())
}

fn add_path(scene: &mut Scene, path: &Path) -> Result<()> {
	let file = MdlFile::open(path)?;
	scene.add_file(&file)
}

fn print_frame(frame: &Frame, depth: usize) {
	let marker = if frame.dirty { " (dirty)" } else { "" };
	println!("{}{}{marker}", "  ".repeat(depth), frame.name);
	for child in &frame.children {
		print_frame(child, depth + 1);
	}
}

fn frame_json(frame: &Frame) -> FrameJson {
	FrameJson {
		name: frame.name.clone(),
		dirty: frame.dirty,
		translation: frame.transform.translation.to_array(),
		children: frame.children.iter().map(frame_json).collect(),
	}
}

fn mesh_json(mesh: &Mesh) -> MeshJson {
	MeshJson {
		name: mesh.name.clone(),
		origin_name: mesh.origin_name.clone(),
		vertices: mesh.vertex_count(),
		normals: mesh.normals.len(),
		tex_coords: mesh.tex_coords.len(),
		triangles: mesh.triangles.len(),
		materials: mesh
			.materials
			.iter()
			.map(|material| MaterialJson {
				name: material.name.clone(),
				first: material.first,
				last: material.last,
			})
			.collect(),
		bones: mesh.weights.iter().map(|group| group.name.clone()).collect(),
		weights_len: mesh.weights_len(),
		is_morphed: mesh.is_morphed,
		shapes: mesh
			.shapes
			.iter()
			.map(|shape| ShapeJson {
				name: shape.name.clone(),
				weight: shape.weight,
			})
			.collect(),
	}
}

#[derive(serde::Serialize)]
struct FailureJson {
	path: String,
	error: ErrorJson,
}

#[derive(serde::Serialize)]
struct FrameJson {
	name: String,
	dirty: bool,
	translation: [f32; 3],
	children: Vec<FrameJson>,
}

#[derive(serde::Serialize)]
struct MaterialJson {
	name: String,
	first: u32,
	last: u32,
}

#[derive(serde::Serialize)]
struct ShapeJson {
	name: String,
	weight: f32,
}

#[derive(serde::Serialize)]
struct MeshJson {
	name: String,
	origin_name: String,
	vertices: usize,
	normals: usize,
	tex_coords: usize,
	triangles: usize,
	materials: Vec<MaterialJson>,
	bones: Vec<String>,
	weights_len: usize,
	is_morphed: bool,
	shapes: Vec<ShapeJson>,
}

#[derive(serde::Serialize)]
struct SceneJson {
	loaded: Vec<String>,
	failed: Vec<FailureJson>,
	root: Option<FrameJson>,
	meshes: Vec<MeshJson>,
}
