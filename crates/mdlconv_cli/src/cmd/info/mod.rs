use std::path::PathBuf;

use mdlconv::mdl::{MdlFile, Result, tag_label};

use crate::cmd::util::{ErrorJson, emit_json, offset_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields, the top-level block layout, and where decoding stopped.
///
/// Decode failures are reported as part of the output; only load failures are errors. Morph
/// files are decoded without candidate meshes, so their morph blocks are listed but not merged.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = MdlFile::open(&path)?;
	let outcome = file.decode(&[]);
	let decoded = outcome.as_ref().ok();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			name: file.name.clone(),
			is_morph: file.is_morph,
			size: file.bytes().len(),
			version: file.header.version,
			data_start: file.header.data_start,
			root: decoded.map(|decoded| decoded.root.name.clone()),
			frame_count: decoded.map_or(0, |decoded| decoded.root.node_count()),
			corrupted: decoded.is_some_and(|decoded| decoded.corrupted),
			mesh_count: decoded.map_or(0, |decoded| decoded.meshes.len()),
			blocks: decoded
				.map(|decoded| {
					decoded
						.blocks
						.iter()
						.map(|block| BlockJson {
							tag: tag_label(block.tag),
							offset: block.at,
						})
						.collect()
				})
				.unwrap_or_default(),
			end: decoded.map(|decoded| decoded.end),
			error: outcome.as_ref().err().map(ErrorJson::from),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("name: {}", file.name);
	println!("is_morph: {}", file.is_morph);
	println!("size: {}", file.bytes().len());
	println!("version: {}", file.header.version);
	println!("data_start: {}", file.header.data_start);

	match &outcome {
		Ok(decoded) => {
			println!("root: {}", decoded.root.name);
			println!("frame_count: {}", decoded.root.node_count());
			println!("corrupted: {}", decoded.corrupted);
			println!("mesh_count: {}", decoded.meshes.len());
			println!("end: {}", decoded.end);
			println!("blocks:");
			for block in &decoded.blocks {
				println!("  {} @ {}", tag_label(block.tag), block.at);
			}
		}
		Err(err) => {
			println!("error: {err}");
			println!("error_offset: {}", offset_label(err.offset()));
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct BlockJson {
	tag: String,
	offset: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	name: String,
	is_morph: bool,
	size: usize,
	version: i64,
	data_start: usize,
	root: Option<String>,
	frame_count: usize,
	corrupted: bool,
	mesh_count: usize,
	blocks: Vec<BlockJson>,
	end: Option<usize>,
	error: Option<ErrorJson>,
}
