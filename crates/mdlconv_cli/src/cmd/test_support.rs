use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use mdlconv_testkit::{IDENTITY, MdlBuilder, target_dir as workspace_target_dir, write_scratch_file};

static MDLCONV_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Write a model with a root, a `skeleton` child, and one frame plus triangle mesh per name.
pub(crate) fn write_model(group: &str, file_name: &str, meshes: &[&str]) -> String {
	let mut builder = MdlBuilder::with_header(1);
	builder
		.frame_start("RootNode")
		.transform(&IDENTITY)
		.frame_start(" skeleton")
		.transform(&IDENTITY)
		.frame_end();
	for mesh in meshes {
		builder.frame_start(&format!(" {mesh}")).transform(&IDENTITY).frame_end();
	}
	builder.frame_end().raw(b"\r\n");
	for mesh in meshes {
		builder.triangle_mesh(mesh);
	}
	write_input(group, file_name, &builder.into_bytes())
}

/// Write a morph file holding one lifted triangle morph per name.
pub(crate) fn write_morphs(group: &str, file_name: &str, morphs: &[&str]) -> String {
	let mut builder = MdlBuilder::with_header(1);
	builder.frame_start("RootNode").transform(&IDENTITY).frame_end().raw(b"\r\n");
	for morph in morphs {
		builder.triangle_morph(morph, 1.0);
	}
	write_input(group, file_name, &builder.into_bytes())
}

pub(crate) fn write_input(group: &str, file_name: &str, bytes: &[u8]) -> String {
	write_scratch_file(group, file_name, bytes).to_string_lossy().into_owned()
}

pub(crate) fn run_mdlconv(args: &[&str]) -> Output {
	Command::new(mdlconv_bin()).args(args).output().expect("mdlconv command executes")
}

pub(crate) fn run_mdlconv_json(args: &[&str]) -> serde_json::Value {
	let output = run_mdlconv(args);
	assert!(
		output.status.success(),
		"mdlconv command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn mdlconv_bin() -> &'static PathBuf {
	MDLCONV_BIN.get_or_init(resolve_mdlconv_bin)
}

fn resolve_mdlconv_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_mdlconv") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "mdlconv.exe" } else { "mdlconv" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "mdlconv"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build mdlconv binary at {}", bin.display());

	bin
}
