use mdlconv_testkit::{IDENTITY, MdlBuilder, write_scratch_file};

use crate::mdl::{CLSN, FRME, MESH, MdlError, MdlFile, Mesh, ShapeLink};

fn with_root(build: impl FnOnce(&mut MdlBuilder)) -> Vec<u8> {
	let mut builder = MdlBuilder::with_header(1);
	builder.frame_start("RootNode").transform(&IDENTITY).frame_end().raw(b"\r\n");
	build(&mut builder);
	builder.into_bytes()
}

fn base_meshes() -> Vec<Mesh> {
	let bytes = with_root(|builder| {
		builder.triangle_mesh("body");
	});
	let file = MdlFile::from_bytes("body", bytes).expect("base file loads");
	file.decode(&[]).expect("base file decodes").meshes
}

#[test]
fn bare_root_file_decodes() {
	let file = MdlFile::from_bytes("model", b"BINVRSN{\n 1 \n}\r\nFRMERootNode\0".to_vec()).expect("file loads");
	assert!(!file.is_morph);
	assert_eq!(file.header.version, 1);

	let decoded = file.decode(&[]).expect("file decodes");
	assert_eq!(decoded.root.name, "RootNode");
	assert!(decoded.root.children.is_empty());
	assert!(decoded.meshes.is_empty());
	assert!(!decoded.corrupted);
	assert_eq!(decoded.end, file.bytes().len());
}

#[test]
fn root_plus_triangle_mesh_yields_one_valid_mesh() {
	let bytes = with_root(|builder| {
		builder.triangle_mesh("body");
	});
	let file = MdlFile::from_bytes("model", bytes).expect("file loads");
	let decoded = file.decode(&[]).expect("file decodes");

	assert_eq!(decoded.meshes.len(), 1);
	let mesh = &decoded.meshes[0];
	assert!(mesh.is_valid());
	assert_eq!(mesh.name, "body");
	assert_eq!(mesh.origin_name, "model");
	assert_eq!(mesh.triangles[0].indices, [2, 1, 0]);
	let tags: Vec<_> = decoded.blocks.iter().map(|block| block.tag).collect();
	assert_eq!(tags, [FRME, MESH]);
}

#[test]
fn loader_reports_distinct_failures() {
	assert!(matches!(MdlFile::from_bytes("model", Vec::new()), Err(MdlError::EmptyData)));
	assert!(matches!(MdlFile::from_bytes("model", b"FRMERootNode\0{}".to_vec()), Err(MdlError::InvalidHeader)));
	assert!(matches!(
		MdlFile::from_bytes("model", MdlBuilder::with_header(2).into_bytes()),
		Err(MdlError::IncompatibleVersion { version: 2, expected: 1 })
	));
	assert!(matches!(MdlFile::from_bytes("model", MdlBuilder::with_header(1).into_bytes()), Err(MdlError::NoContent)));
}

#[test]
fn open_uses_file_stem_and_morph_marker() {
	let bytes = with_root(|_| {});
	let path = write_scratch_file("file_open", "body_morph_smile.mdl", &bytes);
	let file = MdlFile::open(&path).expect("file opens");

	assert_eq!(file.name, "body_morph_smile");
	assert!(file.is_morph);
}

#[test]
fn open_missing_file_is_io_error() {
	let path = write_scratch_file("file_open", "present.mdl", b"x");
	let missing = path.with_file_name("absent.mdl");
	assert!(matches!(MdlFile::open(missing), Err(MdlError::Io(_))));
}

#[test]
fn unclosed_header_has_no_content() {
	assert!(matches!(MdlFile::from_bytes("model", b"BINVRSN{\r\n 1".to_vec()), Err(MdlError::NoContent)));
	assert!(matches!(
		MdlFile::from_bytes("model", b"BINVRSN{\r\n 3\r\nFRME".to_vec()),
		Err(MdlError::IncompatibleVersion { version: 3, .. })
	));
}

#[test]
fn first_tag_must_be_root_frame() {
	let mut builder = MdlBuilder::with_header(1);
	builder.triangle_mesh("body");
	let file = MdlFile::from_bytes("model", builder.into_bytes()).expect("file loads");

	let err = file.decode(&[]).expect_err("root is missing");
	assert!(matches!(err, MdlError::RootTagMismatch { got, .. } if got == MESH));
	assert_eq!(err.offset(), Some(file.header.data_start));
}

#[test]
fn unknown_top_level_tag_fails_file() {
	let bytes = with_root(|builder| {
		builder.triangle_mesh("body").raw(b"ANIM{}");
	});
	let file = MdlFile::from_bytes("model", bytes).expect("file loads");

	let err = file.decode(&[]).expect_err("unknown tag");
	assert!(matches!(err, MdlError::UnexpectedTag { tag, .. } if tag == *b"ANIM"));
	assert_eq!(err.offset(), Some(file.bytes().len() - 6));
}

#[test]
fn collision_is_skipped_and_second_root_stops_decoding() {
	let bytes = with_root(|builder| {
		builder.collision().triangle_mesh("body").frame_start("Again").frame_end();
	});
	let file = MdlFile::from_bytes("model", bytes).expect("file loads");
	let decoded = file.decode(&[]).expect("file decodes");

	let tags: Vec<_> = decoded.blocks.iter().map(|block| block.tag).collect();
	assert_eq!(tags, [FRME, CLSN, MESH]);
	assert_eq!(decoded.meshes.len(), 1);
	let second_root = file.bytes().windows(4).rposition(|window| window == b"FRME").expect("second root present");
	assert_eq!(decoded.end, second_root);
}

#[test]
fn failed_mesh_aborts_whole_file() {
	let bytes = with_root(|builder| {
		builder.triangle_mesh("ok").mesh_start("cut").raw(b"NRML{").u32(2).f32s(&[0.0, 0.0, 1.0]);
	});
	let file = MdlFile::from_bytes("model", bytes).expect("file loads");

	assert!(matches!(file.decode(&[]), Err(MdlError::UnexpectedEof { .. })));
}

#[test]
fn morph_file_pairs_by_vertex_count_and_file_name() {
	let base = base_meshes();
	let bytes = with_root(|builder| {
		builder.triangle_morph("smile", 1.0);
	});
	let file = MdlFile::from_bytes("body_morph", bytes).expect("morph file loads");
	assert!(file.is_morph);

	let decoded = file.decode(&base).expect("morph file decodes");
	assert_eq!(decoded.meshes.len(), 1);
	let morphed = &decoded.meshes[0];
	assert_eq!(morphed.name, "morph_smile");
	assert_eq!(morphed.origin_name, "body");
	assert!(morphed.is_morphed);
	assert_eq!(
		decoded.shape_links,
		[ShapeLink {
			source: 0,
			name: "morph_smile".to_owned(),
		}]
	);
	assert!(base[0].shapes.is_empty(), "candidates are not modified");
}

#[test]
fn unmatched_morph_is_skipped() {
	let base = base_meshes();
	let bytes = with_root(|builder| {
		builder.triangle_morph("smile", 1.0);
	});
	let file = MdlFile::from_bytes("arm_morph", bytes).expect("morph file loads");

	let decoded = file.decode(&base).expect("morph file decodes");
	assert!(decoded.meshes.is_empty());
	assert!(decoded.shape_links.is_empty());
}

#[test]
fn invalid_morph_block_fails_file() {
	let base = base_meshes();
	let bytes = with_root(|builder| {
		builder.mesh_start("smile").vertices(&[[0.0; 3]; 3]).mesh_end();
	});
	let file = MdlFile::from_bytes("body_morph", bytes).expect("morph file loads");

	assert!(matches!(file.decode(&base), Err(MdlError::InvalidMorph { .. })));
}
