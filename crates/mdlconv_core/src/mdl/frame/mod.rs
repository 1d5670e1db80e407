use glam::Affine3A;

use crate::mdl::transform::snapped_affine_from_col_major;
use crate::mdl::{FRME, Navigator, TRNS};

/// Name given to frames whose name field is empty.
pub const UNKNOWN_FRAME_NAME: &str = "Unknown";
/// Suffix appended to frames whose transform block is short.
pub const BROKEN_SUFFIX: &str = "_broken";
/// Deepest frame nesting decoded before a subtree is skipped as corrupt.
pub const MAX_FRAME_DEPTH: u32 = 256;

/// One node of the skeleton/scene hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
	/// Node label.
	pub name: String,
	/// Local transform; the bottom row is implicitly `0 0 0 1`.
	pub transform: Affine3A,
	/// Child nodes in file order.
	pub children: Vec<Frame>,
	/// Set when this node (not its children) was decoded from damaged data.
	pub dirty: bool,
}

impl Frame {
	/// Create a frame with identity transform and no children.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			transform: Affine3A::IDENTITY,
			children: Vec::new(),
			dirty: false,
		}
	}

	/// Return `true` when the frame has at least one child.
	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}

	/// Count this frame and all of its descendants.
	pub fn node_count(&self) -> usize {
		1 + self.children.iter().map(Frame::node_count).sum::<usize>()
	}

	/// Decode a frame block whose `FRME` tag has already been consumed.
	///
	/// Returns the frame and whether it or any descendant was corrupt. Corruption is never fatal:
	/// an empty name becomes [`UNKNOWN_FRAME_NAME`], and a short transform block yields a
	/// childless `<name>_broken` frame.
	pub fn parse(nav: &mut Navigator<'_>) -> (Frame, bool) {
		parse_at_depth(nav, 0)
	}
}

fn parse_at_depth(nav: &mut Navigator<'_>, depth: u32) -> (Frame, bool) {
	let text = nav.read_text();
	let name = text.strip_prefix(' ').unwrap_or(&text);
	let (name, mut corrupt) = if name.is_empty() { (UNKNOWN_FRAME_NAME, true) } else { (name, false) };

	if depth >= MAX_FRAME_DEPTH {
		log::warn!("frame {name:?} at {} exceeds nesting depth {MAX_FRAME_DEPTH}", nav.pos());
		nav.skip_block();
		return (broken(name), true);
	}

	nav.seek_block_start();
	let mut frame = Frame::new(name);
	if nav.is_at_tag(&TRNS) {
		nav.seek_block_start();
		let (values, count) = nav.read_f32_upto::<16>();
		nav.seek_block_end();
		if count != values.len() {
			log::warn!("frame {name:?} has {count} transform values at {}", nav.pos());
			return (broken(name), true);
		}
		frame.transform = snapped_affine_from_col_major(&values);
	}
	frame.dirty = corrupt;

	loop {
		nav.skip_whitespace();
		if !nav.is_at_tag(&FRME) {
			break;
		}
		nav.skip_bytes(FRME.len());
		let (child, child_corrupt) = parse_at_depth(nav, depth + 1);
		corrupt |= child_corrupt;
		frame.children.push(child);
	}
	nav.seek_block_end();

	(frame, corrupt)
}

fn broken(name: &str) -> Frame {
	let mut frame = Frame::new(format!("{name}{BROKEN_SUFFIX}"));
	frame.dirty = true;
	frame
}
