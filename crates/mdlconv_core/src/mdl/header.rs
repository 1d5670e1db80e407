use crate::mdl::{MdlError, Result};

/// Parsed `BINVRSN{ <revision> }` file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MdlHeader {
	/// Revision number from the version line.
	pub version: i64,
	/// Offset of the first byte after the header block.
	pub data_start: usize,
}

impl MdlHeader {
	/// Fixed literal every MDL file starts with.
	pub const MAGIC: &'static [u8; 8] = b"BINVRSN{";
	/// The only revision this decoder supports.
	pub const SUPPORTED_VERSION: u32 = 1;

	/// Parse the version header from the beginning of `bytes`.
	///
	/// The revision may be surrounded by whitespace on its line; the header block ends at the
	/// next `}` (with optional indentation in front of it), followed by an optional line break.
	/// An unclosed header runs to the end of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let magic = bytes.get(0..Self::MAGIC.len()).ok_or(MdlError::InvalidHeader)?;
		if magic != Self::MAGIC {
			return Err(MdlError::InvalidHeader);
		}

		let mut pos = Self::MAGIC.len();
		while bytes.get(pos).is_some_and(|byte| is_whitespace(*byte)) {
			pos += 1;
		}

		let rest = &bytes[pos..];
		let line_len = rest.iter().position(|byte| matches!(byte, b'\r' | b'\n')).unwrap_or(rest.len());
		let version = parse_decimal(&rest[..line_len]).ok_or(MdlError::InvalidHeader)?;
		pos += line_len;

		let Some(close) = bytes[pos..].iter().position(|byte| *byte == b'}') else {
			return Ok(Self { version, data_start: bytes.len() });
		};
		pos += close + 1;
		if bytes[pos..].starts_with(b"\r\n") {
			pos += 2;
		} else if bytes[pos..].starts_with(b"\n") {
			pos += 1;
		}

		Ok(Self { version, data_start: pos })
	}

	/// Return `true` when the revision matches [`Self::SUPPORTED_VERSION`].
	pub fn is_supported(&self) -> bool {
		self.version == i64::from(Self::SUPPORTED_VERSION)
	}
}

/// Whitespace bytes skipped between tokens: space, tab, CR, LF, and NUL.
pub(crate) fn is_whitespace(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0)
}

/// Parse a trimmed ASCII decimal integer with optional sign.
pub(crate) fn parse_decimal(bytes: &[u8]) -> Option<i64> {
	std::str::from_utf8(bytes).ok()?.trim().parse().ok()
}
