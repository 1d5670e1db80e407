use crate::mdl::header::is_whitespace;
use crate::mdl::{MdlError, MdlHeader, Result, Tag};

/// Outcome of a match-or-rewind tag read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRead {
	/// One of the candidates matched; the cursor advanced by four bytes.
	Matched(Tag),
	/// Four bytes were available but matched no candidate; the cursor is unchanged.
	NoMatch,
	/// Fewer than four bytes remain.
	EndOfData,
}

/// Bounded read cursor over an immutable MDL byte buffer.
///
/// Every read is checked against the buffer end; seeks that find no target land at the end
/// instead of failing, so callers detect truncation through the next checked read.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
	bytes: &'a [u8],
	pos: usize,
	data_start: usize,
}

impl<'a> Navigator<'a> {
	/// Create a navigator at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, data_start: 0 }
	}

	/// Create a navigator positioned at the first byte after a parsed header.
	pub fn at_data_start(bytes: &'a [u8], header: &MdlHeader) -> Self {
		let data_start = header.data_start.min(bytes.len());
		Self {
			bytes,
			pos: data_start,
			data_start,
		}
	}

	/// Return the whole underlying buffer.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Move the cursor to `pos`, clamped to the buffer end.
	pub fn set_pos(&mut self, pos: usize) {
		self.pos = pos.min(self.bytes.len());
	}

	/// Offset recorded by the last successful version check.
	pub fn data_start(&self) -> usize {
		self.data_start
	}

	/// Rewind to the recorded data start.
	pub fn move_data_start(&mut self) {
		self.pos = self.data_start;
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return `true` when at least `n` unread bytes remain.
	///
	/// `has_more(0)` asks the inverse question: is the cursor exactly at the end?
	pub fn has_more(&self, n: usize) -> bool {
		if n == 0 {
			return self.pos == self.bytes.len();
		}
		self.remaining() >= n
	}

	/// Return the byte under the cursor without consuming it.
	pub fn peek_byte(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	/// Advance by `n` bytes, stopping at the buffer end.
	pub fn skip_bytes(&mut self, n: usize) {
		self.pos = self.pos.saturating_add(n).min(self.bytes.len());
	}

	/// Skip any run of space, tab, CR, LF, or NUL bytes.
	pub fn skip_whitespace(&mut self) {
		while self.peek_byte().is_some_and(is_whitespace) {
			self.pos += 1;
		}
	}

	/// Return the bytes up to the next CR-LF pair (or the end) without moving the cursor.
	pub fn peek_line(&self) -> &'a [u8] {
		let rest = &self.bytes[self.pos..];
		let end = find_crlf(rest).unwrap_or(rest.len());
		&rest[..end]
	}

	/// Read four bytes and keep them only when they equal one of `candidates`.
	pub fn read_tag_in(&mut self, candidates: &[Tag]) -> TagRead {
		let start = self.pos;
		let Some(tag) = self.read_tag() else {
			return TagRead::EndOfData;
		};
		if candidates.contains(&tag) {
			return TagRead::Matched(tag);
		}
		self.pos = start;
		TagRead::NoMatch
	}

	/// Consume four bytes unconditionally; `None` when fewer remain.
	pub fn read_tag(&mut self) -> Option<Tag> {
		let raw = self.bytes.get(self.pos..self.pos + 4)?;
		let mut tag = [0_u8; 4];
		tag.copy_from_slice(raw);
		self.pos += 4;
		Some(tag)
	}

	/// Return the four bytes under the cursor without consuming them.
	pub fn peek_tag(&self) -> Option<Tag> {
		self.clone().read_tag()
	}

	/// Return `true` when the bytes at the cursor equal `tag`. Empty tags never match.
	pub fn is_at_tag(&self, tag: &[u8]) -> bool {
		!tag.is_empty() && self.bytes[self.pos..].starts_with(tag)
	}

	/// Read text up to the next NUL (or the end) and step past the terminator.
	pub fn read_text(&mut self) -> String {
		let rest = &self.bytes[self.pos..];
		let (text, consumed) = match rest.iter().position(|byte| *byte == 0) {
			Some(end) => (&rest[..end], end + 1),
			None => (rest, rest.len()),
		};
		self.pos += consumed;
		String::from_utf8_lossy(text).into_owned()
	}

	/// Move just past the next `{`, or to the end when there is none.
	pub fn seek_block_start(&mut self) {
		self.seek_past(b'{');
	}

	/// Move just past the next `}`, or to the end when there is none.
	pub fn seek_block_end(&mut self) {
		self.seek_past(b'}');
	}

	/// Move past the next `{` and its matching `}`, skipping nested blocks, or to the end when
	/// the block is unbalanced.
	pub fn skip_block(&mut self) {
		self.seek_block_start();
		let mut depth = 1_usize;
		while let Some(byte) = self.bytes.get(self.pos) {
			self.pos += 1;
			match byte {
				b'{' => depth += 1,
				b'}' => {
					depth -= 1;
					if depth == 0 {
						return;
					}
				}
				_ => {}
			}
		}
	}

	fn seek_past(&mut self, needle: u8) {
		self.pos = match self.bytes[self.pos..].iter().position(|byte| *byte == needle) {
			Some(rel) => self.pos + rel + 1,
			None => self.bytes.len(),
		};
	}

	/// Validate the version header, record the data start, and compare the revision.
	///
	/// On success the cursor sits at the data start. A structurally invalid header leaves the
	/// navigator untouched and returns `false`.
	pub fn is_bin_vers_equal(&mut self, expected: u32) -> bool {
		let Ok(header) = MdlHeader::parse(self.bytes) else {
			return false;
		};
		self.data_start = header.data_start.min(self.bytes.len());
		self.pos = self.data_start;
		header.version == i64::from(expected)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(MdlError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Read a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read up to `N` floats while whole values remain; return the buffer and the count read.
	pub fn read_f32_upto<const N: usize>(&mut self) -> ([f32; N], usize) {
		let mut out = [0.0_f32; N];
		let mut count = 0;
		while count < N {
			let Ok(value) = self.read_f32() else {
				break;
			};
			out[count] = value;
			count += 1;
		}
		(out, count)
	}

	/// Read a `u32` element count, then call `element` that many times.
	///
	/// The first failing element aborts the sequence; the cursor stays wherever that read left it,
	/// so callers must abandon the surrounding file.
	pub fn read_counted<F>(&mut self, mut element: F) -> Result<u32>
	where
		F: FnMut(&mut Self) -> Result<()>,
	{
		let count = self.read_u32()?;
		for _ in 0..count {
			element(self)?;
		}
		Ok(count)
	}
}

/// Find the offset of the first CR-LF pair in `bytes`.
pub(crate) fn find_crlf(bytes: &[u8]) -> Option<usize> {
	bytes.windows(2).position(|pair| pair == b"\r\n")
}

#[cfg(test)]
mod tests;
