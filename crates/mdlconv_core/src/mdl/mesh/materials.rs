use crate::mdl::header::parse_decimal;
use crate::mdl::mesh::Reference;
use crate::mdl::navigator::find_crlf;
use crate::mdl::{MTRL, MdlError, Navigator, Result};

/// Read an `MLST` block body: a counted list of triangle ranges followed by one textual `MTRL`
/// description per range.
///
/// Only the material name is kept; each description is stepped over by closing its binding
/// blocks plus the `SBST` and `MTRL` blocks themselves.
pub(crate) fn read_material_list(nav: &mut Navigator<'_>, out: &mut Vec<Reference>) -> Result<()> {
	let mut ranges = Vec::new();
	nav.read_counted(|nav| {
		let first = nav.read_u32()?;
		let last = nav.read_u32()?;
		ranges.push((first, last));
		Ok(())
	})?;

	for (first, last) in ranges {
		nav.skip_whitespace();
		if !nav.is_at_tag(&MTRL) {
			return Err(malformed(nav, "missing MTRL tag"));
		}
		nav.skip_bytes(MTRL.len());

		let name = read_material_name(nav)?;
		let bindings = read_binding_count(nav)?;
		out.push(Reference { first, last, name });

		for _ in 0..bindings + 2 {
			if nav.has_more(0) {
				break;
			}
			nav.seek_block_end();
		}
	}

	// Writers sometimes leave stray blocks before the list closes.
	nav.skip_whitespace();
	while nav.peek_byte().is_some_and(|byte| byte != b'}') {
		nav.seek_block_end();
		nav.skip_whitespace();
	}
	Ok(())
}

fn read_material_name(nav: &mut Navigator<'_>) -> Result<String> {
	let rest = &nav.bytes()[nav.pos()..];
	let Some(end) = find_crlf(rest) else {
		return Err(malformed(nav, "unterminated MTRL line"));
	};
	let line = &rest[..end];
	let line = line.strip_suffix(b"{").unwrap_or(line);
	let name = String::from_utf8_lossy(line).trim().to_owned();
	if name.is_empty() {
		return Err(malformed(nav, "empty material name"));
	}
	nav.skip_bytes(end + 2);
	Ok(name)
}

fn read_binding_count(nav: &mut Navigator<'_>) -> Result<u64> {
	nav.seek_block_start();
	let rest = &nav.bytes()[nav.pos()..];
	let Some(end) = find_crlf(rest) else {
		return Err(malformed(nav, "missing binding count"));
	};
	nav.skip_bytes(end + 2);

	match parse_decimal(nav.peek_line()) {
		Some(count) if count > 0 => Ok(count.unsigned_abs()),
		Some(_) => Err(malformed(nav, "non-positive binding count")),
		None => Err(malformed(nav, "unparsable binding count")),
	}
}

fn malformed(nav: &Navigator<'_>, reason: &'static str) -> MdlError {
	MdlError::MaterialList { at: nav.pos(), reason }
}
