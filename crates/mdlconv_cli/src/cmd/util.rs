use mdlconv::mdl::MdlError;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => log::error!("failed to encode json output: {err}"),
	}
}

/// Error message plus the offset where decoding stopped, when known.
#[derive(serde::Serialize)]
pub(crate) struct ErrorJson {
	pub(crate) message: String,
	pub(crate) offset: Option<usize>,
}

impl From<&MdlError> for ErrorJson {
	fn from(err: &MdlError) -> Self {
		Self {
			message: err.to_string(),
			offset: err.offset(),
		}
	}
}

/// Render an optional offset for text output.
pub(crate) fn offset_label(offset: Option<usize>) -> String {
	offset.map(|at| at.to_string()).unwrap_or_else(|| "-".to_owned())
}
