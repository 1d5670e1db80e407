/// Single-file header and block layout command.
pub mod info;
/// Multi-file scene assembly command.
pub mod scene;
#[cfg(test)]
mod test_support;
mod util;
