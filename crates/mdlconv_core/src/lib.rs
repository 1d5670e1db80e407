//! Public library API for decoding MDL model files into a scene graph.

/// MDL navigation, frame/mesh/morph decoding, and multi-file scene assembly.
pub mod mdl;
