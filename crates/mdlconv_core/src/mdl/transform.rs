use glam::Affine3A;

/// Magnitude below which frame transform components are snapped to zero.
pub const ZERO_SNAP_EPSILON: f32 = 1.0e-8;

/// Build an affine transform from a column-major 4×4 matrix, dropping the homogeneous row.
pub fn affine_from_col_major(values: &[f32; 16]) -> Affine3A {
	Affine3A::from_cols_array(&[
		values[0], values[1], values[2],
		values[4], values[5], values[6],
		values[8], values[9], values[10],
		values[12], values[13], values[14],
	])
}

/// Like [`affine_from_col_major`], but zeroes every component with magnitude below
/// [`ZERO_SNAP_EPSILON`] first. The cleanup happens once, on construction.
pub fn snapped_affine_from_col_major(values: &[f32; 16]) -> Affine3A {
	let mut snapped = *values;
	for value in &mut snapped {
		if value.abs() < ZERO_SNAP_EPSILON {
			*value = 0.0;
		}
	}
	affine_from_col_major(&snapped)
}
