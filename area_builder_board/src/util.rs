// Copyright 2025 the Area Builder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float-to-cell helpers that work without `std` float intrinsics.

/// Tolerance, in unit lengths, for treating a world length as a whole number of cells.
pub(crate) const WHOLE_EPSILON: f64 = 1e-6;

#[inline]
pub(crate) fn floor_to_i32(v: f64) -> i32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "cell indices are small; saturating casts are acceptable"
    )]
    let i = v as i32;
    if f64::from(i) > v { i - 1 } else { i }
}

#[inline]
pub(crate) fn round_to_i32(v: f64) -> i32 {
    floor_to_i32(v + 0.5)
}

/// `length / unit` as a whole count, or `None` when it is not (close to) an integer.
pub(crate) fn whole_multiple(length: f64, unit: f64) -> Option<i32> {
    let ratio = length / unit;
    if !ratio.is_finite() {
        return None;
    }
    let n = round_to_i32(ratio);
    let diff = ratio - f64::from(n);
    let diff = if diff < 0.0 { -diff } else { diff };
    (diff <= WHOLE_EPSILON).then_some(n)
}
