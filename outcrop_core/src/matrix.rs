// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS computed-transform parsing.
//!
//! Proxy placement needs the element's *resting* document position, so the
//! 2-D translation component of any in-flight animation transform has to be
//! subtracted back out. Computed styles serialize transforms as
//! `matrix(a, b, c, d, tx, ty)` or `matrix3d(m11, …, m44)`;
//! [`parse_translation`] extracts `(tx, ty)` from either form.
//!
//! Malformed or unrecognized input degrades to a zero offset rather than
//! failing: a wrong trigger position is recoverable, a dead registration is
//! not.

use alloc::vec::Vec;

use kurbo::Vec2;

/// Extracts the 2-D translation from a computed `transform` value.
///
/// `none`, the empty string, and anything unparseable yield `Vec2::ZERO`.
#[must_use]
pub fn parse_translation(transform: &str) -> Vec2 {
    let s = transform.trim();
    if s.is_empty() || s == "none" {
        return Vec2::ZERO;
    }
    if let Some(args) = function_args(s, "matrix3d") {
        // Column-major 4x4; translation lives in m41/m42.
        if args.len() == 16 {
            return Vec2::new(args[12], args[13]);
        }
        return Vec2::ZERO;
    }
    if let Some(args) = function_args(s, "matrix") {
        if args.len() == 6 {
            return Vec2::new(args[4], args[5]);
        }
        return Vec2::ZERO;
    }
    Vec2::ZERO
}

/// Parses `name(a, b, …)` into its numeric arguments.
///
/// Returns `None` if `s` is not a call to `name` or any argument fails to
/// parse as a float.
fn function_args(s: &str, name: &str) -> Option<Vec<f64>> {
    let rest = s.strip_prefix(name)?;
    let inner = rest.trim().strip_prefix('(')?.strip_suffix(')')?;
    inner
        .split(',')
        .map(|arg| arg.trim().parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero() {
        assert_eq!(parse_translation("none"), Vec2::ZERO);
        assert_eq!(parse_translation(""), Vec2::ZERO);
        assert_eq!(parse_translation("  none "), Vec2::ZERO);
    }

    #[test]
    fn matrix_extracts_tx_ty() {
        let v = parse_translation("matrix(1, 0, 0, 1, 12.5, -40)");
        assert_eq!(v, Vec2::new(12.5, -40.0));
    }

    #[test]
    fn matrix3d_extracts_m41_m42() {
        let v = parse_translation(
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 8, 120, 0, 1)",
        );
        assert_eq!(v, Vec2::new(8.0, 120.0));
    }

    #[test]
    fn rotation_matrix_keeps_translation_only() {
        // 90° rotation plus (30, 60) translation.
        let v = parse_translation("matrix(0, 1, -1, 0, 30, 60)");
        assert_eq!(v, Vec2::new(30.0, 60.0));
    }

    #[test]
    fn malformed_degrades_to_zero() {
        assert_eq!(parse_translation("matrix(1, 0, 0, 1, 12.5)"), Vec2::ZERO);
        assert_eq!(parse_translation("matrix(a, b, c, d, e, f)"), Vec2::ZERO);
        assert_eq!(parse_translation("matrix3d(1, 2, 3)"), Vec2::ZERO);
        assert_eq!(parse_translation("translate(10px, 20px)"), Vec2::ZERO);
        assert_eq!(parse_translation("matrix(1, 0, 0, 1, 0, 0"), Vec2::ZERO);
    }

    #[test]
    fn matrix3d_prefix_is_not_mistaken_for_matrix() {
        // `matrix3d` must not be parsed by the `matrix` arm.
        let v = parse_translation(
            "matrix3d(2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2, 0, 5, 6, 7, 1)",
        );
        assert_eq!(v, Vec2::new(5.0, 6.0));
    }
}
