// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition, inversion, and frame conjugation of affine placements.
//!
//! All matrices are [`kurbo::Affine`] values `[a b c d e f]` mapping
//! `(x, y) → (a·x + c·y + e, b·x + d·y + f)`. Kurbo's `lhs * rhs` applies
//! `rhs` first; [`compose`] exposes the "first, then" reading so callers do not
//! have to remember the operand order.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point};

/// Determinants at or below this magnitude are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Coefficients closer than this to their identity value count as unchanged
/// by [`classify`].
const CLASSIFY_EPSILON: f64 = 1e-9;

bitflags::bitflags! {
    /// Coarse classification of what an [`Affine`] does to the plane.
    ///
    /// Produced by [`classify`]. An empty set means the identity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TransformFlags: u8 {
        /// Non-zero translation component (`e`, `f`).
        const TRANSLATE = 0b0000_0001;
        /// Orientation-preserving turn, or an off-axis term on top of a reflection.
        const ROTATE    = 0b0000_0010;
        /// Orientation-reversing (negative determinant).
        const REFLECT   = 0b0000_0100;
        /// Basis vectors no longer have unit length.
        const SCALE     = 0b0000_1000;
    }
}

impl TransformFlags {
    /// Flags that change the local frame of an element, as opposed to only
    /// moving it.
    pub const LINEAR: Self = Self::ROTATE.union(Self::REFLECT).union(Self::SCALE);
}

/// Classify the components of `t`.
///
/// A plain axis mirror (`[-1 0 0 1 ..]` or `[1 0 0 -1 ..]`) reports only
/// [`TransformFlags::REFLECT`]; a half turn (`[-1 0 0 -1 ..]`) reports
/// [`TransformFlags::ROTATE`].
pub fn classify(t: Affine) -> TransformFlags {
    let [a, b, c, d, e, f] = t.as_coeffs();
    let mut flags = TransformFlags::empty();
    if e.abs() > CLASSIFY_EPSILON || f.abs() > CLASSIFY_EPSILON {
        flags |= TransformFlags::TRANSLATE;
    }
    let det = a * d - b * c;
    let off_axis = b.abs() > CLASSIFY_EPSILON || c.abs() > CLASSIFY_EPSILON;
    if det < 0.0 {
        flags |= TransformFlags::REFLECT;
        if off_axis {
            flags |= TransformFlags::ROTATE;
        }
    } else if off_axis || a < 0.0 || d < 0.0 {
        flags |= TransformFlags::ROTATE;
    }
    let len_x = a * a + b * b;
    let len_y = c * c + d * d;
    if (len_x - 1.0).abs() > CLASSIFY_EPSILON || (len_y - 1.0).abs() > CLASSIFY_EPSILON {
        flags |= TransformFlags::SCALE;
    }
    flags
}

/// Returns true if `t` only moves points without turning, flipping, or
/// scaling them.
pub fn is_translation_only(t: Affine) -> bool {
    !classify(t).intersects(TransformFlags::LINEAR)
}

/// Compose two transforms so that the result applies `first` and then `then`.
///
/// ```
/// use kurbo::{Affine, Point};
/// use kaleido_transform::compose;
///
/// let shift = Affine::translate((10.0, 0.0));
/// let double = Affine::scale(2.0);
/// let t = compose(shift, double);
/// assert_eq!(t * Point::new(1.0, 1.0), Point::new(22.0, 2.0));
/// ```
#[inline]
pub fn compose(first: Affine, then: Affine) -> Affine {
    then * first
}

/// Invert `t`, or return `None` when it is singular or not finite.
pub fn invert(t: Affine) -> Option<Affine> {
    if !t.is_finite() || t.determinant().abs() <= SINGULAR_EPSILON {
        return None;
    }
    Some(t.inverse())
}

/// Express the world-space transform `t` in the local frame of a placement
/// `m`, i.e. `m⁻¹ · t · m`.
///
/// The result is the delta an element placed by `m` must apply in its own
/// coordinates so that its new absolute placement is `m · delta`. A singular
/// `m` yields the identity (no movement) and logs a diagnostic.
pub fn conjugate(m: Affine, t: Affine) -> Affine {
    match invert(m) {
        Some(inv) => inv * t * m,
        None => {
            log::warn!("singular placement {:?}; generator skipped", m.as_coeffs());
            Affine::IDENTITY
        }
    }
}

/// Apply a world-space transform `t` to a placement `m` by composing in the
/// local frame.
///
/// Algebraically this equals `t · m`, but the concrete matrix is read back
/// from the three-way product so that reflections already present in `m`
/// are carried through float evaluation rather than cancelled symbolically.
#[inline]
pub fn apply_in_local_frame(m: Affine, t: Affine) -> Affine {
    m * conjugate(m, t)
}

/// Coefficient-wise comparison within `tolerance`.
pub fn approx_eq(a: Affine, b: Affine, tolerance: f64) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| (x - y).abs() <= tolerance)
}

/// Returns true if `a` and `b` map `point` to the same location within
/// `tolerance` on both axes.
pub fn maps_alike(a: Affine, b: Affine, point: Point, tolerance: f64) -> bool {
    let p = a * point;
    let q = b * point;
    (p.x - q.x).abs() <= tolerance && (p.y - q.y).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-6;

    fn samples() -> [Point; 5] {
        [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-37.5, 12.25),
            Point::new(250.0, -80.0),
        ]
    }

    fn placements() -> [Affine; 5] {
        [
            Affine::IDENTITY,
            Affine::translate((40.0, -12.0)),
            Affine::new([-1.0, 0.0, 0.0, 1.0, 200.0, 0.0]),
            Affine::translate((10.0, 5.0)) * Affine::rotate(0.7),
            Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 160.0]) * Affine::rotate(FRAC_PI_2),
        ]
    }

    fn world_transforms() -> [Affine; 4] {
        [
            Affine::translate((100.0, 0.0)),
            Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 80.0]),
            Affine::new([-1.0, 0.0, 0.0, 1.0, 300.0, 0.0]),
            Affine::translate((50.0, 50.0)) * Affine::rotate(PI / 3.0),
        ]
    }

    #[test]
    fn compose_applies_first_then_second() {
        let t = compose(Affine::translate((1.0, 0.0)), Affine::rotate(FRAC_PI_2));
        let p = t * Point::new(0.0, 0.0);
        assert!((p.x - 0.0).abs() < TOL, "x was {}", p.x);
        assert!((p.y - 1.0).abs() < TOL, "y was {}", p.y);
    }

    #[test]
    fn invert_round_trips() {
        for m in placements() {
            let inv = invert(m).expect("placements are invertible");
            assert!(approx_eq(compose(m, inv), Affine::IDENTITY, TOL));
        }
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(invert(Affine::scale_non_uniform(1.0, 0.0)).is_none());
        assert!(invert(Affine::new([f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0])).is_none());
    }

    #[test]
    fn local_frame_composition_matches_world_composition() {
        for m in placements() {
            for t in world_transforms() {
                let via_local = apply_in_local_frame(m, t);
                let analytic = compose(m, t);
                for p in samples() {
                    assert!(
                        maps_alike(via_local, analytic, p, TOL),
                        "m={:?} t={:?} p={p:?}",
                        m.as_coeffs(),
                        t.as_coeffs()
                    );
                }
            }
        }
    }

    #[test]
    fn singular_placement_degrades_to_no_op() {
        let m = Affine::scale_non_uniform(0.0, 1.0);
        assert_eq!(conjugate(m, Affine::translate((5.0, 0.0))), Affine::IDENTITY);
        assert_eq!(apply_in_local_frame(m, Affine::translate((5.0, 0.0))), m);
    }

    #[test]
    fn classify_distinguishes_components() {
        assert!(classify(Affine::IDENTITY).is_empty());
        assert_eq!(
            classify(Affine::translate((3.0, 0.0))),
            TransformFlags::TRANSLATE
        );
        assert_eq!(
            classify(Affine::new([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0])),
            TransformFlags::REFLECT
        );
        assert_eq!(
            classify(Affine::new([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0])),
            TransformFlags::ROTATE
        );
        assert!(classify(Affine::scale(2.0)).contains(TransformFlags::SCALE));
        assert!(classify(Affine::rotate(0.3)).contains(TransformFlags::ROTATE));
        assert!(is_translation_only(Affine::translate((0.0, -4.0))));
        assert!(!is_translation_only(Affine::FLIP_Y));
    }
}
