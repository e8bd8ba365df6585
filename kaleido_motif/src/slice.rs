// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random slice motifs along a radial segment.

use kurbo::{BezPath, Point};
use rand::Rng;

use crate::MotifError;

/// Narrowest lateral extent a sub-path may shrink to.
pub const MIN_SLICE_WIDTH: f64 = 5.0;

/// Each further sub-path in a slice is this fraction of the previous width.
const SHRINK: f64 = 0.7;

/// Parameters of a slice motif.
///
/// The motif is laid out in its own frame: the centre end of the segment is
/// the origin and the segment grows towards negative Y (up on screen) for
/// `height` units. Lateral decoration stays within `±width / 2`, except where
/// [`MIN_SLICE_WIDTH`] is wider than that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceParams {
    /// Lateral extent of the outermost slice.
    pub width: f64,
    /// Length of the segment.
    pub height: f64,
    /// Number of equal-height slices, ordered from the centre outward.
    pub slices_count: u32,
    /// Mirror each sub-path's two legs so the motif is symmetric about its axis.
    pub with_reflection: bool,
}

impl SliceParams {
    /// Check that the parameters describe a drawable motif.
    pub fn validate(&self) -> Result<(), MotifError> {
        if self.slices_count == 0 {
            return Err(MotifError::NoSlices);
        }
        let finite = self.width.is_finite() && self.height.is_finite();
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(MotifError::Size {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Leg {
    Straight,
    Curved,
}

/// Generate a slice motif.
///
/// Slice `s` (0-based from the centre) draws `round(u × (s + 1))` sub-paths,
/// `u` uniform in `[0, 1)`, so outer slices tend to be busier. If every slice
/// comes up empty, one sub-path is forced into the outermost slice: the result
/// always contains at least one sub-path.
///
/// Invalid parameters are reported before any randomness is consumed.
pub fn generate_slices<R: Rng + ?Sized>(
    params: &SliceParams,
    rng: &mut R,
) -> Result<BezPath, MotifError> {
    params.validate()?;
    let slice_height = params.height / f64::from(params.slices_count);
    let mut path = BezPath::new();
    let mut drawn = 0_u32;

    for s in 0..params.slices_count {
        let weight = f64::from(s + 1);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "rounded value lies in 0..=s+1."
        )]
        let count = (rng.gen_range(0.0..1.0) * weight).round() as u32;
        let width = params.width * weight / f64::from(params.slices_count);
        for j in 0..count {
            draw_sub_path(&mut path, params, s, slice_height, shrunk(width, j), rng);
        }
        drawn += count;
    }

    if drawn == 0 {
        let last = params.slices_count - 1;
        log::debug!("slice motif came up empty; forcing one sub-path into slice {last}");
        draw_sub_path(&mut path, params, last, slice_height, params.width, rng);
    }

    Ok(path)
}

fn shrunk(width: f64, index: u32) -> f64 {
    let factor = SHRINK.powi(i32::try_from(index).unwrap_or(i32::MAX));
    (width * factor).max(MIN_SLICE_WIDTH)
}

fn draw_sub_path<R: Rng + ?Sized>(
    path: &mut BezPath,
    params: &SliceParams,
    slice: u32,
    slice_height: f64,
    width: f64,
    rng: &mut R,
) {
    let start = Point::new(0.0, -f64::from(slice) * slice_height);
    let end = Point::new(0.0, -f64::from(slice + 1) * slice_height);
    let mid = start.midpoint(end);
    let leg = if rng.gen_bool(0.5) {
        Leg::Straight
    } else {
        Leg::Curved
    };

    let left = lateral(rng, width, slice_height);
    let right = if params.with_reflection {
        left
    } else {
        lateral(rng, width, slice_height)
    };

    let apexes = [
        Point::new(mid.x - left.0, mid.y + left.1),
        Point::new(mid.x + right.0, mid.y + right.1),
    ];
    for apex in apexes {
        path.move_to(start);
        match leg {
            Leg::Straight => {
                path.line_to(apex);
                path.line_to(end);
            }
            Leg::Curved => {
                // Control point chosen so the curve passes through `apex` at t = 0.5.
                let ctrl = Point::new(2.0 * apex.x - mid.x, 2.0 * apex.y - mid.y);
                path.quad_to(ctrl, end);
            }
        }
    }
}

/// Random `(dx, dy)`: lateral distance from the axis and shift along it.
fn lateral<R: Rng + ?Sized>(rng: &mut R, width: f64, slice_height: f64) -> (f64, f64) {
    let dx = rng.gen_range(0.25..=0.5) * width;
    let dy = rng.gen_range(-0.25..=0.25) * slice_height;
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params(slices_count: u32, with_reflection: bool) -> SliceParams {
        SliceParams {
            width: 60.0,
            height: 120.0,
            slices_count,
            with_reflection,
        }
    }

    #[test_log::test]
    fn never_empty() {
        for slices in 1..=6 {
            for seed in 0..64 {
                let mut rng = StdRng::seed_from_u64(seed);
                let path = generate_slices(&params(slices, seed % 2 == 0), &mut rng).unwrap();
                assert!(
                    path.elements().len() >= 2,
                    "slices={slices} seed={seed} produced an empty motif"
                );
            }
        }
    }

    #[test]
    fn same_seed_same_motif() {
        let a = generate_slices(&params(4, false), &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_slices(&params(4, false), &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.to_svg(), b.to_svg());
    }

    #[test]
    fn reflected_motif_is_symmetric_about_its_axis() {
        for seed in 0..32 {
            let path =
                generate_slices(&params(3, true), &mut StdRng::seed_from_u64(seed)).unwrap();
            let bbox = path.bounding_box();
            assert!(
                (bbox.x0 + bbox.x1).abs() < 1e-9,
                "seed={seed} bbox={bbox:?} is not centred"
            );
        }
    }

    #[test]
    fn stays_within_the_segment() {
        for seed in 0..32 {
            let path =
                generate_slices(&params(5, false), &mut StdRng::seed_from_u64(seed)).unwrap();
            let bbox = path.bounding_box();
            assert!(bbox.y0 >= -120.0 - 1e-9 && bbox.y1 <= 1e-9, "{bbox:?}");
            assert!(bbox.x0 >= -30.0 - 1e-9 && bbox.x1 <= 30.0 + 1e-9, "{bbox:?}");
        }
    }

    #[test]
    fn width_floor() {
        assert_eq!(shrunk(100.0, 0), 100.0);
        assert_eq!(shrunk(6.0, 3), MIN_SLICE_WIDTH);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_slices(&params(0, false), &mut rng),
            Err(MotifError::NoSlices)
        ));
        let flat = SliceParams {
            height: 0.0,
            ..params(2, false)
        };
        assert!(matches!(
            generate_slices(&flat, &mut rng),
            Err(MotifError::Size { .. })
        ));
    }
}
