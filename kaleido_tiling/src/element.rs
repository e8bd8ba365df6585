// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed motif instances.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use kurbo::{Affine, BezPath, Rect, Shape};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a placed element, unique within the process.
///
/// Surfaces key their own records by this id; hosts use it to map pointer
/// events back to a position in a pattern.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One rendered instance of a motif.
///
/// The geometry is shared with every other instance of the same motif. The
/// transform is always the absolute placement in surface coordinates.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) geometry: Arc<BezPath>,
    pub(crate) local_bounds: Rect,
    pub(crate) transform: Affine,
}

impl Element {
    /// Identifier of this instance.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Untransformed motif geometry.
    pub fn geometry(&self) -> &Arc<BezPath> {
        &self.geometry
    }

    /// Bounds of the untransformed geometry.
    pub fn local_bounds(&self) -> Rect {
        self.local_bounds
    }

    /// Absolute placement.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Axis-aligned bounds of the placed geometry in surface coordinates.
    ///
    /// Placements built from quarter turns, mirrors, and shifts map the local
    /// box onto an axis-aligned box, so the transformed box is exact. Any other
    /// rotation measures the transformed path instead.
    pub fn bounding_box(&self) -> Rect {
        if axis_aligned(self.transform) {
            return transform_rect_bbox(self.transform, self.local_bounds);
        }
        let mut path = (*self.geometry).clone();
        path.apply_affine(self.transform);
        path.bounding_box()
    }
}

fn axis_aligned(t: Affine) -> bool {
    let [a, b, c, d, _, _] = t.as_coeffs();
    let eps = 1e-12 * (a.abs() + b.abs() + c.abs() + d.abs());
    (b.abs() <= eps && c.abs() <= eps) || (a.abs() <= eps && d.abs() <= eps)
}

/// Transform an axis-aligned `Rect` by an `Affine` and return the axis-aligned
/// box enclosing its four corners.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let min_x = (a * rect.x0).min(a * rect.x1) + (c * rect.y0).min(c * rect.y1);
    let max_x = (a * rect.x0).max(a * rect.x1) + (c * rect.y0).max(c * rect.y1);
    let min_y = (b * rect.x0).min(b * rect.x1) + (d * rect.y0).min(d * rect.y1);
    let max_y = (b * rect.x0).max(b * rect.x1) + (d * rect.y0).max(d * rect.y1);
    Rect::new(min_x + e, min_y + f, max_x + e, max_y + f)
}

/// Union of the bounding boxes of `elements`, or `None` when empty.
pub fn union_bounds<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Option<Rect> {
    elements
        .into_iter()
        .map(Element::bounding_box)
        .reduce(|acc, r| acc.union(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;
    use kurbo::Point;

    fn element(transform: Affine) -> Element {
        let geometry = Arc::new(Rect::new(0.0, 0.0, 100.0, 50.0).to_path(0.1));
        Element {
            id: ElementId::next(),
            local_bounds: geometry.bounding_box(),
            geometry,
            transform,
        }
    }

    fn close(a: Rect, b: Rect) -> bool {
        (a.x0 - b.x0).abs() < 1e-9
            && (a.y0 - b.y0).abs() < 1e-9
            && (a.x1 - b.x1).abs() < 1e-9
            && (a.y1 - b.y1).abs() < 1e-9
    }

    #[test]
    fn ids_are_unique() {
        let a = ElementId::next();
        let b = ElementId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn mirrored_bounds() {
        // Mirror across x = 100.
        let e = element(Affine::new([-1.0, 0.0, 0.0, 1.0, 200.0, 0.0]));
        assert!(close(e.bounding_box(), Rect::new(100.0, 0.0, 200.0, 50.0)));
    }

    #[test]
    fn quarter_turn_bounds() {
        let e = element(Affine::rotate(FRAC_PI_2));
        assert!(close(e.bounding_box(), Rect::new(-50.0, 0.0, 0.0, 100.0)));
    }

    #[test]
    fn oblique_rotation_measures_the_path() {
        let t = Affine::rotate_about(0.3, Point::new(50.0, 25.0));
        let e = element(t);
        let mut path = (*e.geometry).clone();
        path.apply_affine(t);
        assert!(close(e.bounding_box(), path.bounding_box()));
    }

    #[test]
    fn union_of_elements() {
        let a = element(Affine::IDENTITY);
        let b = element(Affine::translate((100.0, 50.0)));
        assert_eq!(
            union_bounds([&a, &b]),
            Some(Rect::new(0.0, 0.0, 200.0, 100.0))
        );
        assert_eq!(union_bounds(core::iter::empty::<&Element>()), None);
    }
}
