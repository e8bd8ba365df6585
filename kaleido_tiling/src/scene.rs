// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered element list shared by every pattern kind.
//!
//! All mutation goes through here so the model and the surface cannot drift
//! apart. Replays keep a prefix of already-rendered elements: while the model
//! is rebuilt, indices below the kept length reuse the old ids and are not
//! sent to the surface again. A reused id whose rebuilt transform differs from
//! the one on screen is moved, and kept ids the rebuild never reaches are
//! removed when the replay ends.

use std::ops::Range;
use std::sync::Arc;

use kaleido_transform::{TransformFlags, classify, conjugate};
use kurbo::{Affine, BezPath, Rect};
use smallvec::SmallVec;

use crate::element::{Element, ElementId, union_bounds};
use crate::options::Style;
use crate::step::Placement;
use crate::surface::Surface;

pub(crate) type Placements = SmallVec<[Placement; 4]>;

#[derive(Clone, Debug, Default)]
pub(crate) struct Scene {
    elements: Vec<Element>,
    /// Ids already on the surface, with the transform they are shown at.
    kept: Vec<(ElementId, Affine)>,
}

impl Scene {
    pub(crate) fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Length of the prefix that is already on the surface.
    #[cfg(test)]
    pub(crate) fn kept(&self) -> usize {
        self.kept.len()
    }

    pub(crate) fn bounds(&self, range: Range<usize>) -> Option<Rect> {
        union_bounds(&self.elements[range])
    }

    /// Remove everything from index `keep` on, then empty the model so it can
    /// be rebuilt. The first `keep` elements stay rendered.
    pub(crate) fn restart(&mut self, keep: usize, surface: &mut dyn Surface) {
        let mut rendered: Vec<(ElementId, Affine)> =
            self.elements.iter().map(|e| (e.id, e.transform)).collect();
        if self.kept.len() > rendered.len() {
            rendered.extend_from_slice(&self.kept[rendered.len()..]);
        }
        let keep = keep.min(rendered.len());
        for (id, _) in rendered.drain(keep..) {
            surface.remove(id);
        }
        self.kept = rendered;
        self.elements.clear();
    }

    /// Forget the kept prefix once a replay has caught up with it.
    pub(crate) fn settle(&mut self) {
        if self.elements.len() >= self.kept.len() {
            self.kept.clear();
        }
    }

    /// End a replay: kept ids the rebuild did not reach leave the surface.
    pub(crate) fn finish_replay(&mut self, surface: &mut dyn Surface) {
        let rebuilt = self.elements.len().min(self.kept.len());
        for (id, _) in self.kept.drain(rebuilt..) {
            log::debug!("{id:?} was not rebuilt; removing it");
            surface.remove(id);
        }
        self.kept.clear();
    }

    /// Remove everything from the surface and the model.
    pub(crate) fn clear(&mut self, surface: &mut dyn Surface) {
        self.restart(0, surface);
    }

    fn push(&mut self, mut element: Element, surface: &mut dyn Surface, style: &Style) -> bool {
        let index = self.elements.len();
        let fresh = match self.kept.get(index) {
            Some(&(id, shown)) => {
                element.id = id;
                if element.transform != shown {
                    surface.set_transform(id, element.transform);
                }
                false
            }
            None => {
                surface.insert(&element, style);
                true
            }
        };
        self.elements.push(element);
        fresh
    }

    /// Place a new element built from `geometry`.
    pub(crate) fn insert(
        &mut self,
        geometry: Arc<BezPath>,
        local_bounds: Rect,
        transform: Affine,
        surface: &mut dyn Surface,
        style: &Style,
    ) -> Option<Placement> {
        let element = Element {
            id: ElementId::next(),
            geometry,
            local_bounds,
            transform,
        };
        let id = element.id;
        self.push(element, surface, style).then_some(Placement {
            id,
            source: None,
            from: transform,
            local: Affine::IDENTITY,
            to: transform,
        })
    }

    /// Clone every element of `source` and move the clones by the world-space
    /// transform `t`. Returns the index range of the clones and the
    /// placements of those not already rendered.
    ///
    /// When nothing in `source` has been turned or flipped yet, `t` is applied
    /// directly. Otherwise each clone goes through its own local frame.
    pub(crate) fn replicate(
        &mut self,
        source: Range<usize>,
        t: Affine,
        surface: &mut dyn Surface,
        style: &Style,
    ) -> (Range<usize>, Placements) {
        let direct = self.elements[source.clone()]
            .iter()
            .all(|e| !classify(e.transform).intersects(TransformFlags::LINEAR));
        let start = self.elements.len();
        let mut placements = Placements::new();
        for i in source {
            let src = &self.elements[i];
            let from = src.transform;
            let local = conjugate(from, t);
            let to = if direct { t * from } else { from * local };
            let clone = Element {
                id: ElementId::next(),
                geometry: Arc::clone(&src.geometry),
                local_bounds: src.local_bounds,
                transform: to,
            };
            let (id, source_id) = (clone.id, src.id);
            if self.push(clone, surface, style) {
                placements.push(Placement {
                    id,
                    source: Some(source_id),
                    from,
                    local,
                    to,
                });
            }
        }
        (start..self.elements.len(), placements)
    }

    /// Move every element of `range` by the world-space transform `t`.
    pub(crate) fn transform(
        &mut self,
        range: Range<usize>,
        t: Affine,
        surface: &mut dyn Surface,
    ) -> Placements {
        let mut placements = Placements::new();
        for e in &mut self.elements[range] {
            let from = e.transform;
            let local = conjugate(from, t);
            e.transform = from * local;
            surface.set_transform(e.id, e.transform);
            placements.push(Placement {
                id: e.id,
                source: None,
                from,
                local,
                to: e.transform,
            });
        }
        placements
    }
}
