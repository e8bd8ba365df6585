// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary-aware replication along one or two axes.
//!
//! The tiler is a small state machine over a [`GroupSpec`]:
//!
//! ```text
//! Fundamental(i) ─▶ Axis(X, i) ─▶ Axis(Y, i) ─▶ Done
//! ```
//!
//! Each call to [`Tiler::advance`] performs exactly one generator application
//! on the scene and reports it. The unit being replicated follows these rules:
//!
//! - Fundamental generators clone the whole set once each. The last clone (or
//!   the base element, if there are none) seeds the X axis.
//! - On an axis, every generator but the last clones the current unit and
//!   merges the clone into it.
//! - The last generator clones the unit, then keeps cloning the newest clone,
//!   until the stop predicate fires.
//! - The Y axis starts from the whole row built so far.

use std::ops::Range;

use kaleido_transform::{Generator, GroupSpec};
use kurbo::{Rect, Size};

use crate::element::transform_rect_bbox;
use crate::options::Style;
use crate::scene::{Placements, Scene};
use crate::step::Phase;
use crate::surface::Surface;

/// Smallest advance of the trailing edge that counts as progress.
const PROGRESS_EPSILON: f64 = 1e-9;

/// Bounds on how far replication may go.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Limits {
    pub(crate) extent: Size,
    pub(crate) contain: bool,
    pub(crate) tolerance: f64,
    pub(crate) max_elements: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn phase(self) -> Phase {
        match self {
            Self::X => Phase::AxisX,
            Self::Y => Phase::AxisY,
        }
    }

    fn chain(self, spec: &GroupSpec) -> &'static [Generator] {
        match self {
            Self::X => spec.x,
            Self::Y => spec.y,
        }
    }

    /// `(trailing edge, size)` of `bbox` along this axis.
    fn span(self, bbox: Rect) -> (f64, f64) {
        match self {
            Self::X => (bbox.x1, bbox.width()),
            Self::Y => (bbox.y1, bbox.height()),
        }
    }

    fn extent(self, size: Size) -> f64 {
        match self {
            Self::X => size.width,
            Self::Y => size.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Stage {
    Fundamental {
        index: usize,
        seed: Range<usize>,
    },
    Axis {
        axis: Axis,
        index: usize,
        unit: Range<usize>,
    },
    Done,
}

/// Result of one generator application.
#[derive(Debug)]
pub(crate) struct Advance {
    pub(crate) phase: Phase,
    /// Placements of elements not already on the surface.
    pub(crate) placements: Placements,
}

#[derive(Clone, Debug)]
pub(crate) struct Tiler {
    spec: GroupSpec,
    limits: Limits,
    stage: Stage,
}

impl Tiler {
    /// Start tiling from the base element at index 0 of the scene.
    pub(crate) fn new(spec: GroupSpec, limits: Limits) -> Self {
        Self {
            spec,
            limits,
            stage: Stage::Fundamental {
                index: 0,
                seed: 0..1,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Apply the next generator, or return `None` once every stage has
    /// finished.
    pub(crate) fn advance(
        &mut self,
        scene: &mut Scene,
        surface: &mut dyn Surface,
        style: &Style,
    ) -> Option<Advance> {
        loop {
            match self.stage.clone() {
                Stage::Done => return None,
                Stage::Fundamental { index, seed } => {
                    let Some(&generator) = self.spec.fundamental.get(index) else {
                        self.stage = Stage::Axis {
                            axis: Axis::X,
                            index: 0,
                            unit: seed,
                        };
                        continue;
                    };
                    let all = 0..scene.len();
                    if !self.has_room(scene, all.len()) {
                        return None;
                    }
                    let (clone, placements) =
                        apply(&generator, all, scene, surface, style);
                    self.stage = Stage::Fundamental {
                        index: index + 1,
                        seed: clone,
                    };
                    return Some(Advance {
                        phase: Phase::Fundamental,
                        placements,
                    });
                }
                Stage::Axis { axis, index, unit } => {
                    let chain = axis.chain(&self.spec);
                    let Some(&generator) = chain.get(index) else {
                        self.next_axis(axis, scene);
                        continue;
                    };
                    let finite = index + 1 < chain.len();
                    if !finite && !self.should_continue(axis, &generator, scene, unit.clone()) {
                        self.next_axis(axis, scene);
                        continue;
                    }
                    if !self.has_room(scene, unit.len()) {
                        return None;
                    }
                    let start = unit.start;
                    let (clone, placements) = apply(&generator, unit, scene, surface, style);
                    self.stage = if finite {
                        Stage::Axis {
                            axis,
                            index: index + 1,
                            unit: start..clone.end,
                        }
                    } else {
                        Stage::Axis {
                            axis,
                            index,
                            unit: clone,
                        }
                    };
                    return Some(Advance {
                        phase: axis.phase(),
                        placements,
                    });
                }
            }
        }
    }

    fn next_axis(&mut self, axis: Axis, scene: &Scene) {
        self.stage = match axis {
            Axis::X => Stage::Axis {
                axis: Axis::Y,
                index: 0,
                unit: 0..scene.len(),
            },
            Axis::Y => Stage::Done,
        };
    }

    fn has_room(&mut self, scene: &Scene, adding: usize) -> bool {
        if scene.len() + adding > self.limits.max_elements {
            log::warn!(
                "stopping at {} elements: next step would exceed the cap of {}",
                scene.len(),
                self.limits.max_elements
            );
            self.stage = Stage::Done;
            return false;
        }
        true
    }

    /// Stop predicate for unbounded replication of `unit` by `generator`.
    fn should_continue(
        &self,
        axis: Axis,
        generator: &Generator,
        scene: &Scene,
        unit: Range<usize>,
    ) -> bool {
        let Some(bbox) = scene.bounds(unit) else {
            return false;
        };
        let (trailing, size) = axis.span(bbox);
        let extent = axis.extent(self.limits.extent);
        let inside = if self.limits.contain {
            trailing + size <= extent + self.limits.tolerance
        } else {
            trailing < extent
        };
        if !inside {
            return false;
        }
        let predicted = transform_rect_bbox(generator.transform(bbox), bbox);
        let (next_trailing, _) = axis.span(predicted);
        if next_trailing <= trailing + PROGRESS_EPSILON {
            log::warn!(
                "{} makes no progress along {axis:?} (trailing edge {trailing}); stopping the axis",
                generator.name()
            );
            return false;
        }
        true
    }
}

fn apply(
    generator: &Generator,
    source: Range<usize>,
    scene: &mut Scene,
    surface: &mut dyn Surface,
    style: &Style,
) -> (Range<usize>, Placements) {
    let bbox = scene.bounds(source.clone()).unwrap_or(Rect::ZERO);
    let t = generator.transform(bbox);
    log::trace!("{} over {source:?} -> {:?}", generator.name(), t.as_coeffs());
    scene.replicate(source, t, surface, style)
}
