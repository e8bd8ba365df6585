// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The suspend/resume contract between a pattern and its host.
//!
//! A pattern never schedules anything itself. When animation is enabled, a
//! drawing operation returns [`DrawStatus::Started`] and the host pumps
//! `step` until it yields `None`, waiting each returned [`Step::duration`]
//! (and animating each [`Placement`]) before asking for the next one. When
//! animation is disabled the same steps run back to back inside the call.

use std::time::Duration;

use kurbo::Affine;
use smallvec::SmallVec;

use crate::element::ElementId;

/// Outcome of a drawing operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum DrawStatus {
    /// The operation ran to completion inside the call.
    Completed,
    /// The operation is in flight; pump `step` until it returns `None`.
    Started,
    /// Another operation is in flight; the request was ignored.
    Busy,
}

/// Which part of a construction produced a [`Step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A one-shot fundamental-domain generator.
    Fundamental,
    /// Horizontal replication.
    AxisX,
    /// Vertical replication of whole rows.
    AxisY,
    /// One level of a radial spoke.
    Level,
    /// One rotated copy of a radial spoke.
    Rotation,
    /// A whole-pattern turn requested after construction.
    Turn,
}

/// Movement of one element during a step.
///
/// `to` is the absolute placement the element now has. `local` is the same
/// movement expressed in the element's own frame, so `to == from * local`.
/// Hosts that tween should interpolate `local` and post-multiply by `from`;
/// tweening absolute matrices directly skews reflected elements.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Element being placed.
    pub id: ElementId,
    /// Element this one was cloned from, if it is new in this step.
    pub source: Option<ElementId>,
    /// Placement before the step.
    pub from: Affine,
    /// Movement in the element's frame.
    pub local: Affine,
    /// Placement after the step.
    pub to: Affine,
}

impl Placement {
    /// Placement at `progress` in `[0, 1]` through the step, interpolating
    /// the local movement linearly.
    pub fn at(&self, progress: f64) -> Affine {
        let t = progress.clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to;
        }
        let l = self.local.as_coeffs();
        let i = Affine::IDENTITY.as_coeffs();
        let mut lerp = [0.0; 6];
        for (k, out) in lerp.iter_mut().enumerate() {
            *out = i[k] + (l[k] - i[k]) * t;
        }
        self.from * Affine::new(lerp)
    }
}

/// One unit of construction work, returned to the host for scheduling.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Stage that produced this step.
    pub phase: Phase,
    /// Elements placed or moved, in insertion order.
    pub placements: SmallVec<[Placement; 4]>,
    /// How long the host should take to animate this step.
    pub duration: Duration,
}
