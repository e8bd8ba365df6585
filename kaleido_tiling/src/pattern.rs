// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frieze and wallpaper patterns with trim-and-regrow editing.

use std::fmt;
use std::sync::Arc;

use kaleido_transform::{GroupSpec, SymmetryGroup};
use kurbo::{Affine, BezPath, Point, Rect, Shape};

use crate::element::{Element, ElementId};
use crate::error::{ConfigError, check_origin};
use crate::options::DrawOptions;
use crate::scene::Scene;
use crate::step::{DrawStatus, Step};
use crate::surface::Surface;
use crate::telemetry::RedrawListener;
use crate::tiler::{Advance, Limits, Tiler};

/// A motif replicated along one axis (frieze) or two (wallpaper).
///
/// The axis count is data: it follows from the [`GroupSpec`], not from the
/// pattern type. Element order is construction order, which is also trim
/// order.
pub struct Pattern {
    label: String,
    group: Option<SymmetryGroup>,
    spec: GroupSpec,
    motif: Arc<BezPath>,
    motif_bounds: Rect,
    base: Affine,
    options: DrawOptions,
    scene: Scene,
    run: Option<Run>,
    listener: Option<Box<dyn RedrawListener>>,
}

#[derive(Debug)]
struct Run {
    tiler: Tiler,
    notify: bool,
    /// First step past a trim's kept prefix, found while catching up.
    pending: Option<Advance>,
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("label", &self.label)
            .field("group", &self.group)
            .field("spec", &self.spec)
            .field("motif_bounds", &self.motif_bounds)
            .field("base", &self.base)
            .field("options", &self.options)
            .field("elements", &self.scene.len())
            .field("drawing", &self.run.is_some())
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Pattern {
    /// Create a pattern for a catalog group. Nothing is drawn until
    /// [`draw`](Self::draw).
    ///
    /// The motif is placed so that its bounding box's top-left corner sits
    /// at `origin`.
    pub fn new(
        group: SymmetryGroup,
        motif: BezPath,
        origin: Point,
        options: DrawOptions,
    ) -> Result<Self, ConfigError> {
        let mut pattern = Self::with_spec(group.label(), group.spec(), motif, origin, options)?;
        pattern.group = Some(group);
        Ok(pattern)
    }

    /// Create a pattern from a group name such as `pmg`, `frieze:p1`, or
    /// `spinning-jump`.
    pub fn from_name(
        name: &str,
        motif: BezPath,
        origin: Point,
        options: DrawOptions,
    ) -> Result<Self, ConfigError> {
        Self::new(name.parse()?, motif, origin, options)
    }

    /// Create a pattern for an arbitrary generator spec.
    pub fn with_spec(
        label: impl Into<String>,
        spec: GroupSpec,
        motif: BezPath,
        origin: Point,
        options: DrawOptions,
    ) -> Result<Self, ConfigError> {
        if motif.elements().len() < 2 {
            return Err(ConfigError::EmptyMotif);
        }
        check_origin(origin)?;
        options.validate()?;
        let motif_bounds = motif.bounding_box();
        let base = Affine::translate(origin - motif_bounds.origin());
        Ok(Self {
            label: label.into(),
            group: None,
            spec,
            motif: Arc::new(motif),
            motif_bounds,
            base,
            options,
            scene: Scene::default(),
            run: None,
            listener: None,
        })
    }

    /// Label reported to the listener.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Catalog group, if the pattern was built from one.
    pub fn group(&self) -> Option<SymmetryGroup> {
        self.group
    }

    /// Generator chains.
    pub fn spec(&self) -> GroupSpec {
        self.spec
    }

    /// Drawing options.
    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    /// Turn animation on or off for subsequent operations.
    pub fn set_animate(&mut self, animate: bool) {
        self.options.animate = animate;
    }

    /// Install the completion listener.
    pub fn set_listener(&mut self, listener: impl RedrawListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Placed elements in construction order.
    ///
    /// During an animated trim the kept prefix is already rebuilt when
    /// [`trim`](Self::trim) returns; only the regrown tail is still pending.
    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    /// Returns true while an animated operation is in flight.
    pub fn is_drawing(&self) -> bool {
        self.run.is_some()
    }

    /// Draw the pattern from scratch, replacing anything this pattern had
    /// drawn before.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> DrawStatus {
        self.start(surface, 0, false)
    }

    /// Clear and rebuild the whole pattern, then notify the listener.
    pub fn redraw(&mut self, surface: &mut dyn Surface) -> DrawStatus {
        self.start(surface, 0, true)
    }

    /// Remove elements `index..` and regrow from there.
    ///
    /// The kept elements are untouched; the regrown tail is exactly what an
    /// uninterrupted draw would have placed after them. An index past the end
    /// leaves the pattern as it is.
    pub fn trim(&mut self, surface: &mut dyn Surface, index: usize) -> DrawStatus {
        if self.run.is_some() {
            log::debug!("{}: trim ignored while drawing", self.label);
            return DrawStatus::Busy;
        }
        if index >= self.scene.len() {
            log::debug!(
                "{}: trim at {index} is past the last element ({})",
                self.label,
                self.scene.len()
            );
            return DrawStatus::Completed;
        }
        self.start(surface, index, true)
    }

    /// [`trim`](Self::trim) at the position of `id`. Unknown ids are ignored.
    pub fn trim_at(&mut self, surface: &mut dyn Surface, id: ElementId) -> DrawStatus {
        if self.run.is_some() {
            return DrawStatus::Busy;
        }
        match self.scene.position(id) {
            Some(index) => self.trim(surface, index),
            None => {
                log::debug!("{}: {id:?} is not part of this pattern", self.label);
                DrawStatus::Completed
            }
        }
    }

    /// Remove every element and cancel any operation in flight.
    pub fn clear(&mut self, surface: &mut dyn Surface) {
        if self.run.take().is_some() {
            log::debug!("{}: cleared while drawing", self.label);
        }
        self.scene.clear(surface);
    }

    /// Perform the next step of an animated operation.
    ///
    /// Returns `None` once the operation has finished (or if none is in
    /// flight). Steps that only rebuild elements kept by a trim are not
    /// reported.
    pub fn step(&mut self, surface: &mut dyn Surface) -> Option<Step> {
        let run = self.run.as_mut()?;
        let next = loop {
            if let Some(pending) = run.pending.take() {
                break Some(pending);
            }
            match run.tiler.advance(&mut self.scene, surface, &self.options.style) {
                Some(advance) if advance.placements.is_empty() => continue,
                other => break other,
            }
        };
        match next {
            Some(advance) => {
                self.scene.settle();
                Some(Step {
                    phase: advance.phase,
                    duration: self.options.durations.for_phase(advance.phase),
                    placements: advance.placements,
                })
            }
            None => {
                self.finish(surface);
                None
            }
        }
    }

    fn start(&mut self, surface: &mut dyn Surface, keep: usize, notify: bool) -> DrawStatus {
        if self.run.is_some() {
            log::debug!("{}: busy, request ignored", self.label);
            return DrawStatus::Busy;
        }
        self.scene.restart(keep, surface);
        let _ = self.scene.insert(
            Arc::clone(&self.motif),
            self.motif_bounds,
            self.base,
            surface,
            &self.options.style,
        );
        let limits = Limits {
            extent: surface.extent(),
            contain: self.options.contain,
            tolerance: self.options.contain_tolerance,
            max_elements: self.options.max_elements,
        };
        log::debug!(
            "{} ({}): drawing from element {keep} on a {}x{} surface",
            self.label,
            self.options.id.as_deref().unwrap_or("-"),
            limits.extent.width,
            limits.extent.height
        );
        let mut run = Run {
            tiler: Tiler::new(self.spec, limits),
            notify,
            pending: None,
        };
        if !self.options.animate {
            self.run = Some(run);
            while self.step(surface).is_some() {}
            return DrawStatus::Completed;
        }
        // Rebuild the kept prefix now so `elements` matches the surface.
        while self.scene.len() < keep {
            match run.tiler.advance(&mut self.scene, surface, &self.options.style) {
                Some(advance) if advance.placements.is_empty() => {}
                Some(advance) => {
                    run.pending = Some(advance);
                    break;
                }
                None => {
                    self.run = Some(run);
                    self.finish(surface);
                    return DrawStatus::Completed;
                }
            }
        }
        self.scene.settle();
        self.run = Some(run);
        DrawStatus::Started
    }

    fn finish(&mut self, surface: &mut dyn Surface) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.scene.finish_replay(surface);
        log::debug!(
            "{} ({}): done with {} elements",
            self.label,
            self.options.id.as_deref().unwrap_or("-"),
            self.scene.len()
        );
        if run.notify
            && let Some(listener) = &self.listener
        {
            listener.notify_redraw(&self.label);
        }
    }
}
