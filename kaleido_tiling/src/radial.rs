// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular tessellations: a leveled spoke repeated around a centre.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::sync::Arc;

use kaleido_motif::{Motif, SliceParams, rng_from_seed};
use kaleido_transform::invert;
use kurbo::{Affine, BezPath, Point, Rect, Shape};
use rand::rngs::StdRng;

use crate::element::Element;
use crate::error::{ConfigError, check_origin};
use crate::options::RadialOptions;
use crate::scene::{Placements, Scene};
use crate::step::{DrawStatus, Phase, Step};
use crate::surface::Surface;
use crate::telemetry::RedrawListener;

/// Largest supported level count.
pub const MAX_LEVELS: u32 = 16;

/// Each level is this many times larger than the one inside it.
const SCALE_FACTOR: f64 = 2.0;

/// Flower mode grows the working diameter by this factor.
const FLOWER_DIAMETER: f64 = 1.5;

/// Geometry of a radial pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialConfig {
    /// Centre of rotation.
    pub origin: Point,
    /// Diameter the spokes fill.
    pub diameter: f64,
    /// Number of self-similar levels per spoke.
    pub levels: u32,
    /// Number of spokes; each is a turn of `360° / rotations` from the last.
    pub rotations: u32,
    /// Slices per motif.
    pub slices_count: u32,
    /// Mirror-symmetric motif.
    pub with_reflection: bool,
    /// Fold levels back towards the centre and chain rotations from the
    /// previous copy. Forces two levels and grows the diameter by half.
    pub as_flower: bool,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(150.0, 150.0),
            diameter: 300.0,
            levels: 3,
            rotations: 8,
            slices_count: 3,
            with_reflection: true,
            as_flower: false,
        }
    }
}

impl RadialConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(ConfigError::Diameter(self.diameter));
        }
        if self.rotations < 2 {
            return Err(ConfigError::RotationOrder(self.rotations));
        }
        if !(1..=MAX_LEVELS).contains(&self.levels) {
            return Err(ConfigError::Levels {
                got: self.levels,
                max: MAX_LEVELS,
            });
        }
        check_origin(self.origin)
    }
}

/// Resolved layout: what the config means once flower mode is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    origin: Point,
    levels: u32,
    rotations: u32,
    /// Height of the innermost level.
    level_height: f64,
    flower: bool,
}

impl Layout {
    fn new(config: &RadialConfig) -> Self {
        let (levels, diameter) = if config.as_flower {
            (2, config.diameter * FLOWER_DIAMETER)
        } else {
            (config.levels, config.diameter)
        };
        let radius = diameter / 2.0;
        Self {
            origin: config.origin,
            levels,
            rotations: config.rotations,
            level_height: radius / (SCALE_FACTOR.powi(levels as i32) - 1.0),
            flower: config.as_flower,
        }
    }

    /// Motif width: the wedge chord at the motif's height, capped so narrow
    /// orders do not produce a motif wider than it is tall.
    fn motif_width(&self) -> f64 {
        let h = self.level_height;
        (2.0 * h * (PI / f64::from(self.rotations)).tan()).min(2.0 * h)
    }

    /// Absolute placement of level `l` of the upright spoke.
    fn level(&self, l: u32) -> Affine {
        let s = SCALE_FACTOR.powi(l as i32);
        let h = self.level_height;
        let at_origin = Affine::translate(self.origin.to_vec2());
        if self.flower {
            at_origin
                * Affine::translate((0.0, -h * (SCALE_FACTOR * s - 1.0)))
                * Affine::scale_non_uniform(s, -s)
        } else {
            at_origin * Affine::translate((0.0, -h * (s - 1.0))) * Affine::scale(s)
        }
    }

    /// Rotation about the origin by `k` spoke angles.
    fn turn(&self, k: u32) -> Affine {
        let angle = TAU * f64::from(k) / f64::from(self.rotations);
        let o = self.origin.to_vec2();
        Affine::translate(o) * Affine::rotate(angle) * Affine::translate(-o)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Idle,
    Level(u32),
    Rotation(u32),
    Turn { applied: bool },
}

/// A radial pattern built from a randomly generated slice motif.
///
/// The motif is generated on the first draw and reused by every later draw
/// until [`regenerate`](Self::regenerate) is called.
pub struct RadialPattern {
    config: RadialConfig,
    layout: Layout,
    motif: Motif,
    rng: StdRng,
    path: Option<(Arc<BezPath>, Rect)>,
    options: RadialOptions,
    scene: Scene,
    stage: Stage,
    notify: bool,
    listener: Option<Box<dyn RedrawListener>>,
}

impl fmt::Debug for RadialPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadialPattern")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("options", &self.options)
            .field("elements", &self.scene.len())
            .field("stage", &self.stage)
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl RadialPattern {
    /// Validate `config` and prepare the motif. Nothing is drawn yet.
    pub fn new(config: RadialConfig, options: RadialOptions) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = Layout::new(&config);
        let motif = Motif::new(SliceParams {
            width: layout.motif_width(),
            height: layout.level_height,
            slices_count: config.slices_count,
            with_reflection: config.with_reflection,
        })?;
        Ok(Self {
            config,
            layout,
            motif,
            rng: rng_from_seed(options.seed),
            path: None,
            options,
            scene: Scene::default(),
            stage: Stage::Idle,
            notify: false,
            listener: None,
        })
    }

    /// Configuration as given.
    pub fn config(&self) -> &RadialConfig {
        &self.config
    }

    /// Height of the innermost level after flower adjustments.
    pub fn level_height(&self) -> f64 {
        self.layout.level_height
    }

    /// Label reported to the listener.
    pub fn label(&self) -> &'static str {
        if self.layout.flower { "flower" } else { "radial" }
    }

    /// Install the completion listener.
    pub fn set_listener(&mut self, listener: impl RedrawListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Turn animation on or off for subsequent operations.
    pub fn set_animate(&mut self, animate: bool) {
        self.options.animate = animate;
    }

    /// Placed elements: every level of spoke 0, then spoke 1, and so on.
    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    /// Motif geometry currently in use, if one has been generated.
    pub fn motif(&self) -> Option<&Arc<BezPath>> {
        self.motif.cached()
    }

    /// Returns true while construction is in flight.
    pub fn is_drawing(&self) -> bool {
        matches!(self.stage, Stage::Level(_) | Stage::Rotation(_))
    }

    /// Returns true while a [`rotate`](Self::rotate) is in flight.
    pub fn is_rotating(&self) -> bool {
        matches!(self.stage, Stage::Turn { .. })
    }

    /// Draw from scratch with the cached motif.
    pub fn draw(&mut self, surface: &mut dyn Surface) -> DrawStatus {
        self.start(surface, false)
    }

    /// Clear and rebuild, then notify the listener.
    pub fn redraw(&mut self, surface: &mut dyn Surface) -> DrawStatus {
        self.start(surface, true)
    }

    /// Drop the cached motif so the next draw generates a fresh one.
    pub fn regenerate(&mut self) {
        self.motif.invalidate();
    }

    /// Turn the whole pattern by one spoke angle about its origin.
    ///
    /// Ignored while a draw or another rotation is in flight.
    pub fn rotate(&mut self, surface: &mut dyn Surface) -> DrawStatus {
        if self.stage != Stage::Idle {
            log::debug!("{}: rotate ignored, busy", self.label());
            return DrawStatus::Busy;
        }
        if self.scene.is_empty() {
            return DrawStatus::Completed;
        }
        self.stage = Stage::Turn { applied: false };
        self.notify = true;
        self.pump(surface)
    }

    /// Remove every element and stop any operation in flight.
    pub fn clear(&mut self, surface: &mut dyn Surface) {
        if self.stage != Stage::Idle {
            log::debug!("{}: cleared mid-operation", self.label());
        }
        self.stage = Stage::Idle;
        self.scene.clear(surface);
    }

    /// Perform the next step of an animated operation, or return `None` once
    /// it has finished.
    pub fn step(&mut self, surface: &mut dyn Surface) -> Option<Step> {
        let style = &self.options.style;
        let layout = self.layout;
        let (phase, placements): (Phase, Placements) = match self.stage {
            Stage::Idle => return None,
            Stage::Level(l) if l < layout.levels => {
                let placements: Placements = if l == 0 {
                    let (path, bounds) = self.path.clone()?;
                    self.scene
                        .insert(path, bounds, layout.level(0), surface, style)
                        .into_iter()
                        .collect()
                } else {
                    let grow = match invert(layout.level(l - 1)) {
                        Some(inverse) => layout.level(l) * inverse,
                        None => Affine::IDENTITY,
                    };
                    let prev = (l - 1) as usize;
                    self.scene.replicate(prev..prev + 1, grow, surface, style).1
                };
                self.stage = Stage::Level(l + 1);
                (Phase::Level, placements)
            }
            Stage::Level(_) => {
                self.stage = Stage::Rotation(1);
                return self.step(surface);
            }
            Stage::Rotation(k) if k < layout.rotations => {
                let spoke = layout.levels as usize;
                let (source, t) = if layout.flower {
                    let start = (k as usize - 1) * spoke;
                    (start..start + spoke, layout.turn(1))
                } else {
                    (0..spoke, layout.turn(k))
                };
                let (_, placements) = self.scene.replicate(source, t, surface, style);
                self.stage = Stage::Rotation(k + 1);
                (Phase::Rotation, placements)
            }
            Stage::Rotation(_) | Stage::Turn { applied: true } => {
                self.finish();
                return None;
            }
            Stage::Turn { applied: false } => {
                let all = 0..self.scene.len();
                let placements = self.scene.transform(all, layout.turn(1), surface);
                self.stage = Stage::Turn { applied: true };
                (Phase::Turn, placements)
            }
        };
        Some(Step {
            phase,
            duration: self.options.duration_for(phase),
            placements,
        })
    }

    fn start(&mut self, surface: &mut dyn Surface, notify: bool) -> DrawStatus {
        if self.stage != Stage::Idle {
            log::debug!("{}: draw ignored, busy", self.label());
            return DrawStatus::Busy;
        }
        self.scene.clear(surface);
        let path = self.motif.path_or_generate(&mut self.rng);
        let bounds = path.bounding_box();
        self.path = Some((path, bounds));
        self.stage = Stage::Level(0);
        self.notify = notify;
        log::debug!(
            "{} ({}): {} levels x {} rotations, level height {}",
            self.label(),
            self.options.id.as_deref().unwrap_or("-"),
            self.layout.levels,
            self.layout.rotations,
            self.layout.level_height
        );
        self.pump(surface)
    }

    fn pump(&mut self, surface: &mut dyn Surface) -> DrawStatus {
        if self.options.animate {
            return DrawStatus::Started;
        }
        while self.step(surface).is_some() {}
        DrawStatus::Completed
    }

    fn finish(&mut self) {
        self.stage = Stage::Idle;
        log::debug!(
            "{} ({}): done with {} elements",
            self.label(),
            self.options.id.as_deref().unwrap_or("-"),
            self.scene.len()
        );
        if self.notify
            && let Some(listener) = &self.listener
        {
            listener.notify_redraw(self.label());
        }
        self.notify = false;
    }
}
