// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing options threaded through pattern construction.
//!
//! There is no global animation switch or RNG seed: everything a pattern
//! needs is carried by these records.

use std::time::Duration;

use crate::error::ConfigError;
use crate::step::Phase;

/// Default slack, in surface units, for the contained stop check.
pub const DEFAULT_CONTAIN_TOLERANCE: f64 = 5.0;

/// Default cap on the number of elements one pattern may place.
pub const DEFAULT_MAX_ELEMENTS: usize = 10_000;

/// Paint attributes passed to the surface for every element.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Stroke paint (any CSS color), or `None` for no stroke.
    pub stroke: Option<String>,
    /// Fill paint (any CSS color), or `None` for no fill.
    pub fill: Option<String>,
    /// Stroke width in surface units.
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Some("#000".into()),
            fill: None,
            stroke_width: 1.0,
        }
    }
}

/// How long each construction stage should take per step when animating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageDurations {
    /// One-shot fundamental-domain steps.
    pub fundamental: Duration,
    /// Steps along the horizontal axis.
    pub x: Duration,
    /// Steps along the vertical axis.
    pub y: Duration,
}

impl Default for StageDurations {
    fn default() -> Self {
        Self {
            fundamental: Duration::from_millis(500),
            x: Duration::from_millis(300),
            y: Duration::from_millis(300),
        }
    }
}

impl StageDurations {
    /// Duration for a step of the given phase. Phases outside linear tiling
    /// take no time.
    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Fundamental => self.fundamental,
            Phase::AxisX => self.x,
            Phase::AxisY => self.y,
            _ => Duration::ZERO,
        }
    }
}

/// Options for frieze and wallpaper patterns.
///
/// ```rust
/// use kaleido_tiling::DrawOptions;
///
/// let options = DrawOptions::default().animated(true).contained(true);
/// assert!(options.animate && options.contain);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOptions {
    /// Host-side identifier, shown in lifecycle debug logs.
    pub id: Option<String>,
    /// Paint attributes.
    pub style: Style,
    /// Yield a [`Step`](crate::Step) per replication instead of finishing
    /// inside the call.
    pub animate: bool,
    /// Per-stage step durations when animating.
    pub durations: StageDurations,
    /// Stop before an instance would overflow the surface rather than after.
    pub contain: bool,
    /// Slack for the contained check, compensating for loose bounds.
    pub contain_tolerance: f64,
    /// Hard cap on placed elements.
    pub max_elements: usize,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            id: None,
            style: Style::default(),
            animate: false,
            durations: StageDurations::default(),
            contain: false,
            contain_tolerance: DEFAULT_CONTAIN_TOLERANCE,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl DrawOptions {
    /// Set the host identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the paint attributes.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable animation.
    pub fn animated(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Set the per-stage durations.
    pub fn with_durations(mut self, durations: StageDurations) -> Self {
        self.durations = durations;
        self
    }

    /// Enable or disable the contained stop check.
    pub fn contained(mut self, contain: bool) -> Self {
        self.contain = contain;
        self
    }

    /// Set the contained-mode tolerance.
    pub fn with_contain_tolerance(mut self, tolerance: f64) -> Self {
        self.contain_tolerance = tolerance;
        self
    }

    /// Set the element cap.
    pub fn with_max_elements(mut self, max: usize) -> Self {
        self.max_elements = max;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.contain_tolerance.is_finite() || self.contain_tolerance < 0.0 {
            return Err(ConfigError::ContainTolerance(self.contain_tolerance));
        }
        if self.max_elements == 0 {
            return Err(ConfigError::MaxElements);
        }
        Ok(())
    }
}

/// Options for radial patterns.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialOptions {
    /// Host-side identifier, shown in lifecycle debug logs.
    pub id: Option<String>,
    /// Paint attributes.
    pub style: Style,
    /// Yield a [`Step`](crate::Step) per level and rotation.
    pub animate: bool,
    /// Duration of each spoke level step.
    pub level_duration: Duration,
    /// Duration of each rotation step, including
    /// [`RadialPattern::rotate`](crate::RadialPattern::rotate).
    pub rotation_duration: Duration,
    /// Seed for the motif generator; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self {
            id: None,
            style: Style::default(),
            animate: false,
            level_duration: Duration::from_millis(200),
            rotation_duration: Duration::from_millis(400),
            seed: None,
        }
    }
}

impl RadialOptions {
    /// Set the host identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the paint attributes.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable animation.
    pub fn animated(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Fix the motif seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn duration_for(&self, phase: Phase) -> Duration {
        if !self.animate {
            return Duration::ZERO;
        }
        match phase {
            Phase::Level => self.level_duration,
            Phase::Rotation | Phase::Turn => self.rotation_duration,
            _ => Duration::ZERO,
        }
    }
}
