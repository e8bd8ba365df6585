// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kaleido Tiling: boundary-aware frieze, wallpaper, and radial tilers.
//!
//! Given a motif and a symmetry group, this crate builds the visible pattern
//! incrementally, one generator application at a time, and mirrors every
//! placement onto a host [`Surface`].
//!
//! - [`Pattern`] replicates a motif along one axis (frieze groups) or two
//!   (wallpaper groups) until the surface edge, and supports trimming the
//!   tail at any element and regrowing it.
//! - [`RadialPattern`] stacks self-similar levels of a random slice motif into
//!   a spoke and repeats the spoke around a centre.
//! - [`SvgSurface`] is an in-memory surface that renders to SVG.
//!
//! ## Placements are absolute
//!
//! Every [`Element`] stores its absolute transform. A generator is resolved
//! against the bounding box of what it replicates, then applied to each clone
//! in that clone's own frame (see [`kaleido_transform::apply_in_local_frame`]),
//! so chains of mirrors and glides stay rigid.
//!
//! ## Driving an animation
//!
//! Patterns do not own a clock. With [`DrawOptions::animate`] set, drawing
//! returns [`DrawStatus::Started`] and the host calls `step` repeatedly, taking
//! [`Step::duration`] to tween each [`Placement`] before asking for the next.
//! Requests made while an operation is in flight return [`DrawStatus::Busy`]
//! and change nothing. `clear` cancels whatever is in flight.
//!
//! ```rust
//! use kurbo::{Point, Rect, Shape};
//! use kaleido_tiling::{DrawOptions, DrawStatus, Pattern, SvgSurface};
//!
//! let mut surface = SvgSurface::new(250.0, 250.0);
//! let motif = Rect::new(0.0, 0.0, 100.0, 80.0).to_path(0.1);
//! let mut pattern =
//!     Pattern::from_name("pm", motif, Point::ZERO, DrawOptions::default().animated(true))
//!         .unwrap();
//!
//! assert_eq!(pattern.draw(&mut surface), DrawStatus::Started);
//! while let Some(step) = pattern.step(&mut surface) {
//!     // A real host would animate `step.placements` over `step.duration`.
//!     assert!(!step.placements.is_empty());
//! }
//! // Three per row, four rows.
//! assert_eq!(pattern.elements().len(), 12);
//!
//! // Trim at the fifth element and let the pattern regrow.
//! pattern.set_animate(false);
//! assert_eq!(pattern.trim(&mut surface, 4), DrawStatus::Completed);
//! assert_eq!(pattern.elements().len(), 12);
//! ```
//!
//! ## Errors
//!
//! Configurations that cannot be drawn are rejected by constructors with a
//! [`ConfigError`]. Everything that can go wrong mid-draw degrades instead: a
//! generator with unusable input becomes the identity, a step that makes no
//! progress ends its axis, and the element cap ends the run. Each of these is
//! reported through [`log`].

mod element;
mod error;
mod options;
mod pattern;
mod radial;
mod scene;
mod step;
mod surface;
mod telemetry;
mod tiler;

pub use element::{Element, ElementId, union_bounds};
pub use error::ConfigError;
pub use options::{
    DEFAULT_CONTAIN_TOLERANCE, DEFAULT_MAX_ELEMENTS, DrawOptions, RadialOptions, StageDurations,
    Style,
};
pub use pattern::Pattern;
pub use radial::{MAX_LEVELS, RadialConfig, RadialPattern};
pub use step::{DrawStatus, Phase, Placement, Step};
pub use surface::{Surface, SvgSurface};
pub use telemetry::{LogListener, RedrawListener};

pub use kaleido_transform::{FriezeGroup, GroupSpec, SymmetryGroup, WallpaperGroup};
