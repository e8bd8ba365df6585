// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use kaleido_motif::MotifError;
use kaleido_transform::UnknownGroupError;
use kurbo::Point;

/// A pattern configuration that cannot be drawn.
///
/// These are reported synchronously by constructors; no pattern is created.
/// Problems that only show up while drawing (a generator resolving against a
/// zero-size box, a singular placement) are not errors: they are logged and
/// the affected step is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Diameter was zero, negative, or not finite.
    #[error("diameter must be positive and finite, got {0}")]
    Diameter(f64),
    /// Fewer than two rotations around the centre.
    #[error("rotation order must be at least 2, got {0}")]
    RotationOrder(u32),
    /// Level count outside the supported range.
    #[error("level count must be between 1 and {max}, got {got}")]
    Levels {
        /// Requested level count.
        got: u32,
        /// Largest supported level count.
        max: u32,
    },
    /// Origin was not finite or lay at negative coordinates.
    #[error("origin {0:?} is out of range")]
    Origin(Point),
    /// The motif path has no segments.
    #[error("motif has no geometry")]
    EmptyMotif,
    /// The contained-mode tolerance was negative or not finite.
    #[error("contain tolerance must be finite and non-negative, got {0}")]
    ContainTolerance(f64),
    /// The element cap was zero.
    #[error("element cap must be at least 1")]
    MaxElements,
    /// Slice motif parameters were rejected.
    #[error(transparent)]
    Motif(#[from] MotifError),
    /// The group name is not in the catalog.
    #[error(transparent)]
    UnknownGroup(#[from] UnknownGroupError),
}

pub(crate) fn check_origin(origin: Point) -> Result<(), ConfigError> {
    let finite = origin.x.is_finite() && origin.y.is_finite();
    if !finite || origin.x < 0.0 || origin.y < 0.0 {
        return Err(ConfigError::Origin(origin));
    }
    Ok(())
}
