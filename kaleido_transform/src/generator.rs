// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symmetry generators and their bounding-box-relative constructors.
//!
//! Every constructor takes the reference box of whatever is being replicated
//! and returns a world-space [`Affine`]. Offsets are multipliers of that box's
//! width or height measured from its top-left corner, so `1.0` means "the far
//! edge" and `0.5` "the centre line".
//!
//! Invalid inputs never panic or error: the constructor logs a diagnostic and
//! returns [`Affine::IDENTITY`], which the tiler treats as a step that makes no
//! progress.

use core::f64::consts::TAU;

use kurbo::{Affine, Point, Rect};

use crate::algebra::compose;

/// A single symmetry operation, described relative to a reference box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Generator {
    /// Shift along X by `offset_x × width`.
    TranslateH {
        /// Width multiplier of the shift.
        offset_x: f64,
    },
    /// Shift along Y by `offset_y × height`.
    TranslateV {
        /// Height multiplier of the shift.
        offset_y: f64,
    },
    /// Reflect across the horizontal line `y0 + offset_y × height`.
    MirrorH {
        /// Height multiplier locating the mirror line.
        offset_y: f64,
    },
    /// Reflect across the vertical line `x0 + offset_x × width`.
    MirrorV {
        /// Width multiplier locating the mirror line.
        offset_x: f64,
    },
    /// [`Generator::MirrorH`] followed by [`Generator::TranslateH`].
    GlideH {
        /// Width multiplier of the shift.
        offset_x: f64,
        /// Height multiplier locating the mirror line.
        offset_y: f64,
    },
    /// [`Generator::MirrorV`] followed by [`Generator::TranslateV`].
    GlideV {
        /// Width multiplier locating the mirror line.
        offset_x: f64,
        /// Height multiplier of the shift.
        offset_y: f64,
    },
    /// Turn by `360° / order` about `(x0 + offset_x × width, y0 + offset_y × height)`.
    Rotate {
        /// Rotational order; `2` is a half turn, `4` a quarter turn.
        order: u32,
        /// Width multiplier locating the centre.
        offset_x: f64,
        /// Height multiplier locating the centre.
        offset_y: f64,
    },
}

impl Generator {
    /// Shift by one full width.
    pub const TRANSLATE_H: Self = Self::TranslateH { offset_x: 1.0 };
    /// Shift by one full height.
    pub const TRANSLATE_V: Self = Self::TranslateV { offset_y: 1.0 };
    /// Mirror across the bottom edge.
    pub const MIRROR_H: Self = Self::MirrorH { offset_y: 1.0 };
    /// Mirror across the right edge.
    pub const MIRROR_V: Self = Self::MirrorV { offset_x: 1.0 };
    /// Mirror across the bottom edge, then shift by one width.
    pub const GLIDE_H: Self = Self::GlideH {
        offset_x: 1.0,
        offset_y: 1.0,
    };
    /// Mirror across the right edge, then shift by one height.
    pub const GLIDE_V: Self = Self::GlideV {
        offset_x: 1.0,
        offset_y: 1.0,
    };

    /// Rotation of the given order about the far (bottom-right) corner.
    pub const fn rotate(order: u32) -> Self {
        Self::Rotate {
            order,
            offset_x: 1.0,
            offset_y: 1.0,
        }
    }

    /// Rotation of the given order about an explicit box-relative centre.
    pub const fn rotate_about(order: u32, offset_x: f64, offset_y: f64) -> Self {
        Self::Rotate {
            order,
            offset_x,
            offset_y,
        }
    }

    /// Short lowercase name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TranslateH { .. } => "translateH",
            Self::TranslateV { .. } => "translateV",
            Self::MirrorH { .. } => "mirrorH",
            Self::MirrorV { .. } => "mirrorV",
            Self::GlideH { .. } => "glideH",
            Self::GlideV { .. } => "glideV",
            Self::Rotate { .. } => "rotate",
        }
    }

    /// Returns true if this generator reverses orientation.
    pub const fn is_reflection(&self) -> bool {
        matches!(
            self,
            Self::MirrorH { .. } | Self::MirrorV { .. } | Self::GlideH { .. } | Self::GlideV { .. }
        )
    }

    /// Resolve this generator against a reference box.
    pub fn transform(&self, bbox: Rect) -> Affine {
        match *self {
            Self::TranslateH { offset_x } => translate_h(bbox, offset_x),
            Self::TranslateV { offset_y } => translate_v(bbox, offset_y),
            Self::MirrorH { offset_y } => mirror_h(bbox, offset_y),
            Self::MirrorV { offset_x } => mirror_v(bbox, offset_x),
            Self::GlideH { offset_x, offset_y } => glide_h(bbox, offset_x, offset_y),
            Self::GlideV { offset_x, offset_y } => glide_v(bbox, offset_x, offset_y),
            Self::Rotate {
                order,
                offset_x,
                offset_y,
            } => rotate_order_n(bbox, order, offset_x, offset_y),
        }
    }
}

/// Shift by `offset_x × bbox.width()` along X.
pub fn translate_h(bbox: Rect, offset_x: f64) -> Affine {
    if !usable("translateH", bbox, offset_x, bbox.width()) {
        return Affine::IDENTITY;
    }
    Affine::translate((offset_x * bbox.width(), 0.0))
}

/// Shift by `offset_y × bbox.height()` along Y.
pub fn translate_v(bbox: Rect, offset_y: f64) -> Affine {
    if !usable("translateV", bbox, offset_y, bbox.height()) {
        return Affine::IDENTITY;
    }
    Affine::translate((0.0, offset_y * bbox.height()))
}

/// Reflect across the horizontal line `bbox.y0 + offset_y × bbox.height()`.
pub fn mirror_h(bbox: Rect, offset_y: f64) -> Affine {
    if !usable("mirrorH", bbox, offset_y, bbox.height()) {
        return Affine::IDENTITY;
    }
    let line = bbox.y0 + offset_y * bbox.height();
    Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 2.0 * line])
}

/// Reflect across the vertical line `bbox.x0 + offset_x × bbox.width()`.
pub fn mirror_v(bbox: Rect, offset_x: f64) -> Affine {
    if !usable("mirrorV", bbox, offset_x, bbox.width()) {
        return Affine::IDENTITY;
    }
    let line = bbox.x0 + offset_x * bbox.width();
    Affine::new([-1.0, 0.0, 0.0, 1.0, 2.0 * line, 0.0])
}

/// Glide reflection along X: [`mirror_h`] then [`translate_h`], both measured
/// on the same box.
pub fn glide_h(bbox: Rect, offset_x: f64, offset_y: f64) -> Affine {
    let mirror = mirror_h(bbox, offset_y);
    let shift = translate_h(bbox, offset_x);
    if mirror == Affine::IDENTITY || shift == Affine::IDENTITY {
        return Affine::IDENTITY;
    }
    compose(mirror, shift)
}

/// Glide reflection along Y: [`mirror_v`] then [`translate_v`], both measured
/// on the same box.
pub fn glide_v(bbox: Rect, offset_x: f64, offset_y: f64) -> Affine {
    let mirror = mirror_v(bbox, offset_x);
    let shift = translate_v(bbox, offset_y);
    if mirror == Affine::IDENTITY || shift == Affine::IDENTITY {
        return Affine::IDENTITY;
    }
    compose(mirror, shift)
}

/// Rotate by `360° / order` about the box-relative point
/// `(offset_x, offset_y)`; `(1.0, 1.0)` is the far corner.
pub fn rotate_order_n(bbox: Rect, order: u32, offset_x: f64, offset_y: f64) -> Affine {
    if order == 0 {
        log::warn!("rotate: order must be positive; using identity");
        return Affine::IDENTITY;
    }
    if !(offset_x.is_finite() && offset_y.is_finite() && rect_is_finite(bbox)) {
        log::warn!(
            "rotate: non-finite centre ({offset_x}, {offset_y}) on {bbox:?}; using identity"
        );
        return Affine::IDENTITY;
    }
    let center = Point::new(
        bbox.x0 + offset_x * bbox.width(),
        bbox.y0 + offset_y * bbox.height(),
    );
    let angle = TAU / f64::from(order);
    Affine::rotate_about(angle, center)
}

fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// Shared validation for generators measured along one dimension.
fn usable(name: &str, bbox: Rect, offset: f64, extent: f64) -> bool {
    if !offset.is_finite() || !rect_is_finite(bbox) {
        log::warn!("{name}: non-finite offset {offset} or box {bbox:?}; using identity");
        return false;
    }
    if extent <= 0.0 {
        log::warn!("{name}: reference box {bbox:?} has no extent; using identity");
        return false;
    }
    true
}
