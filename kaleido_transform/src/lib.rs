// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kaleido Transform: affine generator algebra for symmetry patterns.
//!
//! This crate is the arithmetic layer underneath Kaleido's tilers. It knows
//! nothing about surfaces, elements, or animation; it turns declarative
//! symmetry operations into [`kurbo::Affine`] placements.
//!
//! - [`compose`], [`invert`], [`conjugate`], and [`apply_in_local_frame`] give
//!   a single, documented reading of matrix composition. [`compose`] applies
//!   its first argument first.
//! - [`Generator`] describes a translation, mirror, glide reflection, or
//!   rotation relative to the bounding box of whatever is being replicated.
//!   [`Generator::transform`] resolves it against a concrete box.
//! - [`classify`] reports which components ([`TransformFlags`]) a matrix has,
//!   so callers can tell a plain move from one that changes an element's frame.
//! - [`SymmetryGroup`] is the catalog of frieze and wallpaper groups, each
//!   resolving to a static [`GroupSpec`] of generator chains.
//!
//! ## Why local-frame composition matters
//!
//! An element that has already been reflected carries a placement `M` with a
//! negative determinant. Animating a further world-space transform `T` by
//! "adding" it to the element's current state composes in the wrong frame and
//! skews the result. [`apply_in_local_frame`] evaluates `M · (M⁻¹ · T · M)`
//! instead, yielding a concrete matrix equal to `T · M`.
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect};
//! use kaleido_transform::{Generator, apply_in_local_frame, approx_eq};
//!
//! let motif = Rect::new(0.0, 0.0, 100.0, 80.0);
//! // Mirror the motif across its right edge...
//! let placed = Generator::MIRROR_V.transform(motif);
//! // ...then mirror the result across its own right edge.
//! let mirrored_box = Rect::new(100.0, 0.0, 200.0, 80.0);
//! let again = apply_in_local_frame(placed, Generator::MIRROR_V.transform(mirrored_box));
//!
//! // Two mirrors make a translation by two widths.
//! assert!(approx_eq(again, Affine::translate((200.0, 0.0)), 1e-9));
//! assert_eq!(again * Point::new(0.0, 0.0), Point::new(200.0, 0.0));
//! ```
//!
//! Invalid generator inputs (zero-size boxes, non-finite offsets, rotation
//! order zero) and singular placements never panic: they log a diagnostic via
//! [`log`] and fall back to the identity.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod algebra;
mod generator;
mod group;

pub use algebra::{
    SINGULAR_EPSILON, TransformFlags, apply_in_local_frame, approx_eq, classify, compose,
    conjugate, invert, is_translation_only, maps_alike,
};
pub use generator::{
    Generator, glide_h, glide_v, mirror_h, mirror_v, rotate_order_n, translate_h, translate_v,
};
pub use group::{FriezeGroup, GroupSpec, SymmetryGroup, UnknownGroupError, WallpaperGroup};
