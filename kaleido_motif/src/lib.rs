// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kaleido Motif: random fundamental domains for circular tessellations.
//!
//! A circular tessellation repeats one decorated radial segment (the
//! fundamental domain) around a centre. This crate builds that segment:
//!
//! - [`SliceParams`] describes the segment and how it is decorated.
//! - [`generate_slices`] draws a fresh random motif as a [`kurbo::BezPath`].
//! - [`Motif`] generates once and caches the result, so every redraw and every
//!   rotated copy shares identical geometry.
//!
//! Randomness is always supplied by the caller. Use [`rng_from_seed`] with a
//! fixed seed for reproducible output.
//!
//! ```rust
//! use kaleido_motif::{Motif, SliceParams, rng_from_seed};
//!
//! let mut motif = Motif::new(SliceParams {
//!     width: 40.0,
//!     height: 100.0,
//!     slices_count: 3,
//!     with_reflection: true,
//! })
//! .unwrap();
//! let mut rng = rng_from_seed(Some(42));
//!
//! let first = motif.path_or_generate(&mut rng);
//! let second = motif.path_or_generate(&mut rng);
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! ```

use std::sync::Arc;

use kurbo::BezPath;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod slice;

pub use slice::{MIN_SLICE_WIDTH, SliceParams, generate_slices};

/// Errors for motif parameters that cannot produce geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotifError {
    /// `slices_count` was zero.
    #[error("slice count must be at least 1")]
    NoSlices,
    /// Width or height was non-positive or not finite.
    #[error("motif size must be positive and finite, got {width}x{height}")]
    Size {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
}

/// A slice motif that is generated on first use and reused afterwards.
#[derive(Clone, Debug)]
pub struct Motif {
    params: SliceParams,
    path: Option<Arc<BezPath>>,
}

impl Motif {
    /// Create an empty cache for the given parameters.
    pub fn new(params: SliceParams) -> Result<Self, MotifError> {
        params.validate()?;
        Ok(Self { params, path: None })
    }

    /// Parameters this motif is generated from.
    pub fn params(&self) -> &SliceParams {
        &self.params
    }

    /// The cached path, if one has been generated.
    pub fn cached(&self) -> Option<&Arc<BezPath>> {
        self.path.as_ref()
    }

    /// Return the cached path, generating it with `rng` on first use.
    pub fn path_or_generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Arc<BezPath> {
        if let Some(path) = &self.path {
            return Arc::clone(path);
        }
        let path = match generate_slices(&self.params, rng) {
            Ok(path) => Arc::new(path),
            // Parameters were validated in `new`; an error here means they were
            // constructed some other way. Degrade to an empty motif.
            Err(err) => {
                log::warn!("motif generation failed: {err}");
                Arc::new(BezPath::new())
            }
        };
        self.path = Some(Arc::clone(&path));
        path
    }

    /// Forget the cached path so the next call to
    /// [`path_or_generate`](Self::path_or_generate) draws a new one.
    pub fn invalidate(&mut self) {
        self.path = None;
    }
}

/// Deterministic RNG for a fixed seed, or an entropy-seeded one for `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
