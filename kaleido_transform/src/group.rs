// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named symmetry groups and the generator chains that build them.
//!
//! Each group resolves to a fixed [`GroupSpec`] record, looked up once when a
//! name is parsed. There is no per-draw dispatch on group names.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::generator::Generator;

/// Generator chains for the three construction stages of a pattern.
///
/// - `fundamental`: one-shot operations applied to the whole motif set.
/// - `x`: the horizontal axis; all but the last generator build the repeated
///   cell, the last one replicates it until the surface edge.
/// - `y`: the vertical axis, replicating whole rows. Empty for frieze groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSpec {
    /// One-shot generators applied before any axis replication.
    pub fundamental: &'static [Generator],
    /// Horizontal chain.
    pub x: &'static [Generator],
    /// Vertical chain.
    pub y: &'static [Generator],
}

impl GroupSpec {
    /// Number of replicated axes: 1 for friezes, 2 for wallpapers, 0 when
    /// the spec only draws the motif.
    pub fn axis_count(&self) -> usize {
        usize::from(!self.x.is_empty()) + usize::from(!self.y.is_empty())
    }
}

/// The seven frieze groups, in IUC notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FriezeGroup {
    /// Translations only ("hop").
    P1,
    /// Glide reflection ("step").
    P11g,
    /// Vertical mirrors ("sidle").
    P1m1,
    /// Horizontal mirror ("jump").
    P11m,
    /// Half turns ("spinning hop").
    P2,
    /// Vertical mirrors and half turns ("spinning sidle").
    P2mg,
    /// Horizontal and vertical mirrors ("spinning jump").
    P2mm,
}

/// Wallpaper groups on rectangular and square lattices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallpaperGroup {
    /// Translations only.
    P1,
    /// Half turns.
    P2,
    /// Parallel mirrors.
    Pm,
    /// Parallel glides.
    Pg,
    /// Perpendicular mirrors.
    Pmm,
    /// Mirrors with perpendicular half-turn rows.
    Pmg,
    /// Perpendicular glides.
    Pgg,
    /// Quarter turns.
    P4,
}

const NONE: &[Generator] = &[];
const HALF_TURN_RIGHT: Generator = Generator::rotate_about(2, 1.0, 0.5);
const HALF_TURN_BELOW: Generator = Generator::rotate_about(2, 0.5, 1.0);
const QUARTER_TURN: Generator = Generator::rotate(4);

const HOP: &[Generator] = &[Generator::TRANSLATE_H];
const STEP: &[Generator] = &[Generator::GLIDE_H, Generator::TRANSLATE_H];
const SIDLE: &[Generator] = &[Generator::MIRROR_V];
const JUMP: &[Generator] = &[Generator::MIRROR_H, Generator::TRANSLATE_H];
const SPINNING_HOP: &[Generator] = &[HALF_TURN_RIGHT, Generator::TRANSLATE_H];
const SPINNING_SIDLE: &[Generator] = &[Generator::MIRROR_V, HALF_TURN_RIGHT];
const SPINNING_JUMP: &[Generator] = &[Generator::MIRROR_H, Generator::MIRROR_V];

const DOWN: &[Generator] = &[Generator::TRANSLATE_V];
const MIRROR_DOWN: &[Generator] = &[Generator::MIRROR_H];
const GLIDE_DOWN: &[Generator] = &[Generator::GlideV {
    offset_x: 0.5,
    offset_y: 1.0,
}];
const TURN_DOWN: &[Generator] = &[HALF_TURN_BELOW];
const PINWHEEL: &[Generator] = &[QUARTER_TURN, HALF_TURN_BELOW, Generator::TRANSLATE_H];

impl FriezeGroup {
    /// All frieze groups.
    pub const ALL: [Self; 7] = [
        Self::P1,
        Self::P11g,
        Self::P1m1,
        Self::P11m,
        Self::P2,
        Self::P2mg,
        Self::P2mm,
    ];

    /// IUC name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P11g => "p11g",
            Self::P1m1 => "p1m1",
            Self::P11m => "p11m",
            Self::P2 => "p2",
            Self::P2mg => "p2mg",
            Self::P2mm => "p2mm",
        }
    }

    /// Conway's descriptive name.
    pub const fn nickname(self) -> &'static str {
        match self {
            Self::P1 => "hop",
            Self::P11g => "step",
            Self::P1m1 => "sidle",
            Self::P11m => "jump",
            Self::P2 => "spinning-hop",
            Self::P2mg => "spinning-sidle",
            Self::P2mm => "spinning-jump",
        }
    }

    /// Generator chains for this group.
    pub const fn spec(self) -> GroupSpec {
        let x = match self {
            Self::P1 => HOP,
            Self::P11g => STEP,
            Self::P1m1 => SIDLE,
            Self::P11m => JUMP,
            Self::P2 => SPINNING_HOP,
            Self::P2mg => SPINNING_SIDLE,
            Self::P2mm => SPINNING_JUMP,
        };
        GroupSpec {
            fundamental: NONE,
            x,
            y: NONE,
        }
    }
}

impl WallpaperGroup {
    /// All supported wallpaper groups.
    pub const ALL: [Self; 8] = [
        Self::P1,
        Self::P2,
        Self::Pm,
        Self::Pg,
        Self::Pmm,
        Self::Pmg,
        Self::Pgg,
        Self::P4,
    ];

    /// IUC name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P2 => "p2",
            Self::Pm => "pm",
            Self::Pg => "pg",
            Self::Pmm => "pmm",
            Self::Pmg => "pmg",
            Self::Pgg => "pgg",
            Self::P4 => "p4",
        }
    }

    /// Generator chains for this group.
    pub const fn spec(self) -> GroupSpec {
        let (fundamental, x, y) = match self {
            Self::P1 => (NONE, HOP, DOWN),
            Self::P2 => (NONE, SPINNING_HOP, DOWN),
            Self::Pm => (SIDLE, SIDLE, DOWN),
            Self::Pg => (NONE, HOP, GLIDE_DOWN),
            Self::Pmm => (NONE, SIDLE, MIRROR_DOWN),
            Self::Pmg => (NONE, SIDLE, TURN_DOWN),
            Self::Pgg => (NONE, STEP, TURN_DOWN),
            Self::P4 => (NONE, PINWHEEL, DOWN),
        };
        GroupSpec { fundamental, x, y }
    }
}

/// A frieze or wallpaper group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymmetryGroup {
    /// One replicated axis.
    Frieze(FriezeGroup),
    /// Two replicated axes.
    Wallpaper(WallpaperGroup),
}

impl SymmetryGroup {
    /// Generator chains for this group.
    pub const fn spec(self) -> GroupSpec {
        match self {
            Self::Frieze(g) => g.spec(),
            Self::Wallpaper(g) => g.spec(),
        }
    }

    /// Label used for telemetry and diagnostics, e.g. `frieze:p2mm`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frieze(g) => match g {
                FriezeGroup::P1 => "frieze:p1",
                FriezeGroup::P11g => "frieze:p11g",
                FriezeGroup::P1m1 => "frieze:p1m1",
                FriezeGroup::P11m => "frieze:p11m",
                FriezeGroup::P2 => "frieze:p2",
                FriezeGroup::P2mg => "frieze:p2mg",
                FriezeGroup::P2mm => "frieze:p2mm",
            },
            Self::Wallpaper(g) => g.name(),
        }
    }
}

impl fmt::Display for SymmetryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a group name is not in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGroupError {
    name: String,
}

impl UnknownGroupError {
    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown symmetry group `{}`", self.name)
    }
}

impl core::error::Error for UnknownGroupError {}

impl FromStr for SymmetryGroup {
    type Err = UnknownGroupError;

    /// Accepts IUC names (`p2mm`, `pmg`), Conway nicknames (`spinning-jump`),
    /// and an explicit `frieze:` prefix. Bare `p1`/`p2` resolve to the
    /// wallpaper groups.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if let Some(rest) = key.strip_prefix("frieze:") {
            return frieze_by_name(rest).map(Self::Frieze).ok_or_else(|| unknown(s));
        }
        let key = key.strip_prefix("wallpaper:").unwrap_or(key);
        if let Some(g) = WallpaperGroup::ALL.into_iter().find(|g| g.name() == key) {
            return Ok(Self::Wallpaper(g));
        }
        frieze_by_name(key).map(Self::Frieze).ok_or_else(|| unknown(s))
    }
}

fn frieze_by_name(name: &str) -> Option<FriezeGroup> {
    FriezeGroup::ALL
        .into_iter()
        .find(|g| g.name() == name || g.nickname() == name)
}

fn unknown(s: &str) -> UnknownGroupError {
    UnknownGroupError { name: s.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!(
            "p2mm".parse::<SymmetryGroup>(),
            Ok(SymmetryGroup::Frieze(FriezeGroup::P2mm))
        );
        assert_eq!(
            "spinning-hop".parse::<SymmetryGroup>(),
            Ok(SymmetryGroup::Frieze(FriezeGroup::P2))
        );
        assert_eq!(
            "p1".parse::<SymmetryGroup>(),
            Ok(SymmetryGroup::Wallpaper(WallpaperGroup::P1))
        );
        assert_eq!(
            "frieze:p1".parse::<SymmetryGroup>(),
            Ok(SymmetryGroup::Frieze(FriezeGroup::P1))
        );
        assert_eq!(
            " pmg ".parse::<SymmetryGroup>(),
            Ok(SymmetryGroup::Wallpaper(WallpaperGroup::Pmg))
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "p6m".parse::<SymmetryGroup>().unwrap_err();
        assert_eq!(err.name(), "p6m");
        assert!("frieze:pm".parse::<SymmetryGroup>().is_err());
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for g in FriezeGroup::ALL {
            let group = SymmetryGroup::Frieze(g);
            assert_eq!(group.label().parse::<SymmetryGroup>(), Ok(group));
        }
        for g in WallpaperGroup::ALL {
            let group = SymmetryGroup::Wallpaper(g);
            assert_eq!(group.label().parse::<SymmetryGroup>(), Ok(group));
        }
    }

    #[test]
    fn axis_counts() {
        for g in FriezeGroup::ALL {
            assert_eq!(g.spec().axis_count(), 1, "{}", g.name());
        }
        for g in WallpaperGroup::ALL {
            assert_eq!(g.spec().axis_count(), 2, "{}", g.name());
        }
        assert_eq!(WallpaperGroup::Pm.spec().fundamental, &[Generator::MIRROR_V]);
    }
}
