// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end construction scenarios.

use std::cell::Cell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use kaleido_tiling::{
    DrawOptions, DrawStatus, Element, FriezeGroup, LogListener, Pattern, Phase, RadialConfig,
    RadialOptions, RadialPattern, Surface, SvgSurface, SymmetryGroup, WallpaperGroup,
    union_bounds,
};
use kaleido_transform::{Generator, GroupSpec, approx_eq};
use kurbo::{Affine, BezPath, Point, Rect, Shape};

fn rect_motif(width: f64, height: f64) -> BezPath {
    Rect::new(0.0, 0.0, width, height).to_path(0.1)
}

/// An asymmetric motif, so mirrored and rotated copies are distinguishable.
fn flag_motif(width: f64, height: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((width, 0.0));
    path.line_to((width * 0.25, height * 0.4));
    path.line_to((0.0, height));
    path.close_path();
    path
}

fn all_groups() -> Vec<SymmetryGroup> {
    FriezeGroup::ALL
        .into_iter()
        .map(SymmetryGroup::Frieze)
        .chain(WallpaperGroup::ALL.into_iter().map(SymmetryGroup::Wallpaper))
        .collect()
}

fn transforms(elements: &[Element]) -> Vec<Affine> {
    elements.iter().map(Element::transform).collect()
}

#[test]
fn circular_four_rotations() {
    let config = RadialConfig {
        origin: Point::new(150.0, 150.0),
        diameter: 200.0,
        levels: 1,
        rotations: 4,
        slices_count: 1,
        with_reflection: true,
        as_flower: false,
    };
    let mut surface = SvgSurface::new(300.0, 300.0);
    let mut pattern = RadialPattern::new(config, RadialOptions::default().with_seed(1)).unwrap();
    assert_eq!(pattern.draw(&mut surface), DrawStatus::Completed);

    let elements = pattern.elements();
    assert_eq!(elements.len(), 4);
    let first = elements[0].transform();
    for (k, e) in elements.iter().enumerate() {
        let turn = Affine::rotate_about(FRAC_PI_2 * k as f64, config.origin);
        assert!(
            approx_eq(e.transform(), turn * first, 1e-9),
            "element {k} is not a {}° turn of the first",
            90 * k
        );
    }
}

#[test]
fn frieze_translate_stops_at_the_edge() {
    let spec = GroupSpec {
        fundamental: &[],
        x: &[Generator::TRANSLATE_H],
        y: &[],
    };
    let mut surface = SvgSurface::new(300.0, 100.0);
    let mut pattern = Pattern::with_spec(
        "translate",
        spec,
        rect_motif(100.0, 50.0),
        Point::ZERO,
        DrawOptions::default(),
    )
    .unwrap();
    let _ = pattern.draw(&mut surface);

    let offsets: Vec<f64> = pattern
        .elements()
        .iter()
        .map(|e| e.transform().translation().x)
        .collect();
    assert_eq!(offsets, vec![0.0, 100.0, 200.0]);
    assert_eq!(surface.len(), 3);
}

#[test]
fn wallpaper_pm_rows() {
    let mut surface = SvgSurface::new(250.0, 250.0);
    let mut pattern = Pattern::new(
        SymmetryGroup::Wallpaper(WallpaperGroup::Pm),
        flag_motif(100.0, 80.0),
        Point::ZERO,
        DrawOptions::default(),
    )
    .unwrap();
    let _ = pattern.draw(&mut surface);

    let elements = pattern.elements();
    assert_eq!(elements.len() % 3, 0, "rows are three wide");
    let row = union_bounds(&elements[..3]).unwrap();
    assert_eq!(row, Rect::new(0.0, 0.0, 300.0, 80.0));
    let all = union_bounds(elements).unwrap();
    assert!(all.y1 >= 250.0, "rows stop once past the bottom edge");
    assert!(all.y1 - 80.0 < 250.0, "no row starts past the bottom edge");
    assert_eq!(elements.len(), 12);

    // The middle instance is the mirror image of the first.
    let mirrored = elements[1].transform();
    assert!(approx_eq(
        mirrored,
        Affine::new([-1.0, 0.0, 0.0, 1.0, 200.0, 0.0]),
        1e-9
    ));
}

#[test]
fn every_group_terminates_and_covers_the_surface() {
    let extent = (300.0, 200.0);
    for group in all_groups() {
        let mut surface = SvgSurface::new(extent.0, extent.1);
        let mut pattern = Pattern::new(
            group,
            flag_motif(40.0, 30.0),
            Point::ZERO,
            DrawOptions::default(),
        )
        .unwrap();
        assert_eq!(pattern.draw(&mut surface), DrawStatus::Completed);

        let elements = pattern.elements();
        assert!(elements.len() > 1, "{group} placed only the motif");
        assert!(elements.len() < 1_000, "{group} ran away");
        assert_eq!(surface.len(), elements.len());

        let bounds = union_bounds(elements).unwrap();
        assert!(bounds.x1 >= extent.0, "{group} stopped short: {bounds:?}");
        if matches!(group, SymmetryGroup::Wallpaper(_)) {
            assert!(bounds.y1 >= extent.1, "{group} stopped short: {bounds:?}");
        }
        for e in elements {
            let b = e.bounding_box();
            assert!(
                b.x0 < extent.0 && b.y0 < extent.1,
                "{group} placed {b:?} entirely off the surface"
            );
        }
    }
}

#[test]
fn trim_regrows_the_same_tail() {
    for group in all_groups() {
        let mut fresh_surface = SvgSurface::new(320.0, 240.0);
        let mut fresh = Pattern::new(
            group,
            flag_motif(50.0, 40.0),
            Point::new(5.0, 5.0),
            DrawOptions::default(),
        )
        .unwrap();
        let _ = fresh.draw(&mut fresh_surface);
        let expected = transforms(fresh.elements());

        for cut in [0, 1, expected.len() / 2, expected.len() - 1] {
            let mut surface = SvgSurface::new(320.0, 240.0);
            let mut pattern = Pattern::new(
                group,
                flag_motif(50.0, 40.0),
                Point::new(5.0, 5.0),
                DrawOptions::default(),
            )
            .unwrap();
            let _ = pattern.draw(&mut surface);
            let kept: Vec<_> = pattern.elements()[..cut].iter().map(Element::id).collect();

            assert_eq!(pattern.trim(&mut surface, cut), DrawStatus::Completed);
            let regrown = transforms(pattern.elements());
            assert_eq!(regrown.len(), expected.len(), "{group} cut at {cut}");
            for (i, (a, b)) in regrown.iter().zip(&expected).enumerate() {
                assert!(
                    approx_eq(*a, *b, 1e-9),
                    "{group} cut at {cut}: element {i} differs"
                );
            }
            let ids: Vec<_> = pattern.elements()[..cut].iter().map(Element::id).collect();
            assert_eq!(ids, kept, "{group} cut at {cut}: kept elements were replaced");
            assert_eq!(surface.len(), expected.len());
            for e in pattern.elements() {
                assert_eq!(surface.transform_of(e.id()), Some(e.transform()));
            }
        }
    }
}

#[test]
fn animated_trim_reports_only_the_new_tail() {
    let mut surface = SvgSurface::new(500.0, 100.0);
    let mut pattern = Pattern::new(
        SymmetryGroup::Frieze(FriezeGroup::P1),
        rect_motif(100.0, 50.0),
        Point::ZERO,
        DrawOptions::default(),
    )
    .unwrap();
    let _ = pattern.draw(&mut surface);
    assert_eq!(pattern.elements().len(), 5);
    let tail_start = pattern.elements()[3].id();

    pattern.set_animate(true);
    assert_eq!(pattern.trim_at(&mut surface, tail_start), DrawStatus::Started);
    assert_eq!(surface.len(), 3, "tail removed up front");
    assert_eq!(pattern.elements().len(), 3, "kept prefix is already listed");
    assert_eq!(pattern.trim(&mut surface, 1), DrawStatus::Busy);

    let mut placed = 0;
    while let Some(step) = pattern.step(&mut surface) {
        assert_eq!(step.phase, Phase::AxisX);
        placed += step.placements.len();
    }
    assert_eq!(placed, 2);
    assert_eq!(surface.len(), 5);
}

#[test]
fn contained_mode_stops_before_overflow() {
    let draw = |contain: bool| {
        let mut surface = SvgSurface::new(250.0, 100.0);
        let mut pattern = Pattern::new(
            SymmetryGroup::Frieze(FriezeGroup::P1),
            rect_motif(100.0, 50.0),
            Point::ZERO,
            DrawOptions::default().contained(contain),
        )
        .unwrap();
        let _ = pattern.draw(&mut surface);
        pattern.elements().len()
    };
    assert_eq!(draw(false), 3);
    assert_eq!(draw(true), 2);
}

#[test]
fn element_cap_is_honored() {
    let mut surface = SvgSurface::new(10_000.0, 10_000.0);
    let mut pattern = Pattern::new(
        SymmetryGroup::Wallpaper(WallpaperGroup::P1),
        rect_motif(10.0, 10.0),
        Point::ZERO,
        DrawOptions::default().with_max_elements(50),
    )
    .unwrap();
    let _ = pattern.draw(&mut surface);
    assert!(pattern.elements().len() <= 50);
    assert!(pattern.elements().len() >= 40);
}

#[test_log::test]
fn listeners_hear_about_completions() {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    let mut surface = SvgSurface::new(300.0, 300.0);
    let mut radial =
        RadialPattern::new(RadialConfig::default(), RadialOptions::default().with_seed(4))
            .unwrap();
    radial.set_listener(move |label: &str| {
        assert_eq!(label, "radial");
        seen.set(seen.get() + 1);
    });
    let _ = radial.draw(&mut surface);
    assert_eq!(count.get(), 0, "initial draw is not reported");
    let _ = radial.rotate(&mut surface);
    let _ = radial.redraw(&mut surface);
    assert_eq!(count.get(), 2);

    let mut pattern = Pattern::from_name(
        "spinning-jump",
        rect_motif(30.0, 20.0),
        Point::ZERO,
        DrawOptions::default(),
    )
    .unwrap();
    pattern.set_listener(LogListener);
    let _ = pattern.draw(&mut surface);
    let _ = pattern.redraw(&mut surface);
    assert_eq!(pattern.label(), "frieze:p2mm");
}

#[test]
fn seeded_radial_patterns_match() {
    let config = RadialConfig {
        levels: 3,
        rotations: 6,
        ..RadialConfig::default()
    };
    let draw = || {
        let mut surface = SvgSurface::new(300.0, 300.0);
        let mut p = RadialPattern::new(config, RadialOptions::default().with_seed(99)).unwrap();
        let _ = p.draw(&mut surface);
        (p.motif().unwrap().to_svg(), transforms(p.elements()))
    };
    let (svg_a, ta) = draw();
    let (svg_b, tb) = draw();
    assert_eq!(svg_a, svg_b);
    assert_eq!(ta, tb);
    assert_eq!(ta.len(), 18);
}

#[test]
fn flower_chains_rotations() {
    let config = RadialConfig {
        as_flower: true,
        levels: 7,
        rotations: 5,
        ..RadialConfig::default()
    };
    let mut surface = SvgSurface::new(600.0, 600.0);
    let mut p = RadialPattern::new(config, RadialOptions::default().with_seed(5)).unwrap();
    let _ = p.draw(&mut surface);
    assert_eq!(p.label(), "flower");
    assert_eq!(p.elements().len(), 2 * 5);

    // Each spoke is the previous one turned by a fifth.
    let turn = Affine::rotate_about(std::f64::consts::TAU / 5.0, config.origin);
    for k in 1..5 {
        for l in 0..2 {
            let prev = p.elements()[(k - 1) * 2 + l].transform();
            let this = p.elements()[k * 2 + l].transform();
            assert!(approx_eq(this, turn * prev, 1e-9), "spoke {k} level {l}");
        }
    }
}

#[test]
fn clearing_the_surface_and_redrawing() {
    let mut surface = SvgSurface::new(300.0, 300.0);
    let mut pattern = Pattern::from_name(
        "pgg",
        flag_motif(60.0, 40.0),
        Point::ZERO,
        DrawOptions::default(),
    )
    .unwrap();
    let _ = pattern.draw(&mut surface);
    let count = pattern.elements().len();
    pattern.clear(&mut surface);
    assert!(surface.is_empty());
    assert!(pattern.elements().is_empty());
    let _ = pattern.redraw(&mut surface);
    assert_eq!(pattern.elements().len(), count);
    surface.clear();
    assert_eq!(surface.to_svg().lines().count(), 2);
}
