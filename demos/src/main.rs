// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render Kaleido patterns to SVG from the command line.
//!
//! ```text
//! kaleido pattern pmg --width 600 --height 400 > pmg.svg
//! kaleido radial --rotations 12 --levels 3 --seed 7 -o rosette.svg
//! kaleido groups
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kaleido_tiling::{
    DrawOptions, DrawStatus, FriezeGroup, LogListener, Pattern, RadialConfig, RadialOptions,
    RadialPattern, Step, Style, SvgSurface, WallpaperGroup,
};
use kurbo::{BezPath, Point};

mod logging;

use logging::{LoggingConfig, init_logging};

#[derive(Parser)]
#[command(name = "kaleido")]
#[command(about = "Render symmetry patterns to SVG", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `debug` or `kaleido_tiling=trace`
    #[arg(long, global = true)]
    log: Option<String>,

    /// Write SVG here instead of stdout
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    out: Option<PathBuf>,

    /// Run step by step, logging each step as a host animation loop would
    #[arg(long, global = true)]
    animate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile a motif with a frieze or wallpaper group
    Pattern {
        /// Group name: `pmg`, `frieze:p1`, `spinning-jump`, ...
        group: String,

        /// Surface width
        #[arg(long, default_value_t = 600.0)]
        width: f64,

        /// Surface height
        #[arg(long, default_value_t = 400.0)]
        height: f64,

        /// Motif width
        #[arg(long, default_value_t = 60.0)]
        motif_width: f64,

        /// Motif height
        #[arg(long, default_value_t = 40.0)]
        motif_height: f64,

        /// Stop before an instance would cross the surface edge
        #[arg(long)]
        contain: bool,

        /// Trim at this element and regrow afterwards
        #[arg(long)]
        trim: Option<usize>,
    },

    /// Build a circular tessellation from a random slice motif
    Radial {
        /// Surface size; the pattern is centred on it
        #[arg(long, default_value_t = 400.0)]
        size: f64,

        /// Number of spokes
        #[arg(long, default_value_t = 8)]
        rotations: u32,

        /// Levels per spoke
        #[arg(long, default_value_t = 3)]
        levels: u32,

        /// Slices per motif
        #[arg(long, default_value_t = 3)]
        slices: u32,

        /// Motif seed; omit for a fresh motif every run
        #[arg(long)]
        seed: Option<u64>,

        /// Draw each leg independently instead of mirrored
        #[arg(long)]
        asymmetric: bool,

        /// Fold levels towards the centre
        #[arg(long)]
        flower: bool,

        /// Turn the finished pattern by one spoke this many times
        #[arg(long, default_value_t = 0)]
        turns: u32,
    },

    /// List the group catalog
    Groups,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        filter: cli.log.clone(),
    });

    let svg = match cli.command {
        Commands::Pattern {
            group,
            width,
            height,
            motif_width,
            motif_height,
            contain,
            trim,
        } => {
            let mut surface = SvgSurface::new(width, height).with_background("white");
            let options = DrawOptions::default()
                .with_style(Style {
                    fill: Some("#8ecae6".into()),
                    ..Style::default()
                })
                .animated(cli.animate)
                .contained(contain);
            let mut pattern = Pattern::from_name(
                &group,
                flag(motif_width, motif_height),
                Point::ZERO,
                options,
            )
            .with_context(|| format!("cannot build pattern `{group}`"))?;
            pattern.set_listener(LogListener);

            let status = pattern.draw(&mut surface);
            drive(status, || pattern.step(&mut surface));
            if let Some(index) = trim {
                let status = pattern.trim(&mut surface, index);
                drive(status, || pattern.step(&mut surface));
            }
            log::info!("{}: {} elements", pattern.label(), pattern.elements().len());
            surface.to_svg()
        }
        Commands::Radial {
            size,
            rotations,
            levels,
            slices,
            seed,
            asymmetric,
            flower,
            turns,
        } => {
            let mut surface = SvgSurface::new(size, size).with_background("white");
            let config = RadialConfig {
                origin: Point::new(size / 2.0, size / 2.0),
                diameter: size * 0.9,
                levels,
                rotations,
                slices_count: slices,
                with_reflection: !asymmetric,
                as_flower: flower,
            };
            let mut options = RadialOptions::default().animated(cli.animate);
            options.seed = seed;
            let mut pattern =
                RadialPattern::new(config, options).context("cannot build radial pattern")?;
            pattern.set_listener(LogListener);

            let status = pattern.draw(&mut surface);
            drive(status, || pattern.step(&mut surface));
            for _ in 0..turns {
                let status = pattern.rotate(&mut surface);
                drive(status, || pattern.step(&mut surface));
            }
            log::info!("{}: {} elements", pattern.label(), pattern.elements().len());
            surface.to_svg()
        }
        Commands::Groups => {
            for g in FriezeGroup::ALL {
                println!("frieze:{:<6} {}", g.name(), g.nickname());
            }
            for g in WallpaperGroup::ALL {
                println!("{}", g.name());
            }
            return Ok(());
        }
    };

    match cli.out {
        Some(path) => {
            fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        }
        None => print!("{svg}"),
    }
    Ok(())
}

/// Host loop: pump steps until the operation finishes.
fn drive(status: DrawStatus, mut step: impl FnMut() -> Option<Step>) {
    if status != DrawStatus::Started {
        log::debug!("operation {status:?}");
        return;
    }
    let mut total = Duration::ZERO;
    let mut count = 0_usize;
    while let Some(step) = step() {
        log::debug!(
            "{:?}: {} placements over {:?}",
            step.phase,
            step.placements.len(),
            step.duration
        );
        total += step.duration;
        count += 1;
    }
    log::info!("{count} steps, {total:?} of animation");
}

/// An asymmetric pennant, so mirrors and turns are visible in the output.
fn flag(width: f64, height: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((width, 0.0));
    path.quad_to((width * 0.4, height * 0.2), (width * 0.25, height * 0.45));
    path.line_to((width * 0.25, height));
    path.line_to((0.0, height));
    path.close_path();
    path
}
