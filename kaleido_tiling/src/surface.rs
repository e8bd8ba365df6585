// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surfaces.
//!
//! Patterns keep their own element model and mirror every change onto a
//! [`Surface`]. A surface only stores and renders; it never decides where
//! anything goes.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::{Affine, BezPath, Size};

use crate::element::{Element, ElementId};
use crate::options::Style;

/// Host capability interface for rendering placed elements.
pub trait Surface {
    /// Drawable extent. Replication stops at these edges.
    fn extent(&self) -> Size;

    /// Start rendering `element` at its current transform.
    fn insert(&mut self, element: &Element, style: &Style);

    /// Move a rendered element to a new absolute placement.
    fn set_transform(&mut self, id: ElementId, transform: Affine);

    /// Stop rendering an element. Unknown ids are ignored.
    fn remove(&mut self, id: ElementId);

    /// Remove everything.
    fn clear(&mut self);
}

#[derive(Clone, Debug)]
struct SvgEntry {
    geometry: Arc<BezPath>,
    style: Style,
    transform: Affine,
}

/// In-memory surface that renders to a standalone SVG document.
///
/// ```rust
/// use kurbo::{Point, Rect, Shape};
/// use kaleido_tiling::{DrawOptions, Pattern, SvgSurface};
///
/// let mut surface = SvgSurface::new(300.0, 100.0);
/// let motif = Rect::new(0.0, 0.0, 100.0, 100.0).to_path(0.1);
/// let mut pattern =
///     Pattern::from_name("frieze:p1", motif, Point::ZERO, DrawOptions::default()).unwrap();
/// let _ = pattern.draw(&mut surface);
///
/// assert_eq!(surface.len(), 3);
/// assert!(surface.to_svg().starts_with("<svg"));
/// ```
#[derive(Clone, Debug)]
pub struct SvgSurface {
    size: Size,
    background: Option<String>,
    order: Vec<ElementId>,
    entries: HashMap<ElementId, SvgEntry>,
}

impl SvgSurface {
    /// Create an empty surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            background: None,
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Fill the whole surface with `color` when rendering.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if `id` is rendered.
    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Current placement of `id`.
    pub fn transform_of(&self, id: ElementId) -> Option<Affine> {
        self.entries.get(&id).map(|e| e.transform)
    }

    /// Live element ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().copied()
    }

    /// Render every live element, in insertion order, as one SVG document.
    pub fn to_svg(&self) -> String {
        let Size { width, height } = self.size;
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        if let Some(bg) = &self.background {
            let _ = writeln!(
                out,
                r#"  <rect width="{width}" height="{height}" fill="{}"/>"#,
                escape(bg)
            );
        }
        for id in &self.order {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            let [a, b, c, d, e, f] = entry.transform.as_coeffs();
            let style = &entry.style;
            let _ = writeln!(
                out,
                r#"  <path id="e{}" d="{}" transform="matrix({a} {b} {c} {d} {e} {f})" stroke="{}" fill="{}" stroke-width="{}"/>"#,
                id.get(),
                entry.geometry.to_svg(),
                escape(style.stroke.as_deref().unwrap_or("none")),
                escape(style.fill.as_deref().unwrap_or("none")),
                style.stroke_width,
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

/// Escape a value for use inside a double-quoted attribute.
fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['"', '&', '<']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

impl Surface for SvgSurface {
    fn extent(&self) -> Size {
        self.size
    }

    fn insert(&mut self, element: &Element, style: &Style) {
        let entry = SvgEntry {
            geometry: Arc::clone(element.geometry()),
            style: style.clone(),
            transform: element.transform(),
        };
        if self.entries.insert(element.id(), entry).is_none() {
            self.order.push(element.id());
        }
    }

    fn set_transform(&mut self, id: ElementId, transform: Affine) {
        match self.entries.get_mut(&id) {
            Some(entry) => entry.transform = transform,
            None => log::debug!("set_transform on unknown element {id:?}"),
        }
    }

    fn remove(&mut self, id: ElementId) {
        if self.entries.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}
