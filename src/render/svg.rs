// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! Renders polylines into an SVG document, one `<path>` per polyline.

use super::Renderer;
use crate::{SpacefillError, lsystem::RenderConfig};
use ::svg::{
    Document,
    node::element::{Path, path::Data},
};
use vector_traits::glam::DVec2;

pub struct SvgRenderer {
    width: f64,
    height: f64,
    line_width: f64,
    stroke: String,
    fill: String,
    paths: Vec<Path>,
    document: Option<Document>,
}

fn xy(p: DVec2) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Straight segments through every point
fn polyline_data(points: &[DVec2]) -> Data {
    let mut data = Data::new().move_to(xy(points[0]));
    for p in &points[1..] {
        data = data.line_to(xy(*p));
    }
    data
}

/// Quadratic segments using the points as control points and the midpoints between them as
/// end points. The first and last point are kept.
fn smooth_data(points: &[DVec2]) -> Data {
    let mut data = Data::new().move_to(xy(points[0]));
    for window in points[1..].windows(2) {
        let (control, next) = (window[0], window[1]);
        let (cx, cy) = xy(control);
        let (mx, my) = xy((control + next) * 0.5);
        data = data.quadratic_curve_to((cx, cy, mx, my));
    }
    if let Some(last) = points.last() {
        data = data.line_to(xy(*last));
    }
    data
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64, line_width: f64) -> Self {
        Self {
            width,
            height,
            line_width,
            stroke: "#000000".to_string(),
            fill: "none".to_string(),
            paths: Vec::new(),
            document: None,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.width, config.height, config.line_width)
    }

    pub fn with_stroke(mut self, stroke: &str) -> Self {
        self.stroke = stroke.to_string();
        self
    }

    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    /// The finished document, available after `present`
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    fn presented_document(&self) -> Result<&Document, SpacefillError> {
        self.document.as_ref().ok_or_else(|| {
            SpacefillError::InvalidParameter("The SVG document has not been presented".to_string())
        })
    }

    pub fn to_svg_string(&self) -> Result<String, SpacefillError> {
        Ok(self.presented_document()?.to_string())
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), SpacefillError> {
        ::svg::save(path, self.presented_document()?)?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn begin_path(&mut self) -> Result<(), SpacefillError> {
        self.paths.clear();
        self.document = None;
        Ok(())
    }

    fn emit_polyline(
        &mut self,
        points: &[DVec2],
        closed: bool,
        curved: bool,
    ) -> Result<(), SpacefillError> {
        if points.len() < 2 {
            return Err(SpacefillError::InvalidParameter(format!(
                "A polyline needs at least two points, got {}",
                points.len()
            )));
        }
        let mut data = if curved && points.len() > 2 {
            smooth_data(points)
        } else {
            polyline_data(points)
        };
        if closed {
            data = data.close();
        }
        self.paths.push(
            Path::new()
                .set("fill", self.fill.as_str())
                .set("stroke", self.stroke.as_str())
                .set("stroke-width", self.line_width.to_string())
                .set("stroke-linecap", "round")
                .set("stroke-linejoin", "round")
                .set("d", data),
        );
        Ok(())
    }

    fn present(&mut self) -> Result<(), SpacefillError> {
        let document = std::mem::take(&mut self.paths).into_iter().fold(
            Document::new()
                .set("width", self.width.to_string())
                .set("height", self.height.to_string())
                .set("viewBox", format!("0 0 {} {}", self.width, self.height)),
            |document, path| document.add(path),
        );
        self.document = Some(document);
        Ok(())
    }
}
