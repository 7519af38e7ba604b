// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! The renderer side of a render: anything that can receive finished polylines.

pub mod instructions;
pub mod svg;

use crate::SpacefillError;
use itertools::Itertools;
use vector_traits::glam::DVec2;

/// The interface the turtle interpreter draws through.
///
/// A render calls `begin_path` once, `emit_polyline` for every finished polyline (always with at
/// least two points) and finally `present`.
pub trait Renderer {
    /// Start a new drawing, discarding anything drawn by a previous render
    fn begin_path(&mut self) -> Result<(), SpacefillError>;

    fn emit_polyline(
        &mut self,
        points: &[DVec2],
        closed: bool,
        curved: bool,
    ) -> Result<(), SpacefillError>;

    /// The drawing is complete
    fn present(&mut self) -> Result<(), SpacefillError>;
}

/// An ordered run of points drawn without lifting the pen
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<DVec2>,
    pub closed: bool,
    pub curved: bool,
}

impl Polyline {
    /// The segments of the polyline, including the closing one if `closed`
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 2 => Some((*last, *first)),
            _ => None,
        };
        self.points.iter().copied().tuple_windows().chain(closing)
    }

    /// Total length, used to time a stroke animation that walks the path
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }
}

/// A renderer that just keeps the polylines
#[derive(Debug, Default)]
pub struct PathCollector {
    polylines: Vec<Polyline>,
    presented: bool,
}

impl PathCollector {
    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn into_polylines(self) -> Vec<Polyline> {
        self.polylines
    }

    pub fn is_presented(&self) -> bool {
        self.presented
    }

    /// Converts the polylines into a vertex list and an index list where every pair of indices
    /// is one line segment.
    pub fn to_line_chunks(&self) -> (Vec<DVec2>, Vec<usize>) {
        let segment_count: usize = self.polylines.iter().map(|p| p.segments().count()).sum();
        let mut output_vertices = Vec::<DVec2>::with_capacity(segment_count * 2);
        let mut output_indices = Vec::<usize>::with_capacity(segment_count * 2);

        for (p0, p1) in self.polylines.iter().flat_map(Polyline::segments) {
            output_vertices.push(p0);
            output_vertices.push(p1);
            let base_index = output_vertices.len() - 2;
            output_indices.push(base_index);
            output_indices.push(base_index + 1);
        }
        (output_vertices, output_indices)
    }
}

impl Renderer for PathCollector {
    fn begin_path(&mut self) -> Result<(), SpacefillError> {
        self.polylines.clear();
        self.presented = false;
        Ok(())
    }

    fn emit_polyline(
        &mut self,
        points: &[DVec2],
        closed: bool,
        curved: bool,
    ) -> Result<(), SpacefillError> {
        self.polylines.push(Polyline {
            points: points.to_vec(),
            closed,
            curved,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), SpacefillError> {
        self.presented = true;
        Ok(())
    }
}
