// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! A backend neutral list of drawing instructions, the kind of thing a canvas or an SVG path
//! consumes.

use super::Renderer;
use crate::SpacefillError;
use ::svg::node::element::path::Data;
use std::f64::consts::PI;
use vector_traits::glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Clockwise arc, angles in radians
    Arc {
        center: DVec2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
}

/// Records instructions instead of drawing them.
///
/// As a [`Renderer`] every polyline becomes a `MoveTo` followed by `LineTo`s. The `curved` flag
/// is not honoured, there is no curve instruction.
#[derive(Debug, Default)]
pub struct InstructionRecorder {
    instructions: Vec<Instruction>,
}

impl InstructionRecorder {
    pub fn move_to(&mut self, p: DVec2) {
        self.instructions.push(Instruction::MoveTo(p));
    }

    pub fn line_to(&mut self, p: DVec2) {
        self.instructions.push(Instruction::LineTo(p));
    }

    pub fn arc(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64) {
        self.instructions.push(Instruction::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    pub fn close_path(&mut self) {
        self.instructions.push(Instruction::ClosePath);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// The instructions as SVG path data.
    ///
    /// An arc starts a new sub-path at its start point: `M start A r r 0 large 1 end`.
    pub fn path_data(&self) -> Data {
        self.instructions
            .iter()
            .fold(Data::new(), |data, instruction| match *instruction {
                Instruction::MoveTo(p) => data.move_to((p.x as f32, p.y as f32)),
                Instruction::LineTo(p) => data.line_to((p.x as f32, p.y as f32)),
                Instruction::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => {
                    let start = center + DVec2::new(start_angle.cos(), start_angle.sin()) * radius;
                    let end = center + DVec2::new(end_angle.cos(), end_angle.sin()) * radius;
                    let large_arc = if end_angle - start_angle > PI { 1.0 } else { 0.0 };
                    data.move_to((start.x as f32, start.y as f32))
                        .elliptical_arc_to((
                            radius as f32,
                            radius as f32,
                            0.0_f32,
                            large_arc as f32,
                            1.0_f32,
                            end.x as f32,
                            end.y as f32,
                        ))
                }
                Instruction::ClosePath => data.close(),
            })
    }
}

impl Renderer for InstructionRecorder {
    fn begin_path(&mut self) -> Result<(), SpacefillError> {
        self.clear();
        Ok(())
    }

    fn emit_polyline(
        &mut self,
        points: &[DVec2],
        closed: bool,
        _curved: bool,
    ) -> Result<(), SpacefillError> {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            rest.iter().for_each(|p| self.line_to(*p));
            if closed {
                self.close_path();
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), SpacefillError> {
        tracing::debug!("recorded {} drawing instructions", self.instructions.len());
        Ok(())
    }
}
