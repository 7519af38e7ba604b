// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

use super::{DOMAIN_MARGIN, RenderConfig};
use crate::{
    SpacefillError,
    render::Renderer,
    ruleset::{RuleSet, SymbolClass},
};
use std::f64::consts::TAU;
use vector_traits::glam::DVec2;

/// Where the turtle is and where it is going
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub position: DVec2,
    /// radians, 0 is along +x and positive angles turn towards +y
    pub heading: f64,
}

/// Walks a rewritten string one symbol at a time, collecting the points of the polyline
/// currently being drawn.
pub struct Turtle<'a> {
    ruleset: &'a RuleSet,
    state: TurtleState,
    /// the length of every step, in canvas units
    step: f64,
    /// radians
    turn: f64,
    curved: bool,
    active: Vec<DVec2>,
    emitted_polylines: usize,
    emitted_points: usize,
}

impl<'a> Turtle<'a> {
    /// A turtle at the rule-set's start position and heading, with the step length of the
    /// effective iteration depth of `config`.
    pub fn new(ruleset: &'a RuleSet, config: &RenderConfig) -> Self {
        let depth = ruleset.depth(config.iterations);
        let domain = config.width.min(config.height) - config.line_width - DOMAIN_MARGIN;
        let start = ruleset.position();
        Self {
            ruleset,
            state: TurtleState {
                position: DVec2::new(
                    start.x * config.width + config.line_width / 2.0,
                    start.y * config.height + config.line_width / 2.0,
                ),
                heading: ruleset.heading().to_radians(),
            },
            step: domain / ruleset.step_divisor(depth),
            turn: ruleset.angle().to_radians(),
            curved: config.curved,
            active: Vec::new(),
            emitted_polylines: 0,
            emitted_points: 0,
        }
    }

    pub fn state(&self) -> TurtleState {
        self.state
    }

    pub fn step_length(&self) -> f64 {
        self.step
    }

    pub fn emitted_polylines(&self) -> usize {
        self.emitted_polylines
    }

    pub fn emitted_points(&self) -> usize {
        self.emitted_points
    }

    /// Apply one symbol of the rewritten string
    pub fn apply<R: Renderer>(
        &mut self,
        symbol: char,
        renderer: &mut R,
    ) -> Result<(), SpacefillError> {
        match self.ruleset.symbols().classify(symbol) {
            SymbolClass::Draw => {
                if self.active.is_empty() {
                    self.active.push(self.state.position);
                }
                self.advance();
                self.active.push(self.state.position);
            }
            SymbolClass::Move => {
                self.advance();
                self.flush(renderer)?;
            }
            SymbolClass::TurnLeft => self.rotate(self.turn),
            SymbolClass::TurnRight => self.rotate(-self.turn),
            SymbolClass::Nop => {}
        }
        Ok(())
    }

    /// Emits whatever is left of the active polyline
    pub fn finish<R: Renderer>(&mut self, renderer: &mut R) -> Result<(), SpacefillError> {
        self.flush(renderer)
    }

    fn advance(&mut self) {
        let (sin, cos) = self.state.heading.sin_cos();
        self.state.position += DVec2::new(cos, sin) * self.step;
    }

    fn rotate(&mut self, angle: f64) {
        self.state.heading += angle % TAU;
    }

    /// A single point is not a segment, so it is dropped instead of emitted.
    fn flush<R: Renderer>(&mut self, renderer: &mut R) -> Result<(), SpacefillError> {
        if self.active.len() > 1 {
            renderer.emit_polyline(&self.active, self.ruleset.closed(), self.curved)?;
            self.emitted_polylines += 1;
            self.emitted_points += self.active.len();
        }
        self.active.clear();
        Ok(())
    }
}
