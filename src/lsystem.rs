// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! Rewriting and rendering of rule-sets.
//!
//! A render is `idle -> rewriting -> interpreting -> idle`; nothing survives between calls, so
//! changing the iteration count, the rule-set or the style simply means calling [`execute`]
//! again with another [`RenderConfig`].

mod turtle;

use crate::{
    SpacefillError,
    render::{PathCollector, Polyline, Renderer},
    ruleset::RuleSet,
};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

pub use turtle::{Turtle, TurtleState};

/// Subtracted from the smallest canvas side, together with the line width, to get the drawing
/// domain.
pub const DOMAIN_MARGIN: f64 = 2.0;

/// How often, in symbols, the interpreter checks the timeout
const TIMEOUT_CHECK_INTERVAL: usize = 1000;

/// Everything a render needs besides the rule-set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Requested iterations, capped by [`RuleSet::max_iterations`]. The step length is computed
    /// from the capped depth too, so asking for more than the cap draws the capped curve unchanged.
    pub iterations: u32,
    pub width: f64,
    pub height: f64,
    pub line_width: f64,
    /// ask the renderer to smooth the polylines
    pub curved: bool,
    pub timeout: Option<Duration>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            width: 600.0,
            height: 600.0,
            line_width: 4.0,
            curved: false,
            timeout: None,
        }
    }
}

impl RenderConfig {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_curved(mut self, curved: bool) -> Self {
        self.curved = curved;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn validate(&self) -> Result<(), SpacefillError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SpacefillError::InvalidParameter(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(SpacefillError::InvalidParameter(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            return Err(SpacefillError::InvalidParameter(format!(
                "line_width can't be negative, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

/// What a render produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// the number of rewrite passes performed
    pub depth: u32,
    /// the length of the rewritten string, in symbols
    pub symbols: usize,
    /// emitted polylines
    pub polylines: usize,
    /// points in the emitted polylines
    pub points: usize,
}

/// One rewrite pass: every symbol is replaced by its rule, symbols without a rule are kept.
fn rewrite_pass(input: &str, rules: &FxHashMap<char, String>) -> String {
    let mut rv = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        match rules.get(&c) {
            Some(rule) => rv.push_str(rule),
            None => rv.push(c),
        }
    }
    rv
}

/// Expands the rules over the axiom `iterations` times
pub fn rewrite(axiom: &str, rules: &FxHashMap<char, String>, iterations: u32) -> String {
    (0..iterations).fold(axiom.to_string(), |rv, _| rewrite_pass(&rv, rules))
}

impl RuleSet {
    /// Expands the rules over the axiom `min(iterations, max_iterations)` times
    pub fn rewrite(&self, iterations: u32) -> String {
        rewrite(self.axiom(), self.rules(), self.depth(iterations))
    }

    /// Same as [`RuleSet::rewrite`], but gives up if a pass would start after `deadline`.
    pub fn rewrite_with_deadline(
        &self,
        iterations: u32,
        deadline: Option<Instant>,
    ) -> Result<String, SpacefillError> {
        let depth = self.depth(iterations);
        let mut rv = self.axiom().to_string();
        for i in 0..depth {
            if deadline.is_some_and(|deadline| Instant::now() > deadline) {
                return Err(SpacefillError::Timeout(format!(
                    "while processing iteration {i}/{depth} of {}",
                    self.name()
                )));
            }
            rv = rewrite_pass(&rv, self.rules());
        }
        tracing::debug!(
            "rewrote {} to depth {} ({} symbols)",
            self.name(),
            depth,
            rv.len()
        );
        Ok(rv)
    }
}

/// Rewrites the rule-set and walks the turtle over the result, handing every finished polyline
/// to `renderer`.
pub fn execute<R: Renderer>(
    ruleset: &RuleSet,
    config: &RenderConfig,
    renderer: &mut R,
) -> Result<RenderStats, SpacefillError> {
    config.validate()?;
    let deadline = config.timeout.map(|timeout| Instant::now() + timeout);

    renderer.begin_path()?;
    let path = ruleset.rewrite_with_deadline(config.iterations, deadline)?;
    let symbol_count = path.chars().count();

    let mut turtle = Turtle::new(ruleset, config);
    for (i, symbol) in path.chars().enumerate() {
        if i % TIMEOUT_CHECK_INTERVAL == 0 && deadline.is_some_and(|d| Instant::now() > d) {
            return Err(SpacefillError::Timeout(format!(
                "while processing step {i}/{symbol_count} of {}",
                ruleset.name()
            )));
        }
        turtle.apply(symbol, renderer)?;
    }
    turtle.finish(renderer)?;
    renderer.present()?;

    Ok(RenderStats {
        depth: ruleset.depth(config.iterations),
        symbols: symbol_count,
        polylines: turtle.emitted_polylines(),
        points: turtle.emitted_points(),
    })
}

/// Renders into a [`PathCollector`] and returns the polylines
pub fn trace(ruleset: &RuleSet, config: &RenderConfig) -> Result<Vec<Polyline>, SpacefillError> {
    let mut collector = PathCollector::default();
    let _ = execute(ruleset, config, &mut collector)?;
    Ok(collector.into_polylines())
}
