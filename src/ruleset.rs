// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! Grammar definitions: the axiom, the production rules and everything the turtle needs to know
//! in order to draw the rewritten string.

mod catalog;
mod impls;
mod parse;
#[cfg(test)]
mod tests;

use crate::SpacefillError;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub use catalog::{DEFAULT_RULESET, catalog};

/// The iteration cap of a rule-set that does not state its own.
pub const DEFAULT_MAX_ITERATIONS: u32 = 6;

/// Step length divisor as a function of the iteration depth.
///
/// The drawing domain is divided by this value, so every segment of a render shares the same
/// length and the curve stays inside the canvas regardless of depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleFactor {
    /// `c`
    Constant(f64),
    /// `coefficient * base^depth + offset`
    Exponential {
        coefficient: f64,
        base: f64,
        offset: f64,
    },
    /// `depth^exponent`
    Power { exponent: f64 },
}

impl ScaleFactor {
    pub fn evaluate(&self, depth: u32) -> f64 {
        match *self {
            ScaleFactor::Constant(c) => c,
            ScaleFactor::Exponential {
                coefficient,
                base,
                offset,
            } => coefficient * base.powf(depth as f64) + offset,
            ScaleFactor::Power { exponent } => (depth as f64).powf(exponent),
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            ScaleFactor::Constant(c) => c.is_finite(),
            ScaleFactor::Exponential {
                coefficient,
                base,
                offset,
            } => coefficient.is_finite() && base.is_finite() && offset.is_finite(),
            ScaleFactor::Power { exponent } => exponent.is_finite(),
        }
    }
}

/// Fractional start position, `(0,0)` is the top left corner and `(1,1)` the bottom right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the turtle does when it reads a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    /// step forward with the pen down
    Draw,
    /// step forward with the pen up, ending the current polyline
    Move,
    /// `+`
    TurnLeft,
    /// `-`
    TurnRight,
    Nop,
}

/// The per rule-set classification of drawing and moving symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbols {
    draw: SmallVec<[char; 4]>,
    moves: SmallVec<[char; 4]>,
}

impl Symbols {
    pub fn new(draw: &str, moves: &str) -> Self {
        Self {
            draw: draw.chars().filter(|c| !c.is_whitespace()).collect(),
            moves: moves.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// Draw symbols take precedence over move symbols, `+` and `-` can't be redefined.
    pub fn classify(&self, symbol: char) -> SymbolClass {
        match symbol {
            '+' => SymbolClass::TurnLeft,
            '-' => SymbolClass::TurnRight,
            c if self.draw.contains(&c) => SymbolClass::Draw,
            c if self.moves.contains(&c) => SymbolClass::Move,
            _ => SymbolClass::Nop,
        }
    }

    pub fn draw(&self) -> &[char] {
        &self.draw
    }

    pub fn moves(&self) -> &[char] {
        &self.moves
    }
}

/// An immutable grammar definition. Use [`RuleSetBuilder`], [`RuleSet::by_name`] or
/// `str::parse` to get one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    name: String,
    axiom: String,
    rules: FxHashMap<char, String>,
    symbols: Symbols,
    /// degrees
    angle: f64,
    closed: bool,
    /// degrees
    heading: f64,
    position: Position,
    scale_factor: Option<ScaleFactor>,
    max_iterations: u32,
}

impl RuleSet {
    /// Look up one of the built-in rule-sets
    pub fn by_name(name: &str) -> Result<RuleSet, SpacefillError> {
        catalog()
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SpacefillError::UnknownRuleSet(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &FxHashMap<char, String> {
        &self.rules
    }

    /// The replacement of `symbol`, if there is one
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// The turning angle in degrees
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    /// The initial heading in degrees
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn scale_factor(&self) -> Option<ScaleFactor> {
        self.scale_factor
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The number of rewrite passes actually performed for a requested iteration count
    pub fn depth(&self, iterations: u32) -> u32 {
        iterations.min(self.max_iterations)
    }

    /// The divisor of the drawing domain at `depth`.
    ///
    /// Falls back to `depth` when the scale factor is absent, zero or not finite, and to `1.0`
    /// when `depth` is zero as well.
    pub fn step_divisor(&self, depth: u32) -> f64 {
        self.scale_factor
            .map(|s| s.evaluate(depth))
            .filter(|f| f.is_finite() && *f != 0.0)
            .unwrap_or(if depth == 0 { 1.0 } else { depth as f64 })
    }
}

/// Collects the parts of a [`RuleSet`] and validates them.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    name: Option<String>,
    axiom: String,
    rules: FxHashMap<char, String>,
    draw: Option<String>,
    moves: Option<String>,
    angle: Option<f64>,
    closed: bool,
    heading: f64,
    position: Position,
    scale_factor: Option<ScaleFactor>,
    max_iterations: Option<u32>,
}

fn remove_spaces(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Quoted strings in the text format can't hold a `"` or span lines
fn confirm_quotable(what: &str, text: &str) -> Result<(), SpacefillError> {
    if text.contains(['"', '\n']) {
        return Err(SpacefillError::InvalidRuleSet(format!(
            "{what} can't contain '\"' or a line break, got {text:?}"
        )));
    }
    Ok(())
}

fn confirm_finite(what: &str, value: f64) -> Result<f64, SpacefillError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SpacefillError::InvalidRuleSet(format!(
            "{what} must be finite, got {value}"
        )))
    }
}

impl RuleSetBuilder {
    pub fn set_name(&mut self, name: &str) -> Result<&mut Self, SpacefillError> {
        let name = name.trim();
        confirm_quotable("The name", name)?;
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn add_axiom(&mut self, axiom: &str) -> Result<&mut Self, SpacefillError> {
        if !self.axiom.is_empty() {
            return Err(SpacefillError::InvalidRuleSet(format!(
                "already contains an axiom {}",
                self.axiom
            )));
        }
        let axiom = remove_spaces(axiom);
        confirm_quotable("The axiom", &axiom)?;
        if axiom.is_empty() {
            return Err(SpacefillError::InvalidRuleSet(
                "The axiom can't be empty".to_string(),
            ));
        }
        self.axiom = axiom;
        Ok(self)
    }

    pub fn add_rule(&mut self, rule_id: char, rule: &str) -> Result<&mut Self, SpacefillError> {
        if rule_id.is_whitespace() || rule_id == '"' {
            return Err(SpacefillError::InvalidRuleSet(format!(
                "A rule id can't be white space or '\"', got {rule_id:?}"
            )));
        }
        let cleaned_rule = remove_spaces(rule);
        confirm_quotable("A rule", &cleaned_rule)?;
        if cleaned_rule.is_empty() {
            return Err(SpacefillError::InvalidRuleSet(format!(
                "Rule too short {rule_id}"
            )));
        }
        if self.rules.contains_key(&rule_id) {
            return Err(SpacefillError::InvalidRuleSet(format!(
                "Rule {rule_id} overwriting previous rule"
            )));
        }
        let _ = self.rules.insert(rule_id, cleaned_rule);
        Ok(self)
    }

    /// The turning angle, in degrees
    pub fn set_angle(&mut self, degrees: f64) -> Result<&mut Self, SpacefillError> {
        self.angle = Some(confirm_finite("angle", degrees)?);
        Ok(self)
    }

    /// The initial heading, in degrees
    pub fn set_heading(&mut self, degrees: f64) -> Result<&mut Self, SpacefillError> {
        self.heading = confirm_finite("heading", degrees)?;
        Ok(self)
    }

    pub fn set_position(&mut self, x: f64, y: f64) -> Result<&mut Self, SpacefillError> {
        self.position = Position::new(
            confirm_finite("position.x", x)?,
            confirm_finite("position.y", y)?,
        );
        Ok(self)
    }

    pub fn set_closed(&mut self, closed: bool) -> Result<&mut Self, SpacefillError> {
        self.closed = closed;
        Ok(self)
    }

    pub fn set_draw_symbols(&mut self, symbols: &str) -> Result<&mut Self, SpacefillError> {
        let symbols = remove_spaces(symbols);
        confirm_quotable("The draw symbols", &symbols)?;
        self.draw = Some(symbols);
        Ok(self)
    }

    pub fn set_move_symbols(&mut self, symbols: &str) -> Result<&mut Self, SpacefillError> {
        let symbols = remove_spaces(symbols);
        confirm_quotable("The move symbols", &symbols)?;
        self.moves = Some(symbols);
        Ok(self)
    }

    pub fn set_scale_factor(
        &mut self,
        scale_factor: ScaleFactor,
    ) -> Result<&mut Self, SpacefillError> {
        if !scale_factor.is_finite() {
            return Err(SpacefillError::InvalidRuleSet(format!(
                "The scale factor must be finite, got {scale_factor}"
            )));
        }
        self.scale_factor = Some(scale_factor);
        Ok(self)
    }

    pub fn set_max_iterations(&mut self, n: u32) -> Result<&mut Self, SpacefillError> {
        if n == 0 {
            return Err(SpacefillError::InvalidRuleSet(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        self.max_iterations = Some(n);
        Ok(self)
    }

    pub fn build(&self) -> Result<RuleSet, SpacefillError> {
        if self.axiom.is_empty() {
            return Err(SpacefillError::InvalidRuleSet(
                "Missing axiom".to_string(),
            ));
        }
        let angle = self
            .angle
            .ok_or_else(|| SpacefillError::InvalidRuleSet("Missing angle".to_string()))?;
        let default_symbols = Symbols::default();
        let symbols = Symbols {
            draw: match &self.draw {
                Some(draw) => draw.chars().collect(),
                None => default_symbols.draw,
            },
            moves: match &self.moves {
                Some(moves) => moves.chars().collect(),
                None => default_symbols.moves,
            },
        };
        Ok(RuleSet {
            name: self.name.clone().unwrap_or_else(|| "custom".to_string()),
            axiom: self.axiom.clone(),
            rules: self.rules.clone(),
            symbols,
            angle,
            closed: self.closed,
            heading: self.heading,
            position: self.position,
            scale_factor: self.scale_factor,
            max_iterations: self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
        })
    }
}
