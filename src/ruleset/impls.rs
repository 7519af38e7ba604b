// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! A module containing boilerplate implementations of standard traits such as Default, Display etc etc

use super::{RuleSet, RuleSetBuilder, ScaleFactor, Symbols};
use crate::SpacefillError;
use itertools::Itertools;
use std::{fmt, str::FromStr};

impl Default for Symbols {
    fn default() -> Self {
        Self::new("F", "M")
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleFactor::Constant(c) => write!(f, "scale_constant({c})"),
            ScaleFactor::Exponential {
                coefficient,
                base,
                offset,
            } => write!(f, "scale_exponential({coefficient}, {base}, {offset})"),
            ScaleFactor::Power { exponent } => write!(f, "scale_power({exponent})"),
        }
    }
}

/// Writes the rule-set in the text format accepted by `str::parse::<RuleSet>()`
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name(\"{}\")", self.name)?;
        writeln!(f, "axiom(\"{}\")", self.axiom)?;
        for (id, rule) in self.rules.iter().sorted_by_key(|(id, _)| **id) {
            writeln!(f, "rule(\"{id}\", \"{rule}\")")?;
        }
        writeln!(f, "angle({})", self.angle)?;
        writeln!(f, "heading({})", self.heading)?;
        writeln!(f, "position({}, {})", self.position.x, self.position.y)?;
        if self.closed {
            writeln!(f, "closed()")?;
        }
        writeln!(f, "draw(\"{}\")", self.symbols.draw().iter().collect::<String>())?;
        writeln!(f, "move(\"{}\")", self.symbols.moves().iter().collect::<String>())?;
        writeln!(f, "max_iterations({})", self.max_iterations)?;
        if let Some(scale_factor) = self.scale_factor {
            writeln!(f, "{scale_factor}")?;
        }
        Ok(())
    }
}

impl FromStr for RuleSet {
    type Err = SpacefillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleSetBuilder::default().parse(s)?.build()
    }
}
