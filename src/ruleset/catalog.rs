// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! The built-in curves

use super::{DEFAULT_MAX_ITERATIONS, Position, RuleSet, ScaleFactor, Symbols};
use rustc_hash::FxHashMap;

/// The rule-set used when nothing else is requested
pub const DEFAULT_RULESET: &str = "Hilbert";

fn rules(pairs: &[(char, &str)]) -> FxHashMap<char, String> {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

/// A rule-set with the defaults filled in, the catalog entries below override what they need.
fn base(name: &str, axiom: &str, pairs: &[(char, &str)], angle: f64) -> RuleSet {
    RuleSet {
        name: name.to_string(),
        axiom: axiom.to_string(),
        rules: rules(pairs),
        symbols: Symbols::default(),
        angle,
        closed: false,
        heading: 0.0,
        position: Position::default(),
        scale_factor: None,
        max_iterations: DEFAULT_MAX_ITERATIONS,
    }
}

fn exponential(coefficient: f64, base: f64, offset: f64) -> Option<ScaleFactor> {
    Some(ScaleFactor::Exponential {
        coefficient,
        base,
        offset,
    })
}

/// All the built-in rule-sets, in menu order.
pub fn catalog() -> Vec<RuleSet> {
    vec![
        RuleSet {
            symbols: Symbols::new("FG", "M"),
            max_iterations: 13,
            position: Position::new(1.0 / 2.0, 1.0 / 3.0),
            scale_factor: Some(ScaleFactor::Constant(60.0)),
            ..base("Dragon", "FX", &[('F', "F+G"), ('G', "F-G")], 90.0)
        },
        RuleSet {
            symbols: Symbols::new("AB", "M"),
            max_iterations: 6,
            position: Position::new(1.0 / 2.0, 2.0 / 3.0),
            scale_factor: exponential(2.0, 3.0, 0.0),
            ..base(
                "Gosper",
                "A",
                &[('A', "A-B--B+A++AA+B-"), ('B', "+A-BB--B-A++A+B")],
                60.0,
            )
        },
        RuleSet {
            max_iterations: 8,
            scale_factor: exponential(1.0, 2.0, -1.0),
            ..base(
                "Hilbert",
                "X",
                &[('X', "+YF-XFX-FY+"), ('Y', "-XF+YFY+FX-")],
                90.0,
            )
        },
        RuleSet {
            closed: true,
            max_iterations: 8,
            position: Position::new(0.49, 0.99),
            scale_factor: exponential(4.0, 2.0, -1.0),
            ..base(
                "Kit Wallace",
                "F--XF--F--XF",
                &[('X', "XF+F+XF--F--XF+F+X")],
                45.0,
            )
        },
        RuleSet {
            max_iterations: 8,
            position: Position::new(0.0, 2.0 / 3.0),
            scale_factor: exponential(1.0, 3.0, 0.0),
            ..base("Koch Snowflake", "F", &[('F', "F-F++F-F")], 60.0)
        },
        RuleSet {
            closed: true,
            max_iterations: 6,
            position: Position::new(0.0, 1.0 / 2.0),
            scale_factor: exponential(1.0, 3.0, 0.0),
            ..base("Koch Island", "F-F-F-F", &[('F', "F+F-F-FF+F+F-F")], 90.0)
        },
        RuleSet {
            max_iterations: 8,
            position: Position::new(0.0, 2.0 / 3.0),
            scale_factor: exponential(1.0, 3.0, 0.0),
            ..base("Koch Quadratic", "F", &[('F', "F-F+F+F-F")], 90.0)
        },
        RuleSet {
            max_iterations: 10,
            position: Position::new(1.0 / 3.0, 1.0 / 2.0),
            scale_factor: Some(ScaleFactor::Power { exponent: 2.0 }),
            ..base("Levy", "F", &[('F', "+F--F+")], 45.0)
        },
        RuleSet {
            max_iterations: 5,
            position: Position::new(0.0, 1.0 / 2.0),
            scale_factor: exponential(1.0, 3.0, 0.0),
            ..base("Peano Basic", "F", &[('F', "F+F-F-F-F+F+F+F-F")], 90.0)
        },
        RuleSet {
            max_iterations: 5,
            scale_factor: exponential(1.0, 3.0, -1.0),
            ..base(
                "Peano",
                "X",
                &[
                    ('X', "XFYFX+F+YFXFY-F-XFYFX"),
                    ('Y', "YFXFY-F-XFYFX+F+YFXFY"),
                ],
                90.0,
            )
        },
        RuleSet {
            symbols: Symbols::new("FG", "M"),
            closed: true,
            max_iterations: 8,
            position: Position::new(0.0, 0.9),
            scale_factor: exponential(1.0, 2.0, 0.0),
            ..base(
                "Sierpinski Triangle",
                "F-G-G",
                &[('F', "F-G+F+G-F"), ('G', "GG")],
                120.0,
            )
        },
        RuleSet {
            symbols: Symbols::new("AB", "M"),
            max_iterations: 10,
            position: Position::new(1.0 / 4.0, 1.0 / 2.0),
            scale_factor: exponential(2.0, 2.0, 0.0),
            ..base(
                "Sierpinski Arrowhead",
                "A",
                &[('A', "B-A-B"), ('B', "A+B+A")],
                60.0,
            )
        },
    ]
}
