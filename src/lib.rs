// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible,
    non_camel_case_types,
    unused_parens,
    non_upper_case_globals,
    unused_qualifications,
    unused_results,
    unused_imports,
    unused_variables,
    bare_trait_objects,
    ellipsis_inclusive_range_patterns,
    elided_lifetimes_in_paths
)]
#![warn(clippy::explicit_into_iter_loop)]

//! An L-system engine for 2D space-filling and fractal curves.
//!
//! A [`RuleSet`](ruleset::RuleSet) is rewritten to the requested depth, the resulting symbol
//! string is walked by a turtle, and the polylines it draws are handed to a
//! [`Renderer`](render::Renderer).
//!
//! Design guideline: the API is stateless. Everything needed to render a curve is passed into
//! the render call, nothing is remembered between calls.
//!
//! ```
//! use spacefill::prelude::*;
//!
//! let koch = RuleSet::by_name("Koch Snowflake")?;
//! let polylines = trace(&koch, &RenderConfig::default().with_iterations(1))?;
//! assert_eq!(polylines.len(), 1);
//! assert_eq!(polylines[0].points.len(), 5);
//! # Ok::<(), SpacefillError>(())
//! ```

pub mod command;
pub mod lsystem;
pub mod render;
pub mod ruleset;

pub mod prelude {
    pub use crate::{
        SpacefillError,
        lsystem::{RenderConfig, RenderStats, execute, rewrite, trace},
        render::{PathCollector, Polyline, Renderer, svg::SvgRenderer},
        ruleset::{Position, RuleSet, RuleSetBuilder, ScaleFactor, SymbolClass, Symbols},
    };
}

#[derive(thiserror::Error, Debug)]
pub enum SpacefillError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Invalid input data: {0}")]
    InvalidParameter(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Unknown rule-set: {0}")]
    UnknownRuleSet(String),

    #[error("Invalid rule-set: {0}")]
    InvalidRuleSet(String),

    #[error("Could not parse L-Systems: {0}")]
    ParseError(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}
