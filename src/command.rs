// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

//! A stateless, string keyed, command interface. Every call carries all of its configuration,
//! for example:
//!
//! | key          | value                                        |
//! |--------------|----------------------------------------------|
//! | `command`    | `lsystems`, `svg` or `catalog`               |
//! | `ruleset`    | a catalog name, defaults to `Hilbert`        |
//! | `🐢`         | a custom rule-set in text form               |
//! | `iterations` | requested iterations, defaults to 3          |
//! | `width`, `height`, `line_width`, `curved`, `timeout`, `stroke`, `fill`, `output` | |

mod impls;

use crate::{
    SpacefillError,
    lsystem::{RenderConfig, RenderStats, execute},
    render::{PathCollector, svg::SvgRenderer},
    ruleset::{DEFAULT_RULESET, RuleSet, catalog},
};
use itertools::Itertools;
use std::{
    collections::HashMap,
    iter::successors,
    time::{Duration, Instant},
};
use vector_traits::glam::DVec2;

pub type ConfigType = HashMap<String, String>;

/// vertices, indices (two per line segment) and the returned options
pub type CommandResult = (Vec<DVec2>, Vec<usize>, ConfigType);

/// The option holding a custom rule-set in text form
pub const CUSTOM_TURTLE_TAG: &str = "🐢";
/// Set in the returned options when a command failed
pub const ERROR_TAG: &str = "ERROR";
pub const FORMAT_TAG: &str = "mesh.format";
pub const LINE_CHUNKS_FORMAT: &str = "line_chunks";
pub const SVG_TAG: &str = "svg";

trait Options {
    /// Will return an option parsed as a `T`, the default value if it is missing, or an Err
    fn get_mandatory_parsed_option<T: std::str::FromStr>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> Result<T, SpacefillError>;

    /// Will return an option parsed as a `T` or None.
    /// If the option is missing None is returned, if it there but if it can't be parsed an error
    /// will be returned.
    fn get_parsed_option<T: std::str::FromStr>(
        &self,
        key: &str,
    ) -> Result<Option<T>, SpacefillError>;

    /// Returns the &str value of an option, or an Err is it does not exists
    fn get_mandatory_option(&self, key: &str) -> Result<&str, SpacefillError>;

    /// Returns true if the option exists
    fn does_option_exist(&self, key: &str) -> Result<bool, SpacefillError>;
}

fn ruleset_from_config(config: &ConfigType) -> Result<RuleSet, SpacefillError> {
    if config.does_option_exist(CUSTOM_TURTLE_TAG)? {
        config.get_mandatory_option(CUSTOM_TURTLE_TAG)?.parse()
    } else {
        let name = config.get_parsed_option::<String>("ruleset")?;
        RuleSet::by_name(name.as_deref().unwrap_or(DEFAULT_RULESET))
    }
}

fn render_config_from_config(config: &ConfigType) -> Result<RenderConfig, SpacefillError> {
    let default = RenderConfig::default();
    Ok(RenderConfig {
        iterations: config.get_mandatory_parsed_option("iterations", Some(default.iterations))?,
        width: config.get_mandatory_parsed_option("width", Some(default.width))?,
        height: config.get_mandatory_parsed_option("height", Some(default.height))?,
        line_width: config.get_mandatory_parsed_option("line_width", Some(default.line_width))?,
        curved: config.get_mandatory_parsed_option("curved", Some(default.curved))?,
        timeout: config
            .get_parsed_option::<u64>("timeout")?
            .map(Duration::from_secs),
    })
}

fn stats_config(ruleset: &RuleSet, stats: &RenderStats) -> ConfigType {
    let mut return_config = ConfigType::new();
    let _ = return_config.insert("ruleset".to_string(), ruleset.name().to_string());
    let _ = return_config.insert("depth".to_string(), stats.depth.to_string());
    let _ = return_config.insert("symbols".to_string(), stats.symbols.to_string());
    let _ = return_config.insert("polylines".to_string(), stats.polylines.to_string());
    return_config
}

/// Renders the curve as line chunks: two vertices per segment
fn lsystems_command(config: &ConfigType) -> Result<CommandResult, SpacefillError> {
    let ruleset = ruleset_from_config(config)?;
    let render_config = render_config_from_config(config)?;

    let mut collector = PathCollector::default();
    let stats = execute(&ruleset, &render_config, &mut collector)?;
    if collector.polylines().is_empty() {
        return Err(SpacefillError::InvalidParameter(format!(
            "{} did not generate any vertices at {} iterations",
            ruleset.name(),
            render_config.iterations
        )));
    }
    let (output_vertices, output_indices) = collector.to_line_chunks();
    let length: f64 = collector.polylines().iter().map(|p| p.length()).sum();

    let mut return_config = stats_config(&ruleset, &stats);
    let _ = return_config.insert(FORMAT_TAG.to_string(), LINE_CHUNKS_FORMAT.to_string());
    let _ = return_config.insert("length".to_string(), length.to_string());
    Ok((output_vertices, output_indices, return_config))
}

/// Renders the curve as an SVG document, returned under the `svg` key and optionally saved to
/// the `output` path.
fn svg_command(config: &ConfigType) -> Result<CommandResult, SpacefillError> {
    let ruleset = ruleset_from_config(config)?;
    let render_config = render_config_from_config(config)?;
    let stroke = config.get_parsed_option::<String>("stroke")?;
    let fill = config.get_parsed_option::<String>("fill")?;

    let mut renderer = SvgRenderer::from_config(&render_config)
        .with_stroke(stroke.as_deref().unwrap_or("#000000"))
        .with_fill(fill.as_deref().unwrap_or("none"));
    let stats = execute(&ruleset, &render_config, &mut renderer)?;

    let mut return_config = stats_config(&ruleset, &stats);
    if let Some(output) = config.get_parsed_option::<String>("output")? {
        renderer.save(&output)?;
        tracing::info!("saved {} as {}", ruleset.name(), output);
        let _ = return_config.insert("output".to_string(), output);
    }
    let _ = return_config.insert(SVG_TAG.to_string(), renderer.to_svg_string()?);
    Ok((Vec::new(), Vec::new(), return_config))
}

/// Lists the built-in rule-sets: `rulesets` holds the names, in order and comma separated, and
/// every name maps to its maximum number of iterations.
fn catalog_command() -> CommandResult {
    let rulesets = catalog();
    let mut return_config: ConfigType = rulesets
        .iter()
        .map(|r| (r.name().to_string(), r.max_iterations().to_string()))
        .collect();
    let _ = return_config.insert(
        "rulesets".to_string(),
        rulesets.iter().map(RuleSet::name).join(","),
    );
    (Vec::new(), Vec::new(), return_config)
}

/// This is the main entry point, all commands will be routed through this API
pub fn process_command(config: ConfigType) -> Result<CommandResult, SpacefillError> {
    let now = Instant::now();
    let rv = match config.get_mandatory_option("command")? {
        "lsystems" => lsystems_command(&config)?,
        "svg" => svg_command(&config)?,
        "catalog" => catalog_command(),
        illegal_command => Err(SpacefillError::InvalidParameter(format!(
            "Invalid command:{illegal_command}"
        )))?,
    };
    tracing::info!("process_command() duration: {:?}", now.elapsed());
    Ok(rv)
}

/// Like [`process_command`], but any error is logged and returned as an `ERROR` option instead.
pub fn process_command_error_handler(config: ConfigType) -> CommandResult {
    match process_command(config) {
        Ok(rv) => rv,
        Err(err) => {
            for cause in successors(Some(&err as &dyn std::error::Error), |e| e.source()) {
                tracing::error!("Caused by: {:?}", cause);
            }
            let mut config = ConfigType::new();
            let _ = config.insert(ERROR_TAG.to_string(), err.to_string());
            (Vec::new(), Vec::new(), config)
        }
    }
}
