// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

use super::{ConfigType, Options};
use crate::SpacefillError;
use std::str::FromStr;

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, SpacefillError> {
    value.trim().parse().map_err(|_| {
        SpacefillError::InvalidParameter(format!(
            "Invalid value for parameter {{\"{key}\"}}: {{\"{value}\"}}"
        ))
    })
}

impl Options for ConfigType {
    fn get_mandatory_parsed_option<T: FromStr>(
        &self,
        key: &str,
        default: Option<T>,
    ) -> Result<T, SpacefillError> {
        match (self.get(key), default) {
            // "True" from a python front end is still a bool
            (Some(v), _) => parse_value(key, &v.to_lowercase()),
            (None, Some(default_value)) => Ok(default_value),
            (None, None) => Err(SpacefillError::MissingParameter(format!(
                "The mandatory parameter \"{key}\" was missing"
            ))),
        }
    }

    fn get_parsed_option<T: FromStr>(&self, key: &str) -> Result<Option<T>, SpacefillError> {
        self.get(key).map(|v| parse_value(key, v)).transpose()
    }

    fn get_mandatory_option(&self, key: &str) -> Result<&str, SpacefillError> {
        self.get(key).map(String::as_str).ok_or_else(|| {
            SpacefillError::MissingParameter(format!("The parameter {{\"{key}\"}} was missing"))
        })
    }

    fn does_option_exist(&self, key: &str) -> Result<bool, SpacefillError> {
        Ok(self.contains_key(key))
    }
}
