// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

use super::{RuleSetBuilder, ScaleFactor};
use crate::SpacefillError;
use logos::Logos;

#[derive(Logos, Debug, PartialEq)]
enum ParseToken {
    #[token("name")]
    Name,

    #[token("axiom")]
    Axiom,

    #[token("rule")]
    Rule,

    #[token("angle")]
    Angle,

    #[token("heading")]
    Heading,

    #[token("position")]
    Position,

    #[token("closed")]
    Closed,

    #[token("draw")]
    Draw,

    #[token("move")]
    Move,

    #[token("max_iterations")]
    MaxIterations,

    #[token("scale_constant")]
    ScaleConstant,

    #[token("scale_exponential")]
    ScaleExponential,

    #[token("scale_power")]
    ScalePower,

    #[token("\n")]
    Eol,

    #[regex("-?[0-9]+(\\.[0-9]+)?")]
    Number,

    #[regex(r#""[^"\n]*""#)]
    QuotedText,

    #[regex(r"[ \t\r\f(),;]+", logos::skip)]
    Skip,

    /// `#` to the end of the line, unless inside quotes
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
}

/// Statements waiting for more arguments
#[derive(Debug, PartialEq)]
enum ParseState {
    Start,
    Name,
    Axiom,
    Rule(Option<char>),
    Angle,
    Heading,
    Position(Option<f64>),
    Draw,
    Move,
    MaxIterations,
    ScaleConstant,
    ScaleExponential(Option<f64>, Option<f64>),
    ScalePower,
}

impl RuleSetBuilder {
    /// Sets the axiom, rules and turtle parameters from a text string.
    ///
    /// One statement per line, `#` starts a comment:
    /// ```text
    /// name("Koch Snowflake")
    /// axiom("F")
    /// rule("F", "F-F++F-F")
    /// angle(60)
    /// position(0, 0.6667)
    /// max_iterations(8)
    /// scale_exponential(1, 3, 0) # 3^i
    /// ```
    pub fn parse(&mut self, text: &str) -> Result<&mut Self, SpacefillError> {
        tracing::debug!("Will try to parse rule-set: {:?}", text);

        let mut lex = ParseToken::lexer(text);
        let mut state = ParseState::Start;
        let mut line = 1_usize;

        while let Some(token) = lex.next() {
            let token = token.map_err(|_| {
                SpacefillError::ParseError(format!(
                    "Bad token: {:?} at line {line}",
                    lex.slice()
                ))
            })?;

            // a keyword may only start a new statement
            if !matches!(
                token,
                ParseToken::QuotedText
                    | ParseToken::Number
                    | ParseToken::Eol
                    | ParseToken::Skip
                    | ParseToken::Comment
            ) && state != ParseState::Start
            {
                return Err(SpacefillError::ParseError(format!(
                    "Expected to be in Start state, was in state:{state:?} when reading:{} at line {line}.",
                    lex.slice()
                )));
            }

            state = match token {
                ParseToken::Name => ParseState::Name,
                ParseToken::Axiom => ParseState::Axiom,
                ParseToken::Rule => ParseState::Rule(None),
                ParseToken::Angle => ParseState::Angle,
                ParseToken::Heading => ParseState::Heading,
                ParseToken::Position => ParseState::Position(None),
                ParseToken::Draw => ParseState::Draw,
                ParseToken::Move => ParseState::Move,
                ParseToken::MaxIterations => ParseState::MaxIterations,
                ParseToken::ScaleConstant => ParseState::ScaleConstant,
                ParseToken::ScaleExponential => ParseState::ScaleExponential(None, None),
                ParseToken::ScalePower => ParseState::ScalePower,
                ParseToken::Closed => {
                    let _ = self.set_closed(true)?;
                    ParseState::Start
                }
                ParseToken::Eol => {
                    if state != ParseState::Start {
                        return Err(SpacefillError::ParseError(format!(
                            "Incomplete statement {state:?} at line {line}"
                        )));
                    }
                    line += 1;
                    continue;
                }
                ParseToken::QuotedText => {
                    let text: &str = &lex.slice()[1..lex.slice().len() - 1];
                    match state {
                        ParseState::Name => {
                            let _ = self.set_name(text)?;
                        }
                        ParseState::Axiom => {
                            let _ = self.add_axiom(text)?;
                        }
                        ParseState::Rule(None) => {
                            let mut chars = text.chars();
                            let rule_id = match (chars.next(), chars.next()) {
                                (Some(c), None) => c,
                                _ => {
                                    return Err(SpacefillError::ParseError(format!(
                                        "Rule id must be one single char, got '{text}' at line {line}"
                                    )));
                                }
                            };
                            state = ParseState::Rule(Some(rule_id));
                            continue;
                        }
                        ParseState::Rule(Some(rule_id)) => {
                            tracing::debug!("Got .add_rule('{}', \"{}\")", rule_id, text);
                            let _ = self.add_rule(rule_id, text)?;
                        }
                        ParseState::Draw => {
                            let _ = self.set_draw_symbols(text)?;
                        }
                        ParseState::Move => {
                            let _ = self.set_move_symbols(text)?;
                        }
                        _ => {
                            return Err(SpacefillError::ParseError(format!(
                                "Bad state for QuotedText:{state:?} at line {line}"
                            )));
                        }
                    }
                    ParseState::Start
                }
                ParseToken::Number => {
                    let value = lex.slice().parse::<f64>().map_err(|e| {
                        SpacefillError::ParseError(format!(
                            "Could not parse number :{} at line {line}. {e:?}",
                            lex.slice()
                        ))
                    })?;
                    match state {
                        ParseState::Angle => {
                            let _ = self.set_angle(value)?;
                            ParseState::Start
                        }
                        ParseState::Heading => {
                            let _ = self.set_heading(value)?;
                            ParseState::Start
                        }
                        ParseState::Position(None) => ParseState::Position(Some(value)),
                        ParseState::Position(Some(x)) => {
                            let _ = self.set_position(x, value)?;
                            ParseState::Start
                        }
                        ParseState::MaxIterations => {
                            if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
                                return Err(SpacefillError::ParseError(format!(
                                    "max_iterations must be a positive integer, got {} at line {line}",
                                    lex.slice()
                                )));
                            }
                            let _ = self.set_max_iterations(value as u32)?;
                            ParseState::Start
                        }
                        ParseState::ScaleConstant => {
                            let _ = self.set_scale_factor(ScaleFactor::Constant(value))?;
                            ParseState::Start
                        }
                        ParseState::ScaleExponential(None, None) => {
                            ParseState::ScaleExponential(Some(value), None)
                        }
                        ParseState::ScaleExponential(Some(coefficient), None) => {
                            ParseState::ScaleExponential(Some(coefficient), Some(value))
                        }
                        ParseState::ScaleExponential(Some(coefficient), Some(base)) => {
                            let _ = self.set_scale_factor(ScaleFactor::Exponential {
                                coefficient,
                                base,
                                offset: value,
                            })?;
                            ParseState::Start
                        }
                        ParseState::ScalePower => {
                            let _ =
                                self.set_scale_factor(ScaleFactor::Power { exponent: value })?;
                            ParseState::Start
                        }
                        _ => {
                            return Err(SpacefillError::ParseError(format!(
                                "Bad state for Number:{state:?} at line {line}"
                            )));
                        }
                    }
                }
                ParseToken::Skip | ParseToken::Comment => continue,
            };
        }
        if state != ParseState::Start {
            return Err(SpacefillError::ParseError(format!(
                "Incomplete statement {state:?} at line {line}"
            )));
        }
        Ok(self)
    }
}
