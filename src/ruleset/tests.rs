// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the spacefill crate.

use super::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_RULESET, Position, RuleSet, RuleSetBuilder, ScaleFactor,
    SymbolClass, Symbols, catalog,
};
use crate::SpacefillError;
use rustc_hash::FxHashSet;

#[test]
fn test_catalog_names() -> Result<(), SpacefillError> {
    let rulesets = catalog();
    assert_eq!(rulesets.len(), 12);
    let names: FxHashSet<&str> = rulesets.iter().map(RuleSet::name).collect();
    assert_eq!(names.len(), rulesets.len());
    for ruleset in &rulesets {
        assert_eq!(&RuleSet::by_name(ruleset.name())?, ruleset);
    }
    assert_eq!(RuleSet::by_name(DEFAULT_RULESET)?.axiom(), "X");
    assert!(matches!(
        RuleSet::by_name("Mandelbrot"),
        Err(SpacefillError::UnknownRuleSet(_))
    ));
    Ok(())
}

#[test]
fn test_catalog_constants() -> Result<(), SpacefillError> {
    let dragon = RuleSet::by_name("Dragon")?;
    assert_eq!(dragon.max_iterations(), 13);
    assert_eq!(dragon.rule('F'), Some("F+G"));
    assert_eq!(dragon.rule('X'), None);
    assert_eq!(dragon.position(), Position::new(0.5, 1.0 / 3.0));

    let triangle = RuleSet::by_name("Sierpinski Triangle")?;
    assert!(triangle.closed());
    assert_eq!(triangle.angle(), 120.0);
    assert_eq!(triangle.symbols().draw(), &['F', 'G']);

    let peano = RuleSet::by_name("Peano")?;
    assert_eq!(peano.heading(), 0.0);
    assert_eq!(
        peano.scale_factor(),
        Some(ScaleFactor::Exponential {
            coefficient: 1.0,
            base: 3.0,
            offset: -1.0
        })
    );
    Ok(())
}

#[test]
fn test_classify() -> Result<(), SpacefillError> {
    let symbols = Symbols::default();
    assert_eq!(symbols.classify('F'), SymbolClass::Draw);
    assert_eq!(symbols.classify('M'), SymbolClass::Move);
    assert_eq!(symbols.classify('+'), SymbolClass::TurnLeft);
    assert_eq!(symbols.classify('-'), SymbolClass::TurnRight);
    assert_eq!(symbols.classify('X'), SymbolClass::Nop);

    let dragon = RuleSet::by_name("Dragon")?;
    assert_eq!(dragon.symbols().classify('G'), SymbolClass::Draw);
    assert_eq!(dragon.symbols().classify('X'), SymbolClass::Nop);

    // draw wins, and the turn symbols can't be taken over
    let overlapping = Symbols::new("F+", "FM");
    assert_eq!(overlapping.classify('F'), SymbolClass::Draw);
    assert_eq!(overlapping.classify('+'), SymbolClass::TurnLeft);
    assert_eq!(overlapping.moves(), &['F', 'M']);
    Ok(())
}

#[test]
fn test_scale_factor_and_step_divisor() -> Result<(), SpacefillError> {
    let hilbert = RuleSet::by_name("Hilbert")?;
    assert_eq!(hilbert.step_divisor(3), 7.0);
    // 2^0 - 1 == 0, and the depth is 0 too
    assert_eq!(hilbert.step_divisor(0), 1.0);

    let levy = RuleSet::by_name("Levy")?;
    assert_eq!(levy.step_divisor(3), 9.0);

    let dragon = RuleSet::by_name("Dragon")?;
    assert_eq!(dragon.step_divisor(1), 60.0);
    assert_eq!(dragon.step_divisor(12), 60.0);

    let koch = RuleSet::by_name("Koch Snowflake")?;
    assert_eq!(koch.step_divisor(2), 9.0);

    let custom = RuleSetBuilder::default()
        .add_axiom("F")?
        .set_angle(90.0)?
        .build()?;
    assert_eq!(custom.step_divisor(4), 4.0);
    assert_eq!(custom.max_iterations(), DEFAULT_MAX_ITERATIONS);
    assert_eq!(custom.depth(10), DEFAULT_MAX_ITERATIONS);
    assert_eq!(custom.depth(2), 2);

    let zero = RuleSetBuilder::default()
        .add_axiom("F")?
        .set_angle(90.0)?
        .set_scale_factor(ScaleFactor::Constant(0.0))?
        .build()?;
    assert_eq!(zero.step_divisor(5), 5.0);
    Ok(())
}

#[test]
fn test_builder_errors() -> Result<(), SpacefillError> {
    let mut builder = RuleSetBuilder::default();
    assert!(matches!(
        builder.build(),
        Err(SpacefillError::InvalidRuleSet(_))
    ));
    let _ = builder.add_axiom("F X")?;
    assert_eq!(
        builder.add_axiom("F").err().map(|e| e.to_string()),
        Some("Invalid rule-set: already contains an axiom FX".to_string())
    );
    // no angle yet
    assert!(builder.build().is_err());
    let _ = builder.set_angle(90.0)?.add_rule('F', "F + F")?;
    assert!(builder.add_rule('F', "FF").is_err());
    assert!(builder.add_rule('G', "  ").is_err());
    assert!(builder.add_rule(' ', "F").is_err());
    assert!(builder.set_angle(f64::INFINITY).is_err());
    assert!(builder.set_position(0.5, f64::NAN).is_err());
    assert!(builder.set_max_iterations(0).is_err());
    assert!(
        builder
            .set_scale_factor(ScaleFactor::Power {
                exponent: f64::NAN
            })
            .is_err()
    );

    let ruleset = builder.build()?;
    assert_eq!(ruleset.axiom(), "FX");
    assert_eq!(ruleset.rule('F'), Some("F+F"));
    assert_eq!(ruleset.name(), "custom");
    assert!(RuleSetBuilder::default().add_axiom(" ").is_err());
    Ok(())
}

#[test]
fn test_parse_comments_and_blank_lines() -> Result<(), SpacefillError> {
    let text = "# comment\r\n\n  axiom(\"F\") # trailing\n\t\nangle(60)";
    let parsed: RuleSet = text.parse()?;
    assert_eq!(parsed.axiom(), "F");
    assert_eq!(parsed.angle(), 60.0);

    // a # inside quotes is a symbol, not a comment
    let parsed: RuleSet = "axiom(\"F#\") # not F\nrule(\"#\", \"F+#\")\nangle(90)".parse()?;
    assert_eq!(parsed.axiom(), "F#");
    assert_eq!(parsed.rule('#'), Some("F+#"));
    Ok(())
}

#[test]
fn test_parse_error_line_numbers() -> Result<(), SpacefillError> {
    for (text, line) in [
        (
            "# header comment\n\n# another\naxiom(\"F\")\nangle(60)\nspin(3)\n",
            6,
        ),
        ("axiom(\"F\")\n\n\nangle()\n", 4),
        ("\n# position needs two numbers\naxiom(\"F\")\nposition(1)\nangle(60)", 4),
        ("axiom(\"F\")\nangle(60)\n\nmax_iterations(2.5)", 4),
    ] {
        match text.parse::<RuleSet>() {
            Err(SpacefillError::ParseError(message)) => {
                assert!(
                    message.contains(&format!("at line {line}")),
                    "{text:?} gave {message:?}"
                );
            }
            other => panic!("{text:?} should not parse, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn test_parse_koch_snowflake() -> Result<(), SpacefillError> {
    let text = r###"
# the Koch snowflake, one third of it anyway
name("Koch Snowflake")
axiom("F")
rule("F", "F-F++F-F")
angle(60)
position(0, 0.6666666666666666)
max_iterations(8)
scale_exponential(1, 3, 0) # 3^i
"###;
    let parsed: RuleSet = text.parse()?;
    assert_eq!(parsed, RuleSet::by_name("Koch Snowflake")?);
    Ok(())
}

#[test]
fn test_parse_every_statement() -> Result<(), SpacefillError> {
    let text = r###"
name("Boxes")
axiom("A M A")
rule("A", "A+B")
rule("B", "A-B")
angle(90.5)
heading(-90)
position(0.25, 0.75)
closed()
draw("AB")
move("M")
max_iterations(3)
scale_power(2)
"###;
    let parsed: RuleSet = text.parse()?;
    assert_eq!(parsed.name(), "Boxes");
    assert_eq!(parsed.axiom(), "AMA");
    assert_eq!(parsed.rule('B'), Some("A-B"));
    assert_eq!(parsed.angle(), 90.5);
    assert_eq!(parsed.heading(), -90.0);
    assert_eq!(parsed.position(), Position::new(0.25, 0.75));
    assert!(parsed.closed());
    assert_eq!(parsed.symbols().classify('B'), SymbolClass::Draw);
    assert_eq!(parsed.symbols().classify('F'), SymbolClass::Nop);
    assert_eq!(parsed.max_iterations(), 3);
    assert_eq!(
        parsed.scale_factor(),
        Some(ScaleFactor::Power { exponent: 2.0 })
    );
    Ok(())
}

#[test]
fn test_parse_errors() -> Result<(), SpacefillError> {
    for text in [
        // not a statement
        "axiom(\"F\")\nangle(60)\nspin(3)",
        // rule ids are single chars
        "axiom(\"F\")\nangle(60)\nrule(\"FF\", \"F\")",
        // missing argument
        "axiom(\"F\")\nangle()",
        // a number where text is expected
        "axiom(1)\nangle(60)",
        // fractional iteration cap
        "axiom(\"F\")\nangle(60)\nmax_iterations(2.5)",
        // incomplete position at the end of the input
        "axiom(\"F\")\nangle(60)\nposition(1",
        // missing argument at the end of the input
        "axiom(\"F\")\nangle(",
        // a quote can't be escaped
        "axiom(\"F\"\"\")\nangle(60)",
    ] {
        assert!(
            matches!(text.parse::<RuleSet>(), Err(SpacefillError::ParseError(_))),
            "{text:?} should not parse"
        );
    }
    // parses, but does not build
    assert!(matches!(
        "rule(\"F\", \"FF\")\nangle(60)".parse::<RuleSet>(),
        Err(SpacefillError::InvalidRuleSet(_))
    ));
    Ok(())
}

#[test]
fn test_display_parses_back() -> Result<(), SpacefillError> {
    for ruleset in catalog() {
        let text = ruleset.to_string();
        let parsed: RuleSet = text.parse()?;
        assert_eq!(parsed, ruleset, "{text}");
    }
    Ok(())
}

#[test]
fn test_display_parses_back_with_special_names() -> Result<(), SpacefillError> {
    let ruleset = RuleSetBuilder::default()
        .set_name("Curve #2 (draft)")?
        .add_axiom("F#")?
        .add_rule('#', "F+#")?
        .set_angle(45.0)?
        .set_draw_symbols("F#")?
        .build()?;
    let text = ruleset.to_string();
    let parsed: RuleSet = text.parse()?;
    assert_eq!(parsed, ruleset, "{text}");
    assert_eq!(parsed.name(), "Curve #2 (draft)");
    Ok(())
}

#[test]
fn test_builder_rejects_unquotable_text() -> Result<(), SpacefillError> {
    let mut builder = RuleSetBuilder::default();
    assert!(builder.set_name("say \"hi\"").is_err());
    assert!(builder.set_name("two\nlines").is_err());
    assert!(builder.add_axiom("F\"").is_err());
    assert!(builder.add_rule('"', "F").is_err());
    assert!(builder.add_rule('F', "F\"F").is_err());
    assert!(builder.set_draw_symbols("F\"").is_err());
    assert!(builder.set_move_symbols("\"").is_err());
    // a trailing line break is trimmed away
    let _ = builder.set_name("Curve\n")?;
    let ruleset = builder.add_axiom("F")?.set_angle(90.0)?.build()?;
    assert_eq!(ruleset.name(), "Curve");
    Ok(())
}
