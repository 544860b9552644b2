//! Integration tests for the CSS parser.

use wren_css::{CSSParser, Selector};

fn parse(css: &str) -> wren_css::Stylesheet {
    CSSParser::new(css).parse_stylesheet()
}

#[test]
fn single_rule() {
    let sheet = parse("p { color: red; }");
    assert_eq!(sheet.rules.len(), 1);
    let rule = &sheet.rules[0];
    assert_eq!(rule.selector, Selector::Tag("p".to_string()));
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations[0].name, "color");
    assert_eq!(rule.declarations[0].value, "red");
}

#[test]
fn property_names_are_lowercased_values_verbatim() {
    let sheet = parse("p { COLOR: Red; }");
    assert_eq!(sheet.rules[0].declarations[0].name, "color");
    assert_eq!(sheet.rules[0].declarations[0].value, "Red");
}

#[test]
fn selector_words_are_lowercased() {
    let sheet = parse("DIV P { color: red; }");
    assert_eq!(
        sheet.rules[0].selector,
        Selector::Descendant(vec!["div".to_string(), "p".to_string()])
    );
}

#[test]
fn descendant_chain_in_source_order() {
    let sheet = parse("body div p { color: red; }");
    assert_eq!(
        sheet.rules[0].selector,
        Selector::Descendant(vec![
            "body".to_string(),
            "div".to_string(),
            "p".to_string()
        ])
    );
}

#[test]
fn multiple_declarations_keep_order() {
    let sheet = parse("p { color: red; font-size: 12px; font-weight: bold; }");
    let names: Vec<&str> = sheet.rules[0]
        .declarations
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["color", "font-size", "font-weight"]);
}

#[test]
fn duplicate_property_overwrites_in_place() {
    let sheet = parse("p { color: red; font-size: 12px; color: blue; }");
    let rule = &sheet.rules[0];
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations[0].name, "color");
    assert_eq!(rule.declarations[0].value, "blue");
}

#[test]
fn final_declaration_without_semicolon_is_kept() {
    let sheet = parse("p { color: red }");
    assert_eq!(sheet.rules[0].declarations[0].value, "red");
}

#[test]
fn malformed_declaration_skips_to_next_semicolon() {
    // "color: ;" has no value word; the parser skips to the ';' and goes on.
    let sheet = parse("p { color: ; font-weight: bold; }");
    let rule = &sheet.rules[0];
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(rule.declarations[0].name, "font-weight");
}

#[test]
fn malformed_declaration_recovery_preserves_later_rules() {
    let sheet = parse("p { color: ; } q { color: green; }");
    assert_eq!(sheet.rules.len(), 2);
    assert!(sheet.rules[0].declarations.is_empty());
    assert_eq!(sheet.rules[1].selector, Selector::Tag("q".to_string()));
    assert_eq!(sheet.rules[1].declarations[0].value, "green");
}

#[test]
fn malformed_rule_skips_to_closing_brace() {
    let sheet = parse("p + q { color: red; } div { color: green; }");
    // '+' is not a word character, so the first rule is abandoned at the
    // next '}' and parsing resumes.
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::Tag("div".to_string()));
}

#[test]
fn unterminated_rule_ends_the_stream() {
    let sheet = parse("p { color: red; } div { color: green");
    // The dangling rule has no '}' to recover to; what parsed before stays.
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::Tag("p".to_string()));
}

#[test]
fn values_with_symbol_characters() {
    let sheet = parse("p { color: #ff0000; font-size: 150%; margin: -1.5px; }");
    let values: Vec<&str> = sheet.rules[0]
        .declarations
        .iter()
        .map(|d| d.value.as_str())
        .collect();
    assert_eq!(values, vec!["#ff0000", "150%", "-1.5px"]);
}

#[test]
fn body_parses_inline_style_text() {
    let declarations = CSSParser::new("color: red; font-size: 12px").body();
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0].name, "color");
    assert_eq!(declarations[1].value, "12px");
}

#[test]
fn empty_and_whitespace_stylesheets() {
    assert!(parse("").rules.is_empty());
    assert!(parse("   \n\t  ").rules.is_empty());
}
