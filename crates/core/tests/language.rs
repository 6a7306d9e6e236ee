//! End-to-end behaviour of the OXTest front end

use std::io::Write;

use oxtest_core::{
    load_script, parse, parse_line, parse_script, tokenize, CommandType, Error, ErrorPolicy,
    ParseError, SelectorSpec, SelectorStrategy, Token,
};

#[test]
fn basic_click_has_empty_fallbacks_and_params() {
    let tokens = tokenize("click css=button.submit");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Command(name) if name == "click"));

    let command = parse(tokens, 1).unwrap();
    let json = serde_json::to_value(&command).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "click",
            "params": {},
            "selector": {
                "strategy": "css",
                "value": "button.submit",
                "fallbacks": []
            }
        })
    );
}

#[test]
fn separate_word_fallback() {
    let command = parse_line("click text=Login fallback css=button[type=submit]", 1)
        .unwrap()
        .unwrap();
    assert_eq!(
        command.selector(),
        Some(
            &SelectorSpec::new(SelectorStrategy::Text, "Login").with_fallback(SelectorSpec::new(
                SelectorStrategy::Css,
                "button[type=submit]"
            ))
        )
    );
}

#[test]
fn inline_fallback() {
    let command = parse_line("click css=button.primary fallback=text=Login", 1)
        .unwrap()
        .unwrap();
    assert_eq!(
        command.selector(),
        Some(
            &SelectorSpec::new(SelectorStrategy::Css, "button.primary")
                .with_fallback(SelectorSpec::new(SelectorStrategy::Text, "Login"))
        )
    );
}

#[test]
fn alias_and_canonical_agree() {
    let legacy = parse_line("assert_exists css=.error", 1).unwrap().unwrap();
    let canonical = parse_line("assertVisible css=.error", 1).unwrap().unwrap();
    assert_eq!(legacy.command_type(), canonical.command_type());
    assert_eq!(legacy.command_type().as_str(), "assertVisible");
}

#[test]
fn quoting_and_escaping() {
    let command = parse_line(r#"log message="hello world""#, 1).unwrap().unwrap();
    assert_eq!(command.param("message"), Some("hello world"));

    let command = parse_line(r#"fill css=#q value="a \"quoted\" word""#, 1)
        .unwrap()
        .unwrap();
    assert_eq!(command.param("value"), Some(r#"a "quoted" word"#));
}

#[test]
fn required_fields_are_enforced() {
    let err = parse_line("navigate", 12).unwrap_err();
    assert_eq!(err.line(), 12);
    assert!(err.to_string().contains("url"));

    assert!(matches!(
        parse_line("fill css=input", 1),
        Err(ParseError::MissingParameter { param: "value", .. })
    ));
    assert!(matches!(
        parse_line("click", 1),
        Err(ParseError::MissingSelector {
            command: CommandType::Click,
            ..
        })
    ));
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    for line in ["", "   ", "\t", "# comment", "   #indented"] {
        assert!(tokenize(line).is_empty(), "{:?}", line);
        assert_eq!(parse_line(line, 1), Ok(None));
    }
}

#[test]
fn duplicate_parameter_last_write_wins() {
    let command = parse_line("wait timeout=1000 timeout=2000", 1)
        .unwrap()
        .unwrap();
    assert_eq!(command.param("timeout"), Some("2000"));
}

#[test]
fn tokenizing_is_idempotent() {
    let line = r#"click text="Sign in" fallback=css=#login timeout=3000 junk"#;
    assert_eq!(tokenize(line), tokenize(line));
}

#[test]
fn lines_parse_independently_across_threads() {
    let lines = [
        "navigate url=https://example.com",
        "click",
        "fill css=#name value=Ada",
        "teleport somewhere",
        "assert_url url=/done",
    ];

    let results: Vec<Result<bool, ParseError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                scope.spawn(move || parse_line(line, index + 1).map(|c| c.is_some()))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().line(), 2);
    assert!(results[2].is_ok());
    assert_eq!(results[3].as_ref().unwrap_err().line(), 4);
    assert!(results[4].is_ok());
}

#[test]
fn load_script_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# checkout").unwrap();
    writeln!(file, "navigate url=/cart").unwrap();
    writeln!(file, "click testid=checkout fallback text=Checkout").unwrap();
    writeln!(file, "hover").unwrap();

    let script = load_script(file.path(), ErrorPolicy::Skip).unwrap();
    assert_eq!(script.len(), 2);
    assert_eq!(script.errors.len(), 1);
    assert_eq!(script.errors[0].line(), 4);

    let err = load_script(file.path(), ErrorPolicy::Abort).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::MissingSelector { line: 4, .. })));
}

#[test]
fn load_script_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_script(&dir.path().join("absent.ox"), ErrorPolicy::Abort).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_in_one_line_does_not_affect_others() {
    let source = "click css=#a\nclick\nclick css=#b\n";
    let skipped = parse_script(source, ErrorPolicy::Skip).unwrap();
    let alone = parse_script("click css=#a\n\nclick css=#b\n", ErrorPolicy::Abort).unwrap();
    assert_eq!(skipped.steps, alone.steps);
}
