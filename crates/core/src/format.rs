//! Canonical rendering of commands back into OXTest lines

use std::fmt;

use crate::parser::parse_line;
use crate::types::{Command, SelectorSpec};

/// Param key that would be read as an inline fallback if written after a
/// selector
const FALLBACK_KEY: &str = "fallback";

fn needs_quotes(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'))
}

/// Write `value` so the tokenizer reads it back unchanged
fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if !needs_quotes(value) {
        return f.write_str(value);
    }
    f.write_str("\"")?;
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

fn write_pair(f: &mut fmt::Formatter<'_>, key: &str, value: &str) -> fmt::Result {
    f.write_str(" ")?;
    write_value(f, key)?;
    f.write_str("=")?;
    write_value(f, value)
}

impl fmt::Display for SelectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.strategy)?;
        write_value(f, &self.value)?;
        for fallback in &self.fallbacks {
            write!(f, " fallback {}=", fallback.strategy)?;
            write_value(f, &fallback.value)?;
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_type().as_str())?;

        // A literal `fallback=` param must precede the selector to stay a param
        if let (Some(_), Some(value)) = (self.selector(), self.param(FALLBACK_KEY)) {
            write_pair(f, FALLBACK_KEY, value)?;
        }
        if let Some(selector) = self.selector() {
            write!(f, " {}", selector)?;
        }
        for (key, value) in self.params() {
            if key == FALLBACK_KEY && self.selector().is_some() {
                continue;
            }
            write_pair(f, key, value)?;
        }
        Ok(())
    }
}

/// Rewrite a script with canonical command names and quoting.
///
/// Blank lines, comments and lines that fail to parse are kept verbatim,
/// and every line keeps its original terminator (`\n`, `\r\n` or none).
pub fn format_script(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for (index, chunk) in source.split_inclusive('\n').enumerate() {
        let body = chunk.strip_suffix('\n').unwrap_or(chunk);
        let body = body.strip_suffix('\r').unwrap_or(body);
        match parse_line(body, index + 1) {
            Ok(Some(command)) => {
                out.push_str(&command.to_string());
                out.push_str(&chunk[body.len()..]);
            }
            _ => out.push_str(chunk),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn reparse(line: &str) -> (Command, Command) {
        let original = parse_line(line, 1).unwrap().unwrap();
        let rendered = original.to_string();
        let again = parse_line(&rendered, 1).unwrap().unwrap();
        (original, again)
    }

    #[test]
    fn test_canonical_rendering() {
        let command = parse_line(
            "assert_exists css=button.primary fallback=text=Login timeout=500",
            1,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            command.to_string(),
            "assertVisible css=button.primary fallback text=Login timeout=500"
        );
    }

    #[test]
    fn test_quotes_values_with_spaces() {
        let command = parse_line(r#"log message="hello world""#, 1)
            .unwrap()
            .unwrap();
        assert_eq!(command.to_string(), r#"log message="hello world""#);
    }

    #[test_case(r#"fill css=input value="say \"hi\"""# ; "escaped quotes")]
    #[test_case(r"type label='C:\\dir' value=x" ; "backslash")]
    #[test_case("click text='Sign in' fallback role=button fallback=css=.btn" ; "fallback chain")]
    #[test_case("click fallback=css=.stray css=#real" ; "fallback-named param")]
    #[test_case("navigate url=https://x.test/?a=b" ; "equals in value")]
    #[test_case("log msg=\"a\t\"" ; "quoted trailing tab")]
    #[test_case("log msg=a\\ " ; "escaped trailing space")]
    fn test_render_reparses_equal(line: &str) {
        let (original, again) = reparse(line);
        assert_eq!(original, again);
    }

    #[test]
    fn test_format_script_preserves_comments_and_errors() {
        let source = "# header\nassert_not_exists css=.spinner\n\nclick\n";
        let formatted = format_script(source);
        assert_eq!(
            formatted,
            "# header\nassertHidden css=.spinner\n\nclick\n"
        );
    }

    #[test]
    fn test_format_script_keeps_crlf() {
        let source = "# c\r\n\r\ngo_back\r\nclick\r\nreload";
        assert_eq!(
            format_script(source),
            "# c\r\n\r\ngoBack\r\nclick\r\nreload"
        );
        let canonical = "# c\r\ngoBack\r\n";
        assert_eq!(format_script(canonical), canonical);
    }

    #[test]
    fn test_format_script_without_trailing_newline() {
        assert_eq!(format_script("go_back"), "goBack");
    }
}
