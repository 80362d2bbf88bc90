use tracing::debug;

/// One physical CSV row as ordered string fields.
pub type RawRow = Vec<String>;

/// Split raw CSV text into rows of fields.
///
/// Line endings (`\r\n`, `\r`, `\n`) are normalized to `\n` first, including
/// inside quoted fields. A `"` opens a quoted field only as the first
/// character of a field; anywhere else it is kept as data. Inside quotes,
/// `""` is an escaped quote and commas/newlines are literal.
///
/// The row left over at end of input is flushed without a trailing newline,
/// and a final row holding a single empty field is dropped.
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut rows: Vec<RawRow> = Vec::new();
    let mut row: RawRow = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = normalized.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '"' if field.is_empty() => in_quotes = true,
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    if rows
        .last()
        .is_some_and(|last| last.len() == 1 && last[0].is_empty())
    {
        rows.pop();
    }

    debug!(rows = rows.len(), bytes = text.len(), "Tokenized CSV text");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> RawRow {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_quoted_field_keeps_comma() {
        assert_eq!(parse_csv("a,\"b,c\",d\n"), vec![row(&["a", "b,c", "d"])]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(
            parse_csv("\"he said \"\"hi\"\"\",x\n"),
            vec![row(&["he said \"hi\"", "x"])]
        );
    }

    #[test]
    fn test_mixed_line_endings_match() {
        let unix = parse_csv("h1,h2\na,b\nc,d\n");
        let windows = parse_csv("h1,h2\r\na,b\r\nc,d\r\n");
        let classic_mac = parse_csv("h1,h2\ra,b\rc,d\r");
        assert_eq!(unix, windows);
        assert_eq!(unix, classic_mac);
        assert_eq!(unix.len(), 3);
    }

    #[test]
    fn test_trailing_newline_is_optional() {
        assert_eq!(parse_csv("a,b\n"), vec![row(&["a", "b"])]);
        assert_eq!(parse_csv("a,b"), vec![row(&["a", "b"])]);
    }

    #[test]
    fn test_trailing_blank_line_dropped() {
        assert_eq!(parse_csv("a,b\n\n"), vec![row(&["a", "b"])]);
    }

    #[test]
    fn test_blank_line_in_middle_kept() {
        assert_eq!(
            parse_csv("a\n\nb\n"),
            vec![row(&["a"]), row(&[""]), row(&["b"])]
        );
    }

    #[test]
    fn test_multiline_quoted_field() {
        assert_eq!(
            parse_csv("name,note\nx,\"line one\r\nline two\"\n"),
            vec![row(&["name", "note"]), row(&["x", "line one\nline two"])]
        );
    }

    #[test]
    fn test_mid_field_quote_is_literal() {
        assert_eq!(parse_csv("ab\"c,d\n"), vec![row(&["ab\"c", "d"])]);
    }

    #[test]
    fn test_text_after_closing_quote_is_appended() {
        assert_eq!(parse_csv("\"ab\"cd,e"), vec![row(&["abcd", "e"])]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(parse_csv("a,\"b,c\nd"), vec![row(&["a", "b,c\nd"])]);
    }

    #[test]
    fn test_empty_fields_preserved() {
        assert_eq!(parse_csv(",,\n"), vec![row(&["", "", ""])]);
        assert_eq!(parse_csv("a,"), vec![row(&["a", ""])]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n").is_empty());
    }
}
