use std::borrow::Cow;

/// Quote a value for report output.
///
/// Only values containing a comma are wrapped, with inner quotes doubled.
/// Everything else is written as-is, which is what the download and email
/// consumers of the report expect.
pub fn quote_field(value: &str) -> Cow<'_, str> {
    if value.contains(',') {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render a header line and data lines joined by `\n`, without a trailing newline.
pub fn write_rows<I, R, S>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = Vec::new();
    lines.push(
        header
            .iter()
            .map(|h| quote_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = row
            .into_iter()
            .map(|value| quote_field(value.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_field_only_when_comma() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\", then"), "\"say \"\"hi\"\", then\"");
        // Quotes without a comma are left alone.
        assert_eq!(quote_field("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_write_rows() {
        let out = write_rows(&["A", "B"], vec![vec!["1", "x,y"], vec!["2", ""]]);
        assert_eq!(out, "A,B\n1,\"x,y\"\n2,");
    }

    #[test]
    fn test_write_rows_header_only() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(write_rows(&["A", "B"], rows), "A,B");
    }
}
