//! String templates for blueprint text
//!
//! Placeholders use `{{ path }}` syntax, e.g. `{{ page.title }}`. Unknown
//! placeholders resolve to an empty string.

/// Replace placeholders, HTML-escaping each resolved value.
pub fn safe_template<F>(template: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    fill(template, |path| resolve(path).map(|value| escape_html(&value)))
}

/// Replace placeholders with the resolved values as they are.
pub fn fill<F>(template: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // unclosed placeholder stays literal
            out.push_str(&rest[start..]);
            return out;
        };
        let path = after[..end].trim();
        if let Some(value) = resolve(path) {
            out.push_str(&value);
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Minimal block formatting: blank lines separate paragraphs, single line
/// breaks become `<br>`.
pub fn kirbytext(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", p.lines().collect::<Vec<_>>().join("<br>\n")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: &str) -> Option<String> {
        match path {
            "page.title" => Some("Tom & Jerry".to_string()),
            "file.filename" => Some("cover.jpg".to_string()),
            _ => None,
        }
    }

    #[test]
    fn placeholders_are_resolved_and_escaped() {
        assert_eq!(
            safe_template("Title: {{ page.title }}", resolve),
            "Title: Tom &amp; Jerry"
        );
        assert_eq!(safe_template("{{file.filename}}", resolve), "cover.jpg");
    }

    #[test]
    fn unknown_placeholder_is_empty() {
        assert_eq!(safe_template("[{{ page.nope }}]", resolve), "[]");
    }

    #[test]
    fn unclosed_placeholder_stays_literal() {
        assert_eq!(safe_template("a {{ page.title", resolve), "a {{ page.title");
    }

    #[test]
    fn kirbytext_wraps_paragraphs() {
        assert_eq!(
            kirbytext("One\ntwo\n\nThree"),
            "<p>One<br>\ntwo</p>\n<p>Three</p>"
        );
        assert_eq!(kirbytext("  "), "");
    }
}
