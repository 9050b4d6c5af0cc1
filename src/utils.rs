//! Utility functions for devbox

/// Escape the five HTML-significant characters.
///
/// Existing entities are escaped as well; the input is treated as plain text.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

/// Extract the first line of text that looks like a title
pub fn extract_title(content: &str) -> Option<String> {
    for line in content.lines().take(10) {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("```") {
            continue;
        }

        if trimmed.starts_with('#') {
            let title = trimmed.trim_start_matches('#').trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
            continue;
        }

        return Some(trimmed.to_string());
    }

    None
}

pub fn strip_leading_bom(text: &mut String) {
    const UTF8_BOM: char = '\u{FEFF}';
    while text.starts_with(UTF8_BOM) {
        // Standard PowerShell adds a UTF-8 BOM when piping text.
        let bom_len = UTF8_BOM.len_utf8();
        text.drain(..bom_len);
    }
}

/// Wrap a rendered fragment into a minimal standalone HTML5 document
pub fn wrap_html_document(title: Option<&str>, body: &str) -> String {
    let title = escape_html(title.unwrap_or("Document"));
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
