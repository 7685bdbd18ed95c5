//! Text helpers shared by the document model and the input handlers

/// Convert a char offset to a byte offset, clamped to the end of `s`
pub fn char_to_byte(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Turn `\r\n` and lone `\r` into `\n`
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Reduce an HTML clipboard fragment to its plain text.
///
/// Tags are dropped, `<br>` and block closers become newlines, and the
/// handful of entities clipboards actually emit are decoded.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            // Unterminated tag: keep the remainder as text
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("");
        let is_break = name == "br";
        let closes_block = tag.starts_with('/') && matches!(name, "p" | "div" | "li" | "tr");
        if (is_break || closes_block) && !out.ends_with('\n') {
            out.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.trim_end_matches('\n').to_string()
}
