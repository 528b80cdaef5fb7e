// src/core/sanitize.rs

/// Decode the handful of entities listing pages actually emit.
/// Unknown entities pass through untouched.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_decode_amp_last() {
        assert_eq!(normalize_entities("A&amp;lt;B"), "A&lt;B");
        assert_eq!(normalize_entities("$1&nbsp;000"), "$1 000");
    }

    #[test]
    fn ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  Bitcoin \n\t BTC "), "Bitcoin BTC");
    }
}
