// src/core/html.rs
//
// Case-insensitive tag scanning over raw markup. No DOM: a block is found by
// its open tag and ends at its close tag, or where the next sibling of the
// same tag opens when the close tag was omitted (common for <tr>/<td>).
// Nested blocks of the *same* tag are not supported.

use super::sanitize::{normalize_entities, normalize_ws};

/// One `<tag ...>...</tag>` occurrence.
#[derive(Clone, Copy, Debug)]
pub struct Block<'a> {
    /// `<tag attr="...">`, brackets included.
    pub open_tag: &'a str,
    /// Everything between the open tag and the close tag.
    pub inner: &'a str,
}

impl<'a> Block<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr_ci(self.open_tag, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    /// Visible text of the block, trimmed.
    pub fn text(&self) -> String {
        text(self.inner)
    }
}

/// Iterator over every `<tag>` block in `src`, in document order.
pub struct TagBlocks<'a> {
    src: &'a str,
    // ASCII-lowercased copy; byte offsets line up with `src`.
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

impl<'a> TagBlocks<'a> {
    pub fn new(src: &'a str, tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        Self {
            src,
            lc: src.to_ascii_lowercase(),
            open: join!("<", &tag),
            close: join!("</", &tag),
            pos: 0,
        }
    }

    /// Next real `<tag` at or after `from` (so `<tr` does not match `<track`).
    fn find_open(&self, from: usize) -> Option<usize> {
        let mut at = from;
        loop {
            let start = self.lc.get(at..)?.find(&self.open)? + at;
            let after = start + self.open.len();
            match self.lc.as_bytes().get(after) {
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(start),
                Some(_) => at = after,
                None => return None,
            }
        }
    }
}

impl<'a> Iterator for TagBlocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        let start = self.find_open(self.pos)?;
        let Some(open_end) = tag_end(self.src, start) else {
            self.pos = self.src.len();
            return None;
        };
        let open_tag = &self.src[start..open_end];

        let close_at = self.lc[open_end..].find(&self.close).map(|i| i + open_end);
        let sibling_at = self.find_open(open_end);

        let (inner_end, resume) = match (close_at, sibling_at) {
            (Some(c), Some(s)) if s < c => (s, s),
            (Some(c), _) => (c, tag_end(self.src, c).unwrap_or(self.src.len())),
            (None, Some(s)) => (s, s),
            (None, None) => (self.src.len(), self.src.len()),
        };
        self.pos = resume;

        Some(Block { open_tag, inner: &self.src[open_end..inner_end] })
    }
}

/// First `<tag class="... class ...">` block inside `s`.
pub fn first_with_class<'a>(s: &'a str, tag: &str, class: &str) -> Option<Block<'a>> {
    TagBlocks::new(s, tag).find(|b| b.has_class(class))
}

/// Byte offset just past the `>` closing the tag that starts at `start`.
/// Quoted attribute values may contain `>`.
fn tag_end(s: &str, start: usize) -> Option<usize> {
    let mut in_s = false; // '
    let mut in_d = false; // "
    for (i, &c) in s.as_bytes().iter().enumerate().skip(start + 1) {
        match c {
            b'\'' if !in_d => in_s = !in_s,
            b'"' if !in_s => in_d = !in_d,
            b'>' if !in_s && !in_d => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Value of attribute `name` in an open tag (quoted or bare), case-insensitive on the name.
pub fn attr_ci<'a>(open_tag: &'a str, name: &str) -> Option<&'a str> {
    let lc = open_tag.to_ascii_lowercase();
    let needle = name.to_ascii_lowercase();
    let b = lc.as_bytes();

    let mut from = 0;
    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        from = at + needle.len();

        // must be a whole attribute name: `data-class=` is not `class=`
        if at == 0 || !b[at - 1].is_ascii_whitespace() {
            continue;
        }

        let mut i = from;
        while i < b.len() && b[i].is_ascii_whitespace() { i += 1; }
        if b.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < b.len() && b[i].is_ascii_whitespace() { i += 1; }

        return match b.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let vstart = i + 1;
                let vend = lc[vstart..].find(q as char).map(|e| e + vstart)?;
                Some(&open_tag[vstart..vend])
            }
            Some(_) => {
                let vend = lc[i..]
                    .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                    .map(|e| e + i)
                    .unwrap_or(lc.len());
                Some(&open_tag[i..vend])
            }
            None => None,
        };
    }
    None
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Visible text: tags stripped, entities decoded, whitespace collapsed and trimmed.
pub fn text(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_case_insensitive_and_skip_lookalikes() {
        let html = "<TR><td>a</td></TR><track></track><tr class='x'><td>b</td></tr>";
        let rows: Vec<_> = TagBlocks::new(html, "tr").collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].attr("class"), Some("x"));
        assert_eq!(rows[1].text(), "b");
    }

    #[test]
    fn missing_close_tag_ends_at_next_sibling() {
        let html = "<tr><td>1<td>2<td>3</tr>";
        let cells: Vec<String> = TagBlocks::new(html, "td").map(|b| b.text()).collect();
        assert_eq!(cells, vec!["1", "2", "3"]);
    }

    #[test]
    fn class_lookup_matches_whole_tokens_only() {
        let html = r#"<p data-class="coin-item-symbol">no</p><p class="a coin-item-symbol b">BTC</p>"#;
        let hit = first_with_class(html, "p", "coin-item-symbol").unwrap();
        assert_eq!(hit.text(), "BTC");
        assert!(first_with_class(html, "p", "coin-item").is_none());
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        let html = r#"<td title="a > b">x</td>"#;
        let cell = TagBlocks::new(html, "td").next().unwrap();
        assert_eq!(cell.attr("title"), Some("a > b"));
        assert_eq!(cell.inner, "x");
    }

    #[test]
    fn text_decodes_after_stripping() {
        assert_eq!(text("<span>$1,234&nbsp;</span>  <b>&lt;USD&gt;</b>"), "$1,234 <USD>");
    }
}
