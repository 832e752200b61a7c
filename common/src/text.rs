//! Fixed-capacity string helpers and word wrapping for the mono fonts.

use heapless::String;

/// Copy `text` into a `heapless::String<N>`, dropping characters that do not fit.
///
/// Truncation happens on a character boundary, so multi-byte UTF-8 input
/// never produces a partial character.
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out: String<N> = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Split `text` into lines of at most `width` characters, breaking at spaces.
///
/// Words longer than a line are split mid-word. Lines are borrowed from
/// `text`, so wrapping never allocates.
pub fn wrap_lines(text: &str, width: usize) -> WrapLines<'_> {
    WrapLines {
        rest: text,
        width: width.max(1),
    }
}

/// Iterator returned by [`wrap_lines`].
pub struct WrapLines<'a> {
    rest: &'a str,
    width: usize,
}

impl<'a> Iterator for WrapLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start_matches(' ');
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }
        let mut last_space = None;
        for (count, (i, c)) in rest.char_indices().enumerate() {
            if count == self.width {
                let cut = if c == ' ' { i } else { last_space.unwrap_or(i) };
                self.rest = &rest[cut..];
                return Some(rest[..cut].trim_end_matches(' '));
            }
            if c == ' ' {
                last_space = Some(i);
            }
        }
        self.rest = "";
        Some(rest)
    }
}
