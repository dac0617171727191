//! Display-width aware text fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `text` with spaces to exactly `width` columns, truncating if longer
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let used = UnicodeWidthStr::width(out.as_str());
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

/// Greedy word wrap to `width` columns; overlong words are truncated
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let w = UnicodeWidthStr::width(word);
        if used > 0 && used + 1 + w > width {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        if used > 0 {
            line.push(' ');
            used += 1;
        }
        if w > width {
            line.push_str(&truncate(word, width));
            used = width;
        } else {
            line.push_str(word);
            used += w;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_should_respect_display_width() {
        assert_eq!(truncate("Alien", 10), "Alien");
        assert_eq!(truncate("Apocalypse Now", 8), "Apocaly…");
        assert_eq!(truncate("千と千尋の神隠し", 5), "千と…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn fit_should_pad_to_width() {
        assert_eq!(fit("Up", 5), "Up   ");
        assert_eq!(fit("Goodfellas", 5), "Good…");
    }

    #[test]
    fn wrap_should_break_on_word_boundaries() {
        let lines = wrap("A ticking-time-bomb insomniac and a slippery soap salesman", 20);
        assert_eq!(
            lines,
            vec![
                "A ticking-time-bomb".to_string(),
                "insomniac and a".to_string(),
                "slippery soap".to_string(),
                "salesman".to_string(),
            ]
        );
        assert!(wrap("", 10).is_empty());
    }
}
