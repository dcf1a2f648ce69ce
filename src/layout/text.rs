use crate::text_metrics;

use super::TextBlock;

#[derive(Debug, Clone, Copy)]
pub(super) struct Font<'a> {
    pub family: &'a str,
    pub size: f32,
    pub bold: bool,
    pub letter_spacing: f32,
    pub fast_metrics: bool,
}

impl Font<'_> {
    pub(super) fn width(&self, text: &str) -> f32 {
        let base = if self.fast_metrics {
            fallback_text_width(text, self.size, self.bold)
        } else {
            text_metrics::measure_text_width(text, self.size, self.family, self.bold)
                .unwrap_or_else(|| fallback_text_width(text, self.size, self.bold))
        };
        base + self.letter_spacing * text.chars().count() as f32
    }
}

/// Wrap `text` into lines no wider than `max_width`. Explicit newlines are kept.
pub(super) fn wrap_text(text: &str, max_width: f32, font: Font<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in split_lines(text) {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(wrap_line(&raw, max_width, font));
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

pub(super) fn measure_block(text: &str, max_width: f32, font: Font<'_>, line_height: f32) -> TextBlock {
    let lines = wrap_text(text, max_width, font);
    let width = lines.iter().map(|line| font.width(line)).fold(0.0, f32::max);
    let height = lines.len() as f32 * font.size * line_height;
    TextBlock {
        lines,
        width,
        height,
    }
}

pub(super) fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

pub(super) fn wrap_line(line: &str, max_width: f32, font: Font<'_>) -> Vec<String> {
    if font.width(line) <= max_width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.width(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if font.width(word) <= max_width {
            current.push_str(word);
        } else {
            let mut pieces = break_word(word, max_width, font);
            if let Some(last) = pieces.pop() {
                lines.extend(pieces);
                current = last;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a single over-long word (URLs, long incomes) at character boundaries.
fn break_word(word: &str, max_width: f32, font: Font<'_>) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if font.width(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

pub(super) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.28,
        '.' | ',' | ':' | ';' | '|' | '!' | '\'' | 'i' | 'j' | 'l' => 0.26,
        '(' | ')' | '[' | ']' | 'f' | 'r' | 't' => 0.34,
        'I' => 0.3,
        'm' | 'w' => 0.82,
        'M' | 'W' => 0.9,
        '@' | '%' | '&' | '#' => 0.9,
        '0'..='9' => 0.58,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.54,
        // Devanagari vowel signs and virama combine with the previous glyph.
        '\u{0900}'..='\u{0903}' | '\u{093A}'..='\u{094F}' | '\u{0951}'..='\u{0957}' => 0.0,
        '\u{0904}'..='\u{097F}' => 0.62,
        _ => 0.6,
    }
}

fn fallback_text_width(text: &str, font_size: f32, bold: bool) -> f32 {
    let weight = if bold { 1.06 } else { 1.0 };
    text.chars()
        .filter(|ch| *ch != '\n')
        .map(char_width_factor)
        .sum::<f32>()
        * font_size
        * weight
}
