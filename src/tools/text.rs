//! Text statistics and case conversion

use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub lines: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    /// Minutes, rounded up
    pub reading_minutes: usize,
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '؟' | '。')
}

/// Counts are in Unicode scalar values, so Arabic text counts per letter
pub fn stats(text: &str) -> TextStats {
    if text.trim().is_empty() {
        return TextStats::default();
    }

    let words = text.split_whitespace().count();
    let sentences = text
        .split(is_sentence_end)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count();
    let paragraphs = text
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();

    TextStats {
        characters: text.chars().count(),
        characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
        words,
        lines: text.lines().count(),
        sentences,
        paragraphs,
        reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Upper,
    Lower,
    Title,
    Sentence,
}

pub fn convert_case(text: &str, case: Case) -> String {
    match case {
        Case::Upper => text.to_uppercase(),
        Case::Lower => text.to_lowercase(),
        Case::Title => {
            let mut out = String::with_capacity(text.len());
            let mut word_start = true;
            for c in text.chars() {
                if word_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    word_start = false;
                } else {
                    out.extend(c.to_lowercase());
                    if c.is_whitespace() {
                        word_start = true;
                    } else if c.is_alphabetic() {
                        word_start = false;
                    }
                }
            }
            out
        }
        Case::Sentence => {
            let mut out = String::with_capacity(text.len());
            let mut sentence_start = true;
            for c in text.chars() {
                if sentence_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    sentence_start = false;
                } else {
                    out.extend(c.to_lowercase());
                    if is_sentence_end(c) {
                        sentence_start = true;
                    }
                }
            }
            out
        }
    }
}
