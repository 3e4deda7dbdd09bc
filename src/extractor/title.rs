//! Title cleanup and arbitration between competing titles for one link.

use crate::extractor::model::collapse_whitespace;

/// Call-to-action tails that cards append after the actual role name.
const MARKETING_TAILS: &[&str] = &[" learn more", " read more", " apply now", " see more"];

pub const MAX_TITLE_CHARS: usize = 120;
const ELLIPSIS: char = '…';

/// Titles whose lengths differ by more than this are judged on length alone.
const LENGTH_GAP: usize = 15;
const SENTENCE_PUNCTUATION: &[char] = &['.', ':', ';', '!', '?'];

/// Collapse whitespace, cut a trailing call-to-action and cap the length.
pub fn clean(raw: &str) -> String {
    let mut title = collapse_whitespace(raw);

    for tail in MARKETING_TAILS {
        if let Some(idx) = find_ascii_case_insensitive(&title, tail)
            && idx > 0
        {
            title.truncate(idx);
            title = title.trim().to_string();
            break;
        }
    }

    if title.chars().count() > MAX_TITLE_CHARS {
        let mut capped: String = title.chars().take(MAX_TITLE_CHARS).collect();
        capped.truncate(capped.trim_end().len());
        capped.push(ELLIPSIS);
        title = capped;
    }

    title
}

/// Which of two titles reads more like a job title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    First,
    Second,
}

/// Decides between two titles seen for the same link. Ties go to `a`, so the
/// caller controls priority through argument order.
pub fn prefer(a: &str, b: &str) -> Preference {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() && !b.is_empty() {
        return Preference::Second;
    }
    if b.is_empty() {
        return Preference::First;
    }

    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a.abs_diff(len_b) > LENGTH_GAP {
        // long strings tend to be blurbs, not titles
        return if len_a < len_b {
            Preference::First
        } else {
            Preference::Second
        };
    }

    if punctuation(b) < punctuation(a) {
        Preference::Second
    } else {
        Preference::First
    }
}

/// The winning title of [`prefer`], trimmed.
pub fn better_of<'a>(a: &'a str, b: &'a str) -> &'a str {
    match prefer(a, b) {
        Preference::First => a.trim(),
        Preference::Second => b.trim(),
    }
}

fn punctuation(text: &str) -> usize {
    text.chars().filter(|c| SENTENCE_PUNCTUATION.contains(c)).count()
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let (hay, pat) = (haystack.as_bytes(), needle.as_bytes());
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len()).find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}
