//! Word-count rules shared by project and task text fields.
//!
//! A word is a maximal run of non-whitespace characters, so `"a  b\tc"` has
//! three words and a blank string has none.

/// Largest number of words accepted in a project name or task title.
pub const MAX_HEADLINE_WORDS: usize = 30;

/// Largest number of words accepted in a project or task description.
pub const MAX_DESCRIPTION_WORDS: usize = 150;

/// Counts the whitespace-separated words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Returns the word count of `text` when it exceeds `max_words`.
///
/// `None` means the text is within the limit.
#[must_use]
pub fn words_over_limit(text: &str, max_words: usize) -> Option<usize> {
    let count = word_count(text);
    (count > max_words).then_some(count)
}
