//! Unit tests for the task context.


/// Returns `count` space-separated words.
pub(super) fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}
