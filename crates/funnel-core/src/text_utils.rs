//! Word counting helpers for the tally.

/// Number of non-empty whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::word_count;

    #[test]
    fn counts_tokens_across_mixed_whitespace() {
        assert_eq!(word_count("  le  chat\tnoir\n"), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count(" \n\t "), 0);
    }
}
