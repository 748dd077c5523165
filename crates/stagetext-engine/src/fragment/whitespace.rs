use std::num::NonZeroUsize;

use crate::models::Fragment;

pub(super) fn whole_sentence(sentence: &str) -> Vec<Fragment> {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    vec![Fragment::from_tokens(0, tokens)]
}

/// Consecutive groups of `max_tokens` whitespace tokens; the last group may be shorter.
pub(super) fn fixed_width(sentence: &str, max_tokens: NonZeroUsize) -> Vec<Fragment> {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    tokens
        .chunks(max_tokens.get())
        .map(|chunk| Fragment::from_tokens(0, chunk.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn width(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_whole_sentence() {
        let fragments = whole_sentence("A train  is a form of rail transport.");
        assert_eq!(
            fragments,
            vec![Fragment::from_tokens(
                0,
                ["A", "train", "is", "a", "form", "of", "rail", "transport."]
            )]
        );
        assert_eq!(
            fragments[0].text.as_deref(),
            Some("A train is a form of rail transport.")
        );
    }

    #[test]
    fn test_whole_sentence_without_tokens() {
        assert!(whole_sentence(" \t ").is_empty());
    }

    #[rstest]
    #[case("a b c d e f g", 3, vec![vec!["a", "b", "c"], vec!["d", "e", "f"], vec!["g"]])]
    #[case("a b c d", 2, vec![vec!["a", "b"], vec!["c", "d"]])]
    #[case("a b", 5, vec![vec!["a", "b"]])]
    #[case("a b c", 1, vec![vec!["a"], vec!["b"], vec!["c"]])]
    #[case("", 4, vec![])]
    fn test_fixed_width(
        #[case] sentence: &str,
        #[case] max_tokens: usize,
        #[case] expected: Vec<Vec<&str>>,
    ) {
        let fragments = fixed_width(sentence, width(max_tokens));
        let groups: Vec<Vec<&str>> = fragments
            .iter()
            .map(|f| f.tokens.iter().map(String::as_str).collect())
            .collect();
        assert_eq!(groups, expected);
        assert!(fragments.iter().all(|f| f.indent == 0));
    }

    #[test]
    fn test_fixed_width_keeps_punctuation_tokens_separate() {
        let fragments = fixed_width("Hello , world .", width(4));
        assert_eq!(fragments[0].tokens, vec!["Hello", ",", "world", "."]);
    }
}
