use std::num::NonZeroUsize;

use crate::models::{Fragment, is_punctuation};
use crate::tree::ParseTree;

/// Staircase layout over the tree's leaves.
///
/// Each full fragment steps the next one in by one level. Punctuation closes the current
/// fragment and resets the indent to 1, so only the opening line sits flush left.
pub(super) fn tree_depth(tree: &ParseTree, max_tokens: NonZeroUsize) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut indent = 0;
    let mut current = Fragment::new(indent);

    for leaf in tree.leaves() {
        if is_punctuation(leaf) {
            // Back-to-back punctuation sticks to the fragment that was just closed
            if current.is_empty()
                && let Some(previous) = fragments.last_mut()
            {
                previous.append(leaf);
            } else {
                current.append(leaf);
                fragments.push(current);
            }
            indent = 1;
            current = Fragment::new(indent);
        } else if current.len() >= max_tokens.get() {
            fragments.push(current);
            indent += 1;
            current = Fragment::new(indent);
            current.append(leaf);
        } else {
            current.append(leaf);
        }
    }

    if !current.is_empty() {
        fragments.push(current);
    }

    fragments.into_iter().map(Fragment::with_text).collect()
}
