use std::ops::RangeInclusive;

use crate::models::Fragment;
use crate::tree::ParseTree;

/// One fragment per subtree, grouped by height in ascending order.
///
/// Heights run from the leaves (0) up to, but excluding, the root's own height; a fixed
/// `height` selects a single group. Fragments are indented by their height.
pub(super) fn height_bucket(tree: &ParseTree, height: Option<usize>) -> Vec<Fragment> {
    let measured: Vec<(&ParseTree, usize)> = spanning_subtrees(tree)
        .map(|subtree| (subtree, subtree.height()))
        .collect();

    let heights = match height {
        Some(h) => h..h.saturating_add(1),
        None => 0..tree.height(),
    };

    let mut fragments = Vec::new();
    for h in heights {
        fragments.extend(
            measured
                .iter()
                .filter(|(_, subtree_height)| *subtree_height == h)
                .map(|(subtree, _)| Fragment::from_tokens(h, subtree.leaves())),
        );
    }
    fragments
}

/// One fragment per labeled subtree whose leaf count falls within `lengths`, in pre-order.
/// Fragments are indented by their leaf count.
pub(super) fn length_filter(tree: &ParseTree, lengths: RangeInclusive<usize>) -> Vec<Fragment> {
    spanning_subtrees(tree)
        .filter(|subtree| !subtree.is_leaf())
        .filter_map(|subtree| {
            let count = subtree.leaf_count();
            lengths
                .contains(&count)
                .then(|| Fragment::from_tokens(count, subtree.leaves()))
        })
        .collect()
}

/// Subtrees covering at least one token; empty constituents such as `(NP)` never become
/// fragments.
fn spanning_subtrees(tree: &ParseTree) -> impl Iterator<Item = &ParseTree> {
    tree.subtrees().filter(|subtree| subtree.leaf_count() > 0)
}
