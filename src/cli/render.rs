//! Text rendering of built trees.

use termtree::Tree;

use crate::domain::TreeNode;

pub trait TreeRender {
    fn to_term_tree(&self, show_fallback: bool) -> Tree<String>;
}

impl TreeRender for TreeNode {
    fn to_term_tree(&self, show_fallback: bool) -> Tree<String> {
        render(self, None, show_fallback)
    }
}

fn render(node: &TreeNode, edge: Option<&str>, show_fallback: bool) -> Tree<String> {
    let head = match node {
        TreeNode::Leaf { label } => label.clone(),
        TreeNode::Internal {
            feature, fallback, ..
        } if show_fallback => format!("[{}] (fallback → {})", feature, fallback),
        TreeNode::Internal { feature, .. } => format!("[{}]", feature),
    };
    let text = match edge {
        Some(value) => format!("{} → {}", value, head),
        None => head,
    };

    let mut tree = Tree::new(text);
    if let TreeNode::Internal { children, .. } = node {
        for (value, child) in children {
            tree.push(render(child, Some(value), show_fallback));
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeBuilder;
    use crate::util::testing::play_tennis;

    fn tree() -> TreeNode {
        let data = play_tennis();
        TreeBuilder::new("Play")
            .build(&data.rows, &data.features())
            .unwrap()
    }

    #[test]
    fn given_play_tennis_tree_when_rendering_then_shows_splits_and_leaves() {
        let text = tree().to_term_tree(true).to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "[Outlook] (fallback → Yes)");
        assert!(text.contains("Overcast → Yes"));
        assert!(text.contains("Sunny → [Humidity] (fallback → No)"));
        assert!(text.contains("Strong → No"));
        assert_eq!(text.lines().count(), tree().node_count());
    }

    #[test]
    fn given_hidden_fallback_when_rendering_then_omits_annotation() {
        let text = tree().to_term_tree(false).to_string();
        assert!(!text.contains("fallback"));
        assert!(text.starts_with("[Outlook]"));
    }

    #[test]
    fn given_leaf_when_rendering_then_single_line() {
        let text = TreeNode::leaf("Yes").to_term_tree(true).to_string();
        assert_eq!(text.trim_end(), "Yes");
    }
}
