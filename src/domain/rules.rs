//! Flattening a tree into root-to-leaf decision rules.

use std::fmt;

use itertools::Itertools;

use crate::domain::tree::TreeNode;

/// A conjunction of `feature = value` conditions leading to a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub conditions: Vec<(String, String)>,
    pub label: String,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "ALWAYS {}", self.label);
        }
        let conditions = self
            .conditions
            .iter()
            .map(|(feature, value)| format!("{} = {}", feature, value))
            .join(" AND ");
        write!(f, "IF {} THEN {}", conditions, self.label)
    }
}

/// One rule per leaf, in depth-first order of the children maps.
pub fn extract_rules(tree: &TreeNode) -> Vec<Rule> {
    let mut rules = Vec::new();
    let mut path = Vec::new();
    collect(tree, &mut path, &mut rules);
    rules
}

fn collect(node: &TreeNode, path: &mut Vec<(String, String)>, rules: &mut Vec<Rule>) {
    match node {
        TreeNode::Leaf { label } => rules.push(Rule {
            conditions: path.clone(),
            label: label.clone(),
        }),
        TreeNode::Internal {
            feature, children, ..
        } => {
            for (value, child) in children {
                path.push((feature.clone(), value.clone()));
                collect(child, path, rules);
                path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;
    use crate::util::testing::play_tennis;

    #[test]
    fn given_play_tennis_tree_when_extracting_then_one_rule_per_leaf() {
        let data = play_tennis();
        let tree = TreeBuilder::new("Play")
            .build(&data.rows, &data.features())
            .unwrap();

        let rules = extract_rules(&tree);
        assert_eq!(rules.len(), tree.leaf_count());

        let rendered: Vec<String> = rules.iter().map(ToString::to_string).collect();
        assert!(rendered.contains(&"IF Outlook = Overcast THEN Yes".to_string()));
        assert!(rendered.contains(&"IF Outlook = Sunny AND Humidity = High THEN No".to_string()));
        assert!(rendered.contains(&"IF Outlook = Rain AND Wind = Strong THEN No".to_string()));
    }

    #[test]
    fn given_single_leaf_when_extracting_then_unconditional_rule() {
        let rules = extract_rules(&TreeNode::leaf("Yes"));
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].to_string(), "ALWAYS Yes");
    }
}
