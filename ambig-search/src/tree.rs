//! Parse tree reconstruction from a path's lineage, and the diff that
//! trims the identical rightmost subtrees out of a reported pair.

use std::fmt;

use ambig_semantic::{DisplayTree, SemanticTree};

use crate::local_prelude::*;
use crate::path::Path;

/// A node of a reconstructed parse tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub label: NodeLabel,
    /// Display text: a terminal's conjugable text, or inserted text.
    pub text: Option<Vec<TextItem>>,
    pub children: Vec<TreeNode>,
    pub semantic: Option<SemanticTree>,
    pub inserted_semantic: Option<SemanticTree>,
    pub is_placeholder: bool,
    /// Marks inserted text standing in for a trailing blank symbol.
    pub inserted_blank: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeLabel {
    Nonterminal(Symbol),
    Terminal(String),
    InsertedText,
}

/// Node equality is over label, text and children. Semantics and flags do
/// not distinguish nodes for trimming or deduplication.
impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.text == other.text && self.children == other.children
    }
}

impl Eq for TreeNode {}

impl TreeNode {
    fn nonterminal(lhs: Symbol) -> Self {
        TreeNode {
            label: NodeLabel::Nonterminal(lhs),
            text: None,
            children: vec![],
            semantic: None,
            inserted_semantic: None,
            is_placeholder: false,
            inserted_blank: false,
        }
    }
}

/// Rebuilds the parse tree of a path from its lineage. Walking the
/// lineage newest-first and keeping finished subtrees on a stack makes
/// every rule's children available exactly when the rule is reached.
/// Unfinished branches come out as childless nodes.
pub fn build(path: &Path<'_>) -> TreeNode {
    let mut stack: Vec<TreeNode> = vec![];
    let mut cur = Some(path);
    while let Some(step) = cur {
        if let Some(rule) = step.rule {
            apply_step(&mut stack, step.lhs, rule);
        }
        cur = step.prev.as_deref();
    }
    let root = stack.pop().expect("a stored path has at least one rule");
    debug_assert!(stack.is_empty(), "lineage yields exactly one tree");
    root
}

fn apply_step(stack: &mut Vec<TreeNode>, lhs: Symbol, rule: &Rule) {
    let mut node = TreeNode::nonterminal(lhs);
    node.semantic = rule.semantic.as_ref().map(|sem| sem.tree.clone());
    node.inserted_semantic = rule.inserted_semantic.clone();
    match &rule.rhs {
        RuleRhs::Terminal(t) => {
            node.children.push(TreeNode {
                label: NodeLabel::Terminal(t.token.clone()),
                text: t.text.clone().map(|item| vec![item]),
                children: vec![],
                semantic: None,
                inserted_semantic: None,
                is_placeholder: t.is_placeholder,
                inserted_blank: false,
            });
        }
        RuleRhs::Nonterminal(nt) => match &nt.insertion {
            None => {
                if let Some(first) = stack.pop() {
                    node.children.push(first);
                }
                if nt.syms.len() == 2 {
                    if let Some(second) = stack.pop() {
                        node.children.push(second);
                    }
                }
            }
            Some(insertion) => {
                let child = stack.pop();
                let text_node = TreeNode {
                    label: NodeLabel::InsertedText,
                    text: Some(insertion.text.clone()),
                    children: vec![],
                    semantic: None,
                    inserted_semantic: None,
                    is_placeholder: false,
                    inserted_blank: insertion.index == 1 && nt.syms.len() == 2,
                };
                if insertion.index == 0 {
                    node.children.push(text_node);
                    node.children.extend(child);
                } else {
                    node.children.extend(child);
                    node.children.push(text_node);
                }
            }
        },
    }
    stack.push(node);
}

/// Trims the identical rightmost subtrees of two parse trees, leaving the
/// rules that cause the ambiguity. Locates the rightmost leaf pair,
/// climbs while the enclosing ancestors are node-equal, and removes the
/// common trailing children of the first differing ancestor pair;
/// repeated until the rightmost frontiers differ. Running the diff on its
/// own output changes nothing.
pub fn trim_common_suffix(a: &mut TreeNode, b: &mut TreeNode) {
    loop {
        let (depth_a, depth_b) = {
            let spine_a = rightmost_spine(a);
            let spine_b = rightmost_spine(b);
            if spine_a.last() != spine_b.last() {
                break;
            }
            // Height above the leaf of the deepest node-equal pair.
            let mut height = 0;
            while height + 1 < spine_a.len()
                && height + 1 < spine_b.len()
                && spine_a[spine_a.len() - 2 - height] == spine_b[spine_b.len() - 2 - height]
            {
                height += 1;
            }
            // Trim at the differing parents, or at the equal pair itself
            // when one side has climbed to its root.
            if height + 1 < spine_a.len() && height + 1 < spine_b.len() {
                (spine_a.len() - 2 - height, spine_b.len() - 2 - height)
            } else {
                (spine_a.len() - 1 - height, spine_b.len() - 1 - height)
            }
        };

        let trim_a = node_at_depth_mut(a, depth_a);
        let trim_b = node_at_depth_mut(b, depth_b);
        let mut popped = 0;
        loop {
            match (trim_a.children.last(), trim_b.children.last()) {
                (Some(x), Some(y)) if x == y => {
                    trim_a.children.pop();
                    trim_b.children.pop();
                    popped += 1;
                }
                _ => break,
            }
        }
        if popped == 0 {
            break;
        }
    }
}

/// References along the rightmost path, root first, leaf last.
fn rightmost_spine(root: &TreeNode) -> Vec<&TreeNode> {
    let mut spine = vec![root];
    let mut node = root;
    while let Some(last) = node.children.last() {
        spine.push(last);
        node = last;
    }
    spine
}

fn node_at_depth_mut(root: &mut TreeNode, depth: usize) -> &mut TreeNode {
    let mut node = root;
    for _ in 0..depth {
        let last = node.children.len() - 1;
        node = &mut node.children[last];
    }
    node
}

/// Renders a tree with one node per line, indented by depth.
pub struct DisplayNode<'a> {
    pub node: &'a TreeNode,
    pub source: &'a SymbolSource,
}

impl DisplayNode<'_> {
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, node: &TreeNode, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        match &node.label {
            NodeLabel::Nonterminal(sym) => write!(f, "{}", self.source.name_of(*sym))?,
            NodeLabel::Terminal(token) => write!(f, "\"{}\"", token)?,
            NodeLabel::InsertedText => write!(f, "<insert>")?,
        }
        if let Some(text) = &node.text {
            write!(f, " ->")?;
            for item in text {
                write!(f, " {}", item)?;
            }
        }
        if node.inserted_blank {
            write!(f, " <blank>")?;
        }
        if let Some(semantic) = &node.semantic {
            write!(f, "  [{}]", DisplayTree(semantic))?;
        }
        if let Some(inserted) = &node.inserted_semantic {
            write!(f, "  [insert: {}]", DisplayTree(inserted))?;
        }
        writeln!(f)?;
        for child in &node.children {
            self.fmt_at(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for DisplayNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, self.node, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: &str) -> TreeNode {
        TreeNode {
            label: NodeLabel::Terminal(token.into()),
            text: Some(vec![TextItem::str(token)]),
            children: vec![],
            semantic: None,
            inserted_semantic: None,
            is_placeholder: false,
            inserted_blank: false,
        }
    }

    fn node(sym: usize, children: Vec<TreeNode>) -> TreeNode {
        let mut out = TreeNode::nonterminal(Symbol::from(sym));
        out.children = children;
        out
    }

    #[test]
    fn test_trim_keeps_depth_difference() {
        // One tree derives "x" directly, the other through two unary
        // rules; the shared leaf goes, the rule structure stays.
        let mut shallow = node(0, vec![leaf("x")]);
        let mut deep = node(0, vec![node(1, vec![node(2, vec![leaf("x")])])]);

        trim_common_suffix(&mut shallow, &mut deep);
        assert!(shallow.children.is_empty());
        assert_eq!(deep, node(0, vec![node(1, vec![node(2, vec![])])]));
    }

    #[test]
    fn test_trim_pops_only_the_common_suffix() {
        let mut first = node(0, vec![leaf("a"), node(1, vec![leaf("b")])]);
        let mut second = node(0, vec![leaf("c"), node(1, vec![leaf("b")])]);

        trim_common_suffix(&mut first, &mut second);
        assert_eq!(first, node(0, vec![leaf("a")]));
        assert_eq!(second, node(0, vec![leaf("c")]));
    }

    #[test]
    fn test_trim_is_idempotent() {
        let mut first = node(0, vec![leaf("x")]);
        let mut second = node(0, vec![node(1, vec![leaf("x")])]);
        trim_common_suffix(&mut first, &mut second);
        let (snapshot_first, snapshot_second) = (first.clone(), second.clone());

        trim_common_suffix(&mut first, &mut second);
        assert_eq!(first, snapshot_first);
        assert_eq!(second, snapshot_second);
    }
}
