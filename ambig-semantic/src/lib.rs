//! Semantic trees attached to grammar rules, and the algebra that merges,
//! reduces and compares them.
//!
//! A semantic is an array of nodes. Each node applies a shared semantic
//! function to an optional list of children. A node without children is
//! either an argument (a leaf such as `me`) or a function awaiting the
//! children that reduction will supply.

mod algebra;

pub use self::algebra::{
    arrays_equal, compare, is_forbidden_multiple, is_illegal_rhs, merge_rhs, reduce,
    reduce_forced, sort, sum_costs,
};

use std::fmt;
use std::rc::Rc;

/// A semantic function. Equal functions share one allocation, so rules
/// that mention the same function point at the same `Rc`.
#[derive(Debug)]
pub struct SemanticFunc {
    /// The function's display name, which also identifies it.
    pub name: String,
    /// Cost added for every use of this function.
    pub cost: f64,
    /// The least number of children a reduction may supply.
    pub min_params: usize,
    /// The greatest number of children a reduction may supply.
    pub max_params: usize,
    /// Forbids a second use of this function within one reduced array.
    pub forbids_multiple: bool,
}

impl SemanticFunc {
    /// Creates a shared semantic function.
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        min_params: usize,
        max_params: usize,
        forbids_multiple: bool,
    ) -> Rc<Self> {
        Rc::new(SemanticFunc {
            name: name.into(),
            cost,
            min_params,
            max_params,
            forbids_multiple,
        })
    }

    /// Creates a shared argument: a semantic that takes no children.
    pub fn argument(name: impl Into<String>, cost: f64) -> Rc<Self> {
        Self::new(name, cost, 0, 0, false)
    }

    /// Wraps this function in a childless node, the form rules carry
    /// before reduction supplies children.
    pub fn node(self: &Rc<Self>) -> SemanticNode {
        SemanticNode {
            func: Rc::clone(self),
            children: None,
        }
    }

    /// Wraps this function in a node with the given children.
    pub fn node_with(self: &Rc<Self>, children: Vec<SemanticNode>) -> SemanticNode {
        let mut children = children;
        children.sort_by(compare);
        SemanticNode {
            func: Rc::clone(self),
            children: Some(children),
        }
    }
}

/// One node of a semantic tree.
#[derive(Clone, Debug)]
pub struct SemanticNode {
    /// The function applied at this node.
    pub func: Rc<SemanticFunc>,
    /// Children supplied by reduction, or `None` for arguments and
    /// not-yet-reduced functions.
    pub children: Option<Vec<SemanticNode>>,
}

/// A semantic: an ordered array of nodes.
pub type SemanticTree = Vec<SemanticNode>;

impl PartialEq for SemanticNode {
    fn eq(&self, other: &Self) -> bool {
        func_eq(&self.func, &other.func) && self.children == other.children
    }
}

impl Eq for SemanticNode {}

pub(crate) fn func_eq(a: &Rc<SemanticFunc>, b: &Rc<SemanticFunc>) -> bool {
    Rc::ptr_eq(a, b) || a.name == b.name
}

impl fmt::Display for SemanticNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.func.name)?;
        if let Some(children) = &self.children {
            write!(f, "(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Displays a semantic tree with its nodes joined by commas.
pub struct DisplayTree<'a>(pub &'a [SemanticNode]);

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}
