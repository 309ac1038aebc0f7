//! The equivalence comparator: decides when two derivations with the same
//! emitted terminals are ambiguous, and prepares the report for each
//! ambiguous pair.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use ambig_semantic as semantic;
use ambig_semantic::DisplayTree;

use crate::continuation::{self, ContItem};
use crate::error::SearchError;
use crate::expand::PathStore;
use crate::local_prelude::*;
use crate::path::Path;
use crate::semantic_list::{self, ForcedSemantic};
use crate::tree::{self, DisplayNode, TreeNode};
use crate::SearchOptions;

/// One element of a derivation's flattened observable text.
#[derive(Clone, Debug, PartialEq)]
pub enum FlatItem {
    Text(TextItem),
    Sym(Symbol),
}

/// A reported ambiguous pair.
#[derive(Clone, Debug)]
pub struct Ambiguity {
    pub root: Symbol,
    /// The shared terminal sequence.
    pub terminals: String,
    pub first: AmbiguousPath,
    pub second: AmbiguousPath,
}

/// One side of an ambiguous pair.
#[derive(Clone, Debug)]
pub struct AmbiguousPath {
    /// The flattened text-and-symbols sequence.
    pub flattened: Vec<FlatItem>,
    /// The force-completed semantic.
    pub semantic: ForcedSemantic,
    /// The parse tree, trimmed against the other side.
    pub tree: TreeNode,
}

/// Flattens a derivation's observable text: accumulated items, then the
/// pending symbol, then the continuation list in order, with adjacent
/// plain strings merged by joining with a space.
pub fn flatten_text_and_syms(path: &Path<'_>) -> Vec<FlatItem> {
    let mut out: Vec<FlatItem> = Vec::new();
    for item in path.text.iter() {
        flatten_into(&mut out, FlatItem::Text(item.clone()));
    }
    if let Some(sym) = path.cur_sym {
        out.push(FlatItem::Sym(sym));
    }
    for item in path.next_item_list.iter() {
        match item {
            ContItem::Text { text, .. } => {
                for item in text {
                    flatten_into(&mut out, FlatItem::Text(item.clone()));
                }
            }
            ContItem::Sym { sym, .. } => out.push(FlatItem::Sym(*sym)),
        }
    }
    out
}

fn flatten_into(out: &mut Vec<FlatItem>, item: FlatItem) {
    match item {
        FlatItem::Text(TextItem::Seq(items)) => {
            for item in items {
                flatten_into(out, FlatItem::Text(item));
            }
        }
        item => {
            if let (Some(FlatItem::Text(TextItem::Str(last))), FlatItem::Text(TextItem::Str(next))) =
                (out.last_mut(), &item)
            {
                last.push(' ');
                last.push_str(next);
                return;
            }
            out.push(item);
        }
    }
}

/// Rightmost-symbol equality: the same pending symbol and the same
/// sequence of pending sibling symbols.
fn rightmost_equal(a: &Path<'_>, b: &Path<'_>) -> bool {
    a.cur_sym == b.cur_sym && continuation::syms_equal(&a.next_item_list, &b.next_item_list)
}

struct Analysis {
    semantic: ForcedSemantic,
    flattened: Vec<FlatItem>,
}

type AnalysisCache<'g> = HashMap<*const Path<'g>, Rc<Analysis>>;

fn analyze<'g>(
    cache: &mut AnalysisCache<'g>,
    path: &Rc<Path<'g>>,
) -> Result<Rc<Analysis>, SearchError> {
    if let Some(found) = cache.get(&Rc::as_ptr(path)) {
        return Ok(Rc::clone(found));
    }
    let semantic = semantic_list::force_complete(&path.semantic_list);
    if matches!(semantic, ForcedSemantic::Illegal) && path.is_complete() {
        // A finished derivation with an illegal merger should have been
        // pruned during enumeration.
        return Err(SearchError::ForcedMergeIllegal {
            terminals: path.terminals.clone(),
        });
    }
    let analysis = Rc::new(Analysis {
        semantic,
        flattened: flatten_text_and_syms(path),
    });
    cache.insert(Rc::as_ptr(path), Rc::clone(&analysis));
    Ok(analysis)
}

fn forced_equal(a: &ForcedSemantic, b: &ForcedSemantic) -> bool {
    match (a, b) {
        (ForcedSemantic::Tree(a), ForcedSemantic::Tree(b)) => {
            semantic::arrays_equal(Some(a), Some(b))
        }
        (ForcedSemantic::Absent, ForcedSemantic::Absent) => true,
        _ => false,
    }
}

/// Compares every cross pair of derivations sharing a terminal sequence
/// across two root-rule buckets. Reports the first ambiguous pair per
/// root, or every distinct pair with `find_all`, deduplicated by their
/// trimmed trees.
pub fn compare_store<'g>(
    root: Symbol,
    store: &PathStore<'g>,
    opts: &SearchOptions,
) -> Result<Vec<Ambiguity>, SearchError> {
    let mut reported = Vec::new();
    let mut seen_pairs: Vec<(TreeNode, TreeNode)> = Vec::new();
    let mut cache = AnalysisCache::new();
    let rule_count = store.buckets.len();

    'search: for i in 0..rule_count {
        for j in (i + 1)..rule_count {
            for (terminals, paths_i) in &store.buckets[i] {
                let Some(paths_j) = store.buckets[j].get(terminals) else {
                    continue;
                };
                // Report the smallest ambiguous pair first. The sort is
                // stable, so ties keep discovery order.
                let mut sorted_i: Vec<_> = paths_i.to_vec();
                sorted_i.sort_by_key(|path| path.sym_count);

                for a in &sorted_i {
                    for b in paths_j {
                        if !rightmost_equal(a, b) {
                            continue;
                        }
                        let analysis_a = analyze(&mut cache, a)?;
                        let analysis_b = analyze(&mut cache, b)?;
                        if matches!(analysis_a.semantic, ForcedSemantic::Illegal)
                            || matches!(analysis_b.semantic, ForcedSemantic::Illegal)
                        {
                            continue;
                        }
                        let semantics_equal =
                            forced_equal(&analysis_a.semantic, &analysis_b.semantic);
                        let text_equal = analysis_a.flattened == analysis_b.flattened;
                        if !(semantics_equal || text_equal) {
                            continue;
                        }

                        let mut tree_a = tree::build(a);
                        let mut tree_b = tree::build(b);
                        tree::trim_common_suffix(&mut tree_a, &mut tree_b);

                        if opts.find_all {
                            let duplicate = seen_pairs.iter().any(|(x, y)| {
                                (*x == tree_a && *y == tree_b) || (*x == tree_b && *y == tree_a)
                            });
                            if duplicate {
                                continue;
                            }
                            seen_pairs.push((tree_a.clone(), tree_b.clone()));
                        }

                        reported.push(Ambiguity {
                            root,
                            terminals: terminals.clone(),
                            first: AmbiguousPath {
                                flattened: analysis_a.flattened.clone(),
                                semantic: analysis_a.semantic.clone(),
                                tree: tree_a,
                            },
                            second: AmbiguousPath {
                                flattened: analysis_b.flattened.clone(),
                                semantic: analysis_b.semantic.clone(),
                                tree: tree_b,
                            },
                        });
                        if !opts.find_all {
                            break 'search;
                        }
                    }
                }
            }
        }
    }
    Ok(reported)
}

/// Renders an ambiguity report with names resolved.
pub struct DisplayAmbiguity<'a> {
    pub ambiguity: &'a Ambiguity,
    pub source: &'a SymbolSource,
}

impl DisplayAmbiguity<'_> {
    fn fmt_side(&self, f: &mut fmt::Formatter<'_>, side: &AmbiguousPath) -> fmt::Result {
        write!(f, "  text:")?;
        for item in &side.flattened {
            match item {
                FlatItem::Text(text) => write!(f, " {}", text)?,
                FlatItem::Sym(sym) => write!(f, " {}", self.source.name_of(*sym))?,
            }
        }
        writeln!(f)?;
        match &side.semantic {
            ForcedSemantic::Tree(tree) => writeln!(
                f,
                "  semantics: {} (cost {})",
                DisplayTree(tree),
                semantic::sum_costs(tree)
            )?,
            ForcedSemantic::Absent => writeln!(f, "  semantics: none")?,
            ForcedSemantic::Illegal => writeln!(f, "  semantics: illegal")?,
        }
        write!(
            f,
            "{}",
            DisplayNode {
                node: &side.tree,
                source: self.source,
            }
        )
    }
}

impl fmt::Display for DisplayAmbiguity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ambiguity of `{}` at `{}`",
            self.source.name_of(self.ambiguity.root),
            self.ambiguity.terminals
        )?;
        self.fmt_side(f, &self.ambiguity.first)?;
        self.fmt_side(f, &self.ambiguity.second)
    }
}
