//! The path expander: depth-first enumeration of every derivation below a
//! root nonterminal, bounded by the symbol budget, into a per-rule
//! bucketed store keyed by emitted terminals.

use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;

use crate::error::SearchError;
use crate::local_prelude::*;
use crate::path::{create_path, Path};
use crate::semantic_list::{self, ForcedSemantic};
use crate::SearchOptions;

/// Derivations below one root rule, keyed by their terminal sequence.
pub type Bucket<'g> = BTreeMap<String, Vec<Rc<Path<'g>>>>;

/// Derivations of one root nonterminal, bucketed per root rule.
pub struct PathStore<'g> {
    pub buckets: Vec<Bucket<'g>>,
}

/// Enumerates every derivation of every rule of the root, in rule order
/// and depth-first child order.
pub fn expand_root<'g>(
    grammar: &'g Grammar,
    root: Symbol,
    opts: &SearchOptions,
) -> Result<PathStore<'g>, SearchError> {
    let rules = grammar.rules_for(root);
    let mut store = PathStore {
        buckets: vec![Bucket::new(); rules.len()],
    };
    let root_path = Rc::new(Path::root(root));
    for (index, rule) in rules.iter().enumerate() {
        expand_rule(grammar, &root_path, rule, &mut store.buckets[index], opts)?;
    }
    Ok(store)
}

fn expand_rule<'g>(
    grammar: &'g Grammar,
    prev: &Rc<Path<'g>>,
    rule: &'g Rule,
    bucket: &mut Bucket<'g>,
    opts: &SearchOptions,
) -> Result<(), SearchError> {
    let Some(path) = create_path(prev, rule)? else {
        return Ok(());
    };
    let path = Rc::new(path);
    store_path(bucket, &path, opts)?;
    if path.sym_count < opts.tree_sym_limit {
        if let Some(sym) = path.cur_sym {
            for rule in grammar.rules_for(sym) {
                expand_rule(grammar, &path, rule, bucket, opts)?;
            }
        }
    }
    Ok(())
}

fn store_path<'g>(
    bucket: &mut Bucket<'g>,
    path: &Rc<Path<'g>>,
    opts: &SearchOptions,
) -> Result<(), SearchError> {
    if opts.semantic_check {
        if let ForcedSemantic::Illegal = semantic_list::force_complete(&path.semantic_list) {
            if path.is_complete() {
                return Err(SearchError::ForcedMergeIllegal {
                    terminals: path.terminals.clone(),
                });
            }
            // A latent illegal semantic: drop the derivation from the
            // store, but keep expanding it. The open branches that made
            // the forced merger illegal may still close legally.
            debug!("latent illegal semantic at `{}`", path.terminals);
            return Ok(());
        }
    }
    if opts.complete_trees && !path.is_complete() {
        return Ok(());
    }
    bucket
        .entry(path.terminals.clone())
        .or_default()
        .push(Rc::clone(path));
    Ok(())
}
