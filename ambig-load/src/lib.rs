//! Loads a compiled grammar from its JSON form.
//!
//! The file maps nonterminal names to arrays of rules. Loading interns
//! every name into a `Symbol` and canonicalizes semantic functions so
//! that equal functions share one allocation.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::convert::AsRef;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use elsa::FrozenIndexSet;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use ambig_grammar::{GramProps, Grammar, TextItem};
use ambig_semantic::{SemanticFunc, SemanticNode, SemanticTree};
use ambig_symbol::Symbol;

pub struct StringInterner {
    set: FrozenIndexSet<String>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            set: FrozenIndexSet::new(),
        }
    }

    pub fn get_or_intern<T>(&self, value: T) -> usize
    where
        T: AsRef<str>,
    {
        self.set.insert_full(value.as_ref().to_string()).0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonicalizes semantic functions: the first occurrence of a name
/// defines the function, later occurrences share it.
struct SemanticInterner {
    funcs: RefCell<HashMap<String, Rc<SemanticFunc>>>,
}

impl SemanticInterner {
    fn new() -> Self {
        SemanticInterner {
            funcs: RefCell::new(HashMap::new()),
        }
    }

    fn resolve(&self, raw: &RawSemanticNode) -> Rc<SemanticFunc> {
        self.funcs
            .borrow_mut()
            .entry(raw.name.clone())
            .or_insert_with(|| {
                SemanticFunc::new(
                    &raw.name[..],
                    raw.cost,
                    raw.min_params,
                    raw.max_params,
                    raw.forbids_multiple,
                )
            })
            .clone()
    }

    fn tree(&self, raw: &[RawSemanticNode]) -> SemanticTree {
        raw.iter().map(|node| self.node(node)).collect()
    }

    fn node(&self, raw: &RawSemanticNode) -> SemanticNode {
        SemanticNode {
            func: self.resolve(raw),
            children: raw.children.as_deref().map(|children| self.tree(children)),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read the grammar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse the grammar file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a rule of `{lhs}` has {len} RHS symbols, expected 1 or 2")]
    BadRhs { lhs: String, len: usize },
    #[error("a terminal rule of `{lhs}` must have exactly one token")]
    BadTerminal { lhs: String },
    #[error("a rule of `{lhs}` has insertion index {index}, expected 0 or 1")]
    BadInsertionIndex { lhs: String, index: usize },
    #[error("an insertion rule of `{lhs}` carries no inserted text")]
    MissingInsertionText { lhs: String },
}

/// The grammar file: nonterminal names mapped to their rules.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct RawGrammar(pub BTreeMap<String, Vec<RawRule>>);

#[derive(Debug, Deserialize)]
pub struct RawRule {
    #[serde(default)]
    pub is_terminal: bool,
    pub rhs: Vec<String>,
    #[serde(default)]
    pub inserted_sym_index: Option<usize>,
    #[serde(default)]
    pub text: Option<RawText>,
    #[serde(default)]
    pub tense: Option<String>,
    #[serde(default)]
    pub is_placeholder: bool,
    #[serde(default)]
    pub is_transposition: bool,
    #[serde(default)]
    pub semantic: Option<Vec<RawSemanticNode>>,
    #[serde(default)]
    pub semantic_is_rhs: bool,
    #[serde(default)]
    pub inserted_semantic: Option<Vec<RawSemanticNode>>,
    #[serde(default)]
    pub gram_props: Option<RawGramProps>,
    #[serde(default)]
    pub person_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Str(String),
    Table(BTreeMap<String, String>),
    Seq(Vec<RawText>),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawGramProps {
    #[serde(default)]
    pub case: Option<String>,
    #[serde(default)]
    pub tense: Option<String>,
    #[serde(default)]
    pub accepted_tense: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSemanticNode {
    pub name: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub min_params: usize,
    #[serde(default)]
    pub max_params: usize,
    #[serde(default)]
    pub forbids_multiple: bool,
    #[serde(default)]
    pub children: Option<Vec<RawSemanticNode>>,
}

/// Loads a grammar from a JSON file.
pub fn load_path(path: impl AsRef<Path>) -> Result<Grammar, LoadError> {
    let contents = fs::read_to_string(path)?;
    load_str(&contents)
}

/// Loads a grammar from JSON text.
pub fn load_str(json: &str) -> Result<Grammar, LoadError> {
    let raw: RawGrammar = serde_json::from_str(json)?;
    let mut grammar = Grammar::new();
    let intern = StringInterner::new();
    let mut sym_map: HashMap<usize, Symbol> = HashMap::new();
    let semantics = SemanticInterner::new();

    let mut sym_of = |name: &str, grammar: &mut Grammar| -> Symbol {
        let id = intern.get_or_intern(name);
        *sym_map
            .entry(id)
            .or_insert_with(|| grammar.next_sym(Some(name.into())))
    };

    for (lhs_name, rules) in &raw.0 {
        let lhs = sym_of(lhs_name, &mut grammar);
        for rule in rules {
            let rhs_syms = if rule.is_terminal {
                if rule.rhs.len() != 1 {
                    return Err(LoadError::BadTerminal {
                        lhs: lhs_name.clone(),
                    });
                }
                None
            } else {
                if !(1..=2).contains(&rule.rhs.len()) {
                    return Err(LoadError::BadRhs {
                        lhs: lhs_name.clone(),
                        len: rule.rhs.len(),
                    });
                }
                Some(
                    rule.rhs
                        .iter()
                        .map(|name| sym_of(name, &mut grammar))
                        .collect::<Vec<_>>(),
                )
            };
            let mut builder = grammar.rule(lhs);
            if let Some(tree) = &rule.semantic {
                let tree = semantics.tree(tree);
                builder = if rule.semantic_is_rhs {
                    builder.rhs_semantic(tree)
                } else {
                    builder.lhs_semantic(tree)
                };
            }
            if let Some(tree) = &rule.inserted_semantic {
                builder = builder.inserted_semantic(semantics.tree(tree));
            }
            if let Some(props) = &rule.gram_props {
                builder = builder.gram_props(Rc::new(GramProps {
                    case: props.case.clone(),
                    tense: props.tense.clone(),
                    accepted_tense: props.accepted_tense.clone(),
                }));
            }
            if let Some(person_number) = &rule.person_number {
                builder = builder.person_number(&person_number[..]);
            }
            if rule.is_transposition {
                builder = builder.transposition();
            }
            match rhs_syms {
                None => {
                    if let Some(tense) = &rule.tense {
                        builder = builder.tense(&tense[..]);
                    }
                    if rule.is_placeholder {
                        builder = builder.placeholder();
                    }
                    match &rule.text {
                        Some(text) => builder.word_with_text(&rule.rhs[0][..], text_item(text)),
                        None => builder.word_silent(&rule.rhs[0][..]),
                    };
                }
                Some(syms) => {
                    if let Some(index) = rule.inserted_sym_index {
                        if index > 1 {
                            return Err(LoadError::BadInsertionIndex {
                                lhs: lhs_name.clone(),
                                index,
                            });
                        }
                        let text = rule.text.as_ref().ok_or_else(|| {
                            LoadError::MissingInsertionText {
                                lhs: lhs_name.clone(),
                            }
                        })?;
                        builder = builder.insert(index, text_items(text));
                    }
                    builder.to(syms);
                }
            }
        }
    }

    grammar.stamp_semantic_capabilities();
    info!(
        "loaded grammar with {} nonterminals",
        grammar.nonterminals().count()
    );
    Ok(grammar)
}

fn text_item(raw: &RawText) -> TextItem {
    match raw {
        RawText::Str(s) => TextItem::str(&s[..]),
        RawText::Table(forms) => TextItem::table(forms.iter().map(|(p, f)| (&p[..], &f[..]))),
        RawText::Seq(items) => TextItem::Seq(items.iter().map(text_item).collect()),
    }
}

/// Inserted text as an item run: a sequence flattens to its elements.
fn text_items(raw: &RawText) -> Vec<TextItem> {
    match raw {
        RawText::Seq(items) => items.iter().map(text_item).collect(),
        other => vec![text_item(other)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambig_grammar::RuleRhs;

    #[test]
    fn test_load_small_grammar() {
        let json = r#"{
            "start": [
                { "rhs": ["np", "vp"] },
                { "rhs": ["vp"], "inserted_sym_index": 0, "text": "you" }
            ],
            "np": [
                { "is_terminal": true, "rhs": ["users"],
                  "semantic": [{ "name": "users", "max_params": 0 }],
                  "semantic_is_rhs": true }
            ],
            "vp": [
                { "is_terminal": true, "rhs": ["sleep"],
                  "text": { "pl": "sleep", "threeSg": "sleeps" } }
            ]
        }"#;

        let grammar = load_str(json).unwrap();
        assert_eq!(grammar.nonterminals().count(), 3);

        let name_map = grammar.sym_source().name_map();
        let start = name_map["start"];
        let rules = grammar.rules_for(start);
        assert_eq!(rules.len(), 2);
        match &rules[1].rhs {
            RuleRhs::Nonterminal(nt) => {
                let insertion = nt.insertion.as_ref().unwrap();
                assert_eq!(insertion.index, 0);
                assert_eq!(insertion.text, vec![TextItem::str("you")]);
                assert!(!nt.rhs_can_produce_semantic);
            }
            RuleRhs::Terminal(_) => panic!("expected a nonterminal rule"),
        }

        let np = name_map["np"];
        let np_rule = &grammar.rules_for(np)[0];
        assert!(np_rule.semantic.as_ref().unwrap().is_reduced);

        // The capability closure marks the branch holding `np`.
        match &grammar.rules_for(start)[0].rhs {
            RuleRhs::Nonterminal(nt) => {
                assert!(nt.rhs_can_produce_semantic);
                assert!(!nt.second_rhs_can_produce_semantic);
            }
            RuleRhs::Terminal(_) => unreachable!(),
        }
    }
}
