//! Grammar representation for the ambiguity detector: rules over named
//! symbols, carrying semantics, surface text, insertions and grammatical
//! properties.

pub mod grammar;
pub mod props;
pub mod rule;
pub mod rule_builder;
pub mod symbol_bit_set;
pub mod text;

pub use crate::grammar::Grammar;
pub use crate::props::{GramProps, PersonNumber};
pub use crate::rule::{Insertion, NonterminalRhs, Rule, RuleRhs, RuleSemantic, TerminalRhs};
pub use crate::rule_builder::RuleBuilder;
pub use crate::symbol_bit_set::SymbolBitSet;
pub use crate::text::{Inflections, TextItem};

mod local_prelude {
    pub use crate::*;
    pub use ambig_symbol::{Symbol, SymbolSource};
}
