//! Sets of symbols in the form of a bit vector.

use std::ops;

use bit_vec::BitVec;

use crate::local_prelude::*;

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the set, sizing it for every symbol of the given source.
    pub fn reset(&mut self, symbol_source: &SymbolSource) {
        self.bit_vec = BitVec::from_elem(symbol_source.num_syms(), false);
    }

    pub fn set(&mut self, index: Symbol, elem: bool) {
        self.bit_vec.set(index.usize(), elem);
    }
}

static TRUE: bool = true;
static FALSE: bool = false;

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, index: Symbol) -> &Self::Output {
        if self.bit_vec.get(index.usize()).unwrap_or(false) {
            &TRUE
        } else {
            &FALSE
        }
    }
}
