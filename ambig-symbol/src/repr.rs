use core::num::NonZeroU32;

pub type SymbolRepr = u32;
/// The first usable symbol ID.
pub const FIRST_ID: SymbolRepr = 0;
/// The ID reserved for absent symbols.
pub const NULL_ID: SymbolRepr = !0;

/// A common grammar symbol type.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol(NonZeroU32);

impl Default for Symbol {
    fn default() -> Self {
        FIRST_ID.into()
    }
}

impl From<SymbolRepr> for Symbol {
    #[inline]
    fn from(id: SymbolRepr) -> Self {
        debug_assert_ne!(
            id, NULL_ID,
            "invalid conversion from a null id to non-null Symbol"
        );
        Symbol(NonZeroU32::new(id.wrapping_add(1)).unwrap())
    }
}

impl From<Symbol> for SymbolRepr {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.0.get().wrapping_sub(1)
    }
}

impl Symbol {
    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        let id: SymbolRepr = self.into();
        id as usize
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol::from(id as SymbolRepr)
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.usize()
    }
}
