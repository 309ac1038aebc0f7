//! Our symbol sources. You can grab symbols from here.
//!
//! A symbol source is meant to track the number of
//! symbols that were generated, as well as their names
//! (optionally).

use std::{
    borrow::{Borrow, Cow},
    collections::HashMap,
    ops,
    rc::Rc,
};

use crate::Symbol;

/// Wrapper for a string holding a symbol's name. Meant to be cheap to clone.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SymbolName {
    name: Rc<str>,
}

impl ops::Deref for SymbolName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.name[..]
    }
}

impl From<Cow<'_, str>> for SymbolName {
    fn from(value: Cow<'_, str>) -> Self {
        SymbolName {
            name: Rc::from(&*value),
        }
    }
}

impl<'a> From<&'a str> for SymbolName {
    fn from(value: &'a str) -> Self {
        SymbolName {
            name: Rc::from(value),
        }
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.name[..]
    }
}

/// A source of numeric symbols.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    next_id: u32,
    names: Vec<Option<SymbolName>>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for dest in result.iter_mut() {
            *dest = self.next_sym(None);
        }
        result
    }

    /// Returns generated symbols with the given names.
    pub fn with_names<const N: usize, S: Into<Cow<'static, str>>>(
        &mut self,
        names: [S; N],
    ) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for (dest, name) in result.iter_mut().zip(names.into_iter()) {
            *dest = self.next_sym(Some(name.into()));
        }
        result
    }

    /// Generates a new unique symbol.
    pub fn next_sym(&mut self, name: Option<Cow<str>>) -> Symbol {
        let ret = Symbol::from(self.next_id);
        self.next_id += 1;
        self.names.push(name.map(|cow| cow.into()));
        ret
    }

    /// Returns either the formatted name if the given `Symbol` is a gensym,
    /// or the `Symbol`'s exact name.
    ///
    /// Gensyms have no names. That's why we create a 'formatted' name
    /// with the letter `g` followed by the symbol's numeric value.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        match self.names.get(sym.usize()) {
            Some(Some(name)) => Cow::Borrowed(&name[..]),
            Some(None) | None => Cow::Owned(format!("g{}", sym.usize())),
        }
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.next_id as usize
    }

    /// Creates a `HashMap` where you can access a `Symbol`
    /// through its name.
    pub fn name_map(&self) -> HashMap<SymbolName, Symbol> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, opt)| opt.clone().map(|name| (name, Symbol::from(i))))
            .collect::<HashMap<_, _>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_names() {
        let mut source = SymbolSource::new();
        let [a, b] = source.with_names(["start", "word"]);
        let [c] = source.sym();
        assert_eq!(source.name_of(a), "start");
        assert_eq!(source.name_of(b), "word");
        assert_eq!(source.name_of(c), "g2");
        assert_eq!(source.num_syms(), 3);
    }
}
