//! Surface text values. A text value is either a plain string, an
//! inflection table awaiting conjugation, or a sequence of such items
//! produced by an earlier insertion.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A table mapping a grammatical property name (a tense, a case, or a
/// person-number) to the inflected form it selects.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Inflections {
    forms: BTreeMap<String, String>,
}

impl Inflections {
    /// Builds a table from `(property, form)` pairs.
    pub fn new<P, F>(forms: impl IntoIterator<Item = (P, F)>) -> Self
    where
        P: Into<String>,
        F: Into<String>,
    {
        Inflections {
            forms: forms
                .into_iter()
                .map(|(p, f)| (p.into(), f.into()))
                .collect(),
        }
    }

    /// Looks up the form selected by the given property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.forms.get(property).map(|s| &s[..])
    }

    /// Iterates over `(property, form)` pairs in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forms.iter().map(|(p, f)| (&p[..], &f[..]))
    }
}

impl fmt::Display for Inflections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (property, form)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", property, form)?;
        }
        write!(f, "}}")
    }
}

/// One element of a rule's or a derivation's surface text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextItem {
    /// Concrete text.
    Str(String),
    /// Text awaiting conjugation. Shared between the rule and every
    /// derivation that carries it.
    Inflections(Rc<Inflections>),
    /// An ordered run of items, the compiled form of inserted text.
    Seq(Vec<TextItem>),
}

impl TextItem {
    /// Concrete text.
    pub fn str(text: impl Into<String>) -> Self {
        TextItem::Str(text.into())
    }

    /// An inflection table built from `(property, form)` pairs.
    pub fn table<P, F>(forms: impl IntoIterator<Item = (P, F)>) -> Self
    where
        P: Into<String>,
        F: Into<String>,
    {
        TextItem::Inflections(Rc::new(Inflections::new(forms)))
    }
}

impl fmt::Display for TextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextItem::Str(s) => write!(f, "{}", s),
            TextItem::Inflections(table) => write!(f, "{}", table),
            TextItem::Seq(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}
