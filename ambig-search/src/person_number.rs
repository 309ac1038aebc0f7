//! The person-number list: properties awaiting application to a verb
//! below the rule that declared them.

use rpds::List;

use crate::continuation::ContList;
use crate::local_prelude::*;

/// One declared person-number property, scoped to the subtree of the rule
/// that declared it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PnEntry {
    pub person_number: PersonNumber,
    /// The continuation size when the declaring rule was taken, or −1 when
    /// the list was empty. The entry expires once the continuation list
    /// shrinks below this size; −1 never expires.
    pub size_at_insertion: isize,
}

pub type PnList = List<PnEntry>;

fn recorded_size(continuations: &ContList) -> isize {
    if continuations.is_empty() {
        -1
    } else {
        continuations.len() as isize
    }
}

/// Declares a property. Entries recorded at a larger continuation size
/// belong to sibling subtrees that have already closed, so the new
/// property shadows them.
pub fn push(list: &PnList, person_number: PersonNumber, continuations: &ContList) -> PnList {
    let size_at_insertion = recorded_size(continuations);
    let mut list = list.clone();
    while let Some(head) = list.first() {
        if head.size_at_insertion > size_at_insertion {
            list = list.drop_first().expect("nonempty list");
        } else {
            break;
        }
    }
    list.push_front(PnEntry {
        person_number,
        size_at_insertion,
    })
}

/// Expires entries whose subtree has closed: the continuation list has
/// shrunk below the size recorded at their insertion.
pub fn truncate(list: &PnList, continuations: &ContList) -> PnList {
    let current = continuations.len() as isize;
    let mut list = list.clone();
    while let Some(head) = list.first() {
        if current < head.size_at_insertion {
            list = list.drop_first().expect("nonempty list");
        } else {
            break;
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuation;

    #[test]
    fn test_scope_expires_with_subtree() {
        let [sibling] = {
            let mut source = SymbolSource::new();
            source.sym()
        };
        // A rule declares `pl` while one ancestor sibling is pending.
        let one_pending = continuation::push_sibling(&ContList::new(), sibling, None, false);
        let list = push(&PnList::new(), "pl".into(), &one_pending);
        assert_eq!(list.first().unwrap().size_at_insertion, 1);

        // While the sibling is still pending, the entry survives.
        let kept = truncate(&list, &one_pending);
        assert_eq!(kept.len(), 1);

        // Once the continuation list drains past it, the entry expires.
        let expired = truncate(&list, &ContList::new());
        assert!(expired.is_empty());
    }

    #[test]
    fn test_root_level_declaration_never_expires() {
        let list = push(&PnList::new(), "pl".into(), &ContList::new());
        assert_eq!(list.first().unwrap().size_at_insertion, -1);
        let kept = truncate(&list, &ContList::new());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_newer_declaration_shadows_closed_sibling_scope() {
        let [sibling] = {
            let mut source = SymbolSource::new();
            source.sym()
        };
        let one_pending = continuation::push_sibling(&ContList::new(), sibling, None, false);
        let list = push(&PnList::new(), "threeSg".into(), &one_pending);
        // A later declaration at the root level drops the stale entry.
        let list = push(&list, "pl".into(), &ContList::new());
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().unwrap().person_number, "pl".into());
    }
}
