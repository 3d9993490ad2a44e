//! Menu active-state match planning.
//!
//! Pure half of the synchronizer: given the content refs extracted from
//! a menu fragment and the currently displayed ref, decide which entry
//! (if any) should be active. The frontend applies the plan, clearing
//! the whole menu first so at most one entry is ever active.

use crate::content::ContentRef;

/// Index of the entry matching `shown`, by normalized file name.
pub fn find_match(entries: &[ContentRef], shown: &ContentRef) -> Option<usize> {
    if shown.is_empty() {
        return None;
    }
    entries.iter().position(|entry| entry.same_content(shown))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivePlan {
    Activate(usize),
    NoMatch,
}

impl ActivePlan {
    pub fn for_content(entries: &[ContentRef], shown: &ContentRef) -> ActivePlan {
        match find_match(entries, shown) {
            Some(index) => ActivePlan::Activate(index),
            None => ActivePlan::NoMatch,
        }
    }

    pub fn matched(&self) -> bool {
        matches!(self, ActivePlan::Activate(_))
    }
}
