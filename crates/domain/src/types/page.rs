//! One page of a cursor-paginated listing

use serde::{Deserialize, Serialize};

/// Items of one page plus the cursor for the next one.
///
/// An absent or empty cursor marks the final page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Build a page, folding an empty cursor into `None`.
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor: next_cursor.filter(|cursor| !cursor.is_empty()) }
    }

    /// A page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next_cursor: None }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cursor_means_last_page() {
        assert!(Page::new(vec![1, 2], Some(String::new())).is_last());
        assert!(Page::<u8>::new(vec![], None).is_last());
        assert!(!Page::new(vec![1], Some("abc".into())).is_last());
    }
}
