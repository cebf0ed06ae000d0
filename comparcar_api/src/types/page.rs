use serde::{Deserialize, Serialize};

/// One page of a paginated collection, as returned by `GET /cars`.
///
/// Extra fields the backend may include (`pageable`, `sort`, `empty`, ...)
/// are ignored on deserialization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Items on the current page, in backend order.
    pub content: Vec<T>,
    /// Number of items across all pages.
    pub total_elements: i64,
    /// Number of pages. Zero when the collection is empty.
    pub total_pages: i64,
    /// Requested page size.
    pub size: i64,
    /// Zero-based index of this page.
    pub number: i64,
    pub first: bool,
    pub last: bool,
}

impl<T> PageEnvelope<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Index of the previous page, or `None` on the first page.
    pub fn previous_page(&self) -> Option<i64> {
        if self.first || self.number <= 0 {
            None
        } else {
            Some(self.number - 1)
        }
    }

    /// Index of the next page, or `None` on the last page.
    pub fn next_page(&self) -> Option<i64> {
        if self.last || self.number + 1 >= self.total_pages {
            None
        } else {
            Some(self.number + 1)
        }
    }

    /// 1-based position of the first item on this page (0 for an empty page).
    pub fn range_start(&self) -> i64 {
        if self.content.is_empty() {
            0
        } else {
            self.number * self.size + 1
        }
    }

    /// 1-based position of the last item on this page.
    pub fn range_end(&self) -> i64 {
        ((self.number + 1) * self.size).min(self.total_elements)
    }
}

#[cfg(test)]
mod tests {
    use super::PageEnvelope;

    fn envelope(number: i64, total_pages: i64, total_elements: i64, len: usize) -> PageEnvelope<u8> {
        PageEnvelope {
            content: vec![0; len],
            total_elements,
            total_pages,
            size: 20,
            number,
            first: number == 0,
            last: total_pages == 0 || number == total_pages - 1,
        }
    }

    #[test]
    fn first_page_has_no_previous() {
        let page = envelope(0, 3, 57, 20);
        assert_eq!(page.previous_page(), None);
        assert_eq!(page.next_page(), Some(1));
    }

    #[test]
    fn last_page_has_no_next() {
        let page = envelope(2, 3, 57, 17);
        assert_eq!(page.previous_page(), Some(1));
        assert_eq!(page.next_page(), None);
        assert_eq!(page.range_start(), 41);
        assert_eq!(page.range_end(), 57);
    }

    #[test]
    fn empty_collection_is_both_first_and_last() {
        let page = envelope(0, 0, 0, 0);
        assert!(page.first && page.last);
        assert!(page.is_empty());
        assert_eq!(page.previous_page(), None);
        assert_eq!(page.next_page(), None);
        assert_eq!(page.range_start(), 0);
        assert_eq!(page.range_end(), 0);
    }
}
