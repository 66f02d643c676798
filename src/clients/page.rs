//! Paged response model.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
///
/// Field names are camelCase on the wire (`totalPages`, `numberOfElements`, ...).
///
/// # Example
///
/// ```rust
/// use rest_service::clients::PageResponse;
/// use serde_json::json;
///
/// let page: PageResponse<String> = serde_json::from_value(json!({
///     "content": ["a", "b"],
///     "last": true,
///     "totalPages": 1,
///     "totalElements": 2,
///     "size": 20,
///     "numberOfElements": 2,
///     "number": 0
/// }))
/// .unwrap();
///
/// assert_eq!(page.content, vec!["a", "b"]);
/// assert!(!page.has_next());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Whether this is the last page.
    pub last: bool,
    /// Total number of pages.
    pub total_pages: u64,
    /// Total number of items across all pages.
    pub total_elements: u64,
    /// The requested page size.
    pub size: u64,
    /// Number of items on this page.
    pub number_of_elements: u64,
    /// Zero-based index of this page.
    pub number: u64,
}

impl<T> PageResponse<T> {
    /// Returns `true` if another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.last
    }

    /// Returns `true` if the page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
