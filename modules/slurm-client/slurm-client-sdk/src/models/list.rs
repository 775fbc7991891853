//! List results, pagination, and create acknowledgements.

use serde::{Deserialize, Serialize};

/// Client-side page window: skip `offset`, then take at most `limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: Option<usize>,
    pub offset: usize,
}

/// A page of items plus the size of the filtered, unpaginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Filter predicate and page window for one entity's list options.
pub trait ListQuery<E> {
    /// Whether `item` passes every filter set on these options.
    fn matches(&self, item: &E) -> bool;

    fn page(&self) -> Page;
}

/// Filter, then slice `[offset, offset + limit)` clamped to the collection.
pub fn paginate<E, Q>(items: Vec<E>, query: &Q) -> ListResult<E>
where
    Q: ListQuery<E> + ?Sized,
{
    let filtered: Vec<E> = items.into_iter().filter(|i| query.matches(i)).collect();
    let total = filtered.len();
    let page = query.page();
    let items = filtered
        .into_iter()
        .skip(page.offset)
        .take(page.limit.unwrap_or(usize::MAX))
        .collect();
    ListResult { items, total }
}

/// `true` when the filter is empty or contains `value`.
pub(crate) fn accepts<T: PartialEq>(filter: &[T], value: &T) -> bool {
    filter.is_empty() || filter.contains(value)
}

/// `true` when the filter is empty or shares an element with `values`.
pub(crate) fn accepts_any<T: PartialEq>(filter: &[T], values: &[T]) -> bool {
    filter.is_empty() || values.iter().any(|v| filter.contains(v))
}

/// Acknowledgement of a successful create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    /// Identifier of the new entity when the input carried one.
    pub key: Option<String>,
    pub warnings: Vec<String>,
}

/// Acknowledgement of a bulk association create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationsCreated {
    /// Number of accounts or users the associations were requested for.
    pub count: usize,
    pub warnings: Vec<String>,
}
