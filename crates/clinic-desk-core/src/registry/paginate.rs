//! Fixed-size pagination.

use super::{RegistryError, RegistryResult};

/// Slices a sequence into pages of a fixed, positive size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

/// One page of a sequence. Page numbers are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Page actually served, after clamping
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// "Previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// "Next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> RegistryResult<Self> {
        if page_size == 0 {
            return Err(RegistryError::InvalidPageSize(page_size));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Bring a requested page into `1..=total_pages` (page 1 when empty).
    pub fn clamp(&self, len: usize, page: usize) -> usize {
        page.clamp(1, self.total_pages(len).max(1))
    }

    /// Slice `[(page-1)*size, page*size)` of `items`, with the page clamped.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> Page<'a, T> {
        let number = self.clamp(items.len(), page);
        let start = ((number - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());

        Page {
            items: &items[start..end],
            number,
            total_pages: self.total_pages(items.len()),
            total_items: items.len(),
        }
    }
}
