use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    ZeroPageSize,
}

impl Display for PaginationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPageSize => write!(f, "page size must be greater than zero"),
        }
    }
}

impl std::error::Error for PaginationError {}

/// The visible slice of a listing.
///
/// `current_page` is already clamped into `1..=total_pages` (or `1` when the
/// listing is empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub current_page: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}

pub fn paginate<T: Clone>(
    items: &[T],
    page_size: usize,
    current_page: usize,
) -> Result<Page<T>, PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::ZeroPageSize);
    }

    let total_pages = items.len().div_ceil(page_size);
    let current_page = clamp_page(current_page, total_pages);
    if total_pages == 0 {
        return Ok(Page {
            items: Vec::new(),
            total_pages,
            current_page,
        });
    }

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Ok(Page {
        items: items[start..end].to_vec(),
        total_pages,
        current_page,
    })
}

fn clamp_page(requested: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        return 1;
    }
    requested.clamp(1, total_pages)
}
