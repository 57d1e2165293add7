use kernel::prelude::entity::Page;
use serde::Serialize;

/// Envelope for every paginated listing.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new<S>(page: Page<S>, f: impl FnMut(S) -> T) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(f);
        let (content, number, size, total_elements) = page.into_parts();
        Self {
            content,
            page_number: number.into(),
            page_size: size.into(),
            total_elements,
            total_pages,
        }
    }
}
