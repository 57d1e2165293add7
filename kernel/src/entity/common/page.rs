use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Zero-based page index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PageNumber(i64);

impl PageNumber {
    pub fn new(value: impl Into<i64>) -> Self {
        Self(value.into().max(0))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PageSize(i64);

impl PageSize {
    pub fn new(value: impl Into<i64>) -> Self {
        Self(value.into().max(1))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(20)
    }
}

/// Pagination parameters shared by every list operation. Both the SQL path
/// (`offset`/`limit`) and the in-memory path (`slice`) use the same math.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    number: PageNumber,
    size: PageSize,
}

impl PageRequest {
    pub fn new(number: PageNumber, size: PageSize) -> Self {
        Self { number, size }
    }

    pub fn number(&self) -> &PageNumber {
        &self.number
    }

    pub fn size(&self) -> &PageSize {
        &self.size
    }

    pub fn offset(&self) -> i64 {
        self.number.as_ref() * self.size.as_ref()
    }

    pub fn limit(&self) -> i64 {
        *self.size.as_ref()
    }

    /// Paginates an already-filtered collection, keeping the pre-slice
    /// length as the total element count.
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as i64;
        let content = items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit() as usize)
            .collect();
        Page::new(content, self.clone(), total)
    }
}

/// One bounded slice of a result set plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    number: PageNumber,
    size: PageSize,
    total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let PageRequest { number, size } = request;
        Self {
            content,
            number,
            size,
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn number(&self) -> &PageNumber {
        &self.number
    }

    pub fn size(&self) -> &PageSize {
        &self.size
    }

    pub fn total_elements(&self) -> i64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> i64 {
        let size = *self.size.as_ref();
        (self.total_elements + size - 1) / size
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }

    pub fn into_parts(self) -> (Vec<T>, PageNumber, PageSize, i64) {
        (self.content, self.number, self.size, self.total_elements)
    }
}
