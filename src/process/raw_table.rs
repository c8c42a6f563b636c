/// A scraped table before any typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names as rendered on the page, untrimmed.
    /// Rendered headers commonly carry incidental whitespace.
    pub headers: Vec<String>,
    /// Each body row, one String per cell in header order.
    pub rows: Vec<Vec<String>>,
}
