//! Movie records and the in-memory store they accumulate in
//!
//! Records are appended in listing order during the crawl and never mutated
//! afterwards. The exporter reads the store once at the end of a run.

/// One exported row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    /// Always non-empty
    pub title: String,
    /// Comma-joined, de-duplicated director names
    pub directors: Option<String>,
    /// Four-digit release year
    pub year: Option<String>,
    /// Star rating in half steps, `.` as decimal separator
    pub rating: Option<String>,
}

impl MovieRecord {
    /// Creates a record, returning `None` when the title is blank
    pub fn new(
        title: impl Into<String>,
        directors: Option<String>,
        year: Option<String>,
        rating: Option<String>,
    ) -> Option<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            title,
            directors: directors.filter(|d| !d.is_empty()),
            year: year.filter(|y| !y.is_empty()),
            rating: rating.filter(|r| !r.is_empty()),
        })
    }

    /// Column header of the Letterboxd import format
    pub fn csv_titles() -> [&'static str; 4] {
        ["Title", "Directors", "Year", "Rating"]
    }

    /// Row values in header order, missing fields as empty strings
    pub fn to_csv_row(&self) -> [&str; 4] {
        [
            self.title.as_str(),
            self.directors.as_deref().unwrap_or(""),
            self.year.as_deref().unwrap_or(""),
            self.rating.as_deref().unwrap_or(""),
        ]
    }
}

/// Append-only, ordered collection of extracted records
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<MovieRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MovieRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }
}
