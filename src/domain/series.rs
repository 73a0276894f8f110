// Normalized station data - labels plus index-aligned series

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesValues {
    pub id: String,
    pub values: Vec<f64>,
}

impl SeriesValues {
    pub fn new(id: String) -> Self {
        Self {
            id,
            values: Vec::new(),
        }
    }
}

/// A data row that was rejected during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the CSV text (the header is line 1).
    pub line: usize,
    pub reason: SkipReason,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    MissingColumn(String),
    TooFewFields { expected: usize, found: usize },
    EmptyField(String),
    InvalidNumber(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingColumn(col) => write!(f, "missing column {}", col),
            SkipReason::TooFewFields { expected, found } => {
                write!(f, "expected at least {} fields, found {}", expected, found)
            }
            SkipReason::EmptyField(col) => write!(f, "empty field {}", col),
            SkipReason::InvalidNumber(col) => write!(f, "invalid number in {}", col),
        }
    }
}

/// Output of one normalization pass. Every series has `labels.len()` values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSeries {
    pub labels: Vec<String>,
    pub series: Vec<SeriesValues>,
    pub skipped: Vec<SkippedRow>,
}

impl NormalizedSeries {
    pub fn with_series<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            labels: Vec::new(),
            series: ids.into_iter().map(SeriesValues::new).collect(),
            skipped: Vec::new(),
        }
    }

    /// Append one reading. `values` must hold one entry per series.
    pub fn push(&mut self, label: String, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.series.len());
        self.labels.push(label);
        for (series, value) in self.series.iter_mut().zip(values) {
            series.values.push(value);
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
