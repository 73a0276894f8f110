// CSV normalizer - turns a station export into index-aligned series
use crate::domain::column_index::ColumnIndex;
use crate::domain::compass::compass_to_degrees;
use crate::domain::series::{NormalizedSeries, SkipReason, SkippedRow};
use crate::infrastructure::config::{Column, InvalidValuePolicy, PipelineConfig, ValueKind};

/// Rows carrying this marker describe units, not readings.
pub const UNITS_MARKER: &str = "Unita di misura";

#[derive(Debug)]
struct FieldLayout {
    column: String,
    idx: usize,
    kind: ValueKind,
    required: bool,
}

/// Field positions of one pipeline, resolved against a header.
#[derive(Debug)]
struct RowLayout {
    date: usize,
    time: usize,
    fields: Vec<FieldLayout>,
    width: usize,
}

impl RowLayout {
    fn resolve(pipeline: &PipelineConfig, index: &ColumnIndex) -> Result<Self, String> {
        let lookup = |column: &Column| match column {
            Column::Position(idx) => Ok(*idx),
            Column::Header(name) => index.position(name).ok_or_else(|| name.clone()),
        };

        let date = lookup(&pipeline.date)?;
        let time = lookup(&pipeline.time)?;
        let fields = pipeline
            .series
            .iter()
            .map(|s| -> Result<FieldLayout, String> {
                Ok(FieldLayout {
                    column: s.column.to_string(),
                    idx: lookup(&s.column)?,
                    kind: s.kind,
                    required: s.required,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        let width = fields
            .iter()
            .map(|f| f.idx)
            .chain([date, time])
            .max()
            .unwrap_or(0)
            + 1;

        Ok(Self {
            date,
            time,
            fields,
            width,
        })
    }

    fn read(
        &self,
        fields: &[&str],
        policy: InvalidValuePolicy,
    ) -> Result<(String, Vec<f64>), SkipReason> {
        if fields.len() < self.width {
            return Err(SkipReason::TooFewFields {
                expected: self.width,
                found: fields.len(),
            });
        }

        let date = fields[self.date].trim();
        if date.is_empty() {
            return Err(SkipReason::EmptyField("date".to_string()));
        }
        let time = fields[self.time].trim();
        if time.is_empty() {
            return Err(SkipReason::EmptyField("time".to_string()));
        }

        // Required fields are checked before any value is converted so a
        // rejected row never yields a partial reading.
        if let Some(f) = self
            .fields
            .iter()
            .find(|f| f.required && fields[f.idx].trim().is_empty())
        {
            return Err(SkipReason::EmptyField(f.column.clone()));
        }

        let mut values = Vec::with_capacity(self.fields.len());
        for f in &self.fields {
            let raw = fields[f.idx].trim();
            let value = match f.kind {
                ValueKind::Compass => compass_to_degrees(raw),
                ValueKind::Numeric => match (parse_decimal(raw), policy) {
                    (Some(v), _) => v,
                    (None, InvalidValuePolicy::Placeholder) => f64::NAN,
                    (None, InvalidValuePolicy::SkipRow) if raw.is_empty() => {
                        return Err(SkipReason::EmptyField(f.column.clone()));
                    }
                    (None, InvalidValuePolicy::SkipRow) => {
                        return Err(SkipReason::InvalidNumber(f.column.clone()));
                    }
                },
            };
            values.push(value);
        }

        Ok((format!("{} {}", date, time), values))
    }
}

/// Parse a decimal-comma number such as `1013,2`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Normalize CSV text for one pipeline. Never fails: malformed rows are
/// logged, recorded in `skipped` and left out.
pub fn normalize(text: &str, pipeline: &PipelineConfig) -> NormalizedSeries {
    let mut out = NormalizedSeries::with_series(pipeline.series.iter().map(|s| s.id.clone()));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(Ok(header)) => header,
        Some(Err(err)) => {
            tracing::warn!(pipeline = %pipeline.id, error = %err, "unreadable CSV header");
            return out;
        }
        None => return out,
    };

    let index = ColumnIndex::from_record(&header);
    let layout = RowLayout::resolve(pipeline, &index);
    if let Err(missing) = &layout {
        tracing::warn!(
            pipeline = %pipeline.id,
            column = %missing,
            "column not found in CSV header"
        );
    }

    for result in records {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(pipeline = %pipeline.id, error = %err, "unreadable CSV row");
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        let blank = fields.len() == 1 && fields[0].trim().is_empty();
        if blank || fields.iter().any(|f| f.contains(UNITS_MARKER))
        {
            continue;
        }

        let result = match &layout {
            Ok(layout) => layout.read(&fields, pipeline.invalid_values),
            Err(missing) => Err(SkipReason::MissingColumn(missing.clone())),
        };

        match result {
            Ok((label, values)) => out.push(label, values),
            Err(reason) => {
                let skipped = SkippedRow {
                    line: record.position().map(|p| p.line() as usize).unwrap_or(0),
                    reason,
                    fields: fields.iter().map(|f| f.to_string()).collect(),
                };
                tracing::warn!(
                    pipeline = %pipeline.id,
                    line = skipped.line,
                    reason = %skipped.reason,
                    fields = ?skipped.fields,
                    "skipping malformed row"
                );
                out.skipped.push(skipped);
            }
        }
    }

    tracing::debug!(
        pipeline = %pipeline.id,
        rows = out.len(),
        skipped = out.skipped.len(),
        "normalized CSV"
    );
    out
}
