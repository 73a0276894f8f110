// Header name to field position lookup
use csv::StringRecord;
use std::collections::HashMap;

/// Headers the station export renames. Either spelling resolves to the same
/// column.
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("Dir", "Direzione"),
    ("Pioggia", "Precip"),
    ("Rad.Sol.", "Radiazione"),
];

#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build from the header record. The first occurrence of a duplicated
    /// name wins.
    pub fn from_record(header: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            positions.entry(name.trim().to_string()).or_insert(idx);
        }
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions
            .get(name)
            .or_else(|| alias_of(name).and_then(|alias| self.positions.get(alias)))
            .copied()
    }
}

fn alias_of(name: &str) -> Option<&'static str> {
    HEADER_ALIASES.iter().find_map(|(raw, renamed)| {
        if *raw == name {
            Some(*renamed)
        } else if *renamed == name {
            Some(*raw)
        } else {
            None
        }
    })
}
