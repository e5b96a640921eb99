use std::collections::BTreeMap;
use std::fmt;

use drill_core::model::Record;

/// Number of records per phrase length, to see how much of a word list is
/// single characters versus longer phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseLengthReport {
    counts: BTreeMap<usize, usize>,
}

impl PhraseLengthReport {
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.phrase().chars().count()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// `(phrase length, record count)` pairs, shortest first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(len, count)| (*len, *count))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for PhraseLengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (len, count) in self.iter() {
            writeln!(f, "  - {len}: {count}")?;
        }
        Ok(())
    }
}
