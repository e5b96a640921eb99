//! Word list loading and validation.
//!
//! A dataset is rejected as a whole on the first violation; nothing partial is
//! ever returned.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use drill_core::model::{Field, Record, RecordDraft, RecordError, RecordId, ValidationRules};
use thiserror::Error;

/// Number of columns in a record line: phrase, phonetic, meaning.
pub const FIELDS_PER_RECORD: usize = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Fatal dataset problems. `line` is the 1-based source line for CSV input and
/// the 1-based entry index for JSON input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("cannot open {}: {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read record source: {source}")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("line {line}: {field} contains invalid character {ch:?} ({})", .ch.escape_unicode())]
    InvalidAlphabet { line: u64, field: Field, ch: char },

    #[error("line {line}: duplicate phrase {phrase:?} (first seen on line {first_line})")]
    DuplicateKey {
        line: u64,
        phrase: String,
        first_line: u64,
    },

    #[error(
        "line {line}: phrase has {characters} characters but phonetic has {syllables} syllables"
    )]
    StructuralMismatch {
        line: u64,
        characters: usize,
        syllables: usize,
    },
}

impl DatasetError {
    fn from_record(line: u64, err: RecordError) -> Self {
        match err {
            RecordError::InvalidCharacter { field, ch } => {
                Self::InvalidAlphabet { line, field, ch }
            }
            RecordError::StructuralMismatch {
                characters,
                syllables,
            } => Self::StructuralMismatch {
                line,
                characters,
                syllables,
            },
            other => Self::MalformedRecord {
                line,
                reason: other.to_string(),
            },
        }
    }

    fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::Read { source },
            _ => Self::MalformedRecord { line, reason },
        }
    }
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// How a record source is parsed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Lines starting with this byte are skipped without validation.
    pub comment_marker: u8,
    pub rules: ValidationRules,
}

impl LoadOptions {
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.rules.strict = strict;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            comment_marker: b'#',
            rules: ValidationRules::default(),
        }
    }
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

/// Validates drafts one at a time, then checks phrase uniqueness once every
/// record has passed its own checks.
struct DatasetValidator<'a> {
    rules: &'a ValidationRules,
    records: Vec<Record>,
    lines: Vec<u64>,
}

impl<'a> DatasetValidator<'a> {
    fn new(rules: &'a ValidationRules) -> Self {
        Self {
            rules,
            records: Vec::new(),
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: u64, draft: RecordDraft) -> Result<(), DatasetError> {
        let id = RecordId::new(self.records.len());
        let record = draft
            .validate(id, self.rules)
            .map_err(|err| DatasetError::from_record(line, err))?;

        self.records.push(record);
        self.lines.push(line);
        Ok(())
    }

    fn finish(self) -> Result<Vec<Record>, DatasetError> {
        let mut first_seen: HashMap<&str, u64> = HashMap::with_capacity(self.records.len());
        for (record, &line) in self.records.iter().zip(&self.lines) {
            match first_seen.entry(record.phrase()) {
                Entry::Occupied(first) => {
                    return Err(DatasetError::DuplicateKey {
                        line,
                        phrase: record.phrase().to_owned(),
                        first_line: *first.get(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(line);
                }
            }
        }
        Ok(self.records)
    }
}

/// Validate already-parsed drafts, each paired with its source line.
///
/// # Errors
///
/// Returns the first per-record violation in source order. Duplicate phrases
/// are only reported once every record has passed its own checks.
pub fn validate_records(
    drafts: impl IntoIterator<Item = (u64, RecordDraft)>,
    rules: &ValidationRules,
) -> Result<Vec<Record>, DatasetError> {
    let mut validator = DatasetValidator::new(rules);
    for (line, draft) in drafts {
        validator.push(line, draft)?;
    }
    validator.finish()
}

//
// ─── LOADERS ───────────────────────────────────────────────────────────────────
//

/// Load and validate a record source from disk.
///
/// Files ending in `.json` are read as an array of
/// `{"chinese": .., "pinyin": .., "english": ..}` objects; anything else is
/// read as headerless CSV.
///
/// # Errors
///
/// Returns `DatasetError::SourceNotFound` if the file cannot be opened, or the
/// first validation failure.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Vec<Record>, DatasetError> {
    log::debug!("loading dataset from {}", path.display());
    let file = File::open(path).map_err(|source| DatasetError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        load_json_reader(reader, options)?
    } else {
        load_csv_reader(reader, options)?
    };

    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load headerless `phrase,phonetic,meaning` CSV from any reader.
///
/// # Errors
///
/// Returns the first `DatasetError` in source order.
pub fn load_csv_reader<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Vec<Record>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(options.comment_marker))
        .from_reader(reader);

    let mut validator = DatasetValidator::new(&options.rules);
    for row in csv_reader.records() {
        let row = row.map_err(DatasetError::from_csv)?;
        let line = row.position().map_or(0, csv::Position::line);

        if row.len() != FIELDS_PER_RECORD {
            return Err(DatasetError::MalformedRecord {
                line,
                reason: format!("expected {FIELDS_PER_RECORD} fields, found {}", row.len()),
            });
        }

        let draft = RecordDraft::new(&row[0], &row[1], &row[2]);
        validator.push(line, draft)?;
    }

    validator.finish()
}

/// Load a JSON array of records from any reader.
///
/// # Errors
///
/// Returns `DatasetError::MalformedRecord` if the JSON does not match the
/// expected shape, or the first validation failure.
pub fn load_json_reader<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Vec<Record>, DatasetError> {
    let drafts: Vec<RecordDraft> =
        serde_json::from_reader(reader).map_err(|err| DatasetError::MalformedRecord {
            line: u64::try_from(err.line()).unwrap_or(u64::MAX),
            reason: err.to_string(),
        })?;

    validate_records(
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| (u64::try_from(index + 1).unwrap_or(u64::MAX), draft)),
        &options.rules,
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(text: &str) -> Result<Vec<Record>, DatasetError> {
        load_csv_reader(text.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn comments_are_skipped_and_order_kept() {
        let records = load_str(
            "# header comment\n你好,ni3 hao3,hello\n#不,bad,skipped\n谢谢,xie4 xie5,thanks\n",
        );
        // Tone 5 is outside the alphabet, so the last line fails.
        assert!(matches!(records, Err(DatasetError::InvalidAlphabet { ch: '5', .. })));

        let records =
            load_str("# header\n你好,ni3 hao3,hello\n#X,Y,Z\n谢谢,xie4 xie4,thanks\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].phrase(), "你好");
        assert_eq!(records[1].phrase(), "谢谢");
        assert_eq!(records[1].id(), RecordId::new(1));
    }

    #[test]
    fn quoted_meaning_may_contain_commas() {
        let records = load_str("你好,ni3 hao3,\"hello, hi\"\n").unwrap();
        assert_eq!(records[0].meaning(), "hello, hi");
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = load_str("你好,ni3 hao3\n").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { line: 1, .. }));

        let err = load_str("你好,ni3 hao3,hello,extra\n").unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn duplicate_phrase_names_both_lines() {
        let err = load_str("你好,ni3 hao3,hello\n好,hao3,good\n你好,ni3 hao3,hi\n").unwrap_err();
        match err {
            DatasetError::DuplicateKey {
                line,
                phrase,
                first_line,
            } => {
                assert_eq!(line, 3);
                assert_eq!(first_line, 1);
                assert_eq!(phrase, "你好");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn structural_mismatch_only_in_strict_mode() {
        let text = "你好,ni3hao3,hello\n";
        let err = load_str(text).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::StructuralMismatch {
                line: 1,
                characters: 2,
                syllables: 1,
            }
        ));

        let lenient = LoadOptions::default().with_strict(false);
        assert_eq!(load_csv_reader(text.as_bytes(), &lenient).unwrap().len(), 1);
    }

    #[test]
    fn first_violation_wins() {
        // Alphabet error on line 1 is reported before the duplicate on line 3.
        let err = load_str("你a,ni3 a1,x\n好,hao3,good\n好,hao3,good\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidAlphabet {
                line: 1,
                field: Field::Phrase,
                ch: 'a',
            }
        ));
    }

    #[test]
    fn bad_character_after_a_duplicate_is_reported_first() {
        let err = load_str("你好,ni3 hao3,hello\n你好,ni3 hao3,hi\nhi,hai1,hello\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidAlphabet {
                line: 3,
                field: Field::Phrase,
                ch: 'h',
            }
        ));
    }

    #[test]
    fn json_entries_are_validated() {
        let json = r#"[
            {"chinese": "你好", "pinyin": "ni3 hao3", "english": "hello"},
            {"chinese": "谢谢", "pinyin": "xie4 xie4", "english": "thanks"}
        ]"#;
        let records = load_json_reader(json.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].meaning(), "thanks");

        let dup = r#"[
            {"chinese": "你", "pinyin": "ni3", "english": "you"},
            {"chinese": "你", "pinyin": "ni3", "english": "you"}
        ]"#;
        let err = load_json_reader(dup.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::DuplicateKey {
                line: 2,
                first_line: 1,
                ..
            }
        ));
    }

    #[test]
    fn json_with_missing_field_is_malformed() {
        let json = r#"[{"chinese": "你好", "pinyin": "ni3 hao3"}]"#;
        let err = load_json_reader(json.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { .. }));
    }
}
