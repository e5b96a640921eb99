//! The `lookup` and `check` commands.

use std::io::{self, BufRead, Write};
use std::path::Path;

use services::{Dictionary, DictionaryMatch, LookupError};
use storage::{LoadOptions, PhraseLengthReport};

use crate::console_io::write_matches;

const LOOKUP_PROMPT: &str = "enter symbols (use . to quit): ";
const QUIT: &str = ".";

/// Reads phrases until `.` or end of input and prints their dictionary matches.
///
/// # Errors
///
/// Returns an error if the terminal fails. Lookup failures are printed and
/// the loop continues.
pub fn run_lookup(
    dictionary: &dyn Dictionary,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{LOOKUP_PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let phrase = line.trim();
        if phrase == QUIT {
            return Ok(());
        }
        if phrase.is_empty() {
            continue;
        }

        match lookup_all(dictionary, phrase) {
            Ok(matches) => {
                writeln!(output)?;
                write_matches(output, &matches)?;
                writeln!(output)?;
            }
            Err(err) => writeln!(output, "lookup failed: {err}")?,
        }
    }
}

fn lookup_all(
    dictionary: &dyn Dictionary,
    phrase: &str,
) -> Result<Vec<DictionaryMatch>, LookupError> {
    Ok(dictionary.lookup(phrase)?.collect())
}

/// A phrase segment the dictionary has no entry for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSegment {
    pub phrase: String,
    pub segment: String,
}

/// Summary of one checked word list.
#[derive(Debug)]
pub struct FileCheck {
    pub lengths: PhraseLengthReport,
    pub unknown: Vec<UnknownSegment>,
}

/// Validates a word list and, given a dictionary, looks up every phrase in it.
///
/// # Errors
///
/// Returns the first dataset violation, or the dictionary error that stopped
/// the lookups.
pub fn check_file(
    path: &Path,
    options: &LoadOptions,
    dictionary: Option<&dyn Dictionary>,
) -> Result<FileCheck, CheckError> {
    let records = storage::load(path, options)?;
    let lengths = PhraseLengthReport::from_records(&records);

    let mut unknown = Vec::new();
    if let Some(dictionary) = dictionary {
        for record in &records {
            for hit in dictionary.lookup(record.phrase())? {
                if hit.phonetic.is_none() {
                    unknown.push(UnknownSegment {
                        phrase: record.phrase().to_owned(),
                        segment: hit.matched,
                    });
                }
            }
        }
    }
    log::debug!("{}: {} unknown segments", path.display(), unknown.len());
    Ok(FileCheck { lengths, unknown })
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Dataset(#[from] storage::DatasetError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
