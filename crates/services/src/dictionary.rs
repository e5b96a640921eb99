//! Dictionary port and a CC-CEDICT backed implementation.

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LookupError;

/// At most this many glosses are shown per match.
pub const MAX_GLOSSES: usize = 4;

/// Shown in place of a missing phonetic transcription.
pub const PHONETIC_UNAVAILABLE: &str = "N/A";

/// One dictionary hit for a slice of the looked-up phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryMatch {
    pub matched: String,
    pub phonetic: Option<String>,
    pub glosses: Vec<String>,
}

impl DictionaryMatch {
    #[must_use]
    pub fn phonetic_or_unavailable(&self) -> &str {
        self.phonetic.as_deref().unwrap_or(PHONETIC_UNAVAILABLE)
    }

    /// The first `MAX_GLOSSES` glosses, minus classifier notes (`CL:...`).
    pub fn display_glosses(&self) -> impl Iterator<Item = &str> {
        self.glosses
            .iter()
            .take(MAX_GLOSSES)
            .map(String::as_str)
            .filter(|gloss| !gloss.starts_with("CL"))
    }

    fn unknown(matched: String) -> Self {
        Self {
            matched,
            phonetic: None,
            glosses: Vec::new(),
        }
    }
}

/// Looks up phrases on explicit learner request.
pub trait Dictionary {
    /// Segment `phrase` into dictionary matches, produced lazily.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` if the backend cannot serve the request.
    fn lookup<'a>(
        &'a self,
        phrase: &'a str,
    ) -> Result<Box<dyn Iterator<Item = DictionaryMatch> + 'a>, LookupError>;
}

//
// ─── CC-CEDICT ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
struct CedictEntry {
    phonetic: String,
    glosses: Vec<String>,
}

/// In-memory dictionary parsed from the CC-CEDICT text format:
///
/// ```text
/// 你好 你好 [ni3 hao3] /hello/hi/
/// ```
///
/// Both traditional and simplified headwords are indexed. Lookups segment the
/// phrase greedily by longest match.
#[derive(Debug, Clone, Default)]
pub struct CedictDictionary {
    entries: HashMap<String, Vec<CedictEntry>>,
    longest_headword: usize,
}

impl CedictDictionary {
    /// Load a CC-CEDICT file from disk.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Io` if the file cannot be read, or
    /// `LookupError::Parse` for a malformed entry line.
    pub fn open(path: &Path) -> Result<Self, LookupError> {
        let dictionary = Self::from_reader(BufReader::new(File::open(path)?))?;
        log::info!(
            "loaded {} dictionary headwords from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Parse CC-CEDICT text. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` on read failure or a malformed entry line.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LookupError> {
        let mut dictionary = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (traditional, simplified, entry) =
                parse_line(line).map_err(|reason| LookupError::Parse {
                    line: index + 1,
                    reason: reason.to_owned(),
                })?;
            if traditional != simplified {
                dictionary.insert(traditional, entry.clone());
            }
            dictionary.insert(simplified, entry);
        }
        Ok(dictionary)
    }

    fn insert(&mut self, headword: &str, entry: CedictEntry) {
        self.longest_headword = self.longest_headword.max(headword.chars().count());
        self.entries
            .entry(headword.to_owned())
            .or_default()
            .push(entry);
    }

    /// Number of distinct headwords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Result<(&str, &str, CedictEntry), &'static str> {
    let (traditional, rest) = line.split_once(' ').ok_or("missing simplified headword")?;
    let (simplified, rest) = rest.split_once(' ').ok_or("missing pronunciation")?;
    let rest = rest.strip_prefix('[').ok_or("missing '['")?;
    let (phonetic, rest) = rest.split_once(']').ok_or("unterminated pronunciation")?;
    let glosses = rest
        .trim()
        .strip_prefix('/')
        .ok_or("glosses must start with '/'")?
        .split('/')
        .map(str::trim)
        .filter(|gloss| !gloss.is_empty())
        .map(str::to_owned)
        .collect();

    Ok((
        traditional,
        simplified,
        CedictEntry {
            phonetic: phonetic.trim().to_lowercase(),
            glosses,
        },
    ))
}

impl Dictionary for CedictDictionary {
    fn lookup<'a>(
        &'a self,
        phrase: &'a str,
    ) -> Result<Box<dyn Iterator<Item = DictionaryMatch> + 'a>, LookupError> {
        Ok(Box::new(CedictMatches {
            dictionary: self,
            chars: phrase.chars().collect(),
            position: 0,
            pending: VecDeque::new(),
        }))
    }
}

/// Lazy longest-match segmentation over a phrase.
struct CedictMatches<'a> {
    dictionary: &'a CedictDictionary,
    chars: Vec<char>,
    position: usize,
    pending: VecDeque<DictionaryMatch>,
}

impl CedictMatches<'_> {
    fn segment_next(&mut self) {
        let remaining = self.chars.len() - self.position;
        let longest = self.dictionary.longest_headword.min(remaining);

        for len in (1..=longest).rev() {
            let end = self.position + len;
            let candidate: String = self.chars[self.position..end].iter().collect();
            if let Some(entries) = self.dictionary.entries.get(&candidate) {
                let matches = entries.iter().map(|entry| DictionaryMatch {
                    matched: candidate.clone(),
                    phonetic: Some(entry.phonetic.clone()),
                    glosses: entry.glosses.clone(),
                });
                self.pending.extend(matches);
                self.position += len;
                return;
            }
        }

        let unknown = self.chars[self.position].to_string();
        self.pending.push_back(DictionaryMatch::unknown(unknown));
        self.position += 1;
    }
}

impl Iterator for CedictMatches<'_> {
    type Item = DictionaryMatch;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() && self.position < self.chars.len() {
            self.segment_next();
        }
        self.pending.pop_front()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
