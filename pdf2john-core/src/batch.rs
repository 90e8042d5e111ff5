//! Results of extracting from several files
//!
//! Files are processed one after another. Each file keeps its own result, so
//! an unencrypted or unreadable file only affects its own line of output.

use crate::error::{ExtractError, ExtractResult};
use crate::extractor::Extraction;
use crate::hash::HashDescriptor;
use std::fmt;
use std::path::{Path, PathBuf};

/// Result of extracting from one file
#[derive(Debug)]
pub struct FileOutcome {
    path: PathBuf,
    result: ExtractResult<Extraction>,
}

impl FileOutcome {
    pub fn new(path: impl Into<PathBuf>, result: ExtractResult<Extraction>) -> Self {
        Self {
            path: path.into(),
            result,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn result(&self) -> &ExtractResult<Extraction> {
        &self.result
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn extraction(&self) -> Option<&Extraction> {
        self.result.as_ref().ok()
    }

    pub fn descriptor(&self) -> Option<&HashDescriptor> {
        self.extraction().map(Extraction::descriptor)
    }

    pub fn error(&self) -> Option<&ExtractError> {
        self.result.as_ref().err()
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(extraction) => write!(f, "{}", extraction.descriptor()),
            Err(ExtractError::NotEncrypted) => {
                write!(f, "{} is not encrypted", self.path.display())
            }
            Err(err) => write!(f, "{} : {err}", self.path.display()),
        }
    }
}

/// Outcomes of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// True when every file produced a hash; an empty batch counts as success
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_success)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl FromIterator<FileOutcome> for BatchReport {
    fn from_iter<T: IntoIterator<Item = FileOutcome>>(iter: T) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}
