//! Extraction of hash material from a single document

use crate::batch::{BatchReport, FileOutcome};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::encryption::{
    DocumentIdentifier, EncryptionParameters, SecurityHandler, VerificationEntry,
};
use crate::error::{ExtractError, ExtractResult};
use crate::hash::{self, HashDescriptor};
use crate::source::{DocumentHandle, EncryptionDictionary, PdfSource};
use std::path::Path;

/// Name of the only security handler John can attack
const STANDARD_FILTER: &str = "Standard";

/// Options controlling how strictly encryption dictionaries are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Reject dictionaries whose `/Filter` is missing or not `/Standard`
    pub strict: bool,
}

impl ExtractOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Material read from one encrypted document, with its encoded hash
#[derive(Debug, Clone)]
pub struct Extraction {
    parameters: EncryptionParameters,
    identifier: DocumentIdentifier,
    entries: Vec<VerificationEntry>,
    dictionary: EncryptionDictionary,
    descriptor: HashDescriptor,
}

impl Extraction {
    pub fn parameters(&self) -> &EncryptionParameters {
        &self.parameters
    }

    pub fn identifier(&self) -> &DocumentIdentifier {
        &self.identifier
    }

    /// Present, non-empty verification entries in canonical order, untruncated
    pub fn entries(&self) -> &[VerificationEntry] {
        &self.entries
    }

    /// The raw `/Encrypt` dictionary the parameters were read from
    pub fn dictionary(&self) -> &EncryptionDictionary {
        &self.dictionary
    }

    pub fn descriptor(&self) -> &HashDescriptor {
        &self.descriptor
    }
}

/// Reads encryption metadata from documents and encodes John hashes
///
/// ```rust,no_run
/// use pdf2john::PdfHashExtractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = PdfHashExtractor::new();
/// let extraction = extractor.extract_file("secret.pdf")?;
/// println!("{}", extraction.descriptor());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PdfHashExtractor<S = TracingSink> {
    options: ExtractOptions,
    sink: S,
}

impl PdfHashExtractor<TracingSink> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            options,
            sink: TracingSink,
        }
    }
}

impl<S: DiagnosticSink> PdfHashExtractor<S> {
    /// Use `sink` for diagnostics instead of `tracing`
    pub fn with_sink(options: ExtractOptions, sink: S) -> Self {
        Self { options, sink }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Extract from an opened document
    ///
    /// Returns [`ExtractError::NotEncrypted`] when the document has no
    /// `/Encrypt` dictionary.
    pub fn extract<H: DocumentHandle + ?Sized>(&self, handle: &H) -> ExtractResult<Extraction> {
        let dictionary = handle
            .encryption_dictionary()?
            .ok_or(ExtractError::NotEncrypted)?;

        let handler = SecurityHandler::new(&dictionary);
        self.check_filter(handler.filter())?;

        let parameters = EncryptionParameters::from_dictionary(&dictionary, &self.sink)?;
        let identifier = DocumentIdentifier::new(handle.document_identifier()?);
        let entries = handler.entries();

        tracing::debug!(
            "V={} R={} Length={} entries={}",
            parameters.algorithm,
            parameters.revision,
            parameters.key_length,
            entries.len()
        );

        let descriptor = hash::encode(&parameters, &identifier, &entries, &self.sink);

        Ok(Extraction {
            parameters,
            identifier,
            entries,
            dictionary,
            descriptor,
        })
    }

    /// Open, parse and extract from a PDF file
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> ExtractResult<Extraction> {
        let source = PdfSource::open(path)?;
        self.extract(&source)
    }

    /// Parse and extract from a PDF held in memory
    pub fn extract_bytes(&self, bytes: &[u8]) -> ExtractResult<Extraction> {
        let source = PdfSource::from_bytes(bytes)?;
        self.extract(&source)
    }

    /// Extract from one file, keeping the path alongside the result
    pub fn extract_outcome<P: AsRef<Path>>(&self, path: P) -> FileOutcome {
        let path = path.as_ref();
        FileOutcome::new(path, self.extract_file(path))
    }

    /// Extract from each file in turn; a failing file never stops the rest
    pub fn extract_batch<I, P>(&self, paths: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .map(|path| self.extract_outcome(path))
            .collect()
    }

    fn check_filter(&self, filter: Option<&str>) -> ExtractResult<()> {
        match filter {
            Some(STANDARD_FILTER) => Ok(()),
            _ if self.options.strict => Err(ExtractError::MalformedEncryption { field: "Filter" }),
            Some(other) => {
                self.sink.emit(Diagnostic::NonStandardFilter {
                    filter: other.to_string(),
                });
                Ok(())
            }
            None => Ok(()),
        }
    }
}
