//! `lopdf` backed document source

use super::{DictValue, DocumentHandle, EncryptionDictionary};
use crate::error::{ExtractError, ExtractResult};
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

/// Indirect references followed before giving up on a cycle
const MAX_REFERENCE_DEPTH: usize = 32;

/// A parsed PDF document
///
/// The underlying `lopdf::Document` is owned and released when the source is
/// dropped.
pub struct PdfSource {
    document: Document,
}

impl PdfSource {
    /// Read and parse a PDF file
    pub fn open<P: AsRef<Path>>(path: P) -> ExtractResult<Self> {
        let path = path.as_ref();
        tracing::debug!("opening {}", path.display());
        // Read up front so a missing file is reported as IO, not as a parse failure
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a PDF held in memory
    pub fn from_bytes(bytes: &[u8]) -> ExtractResult<Self> {
        let document = Document::load_mem(bytes)?;
        Ok(Self { document })
    }

    /// Wrap an already parsed document
    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> ExtractResult<&'a Object> {
        let mut current = object;
        for _ in 0..MAX_REFERENCE_DEPTH {
            match current {
                Object::Reference(id) => current = self.document.get_object(*id)?,
                _ => return Ok(current),
            }
        }
        Err(ExtractError::SourceParse(
            "indirect reference chain too deep".to_string(),
        ))
    }

    fn read_dictionary(&self, dict: &Dictionary) -> ExtractResult<EncryptionDictionary> {
        let mut out = EncryptionDictionary::new();
        for (key, value) in dict.iter() {
            let value = self.resolve(value)?;
            out.insert(String::from_utf8_lossy(key).into_owned(), to_value(value));
        }
        Ok(out)
    }
}

impl DocumentHandle for PdfSource {
    fn encryption_dictionary(&self) -> ExtractResult<Option<EncryptionDictionary>> {
        let encrypt = match self.document.trailer.get(b"Encrypt") {
            Ok(object) => object,
            Err(_) => return Ok(None),
        };

        match self.resolve(encrypt)? {
            Object::Dictionary(dict) => self.read_dictionary(dict).map(Some),
            Object::Null => Ok(None),
            _ => Err(ExtractError::SourceParse(
                "/Encrypt entry is not a dictionary".to_string(),
            )),
        }
    }

    fn document_identifier(&self) -> ExtractResult<Vec<u8>> {
        let id = self
            .document
            .trailer
            .get(b"ID")
            .map_err(|_| ExtractError::SourceParse("trailer has no /ID entry".to_string()))?;

        let first = match self.resolve(id)? {
            Object::Array(items) => items.first(),
            _ => None,
        }
        .ok_or_else(|| ExtractError::SourceParse("/ID is not a non-empty array".to_string()))?;

        match self.resolve(first)? {
            Object::String(bytes, _) => Ok(bytes.clone()),
            _ => Err(ExtractError::SourceParse(
                "first /ID element is not a string".to_string(),
            )),
        }
    }
}

fn to_value(object: &Object) -> DictValue {
    match object {
        Object::Null => DictValue::Null,
        Object::Boolean(b) => DictValue::Boolean(*b),
        Object::Integer(i) => DictValue::Integer(*i),
        Object::Real(r) => DictValue::Real(f64::from(*r)),
        Object::Name(name) => DictValue::Name(String::from_utf8_lossy(name).into_owned()),
        Object::String(bytes, _) => DictValue::Bytes(bytes.clone()),
        Object::Array(items) => DictValue::Array(items.iter().map(to_value).collect()),
        Object::Dictionary(dict) => DictValue::Dictionary(to_dictionary(dict)),
        Object::Stream(stream) => DictValue::Dictionary(to_dictionary(&stream.dict)),
        Object::Reference((num, generation)) => DictValue::Reference(*num, *generation),
    }
}

fn to_dictionary(dict: &Dictionary) -> EncryptionDictionary {
    let mut out = EncryptionDictionary::new();
    for (key, value) in dict.iter() {
        out.insert(String::from_utf8_lossy(key).into_owned(), to_value(value));
    }
    out
}
