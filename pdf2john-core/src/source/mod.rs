//! Access to the security metadata of a parsed PDF
//!
//! Extraction never walks the PDF object model itself. It reads through
//! [`DocumentHandle`], which [`PdfSource`] implements on top of `lopdf`.

mod pdf;

pub use pdf::PdfSource;

use crate::error::ExtractResult;
use std::fmt;

/// A value stored in an encryption dictionary
#[derive(Debug, Clone, PartialEq)]
pub enum DictValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// Name without the leading slash
    Name(String),
    /// Raw bytes of a literal or hexadecimal string
    Bytes(Vec<u8>),
    Array(Vec<DictValue>),
    Dictionary(EncryptionDictionary),
    Reference(u32, u16),
}

impl DictValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DictValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DictValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            DictValue::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DictValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for DictValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictValue::Null => write!(f, "null"),
            DictValue::Boolean(b) => write!(f, "{b}"),
            DictValue::Integer(i) => write!(f, "{i}"),
            DictValue::Real(r) => write!(f, "{r}"),
            DictValue::Name(name) => write!(f, "/{name}"),
            DictValue::Bytes(bytes) => write!(f, "<{}>", hex::encode(bytes)),
            DictValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            DictValue::Dictionary(dict) => {
                write!(f, "<<")?;
                for (key, value) in dict.iter() {
                    write!(f, " /{key} {value}")?;
                }
                write!(f, " >>")
            }
            DictValue::Reference(num, generation) => write!(f, "{num} {generation} R"),
        }
    }
}

/// Key/value pairs of an `/Encrypt` dictionary in source order
///
/// Keys are stored without their leading slash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncryptionDictionary {
    entries: Vec<(String, DictValue)>,
}

impl EncryptionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing entry with the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: DictValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: DictValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&DictValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An opened document exposing what hash extraction needs
pub trait DocumentHandle {
    /// The resolved `/Encrypt` dictionary, or `None` for an unencrypted document
    fn encryption_dictionary(&self) -> ExtractResult<Option<EncryptionDictionary>>;

    /// First element of the trailer `/ID` array
    fn document_identifier(&self) -> ExtractResult<Vec<u8>>;
}
