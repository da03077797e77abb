// File: src/sanitize.rs
// Purpose: Normalize one submitted value to its declared data type

use crate::error::{FormError, Result};
use crate::http_data::{FileUpload, HttpValue};

/// Semantic type of a submitted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Multi-line free text; line endings normalized to `\n`
    Text = 1,
    /// Single line; newlines become spaces and the result is trimmed
    Line = 2,
    /// File upload handle
    File = 3,
}

impl DataKind {
    /// Decode the numeric type tag
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            1 => Ok(DataKind::Text),
            2 => Ok(DataKind::Line),
            3 => Ok(DataKind::File),
            other => Err(FormError::UnknownDataType(other)),
        }
    }
}

/// Data type of a control: base kind plus the key-preservation modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub kind: DataKind,
    /// For list fields, keep submitted keys instead of re-indexing
    pub keys: bool,
}

impl DataType {
    /// Flag marking key preservation in the bit form
    pub const KEYS: u8 = 0b1000;

    pub const fn new(kind: DataKind) -> Self {
        Self { kind, keys: false }
    }

    pub const fn with_keys(mut self) -> Self {
        self.keys = true;
        self
    }

    /// Decode the composite bit form (`kind | KEYS`)
    pub fn from_bits(bits: u8) -> Result<Self> {
        let kind = DataKind::from_bits(bits & !Self::KEYS)
            .map_err(|_| FormError::UnknownDataType(bits))?;
        Ok(Self {
            kind,
            keys: bits & Self::KEYS != 0,
        })
    }

    pub fn bits(&self) -> u8 {
        self.kind as u8 | if self.keys { Self::KEYS } else { 0 }
    }
}

impl From<DataKind> for DataType {
    fn from(kind: DataKind) -> Self {
        Self::new(kind)
    }
}

/// A value that passed sanitization
#[derive(Debug, Clone, PartialEq)]
pub enum Sanitized {
    Text(String),
    File(FileUpload),
}

impl Sanitized {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Sanitized::Text(s) => Some(s),
            Sanitized::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileUpload> {
        match self {
            Sanitized::File(f) => Some(f),
            Sanitized::Text(_) => None,
        }
    }
}

/// Sanitize a raw value; `None` marks a value that does not fit the type
pub fn sanitize(kind: DataKind, value: &HttpValue) -> Option<Sanitized> {
    match kind {
        DataKind::Text => value
            .scalar_string()
            .map(|s| Sanitized::Text(normalize_newlines(&s))),
        DataKind::Line => {
            let line = value.scalar_string()?.replace(&['\r', '\n'][..], " ");
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(Sanitized::Text(line.to_string()))
            }
        }
        DataKind::File => match value {
            HttpValue::File(file) => Some(Sanitized::File(file.clone())),
            _ => None,
        },
    }
}

/// Sanitize using a numeric type tag
pub fn sanitize_bits(bits: u8, value: &HttpValue) -> Result<Option<Sanitized>> {
    Ok(sanitize(DataKind::from_bits(bits)?, value))
}

/// Convert `\r\n` and lone `\r` to `\n`
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_normalizes_newlines() {
        let value = HttpValue::from("a\r\nb\rc\nd");
        assert_eq!(
            sanitize(DataKind::Text, &value),
            Some(Sanitized::Text("a\nb\nc\nd".into()))
        );
    }

    #[test]
    fn test_text_keeps_empty_string() {
        assert_eq!(
            sanitize(DataKind::Text, &HttpValue::from("")),
            Some(Sanitized::Text(String::new()))
        );
    }

    #[test]
    fn test_line_collapses_and_trims() {
        let value = HttpValue::from("  hello\r\nworld \n");
        assert_eq!(
            sanitize(DataKind::Line, &value),
            Some(Sanitized::Text("hello  world".into()))
        );
    }

    #[test]
    fn test_line_blank_is_absent() {
        assert_eq!(sanitize(DataKind::Line, &HttpValue::from("")), None);
        assert_eq!(sanitize(DataKind::Line, &HttpValue::from(" \r\n ")), None);
    }

    #[test]
    fn test_scalars_only() {
        let list = HttpValue::list(["a"]);
        let file = HttpValue::File(FileUpload::new("a.txt", 3));
        assert_eq!(sanitize(DataKind::Text, &list), None);
        assert_eq!(sanitize(DataKind::Line, &file), None);
        assert_eq!(
            sanitize(DataKind::Line, &HttpValue::Number(42.0)),
            Some(Sanitized::Text("42".into()))
        );
        assert_eq!(
            sanitize(DataKind::Text, &HttpValue::Number(1e20)),
            Some(Sanitized::Text("100000000000000000000".into()))
        );
    }

    #[test]
    fn test_file_only_accepts_uploads() {
        let upload = FileUpload::new("cv.pdf", 1024).with_content_type("application/pdf");
        assert_eq!(
            sanitize(DataKind::File, &HttpValue::File(upload.clone())),
            Some(Sanitized::File(upload))
        );
        assert_eq!(sanitize(DataKind::File, &HttpValue::from("cv.pdf")), None);
    }

    #[test]
    fn test_unknown_type_tag() {
        assert_eq!(DataKind::from_bits(0), Err(FormError::UnknownDataType(0)));
        assert_eq!(DataKind::from_bits(7), Err(FormError::UnknownDataType(7)));
        assert!(sanitize_bits(4, &HttpValue::from("x")).is_err());
    }

    #[test]
    fn test_data_type_bits() {
        let ty = DataType::from_bits(2 | DataType::KEYS).unwrap();
        assert_eq!(ty, DataType::new(DataKind::Line).with_keys());
        assert_eq!(ty.bits(), 0b1010);
        assert_eq!(
            DataType::from_bits(DataType::KEYS),
            Err(FormError::UnknownDataType(DataType::KEYS))
        );
    }
}
