// File: src/extract.rs
// Purpose: Pull a control's value out of submitted data by its HTML name

use indexmap::IndexMap;

use crate::error::Result;
use crate::http_data::HttpData;
use crate::sanitize::{sanitize, DataType, Sanitized};

/// Suffix marking a multi-value field
pub const LIST_SUFFIX: &str = "[]";

/// Result of extracting one control's value
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Nothing usable was submitted
    Absent,
    /// Single sanitized value
    Value(Sanitized),
    /// Multi-value field, re-indexed
    List(Vec<Sanitized>),
    /// Multi-value field with submitted keys preserved
    Map(IndexMap<String, Sanitized>),
}

impl Extracted {
    pub fn is_absent(&self) -> bool {
        matches!(self, Extracted::Absent)
    }

    /// The single value, if this is one
    pub fn value(&self) -> Option<&Sanitized> {
        match self {
            Extracted::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Text of a single value
    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Sanitized::as_str)
    }

    /// Text items of a list or map, in order
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Extracted::List(items) => items.iter().filter_map(Sanitized::as_str).collect(),
            Extracted::Map(items) => items.values().filter_map(Sanitized::as_str).collect(),
            Extracted::Value(v) => v.as_str().into_iter().collect(),
            Extracted::Absent => Vec::new(),
        }
    }
}

/// Split an HTML field name into lookup segments
///
/// `user[address][street]` becomes `["user", "address", "street"]`; `[]` is
/// dropped and `.` maps to `_` the same way the query decoder stores keys.
pub fn field_path(html_name: &str) -> Vec<String> {
    html_name
        .replace(LIST_SUFFIX, "")
        .replace(']', "")
        .replace('.', "_")
        .split('[')
        .map(str::to_string)
        .collect()
}

/// Extract and sanitize the value submitted under `html_name`
pub fn extract_http_data(data: &HttpData, html_name: &str, data_type: DataType) -> Extracted {
    let path = field_path(html_name);
    let raw = data.get_path(&path);

    let extracted = if html_name.ends_with(LIST_SUFFIX) {
        let items = raw.and_then(|v| v.as_map());
        let sanitized = items
            .into_iter()
            .flatten()
            .filter_map(|(key, value)| Some((key.clone(), sanitize(data_type.kind, value)?)));

        if data_type.keys {
            Extracted::Map(sanitized.collect())
        } else {
            Extracted::List(sanitized.map(|(_, v)| v).collect())
        }
    } else {
        raw.and_then(|v| sanitize(data_type.kind, v))
            .map_or(Extracted::Absent, Extracted::Value)
    };

    tracing::trace!(name = html_name, ?path, ?extracted, "extracted form field");
    extracted
}

/// Extract using the numeric type flags (`kind | DataType::KEYS`)
pub fn extract_http_data_bits(data: &HttpData, html_name: &str, bits: u8) -> Result<Extracted> {
    Ok(extract_http_data(data, html_name, DataType::from_bits(bits)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::http_data::{FileUpload, HttpValue};
    use crate::sanitize::DataKind;

    fn text(s: &str) -> Sanitized {
        Sanitized::Text(s.to_string())
    }

    #[test]
    fn test_field_path() {
        assert_eq!(field_path("name"), vec!["name"]);
        assert_eq!(field_path("user[address][street]"), vec!["user", "address", "street"]);
        assert_eq!(field_path("tags[]"), vec!["tags"]);
        assert_eq!(field_path("first.name"), vec!["first_name"]);
    }

    #[test]
    fn test_scalar_field() {
        let data = HttpData::new().with("name", "  Jane \n");
        assert_eq!(
            extract_http_data(&data, "name", DataKind::Line.into()),
            Extracted::Value(text("Jane"))
        );
        assert_eq!(
            extract_http_data(&data, "missing", DataKind::Line.into()),
            Extracted::Absent
        );
    }

    #[test]
    fn test_list_field_reindexes() {
        let data = HttpData::new().with("tags", HttpValue::list(["a", "", "b"]));
        assert_eq!(
            extract_http_data(&data, "tags[]", DataKind::Line.into()),
            Extracted::List(vec![text("a"), text("b")])
        );
    }

    #[test]
    fn test_list_field_preserves_keys() {
        let data = HttpData::new().with("tags", HttpValue::list(["a", "", "b"]));
        let extracted = extract_http_data(&data, "tags[]", DataType::new(DataKind::Line).with_keys());

        let Extracted::Map(map) = extracted else {
            panic!("expected map, got {:?}", extracted);
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["0", "2"]);
        assert_eq!(map["2"], text("b"));
    }

    #[test]
    fn test_list_field_never_scalar() {
        let data = HttpData::new().with("tags", "solo");
        assert_eq!(
            extract_http_data(&data, "tags[]", DataKind::Text.into()),
            Extracted::List(vec![])
        );
        assert_eq!(
            extract_http_data(&data, "other[]", DataType::new(DataKind::Text).with_keys()),
            Extracted::Map(IndexMap::new())
        );
    }

    #[test]
    fn test_nested_field_from_query() {
        let data = HttpData::from_query("user[address][street]=Main+St&user[tags][]=x&user[tags][]=y");
        assert_eq!(
            extract_http_data(&data, "user[address][street]", DataKind::Line.into()).as_str(),
            Some("Main St")
        );
        assert_eq!(
            extract_http_data(&data, "user[tags][]", DataKind::Line.into()).texts(),
            vec!["x", "y"]
        );
    }

    #[test]
    fn test_file_field() {
        let upload = FileUpload::new("photo.png", 2048);
        let data = HttpData::new()
            .with("avatar", upload.clone())
            .with("docs", HttpValue::list([HttpValue::from(upload.clone()), HttpValue::from("x")]));

        assert_eq!(
            extract_http_data(&data, "avatar", DataKind::File.into()),
            Extracted::Value(Sanitized::File(upload.clone()))
        );
        assert_eq!(
            extract_http_data(&data, "docs[]", DataKind::File.into()),
            Extracted::List(vec![Sanitized::File(upload)])
        );
    }

    #[test]
    fn test_bits_entry_point() {
        let data = HttpData::new().with("tags", HttpValue::list(["a"]));
        assert_eq!(
            extract_http_data_bits(&data, "tags[]", 2 | DataType::KEYS).unwrap().texts(),
            vec!["a"]
        );
        assert_eq!(
            extract_http_data_bits(&data, "tags[]", 0b1100),
            Err(FormError::UnknownDataType(0b1100))
        );
    }
}
