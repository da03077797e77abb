// File: src/http_data.rs
// Purpose: Submitted form data container (nested values and file uploads)

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// An uploaded file as handed over by the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileUpload {
    /// Client-supplied file name
    pub name: String,
    /// Client-supplied MIME type
    pub content_type: Option<String>,
    /// Size in bytes
    pub size: u64,
    /// Where the HTTP layer stored the upload
    pub temp_path: Option<PathBuf>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            ..Default::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_temp_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_path = Some(path.into());
        self
    }
}

/// One submitted value
///
/// Lists are represented as maps keyed `"0"`, `"1"`, ... so that key
/// preservation works the same for lists and keyed groups.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpValue {
    Text(String),
    Number(f64),
    Bool(bool),
    File(FileUpload),
    Map(IndexMap<String, HttpValue>),
}

impl HttpValue {
    /// Build a list value with sequential keys
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<HttpValue>,
    {
        HttpValue::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.into()))
                .collect(),
        )
    }

    /// Text, number and boolean values are scalars
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            HttpValue::Text(_) | HttpValue::Number(_) | HttpValue::Bool(_)
        )
    }

    /// String form of a scalar value
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            HttpValue::Text(s) => Some(s.clone()),
            HttpValue::Number(n) => {
                // Integral numbers render without the fraction, at any magnitude
                if *n == 0.0 {
                    Some("0".to_string())
                } else if n.fract() == 0.0 && n.is_finite() {
                    Some(format!("{:.0}", n))
                } else {
                    Some(n.to_string())
                }
            }
            HttpValue::Bool(true) => Some("1".to_string()),
            HttpValue::Bool(false) => Some(String::new()),
            HttpValue::File(_) | HttpValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, HttpValue>> {
        match self {
            HttpValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert a JSON value; `null` has no counterpart and yields `None`
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => None,
            JsonValue::Bool(b) => Some(HttpValue::Bool(*b)),
            JsonValue::Number(n) => n.as_f64().map(HttpValue::Number),
            JsonValue::String(s) => Some(HttpValue::Text(s.clone())),
            JsonValue::Array(items) => Some(HttpValue::Map(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| Some((i.to_string(), HttpValue::from_json(v)?)))
                    .collect(),
            )),
            JsonValue::Object(map) => Some(HttpValue::Map(
                map.iter()
                    .filter_map(|(k, v)| Some((k.clone(), HttpValue::from_json(v)?)))
                    .collect(),
            )),
        }
    }
}

impl From<String> for HttpValue {
    fn from(s: String) -> Self {
        HttpValue::Text(s)
    }
}

impl From<&str> for HttpValue {
    fn from(s: &str) -> Self {
        HttpValue::Text(s.to_string())
    }
}

impl From<f64> for HttpValue {
    fn from(n: f64) -> Self {
        HttpValue::Number(n)
    }
}

impl From<i64> for HttpValue {
    fn from(n: i64) -> Self {
        HttpValue::Number(n as f64)
    }
}

impl From<bool> for HttpValue {
    fn from(b: bool) -> Self {
        HttpValue::Bool(b)
    }
}

impl From<FileUpload> for HttpValue {
    fn from(file: FileUpload) -> Self {
        HttpValue::File(file)
    }
}

impl From<IndexMap<String, HttpValue>> for HttpValue {
    fn from(map: IndexMap<String, HttpValue>) -> Self {
        HttpValue::Map(map)
    }
}

/// Submitted form data from POST/PUT requests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpData {
    fields: IndexMap<String, HttpValue>,
}

impl HttpData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from already nested fields
    pub fn from_fields(fields: IndexMap<String, HttpValue>) -> Self {
        Self { fields }
    }

    /// Create from a JSON object; other JSON shapes give empty data
    pub fn from_json(json: &JsonValue) -> Self {
        match HttpValue::from_json(json) {
            Some(HttpValue::Map(fields)) => Self { fields },
            _ => Self::new(),
        }
    }

    /// Decode an `application/x-www-form-urlencoded` body or query string
    ///
    /// Bracketed names nest (`user[name]=x`), `[]` appends the next index,
    /// and `.` or space in the top-level key becomes `_`.
    pub fn from_query(query: &str) -> Self {
        let mut data = Self::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key);
            let value = decode_component(raw_value);

            if let Some((base, segments)) = parse_key(&key) {
                insert_path(&mut data.fields, base, &segments, HttpValue::Text(value));
            }
        }

        data
    }

    /// Add or replace a top-level field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HttpValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`HttpData::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<HttpValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a top-level field
    pub fn get(&self, key: &str) -> Option<&HttpValue> {
        self.fields.get(key)
    }

    /// Walk nested maps along `path`
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&HttpValue> {
        let (first, rest) = path.split_first()?;
        let mut current = self.fields.get(first.as_ref())?;
        for segment in rest {
            current = current.as_map()?.get(segment.as_ref())?;
        }
        Some(current)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_map(&self) -> &IndexMap<String, HttpValue> {
        &self.fields
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Split `base[a][b]` into the normalized base and its bracket segments
fn parse_key(key: &str) -> Option<(String, Vec<String>)> {
    let (base, mut rest) = match key.find('[') {
        Some(0) => return None,
        Some(pos) => (&key[..pos], &key[pos..]),
        None => (key, ""),
    };
    if base.is_empty() {
        return None;
    }

    let base = base.replace(&['.', ' '][..], "_");
    let mut segments = Vec::new();
    while let Some(inner) = rest.strip_prefix('[') {
        match inner.find(']') {
            Some(end) => {
                segments.push(inner[..end].to_string());
                rest = &inner[end + 1..];
            }
            None => break,
        }
    }

    Some((base, segments))
}

fn next_index(map: &IndexMap<String, HttpValue>) -> String {
    map.keys()
        .filter_map(|k| k.parse::<usize>().ok())
        .max()
        .map_or(0, |max| max + 1)
        .to_string()
}

fn insert_path(
    map: &mut IndexMap<String, HttpValue>,
    key: String,
    rest: &[String],
    value: HttpValue,
) {
    let key = if key.is_empty() { next_index(map) } else { key };

    match rest.split_first() {
        None => {
            map.insert(key, value);
        }
        Some((head, tail)) => {
            let entry = map
                .entry(key)
                .or_insert_with(|| HttpValue::Map(IndexMap::new()));
            if !matches!(entry, HttpValue::Map(_)) {
                *entry = HttpValue::Map(IndexMap::new());
            }
            if let HttpValue::Map(inner) = entry {
                insert_path(inner, head.clone(), tail, value);
            }
        }
    }
}
