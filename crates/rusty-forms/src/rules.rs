// File: src/rules.rs
// Purpose: Validation rule tree consumed by the client-side rule export

use chrono::{NaiveDateTime, Timelike};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

use crate::config::FormsConfig;
use crate::naming::generate_html_name;

/// Built-in validation operators understood by the client-side validator
pub mod ops {
    pub const EQUAL: &str = ":equal";
    pub const IS_IN: &str = EQUAL;
    pub const NOT_EQUAL: &str = ":notEqual";
    pub const IS_NOT_IN: &str = NOT_EQUAL;
    pub const FILLED: &str = ":filled";
    pub const BLANK: &str = ":blank";
    pub const REQUIRED: &str = FILLED;
    pub const VALID: &str = ":valid";
    pub const SUBMITTED: &str = ":submitted";
    pub const MIN_LENGTH: &str = ":minLength";
    pub const MAX_LENGTH: &str = ":maxLength";
    pub const LENGTH: &str = ":length";
    pub const EMAIL: &str = ":email";
    pub const URL: &str = ":url";
    pub const PATTERN: &str = ":pattern";
    pub const PATTERN_INSENSITIVE: &str = ":patternCaseInsensitive";
    pub const INTEGER: &str = ":integer";
    pub const NUMERIC: &str = ":numeric";
    pub const FLOAT: &str = ":float";
    pub const MIN: &str = ":min";
    pub const MAX: &str = ":max";
    pub const RANGE: &str = ":range";
    pub const COUNT: &str = LENGTH;
    pub const MAX_FILE_SIZE: &str = ":fileSize";
    pub const MAX_POST_SIZE: &str = ":maxPostSize";
    pub const MIME_TYPE: &str = ":mimeType";
    pub const IMAGE: &str = ":image";
}

/// The form control a rule belongs to, as seen by the rule export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// Component name (last segment of the id)
    pub name: String,
    /// Flattened HTML field name
    pub html_name: String,
    /// Caption shown next to the control
    pub label: Option<String>,
    /// HTML input type, used to format date and time arguments
    pub input_type: Option<String>,
    /// Current value, substituted for `%value` in messages
    pub value: Option<String>,
}

impl Control {
    /// Create a control from its hierarchical id (`address-street`)
    pub fn new(id: &str, config: &FormsConfig) -> Self {
        let name = id
            .rsplit(config.name_separator)
            .next()
            .unwrap_or(id)
            .to_string();
        Self {
            name,
            html_name: generate_html_name(id, config),
            label: None,
            input_type: None,
            value: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Format a date/time the way this control's input expects it
    pub fn format_datetime(&self, dt: &NaiveDateTime) -> String {
        let with_seconds = dt.second() != 0;
        match self.input_type.as_deref() {
            Some("date") => dt.format("%Y-%m-%d").to_string(),
            Some("time") if with_seconds => dt.format("%H:%M:%S").to_string(),
            Some("time") => dt.format("%H:%M").to_string(),
            Some("datetime-local") | Some("datetime") if !with_seconds => {
                dt.format("%Y-%m-%dT%H:%M").to_string()
            }
            _ => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// Callable used as a validator
pub type ValidatorFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// What checks a rule
#[derive(Clone)]
pub enum Validator {
    /// Named operator (`:filled`, `:minLength`, ...)
    Operator(String),
    /// Statically resolvable callable, referenced as `Type::method`
    Static(String),
    /// Inline closure; runs server-side only and cannot be exported
    Closure(ValidatorFn),
}

impl Validator {
    pub fn closure<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Validator::Closure(Arc::new(f))
    }

    /// Name used in the client payload, if the validator has one
    pub fn export_name(&self) -> Option<&str> {
        match self {
            Validator::Operator(op) => Some(op),
            Validator::Static(path) => Some(path),
            Validator::Closure(_) => None,
        }
    }

    pub fn operator(&self) -> Option<&str> {
        match self {
            Validator::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Operator(op) => f.debug_tuple("Operator").field(op).finish(),
            Validator::Static(path) => f.debug_tuple("Static").field(path).finish(),
            Validator::Closure(_) => f.write_str("Closure(..)"),
        }
    }
}

impl From<&str> for Validator {
    fn from(op: &str) -> Self {
        Validator::Operator(op.to_string())
    }
}

impl From<String> for Validator {
    fn from(op: String) -> Self {
        Validator::Operator(op)
    }
}

/// One rule argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Literal(JsonValue),
    /// Compare against another control's value
    Control(Control),
    DateTime(NaiveDateTime),
}

impl ArgValue {
    /// Text substituted into messages for `%d` / `%s`
    pub fn display(&self, owner: &Control, with_value: bool, index: usize) -> String {
        match self {
            ArgValue::Literal(JsonValue::String(s)) => s.clone(),
            ArgValue::Literal(JsonValue::Null) => String::new(),
            ArgValue::Literal(JsonValue::Bool(b)) => if *b { "1" } else { "" }.to_string(),
            ArgValue::Literal(other) => other.to_string(),
            ArgValue::Control(control) if with_value => control.value.clone().unwrap_or_default(),
            ArgValue::Control(_) => format!("%{}", index),
            ArgValue::DateTime(dt) => owner.format_datetime(dt),
        }
    }
}

impl From<JsonValue> for ArgValue {
    fn from(v: JsonValue) -> Self {
        ArgValue::Literal(v)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Literal(n.into())
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Literal(n.into())
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Literal(s.into())
    }
}

impl From<Control> for ArgValue {
    fn from(c: Control) -> Self {
        ArgValue::Control(c)
    }
}

impl From<NaiveDateTime> for ArgValue {
    fn from(dt: NaiveDateTime) -> Self {
        ArgValue::DateTime(dt)
    }
}

/// Rule argument: one value or a list exported element-wise
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Single(ArgValue),
    List(Vec<ArgValue>),
}

impl Argument {
    pub fn values(&self) -> &[ArgValue] {
        match self {
            Argument::Single(v) => std::slice::from_ref(v),
            Argument::List(vs) => vs,
        }
    }
}

macro_rules! single_argument_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Argument {
                fn from(v: $ty) -> Self {
                    Argument::Single(v.into())
                }
            }
        )*
    };
}

single_argument_from!(ArgValue, JsonValue, i64, f64, &str, Control, NaiveDateTime);

impl From<Vec<ArgValue>> for Argument {
    fn from(vs: Vec<ArgValue>) -> Self {
        Argument::List(vs)
    }
}

/// Error message of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain text with `%label`-style placeholders
    Text(String),
    /// Trusted HTML, used verbatim
    Markup(String),
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<maud::Markup> for Message {
    fn from(m: maud::Markup) -> Self {
        Message::Markup(m.into_string())
    }
}

/// Leaf rules carry a message; branch rules carry a conditional sub-tree
#[derive(Debug, Clone)]
pub enum RuleKind {
    Leaf { message: Option<Message> },
    Branch(Rules),
}

/// One validation rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub control: Control,
    pub validator: Validator,
    pub negative: bool,
    pub arg: Option<Argument>,
    pub kind: RuleKind,
}

impl Rule {
    /// A plain rule with a message
    pub fn leaf(control: Control, validator: impl Into<Validator>) -> Self {
        Self {
            control,
            validator: validator.into(),
            negative: false,
            arg: None,
            kind: RuleKind::Leaf { message: None },
        }
    }

    /// A condition whose sub-rules apply when it holds
    pub fn branch(control: Control, validator: impl Into<Validator>, rules: Rules) -> Self {
        Self {
            control,
            validator: validator.into(),
            negative: false,
            arg: None,
            kind: RuleKind::Branch(rules),
        }
    }

    /// Set the message of a leaf rule; branches ignore it
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        if let RuleKind::Leaf { message: slot } = &mut self.kind {
            *slot = Some(message.into());
        }
        self
    }

    pub fn arg(mut self, arg: impl Into<Argument>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn negated(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    pub fn branch_rules(&self) -> Option<&Rules> {
        match &self.kind {
            RuleKind::Branch(rules) => Some(rules),
            RuleKind::Leaf { .. } => None,
        }
    }
}

/// Ordered set of rules for one control, possibly optional
#[derive(Debug, Clone, Default)]
pub struct Rules {
    rules: Vec<Rule>,
    optional: bool,
    toggles: IndexMap<String, bool>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Builder-style variant of [`Rules::add`]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.add(rule);
        self
    }

    /// Mark the set as applying only when the control is filled
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Show (`true`) or hide (`false`) the element with `id` when the
    /// enclosing condition holds
    pub fn toggle(mut self, id: impl Into<String>, show: bool) -> Self {
        self.toggles.insert(id.into(), show);
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn toggles(&self) -> &IndexMap<String, bool> {
        &self.toggles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
