// File: src/export.rs
// Purpose: Flatten rule trees into the JSON payload read by client-side validation

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::config::FormsConfig;
use crate::messages::message_text;
use crate::rules::{ArgValue, Argument, Control, RuleKind, Rules};

/// Operator of the marker record prepended to optional rule sets
pub const OPTIONAL_OP: &str = "optional";

/// Prefix of negated operators
pub const NEGATION_PREFIX: char = '~';

/// One exported rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRecord {
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle: Option<IndexMap<String, bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<JsonValue>,
}

impl RuleRecord {
    fn new(op: String) -> Self {
        Self {
            op,
            msg: None,
            rules: None,
            control: None,
            toggle: None,
            arg: None,
        }
    }

    /// The `optional` marker record
    pub fn optional() -> Self {
        Self::new(OPTIONAL_OP.to_string())
    }
}

/// Export a rule set as an ordered list of records
///
/// Rules with closure validators are skipped. Branches with neither nested
/// rules nor toggles are dropped.
pub fn export_rules(rules: &Rules, config: &FormsConfig) -> Vec<RuleRecord> {
    let mut payload = Vec::with_capacity(rules.len());

    for rule in rules {
        let Some(name) = rule.validator.export_name() else {
            tracing::debug!(
                control = %rule.control.html_name,
                "Skipping rule with non-exportable validator"
            );
            continue;
        };

        let op = if rule.negative {
            format!("{}{}", NEGATION_PREFIX, name)
        } else {
            name.to_string()
        };
        let mut record = RuleRecord::new(op);

        match &rule.kind {
            RuleKind::Branch(branch) => {
                let nested = export_rules(branch, config);
                if !branch.toggles().is_empty() {
                    record.toggle = Some(branch.toggles().clone());
                } else if nested.is_empty() {
                    continue;
                }
                record.rules = Some(nested);
                record.control = Some(rule.control.html_name.clone());
            }
            RuleKind::Leaf { .. } => {
                record.msg = Some(message_text(rule, config));
            }
        }

        record.arg = rule
            .arg
            .as_ref()
            .map(|arg| export_argument(arg, &rule.control));
        payload.push(record);
    }

    if !payload.is_empty() && rules.is_optional() {
        payload.insert(0, RuleRecord::optional());
    }

    payload
}

fn export_argument(arg: &Argument, owner: &Control) -> JsonValue {
    match arg {
        Argument::Single(value) => export_arg_value(value, owner),
        Argument::List(values) => values
            .iter()
            .map(|value| export_arg_value(value, owner))
            .collect(),
    }
}

fn export_arg_value(value: &ArgValue, owner: &Control) -> JsonValue {
    match value {
        ArgValue::Literal(v) => v.clone(),
        ArgValue::Control(control) => json!({ "control": control.html_name }),
        ArgValue::DateTime(dt) => JsonValue::String(owner.format_datetime(dt)),
    }
}

/// Export as a JSON array
pub fn export_rules_json(rules: &Rules, config: &FormsConfig) -> serde_json::Result<JsonValue> {
    serde_json::to_value(export_rules(rules, config))
}

/// Export as the JSON text of a `data-rules` attribute; `None` when there is
/// nothing to validate client-side
pub fn export_rules_attr(
    rules: &Rules,
    config: &FormsConfig,
) -> serde_json::Result<Option<String>> {
    let records = export_rules(rules, config);
    if records.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(&records).map(Some)
}
