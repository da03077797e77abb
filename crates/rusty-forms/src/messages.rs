// File: src/messages.rs
// Purpose: Validation message formatting for rules

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::FormsConfig;
use crate::rules::{Message, Rule, RuleKind};

// %name, %label, %value, %d, %s, %2$d, %1$s
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%(name|label|value|\d+\$[ds]|[ds])").unwrap());

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static ENTITY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// Resolve and fill in the message of a rule
///
/// Falls back to the configured default for the rule's operator. Markup
/// messages are returned untouched. With `with_value` off, `%value` is left
/// in place and control arguments become `%N` for the client to fill in.
pub fn format_message(rule: &Rule, config: &FormsConfig, with_value: bool) -> Message {
    let template = match &rule.kind {
        RuleKind::Leaf {
            message: Some(Message::Markup(html)),
        } => return Message::Markup(html.clone()),
        RuleKind::Leaf {
            message: Some(Message::Text(text)),
        } => text.clone(),
        _ => match rule.validator.operator().and_then(|op| config.message_for(op)) {
            Some(default) => default.to_string(),
            None => {
                tracing::warn!(
                    control = %rule.control.name,
                    validator = ?rule.validator,
                    "Missing validation message"
                );
                String::new()
            }
        },
    };

    let args = rule.arg.as_ref().map(|a| a.values()).unwrap_or_default();
    let mut index: Option<usize> = None;

    let formatted = PLACEHOLDER_REGEX.replace_all(&template, |caps: &Captures| {
        let token = &caps[1];
        match token {
            "name" => rule.control.name.clone(),
            "label" => rule
                .control
                .label
                .as_deref()
                .map(|l| l.trim_end_matches(':').to_string())
                .unwrap_or_default(),
            "value" if with_value => rule.control.value.clone().unwrap_or_default(),
            "value" => caps[0].to_string(),
            _ => {
                // `%N$d` is 1-based; position 0 behaves like a bare `%d`
                let position = token
                    .split_once('$')
                    .and_then(|(n, _)| n.parse::<usize>().ok())
                    .filter(|&n| n > 0);
                let i = match position {
                    Some(n) => n - 1,
                    None => index.map_or(0, |i| i + 1),
                };
                index = Some(i);
                args.get(i)
                    .map(|arg| arg.display(&rule.control, with_value, i))
                    .unwrap_or_default()
            }
        }
    });

    Message::Text(formatted.into_owned())
}

/// Plain-text message for the client payload
pub fn message_text(rule: &Rule, config: &FormsConfig) -> String {
    match format_message(rule, config, false) {
        Message::Text(text) => text,
        Message::Markup(html) => strip_markup(&html),
    }
}

/// Drop tags and decode character references
pub fn strip_markup(html: &str) -> String {
    let text = TAG_REGEX.replace_all(html, "");
    decode_entities(&text)
}

/// Decode named and numeric character references
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}
