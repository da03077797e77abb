// File: src/attrs.rs
// Purpose: Split per-item attribute specs into static and per-value parts

use indexmap::IndexMap;

use crate::html::{render_attribute, render_attributes, AttrValue, Attrs};

/// How an attribute's value is chosen for each item of a choice list
#[derive(Debug, Clone, PartialEq)]
pub enum AttrRule {
    /// Same value on every item
    Static(AttrValue),
    /// Boolean attribute set on the listed item values (`checked`, `disabled`)
    BooleanSet(Vec<String>),
    /// Value looked up by item value; items without an entry get none
    ValueMap(IndexMap<String, AttrValue>),
}

/// Named attribute with its rule
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSpec {
    pub name: String,
    pub rule: AttrRule,
}

impl AttrSpec {
    pub fn fixed(name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            name: name.into(),
            rule: AttrRule::Static(value.into()),
        }
    }

    pub fn boolean_set<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            rule: AttrRule::BooleanSet(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn value_map<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        Self {
            name: name.into(),
            rule: AttrRule::ValueMap(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

/// Attribute specs resolved for rendering a list of items
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparedAttrs {
    /// Opening of the tag with all static attributes, e.g. `<input type="radio"`
    pub tag_start: String,
    /// Attribute name -> item value -> attribute value
    pub dynamic: IndexMap<String, IndexMap<String, AttrValue>>,
}

impl PreparedAttrs {
    /// Per-item attribute values, in declaration order
    pub fn for_item<'a>(&'a self, value: &'a str) -> impl Iterator<Item = (&'a String, &'a AttrValue)> {
        self.dynamic
            .iter()
            .filter_map(move |(name, per_item)| Some((name, per_item.get(value)?)))
    }

    /// Render the dynamic attributes of one item
    pub fn render_for(&self, value: &str, xhtml: bool) -> String {
        let mut buffer = String::new();
        for (name, attr) in self.for_item(value) {
            render_attribute(&mut buffer, name, attr, xhtml);
        }
        buffer
    }

    pub fn remove_dynamic(&mut self, name: &str) {
        self.dynamic.shift_remove(name);
    }
}

/// Partition attribute specs for the element `tag`
///
/// Static attributes are rendered once into the tag prefix. Dynamic ones
/// replace any static attribute of the same name; an empty value map adds
/// nothing.
pub fn prepare_attrs(specs: &[AttrSpec], tag: &str, xhtml: bool) -> PreparedAttrs {
    let mut fixed = Attrs::new();
    let mut dynamic: IndexMap<String, IndexMap<String, AttrValue>> = IndexMap::new();

    for spec in specs {
        match &spec.rule {
            AttrRule::Static(value) => {
                if !dynamic.contains_key(&spec.name) {
                    fixed.insert(spec.name.clone(), value.clone());
                }
            }
            AttrRule::BooleanSet(values) => {
                fixed.shift_remove(&spec.name);
                let set = values
                    .iter()
                    .map(|v| (v.clone(), AttrValue::Bool(true)))
                    .collect();
                dynamic.insert(spec.name.clone(), set);
            }
            AttrRule::ValueMap(map) => {
                fixed.shift_remove(&spec.name);
                dynamic.shift_remove(&spec.name);
                if !map.is_empty() {
                    dynamic.insert(spec.name.clone(), map.clone());
                }
            }
        }
    }

    PreparedAttrs {
        tag_start: format!("<{}{}", tag, render_attributes(&fixed, xhtml)),
        dynamic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_only() {
        let prepared = prepare_attrs(
            &[AttrSpec::fixed("type", "radio"), AttrSpec::fixed("name", "color")],
            "input",
            false,
        );
        assert_eq!(prepared.tag_start, r#"<input type="radio" name="color""#);
        assert!(prepared.dynamic.is_empty());
    }

    #[test]
    fn test_boolean_set() {
        let prepared = prepare_attrs(&[AttrSpec::boolean_set("checked", ["b"])], "input", false);
        assert_eq!(prepared.tag_start, "<input");
        assert_eq!(prepared.render_for("a", false), "");
        assert_eq!(prepared.render_for("b", false), " checked");
        assert_eq!(prepared.render_for("b", true), r#" checked="checked""#);
    }

    #[test]
    fn test_value_map() {
        let prepared = prepare_attrs(
            &[AttrSpec::value_map("id", [("a", "opt-a"), ("b", "opt-b")])],
            "input",
            false,
        );
        assert_eq!(prepared.render_for("a", false), r#" id="opt-a""#);
        assert_eq!(prepared.render_for("z", false), "");
    }

    #[test]
    fn test_dynamic_replaces_static() {
        let prepared = prepare_attrs(
            &[
                AttrSpec::fixed("disabled", true),
                AttrSpec::fixed("class", "choice"),
                AttrSpec::boolean_set("disabled", ["x"]),
                AttrSpec::fixed("disabled", true),
            ],
            "input",
            false,
        );
        assert_eq!(prepared.tag_start, r#"<input class="choice""#);
        assert_eq!(prepared.render_for("x", false), " disabled");
    }

    #[test]
    fn test_empty_value_map_ignored() {
        let prepared = prepare_attrs(
            &[
                AttrSpec::fixed("title", "t"),
                AttrSpec::value_map("title", Vec::<(String, AttrValue)>::new()),
            ],
            "label",
            false,
        );
        assert_eq!(prepared.tag_start, "<label");
        assert!(prepared.dynamic.is_empty());
    }
}
