// File: src/markup.rs
// Purpose: Markup for radio/checkbox lists and select boxes

use indexmap::IndexMap;
use maud::Markup;

use crate::attrs::{prepare_attrs, AttrSpec};
use crate::config::FormsConfig;
use crate::html::{escape, render_attributes, AttrValue, Attrs, Element};

/// Caption of a choice item
///
/// Whether a caption is trusted markup is decided by the caller, never
/// inferred from its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caption {
    /// Plain text, escaped on output
    Text(String),
    /// Trusted HTML, embedded verbatim in label lists
    Markup(String),
    /// Prebuilt element; in select boxes it becomes the `<option>` itself
    Element(Element),
}

impl Caption {
    /// HTML for use inside a `<label>`
    pub fn to_html(&self) -> String {
        match self {
            Caption::Text(text) => escape(text),
            Caption::Markup(html) => html.clone(),
            Caption::Element(el) => el.to_html(),
        }
    }
}

impl From<&str> for Caption {
    fn from(s: &str) -> Self {
        Caption::Text(s.to_string())
    }
}

impl From<String> for Caption {
    fn from(s: String) -> Self {
        Caption::Text(s)
    }
}

impl From<Markup> for Caption {
    fn from(m: Markup) -> Self {
        Caption::Markup(m.into_string())
    }
}

impl From<Element> for Caption {
    fn from(el: Element) -> Self {
        Caption::Element(el)
    }
}

/// What goes between the items of an input list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Wrapper {
    #[default]
    None,
    /// Inserted between consecutive items
    Separator(String),
    /// End then start tag placed between consecutive items, as in
    /// `item</li><li>item`; the outer tags are left to the caller
    Element(Element),
}

/// Entry of a select box: an option or a labelled group of options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Option(Caption),
    Group(IndexMap<String, Caption>),
}

impl From<Caption> for SelectItem {
    fn from(caption: Caption) -> Self {
        SelectItem::Option(caption)
    }
}

impl From<&str> for SelectItem {
    fn from(text: &str) -> Self {
        SelectItem::Option(text.into())
    }
}

impl From<String> for SelectItem {
    fn from(text: String) -> Self {
        SelectItem::Option(text.into())
    }
}

/// Selected value(s) of a select box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selected {
    /// Single selection: only the first matching option is marked
    One(String),
    Many(Vec<String>),
}

impl Selected {
    pub fn values(&self) -> Vec<String> {
        match self {
            Selected::One(v) => vec![v.clone()],
            Selected::Many(vs) => vs.clone(),
        }
    }
}

const SELECTED_ATTR: &str = "selected";

/// Build one `<label><input>caption</label>` fragment per item
///
/// `items` maps item value to caption. Input and label attributes are
/// resolved per item value, see [`prepare_attrs`].
pub fn create_input_list(
    items: &IndexMap<String, Caption>,
    input_attrs: &[AttrSpec],
    label_attrs: &[AttrSpec],
    wrapper: &Wrapper,
    config: &FormsConfig,
) -> String {
    let xhtml = config.xhtml;
    let input = prepare_attrs(input_attrs, "input", xhtml);
    let label = prepare_attrs(label_attrs, "label", xhtml);

    // The caller supplies the outermost tags of an element wrapper
    let separator = match wrapper {
        Wrapper::None => String::new(),
        Wrapper::Separator(separator) => separator.clone(),
        Wrapper::Element(el) => el.end_tag() + &el.start_tag(xhtml),
    };
    let input_close = if xhtml { " />" } else { ">" };

    let mut res = String::new();
    for (i, (value, caption)) in items.iter().enumerate() {
        if i > 0 {
            res.push_str(&separator);
        }
        res.push_str(&label.tag_start);
        res.push_str(&label.render_for(value, xhtml));
        res.push('>');
        res.push_str(&input.tag_start);
        res.push_str(&input.render_for(value, xhtml));
        res.push_str(input_close);
        res.push_str(&caption.to_html());
        res.push_str("</label>");
    }

    res
}

/// Build a `<select>` element with options and option groups
///
/// Element captions are cloned, renamed to `option` and given the option's
/// value and per-item attributes; other captions are escaped as text.
pub fn create_select_box(
    items: &IndexMap<String, SelectItem>,
    option_attrs: &[AttrSpec],
    selected: Option<&Selected>,
    config: &FormsConfig,
) -> Element {
    let xhtml = config.xhtml;
    let mut specs = option_attrs.to_vec();
    if let Some(selected) = selected {
        specs.push(AttrSpec::boolean_set(SELECTED_ATTR, selected.values()));
    }
    let mut prepared = prepare_attrs(&specs, "option", xhtml);
    let single = match selected {
        Some(Selected::One(value)) => Some(value.as_str()),
        _ => None,
    };

    let mut res = String::new();
    let mut push_option = |value: &str, caption: &Caption, res: &mut String| {
        let mut attrs = Attrs::new();
        attrs.insert("value".to_string(), AttrValue::Text(value.to_string()));
        for (name, attr) in prepared.for_item(value) {
            attrs.insert(name.clone(), attr.clone());
        }

        match caption {
            Caption::Element(el) => {
                let mut option = el.clone();
                option.set_name("option").add_attributes(attrs);
                res.push_str(&option.to_html_with(xhtml));
            }
            Caption::Text(text) | Caption::Markup(text) => {
                res.push_str(&prepared.tag_start);
                res.push_str(&render_attributes(&attrs, xhtml));
                res.push('>');
                res.push_str(&escape(text));
                res.push_str("</option>");
            }
        }

        if single == Some(value) {
            prepared.remove_dynamic(SELECTED_ATTR);
        }
    };

    for (key, item) in items {
        match item {
            SelectItem::Group(options) => {
                let group = Element::new("optgroup").attr("label", key.as_str());
                res.push_str(&group.start_tag(xhtml));
                for (value, caption) in options {
                    push_option(value, caption, &mut res);
                }
                res.push_str("</optgroup>");
            }
            SelectItem::Option(caption) => push_option(key, caption, &mut res),
        }
    }

    Element::new("select").html(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(pairs: &[(&str, &str)]) -> IndexMap<String, Caption> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Caption::from(*v)))
            .collect()
    }

    #[test]
    fn test_input_list_plain() {
        let html = create_input_list(
            &items(&[("a", "Apple"), ("b", "B & B")]),
            &[AttrSpec::fixed("type", "radio"), AttrSpec::fixed("name", "fruit")],
            &[],
            &Wrapper::None,
            &FormsConfig::default(),
        );
        assert_eq!(
            html,
            concat!(
                r#"<label><input type="radio" name="fruit">Apple</label>"#,
                r#"<label><input type="radio" name="fruit">B &amp; B</label>"#
            )
        );
    }

    #[test]
    fn test_input_list_separator_between_items_only() {
        let html = create_input_list(
            &items(&[("1", "One"), ("2", "Two")]),
            &[],
            &[],
            &Wrapper::Separator("<br>".into()),
            &FormsConfig::default(),
        );
        assert_eq!(html, "<label><input>One</label><br><label><input>Two</label>");
    }

    #[test]
    fn test_input_list_element_wrapper_between_items_only() {
        let html = create_input_list(
            &items(&[("1", "One"), ("2", "Two"), ("3", "Three")]),
            &[],
            &[],
            &Wrapper::Element(Element::new("div").attr("class", "opt")),
            &FormsConfig::default(),
        );
        assert_eq!(
            html,
            concat!(
                "<label><input>One</label>",
                r#"</div><div class="opt">"#,
                "<label><input>Two</label>",
                r#"</div><div class="opt">"#,
                "<label><input>Three</label>"
            )
        );
    }

    #[test]
    fn test_input_list_single_item_has_no_wrapper() {
        let html = create_input_list(
            &items(&[("1", "One")]),
            &[],
            &[],
            &Wrapper::Element(Element::new("li")),
            &FormsConfig::default(),
        );
        assert_eq!(html, "<label><input>One</label>");
    }

    #[test]
    fn test_input_list_markup_caption_verbatim() {
        let mut list = IndexMap::new();
        list.insert("x".to_string(), Caption::Markup("<b>Bold</b>".into()));
        list.insert("y".to_string(), Caption::Text("<b>Bold</b>".into()));

        let html = create_input_list(&list, &[], &[], &Wrapper::None, &FormsConfig::default());
        assert_eq!(
            html,
            "<label><input><b>Bold</b></label><label><input>&lt;b&gt;Bold&lt;/b&gt;</label>"
        );
    }

    #[test]
    fn test_input_list_xhtml() {
        let config = FormsConfig {
            xhtml: true,
            ..FormsConfig::default()
        };
        let html = create_input_list(
            &items(&[("a", "A")]),
            &[AttrSpec::boolean_set("checked", ["a"])],
            &[],
            &Wrapper::None,
            &config,
        );
        assert_eq!(html, r#"<label><input checked="checked" />A</label>"#);
    }

    #[test]
    fn test_select_box_flat() {
        let mut list: IndexMap<String, SelectItem> = IndexMap::new();
        list.insert("cz".into(), "Czechia".into());
        list.insert("sk".into(), "Slovakia".into());

        let select = create_select_box(
            &list,
            &[],
            Some(&Selected::One("sk".into())),
            &FormsConfig::default(),
        );
        assert_eq!(
            select.to_html(),
            concat!(
                "<select>",
                r#"<option value="cz">Czechia</option>"#,
                r#"<option value="sk" selected>Slovakia</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_select_box_groups_and_element_caption() {
        let mut europe = IndexMap::new();
        europe.insert("cz".to_string(), Caption::from("Czechia"));
        europe.insert(
            "de".to_string(),
            Caption::Element(Element::new("span").attr("class", "flag").text("Germany")),
        );

        let mut list: IndexMap<String, SelectItem> = IndexMap::new();
        list.insert("Europe".into(), SelectItem::Group(europe));
        list.insert("other".into(), "Other".into());

        let select = create_select_box(
            &list,
            &[AttrSpec::value_map("title", [("cz", "CZ")])],
            None,
            &FormsConfig::default(),
        );
        assert_eq!(
            select.inner_html(),
            concat!(
                r#"<optgroup label="Europe">"#,
                r#"<option value="cz" title="CZ">Czechia</option>"#,
                r#"<option class="flag" value="de">Germany</option>"#,
                "</optgroup>",
                r#"<option value="other">Other</option>"#
            )
        );
    }

    #[test]
    fn test_select_box_xhtml_boolean_attributes() {
        let config = FormsConfig {
            xhtml: true,
            ..FormsConfig::default()
        };
        let mut list: IndexMap<String, SelectItem> = IndexMap::new();
        list.insert("a".into(), "A".into());
        list.insert("b".into(), "B".into());

        let select = create_select_box(
            &list,
            &[AttrSpec::boolean_set("disabled", ["b"])],
            Some(&Selected::One("a".into())),
            &config,
        );
        assert_eq!(
            select.inner_html(),
            concat!(
                r#"<option value="a" selected="selected">A</option>"#,
                r#"<option value="b" disabled="disabled">B</option>"#
            )
        );
    }
}
