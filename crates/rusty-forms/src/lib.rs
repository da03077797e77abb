//! # rusty-forms
//!
//! Server-side helpers for rendering and reading HTML forms: sanitizing
//! submitted values, turning component ids into HTML input names, exporting
//! validation rules for the client and building choice-list markup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rusty_forms::{
//!     extract_http_data, export_rules_attr, generate_html_name, ops, Control, DataKind,
//!     FormsConfig, HttpData, Rule, Rules,
//! };
//!
//! let config = FormsConfig::global();
//!
//! // "address-street" -> "address[street]"
//! let name = generate_html_name("address-street", config);
//!
//! // Read the submitted value back
//! let data = HttpData::from_query("address[street]=Main+St");
//! let street = extract_http_data(&data, &name, DataKind::Line.into());
//!
//! // Client-side rules as a data-rules attribute
//! let rules = Rules::new().rule(Rule::leaf(Control::new("address-street", config), ops::FILLED));
//! let attr = export_rules_attr(&rules, config)?;
//! ```
//!
//! ## Features
//!
//! - **`axum`** - `IntoResponse` for rendered [`Element`]s

pub mod attrs;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod html;
pub mod http_data;
pub mod markup;
pub mod messages;
pub mod naming;
pub mod rules;
pub mod sanitize;

pub use attrs::{prepare_attrs, AttrRule, AttrSpec, PreparedAttrs};
pub use config::FormsConfig;
pub use error::{FormError, Result};
pub use export::{export_rules, export_rules_attr, export_rules_json, RuleRecord};
pub use extract::{extract_http_data, extract_http_data_bits, Extracted};
pub use html::{AttrValue, Attrs, Element};
pub use http_data::{FileUpload, HttpData, HttpValue};
pub use markup::{create_input_list, create_select_box, Caption, SelectItem, Selected, Wrapper};
pub use messages::format_message;
pub use naming::generate_html_name;
pub use rules::{ops, ArgValue, Argument, Control, Message, Rule, RuleKind, Rules, Validator};
pub use sanitize::{sanitize, sanitize_bits, DataKind, DataType, Sanitized};
