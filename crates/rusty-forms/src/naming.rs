// File: src/naming.rs
// Purpose: Turn hierarchical control ids into flat HTML field names

use crate::config::FormsConfig;

/// Build the HTML `name` for a control id
///
/// Component names are joined by the configured separator, so with the
/// default `-` the id `address-street` becomes `address[street]`. Names that
/// would be numeric or shadow a DOM form property get a `_` prefix.
pub fn generate_html_name(id: &str, config: &FormsConfig) -> String {
    let separator = config.name_separator;

    let mut name = if id.contains(separator) {
        let bracketed = id.replace(separator, "][");
        // First `][` opens the nesting; the tail needs its closing bracket
        let mut name = bracketed.replacen(']', "", 1);
        name.push(']');
        name
    } else {
        id.to_string()
    };

    if is_numeric(&name) || config.is_unsafe_name(&name) {
        name.insert(0, '_');
    }

    name
}

/// Numeric string check: optional surrounding whitespace, sign, digits with
/// an optional fraction, optional exponent
pub fn is_numeric(s: &str) -> bool {
    let s = s.trim_matches(&[' ', '\t', '\n', '\r', '\x0b', '\x0c'][..]);
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}
