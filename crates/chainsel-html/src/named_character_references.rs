//! Named character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The full table defines 2,231 entities; this one carries the entities that
//! realistically show up inside attribute values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// `(name, replacement, legacy)`. Names are stored without the leading `&` and
/// without the trailing `;`. A legacy entity is also recognized when the
/// semicolon is missing (e.g. `&amp` as well as `&amp;`).
const ENTITIES: &[(&str, &str, bool)] = &[
    // Markup-significant characters
    ("amp", "&", true),
    ("lt", "<", true),
    ("gt", ">", true),
    ("quot", "\"", true),
    ("apos", "'", false),
    // Whitespace and invisible characters
    ("nbsp", "\u{00A0}", true),
    ("ensp", "\u{2002}", false),
    ("emsp", "\u{2003}", false),
    ("thinsp", "\u{2009}", false),
    ("shy", "\u{00AD}", true),
    ("zwnj", "\u{200C}", false),
    ("zwj", "\u{200D}", false),
    // Punctuation
    ("copy", "\u{00A9}", true),
    ("reg", "\u{00AE}", true),
    ("trade", "\u{2122}", false),
    ("sect", "\u{00A7}", true),
    ("para", "\u{00B6}", true),
    ("mdash", "\u{2014}", false),
    ("ndash", "\u{2013}", false),
    ("hellip", "\u{2026}", false),
    ("bull", "\u{2022}", false),
    ("middot", "\u{00B7}", true),
    ("lsquo", "\u{2018}", false),
    ("rsquo", "\u{2019}", false),
    ("ldquo", "\u{201C}", false),
    ("rdquo", "\u{201D}", false),
    ("laquo", "\u{00AB}", true),
    ("raquo", "\u{00BB}", true),
    ("iexcl", "\u{00A1}", true),
    ("iquest", "\u{00BF}", true),
    // Currency
    ("cent", "\u{00A2}", true),
    ("pound", "\u{00A3}", true),
    ("euro", "\u{20AC}", false),
    ("yen", "\u{00A5}", true),
    ("curren", "\u{00A4}", true),
    // Math
    ("times", "\u{00D7}", true),
    ("divide", "\u{00F7}", true),
    ("plusmn", "\u{00B1}", true),
    ("minus", "\u{2212}", false),
    ("ne", "\u{2260}", false),
    ("le", "\u{2264}", false),
    ("ge", "\u{2265}", false),
    ("deg", "\u{00B0}", true),
    ("micro", "\u{00B5}", true),
    ("not", "\u{00AC}", true),
    ("frac12", "\u{00BD}", true),
    ("frac14", "\u{00BC}", true),
    ("frac34", "\u{00BE}", true),
    // Arrows
    ("larr", "\u{2190}", false),
    ("rarr", "\u{2192}", false),
    ("uarr", "\u{2191}", false),
    ("darr", "\u{2193}", false),
    // Greek
    ("alpha", "\u{03B1}", false),
    ("beta", "\u{03B2}", false),
    ("gamma", "\u{03B3}", false),
    ("delta", "\u{03B4}", false),
    ("lambda", "\u{03BB}", false),
    ("mu", "\u{03BC}", false),
    ("pi", "\u{03C0}", false),
    ("sigma", "\u{03C3}", false),
    ("omega", "\u{03C9}", false),
    // Latin-1 letters
    ("Agrave", "\u{00C0}", true),
    ("Aacute", "\u{00C1}", true),
    ("Acirc", "\u{00C2}", true),
    ("Auml", "\u{00C4}", true),
    ("agrave", "\u{00E0}", true),
    ("aacute", "\u{00E1}", true),
    ("acirc", "\u{00E2}", true),
    ("auml", "\u{00E4}", true),
    ("Eacute", "\u{00C9}", true),
    ("eacute", "\u{00E9}", true),
    ("egrave", "\u{00E8}", true),
    ("iacute", "\u{00ED}", true),
    ("oacute", "\u{00F3}", true),
    ("ouml", "\u{00F6}", true),
    ("Ouml", "\u{00D6}", true),
    ("uacute", "\u{00FA}", true),
    ("uuml", "\u{00FC}", true),
    ("Uuml", "\u{00DC}", true),
    ("ntilde", "\u{00F1}", true),
    ("Ntilde", "\u{00D1}", true),
    ("ccedil", "\u{00E7}", true),
    ("Ccedil", "\u{00C7}", true),
    ("szlig", "\u{00DF}", true),
];

/// Lookup keys as they appear in source text after the `&`: `"amp;"` for every
/// entity, plus `"amp"` for legacy ones.
static NAMED_ENTITIES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut table = HashMap::with_capacity(ENTITIES.len() * 2);
    for &(name, replacement, legacy) in ENTITIES {
        let _ = table.insert(format!("{name};"), replacement);
        if legacy {
            let _ = table.insert(name.to_string(), replacement);
        }
    }
    table
});

/// Look up a named character reference.
///
/// The `name` should NOT include the leading '&'. Returns the replacement text.
///
/// # Example
/// ```ignore
/// lookup_entity("amp;")  // Some("&")
/// lookup_entity("amp")   // Some("&"), legacy form
/// lookup_entity("euro")  // None, only "euro;" is recognized
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// Check if any lookup key starts with the given prefix.
///
/// Used to stop consuming characters as soon as no longer match is possible.
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    NAMED_ENTITIES.keys().any(|name| name.starts_with(prefix))
}
