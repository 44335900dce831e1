//! Street-name cleanup before geocoding.

use std::sync::LazyLock;

use regex::Regex;

static LA_CALLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^la\s+calle\s+").expect("invalid regex: la calle"));

static LEADING_EL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^el\s+").expect("invalid regex: leading el"));

/// `"... el Nº 1234 ..."` door-number tails, with the usual spellings of the
/// numero sign.
static DOOR_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:el\s+)?(?:n[º°o]\.?|nro\.?|número)\s*\d+.*$")
        .expect("invalid regex: door number")
});

/// Strips the prose the listings wrap street names in.
///
/// `"la calle Rondeau"` becomes `"Rondeau"`, `"Minas el Nº 1234 al fondo"`
/// becomes `"Minas"`. Whitespace is collapsed.
#[must_use]
pub fn clean_street(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    let s = LA_CALLE.replace(&collapsed, "");
    let s = LEADING_EL.replace(&s, "");
    let s = DOOR_NUMBER.replace(&s, "");
    s.trim().to_owned()
}
