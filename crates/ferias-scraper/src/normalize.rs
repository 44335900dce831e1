//! Candidate cleanup and validation.

use ferias_core::{Day, FeriaCandidate, FeriaRecord, Stretch, ValidationError};

const EDGE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '|', '-', '–', '—', '•', '*', '·'];

/// Turns a raw candidate into a validated record.
///
/// Every text field has markdown emphasis removed, whitespace collapsed,
/// and leading/trailing punctuation trimmed. Fields are checked in the
/// order street, day, barrio, cross streets; the first problem is reported.
/// Cross streets that are equal ignoring case describe a corner.
///
/// # Errors
///
/// [`ValidationError::MissingField`] when a required field is absent or
/// empty after cleanup (or only one cross street is present), and
/// [`ValidationError::UnknownDay`] when the day token is not a weekday.
pub fn normalize(candidate: FeriaCandidate) -> Result<FeriaRecord, ValidationError> {
    let raw = candidate.raw;
    let missing = |field: &'static str, raw: &str| ValidationError::MissingField {
        field,
        raw: raw.to_owned(),
    };

    let street = clean(candidate.street.as_deref()).ok_or_else(|| missing("street", &raw))?;

    let day_token = clean(candidate.day.as_deref()).ok_or_else(|| missing("day", &raw))?;
    let Some(day) = Day::from_token(&day_token) else {
        return Err(ValidationError::UnknownDay {
            token: day_token,
            raw,
        });
    };

    let barrio = clean(candidate.barrio.as_deref()).ok_or_else(|| missing("barrio", &raw))?;

    let stretch = match (
        clean(candidate.from_street.as_deref()),
        clean(candidate.to_street.as_deref()),
    ) {
        (None, None) => Stretch::Street,
        (Some(_), None) => return Err(missing("to", &raw)),
        (None, Some(_)) => return Err(missing("from", &raw)),
        (Some(from), Some(to)) if from.to_lowercase() == to.to_lowercase() => {
            Stretch::Corner { cross: from }
        }
        (Some(from), Some(to)) => Stretch::Range { from, to },
    };

    Ok(FeriaRecord {
        barrio,
        street,
        stretch,
        day,
        raw,
    })
}

/// Cleaned field text, or `None` when nothing meaningful is left.
fn clean(field: Option<&str>) -> Option<String> {
    let text = field?.replace("**", "");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c));
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
