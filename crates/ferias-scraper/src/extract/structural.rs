//! Structural strategy: reads ferias laid out as table rows or list items
//! whose pieces sit in separate cells instead of one sentence.
//!
//! A range cell (`desde X hasta Y`) anchors the other fields anywhere. Without
//! one, fields are assigned by position, which only holds for table columns.

use std::sync::LazyLock;

use regex::Regex;

use ferias_core::{Day, FeriaCandidate};

use super::{Matcher, Segment};

/// A whole cell holding `"[Street,] desde X hasta Y"` or `"entre X y Y"`.
static RANGE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?P<street>.+?)\s*,?\s+)?(?:desde|entre)\s+(?P<from>.+?)\s+(?:hasta|y)\s+(?P<to>.+?)\s*[.,;]?\s*$",
    )
    .expect("invalid regex: range cell")
});

/// Words that only show up as cells when inline markup splits a sentence.
const CONNECTIVES: [&str; 11] = [
    "a", "al", "de", "del", "desde", "e", "en", "entre", "hasta", "o", "y",
];

pub(crate) struct StructuralMatcher;

impl Matcher for StructuralMatcher {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn try_extract(&self, segment: &Segment) -> Vec<FeriaCandidate> {
        read_cells(&segment.cells, segment.row)
            .map(|mut candidate| {
                candidate.raw = segment.cells.join(" | ");
                vec![candidate]
            })
            .unwrap_or_default()
    }
}

fn read_cells(cells: &[String], positional: bool) -> Option<FeriaCandidate> {
    if cells.len() < 2 {
        return None;
    }

    let day_idx = day_cell(cells)?;
    let rest: Vec<&str> = cells[..day_idx].iter().map(String::as_str).collect();
    if rest.iter().any(|c| is_sentence_fragment(c)) {
        return None;
    }

    let mut candidate = FeriaCandidate {
        day: Some(cells[day_idx].clone()),
        strategy: "structural",
        ..FeriaCandidate::default()
    };

    if let Some(range_idx) = rest.iter().rposition(|c| RANGE_CELL.is_match(c)) {
        let caps = RANGE_CELL.captures(rest[range_idx])?;
        candidate.from_street = Some(caps["from"].trim().to_owned());
        candidate.to_street = Some(caps["to"].trim().to_owned());

        let barrio_idx = if let Some(street) = caps.name("street") {
            candidate.street = Some(street.as_str().trim().to_owned());
            range_idx.checked_sub(1)
        } else {
            let street_idx = range_idx.checked_sub(1)?;
            candidate.street = Some(rest[street_idx].to_owned());
            street_idx.checked_sub(1)
        };
        candidate.barrio = barrio_idx.map(|i| rest[i].to_owned());
        return Some(candidate);
    }

    if !positional {
        return None;
    }

    let owned = |s: &&str| Some((*s).to_owned());
    match rest.as_slice() {
        [] => return None,
        [street] => candidate.street = owned(street),
        [barrio, street] => {
            candidate.barrio = owned(barrio);
            candidate.street = owned(street);
        }
        [street, from, to] => {
            candidate.street = owned(street);
            candidate.from_street = owned(from);
            candidate.to_street = owned(to);
        }
        [.., barrio, street, from, to] => {
            candidate.barrio = owned(barrio);
            candidate.street = owned(street);
            candidate.from_street = owned(from);
            candidate.to_street = owned(to);
        }
    }
    Some(candidate)
}

/// A second weekday or a bare connective before the day cell means the cells
/// are pieces of running text.
fn is_sentence_fragment(cell: &str) -> bool {
    let lower = cell.to_lowercase();
    Day::from_token(cell).is_some() || CONNECTIVES.contains(&lower.as_str())
}

/// Rightmost cell naming a weekday; failing that, a trailing single word so
/// that misspelled days reach the normalizer and get reported.
fn day_cell(cells: &[String]) -> Option<usize> {
    if let Some(idx) = cells.iter().rposition(|c| Day::from_token(c).is_some()) {
        return Some(idx);
    }
    let last = cells.len() - 1;
    let word = cells[last].trim_end_matches('.');
    (!word.is_empty() && word.chars().all(char::is_alphabetic)).then_some(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Segment {
        Segment {
            text: cells.join("\n"),
            cells: cells.iter().map(|c| (*c).to_owned()).collect(),
            header: false,
            row: true,
        }
    }

    fn item(cells: &[&str]) -> Segment {
        Segment {
            row: false,
            ..row(cells)
        }
    }

    fn single(cells: &[&str]) -> FeriaCandidate {
        let mut found = StructuralMatcher.try_extract(&row(cells));
        assert_eq!(found.len(), 1, "cells: {cells:?}");
        found.remove(0)
    }

    #[test]
    fn barrio_range_cell_and_day() {
        let c = single(&["Barrio Sur", "Convención desde Soriano hasta Canelones", "Miércoles"]);
        assert_eq!(c.barrio.as_deref(), Some("Barrio Sur"));
        assert_eq!(c.street.as_deref(), Some("Convención"));
        assert_eq!(c.from_street.as_deref(), Some("Soriano"));
        assert_eq!(c.to_street.as_deref(), Some("Canelones"));
        assert_eq!(c.day.as_deref(), Some("Miércoles"));
        assert_eq!(c.raw, "Barrio Sur | Convención desde Soriano hasta Canelones | Miércoles");
    }

    #[test]
    fn range_cell_without_street_takes_previous_cell() {
        let c = single(&["Cordón", "Minas", "entre Colonia y Mercedes", "Jueves"]);
        assert_eq!(c.barrio.as_deref(), Some("Cordón"));
        assert_eq!(c.street.as_deref(), Some("Minas"));
        assert_eq!(c.from_street.as_deref(), Some("Colonia"));
        assert_eq!(c.to_street.as_deref(), Some("Mercedes"));
    }

    #[test]
    fn positional_columns() {
        let c = single(&["Cerro", "Grecia", "Turquía", "Vigo", "Sábado"]);
        assert_eq!(c.barrio.as_deref(), Some("Cerro"));
        assert_eq!(c.street.as_deref(), Some("Grecia"));
        assert_eq!(c.from_street.as_deref(), Some("Turquía"));
        assert_eq!(c.to_street.as_deref(), Some("Vigo"));

        let c = single(&["Parque Rodó", "Salvador García Pintos", "Domingo"]);
        assert_eq!(c.barrio.as_deref(), Some("Parque Rodó"));
        assert_eq!(c.street.as_deref(), Some("Salvador García Pintos"));
        assert_eq!(c.from_street, None);
    }

    #[test]
    fn cells_after_the_day_are_ignored() {
        let c = single(&["Centro", "Rondeau", "Lunes", "7 a 14 hs"]);
        assert_eq!(c.day.as_deref(), Some("Lunes"));
        assert_eq!(c.barrio.as_deref(), Some("Centro"));
        assert_eq!(c.street.as_deref(), Some("Rondeau"));
    }

    #[test]
    fn trailing_word_is_kept_as_unknown_day() {
        let c = single(&["Centro", "Rondeau desde Uruguay hasta Paysandú", "Lunex"]);
        assert_eq!(c.day.as_deref(), Some("Lunex"));
        assert_eq!(c.street.as_deref(), Some("Rondeau"));
    }

    #[test]
    fn rows_without_a_day_or_too_few_cells_are_skipped() {
        assert!(StructuralMatcher.try_extract(&row(&["Domingo"])).is_empty());
        assert!(StructuralMatcher
            .try_extract(&row(&["Centro", "Horario de 7 a 14"]))
            .is_empty());
    }

    #[test]
    fn list_item_with_range_cell_is_read() {
        let found = StructuralMatcher.try_extract(&item(&[
            "Palermo",
            "Gaboto desde Durazno hasta Maldonado",
            "Sábado",
        ]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].barrio.as_deref(), Some("Palermo"));
        assert_eq!(found[0].street.as_deref(), Some("Gaboto"));
    }

    #[test]
    fn list_item_cells_are_not_read_by_position() {
        assert!(StructuralMatcher
            .try_extract(&item(&["Parque Rodó", "Salvador García Pintos", "Domingo"]))
            .is_empty());
    }

    #[test]
    fn prose_split_by_bold_days_is_not_a_feria() {
        let prose = ["Las ferias funcionan de", "martes", "a", "domingo"];
        assert!(StructuralMatcher.try_extract(&item(&prose)).is_empty());
        assert!(StructuralMatcher.try_extract(&row(&prose)).is_empty());
    }
}
