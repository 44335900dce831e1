//! Regex strategy: matches the municipal phrasing line by line.
//!
//! Canonical form: `"Barrio Sur: Convención desde Soriano hasta Canelones – Miércoles"`.
//! Accepted variants:
//! - `entre X y Y` instead of `desde X hasta Y`, optional comma after the street;
//! - `-`, `–`, `—`, `.`, `,`, `;` or `|` before the day, day optionally in `**bold**`;
//! - intersections (`Street y Cross`, `Street esq. Cross`);
//! - `Barrio: Street – Day` with no cross streets.
//!
//! Every shape is first tried with a recognized weekday, then all of them again
//! with any single word as the day. Trailing notes such as opening hours are
//! allowed after the day in both passes. The second pass keeps misspelled days
//! visible to the normalizer.

use regex::Regex;

use ferias_core::FeriaCandidate;

use super::{Matcher, Segment};

const LEAD: &str = r"^[\s•·*\-]*";
const BARRIO_OPT: &str = r"(?:(?P<barrio>[^:\n]+?)\s*:\s*)?";
const BARRIO_REQ: &str = r"(?P<barrio>[^:\n]+?)\s*:\s*";
const SEP: &str = r"\s*[-–—.,;|]\s*";
const DAY_KNOWN: &str =
    r"\**(?P<day>lunes|martes|mi[ée]rcoles|jueves|viernes|s[áa]bado|domingo)\**";
const DAY_ANY: &str = r"\**(?P<day>\p{L}+)\**";
const NOTES: &str = r"(?:[\s.,;:(\-–—].*)?$";

#[derive(Clone, Copy)]
enum Shape {
    Range,
    Corner,
    Street,
}

pub(crate) struct PhraseMatcher {
    patterns: Vec<(Shape, Regex)>,
}

impl PhraseMatcher {
    pub(crate) fn new() -> Self {
        let range = format!(
            r"(?i){LEAD}{BARRIO_OPT}(?P<street>[^:\n]+?)\s*,?\s+(?:desde|entre)\s+(?P<from>.+?)\s+(?:hasta|y)\s+(?P<to>.+?){SEP}"
        );
        let corner = format!(
            r"(?i){LEAD}{BARRIO_OPT}(?P<street>[^:\n]+?)\s+(?:y|esq\.?|esquina)\s+(?P<cross>.+?){SEP}"
        );
        let street = format!(r"(?i){LEAD}{BARRIO_REQ}(?P<street>[^:\n]+?){SEP}");

        let compile = |shape: Shape, prefix: &str, day: &str| {
            let pattern = format!("{prefix}{day}{NOTES}");
            (
                shape,
                Regex::new(&pattern).expect("invalid regex: feria phrase"),
            )
        };

        Self {
            patterns: vec![
                compile(Shape::Range, &range, DAY_KNOWN),
                compile(Shape::Corner, &corner, DAY_KNOWN),
                compile(Shape::Street, &street, DAY_KNOWN),
                compile(Shape::Range, &range, DAY_ANY),
                compile(Shape::Corner, &corner, DAY_ANY),
                compile(Shape::Street, &street, DAY_ANY),
            ],
        }
    }

    fn match_line(&self, line: &str) -> Option<FeriaCandidate> {
        self.patterns.iter().find_map(|(shape, re)| {
            let caps = re.captures(line)?;
            let field = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_owned());
            let (from_street, to_street) = match shape {
                Shape::Range => (field("from"), field("to")),
                Shape::Corner => (field("cross"), field("cross")),
                Shape::Street => (None, None),
            };
            Some(FeriaCandidate {
                raw: line.trim().to_owned(),
                barrio: field("barrio"),
                street: field("street"),
                from_street,
                to_street,
                day: field("day"),
                strategy: "regex",
            })
        })
    }
}

impl Matcher for PhraseMatcher {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn try_extract(&self, segment: &Segment) -> Vec<FeriaCandidate> {
        segment
            .text
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.match_line(&line))
            .collect()
    }
}
