//! Splits a page into headings and matchable segments.
//!
//! Segments are the outermost `li`, `p` and `tr` elements of the content
//! area, in document order. Pages with none of those (plain text, or markup
//! that only uses `div`/`br`) become a single segment holding the flattened
//! text, one feria per line.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

/// Container the municipal CMS wraps article bodies in.
static CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.field--name-field-art-cuerpo-contenido")
        .expect("invalid selector: content container")
});

static BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2, h3, h4, li, p, tr").expect("invalid selector: blocks")
});

const SEGMENT_TAGS: [&str; 3] = ["li", "p", "tr"];

/// One unit of page content that strategies try to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    /// Flattened text; `<br>` and block boundaries become newlines.
    pub text: String,
    /// Sibling pieces of the segment: the cells of a table row, or the child
    /// elements and text runs of a list item or paragraph.
    pub cells: Vec<String>,
    /// A table row made only of `th` cells.
    pub header: bool,
    /// Cells are the columns of a table row rather than pieces of an item.
    pub row: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    Heading(String),
    Segment(Segment),
}

pub(crate) fn split_page(page: &str) -> Vec<Block> {
    let document = Html::parse_document(page);
    let root = document
        .select(&CONTENT_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut blocks = Vec::new();
    for element in root.select(&BLOCK_SELECTOR) {
        let tag = element.value().name();
        if tag.starts_with('h') {
            let heading = collapse_whitespace(&flatten(element));
            if !heading.is_empty() {
                blocks.push(Block::Heading(heading));
            }
        } else if !has_segment_ancestor(element) {
            let segment = if tag == "tr" {
                row_segment(element)
            } else {
                item_segment(element)
            };
            if !segment.text.trim().is_empty() {
                blocks.push(Block::Segment(segment));
            }
        }
    }

    if !blocks.iter().any(|b| matches!(b, Block::Segment(_))) {
        let text = flatten(root);
        if !text.trim().is_empty() {
            blocks.push(Block::Segment(Segment {
                text,
                cells: Vec::new(),
                header: false,
                row: false,
            }));
        }
    }

    blocks
}

fn has_segment_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| SEGMENT_TAGS.contains(&a.value().name()))
}

fn row_segment(row: ElementRef<'_>) -> Segment {
    let mut cells = Vec::new();
    let mut header = true;
    for cell in row.children().filter_map(ElementRef::wrap) {
        match cell.value().name() {
            "td" => header = false,
            "th" => {}
            _ => continue,
        }
        push_cell(&mut cells, &flatten(cell));
    }
    Segment {
        text: cells.join("\n"),
        header: header && !cells.is_empty(),
        cells,
        row: true,
    }
}

fn item_segment(item: ElementRef<'_>) -> Segment {
    let mut cells = Vec::new();
    let mut run = String::new();
    for child in item.children() {
        match child.value() {
            Node::Text(text) => run.push_str(text),
            Node::Element(data) if data.name().eq_ignore_ascii_case("br") => {
                push_cell(&mut cells, &std::mem::take(&mut run));
            }
            Node::Element(_) => {
                push_cell(&mut cells, &std::mem::take(&mut run));
                if let Some(element) = ElementRef::wrap(child) {
                    push_cell(&mut cells, &flatten(element));
                }
            }
            _ => {}
        }
    }
    push_cell(&mut cells, &run);

    Segment {
        text: flatten(item),
        cells,
        header: false,
        row: false,
    }
}

fn push_cell(cells: &mut Vec<String>, raw: &str) {
    let cell = collapse_whitespace(raw);
    if !cell.is_empty() {
        cells.push(cell);
    }
}

/// Text content of `element`, with line breaks at `<br>` and block edges.
fn flatten(element: ElementRef<'_>) -> String {
    fn walk(element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(data) => {
                    let name = data.name();
                    let block = matches!(
                        name,
                        "br" | "p" | "div" | "li" | "tr" | "ul" | "ol" | "table" | "h2" | "h3"
                            | "h4"
                    );
                    if block {
                        out.push('\n');
                    } else if matches!(name, "td" | "th") {
                        out.push(' ');
                    }
                    if let Some(child_el) = ElementRef::wrap(child) {
                        walk(child_el, out);
                    }
                    if block {
                        out.push('\n');
                    }
                }
                _ => {}
            }
        }
    }

    let mut out = String::new();
    walk(element, &mut out);
    out
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(page: &str) -> Vec<Segment> {
        split_page(page)
            .into_iter()
            .filter_map(|b| match b {
                Block::Segment(s) => Some(s),
                Block::Heading(_) => None,
            })
            .collect()
    }

    #[test]
    fn plain_text_becomes_one_segment() {
        let segs = segments("Centro: Rondeau desde Uruguay hasta Paysandú - Lunes\nOtra línea");
        assert_eq!(segs.len(), 1);
        assert!(segs[0].text.contains("Rondeau desde Uruguay"));
        assert!(segs[0].text.contains('\n'));
        assert!(segs[0].cells.is_empty());
    }

    #[test]
    fn nested_paragraph_inside_list_item_is_not_repeated() {
        let html = "<ul><li><p>Cordón: Minas y Colonia. Jueves</p></li></ul>";
        let segs = segments(html);
        assert_eq!(segs.len(), 1);
        assert_eq!(collapse_whitespace(&segs[0].text), "Cordón: Minas y Colonia. Jueves");
    }

    #[test]
    fn table_rows_split_into_cells() {
        let html = "<table>\
            <tr><th>Barrio</th><th>Ubicación</th><th>Día</th></tr>\
            <tr><td>Barrio Sur</td><td>Convención desde Soriano hasta Canelones</td><td>Miércoles</td></tr>\
            </table>";
        let segs = segments(html);
        assert_eq!(segs.len(), 2);
        assert!(segs[0].header);
        assert!(!segs[1].header);
        assert!(segs.iter().all(|s| s.row));
        assert_eq!(
            segs[1].cells,
            vec![
                "Barrio Sur".to_owned(),
                "Convención desde Soriano hasta Canelones".to_owned(),
                "Miércoles".to_owned()
            ]
        );
    }

    #[test]
    fn list_item_children_and_breaks_become_cells() {
        let html = "<ul><li><strong>Palermo</strong> Gaboto desde Durazno hasta Maldonado<br>Sábado</li></ul>";
        let segs = segments(html);
        assert_eq!(
            segs[0].cells,
            vec![
                "Palermo".to_owned(),
                "Gaboto desde Durazno hasta Maldonado".to_owned(),
                "Sábado".to_owned()
            ]
        );
        assert!(!segs[0].row);
    }

    #[test]
    fn headings_are_reported_in_order() {
        let html = "<h2>Centro</h2><ul><li>a</li></ul><h3>Cordón</h3><p>b</p>";
        let blocks = split_page(html);
        assert!(matches!(&blocks[0], Block::Heading(h) if h == "Centro"));
        assert!(matches!(&blocks[1], Block::Segment(_)));
        assert!(matches!(&blocks[2], Block::Heading(h) if h == "Cordón"));
        assert!(matches!(&blocks[3], Block::Segment(_)));
    }

    #[test]
    fn content_container_scopes_extraction() {
        let html = "<body><p>Menú principal</p>\
            <div class=\"field--name-field-art-cuerpo-contenido\"><p>Dentro</p></div>\
            <p>Pie de página</p></body>";
        let segs = segments(html);
        assert_eq!(segs.len(), 1);
        assert_eq!(collapse_whitespace(&segs[0].text), "Dentro");
    }
}
