//! Table constructors.

use roxmltree::Node;

use crate::config::{MAX_COLSPAN, MAX_ROWSPAN};
use crate::error::ParseWarning;
use crate::grid::{build_grid, GridCell};
use crate::model::{ContentNode, Table, TableWrap};
use crate::registry::descriptive::Descriptive;
use crate::registry::types::{NodeKind, ParseContext};
use crate::xml::{collapse_whitespace, element_children, find_child, get_tag_name, itertext};

/// Build a table titled `TableN` with a fully expanded grid.
///
/// Rows are all `tr` descendants in document order, so header, body and
/// footer rows end up in one grid.
pub fn table(node: Node<'_, '_>, ctx: &mut ParseContext) -> Table {
    let title = ctx.next_table_title();

    let mut rows = Vec::new();
    for tr in node.descendants().filter(|n| n.has_tag_name("tr")) {
        let mut cells = Vec::new();
        for cell in element_children(tr) {
            let rowspan = span(cell, "rowspan", MAX_ROWSPAN, &title, ctx);
            let colspan = span(cell, "colspan", MAX_COLSPAN, &title, ctx);
            cells.push(
                GridCell::new(collapse_whitespace(&itertext(cell)))
                    .with_rowspan(rowspan)
                    .with_colspan(colspan),
            );
        }
        rows.push(cells);
    }

    Table {
        title,
        rows: build_grid(rows),
    }
}

/// Read a span attribute, recovering missing or unusable values as 1.
///
/// Values above `max` (including ones too large for `usize`) are clamped
/// to `max`. Every recovered or clamped value is reported.
fn span(
    cell: Node<'_, '_>,
    attribute: &str,
    max: usize,
    table_title: &str,
    ctx: &mut ParseContext,
) -> usize {
    let Some(value) = cell.attribute(attribute) else {
        return 1;
    };

    let trimmed = value.trim();
    let span = match trimmed.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => return n,
        Ok(0) => 1,
        Ok(_) => max,
        Err(_) if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) => max,
        Err(_) => 1,
    };

    ctx.warn(ParseWarning::MalformedAttribute {
        tag: get_tag_name(cell).to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
        context: table_title.to_string(),
    });
    span
}

/// Build a table wrapper holding its tables and footer.
///
/// Tables are read from direct `table` children and from `table`
/// children of an `alternatives` block. Other children (graphics of the
/// same table, notes) are not parsed.
pub fn table_wrap(node: Node<'_, '_>, ctx: &mut ParseContext) -> TableWrap {
    let descriptive = Descriptive::extract(node, ctx);
    let title = descriptive.compose_title(NodeKind::TableWrap.name());

    let footer = find_child(node, "table-wrap-foot")
        .map(|foot| collapse_whitespace(&itertext(foot)))
        .filter(|text| !text.is_empty());

    let mut content = Vec::new();
    for child in element_children(node) {
        match get_tag_name(child) {
            "table" => content.push(ContentNode::Table(table(child, ctx))),
            "alternatives" => {
                for alt in element_children(child).filter(|n| n.has_tag_name("table")) {
                    content.push(ContentNode::Table(table(alt, ctx)));
                }
            }
            _ => {}
        }
    }

    TableWrap {
        title,
        footer,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roxmltree::Document;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_table_with_header_spans() {
        let xml = r#"<table>
            <thead>
                <tr><th colspan="2">65</th><th colspan="2">40</th><th colspan="2">20</th></tr>
                <tr><th>Men</th><th>Women</th><th>Men</th><th>Women</th><th>Men</th><th>Women</th></tr>
            </thead>
            <tbody>
                <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td></tr>
            </tbody>
        </table>"#;
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let t = table(doc.root_element(), &mut ctx);
        assert_eq!(t.title, "Table1");
        assert_eq!(t.rows.len(), 3);
        assert_eq!(t.rows[0], row(&["65", "65", "40", "40", "20", "20"]));
        assert_eq!(t.rows[2], row(&["1", "2", "3", "4", "5", "6"]));
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_cell_text_is_collapsed() {
        let xml = "<table><tr><td>\n  Mean <italic>(SD)</italic>\n</td></tr></table>";
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let t = table(doc.root_element(), &mut ctx);
        assert_eq!(t.rows, vec![row(&["Mean (SD)"])]);
    }

    #[test]
    fn test_malformed_colspan_recovers_as_one() {
        let xml = r#"<table><tr><td colspan="two">a</td><td>b</td></tr></table>"#;
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let t = table(doc.root_element(), &mut ctx);
        assert_eq!(t.rows, vec![row(&["a", "b"])]);
        assert_eq!(
            ctx.warnings(),
            &[ParseWarning::MalformedAttribute {
                tag: "td".to_string(),
                attribute: "colspan".to_string(),
                value: "two".to_string(),
                context: "Table1".to_string(),
            }]
        );
    }

    #[test]
    fn test_oversized_colspan_is_clamped() {
        let xml = r#"<table><tr><td colspan="5000000">x</td></tr></table>"#;
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let t = table(doc.root_element(), &mut ctx);
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].len(), MAX_COLSPAN);
        assert!(t.rows[0].iter().all(|c| c == "x"));
        assert_eq!(
            ctx.warnings(),
            &[ParseWarning::MalformedAttribute {
                tag: "td".to_string(),
                attribute: "colspan".to_string(),
                value: "5000000".to_string(),
                context: "Table1".to_string(),
            }]
        );
    }

    #[test]
    fn test_overflowing_rowspan_is_clamped() {
        let xml = r#"<table><tr><td rowspan="18446744073709551616">a</td><td>b</td></tr><tr><td>c</td></tr></table>"#;
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let t = table(doc.root_element(), &mut ctx);
        assert_eq!(t.rows, vec![row(&["a", "b"]), row(&["a", "c"])]);
        assert!(matches!(
            ctx.warnings(),
            [ParseWarning::MalformedAttribute { attribute, .. }] if attribute == "rowspan"
        ));
    }

    #[test]
    fn test_zero_rowspan_warns() {
        let xml = r#"<table><tr><td rowspan="0">a</td></tr><tr><td>b</td></tr></table>"#;
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let t = table(doc.root_element(), &mut ctx);
        assert_eq!(t.rows, vec![row(&["a"]), row(&["b"])]);
        assert_eq!(ctx.warnings().len(), 1);
    }

    #[test]
    fn test_table_wrap_collects_tables_and_footer() {
        let xml = r#"<table-wrap id="t1">
            <label>Table 1</label>
            <caption><p>Baseline characteristics.</p></caption>
            <alternatives>
                <graphic/>
                <table><tr><td>x</td></tr></table>
            </alternatives>
            <table><tr><td>y</td></tr></table>
            <table-wrap-foot><fn><p>SD, standard deviation.</p></fn></table-wrap-foot>
        </table-wrap>"#;
        let doc = Document::parse(xml).unwrap();
        let mut ctx = ParseContext::new();

        let wrap = table_wrap(doc.root_element(), &mut ctx);
        assert_eq!(wrap.title, "Table 1Baseline characteristics.");
        assert_eq!(wrap.footer.as_deref(), Some("SD, standard deviation."));

        let titles: Vec<_> = wrap.content.iter().map(ContentNode::title).collect();
        assert_eq!(titles, vec!["Table1", "Table2"]);
    }

    #[test]
    fn test_table_wrap_without_footer() {
        let doc = Document::parse("<table-wrap><table/></table-wrap>").unwrap();
        let mut ctx = ParseContext::new();

        let wrap = table_wrap(doc.root_element(), &mut ctx);
        assert_eq!(wrap.title, "TableWrap");
        assert_eq!(wrap.footer, None);
        assert_eq!(wrap.content.len(), 1);
    }
}
