use std::collections::HashSet;

use crate::extraction::ExtractionTable;

fn escape(cell: &str) -> String {
    cell.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders extracted table cells as HTML. The first row becomes the header.
pub fn table_to_html(values: &[Vec<String>]) -> Option<String> {
    let (header, rows) = values.split_first()?;

    let mut html = String::from("<table><thead><tr>");
    for cell in header {
        html.push_str(&format!("<th>{}</th>", escape(cell)));
    }
    html.push_str("</tr></thead>");

    if !rows.is_empty() {
        html.push_str("<tbody>");
        for row in rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody>");
    }

    html.push_str("</table>");
    Some(html)
}

/// Tables printed on any of the given pages, in document order.
pub fn tables_for_pages<'a>(
    tables: &'a [ExtractionTable],
    page_numbers: &[u32],
) -> Vec<&'a ExtractionTable> {
    if page_numbers.is_empty() {
        return Vec::new();
    }

    let pages: HashSet<u32> = page_numbers.iter().copied().collect();
    tables
        .iter()
        .filter(|t| pages.contains(&t.page_number))
        .collect()
}
