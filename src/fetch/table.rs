use scraper::{ElementRef, Html, Selector};

use crate::error::EtlError;
use crate::process::RawTable;

/// True once the rendered page contains the price table.
pub fn has_price_table(html: &str, table_id: &str) -> bool {
    match table_selector(table_id) {
        Ok(sel) => Html::parse_document(html).select(&sel).next().is_some(),
        Err(_) => false,
    }
}

/// Pull the rendered price table apart into raw header and row text.
/// Cells are collected as-is; all interpretation belongs to the
/// normalizer.
pub fn parse_price_table(html: &str, table_id: &str) -> Result<RawTable, EtlError> {
    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector(table_id)?)
        .next()
        .ok_or_else(|| EtlError::Extraction(format!("no table #{} on page", table_id)))?;

    let header_sel = Selector::parse("thead th").expect("header selector");
    let row_sel = Selector::parse("tbody tr").expect("row selector");
    let cell_sel = Selector::parse("td").expect("cell selector");

    let headers: Vec<String> = table.select(&header_sel).map(cell_text).collect();
    let rows: Vec<Vec<String>> = table
        .select(&row_sel)
        .map(|tr| tr.select(&cell_sel).map(cell_text).collect())
        .collect();

    if headers.is_empty() || rows.is_empty() {
        return Err(EtlError::Extraction(
            "no table headers or rows parsed".to_string(),
        ));
    }

    Ok(RawTable { headers, rows })
}

fn table_selector(table_id: &str) -> Result<Selector, EtlError> {
    Selector::parse(&format!("table#{}", table_id))
        .map_err(|e| EtlError::Extraction(format!("bad table id {:?}: {}", table_id, e)))
}

fn cell_text(el: ElementRef) -> String {
    el.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_ID: &str = "latestdiclosuresEquities";

    const RENDERED_PAGE: &str = r#"<html><body>
        <div class="wrap">
        <table id="latestdiclosuresEquities">
          <thead>
            <tr><th>Company</th><th> Opening Price </th><th>High</th>
                <th>Low</th><th>Close</th><th>Volume</th><th>Trade Date</th></tr>
          </thead>
          <tbody>
            <tr><td>ABC Plc</td><td>10.50</td><td>11.00</td>
                <td>10.00</td><td>10.75</td><td>1,200</td><td>12 Aug 25</td></tr>
            <tr><td>DEF [BLS]</td><td>--</td><td>3.20</td>
                <td>3.00</td><td>3.15</td><td>800</td><td>12 Aug 25</td></tr>
          </tbody>
        </table>
        </div>
    </body></html>"#;

    #[test]
    fn parses_headers_and_rows() -> anyhow::Result<()> {
        let raw = parse_price_table(RENDERED_PAGE, TABLE_ID)?;

        // headers come through untrimmed; the normalizer trims them
        assert_eq!(raw.headers[0], "Company");
        assert_eq!(raw.headers[1], " Opening Price ");
        assert_eq!(raw.headers.len(), 7);

        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0][0], "ABC Plc");
        assert_eq!(raw.rows[1][1], "--");
        assert_eq!(raw.rows[1][6], "12 Aug 25");
        Ok(())
    }

    #[test]
    fn missing_table_is_an_extraction_error() {
        let err = parse_price_table("<html><body><p>loading…</p></body></html>", TABLE_ID)
            .unwrap_err();
        assert!(matches!(err, EtlError::Extraction(_)));
    }

    #[test]
    fn empty_body_is_an_extraction_error() {
        let page = r#"<table id="latestdiclosuresEquities">
            <thead><tr><th>Company</th></tr></thead><tbody></tbody>
        </table>"#;
        let err = parse_price_table(page, TABLE_ID).unwrap_err();
        match err {
            EtlError::Extraction(msg) => assert_eq!(msg, "no table headers or rows parsed"),
            other => panic!("expected extraction error, got {other:?}"),
        }
    }

    #[test]
    fn detects_rendered_table() {
        assert!(has_price_table(RENDERED_PAGE, TABLE_ID));
        assert!(!has_price_table("<html><body></body></html>", TABLE_ID));
        assert!(!has_price_table(RENDERED_PAGE, "someOtherTable"));
    }
}
