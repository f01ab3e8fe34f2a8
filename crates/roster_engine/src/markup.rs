//! Positional parsing of the listing and detail pages.
//!
//! The site offers no semantic markup, so every field is located by its
//! position in a table. Any deviation surfaces as a [`MarkupError`] and the
//! caller skips the row.
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::{JobDetail, RowSummary};

pub const LISTING_ROW_SELECTOR: &str = "table tbody tr";
pub const TITLE_LINK_SELECTOR: &str = r#"td:nth-child(3) a[onclick*="fnGoBoardSl"]"#;
/// Same links as [`TITLE_LINK_SELECTOR`], scoped to the whole document.
pub const PAGE_TITLE_LINK_SELECTOR: &str =
    r#"table tbody tr td:nth-child(3) a[onclick*="fnGoBoardSl"]"#;
pub const CREATION_DATE_SELECTOR: &str = "td:nth-child(8)";
pub const NEXT_PAGE_SELECTOR: &str = r##"a[href="#page_next"][class="next"]"##;

/// Detail-table rows holding each field, zero-based.
const FACILITY_TYPE_ROW: usize = 2;
const REGION_ROW: usize = 4;
const NAME_ROW: usize = 5;
const EMAIL_ROW: usize = 6;
const MIN_DETAIL_ROWS: usize = EMAIL_ROW + 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("invalid selector {0:?}")]
    Selector(&'static str),
    #[error("detail page has no table")]
    MissingTable,
    #[error("detail table has {found} rows, expected at least {MIN_DETAIL_ROWS}")]
    TooFewRows { found: usize },
    #[error("detail table row {row} has no cell {cell}")]
    MissingCell { row: usize, cell: usize },
}

/// Reads the clickable job rows of a listing page in display order.
///
/// Rows without a title link (headers, "no results" banners) are ignored, so
/// `index` lines up with the links a browser would click.
pub fn parse_listing_rows(html: &str) -> Result<Vec<RowSummary>, MarkupError> {
    let doc = Html::parse_document(html);
    let row_sel = selector(LISTING_ROW_SELECTOR)?;
    let link_sel = selector(TITLE_LINK_SELECTOR)?;
    let date_sel = selector(CREATION_DATE_SELECTOR)?;

    let rows = doc
        .select(&row_sel)
        .filter_map(|row| {
            let link = row.select(&link_sel).next()?;
            let creation_date = row
                .select(&date_sel)
                .next()
                .map(|cell| collapse_text(&cell))
                .unwrap_or_default();
            Some((collapse_text(&link), creation_date))
        })
        .enumerate()
        .map(|(index, (title, creation_date))| RowSummary {
            index,
            title,
            creation_date,
        })
        .collect();
    Ok(rows)
}

/// Extracts facility type, region, name and email from a detail page.
pub fn parse_detail(html: &str) -> Result<JobDetail, MarkupError> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;
    let tbody_sel = selector("tbody")?;
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or(MarkupError::MissingTable)?;
    let body = table
        .select(&tbody_sel)
        .next()
        .ok_or(MarkupError::MissingTable)?;
    let rows: Vec<ElementRef<'_>> = body.select(&tr_sel).collect();
    if rows.len() < MIN_DETAIL_ROWS {
        return Err(MarkupError::TooFewRows { found: rows.len() });
    }

    // The facility cell carries trailing annotations after its first text node.
    let facility_type = cell_at(&rows, &td_sel, FACILITY_TYPE_ROW, 0)?
        .text()
        .next()
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    Ok(JobDetail {
        facility_type,
        region: collapse_text(&cell_at(&rows, &td_sel, REGION_ROW, 0)?),
        name: collapse_text(&cell_at(&rows, &td_sel, NAME_ROW, 0)?),
        email: collapse_text(&cell_at(&rows, &td_sel, EMAIL_ROW, 1)?),
    })
}

fn cell_at<'a>(
    rows: &[ElementRef<'a>],
    td_sel: &Selector,
    row: usize,
    cell: usize,
) -> Result<ElementRef<'a>, MarkupError> {
    rows[row]
        .select(td_sel)
        .nth(cell)
        .ok_or(MarkupError::MissingCell { row, cell })
}

fn selector(raw: &'static str) -> Result<Selector, MarkupError> {
    Selector::parse(raw).map_err(|_| MarkupError::Selector(raw))
}

fn collapse_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
