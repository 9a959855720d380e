//! HTML table helpers shared by the listings and quotes parsers.

use scraper::{ElementRef, Html, Selector};

/// Browsers clamp `colspan` to 1000 and `rowspan` to 65534.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

/// A `th`/`td` cell with its span attributes.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    pub text: String,
    pub colspan: usize,
    pub rowspan: usize,
}

/// Rows of one table, split into leading header rows and data rows.
#[derive(Debug, Default)]
pub(crate) struct TableRows {
    pub header: Vec<Vec<Cell>>,
    pub body: Vec<Vec<Cell>>,
}

/// Every `<table>` in the document, in document order.
pub(crate) fn tables(document: &Html) -> Vec<ElementRef<'_>> {
    match Selector::parse("table") {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Split a table into header rows (only `th` cells, before any data) and
/// data rows (at least one `td`).
pub(crate) fn table_rows(table: ElementRef<'_>) -> Option<TableRows> {
    let tr_selector = Selector::parse("tr").ok()?;
    let cell_selector = Selector::parse("th, td").ok()?;
    let td_selector = Selector::parse("td").ok()?;

    let mut rows = TableRows::default();
    for tr in table.select(&tr_selector) {
        let cells: Vec<Cell> = tr.select(&cell_selector).map(cell).collect();
        if cells.is_empty() {
            continue;
        }

        let has_data = tr.select(&td_selector).next().is_some();
        if has_data {
            rows.body.push(cells);
        } else if rows.body.is_empty() {
            rows.header.push(cells);
        }
    }
    Some(rows)
}

/// Cell texts with each cell repeated `colspan` times.
pub(crate) fn expand(cells: &[Cell]) -> Vec<String> {
    cells
        .iter()
        .flat_map(|c| std::iter::repeat(c.text.clone()).take(c.colspan))
        .collect()
}

/// Lay header rows out on a grid, honouring `colspan` and `rowspan`.
///
/// Every returned row has the same width; positions no cell covers are
/// empty strings.
pub(crate) fn header_grid(rows: &[Vec<Cell>]) -> Vec<Vec<String>> {
    let mut grid: Vec<Vec<Option<String>>> = vec![Vec::new(); rows.len()];

    for (r, row) in rows.iter().enumerate() {
        let mut c = 0;
        for cell in row {
            while grid[r].get(c).is_some_and(Option::is_some) {
                c += 1;
            }
            let end = c.saturating_add(cell.colspan);
            for line in grid.iter_mut().skip(r).take(cell.rowspan) {
                if line.len() < end {
                    line.resize(end, None);
                }
                for slot in &mut line[c..end] {
                    *slot = Some(cell.text.clone());
                }
            }
            c = end;
        }
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    grid.into_iter()
        .map(|line| {
            let mut line: Vec<String> = line.into_iter().map(Option::unwrap_or_default).collect();
            line.resize(width, String::new());
            line
        })
        .collect()
}

fn cell(element: ElementRef<'_>) -> Cell {
    let text = element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Cell {
        text,
        colspan: span(element, "colspan", MAX_COLSPAN),
        rowspan: span(element, "rowspan", MAX_ROWSPAN),
    }
}

fn span(element: ElementRef<'_>, attr: &str, max: usize) -> usize {
    element
        .value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, max)
}
