//! HTML table reader.
//!
//! Turns each `<table>` in an HTML fragment into a [`DataFrame`]:
//! - header rows come from `<thead>`, or from leading all-`<th>` rows
//! - `<tfoot>` rows are appended after the body
//! - colspan/rowspan are expanded by repeating the cell text
//! - rows belong to their nearest `<table>`, so nested tables are read separately

use crate::error::PdfTablesError;
use crate::frame::DataFrame;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

/// Upper bound for a single colspan or rowspan attribute.
const MAX_SPAN: usize = 100;

// Generous enough for multi-thousand-row financial tables; only runaway
// markup hits these.
const MAX_GRID_ROWS: usize = 1_000_000;

const MAX_GRID_COLS: usize = 10_000;

/// Bound on rows x columns after span expansion.
const MAX_TOTAL_CELLS: usize = 10_000_000;

#[derive(Debug, thiserror::Error)]
pub enum HtmlTableError {
    #[error("table grid exceeds {limit} {what}")]
    GridTooLarge { what: &'static str, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
    Foot,
}

#[derive(Debug, Clone)]
struct RawCell {
    text: String,
    is_header: bool,
    colspan: usize,
    rowspan: usize,
}

/// Read every table in `html`, in document order.
///
/// Tables without any cells are skipped, so markup with no usable table
/// yields an empty vector rather than an error. A grid past the size
/// limits fails with [`PdfTablesError::HtmlTable`].
pub fn read_html(html: &str) -> Result<Vec<DataFrame>, PdfTablesError> {
    let document = Html::parse_fragment(html);
    let mut frames = Vec::new();

    for table in document.select(&TABLE_SELECTOR) {
        if let Some(frame) = read_table(table)? {
            frames.push(frame);
        }
    }

    Ok(frames)
}

fn read_table(table: ElementRef<'_>) -> Result<Option<DataFrame>, HtmlTableError> {
    let mut head = Vec::new();
    let mut body = Vec::new();
    let mut foot = Vec::new();

    for row in table.select(&TR_SELECTOR) {
        if !belongs_to(row, table) {
            continue;
        }
        let cells = row_cells(row);
        if cells.is_empty() {
            continue;
        }
        match section_of(row) {
            Section::Head => head.push(cells),
            Section::Body => body.push(cells),
            Section::Foot => foot.push(cells),
        }
    }

    if head.is_empty() {
        while body
            .first()
            .is_some_and(|cells: &Vec<RawCell>| cells.iter().all(|c| c.is_header))
        {
            head.push(body.remove(0));
        }
    }

    let header = expand_spans(&head)?;
    let mut data = expand_spans(&body)?;
    data.extend(expand_spans(&foot)?);

    let width = header
        .iter()
        .chain(data.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    if width == 0 {
        return Ok(None);
    }

    check_grid(header.len() + data.len(), width)?;

    let columns = if header.is_empty() {
        (0..width).map(|i| i.to_string()).collect()
    } else {
        dedupe_columns(flatten_header(&header, width))
    };

    Ok(Some(DataFrame::from_text_grid(columns, &data)))
}

/// True when `table` is the closest `<table>` above `row`.
fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .find(|node| node.value().as_element().is_some_and(|el| el.name() == "table"))
        .is_some_and(|node| node.id() == table.id())
}

fn section_of(row: ElementRef<'_>) -> Section {
    for node in row.ancestors() {
        if let Some(el) = node.value().as_element() {
            match el.name() {
                "thead" => return Section::Head,
                "tfoot" => return Section::Foot,
                "tbody" | "table" => return Section::Body,
                _ => {}
            }
        }
    }
    Section::Body
}

fn row_cells(row: ElementRef<'_>) -> Vec<RawCell> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| RawCell {
            text: collapse_whitespace(&cell.text().collect::<String>()),
            is_header: cell.value().name() == "th",
            colspan: span_attr(cell, "colspan"),
            rowspan: span_attr(cell, "rowspan"),
        })
        .collect()
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expand colspan/rowspan into a plain grid of strings.
///
/// Cells carried down by a rowspan are slotted in front of the first cell
/// whose column they occupy. Spans that run past the last row produce
/// extra rows.
fn expand_spans(rows: &[Vec<RawCell>]) -> Result<Vec<Vec<String>>, HtmlTableError> {
    let mut grid: Vec<Vec<String>> = Vec::new();
    // (column, text, rows still to fill), sorted by column
    let mut carried: Vec<(usize, String, usize)> = Vec::new();

    for row in rows {
        let mut texts = Vec::new();
        let mut next_carried = Vec::new();
        let mut pending = carried.into_iter().peekable();
        let mut col = 0;

        for cell in row {
            while let Some((_, text, left)) = pending.next_if(|(c, _, _)| *c <= col) {
                texts.push(text.clone());
                if left > 1 {
                    next_carried.push((col, text, left - 1));
                }
                col += 1;
            }
            for _ in 0..cell.colspan {
                texts.push(cell.text.clone());
                if cell.rowspan > 1 {
                    next_carried.push((col, cell.text.clone(), cell.rowspan - 1));
                }
                col += 1;
            }
        }
        for (_, text, left) in pending {
            texts.push(text.clone());
            if left > 1 {
                next_carried.push((col, text, left - 1));
            }
            col += 1;
        }

        if texts.len() > MAX_GRID_COLS {
            return Err(HtmlTableError::GridTooLarge {
                what: "columns",
                limit: MAX_GRID_COLS,
            });
        }
        grid.push(texts);
        carried = next_carried;
        check_grid(grid.len(), 0)?;
    }

    while !carried.is_empty() {
        let mut texts = Vec::new();
        let mut next_carried = Vec::new();
        for (col, text, left) in carried {
            texts.push(text.clone());
            if left > 1 {
                next_carried.push((col, text, left - 1));
            }
        }
        grid.push(texts);
        carried = next_carried;
    }

    Ok(grid)
}

fn check_grid(rows: usize, cols: usize) -> Result<(), HtmlTableError> {
    if rows > MAX_GRID_ROWS {
        return Err(HtmlTableError::GridTooLarge {
            what: "rows",
            limit: MAX_GRID_ROWS,
        });
    }
    if cols > MAX_GRID_COLS {
        return Err(HtmlTableError::GridTooLarge {
            what: "columns",
            limit: MAX_GRID_COLS,
        });
    }
    if rows.saturating_mul(cols) > MAX_TOTAL_CELLS {
        return Err(HtmlTableError::GridTooLarge {
            what: "cells",
            limit: MAX_TOTAL_CELLS,
        });
    }
    Ok(())
}

/// One name per column. Stacked header rows are joined with a space,
/// skipping blanks and repeats left by spans.
fn flatten_header(header: &[Vec<String>], width: usize) -> Vec<String> {
    (0..width)
        .map(|col| {
            let mut levels: Vec<&str> = Vec::new();
            for row in header {
                let level = row.get(col).map(String::as_str).unwrap_or("");
                if !level.is_empty() && levels.last() != Some(&level) {
                    levels.push(level);
                }
            }
            if levels.is_empty() {
                format!("Unnamed: {col}")
            } else {
                levels.join(" ")
            }
        })
        .collect()
}

/// Suffix repeated names: "Q", "Q" -> "Q", "Q.1".
fn dedupe_columns(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    columns
        .into_iter()
        .map(|name| {
            let count = seen.entry(name.clone()).or_insert(0);
            let out = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            out
        })
        .collect()
}
