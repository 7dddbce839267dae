//! Table recovery from laid-out page text.
//!
//! Statement PDFs render tables as lines whose columns are separated by
//! wide runs of spaces. Two recovery modes are offered:
//! - **stream**: consecutive multi-column lines of a page form a table
//! - **page grid**: every non-blank line of one page becomes a row

use super::{DocumentSource, Result, Table};

/// Split a line into cells at runs of at least `gap` spaces or any tab.
pub fn split_cells(line: &str, gap: usize) -> Vec<String> {
    let gap = gap.max(1);
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut spaces = 0;

    for c in line.trim().chars() {
        match c {
            ' ' => spaces += 1,
            '\t' => spaces += gap,
            _ => {
                if spaces >= gap {
                    cells.push(std::mem::take(&mut current));
                } else if spaces > 0 {
                    current.extend(std::iter::repeat_n(' ', spaces));
                }
                spaces = 0;
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        cells.push(current);
    }

    cells
}

/// Recover stream tables from a sequence of page texts.
///
/// A table is a maximal run of lines with at least two cells. Tables never
/// span a page break.
pub fn stream_tables<'a>(pages: impl IntoIterator<Item = &'a str>, gap: usize) -> Vec<Table> {
    let mut tables = Vec::new();

    for page in pages {
        let mut current: Vec<Vec<String>> = Vec::new();

        for line in page.lines() {
            let cells = split_cells(line, gap);
            if cells.len() >= 2 {
                current.push(cells);
            } else if !current.is_empty() {
                tables.push(Table::from_rows(std::mem::take(&mut current)));
            }
        }

        if !current.is_empty() {
            tables.push(Table::from_rows(current));
        }
    }

    tables
}

/// Treat every non-blank line of a page as one grid row.
pub fn page_grid(page: &str, gap: usize) -> Table {
    Table::from_rows(
        page.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| split_cells(line, gap)),
    )
}

/// Stream tables over every page of a source.
pub fn document_tables<S: DocumentSource + ?Sized>(source: &S, gap: usize) -> Result<Vec<Table>> {
    let pages = (1..=source.page_count())
        .map(|page| source.page_text(page))
        .collect::<Result<Vec<_>>>()?;

    Ok(stream_tables(pages.iter().map(String::as_str), gap))
}

/// The page grid of one page of a source, skipped when the page is blank.
pub fn document_page_tables<S: DocumentSource + ?Sized>(
    source: &S,
    page: u32,
    gap: usize,
) -> Result<Vec<Table>> {
    let table = page_grid(&source.page_text(page)?, gap);
    if table.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(vec![table])
    }
}
