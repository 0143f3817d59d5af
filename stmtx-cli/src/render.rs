//! Plain-text rendering of an ingestion result.

use stmtx_core::{AccountInfo, StatementPage};

pub fn print_account_info(info: &AccountInfo) {
    if info.is_empty() {
        return;
    }
    println!("# Account information\n");
    for (label, value) in info.fields() {
        println!("{label}: {value}");
    }
    println!();
}

pub fn print_pages(pages: &[StatementPage]) {
    if pages.is_empty() {
        println!("No tables were extracted from this statement.");
        return;
    }
    for page in pages {
        for line in page_lines(page) {
            println!("{line}");
        }
        println!();
    }
}

/// One page as display lines: a title, the header row, then each row's cells
/// in header order. Cells for headers the row does not carry render empty.
fn page_lines(page: &StatementPage) -> Vec<String> {
    let mut lines = Vec::with_capacity(page.rows.len() + 2);
    lines.push(format!(
        "## Page {} ({} rows)",
        page.page_number,
        page.rows.len()
    ));
    lines.push(page.headers.join(" | "));
    for row in &page.rows {
        let cells: Vec<&str> = page
            .headers
            .iter()
            .map(|header| row.get(header).unwrap_or(""))
            .collect();
        lines.push(cells.join(" | "));
    }
    lines
}
