//! A1 notation helpers.

/// Column letters for a 1-based column number: 1 → `A`, 27 → `AA`.
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Sheet name quoted for use in a range (`'It''s'`).
pub fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// Single-cell range such as `'Links'!C5`.
pub fn cell_range(sheet: &str, row: usize, column: usize) -> String {
    format!("{}!{}{}", quote_sheet(sheet), column_letters(column), row)
}

/// Whole first row of a sheet.
pub fn header_range(sheet: &str) -> String {
    format!("{}!1:1", quote_sheet(sheet))
}
