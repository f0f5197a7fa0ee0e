//! Sheet row walker: finds the URL column, visits body rows top to bottom and
//! probes every non-empty URL cell.

use crate::probe::{Prober, Transport};
use crate::report::{RowResult, SheetSummary, SkipReason};
use crate::store::SheetData;
use crate::url_model::normalize;

/// Row number of the first body row (the header is row 1).
pub const FIRST_BODY_ROW: usize = 2;

/// 0-based index of the first header cell equal to `name`.
pub fn locate_column(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|h| h == name)
}

/// Non-empty URL cells as `(row number, trimmed text)`.
///
/// Rows too short to reach `col` count as empty.
pub fn url_cells(rows: &[Vec<String>], col: usize) -> impl Iterator<Item = (usize, &str)> {
    rows.iter().enumerate().filter_map(move |(i, row)| {
        let cell = row.get(col).map(|c| c.trim()).unwrap_or("");
        if cell.is_empty() {
            None
        } else {
            Some((i + FIRST_BODY_ROW, cell))
        }
    })
}

pub fn count_urls(rows: &[Vec<String>], col: usize) -> usize {
    url_cells(rows, col).count()
}

/// Why a sheet cannot be walked, if it cannot.
pub fn skip_reason(sheet: &SheetData, url_column: &str) -> Option<SkipReason> {
    if sheet.is_empty() {
        return Some(SkipReason::EmptySheet);
    }
    if locate_column(&sheet.header, url_column).is_none() {
        return Some(SkipReason::MissingUrlColumn);
    }
    None
}

/// Result of walking one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetWalk {
    pub summary: SheetSummary,
    pub rows: Vec<RowResult>,
}

/// Walks `sheet`, probing each URL in the `url_column` column.
///
/// `on_row` runs after every probe with the new result and the sheet's
/// summary so far. Empty sheets and sheets without the column come back with
/// zero counts and a skip reason.
pub fn walk_sheet<T, F>(
    sheet: &SheetData,
    url_column: &str,
    prober: &Prober<T>,
    mut on_row: F,
) -> SheetWalk
where
    T: Transport,
    F: FnMut(&RowResult, &SheetSummary),
{
    let skipped = |reason| SheetWalk {
        summary: SheetSummary::skipped(sheet.name.clone(), reason),
        rows: Vec::new(),
    };
    if sheet.is_empty() {
        return skipped(SkipReason::EmptySheet);
    }
    let Some(col) = locate_column(&sheet.header, url_column) else {
        return skipped(SkipReason::MissingUrlColumn);
    };

    let mut summary = SheetSummary::new(sheet.name.clone());
    let mut rows = Vec::new();

    for (row, cell) in url_cells(&sheet.rows, col) {
        summary.total_urls += 1;

        let url = normalize(cell);
        let Some(outcome) = prober.probe(&url) else {
            continue;
        };
        summary.processed_urls += 1;

        let result = RowResult {
            sheet: sheet.name.clone(),
            row,
            url,
            outcome,
        };
        on_row(&result, &summary);
        rows.push(result);
    }

    tracing::info!(
        sheet = %sheet.name,
        total = summary.total_urls,
        processed = summary.processed_urls,
        "sheet walked"
    );
    SheetWalk { summary, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeError, ProbeOutcome};
    use std::collections::HashMap;

    struct Fixed(HashMap<&'static str, u32>);

    impl Transport for Fixed {
        fn get_status(&self, url: &str) -> Result<u32, ProbeError> {
            self.0
                .get(url)
                .copied()
                .ok_or(ProbeError::Curl(curl::Error::new(7)))
        }
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sheet(header: &[&str], rows: &[&[&str]]) -> SheetData {
        SheetData {
            name: "Links".to_string(),
            header: strings(header),
            rows: rows.iter().map(|r| strings(r)).collect(),
        }
    }

    #[test]
    fn locate_column_first_match() {
        let header = strings(&["Name", "Source", "Source"]);
        assert_eq!(locate_column(&header, "Source"), Some(1));
        assert_eq!(locate_column(&header, "source"), None);
    }

    #[test]
    fn url_cells_skip_blank_and_short_rows() {
        let rows = vec![
            strings(&["a", " http://x.test "]),
            strings(&["b"]),
            strings(&["c", "   "]),
            strings(&["d", "y.test"]),
        ];
        let cells: Vec<(usize, &str)> = url_cells(&rows, 1).collect();
        assert_eq!(cells, vec![(2, "http://x.test"), (5, "y.test")]);
        assert_eq!(count_urls(&rows, 1), 2);
    }

    #[test]
    fn counting_matches_processing() {
        let s = sheet(
            &["Name", "Source"],
            &[&["a", "a.test"], &["b"], &["c", ""], &["d", "//d.test"], &["e", "  "], &["f", "https://f.test"]],
        );
        let prober = Prober::new(Fixed(HashMap::from([("http://a.test", 200)])));
        let walk = walk_sheet(&s, "Source", &prober, |_, _| {});
        assert_eq!(walk.summary.total_urls, 3);
        assert_eq!(walk.summary.processed_urls, 3);
        assert_eq!(walk.rows.len(), 3);
        let rows: Vec<usize> = walk.rows.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![2, 5, 7]);
        assert_eq!(walk.rows[0].outcome, ProbeOutcome::Status(200));
        assert_eq!(walk.rows[1].url, "http://d.test");
        assert_eq!(walk.rows[2].outcome, ProbeOutcome::NotFound);
    }

    #[test]
    fn missing_column_skips_sheet() {
        let s = sheet(&["Name", "Link"], &[&["a", "a.test"]]);
        let prober = Prober::new(Fixed(HashMap::new()));
        let walk = walk_sheet(&s, "Source", &prober, |_, _| panic!("no probes expected"));
        assert_eq!(walk.summary.skipped, Some(SkipReason::MissingUrlColumn));
        assert_eq!(walk.summary.total_urls, 0);
        assert!(walk.rows.is_empty());
    }

    #[test]
    fn empty_sheet_is_skipped() {
        let s = SheetData::empty("Blank");
        let prober = Prober::new(Fixed(HashMap::new()));
        let walk = walk_sheet(&s, "Source", &prober, |_, _| {});
        assert_eq!(walk.summary.skipped, Some(SkipReason::EmptySheet));
        assert_eq!(walk.summary.processed_urls, 0);
    }

    #[test]
    fn callback_sees_running_counts() {
        let s = sheet(&["Source"], &[&["a.test"], &["b.test"]]);
        let prober = Prober::new(Fixed(HashMap::new()));
        let mut seen = Vec::new();
        walk_sheet(&s, "Source", &prober, |r, summary| {
            seen.push((r.row, summary.processed_urls, summary.total_urls));
        });
        assert_eq!(seen, vec![(2, 1, 1), (3, 2, 2)]);
    }

    #[test]
    fn end_to_end_scenario() {
        let s = sheet(
            &["Source"],
            &[&["http://ok.test"], &[""], &["badscheme"], &["https://bad.test"]],
        );
        let prober = Prober::new(Fixed(HashMap::from([
            ("http://ok.test", 200),
            ("http://bad.test/", 404),
        ])));
        let walk = walk_sheet(&s, "Source", &prober, |_, _| {});
        let got: Vec<(usize, String)> = walk
            .rows
            .iter()
            .map(|r| (r.row, r.outcome.cell_value()))
            .collect();
        assert_eq!(
            got,
            vec![
                (2, "200".to_string()),
                (4, "Site Not Found".to_string()),
                (5, "404".to_string()),
            ]
        );
        assert_eq!(walk.rows[1].url, "http://badscheme");
        assert_eq!(walk.summary.total_urls, 3);
        assert_eq!(walk.summary.processed_urls, 3);
    }
}
