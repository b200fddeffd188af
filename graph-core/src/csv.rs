use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::table::{DataRow, DataTable};

/// Errors for CSV reading and writing. `Format` fires before any data row
/// is consumed, so a failed load leaves the caller's table untouched.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("cannot open file \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file \"{path}\" incorrectly formatted: {reason}")]
    Format { path: String, reason: String },
}

/// What a successfully read file contains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvContents {
    pub x_label: String,
    pub y_label: String,
    pub rows: Vec<DataRow>,
}

/// Read a two-column CSV file: one `xLabel,yLabel` header line, then one
/// `x,y` line per row. No quoting or escaping. An empty file is an empty
/// table with empty labels.
pub fn read_csv(path: &Path) -> Result<CsvContents, CsvError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CsvError::Open {
        path: path.display().to_string(),
        source,
    })?;
    parse_csv(&raw, path)
}

fn parse_csv(raw: &str, path: &Path) -> Result<CsvContents, CsvError> {
    let mut lines = raw.lines();

    let Some(header) = lines.next() else {
        return Ok(CsvContents::default());
    };
    let labels: Vec<&str> = header.split(',').collect();
    if labels.len() != 2 {
        return Err(CsvError::Format {
            path: path.display().to_string(),
            reason: format!(
                "header must name exactly two columns, found {}",
                labels.len()
            ),
        });
    }

    let mut rows = Vec::new();
    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_data_line(line) {
            Some(row) => rows.push(row),
            // Line numbers are 1-based and the header is line 1.
            None => log::warn!(
                "skipping malformed line {} in {:?}: '{}'",
                line_no + 2,
                path,
                line
            ),
        }
    }

    Ok(CsvContents {
        x_label: labels[0].to_string(),
        y_label: labels[1].to_string(),
        rows,
    })
}

fn parse_data_line(line: &str) -> Option<DataRow> {
    let mut fields = line.split(',');
    let x = fields.next()?.trim().parse::<f64>().ok()?;
    let y = fields.next()?.trim().parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(DataRow::new(x, y))
}

/// Write the table in the same shape, truncating the target file.
pub fn write_csv(path: &Path, table: &DataTable) -> Result<(), CsvError> {
    let open_err = |source| CsvError::Open {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(open_err)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{},{}", table.x_label(), table.y_label()).map_err(open_err)?;
    for row in table.rows() {
        writeln!(writer, "{},{}", row.x, row.y).map_err(open_err)?;
    }
    writer.flush().map_err(open_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn parse(raw: &str) -> Result<CsvContents, CsvError> {
        parse_csv(raw, Path::new("test.csv"))
    }

    #[test]
    fn header_and_rows_are_read_in_order() {
        init();
        let contents = parse("t,v\n0,0\n1,2\n2,1\n").unwrap();
        assert_eq!(contents.x_label, "t");
        assert_eq!(contents.y_label, "v");
        assert_eq!(
            contents.rows,
            vec![
                DataRow::new(0.0, 0.0),
                DataRow::new(1.0, 2.0),
                DataRow::new(2.0, 1.0),
            ]
        );
    }

    #[test]
    fn one_field_header_is_a_format_error() {
        init();
        let err = parse("t\n0,0\n").unwrap_err();
        assert!(matches!(err, CsvError::Format { .. }));
    }

    #[test]
    fn three_field_header_is_a_format_error() {
        init();
        let err = parse("a,b,c\n").unwrap_err();
        assert!(matches!(err, CsvError::Format { .. }));
    }

    #[test]
    fn empty_file_is_an_empty_table() {
        init();
        let contents = parse("").unwrap();
        assert_eq!(contents, CsvContents::default());
    }

    #[test]
    fn malformed_data_lines_are_skipped() {
        init();
        let contents = parse("a,b\n1,2\nnot,numeric\n3\n4,5,6\n7,8\n").unwrap();
        assert_eq!(
            contents.rows,
            vec![DataRow::new(1.0, 2.0), DataRow::new(7.0, 8.0)]
        );
    }

    #[test]
    fn scientific_notation_and_whitespace_are_accepted() {
        init();
        let contents = parse("a,b\n 1.5e-3 , -2.0 \n").unwrap();
        assert_eq!(contents.rows, vec![DataRow::new(0.0015, -2.0)]);
    }

    #[test]
    fn round_trip_preserves_header_and_rows() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        let mut table = DataTable::new("", "");
        table.replace(
            "a",
            "b",
            vec![
                DataRow::new(0.25, -1.0),
                DataRow::new(1.0, 2.0),
                DataRow::new(2.5, 0.125),
            ],
        );
        write_csv(&path, &table).unwrap();

        let reread = read_csv(&path).unwrap();
        assert_eq!(reread.x_label, "a");
        assert_eq!(reread.y_label, "b");
        let expected: Vec<DataRow> = table.rows().copied().collect();
        assert_eq!(reread.rows, expected);
    }

    #[test]
    fn unreadable_path_is_an_open_error() {
        init();
        let err = read_csv(Path::new("/nonexistent/graphed/data.csv")).unwrap_err();
        assert!(matches!(err, CsvError::Open { .. }));
    }
}
