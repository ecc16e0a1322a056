//! Test helpers for the hires workspace
//!
//! Temporary data files in the formats the spectrum loaders read.

use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` verbatim to a temporary file that lives as long as the handle.
pub fn data_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temporary data file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary data file");
    file.flush().expect("Failed to flush temporary data file");
    file
}

/// Write a two-column whitespace table, one `x y` pair per line.
pub fn two_column_file(rows: &[(f64, f64)]) -> NamedTempFile {
    let body: String = rows.iter().map(|(x, y)| format!("{x:e} {y:e}\n")).collect();
    data_file(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_file_round_trips_contents() {
        let file = data_file("# header\n1 2\n");
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "# header\n1 2\n");
    }

    #[test]
    fn test_two_column_file_contents() {
        let file = two_column_file(&[(4000.0, 1.5e-22), (4001.0, 2.0e-22)]);
        let text = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "4e3 1.5e-22");
    }
}
