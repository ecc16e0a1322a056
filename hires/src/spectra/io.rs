//! Readers for the flat-file spectra used by the feasibility calculations.
//!
//! Two formats are supported:
//!
//! - **Cross-section line lists**: exactly two whitespace-separated columns
//!   (wavenumber in cm⁻¹, cross-section). An empty line ends the table early,
//!   matching how the line-list exports pad their trailers.
//! - **Column tables** such as the Maunakea ATRAN transmission files: any number
//!   of numeric columns, `#` comments, blank lines ignored. The first two columns
//!   are kept.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Spectrum;

/// Errors raised while reading spectra from disk
#[derive(Debug, Error)]
pub enum SpectrumIoError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: expected two columns, got '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("Line {line}: '{token}' is not a number")]
    ParseFloat { line: usize, token: String },

    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("No data rows found")]
    Empty,
}

/// Options for [`open_cross_section`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossSectionOptions {
    /// Number of header lines to drop before parsing
    pub skip_lines: Option<usize>,
    /// Wavenumber window `(start, end)`; see [`Spectrum::slice_half_open`]
    pub wn_range: Option<(f64, f64)>,
}

fn parse_token(token: &str, line: usize) -> Result<f64, SpectrumIoError> {
    token.parse::<f64>().map_err(|_| SpectrumIoError::ParseFloat {
        line,
        token: token.to_string(),
    })
}

fn read_error(path: &Path, source: std::io::Error) -> SpectrumIoError {
    SpectrumIoError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Parse a cross-section table from any buffered reader.
///
/// Line numbers in errors are 1-based and count skipped header lines.
pub fn parse_cross_section<R: BufRead>(
    reader: R,
    options: CrossSectionOptions,
) -> Result<Spectrum, SpectrumIoError> {
    let skip = options.skip_lines.unwrap_or(0);
    if skip > 0 {
        log::debug!("Skipping {skip} header lines");
    }

    let mut wave_numbers = Vec::new();
    let mut cross_sections = Vec::new();

    for (idx, line) in reader.lines().enumerate().skip(skip) {
        let line_no = idx + 1;
        let line = line.map_err(|source| read_error(Path::new("<reader>"), source))?;
        // `lines()` strips "\n" but leaves the "\r" of CRLF files
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.is_empty() {
            log::warn!(
                "Cross section read terminated early due to empty line at line {line_no}"
            );
            break;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [wave, cross] = tokens.as_slice() else {
            return Err(SpectrumIoError::MalformedLine {
                line: line_no,
                content: line.to_string(),
            });
        };

        wave_numbers.push(parse_token(wave, line_no)?);
        cross_sections.push(parse_token(cross, line_no)?);
    }

    log::debug!("Read {} cross-section samples", wave_numbers.len());
    let spectrum = Spectrum::new(wave_numbers, cross_sections);

    Ok(match options.wn_range {
        Some((start, end)) => spectrum.slice_half_open(start, end),
        None => spectrum,
    })
}

/// Load an absorption cross-section table.
///
/// # Examples
///
/// ```rust,no_run
/// use hires::spectra::{open_cross_section, CrossSectionOptions};
///
/// let water = open_cross_section(
///     "line_lists/H2O_30mbar_1500K.txt",
///     CrossSectionOptions {
///         skip_lines: None,
///         wn_range: Some((4000.0, 6802.7)),
///     },
/// )?;
/// println!("{} samples", water.len());
/// # Ok::<(), hires::spectra::io::SpectrumIoError>(())
/// ```
pub fn open_cross_section<P: AsRef<Path>>(
    path: P,
    options: CrossSectionOptions,
) -> Result<Spectrum, SpectrumIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| read_error(path, source))?;
    log::info!("Reading cross sections from {}", path.display());
    parse_cross_section(BufReader::new(file), options).map_err(|e| match e {
        SpectrumIoError::Io { source, .. } => read_error(path, source),
        other => other,
    })
}

/// Parse a numeric column table from any buffered reader, keeping columns 0 and 1.
pub fn parse_columns<R: BufRead>(reader: R) -> Result<Spectrum, SpectrumIoError> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| read_error(Path::new("<reader>"), source))?;
        let data = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };

        let tokens: Vec<&str> = data.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match width {
            None if tokens.len() < 2 => {
                return Err(SpectrumIoError::ColumnMismatch {
                    line: line_no,
                    expected: 2,
                    found: tokens.len(),
                })
            }
            None => width = Some(tokens.len()),
            Some(expected) if expected != tokens.len() => {
                return Err(SpectrumIoError::ColumnMismatch {
                    line: line_no,
                    expected,
                    found: tokens.len(),
                })
            }
            Some(_) => {}
        }

        let row = tokens
            .iter()
            .map(|t| parse_token(t, line_no))
            .collect::<Result<Vec<f64>, _>>()?;
        x.push(row[0]);
        y.push(row[1]);
    }

    if x.is_empty() {
        return Err(SpectrumIoError::Empty);
    }

    Ok(Spectrum::new(x, y))
}

/// Load a whitespace-delimited numeric table such as `mktrans_zm_16_15.dat`.
pub fn load_columns<P: AsRef<Path>>(path: P) -> Result<Spectrum, SpectrumIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| read_error(path, source))?;
    log::info!("Reading column table {}", path.display());
    let spectrum = parse_columns(BufReader::new(file)).map_err(|e| match e {
        SpectrumIoError::Io { source, .. } => read_error(path, source),
        other => other,
    })?;
    log::debug!("Read {} rows from {}", spectrum.len(), path.display());
    Ok(spectrum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_helpers::{data_file, two_column_file};

    fn parse(text: &str, options: CrossSectionOptions) -> Result<Spectrum, SpectrumIoError> {
        parse_cross_section(Cursor::new(text), options)
    }

    #[test]
    fn test_parse_two_columns() {
        let spectrum = parse("4000.0 1.0e-22\n4000.5   2.5e-22\n", Default::default()).unwrap();
        assert_eq!(spectrum.x.to_vec(), vec![4000.0, 4000.5]);
        assert_eq!(spectrum.y.to_vec(), vec![1.0e-22, 2.5e-22]);
    }

    #[test]
    fn test_skip_lines() {
        let text = "header one\nheader two\n1 2\n3 4\n";
        let options = CrossSectionOptions {
            skip_lines: Some(2),
            ..Default::default()
        };
        let spectrum = parse(text, options).unwrap();
        assert_eq!(spectrum.x.to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_empty_line_terminates_read() {
        let spectrum = parse("1 2\n3 4\n\n5 6\n", Default::default()).unwrap();
        assert_eq!(spectrum.x.to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_crlf_lines() {
        let spectrum = parse("1 2\r\n3 4\r\n\r\n5 6\r\n", Default::default()).unwrap();
        assert_eq!(spectrum.y.to_vec(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_malformed_lines_report_line_numbers() {
        let err = parse("1 2\n3 4 5\n", Default::default()).unwrap_err();
        assert!(matches!(err, SpectrumIoError::MalformedLine { line: 2, .. }));

        // Whitespace-only lines are not terminators
        let err = parse("1 2\n   \n", Default::default()).unwrap_err();
        assert!(matches!(err, SpectrumIoError::MalformedLine { line: 2, .. }));

        let options = CrossSectionOptions {
            skip_lines: Some(1),
            ..Default::default()
        };
        let err = parse("header\n1 x\n", options).unwrap_err();
        match err {
            SpectrumIoError::ParseFloat { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_wn_range_slices_half_open() {
        let text = "10 0\n11 1\n12 2\n13 3\n14 4\n";
        let options = CrossSectionOptions {
            skip_lines: None,
            wn_range: Some((10.9, 13.2)),
        };
        let spectrum = parse(text, options).unwrap();
        assert_eq!(spectrum.x.to_vec(), vec![11.0, 12.0]);
    }

    #[test]
    fn test_open_cross_section_from_disk() {
        let file = two_column_file(&[(4000.0, 1.0), (4001.0, 2.0), (4002.0, 3.0)]);
        let spectrum = open_cross_section(file.path(), Default::default()).unwrap();
        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum.y[2], 3.0);
    }

    #[test]
    fn test_missing_file() {
        let err = open_cross_section("/nonexistent/H2O.txt", Default::default()).unwrap_err();
        match err {
            SpectrumIoError::Io { path, .. } => assert_eq!(path, Path::new("/nonexistent/H2O.txt")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_load_columns_skips_comments() {
        let file = data_file(
            "# wavelength(um) transmission\n\n0.90 0.10 7\n0.91 0.95 7 # trailing\n\n0.92 0.99 7\n",
        );
        let spectrum = load_columns(file.path()).unwrap();
        assert_eq!(spectrum.x.to_vec(), vec![0.90, 0.91, 0.92]);
        assert_eq!(spectrum.y.to_vec(), vec![0.10, 0.95, 0.99]);
    }

    #[test]
    fn test_load_columns_errors() {
        let err = parse_columns(Cursor::new("1 2 3\n4 5\n")).unwrap_err();
        assert!(matches!(
            err,
            SpectrumIoError::ColumnMismatch {
                line: 2,
                expected: 3,
                found: 2
            }
        ));

        let err = parse_columns(Cursor::new("1\n")).unwrap_err();
        assert!(matches!(err, SpectrumIoError::ColumnMismatch { found: 1, .. }));

        let err = parse_columns(Cursor::new("# only a comment\n")).unwrap_err();
        assert!(matches!(err, SpectrumIoError::Empty));
    }
}
