use std::{fs, path::Path};

use calamine::{open_workbook, Data, Reader, Xlsx};
use thiserror::Error;
use tracing::debug;

/// Raw tabular contents of a report file. Headers are kept exactly as the
/// file claims them; trimming happens during normalization.
#[derive(Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported report format: {0:?}")]
    UnsupportedFormat(String),
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("report is neither valid UTF-8 nor CP949")]
    Encoding,
    #[error("malformed delimited text")]
    Csv(#[from] csv::Error),
    #[error("failed to open workbook")]
    Workbook(#[from] calamine::XlsxError),
    #[error("workbook has no worksheets")]
    EmptyWorkbook,
}

/// Parse a report file into a [`RawTable`]. The extension decides the parser;
/// anything other than `.csv` or `.xlsx` is rejected. Pure parse, no side
/// effects beyond the read.
pub fn load_report(path: &Path) -> Result<RawTable, LoadError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let table = match ext {
        "csv" => load_csv(path)?,
        "xlsx" => load_xlsx(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded report"
    );
    Ok(table)
}

fn load_csv(path: &Path) -> Result<RawTable, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = decode(&bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(RawTable { headers, rows })
}

/// UTF-8 (BOM-aware) first, then the CP949 code page older Windows setups
/// export with.
fn decode(bytes: &[u8]) -> Result<String, LoadError> {
    let body = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(body) {
        return Ok(text.to_string());
    }
    let (text, _, had_errors) = encoding_rs::EUC_KR.decode(bytes);
    if had_errors {
        return Err(LoadError::Encoding);
    }
    debug!("report decoded via CP949 fallback");
    Ok(text.into_owned())
}

fn load_xlsx(path: &Path) -> Result<RawTable, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::EmptyWorkbook)??;

    let mut rows_iter = range.rows();
    let headers = match rows_iter.next() {
        Some(row) => row.iter().map(cell_text).collect(),
        None => Vec::new(),
    };
    let rows = rows_iter
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Ok(RawTable { headers, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_report(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_utf8_csv_with_bom() {
        let mut bytes = b"\xef\xbb\xbf".to_vec();
        bytes.extend_from_slice("노출수,클릭수\n1000,10\n".as_bytes());
        let file = temp_report(".csv", &bytes);

        let table = load_report(file.path()).unwrap();
        assert_eq!(table.headers, vec!["노출수", "클릭수"]);
        assert_eq!(table.rows, vec![vec!["1000", "10"]]);
    }

    #[test]
    fn falls_back_to_cp949() {
        let (encoded, _, had_errors) = encoding_rs::EUC_KR.encode("키워드,광고비\n우산,5000\n");
        assert!(!had_errors);
        let file = temp_report(".csv", &encoded);

        let table = load_report(file.path()).unwrap();
        assert_eq!(table.headers, vec!["키워드", "광고비"]);
        assert_eq!(table.rows[0][0], "우산");
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = temp_report(".pdf", b"whatever");
        match load_report(file.path()) {
            Err(LoadError::UnsupportedFormat(ext)) => assert_eq!(ext, "pdf"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn ragged_rows_survive_parsing() {
        let file = temp_report(".csv", "a,b,c\n1,2\n1,2,3,4\n".as_bytes());
        let table = load_report(file.path()).unwrap();
        assert_eq!(table.rows.len(), 2);
    }
}
