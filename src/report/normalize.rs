use thiserror::Error;
use tracing::debug;

use crate::report::{columns, load::RawTable};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("required column {0:?} is missing")]
    MissingColumn(&'static str),
    #[error("no quantity column found (tried {0:?})")]
    NoQuantityColumn(&'static [&'static str]),
}

/// One report row reduced to the fields the rollups need. Grouping keys stay
/// text; the designated numeric columns are already coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub placement: String,
    pub product: Option<String>,
    pub keyword: Option<String>,
    pub impressions: f64,
    pub clicks: f64,
    pub spend: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone)]
pub struct NormalizedReport {
    pub rows: Vec<NormalizedRow>,
    /// Which of the candidate "units sold" headers the file actually carried.
    pub quantity_column: String,
    pub has_product: bool,
    pub has_keyword: bool,
}

/// Resolve the schema variant and coerce the numeric columns. The placement
/// column and one quantity candidate are mandatory; the product and keyword
/// dimensions are optional and their absence only disables those rollups.
pub fn normalize(raw: &RawTable) -> Result<NormalizedReport, SchemaError> {
    let headers: Vec<String> = raw.headers.iter().map(|h| h.trim().to_string()).collect();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let placement_ix = find(columns::PLACEMENT)
        .ok_or(SchemaError::MissingColumn(columns::PLACEMENT))?;
    let (quantity_column, quantity_ix) = columns::QUANTITY_CANDIDATES
        .iter()
        .find_map(|name| find(name).map(|ix| (*name, ix)))
        .ok_or(SchemaError::NoQuantityColumn(columns::QUANTITY_CANDIDATES))?;

    let impressions_ix = find(columns::IMPRESSIONS);
    let clicks_ix = find(columns::CLICKS);
    let spend_ix = find(columns::SPEND);
    let product_ix = find(columns::PRODUCT);
    let keyword_ix = find(columns::KEYWORD);

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            let text = |ix: usize| row.get(ix).map(|s| s.trim()).unwrap_or("");
            let number = |ix: Option<usize>| parse_number(ix.map(text).unwrap_or(""));
            NormalizedRow {
                placement: text(placement_ix).to_string(),
                product: product_ix.map(|ix| text(ix).to_string()),
                keyword: keyword_ix.map(|ix| text(ix).to_string()),
                impressions: number(impressions_ix),
                clicks: number(clicks_ix),
                spend: number(spend_ix),
                quantity: number(Some(quantity_ix)),
            }
        })
        .collect();

    debug!(quantity_column, rows = raw.rows.len(), "report normalized");
    Ok(NormalizedReport {
        rows,
        quantity_column: quantity_column.to_string(),
        has_product: product_ix.is_some(),
        has_keyword: keyword_ix.is_some(),
    })
}

/// Numeric coercion: strip "," thousands separators, treat a lone "-"
/// placeholder as zero, and degrade anything unparseable to zero. No row is
/// ever dropped over a malformed cell.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return 0.0;
    }
    cleaned.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_number("1,234"), 1234.0);
        assert_eq!(parse_number("12,345,678"), 12_345_678.0);
    }

    #[test]
    fn dash_placeholder_is_zero() {
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number(" - "), 0.0);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_number("n/a"), 0.0);
        assert_eq!(parse_number(""), 0.0);
    }

    #[test]
    fn quantity_candidates_resolve_by_priority() {
        let raw = table(
            &["광고 노출 지면", "판매수량", "총 판매수량"],
            &[&["검색", "1", "2"]],
        );
        let report = normalize(&raw).unwrap();
        assert_eq!(report.quantity_column, "총 판매수량");
        assert_eq!(report.rows[0].quantity, 2.0);
    }

    #[test]
    fn headers_are_trimmed_before_lookup() {
        let raw = table(
            &[" 광고 노출 지면 ", "판매수량 ", " 광고비"],
            &[&["검색", "3", "9,000"]],
        );
        let report = normalize(&raw).unwrap();
        assert_eq!(report.rows[0].placement, "검색");
        assert_eq!(report.rows[0].quantity, 3.0);
        assert_eq!(report.rows[0].spend, 9_000.0);
    }

    #[test]
    fn missing_placement_is_a_schema_error() {
        let raw = table(&["판매수량"], &[&["1"]]);
        assert!(matches!(
            normalize(&raw),
            Err(SchemaError::MissingColumn(_))
        ));
    }

    #[test]
    fn missing_quantity_is_a_schema_error() {
        let raw = table(&["광고 노출 지면", "노출수"], &[&["검색", "100"]]);
        assert!(matches!(
            normalize(&raw),
            Err(SchemaError::NoQuantityColumn(_))
        ));
    }

    #[test]
    fn absent_numeric_columns_coerce_to_zero() {
        let raw = table(&["광고 노출 지면", "판매수량"], &[&["검색", "4"]]);
        let report = normalize(&raw).unwrap();
        let row = &report.rows[0];
        assert_eq!(row.impressions, 0.0);
        assert_eq!(row.clicks, 0.0);
        assert_eq!(row.spend, 0.0);
        assert!(!report.has_keyword);
        assert!(!report.has_product);
    }

    #[test]
    fn short_rows_do_not_panic() {
        let raw = table(
            &["광고 노출 지면", "노출수", "판매수량"],
            &[&["검색"]],
        );
        let report = normalize(&raw).unwrap();
        assert_eq!(report.rows[0].quantity, 0.0);
    }
}
