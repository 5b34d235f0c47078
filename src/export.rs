use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::report::aggregate::DimensionSummary;

/// Write a related-keyword list as UTF-8 CSV: a "연관 키워드" header row,
/// then one keyword per line.
pub fn write_keyword_csv(path: &Path, keywords: &[String]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["연관 키워드"])?;
    for keyword in keywords {
        writer.write_record([keyword.as_str()])?;
    }
    writer.flush()?;
    info!(path = %path.display(), count = keywords.len(), "keyword list exported");
    Ok(())
}

/// Write one dimension's rollup, group rows first and the grand-total row
/// last. `dimension_label` becomes the key column's header.
pub fn write_summary_csv(
    path: &Path,
    dimension_label: &str,
    summary: &DimensionSummary,
) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        dimension_label,
        "노출수",
        "클릭수",
        "광고비",
        "판매수량",
        "매출",
        "ROAS",
        "CTR",
        "CVR",
        "CPC",
        "순이익",
    ])?;
    for group in summary.groups.iter().chain([&summary.total]) {
        let record = vec![
            group.key.clone(),
            format!("{:.0}", group.impressions),
            format!("{:.0}", group.clicks),
            format!("{:.0}", group.spend),
            format!("{:.0}", group.quantity),
            format!("{:.0}", group.revenue),
            format!("{:.2}", group.roas),
            format!("{:.4}", group.ctr),
            format!("{:.4}", group.cvr),
            format!("{:.0}", group.cpc),
            format!("{:.0}", group.net_profit),
        ];
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!(path = %path.display(), groups = summary.groups.len(), "summary exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::UnitEconomics;
    use crate::report::aggregate::{summarize, Dimension};
    use crate::report::normalize::{NormalizedReport, NormalizedRow};
    use std::fs;

    #[test]
    fn keyword_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.csv");
        let keywords = vec!["우산".to_string(), "우산 양산".to_string()];

        write_keyword_csv(&path, &keywords).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["연관 키워드", "우산", "우산 양산"]);
    }

    #[test]
    fn summary_csv_ends_with_the_total_row() {
        let report = NormalizedReport {
            rows: vec![NormalizedRow {
                placement: "검색".to_string(),
                product: None,
                keyword: None,
                impressions: 1_000.0,
                clicks: 10.0,
                spend: 5_000.0,
                quantity: 2.0,
            }],
            quantity_column: "총 판매수량".to_string(),
            has_product: false,
            has_keyword: false,
        };
        let summary = summarize(&report, &UnitEconomics::default(), Dimension::Placement);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, "광고 노출 지면", &summary).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("광고 노출 지면,노출수"));
        assert!(lines[1].starts_with("검색,1000,10,5000,2"));
        assert!(lines[2].starts_with("전체,"));
    }
}
