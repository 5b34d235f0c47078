use anyhow::{ensure, Result};
use serde::Deserialize;

/// ROAS advice buckets. Upstream revisions of the dashboard disagree on the
/// boundary set (200/250/300% vs 200/300%), so the boundaries are injected
/// configuration rather than constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Ascending bucket boundaries, in percent of spend.
    pub roas_boundaries: Vec<f64>,
    /// One label per bucket: `labels[i]` covers ROAS below `roas_boundaries[i]`,
    /// the final label covers everything at or above the last boundary.
    pub labels: Vec<String>,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            roas_boundaries: vec![200.0, 300.0],
            labels: vec![
                "광고비 축소 검토".to_string(),
                "유지하며 관찰".to_string(),
                "증액 테스트 권장".to_string(),
            ],
        }
    }
}

impl AdviceConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.labels.len() == self.roas_boundaries.len() + 1,
            "advice config needs exactly one more label than boundary ({} labels, {} boundaries)",
            self.labels.len(),
            self.roas_boundaries.len()
        );
        ensure!(
            self.roas_boundaries.windows(2).all(|w| w[0] < w[1]),
            "advice boundaries must be strictly ascending"
        );
        Ok(())
    }

    /// Label for a ROAS given as a ratio (revenue / spend), e.g. 3.33.
    pub fn bucket(&self, roas: f64) -> &str {
        let percent = roas * 100.0;
        let ix = self
            .roas_boundaries
            .iter()
            .position(|&b| percent < b)
            .unwrap_or(self.roas_boundaries.len());
        &self.labels[ix]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buckets_cover_the_range() {
        let cfg = AdviceConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.bucket(0.0), "광고비 축소 검토");
        assert_eq!(cfg.bucket(1.99), "광고비 축소 검토");
        assert_eq!(cfg.bucket(2.0), "유지하며 관찰");
        assert_eq!(cfg.bucket(2.99), "유지하며 관찰");
        assert_eq!(cfg.bucket(3.0), "증액 테스트 권장");
        assert_eq!(cfg.bucket(10.0), "증액 테스트 권장");
    }

    #[test]
    fn custom_boundary_set_from_yaml() {
        let cfg: AdviceConfig = serde_yaml::from_str(
            "roas_boundaries: [200.0, 250.0, 300.0]\nlabels: [cut, hold, watch, scale]",
        )
        .unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.bucket(2.6), "watch");
    }

    #[test]
    fn mismatched_labels_rejected() {
        let cfg = AdviceConfig {
            roas_boundaries: vec![200.0],
            labels: vec!["only-one".to_string()],
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unsorted_boundaries_rejected() {
        let cfg = AdviceConfig {
            roas_boundaries: vec![300.0, 200.0],
            labels: vec!["a".into(), "b".into(), "c".into()],
        };
        assert!(cfg.validate().is_err());
    }
}
