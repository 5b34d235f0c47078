use std::collections::HashMap;

use crate::economics::UnitEconomics;
use crate::report::normalize::{NormalizedReport, NormalizedRow};

/// Label used for the synthetic grand-total row.
pub const TOTAL_KEY: &str = "전체";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Placement,
    Product,
    Keyword,
}

impl Dimension {
    fn key<'a>(&self, row: &'a NormalizedRow) -> Option<&'a str> {
        match self {
            Dimension::Placement => Some(row.placement.as_str()),
            Dimension::Product => row.product.as_deref(),
            Dimension::Keyword => row.keyword.as_deref(),
        }
    }
}

/// One row per distinct dimension value: the four raw sums plus the derived
/// fields, each computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub key: String,
    pub impressions: f64,
    pub clicks: f64,
    pub spend: f64,
    pub quantity: f64,
    pub revenue: f64,
    pub roas: f64,
    pub ctr: f64,
    pub cvr: f64,
    pub cpc: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSummary {
    /// Groups in first-appearance order of the dimension value.
    pub groups: Vec<GroupSummary>,
    /// Raw columns are summed across groups first, then the derived formulas
    /// are reapplied to the sums. Ratios do not distribute over sums, so this
    /// is not the sum (or mean) of the per-group ratios.
    pub total: GroupSummary,
    /// Groups with sales, best first.
    pub top_performers: Vec<GroupSummary>,
    /// Groups that cost money without a single sale, most expensive first.
    pub spend_sinks: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportAnalysis {
    pub placement: DimensionSummary,
    pub product: Option<DimensionSummary>,
    pub keyword: Option<DimensionSummary>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Sums {
    impressions: f64,
    clicks: f64,
    spend: f64,
    quantity: f64,
}

impl Sums {
    fn add(&mut self, row: &NormalizedRow) {
        self.impressions += row.impressions;
        self.clicks += row.clicks;
        self.spend += row.spend;
        self.quantity += row.quantity;
    }

    fn merge(&mut self, other: &Sums) {
        self.impressions += other.impressions;
        self.clicks += other.clicks;
        self.spend += other.spend;
        self.quantity += other.quantity;
    }

    fn into_summary(self, key: String, econ: &UnitEconomics) -> GroupSummary {
        let revenue = self.quantity * econ.unit_price;
        let cpc = if self.clicks == 0.0 {
            0.0
        } else {
            // Integer truncation, matching how sellers quote per-click cost.
            (self.spend / self.clicks).floor()
        };
        GroupSummary {
            key,
            impressions: self.impressions,
            clicks: self.clicks,
            spend: self.spend,
            quantity: self.quantity,
            revenue,
            roas: ratio(revenue, self.spend),
            ctr: ratio(self.clicks, self.impressions),
            cvr: ratio(self.quantity, self.clicks),
            cpc,
            net_profit: self.quantity * econ.net_unit_margin() - self.spend,
        }
    }
}

/// Division where an empty denominator means "no signal", never an error.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Roll the normalized rows up along every dimension the file carries.
/// Placement is always present (the normalizer guarantees the column);
/// product and keyword are computed only when their source column exists.
pub fn analyze(report: &NormalizedReport, econ: &UnitEconomics) -> ReportAnalysis {
    ReportAnalysis {
        placement: summarize(report, econ, Dimension::Placement),
        product: report
            .has_product
            .then(|| summarize(report, econ, Dimension::Product)),
        keyword: report
            .has_keyword
            .then(|| summarize(report, econ, Dimension::Keyword)),
    }
}

/// Single-pass rollup for one dimension. Sorts are stable, so equal keys keep
/// the source table's first-appearance order.
pub fn summarize(
    report: &NormalizedReport,
    econ: &UnitEconomics,
    dimension: Dimension,
) -> DimensionSummary {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, Sums> = HashMap::new();
    for row in &report.rows {
        let Some(key) = dimension.key(row) else {
            continue;
        };
        if !sums.contains_key(key) {
            order.push(key.to_string());
        }
        sums.entry(key.to_string()).or_default().add(row);
    }

    let mut grand = Sums::default();
    let groups: Vec<GroupSummary> = order
        .into_iter()
        .map(|key| {
            let group = sums[&key];
            grand.merge(&group);
            group.into_summary(key, econ)
        })
        .collect();
    let total = grand.into_summary(TOTAL_KEY.to_string(), econ);

    let mut top_performers: Vec<GroupSummary> = groups
        .iter()
        .filter(|g| g.quantity > 0.0)
        .cloned()
        .collect();
    match dimension {
        // Keyword triage ranks by how much budget a converting term absorbs.
        Dimension::Keyword => top_performers.sort_by(|a, b| b.spend.total_cmp(&a.spend)),
        _ => top_performers.sort_by(|a, b| b.quantity.total_cmp(&a.quantity)),
    }

    let mut spend_sinks: Vec<GroupSummary> = groups
        .iter()
        .filter(|g| g.quantity == 0.0 && g.spend > 0.0)
        .cloned()
        .collect();
    spend_sinks.sort_by(|a, b| b.spend.total_cmp(&a.spend));

    DimensionSummary {
        groups,
        total,
        top_performers,
        spend_sinks,
    }
}
