//! Canonical headers of the Coupang ad bulk report (광고일괄보고서).
//! Lookups always run against trimmed header names.

pub const IMPRESSIONS: &str = "노출수";
pub const CLICKS: &str = "클릭수";
pub const SPEND: &str = "광고비";
pub const PLACEMENT: &str = "광고 노출 지면";
pub const PRODUCT: &str = "광고집행 상품명";
pub const KEYWORD: &str = "키워드";

/// "Units sold" headers in decreasing specificity; the first one physically
/// present in the file wins.
pub const QUANTITY_CANDIDATES: &[&str] = &[
    "총 판매수량(14일)",
    "총 판매수량(1일)",
    "총 판매수량",
    "전환 판매수량",
    "판매수량",
];
