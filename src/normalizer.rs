use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Fixed output column order for display and Excel export.
pub const COLUMNS: [&str; 15] = [
    "Name",
    "Month",
    "Year",
    "CommodityName",
    "ProductName",
    "LocationName",
    "Typ",
    "Classificat",
    "Value",
    "Unit",
    "HSCode",
    "Source",
    "HSCodeReference",
    "Country",
    "Pelabuhan",
];

pub const COMMODITY_NAME: &str = "Mineral";
pub const LOCATION_NAME: &str = "Indonesia";
pub const CLASSIFICATION: &str = "-";
pub const SOURCE_LABEL: &str = "BPS";
pub const HS_CODE_REFERENCE: &str = "HS Code Master 2022-Now";

/// Trade direction behind the API's `sumber` selector (1=Export, 2=Import).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    Export,
    Import,
}

impl TradeDirection {
    /// Value of the `sumber` query parameter.
    pub fn selector(&self) -> &'static str {
        match self {
            TradeDirection::Export => "1",
            TradeDirection::Import => "2",
        }
    }

    /// Label used in the `Typ` output column.
    pub fn label(&self) -> &'static str {
        match self {
            TradeDirection::Export => "Export",
            TradeDirection::Import => "Import",
        }
    }
}

/// One raw row from the BPS dataexim API, per commodity/month/country/port.
///
/// `kodehs` and `bulan` carry bracketed numeric prefixes
/// (e.g. `"[26011190] Iron ore"`, `"[03] Maret"`) that are extracted
/// during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    pub kodehs: String,
    pub bulan: String,
    #[serde(deserialize_with = "year_from_number_or_string")]
    pub tahun: Option<i32>,
    pub ctr: String,
    pub pod: String,
    pub value: f64,
    pub netweight: f64,
}

/// The API is inconsistent about `tahun`: sometimes a JSON number,
/// sometimes a numeric string.
fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().map(|y| y as i32),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// One normalized output row. Serde field order matches [`COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Month")]
    pub month: Option<u32>,
    #[serde(rename = "Year")]
    pub year: Option<i32>,
    #[serde(rename = "CommodityName")]
    pub commodity_name: String,
    #[serde(rename = "ProductName")]
    pub product_name: Option<String>,
    #[serde(rename = "LocationName")]
    pub location_name: String,
    #[serde(rename = "Typ")]
    pub typ: String,
    #[serde(rename = "Classificat")]
    pub classificat: String,
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "HSCode")]
    pub hs_code: Option<String>,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "HSCodeReference")]
    pub hs_code_reference: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Pelabuhan")]
    pub pelabuhan: String,
}

/// Extract the bracketed HS code and trailing product name from a `kodehs`
/// field like `"[26011190] Iron ore"`.
///
/// Unmatched input yields `(None, None)` rather than an error; malformed
/// rows flow through with empty cells.
pub fn extract_hs_code_and_name(kodehs: &str) -> (Option<String>, Option<String>) {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\[(\d+)\]\s*(.*)$").unwrap());

    match re.captures(kodehs.trim()) {
        Some(caps) => {
            let code = caps[1].to_string();
            let name = caps[2].trim().to_string();
            (Some(code), Some(name))
        }
        None => (None, None),
    }
}

/// Extract the bracketed month number from a `bulan` field like `"[03] Maret"`.
///
/// Returns `None` when the prefix is absent, same permissive treatment as
/// [`extract_hs_code_and_name`].
pub fn extract_month(bulan: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\[(\d+)\]").unwrap());

    re.captures(bulan.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// Expand one raw record into its Amount (USD) and Netweight (KG) rows.
fn expand_record(record: &TradeRecord, direction: TradeDirection) -> [NormalizedRow; 2] {
    let (hs_code, product_name) = extract_hs_code_and_name(&record.kodehs);
    let month = extract_month(&record.bulan);

    if hs_code.is_none() {
        debug!("kodehs '{}' did not match bracketed pattern", record.kodehs);
    }

    let base = NormalizedRow {
        name: String::new(),
        month,
        year: record.tahun,
        commodity_name: COMMODITY_NAME.to_string(),
        product_name,
        location_name: LOCATION_NAME.to_string(),
        typ: direction.label().to_string(),
        classificat: CLASSIFICATION.to_string(),
        value: 0.0,
        unit: String::new(),
        hs_code,
        source: SOURCE_LABEL.to_string(),
        hs_code_reference: HS_CODE_REFERENCE.to_string(),
        country: record.ctr.clone(),
        pelabuhan: record.pod.clone(),
    };

    let amount = NormalizedRow {
        name: "Amount".to_string(),
        value: record.value,
        unit: "USD".to_string(),
        ..base.clone()
    };
    let netweight = NormalizedRow {
        name: "Netweight".to_string(),
        value: record.netweight,
        unit: "KG".to_string(),
        ..base
    };

    [amount, netweight]
}

/// Normalize raw API records into the fixed output schema.
///
/// Each input record fans out to exactly two adjacent rows, Amount first,
/// input order preserved. Pure and deterministic; malformed `kodehs`/`bulan`
/// fields surface as empty cells, never failures.
pub fn normalize_records(records: &[TradeRecord], direction: TradeDirection) -> Vec<NormalizedRow> {
    let mut rows = Vec::with_capacity(records.len() * 2);
    for record in records {
        rows.extend(expand_record(record, direction));
    }
    rows
}
