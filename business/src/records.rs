//! Wire types of the deal service plus display formatting for field values.
//!
//! The record projection is dynamic — which fields come back depends on the
//! configured field list — so records carry their fields as a name→JSON map
//! with service-cased keys (`Name`, `StageName`, …) kept verbatim.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One allowed stage value. All rows of a fetch share a single list of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOption {
    pub label: String,
    pub value: String,
}

/// A record as the service returns it: the identifier plus whatever fields
/// the query projected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl OpportunityRecord {
    pub fn field(&self, field_name: &str) -> Option<&Value> {
        self.fields.get(field_name)
    }

    /// The stored value as the string a cell editor starts from — and the
    /// string a committed draft is compared against.
    pub fn field_text(&self, field_name: &str) -> String {
        match self.fields.get(field_name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// A fetched record with the shared stage options injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityRow {
    pub record: OpportunityRecord,
    pub stage_options: Arc<Vec<StageOption>>,
}

/// Payload of the read call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedListResponse {
    pub opportunities: Vec<OpportunityRecord>,
    pub stage_name_options: Vec<StageOption>,
}

/// One edited row's sparse changes, identifier included under `Id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub fields: BTreeMap<String, Value>,
}

impl RecordPatch {
    pub fn id(&self) -> Option<&str> {
        self.fields.get("Id").and_then(Value::as_str)
    }
}

/// Body of the write call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub opportunities_to_update: Vec<RecordPatch>,
}

/// `1234.5` → `"$1,234.50"`. Negative amounts keep the sign ahead of `$`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

/// `"2026-03-15"` → `"Mar 15, 2026"`. `None` when the input is not an ISO date.
pub fn format_date(iso: &str) -> Option<String> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%b %-d, %Y").to_string())
}
