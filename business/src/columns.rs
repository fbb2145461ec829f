//! Column descriptors derived from the field-list configuration string.
//!
//! A fixed mapping drives type and formatting per known field name; every
//! other name becomes a plain text column. There are no error conditions:
//! the empty string yields a single empty-label column, as it always has.

use chrono::NaiveDate;
use ustr::Ustr;

use crate::records::{format_currency, format_date};

/// Placeholder a stage picklist shows while the stored value is empty.
pub const STAGE_PLACEHOLDER: &str = "Choose Stage";

/// Value kind of a column; decides the cell's formatting, editor and
/// commit-time validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Currency,
    Date,
    Picklist,
}

impl ColumnKind {
    /// Whether entered text is committable for this kind. Empty input is
    /// always accepted — it clears the value.
    pub fn accepts(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return true;
        }
        match self {
            Self::Currency => parse_currency(trimmed).is_some(),
            Self::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok(),
            Self::Text | Self::Picklist => true,
        }
    }

    /// Canonical draft string for accepted input, so `"$1,234.50"` and
    /// `"1234.5"` compare equal against the stored value.
    pub fn normalize(&self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        match self {
            Self::Currency => parse_currency(trimmed)
                .map_or_else(|| trimmed.to_owned(), |amount| amount.to_string()),
            Self::Text | Self::Date | Self::Picklist => trimmed.to_owned(),
        }
    }

    /// Presentation of a stored value in a read-only cell. Values that do
    /// not parse for the kind fall back to the raw text.
    pub fn display(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        match self {
            Self::Currency => {
                parse_currency(trimmed).map_or_else(|| raw.to_owned(), format_currency)
            }
            Self::Date => format_date(trimmed).unwrap_or_else(|| raw.to_owned()),
            Self::Text | Self::Picklist => raw.to_owned(),
        }
    }
}

fn parse_currency(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|ch| *ch != '$' && *ch != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|amount| amount.is_finite())
}

/// One display column of the related-list table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub label: String,
    pub field_name: Ustr,
    pub kind: ColumnKind,
    pub editable: bool,
    /// Fixed placeholder for the picklist kind; its options live per row and
    /// are resolved at render time, not here.
    pub placeholder: Option<&'static str>,
}

/// Split a comma-separated field list into trimmed entries. The empty
/// string splits into one empty entry, not zero.
pub fn parse_field_list(field_list: &str) -> Vec<String> {
    field_list.split(',').map(|entry| entry.trim().to_owned()).collect()
}

/// Insert a space before each internal ASCII capital: `"CloseDate"` →
/// `"Close Date"`, `"Name"` → `"Name"`.
pub fn format_label(field_name: &str) -> String {
    let mut label = String::with_capacity(field_name.len() + 2);
    for (index, ch) in field_name.char_indices() {
        if index > 0 && ch.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    label
}

/// One descriptor per field-list entry, in input order. All columns are
/// editable.
pub fn build_columns(field_list: &str) -> Vec<ColumnDescriptor> {
    parse_field_list(field_list)
        .into_iter()
        .map(|field_name| {
            let kind = match field_name.as_str() {
                "Amount" => ColumnKind::Currency,
                "CloseDate" => ColumnKind::Date,
                "StageName" => ColumnKind::Picklist,
                _ => ColumnKind::Text,
            };
            ColumnDescriptor {
                label: format_label(&field_name),
                field_name: Ustr::from(&field_name),
                kind,
                editable: true,
                placeholder: (kind == ColumnKind::Picklist).then_some(STAGE_PLACEHOLDER),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_column_per_trimmed_entry() {
        assert_eq!(build_columns("Name,StageName,Amount,CloseDate").len(), 4);
        assert_eq!(build_columns(" Name , Amount ").len(), 2);
        assert_eq!(build_columns("Name").len(), 1);
        // The empty string splits into a single empty entry.
        let columns = build_columns("");
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].label, "");
        assert_eq!(columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn known_fields_map_to_their_kinds() {
        let columns = build_columns("Name,StageName,Amount,CloseDate,Owner");
        let kinds: Vec<ColumnKind> = columns.iter().map(|column| column.kind).collect();
        assert_eq!(
            kinds,
            [
                ColumnKind::Text,
                ColumnKind::Picklist,
                ColumnKind::Currency,
                ColumnKind::Date,
                ColumnKind::Text,
            ]
        );
        assert!(columns.iter().all(|column| column.editable), "every column is editable");
        assert_eq!(columns[1].placeholder, Some(STAGE_PLACEHOLDER));
        assert!(columns[0].placeholder.is_none(), "only picklists carry a placeholder");
    }

    #[test]
    fn label_spacing() {
        assert_eq!(format_label("Name"), "Name", "no internal capitals, no change");
        assert_eq!(format_label("CloseDate"), "Close Date");
        assert_eq!(format_label("StageName"), "Stage Name");
        assert_eq!(format_label("NextStepDueDate"), "Next Step Due Date");
        // A name that already contains a space keeps it and still gets the
        // inserted one. Longstanding behavior, kept as-is.
        assert_eq!(format_label("Close Date"), "Close  Date");
    }

    #[test]
    fn currency_validation_and_normalization() {
        let kind = ColumnKind::Currency;
        assert!(kind.accepts("1234.5"));
        assert!(kind.accepts("$1,234.50"));
        assert!(kind.accepts("-12"));
        assert!(kind.accepts(""), "clearing the amount is allowed");
        assert!(!kind.accepts("twelve"));

        assert_eq!(kind.normalize("$1,234.50"), "1234.5");
        assert_eq!(kind.normalize(" 99 "), "99");
    }

    #[test]
    fn date_validation() {
        let kind = ColumnKind::Date;
        assert!(kind.accepts("2026-03-15"));
        assert!(kind.accepts(" 2026-03-15 "));
        assert!(kind.accepts(""));
        assert!(!kind.accepts("2026-13-01"), "month 13 must be rejected");
        assert!(!kind.accepts("03/15/2026"), "only ISO dates are committable");
        assert_eq!(kind.normalize(" 2026-03-15 "), "2026-03-15");
    }

    #[test]
    fn display_formats_or_falls_back() {
        assert_eq!(ColumnKind::Currency.display("1234.5"), "$1,234.50");
        assert_eq!(ColumnKind::Currency.display("n/a"), "n/a", "unparseable stays raw");
        assert_eq!(ColumnKind::Date.display("2026-03-15"), "Mar 15, 2026");
        assert_eq!(ColumnKind::Date.display("soon"), "soon", "unparseable stays raw");
        assert_eq!(ColumnKind::Text.display("Server racks"), "Server racks");
        assert_eq!(ColumnKind::Currency.display(""), "");
    }
}
