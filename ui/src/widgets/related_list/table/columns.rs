//! Column sizing per column kind.

use dealgrid_business::{ColumnDescriptor, ColumnKind};
use egui_extras::Column;

pub const ROW_HEIGHT: f32 = 26.0;
pub const HEADER_HEIGHT: f32 = 28.0;

const VALUE_WIDTH: f32 = 110.0;
const PICKLIST_WIDTH: f32 = 150.0;

/// Maps the column descriptors onto `egui_extras` width constraints:
/// fixed widths for the value and picklist kinds, remainder for text.
#[inline]
pub fn table_columns(descriptors: &[ColumnDescriptor]) -> Vec<Column> {
    descriptors
        .iter()
        .map(|descriptor| match descriptor.kind {
            ColumnKind::Currency | ColumnKind::Date => Column::exact(VALUE_WIDTH),
            ColumnKind::Picklist => Column::exact(PICKLIST_WIDTH),
            ColumnKind::Text => Column::remainder().at_least(120.0),
        })
        .collect()
}

#[cfg(test)]
mod table_columns_tests {
    use dealgrid_business::build_columns;

    use super::table_columns;

    #[test]
    fn one_constraint_per_descriptor() {
        let descriptors = build_columns("Name,StageName,Amount,CloseDate");
        assert_eq!(table_columns(&descriptors).len(), descriptors.len());
    }
}
