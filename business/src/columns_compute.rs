//! Derived compute that rebuilds the column descriptors when the field
//! list changes.

use std::any::{Any, TypeId};

use dealgrid_states::{Compute, ComputeDeps, Dep, Updater, assign_boxed};

use crate::columns::{ColumnDescriptor, build_columns};
use crate::query::RelatedListQuery;

/// Cached column descriptors for the related-list table.
///
/// Declared against [`RelatedListQuery`], so the runtime re-runs it exactly
/// when the query state changed — at startup and on every field-list edit.
#[derive(Debug, Clone, Default)]
pub struct ColumnsCompute {
    pub columns: Vec<ColumnDescriptor>,
}

impl Compute for ColumnsCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        (vec![TypeId::of::<RelatedListQuery>()], Vec::new())
    }

    fn compute(&self, dep: Dep<'_>, updater: Updater) {
        let query = dep.state::<RelatedListQuery>();
        updater.set(Self {
            columns: build_columns(query.field_list()),
        });
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}

#[cfg(test)]
mod tests {
    use dealgrid_states::StateCtx;

    use crate::columns::ColumnKind;
    use crate::query::RelatedListQuery;

    use super::ColumnsCompute;

    fn frame(ctx: &mut StateCtx) {
        ctx.sync_computes();
        ctx.flush_commands();
        ctx.run_computed();
    }

    #[test]
    fn columns_follow_the_field_list() {
        let mut ctx = StateCtx::new();
        ctx.add_state(RelatedListQuery::default());
        ctx.record_compute(ColumnsCompute::default());

        frame(&mut ctx); // initial run enqueues the result
        frame(&mut ctx); // result applied at this sync
        let columns = ctx.cached::<ColumnsCompute>().cloned().unwrap_or_default().columns;
        assert_eq!(columns.len(), 4, "default field list has four entries");
        assert_eq!(columns[0].label, "Name");
        assert_eq!(columns[1].kind, ColumnKind::Picklist);

        ctx.update::<RelatedListQuery>(|query| query.set_field_list("Amount"));
        frame(&mut ctx);
        frame(&mut ctx);
        let columns = ctx.cached::<ColumnsCompute>().cloned().unwrap_or_default().columns;
        assert_eq!(columns.len(), 1, "columns must rebuild on a field-list change");
        assert_eq!(columns[0].kind, ColumnKind::Currency);
    }
}
