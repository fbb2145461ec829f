//! Reactive query parameters of the related list.

use std::any::Any;

use dealgrid_states::{State, assign_boxed};
use ustr::Ustr;

use crate::columns::parse_field_list;
use crate::config::{BusinessConfig, DEFAULT_FIELD_LIST};

/// Parent identifier plus field list, with a revision that bumps on every
/// effective change.
///
/// The revision is what makes the parameters reactive: the related-list
/// panel compares it against the revision the rows cache answered and
/// refetches on mismatch. Both values are private so every change flows
/// through the bumping setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedListQuery {
    parent_id: Option<Ustr>,
    field_list: String,
    revision: u64,
}

impl Default for RelatedListQuery {
    fn default() -> Self {
        Self {
            parent_id: None,
            field_list: DEFAULT_FIELD_LIST.to_owned(),
            revision: 0,
        }
    }
}

impl RelatedListQuery {
    pub fn from_config(config: &BusinessConfig) -> Self {
        Self {
            parent_id: config.parent_id,
            field_list: config.field_list.clone(),
            revision: 0,
        }
    }

    pub fn parent_id(&self) -> Option<Ustr> {
        self.parent_id
    }

    pub fn field_list(&self) -> &str {
        &self.field_list
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumps the revision only when the value actually changes.
    pub fn set_parent_id(&mut self, parent_id: Option<Ustr>) {
        if self.parent_id != parent_id {
            self.parent_id = parent_id;
            self.revision += 1;
        }
    }

    /// Bumps the revision only when the value actually changes.
    pub fn set_field_list(&mut self, field_list: impl Into<String>) {
        let field_list = field_list.into();
        if self.field_list != field_list {
            self.field_list = field_list;
            self.revision += 1;
        }
    }

    /// The read call's `fields` parameter: entries trimmed, comma-joined.
    pub fn wire_field_list(&self) -> String {
        parse_field_list(&self.field_list).join(",")
    }
}

impl State for RelatedListQuery {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}

#[cfg(test)]
mod tests {
    use ustr::Ustr;

    use super::RelatedListQuery;

    #[test]
    fn setters_bump_the_revision_once_per_change() {
        let mut query = RelatedListQuery::default();
        assert_eq!(query.revision(), 0);

        query.set_parent_id(Some(Ustr::from("001xx000003DGbY")));
        assert_eq!(query.revision(), 1, "new parent id must bump the revision");

        query.set_parent_id(Some(Ustr::from("001xx000003DGbY")));
        assert_eq!(query.revision(), 1, "setting the same parent id must not bump");

        query.set_field_list("Name,Amount");
        assert_eq!(query.revision(), 2, "new field list must bump the revision");

        query.set_field_list("Name,Amount");
        assert_eq!(query.revision(), 2, "setting the same field list must not bump");
    }

    #[test]
    fn wire_field_list_trims_entries() {
        let mut query = RelatedListQuery::default();
        query.set_field_list(" Name , Amount ,CloseDate");
        assert_eq!(query.wire_field_list(), "Name,Amount,CloseDate");
    }
}
