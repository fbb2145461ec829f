//! UI-side state of the related list: the draft buffer and the one open
//! cell editor.

use std::any::Any;
use std::collections::BTreeMap;

use dealgrid_states::{State, assign_boxed};
use serde_json::Value;
use ustr::Ustr;

use crate::columns::ColumnKind;
use crate::records::RecordPatch;

/// Sparse not-yet-saved field changes, keyed by record identifier.
///
/// Draft values are strings; the service coerces types on write. The buffer
/// is never merged into fetched rows — drafts paint over cells at render
/// time and the stored rows stay server-authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    drafts: BTreeMap<Ustr, BTreeMap<Ustr, String>>,
}

impl EditBuffer {
    pub fn set(&mut self, row_id: Ustr, field_name: Ustr, value: impl Into<String>) {
        self.drafts.entry(row_id).or_default().insert(field_name, value.into());
    }

    /// Drop one draft; a row whose last draft goes disappears entirely.
    pub fn remove(&mut self, row_id: Ustr, field_name: Ustr) {
        if let Some(row) = self.drafts.get_mut(&row_id) {
            row.remove(&field_name);
            if row.is_empty() {
                self.drafts.remove(&row_id);
            }
        }
    }

    pub fn get(&self, row_id: Ustr, field_name: Ustr) -> Option<&str> {
        self.drafts
            .get(&row_id)
            .and_then(|row| row.get(&field_name))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn edited_rows(&self) -> usize {
        self.drafts.len()
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    /// One patch per edited row: the identifier under `Id` plus that row's
    /// changed fields, all as strings.
    pub fn to_patches(&self) -> Vec<RecordPatch> {
        self.drafts
            .iter()
            .map(|(row_id, row)| {
                let mut fields = BTreeMap::new();
                fields.insert("Id".to_owned(), Value::String(row_id.as_str().to_owned()));
                for (field_name, value) in row {
                    fields.insert(field_name.as_str().to_owned(), Value::String(value.clone()));
                }
                RecordPatch { fields }
            })
            .collect()
    }
}

/// The single cell editor open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
    pub row_id: Ustr,
    pub field_name: Ustr,
    pub text: String,
    /// Set when a commit was rejected by the column kind; the editor stays
    /// open in the error color until corrected or cancelled.
    pub invalid: bool,
}

/// Everything the related-list panel owns besides the fetched rows.
#[derive(Debug, Clone, Default)]
pub struct RelatedListState {
    pub buffer: EditBuffer,
    pub editor: Option<ActiveEditor>,
    /// Query revision whose fetch failure was already announced as a toast.
    /// The persistent banner keeps repeating the message; the toast fires
    /// once per failed revision.
    pub announced_fetch_failure: Option<u64>,
}

impl RelatedListState {
    pub fn begin_edit(&mut self, row_id: Ustr, field_name: Ustr, initial: impl Into<String>) {
        self.editor = Some(ActiveEditor {
            row_id,
            field_name,
            text: initial.into(),
            invalid: false,
        });
    }

    pub fn is_editing(&self, row_id: Ustr, field_name: Ustr) -> bool {
        self.editor
            .as_ref()
            .is_some_and(|editor| editor.row_id == row_id && editor.field_name == field_name)
    }

    /// Close the editor without touching the buffer.
    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Commit the open editor against the record's current value.
    ///
    /// Returns false — keeping the editor open, flagged invalid — when the
    /// entered text does not parse for the column kind. Committing a value
    /// equal to the current one removes the draft instead of recording it.
    pub fn commit_edit(&mut self, kind: ColumnKind, current: &str) -> bool {
        let Some(mut editor) = self.editor.take() else {
            return true;
        };
        if !kind.accepts(&editor.text) {
            editor.invalid = true;
            self.editor = Some(editor);
            return false;
        }
        let normalized = kind.normalize(&editor.text);
        if normalized == current {
            self.buffer.remove(editor.row_id, editor.field_name);
        } else {
            self.buffer.set(editor.row_id, editor.field_name, normalized);
        }
        true
    }

    /// Record a draft without going through the text editor (picklist
    /// selection commits immediately).
    pub fn set_draft(
        &mut self,
        row_id: Ustr,
        field_name: Ustr,
        value: impl Into<String>,
        current: &str,
    ) {
        let value = value.into();
        if value == current {
            self.buffer.remove(row_id, field_name);
        } else {
            self.buffer.set(row_id, field_name, value);
        }
    }
}

impl State for RelatedListState {
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
