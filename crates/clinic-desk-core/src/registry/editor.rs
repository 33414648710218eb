//! Create/edit dialog state.

use tracing::debug;

use super::{validate, Record, Registry, RegistryError, RegistryResult, ValidationError};

/// What the open dialog will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    /// Replace the record with this id
    Edit { id: String },
}

/// A modal form editing one record.
///
/// The draft is a copy: in edit mode it holds the record as it was when the
/// dialog opened, and the registry is untouched until a successful submit.
#[derive(Debug, Clone)]
pub struct Editor<R: Record + Default> {
    mode: Option<EditorMode>,
    draft: R,
    error: Option<ValidationError>,
}

impl<R: Record + Default> Default for Editor<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record + Default> Editor<R> {
    /// Create a closed editor.
    pub fn new() -> Self {
        Self {
            mode: None,
            draft: R::default(),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<&EditorMode> {
        self.mode.as_ref()
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R {
        &mut self.draft
    }

    /// Validation failure from the last submit, shown in the dialog.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Open on an empty form.
    pub fn open_create(&mut self) {
        self.mode = Some(EditorMode::Create);
        self.draft = R::default();
        self.error = None;
    }

    /// Open pre-filled with the current values of a record.
    pub fn open_edit(&mut self, registry: &Registry<R>, id: &str) -> RegistryResult<()> {
        let record = registry.get(id)?;
        self.mode = Some(EditorMode::Edit {
            id: record.id().to_string(),
        });
        self.draft = record.clone();
        self.error = None;
        Ok(())
    }

    /// Close and discard the draft.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Validate the draft and write it to the registry.
    ///
    /// On failure the dialog stays open with the draft intact. Returns the id
    /// of the created or replaced record.
    pub fn submit(&mut self, registry: &mut Registry<R>) -> RegistryResult<String> {
        self.submit_with(registry, |_| {})
    }

    /// Like [`Editor::submit`], running `prepare` on the draft first.
    ///
    /// `prepare` is where snapshot fields are copied from other registries.
    pub fn submit_with<F>(&mut self, registry: &mut Registry<R>, prepare: F) -> RegistryResult<String>
    where
        F: FnOnce(&mut R),
    {
        let mode = self.mode.clone().ok_or(RegistryError::EditorClosed)?;

        prepare(&mut self.draft);
        if let Err(err) = validate(&self.draft) {
            debug!(
                kind = %R::KIND,
                missing = ?err.missing,
                invalid = ?err.invalid,
                "submit rejected"
            );
            self.error = Some(err.clone());
            return Err(err.into());
        }

        let mut record = self.draft.clone();
        let id = match mode {
            EditorMode::Create => registry.insert(record)?,
            EditorMode::Edit { id } => {
                record.set_id(id.clone());
                registry.replace(record)?;
                id
            }
        };

        self.close();
        Ok(id)
    }

    fn close(&mut self) {
        self.mode = None;
        self.draft = R::default();
        self.error = None;
    }
}
