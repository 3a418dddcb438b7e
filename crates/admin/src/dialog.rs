//! Mutation dialogs.
//!
//! A dialog edits one entity (or creates a new one) through a
//! [`FormModel`]. Each time it is opened the form is re-initialized: from
//! the entity in edit mode, from defaults in create mode. Submitting checks
//! required fields, calls the matching create/update operation and closes
//! on success. On any failure the dialog stays open with its fields intact
//! and an error toast is shown. There is no optimistic update; the owning
//! screen refetches after a successful submit.

use std::fmt::Debug;

use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::notify::{Notifier, Toast};

/// Field state of a dialog plus the operations it submits to.
pub trait FormModel: Sized + Send + Sync {
    /// Entity the form creates or edits.
    type Entity: Send;
    /// Identity passed to the update operation.
    type Key: Clone + Debug + Send + Sync;

    /// Human name of the entity, used in toasts ("Coupon").
    const NOUN: &'static str;

    /// Defaults for create mode.
    fn blank() -> Self;

    /// Fields initialized from an existing entity.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Identity of `entity` for the update call.
    fn key_of(entity: &Self::Entity) -> Self::Key;

    /// Names of required fields that are empty.
    ///
    /// Required means present: an empty string or an absent number fails.
    /// No range or cross-field checks are made.
    fn missing_fields(&self, creating: bool) -> Vec<&'static str>;

    /// Create a new entity from the form.
    fn create(
        &self,
        client: &ApiClient,
    ) -> impl Future<Output = Result<Self::Entity, ApiError>> + Send {
        let _ = client;
        async { Err(ApiError::Unsupported("create")) }
    }

    /// Update the entity identified by `key` from the form.
    fn update(
        &self,
        client: &ApiClient,
        key: &Self::Key,
    ) -> impl Future<Output = Result<Self::Entity, ApiError>> + Send;
}

/// Whether the dialog creates or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode<K> {
    Create,
    Edit(K),
}

/// Result of [`MutationDialog::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// The backend accepted the change; the dialog is closed.
    Saved(E),
    /// Required fields are missing; nothing was sent.
    Invalid(Vec<&'static str>),
    /// The backend call failed; the dialog stays open.
    Failed(ApiError),
    /// Submit was called on a closed dialog.
    NotOpen,
}

impl<E> SubmitOutcome<E> {
    /// Whether the change was saved.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

struct OpenDialog<F: FormModel> {
    mode: DialogMode<F::Key>,
    form: F,
}

/// A modal create/edit form.
pub struct MutationDialog<F: FormModel> {
    open: Option<OpenDialog<F>>,
}

impl<F: FormModel> Default for MutationDialog<F> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<F: FormModel> MutationDialog<F> {
    /// A closed dialog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dialog is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Current mode, when open.
    #[must_use]
    pub fn mode(&self) -> Option<&DialogMode<F::Key>> {
        self.open.as_ref().map(|open| &open.mode)
    }

    /// Current field state, when open.
    #[must_use]
    pub fn form(&self) -> Option<&F> {
        self.open.as_ref().map(|open| &open.form)
    }

    /// Mutable field state, when open.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        self.open.as_mut().map(|open| &mut open.form)
    }

    /// Open in create mode with default fields, discarding any prior state.
    pub fn open_create(&mut self) -> &mut F {
        let open = self.open.insert(OpenDialog {
            mode: DialogMode::Create,
            form: F::blank(),
        });
        &mut open.form
    }

    /// Open in edit mode for `entity`, discarding any prior state.
    pub fn open_edit(&mut self, entity: &F::Entity) -> &mut F {
        let open = self.open.insert(OpenDialog {
            mode: DialogMode::Edit(F::key_of(entity)),
            form: F::from_entity(entity),
        });
        &mut open.form
    }

    /// Close without submitting.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Validate and submit the form.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        notifier: &mut impl Notifier,
    ) -> SubmitOutcome<F::Entity> {
        let Some(open) = self.open.as_ref() else {
            return SubmitOutcome::NotOpen;
        };

        let creating = matches!(open.mode, DialogMode::Create);
        let missing = open.form.missing_fields(creating);
        if !missing.is_empty() {
            debug!(noun = F::NOUN, ?missing, "Dialog has empty required fields");
            notifier.notify(Toast::error(format!(
                "Please fill in the required fields: {}",
                missing.join(", ")
            )));
            return SubmitOutcome::Invalid(missing);
        }

        let result = match &open.mode {
            DialogMode::Create => open.form.create(client).await,
            DialogMode::Edit(key) => open.form.update(client, key).await,
        };

        match result {
            Ok(entity) => {
                let verb = if creating { "created" } else { "updated" };
                notifier.notify(Toast::success(format!("{} {verb}", F::NOUN)));
                self.open = None;
                SubmitOutcome::Saved(entity)
            }
            Err(e) => {
                warn!(noun = F::NOUN, error = %e, "Dialog submit failed");
                notifier.notify(Toast::error(e.user_message()));
                SubmitOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;
    use crate::notify::ToastLog;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        id: u32,
        label: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct TagForm {
        label: String,
    }

    impl FormModel for TagForm {
        type Entity = Tag;
        type Key = u32;
        const NOUN: &'static str = "Tag";

        fn blank() -> Self {
            Self {
                label: String::new(),
            }
        }

        fn from_entity(entity: &Tag) -> Self {
            Self {
                label: entity.label.clone(),
            }
        }

        fn key_of(entity: &Tag) -> u32 {
            entity.id
        }

        fn missing_fields(&self, _creating: bool) -> Vec<&'static str> {
            if self.label.is_empty() {
                vec!["label"]
            } else {
                vec![]
            }
        }

        async fn update(&self, _client: &ApiClient, key: &u32) -> Result<Tag, ApiError> {
            if self.label == "boom" {
                return Err(ApiError::from_status(500, r#"{"message":"Tag store down"}"#));
            }
            Ok(Tag {
                id: *key,
                label: self.label.clone(),
            })
        }
    }

    fn client() -> ApiClient {
        ApiClient::builder(Url::parse("http://127.0.0.1:9/").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_open_edit_initializes_from_entity_each_time() {
        let mut dialog = MutationDialog::<TagForm>::new();
        let first = Tag {
            id: 1,
            label: "red".into(),
        };
        let second = Tag {
            id: 2,
            label: "blue".into(),
        };

        dialog.open_edit(&first).label.push_str("dish");
        assert_eq!(dialog.form().unwrap().label, "reddish");

        dialog.open_edit(&second);
        assert_eq!(dialog.form().unwrap().label, "blue");
        assert_eq!(dialog.mode(), Some(&DialogMode::Edit(2)));

        dialog.open_create();
        assert_eq!(dialog.form().unwrap().label, "");
        assert_eq!(dialog.mode(), Some(&DialogMode::Create));
    }

    #[tokio::test]
    async fn test_submit_closed_dialog() {
        let mut dialog = MutationDialog::<TagForm>::new();
        let mut toasts = ToastLog::new();
        let outcome = dialog.submit(&client(), &mut toasts).await;
        assert!(matches!(outcome, SubmitOutcome::NotOpen));
        assert!(toasts.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_keeps_dialog_open() {
        let mut dialog = MutationDialog::<TagForm>::new();
        let mut toasts = ToastLog::new();
        dialog.open_edit(&Tag {
            id: 3,
            label: String::new(),
        });

        let outcome = dialog.submit(&client(), &mut toasts).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref f) if f == &vec!["label"]));
        assert!(dialog.is_open());
        assert!(toasts.last().unwrap().message.contains("label"));
    }

    #[tokio::test]
    async fn test_successful_update_closes() {
        let mut dialog = MutationDialog::<TagForm>::new();
        let mut toasts = ToastLog::new();
        dialog.open_edit(&Tag {
            id: 4,
            label: "old".into(),
        });
        dialog.form_mut().unwrap().label = "new".into();

        let outcome = dialog.submit(&client(), &mut toasts).await;
        match outcome {
            SubmitOutcome::Saved(tag) => assert_eq!(tag, Tag { id: 4, label: "new".into() }),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!dialog.is_open());
        assert_eq!(toasts.last(), Some(&Toast::success("Tag updated")));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_fields() {
        let mut dialog = MutationDialog::<TagForm>::new();
        let mut toasts = ToastLog::new();
        dialog.open_edit(&Tag {
            id: 5,
            label: "boom".into(),
        });

        let outcome = dialog.submit(&client(), &mut toasts).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(dialog.is_open());
        assert_eq!(dialog.form().unwrap().label, "boom");
        assert_eq!(toasts.last(), Some(&Toast::error("Tag store down")));
    }

    #[tokio::test]
    async fn test_create_unsupported_by_default() {
        let mut dialog = MutationDialog::<TagForm>::new();
        let mut toasts = ToastLog::new();
        dialog.open_create().label = "fresh".into();

        let outcome = dialog.submit(&client(), &mut toasts).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(ApiError::Unsupported("create"))
        ));
        assert!(dialog.is_open());
    }
}
