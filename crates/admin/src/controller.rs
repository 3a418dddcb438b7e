//! List screens.
//!
//! A screen owns the fetched collection of one resource, a search query and
//! (usually) a mutation dialog. The collection is always refetched in full
//! after a successful mutation; nothing is patched locally. While a fetch is
//! in flight the screen reports [`Phase::Loading`]. A failed fetch shows an
//! error toast and leaves the previous items in place.
//!
//! Dropping a screen's future (for example when the user navigates away)
//! cancels the in-flight request; no state is updated afterwards.

use tracing::{debug, instrument, warn};

use crate::client::ApiClient;
use crate::dialog::{FormModel, MutationDialog, SubmitOutcome};
use crate::error::ApiError;
use crate::filter::{Searchable, filter_items};
use crate::notify::{Notifier, Toast};
use crate::reorder::{self, Direction, PositionStore, Positioned, ReorderError, Rollback};

/// An entity collection that can be fetched as a whole.
pub trait Resource: Searchable + Clone + Send + Sync + Sized + 'static {
    /// Plural name used in logs and toasts ("coupons").
    const PLURAL: &'static str;

    /// Fetch the full collection.
    fn fetch_all(client: &ApiClient) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send;
}

/// Whether a screen is waiting for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
}

/// Fetched collection of `T` plus the current search query.
#[derive(Debug, Clone)]
pub struct ResourceList<T> {
    items: Vec<T>,
    loading: bool,
    query: String,
}

impl<T: Resource> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            query: String::new(),
        }
    }
}

impl<T: Resource> ResourceList<T> {
    /// An empty list in the loading phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All fetched items in backend order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else {
            Phase::Loaded
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query. No fetch happens.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Items matching the current query, in backend order.
    #[must_use]
    pub fn visible(&self) -> Vec<&T> {
        filter_items(&self.items, &self.query)
    }

    /// Items matching the current query and `pred`.
    #[must_use]
    pub fn visible_where(&self, pred: impl Fn(&T) -> bool) -> Vec<&T> {
        self.visible().into_iter().filter(|item| pred(item)).collect()
    }

    /// First fetched item satisfying `pred`, ignoring the query.
    #[must_use]
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| pred(item))
    }

    /// Fetch the full collection, replacing the current items on success.
    ///
    /// Returns whether the fetch succeeded.
    #[instrument(skip_all, fields(resource = T::PLURAL))]
    pub async fn load(&mut self, client: &ApiClient, notifier: &mut impl Notifier) -> bool {
        self.loading = true;
        let result = T::fetch_all(client).await;
        self.loading = false;

        match result {
            Ok(items) => {
                debug!(count = items.len(), "Fetched collection");
                self.items = items;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch collection");
                notifier.notify(Toast::error(e.user_message()));
                false
            }
        }
    }

    /// Run a mutation, toast its outcome and refetch on success.
    ///
    /// Returns the mutation's value when it succeeded.
    pub async fn mutate<R>(
        &mut self,
        client: &ApiClient,
        notifier: &mut impl Notifier,
        success: &str,
        op: impl Future<Output = Result<R, ApiError>>,
    ) -> Option<R> {
        match op.await {
            Ok(value) => {
                notifier.notify(Toast::success(success));
                self.load(client, notifier).await;
                Some(value)
            }
            Err(e) => {
                warn!(resource = T::PLURAL, error = %e, "Mutation failed");
                notifier.notify(Toast::error(e.user_message()));
                None
            }
        }
    }
}

impl<T> ResourceList<T>
where
    T: Resource + Positioned,
    ApiClient: PositionStore<T>,
{
    /// Move the fetched item at `index` one step and persist the new order.
    ///
    /// The move is applied locally first. The collection is refetched
    /// afterwards whatever the outcome, so the list ends up reflecting what
    /// the backend actually stored.
    ///
    /// # Errors
    ///
    /// Returns `ReorderError` when persisting fails; an error toast has
    /// already been shown.
    pub async fn reorder(
        &mut self,
        client: &ApiClient,
        notifier: &mut impl Notifier,
        index: usize,
        direction: Direction,
    ) -> Result<bool, ReorderError> {
        if !reorder::move_item(&mut self.items, index, direction) {
            return Ok(false);
        }

        let changes = reorder::plan(&self.items);
        let result = reorder::persist::<T, _>(client, &changes, client.reorder_mode()).await;

        match &result {
            Ok(_) => notifier.notify(Toast::success("Order updated")),
            Err(e) => {
                let mut message = e.api_error().user_message();
                if let ReorderError::Partial {
                    rollback: Rollback::Incomplete(ids),
                    ..
                } = e
                {
                    message = format!("{message} (could not restore {})", ids.join(", "));
                }
                notifier.notify(Toast::error(message));
            }
        }

        self.load(client, notifier).await;
        result.map(|_| true)
    }
}

/// A list screen with its create/edit dialog.
pub struct Screen<T: Resource, F: FormModel<Entity = T>> {
    pub list: ResourceList<T>,
    pub dialog: MutationDialog<F>,
}

impl<T: Resource, F: FormModel<Entity = T>> Default for Screen<T, F> {
    fn default() -> Self {
        Self {
            list: ResourceList::new(),
            dialog: MutationDialog::new(),
        }
    }
}

impl<T: Resource, F: FormModel<Entity = T>> Screen<T, F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial fetch when the screen is shown.
    pub async fn mount(&mut self, client: &ApiClient, notifier: &mut impl Notifier) -> bool {
        self.list.load(client, notifier).await
    }

    /// Open the dialog for the first fetched item satisfying `pred`.
    pub fn edit_where(&mut self, pred: impl Fn(&T) -> bool) -> Option<&mut F> {
        let entity = self.list.find(pred)?;
        Some(self.dialog.open_edit(entity))
    }

    /// Submit the dialog and refetch when the change was saved.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        notifier: &mut impl Notifier,
    ) -> SubmitOutcome<T> {
        let outcome = self.dialog.submit(client, notifier).await;
        if outcome.is_saved() {
            self.list.load(client, notifier).await;
        }
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::ToastLog;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        name: String,
        colour: String,
    }

    impl Searchable for Widget {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }
    }

    impl Resource for Widget {
        const PLURAL: &'static str = "widgets";

        async fn fetch_all(_client: &ApiClient) -> Result<Vec<Self>, ApiError> {
            Ok(vec![])
        }
    }

    fn widget(name: &str, colour: &str) -> Widget {
        Widget {
            name: name.to_string(),
            colour: colour.to_string(),
        }
    }

    fn loaded(items: Vec<Widget>) -> ResourceList<Widget> {
        ResourceList {
            items,
            loading: false,
            query: String::new(),
        }
    }

    #[test]
    fn test_new_list_is_loading() {
        let list = ResourceList::<Widget>::new();
        assert!(list.is_loading());
        assert_eq!(list.phase(), Phase::Loading);
        assert!(list.visible().is_empty());
    }

    #[test]
    fn test_visible_combines_query_and_predicate() {
        let mut list = loaded(vec![
            widget("Sprocket", "red"),
            widget("Gear", "red"),
            widget("Spring", "blue"),
        ]);
        list.set_query("sp");
        let names: Vec<_> = list.visible().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Sprocket", "Spring"]);

        let red: Vec<_> = list
            .visible_where(|w| w.colour == "red")
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(red, vec!["Sprocket"]);
        assert_eq!(list.find(|w| w.name == "Gear").unwrap().colour, "red");
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_items_and_toasts() {
        let client = ApiClient::builder(url::Url::parse("http://127.0.0.1:9/").unwrap())
            .build()
            .unwrap();
        let mut list = loaded(vec![widget("Gear", "red")]);
        let mut toasts = ToastLog::new();

        let out: Option<()> = list
            .mutate(&client, &mut toasts, "Saved", async {
                Err(ApiError::from_status(409, r#"{"message":"Conflict"}"#))
            })
            .await;

        assert!(out.is_none());
        assert_eq!(list.items().len(), 1);
        assert_eq!(toasts.drain(), vec![Toast::error("Conflict")]);
    }
}
