//! The remote collection list controller.
//!
//! A [`ListController`] owns the query of one list screen, keeps a single
//! [`ResultCache`] in sync with the backend and routes record mutations.
//! Handles are cheap to clone; the last handle dropped cancels a pending
//! search timer.
//!
//! Every fetch takes a new generation number under the state lock. A response
//! may only publish while its generation is still the newest, so a slow
//! response for an older query can never overwrite a newer one.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::confirm::{Confirm, ConfirmPrompt};
use crate::domain::entity::Entity;
use crate::domain::query::{Effect, QueryAction, QueryState};
use crate::domain::resource::{Endpoints, ResourceKind};
use crate::domain::types::{EntityId, FilterKey, FlagName, PageSize, SortKey};
use crate::dto::payload::Payload;
use crate::forms::{FormError, RecordForm};
use crate::models::config::ConsoleConfig;
use crate::notifications::{Notification, Notifier};
use crate::repository::{CollectionReader, CollectionWriter};
use crate::services::fetch::{Page, load_page};
use crate::services::mutation::{
    MutationOutcome, create_record, delete_record, set_flag, update_record,
};
use crate::services::{ServiceError, ServiceResult};

pub mod cache;
pub mod debounce;

pub use cache::ResultCache;
use debounce::DebounceGate;

/// How a fetch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page replaced the cache.
    Applied,
    /// The request failed; the previous items were kept.
    Failed,
    /// A newer fetch was issued meanwhile; the response was discarded.
    Superseded,
    /// The screen is not mounted; no request was made.
    Unmounted,
}

/// Result of [`ListController::remove`].
#[derive(Clone, Debug, PartialEq)]
pub enum Removal<E> {
    Removed(MutationOutcome<E>),
    /// The operator declined; nothing was sent.
    Declined,
}

/// Per-screen settings of a controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerOptions {
    pub endpoints: Endpoints,
    pub page_size: PageSize,
    pub sort: SortKey,
    pub search_debounce: Duration,
}

impl ControllerOptions {
    /// Defaults for `kind`: `/<slug>` endpoints, 8 rows, newest first, 500 ms.
    pub fn for_kind(kind: ResourceKind) -> Self {
        Self {
            endpoints: kind.default_endpoints(),
            page_size: PageSize::DEFAULT,
            sort: kind.default_sort(),
            search_debounce: Duration::from_millis(500),
        }
    }

    pub fn from_config(config: &ConsoleConfig, kind: ResourceKind) -> Self {
        Self {
            endpoints: config.endpoints(kind),
            page_size: config.page_size,
            sort: kind.default_sort(),
            search_debounce: config.search_debounce(),
        }
    }
}

#[derive(Debug)]
struct ControllerState {
    query: QueryState,
    /// Generation of the most recently issued fetch.
    generation: u64,
    mounted: bool,
}

struct Shared<E, R> {
    endpoints: Endpoints,
    repo: Arc<R>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    state: Mutex<ControllerState>,
    cache: watch::Sender<ResultCache<E>>,
    debounce: DebounceGate,
}

/// List controller for records of type `E` served by backend `R`.
pub struct ListController<E, R> {
    shared: Arc<Shared<E, R>>,
}

impl<E, R> Clone for ListController<E, R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E, R> ListController<E, R>
where
    E: Entity,
    R: CollectionReader + CollectionWriter + 'static,
{
    pub fn new(
        repo: Arc<R>,
        options: ControllerOptions,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let (cache, _) = watch::channel(ResultCache::default());
        let shared = Shared {
            endpoints: options.endpoints,
            repo,
            notifier,
            confirm,
            state: Mutex::new(ControllerState {
                query: QueryState::new(options.page_size, options.sort),
                generation: 0,
                mounted: false,
            }),
            cache,
            debounce: DebounceGate::new(options.search_debounce),
        };

        Self {
            shared: Arc::new(shared),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        E::KIND
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.shared.endpoints
    }

    /// Starts the screen with the current query and runs the first fetch.
    pub async fn mount(&self) -> FetchOutcome {
        self.shared.state.lock().mounted = true;
        self.refresh().await
    }

    /// Stops the screen: cancels the search timer, discards in-flight
    /// responses and empties the cache.
    pub fn unmount(&self) {
        self.shared.debounce.cancel();
        {
            let mut state = self.shared.state.lock();
            state.mounted = false;
            state.generation = state.generation.wrapping_add(1);
        }
        self.shared.cache.send_replace(ResultCache::default());
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.state.lock().mounted
    }

    /// Fetches the current query immediately.
    pub async fn refresh(&self) -> FetchOutcome {
        self.shared.debounce.cancel();
        self.shared.refresh().await
    }

    pub fn query(&self) -> QueryState {
        self.shared.state.lock().query.clone()
    }

    pub fn snapshot(&self) -> ResultCache<E> {
        self.shared.cache.borrow().clone()
    }

    /// Receiver notified every time the cache changes.
    pub fn subscribe(&self) -> watch::Receiver<ResultCache<E>> {
        self.shared.cache.subscribe()
    }

    /// Whether a search fetch is waiting for the quiet period to end.
    pub fn search_pending(&self) -> bool {
        self.shared.debounce.is_pending()
    }

    /// Updates the search text at once; the fetch waits for the debounce gate.
    pub fn set_search(&self, text: impl Into<String>) {
        let effect = self.apply(QueryAction::SetSearch(text.into()));
        if effect == Effect::FetchDebounced && self.is_mounted() {
            self.schedule_search_fetch();
        }
    }

    pub async fn set_sort(&self, sort: SortKey) -> Option<FetchOutcome> {
        self.dispatch(QueryAction::SetSort(sort)).await
    }

    /// Sets a filter; an empty value clears it.
    pub async fn set_filter(
        &self,
        key: FilterKey,
        value: impl Into<String>,
    ) -> Option<FetchOutcome> {
        self.dispatch(QueryAction::SetFilter(key, value.into())).await
    }

    pub async fn clear_filter(&self, key: FilterKey) -> Option<FetchOutcome> {
        self.dispatch(QueryAction::ClearFilter(key)).await
    }

    /// Moves to `page`, clamped to the pages reported by the last fetch.
    pub async fn set_page(&self, page: u32) -> Option<FetchOutcome> {
        let total_pages = self.shared.cache.borrow().total_pages;
        self.dispatch(QueryAction::SetPage { page, total_pages }).await
    }

    pub async fn set_limit(&self, limit: PageSize) -> Option<FetchOutcome> {
        self.dispatch(QueryAction::SetLimit(limit)).await
    }

    pub async fn create(&self, payload: Payload) -> ServiceResult<MutationOutcome<E>> {
        let repo = self.shared.repo.as_ref();
        let result = create_record(repo, &self.shared.endpoints, &payload).await;
        self.after_mutation(result, "created", "create").await
    }

    /// Validates `form` and creates the record it describes. An invalid form
    /// is reported and nothing is sent.
    pub async fn create_from<F: RecordForm>(&self, form: &F) -> ServiceResult<MutationOutcome<E>> {
        let payload = self.checked(form.to_create_payload())?;
        self.create(payload).await
    }

    pub async fn update(
        &self,
        id: &EntityId,
        payload: Payload,
    ) -> ServiceResult<MutationOutcome<E>> {
        let repo = self.shared.repo.as_ref();
        let result = update_record(repo, &self.shared.endpoints, id, &payload).await;
        self.after_mutation(result, "updated", "update").await
    }

    /// Validates `form` and sends it as an edit of record `id`.
    pub async fn update_from<F: RecordForm>(
        &self,
        id: &EntityId,
        form: &F,
    ) -> ServiceResult<MutationOutcome<E>> {
        let payload = self.checked(form.to_payload())?;
        self.update(id, payload).await
    }

    /// Deletes a record once the operator confirms.
    pub async fn remove(&self, id: &EntityId) -> ServiceResult<Removal<E>> {
        let label = self
            .shared
            .cache
            .borrow()
            .find(id)
            .map(|record| record.label().to_string())
            .unwrap_or_else(|| id.to_string());
        let prompt = ConfirmPrompt {
            kind: E::KIND,
            id: id.clone(),
            label,
        };

        if !self.shared.confirm.confirm(&prompt).await {
            log::debug!("Deletion of {} {id} declined", E::KIND.display_name());
            return Ok(Removal::Declined);
        }

        let result = delete_record(self.shared.repo.as_ref(), &self.shared.endpoints, id).await;
        self.after_mutation(result, "deleted", "delete")
            .await
            .map(Removal::Removed)
    }

    /// Stores the literal `value` in the boolean field `flag`.
    pub async fn toggle_flag(
        &self,
        id: &EntityId,
        flag: &FlagName,
        value: bool,
    ) -> ServiceResult<MutationOutcome<E>> {
        let result = set_flag(
            self.shared.repo.as_ref(),
            &self.shared.endpoints,
            id,
            flag,
            value,
        )
        .await;
        self.after_mutation(result, "updated", "update").await
    }

    fn checked(&self, payload: Result<Payload, FormError>) -> ServiceResult<Payload> {
        let err = match payload {
            Ok(payload) => return Ok(payload),
            Err(err) => ServiceError::from(err),
        };
        log::warn!("Invalid {} form: {err}", E::KIND.display_name());
        if let Some(message) = err.user_message() {
            self.shared.notifier.notify(Notification::error(message));
        }
        Err(err)
    }

    fn apply(&self, action: QueryAction) -> Effect {
        self.shared.state.lock().query.apply(action)
    }

    async fn dispatch(&self, action: QueryAction) -> Option<FetchOutcome> {
        match self.apply(action) {
            Effect::None => None,
            Effect::FetchNow => Some(self.refresh().await),
            Effect::FetchDebounced => {
                if self.is_mounted() {
                    self.schedule_search_fetch();
                }
                None
            }
        }
    }

    fn schedule_search_fetch(&self) {
        let weak: Weak<Shared<E, R>> = Arc::downgrade(&self.shared);
        let scheduled = self.shared.debounce.schedule(async move {
            if let Some(shared) = weak.upgrade() {
                shared.refresh().await;
            }
        });
        if scheduled {
            log::debug!(
                "{} search fetch scheduled in {:?}",
                E::KIND.display_name(),
                self.shared.debounce.delay()
            );
        }
    }

    async fn after_mutation(
        &self,
        result: ServiceResult<MutationOutcome<E>>,
        done: &str,
        verb: &str,
    ) -> ServiceResult<MutationOutcome<E>> {
        let name = E::KIND.display_name();
        match &result {
            Ok(outcome) => {
                let message = outcome
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("{name} {done}"));
                self.shared.notifier.notify(Notification::success(message));
                self.refresh().await;
            }
            Err(err) => {
                let message = mutation_failure_message(err, verb, name);
                self.shared.notifier.notify(Notification::error(message));
            }
        }
        result
    }
}

impl<E, R> Shared<E, R>
where
    E: Entity,
    R: CollectionReader + CollectionWriter + 'static,
{
    async fn refresh(&self) -> FetchOutcome {
        let (generation, query) = {
            let mut state = self.state.lock();
            if !state.mounted {
                return FetchOutcome::Unmounted;
            }
            state.generation = state.generation.wrapping_add(1);
            // Under the lock, so an older fetch cannot raise the flag after a
            // newer one has published.
            self.cache.send_modify(|cache| cache.loading = true);
            (state.generation, state.query.clone())
        };

        let result = load_page::<E, R>(self.repo.as_ref(), &self.endpoints, &query).await;
        self.publish(generation, result)
    }

    fn publish(&self, generation: u64, result: ServiceResult<Page<E>>) -> FetchOutcome {
        let failure = {
            let state = self.state.lock();
            if state.generation != generation || !state.mounted {
                log::debug!(
                    "Discarding stale {} page (generation {generation}, latest {})",
                    E::KIND.display_name(),
                    state.generation
                );
                return FetchOutcome::Superseded;
            }

            match result {
                Ok(page) => {
                    self.cache.send_replace(ResultCache {
                        items: page.items,
                        total_pages: page.total_pages,
                        loading: false,
                    });
                    None
                }
                Err(err) => {
                    self.cache.send_modify(|cache| cache.loading = false);
                    Some(err)
                }
            }
        };

        match failure {
            None => FetchOutcome::Applied,
            Some(err) => {
                let message = err.user_message().map(str::to_string).unwrap_or_else(|| {
                    format!(
                        "Failed to load {} list",
                        E::KIND.display_name().to_lowercase()
                    )
                });
                self.notifier.notify(Notification::error(message));
                FetchOutcome::Failed
            }
        }
    }
}

fn mutation_failure_message(err: &ServiceError, verb: &str, name: &str) -> String {
    err.user_message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Failed to {verb} {}", name.to_lowercase()))
}
