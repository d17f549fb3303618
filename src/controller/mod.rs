//! Per-screen list controllers: snapshot, derived views, form and modal state.

pub mod batch_type;
pub mod engineer;
pub mod engineer_type;
pub mod society;
pub mod summary;
pub mod user;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::api::ResourceGateway;
use crate::config::UiConfig;
use crate::error::ConsoleError;
use crate::grouping::{Group, GroupedView};
use crate::models::{capitalize, Resource};
use crate::session::Session;

pub use batch_type::{BatchTypeController, BatchTypeCriteria};
pub use engineer::{EngineerController, EngineerCriteria};
pub use engineer_type::{EngineerTypeController, EngineerTypeCriteria};
pub use society::{SocietyController, SocietyCriteria};
pub use summary::SummaryPanel;
pub use user::{UserController, UserCriteria};

/// Interactive yes/no question asked before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a list screen needs to know about its records beyond the wire shape.
pub trait ListResource: Resource {
    type Criteria: Default + Clone + fmt::Debug + Send + Sync;

    /// True when every non-empty criterion matches this record.
    fn matches(&self, criteria: &Self::Criteria) -> bool;

    /// Required-field checks, first failure wins.
    fn validate(form: &Self::Request) -> Result<(), ConsoleError>;

    /// Primary numeric identifier used for ordering; `None` keeps server order.
    fn sort_key(&self) -> Option<i64> {
        None
    }

    /// Fills the creator field of a new record.
    fn stamp_creator(_form: &mut Self::Request, _username: &str) {}

    /// Grouped projection of already filtered and sorted rows.
    fn regroup(_rows: &[Self]) -> GroupedView<Self> {
        GroupedView::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<Id> {
    Closed,
    CreateOpen,
    EditOpen(Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Exact match; an absent criterion matches everything.
pub(crate) fn matches_exact<T: PartialEq>(value: &T, criterion: &Option<T>) -> bool {
    criterion.as_ref().map_or(true, |wanted| wanted == value)
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn require(condition: bool, message: &str) -> Result<(), ConsoleError> {
    if condition {
        Ok(())
    } else {
        Err(ConsoleError::validation(message))
    }
}

/// Owns one resource's snapshot and everything derived from it.
///
/// The snapshot is replaced wholesale by `load`; filtering, sorting and
/// grouping only ever write the derived vectors.
pub struct ListController<R: ListResource, G: ResourceGateway<R>> {
    gateway: G,
    session: Arc<Session>,
    modal_close_delay: Duration,
    message_clear_delay: Duration,

    snapshot: Vec<R>,
    filtered: Vec<R>,
    groups: GroupedView<R>,
    criteria: R::Criteria,
    sort: SortDirection,
    state: LoadState,

    modal: ModalState<R::Id>,
    form: R::Request,
    error_message: Option<String>,
    success_message: Option<String>,

    close_modal_at: Option<Instant>,
    clear_success_at: Option<Instant>,
}

impl<R: ListResource, G: ResourceGateway<R>> ListController<R, G> {
    pub fn new(gateway: G, session: Arc<Session>, ui: &UiConfig) -> Self {
        Self {
            gateway,
            session,
            modal_close_delay: ui.modal_close_delay(),
            message_clear_delay: ui.message_clear_delay(),
            snapshot: Vec::new(),
            filtered: Vec::new(),
            groups: GroupedView::new(),
            criteria: R::Criteria::default(),
            sort: SortDirection::Descending,
            state: LoadState::Idle,
            modal: ModalState::Closed,
            form: R::Request::default(),
            error_message: None,
            success_message: None,
            close_modal_at: None,
            clear_success_at: None,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Records as last fetched, in server order
    pub fn snapshot(&self) -> &[R] {
        &self.snapshot
    }

    /// Filtered and sorted view
    pub fn records(&self) -> &[R] {
        &self.filtered
    }

    pub fn groups(&self) -> &GroupedView<R> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&Group<R>> {
        self.groups.get(name)
    }

    /// Concatenated acts/batches for one name; empty when the name is unknown.
    pub fn sub_items_for(&self, name: &str) -> &[f64] {
        self.groups.get(name).map_or(&[], |group| group.sub_items.as_slice())
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.snapshot.iter().find(|record| &record.id() == id)
    }

    pub fn criteria(&self) -> &R::Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn modal(&self) -> &ModalState<R::Id> {
        &self.modal
    }

    pub fn form(&self) -> &R::Request {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut R::Request {
        &mut self.form
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Fetches the full list and rebuilds every derived view. On failure the
    /// previous snapshot is kept.
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.state = LoadState::Loading;
        self.error_message = None;

        match self.gateway.list().await {
            Ok(records) => {
                debug!(resource = R::PLURAL, count = records.len(), "snapshot loaded");
                self.snapshot = records;
                self.rederive();
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                let message = err.display_message(&format!("Failed to load {}", R::PLURAL));
                warn!(resource = R::PLURAL, error = %err, "load failed");
                self.error_message = Some(message);
                self.state = LoadState::Errored;
                Err(err)
            }
        }
    }

    /// Replaces the criteria and recomputes the derived views from the snapshot.
    pub fn filter(&mut self, criteria: R::Criteria) {
        self.criteria = criteria;
        self.rederive();
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
        self.apply_sort();
        self.groups = R::regroup(&self.filtered);
    }

    pub fn set_sort(&mut self, sort: SortDirection) {
        if self.sort != sort {
            self.toggle_sort();
        }
    }

    fn rederive(&mut self) {
        self.filtered = self
            .snapshot
            .iter()
            .filter(|record| record.matches(&self.criteria))
            .cloned()
            .collect();
        self.apply_sort();
        self.groups = R::regroup(&self.filtered);
    }

    fn apply_sort(&mut self) {
        let sort = self.sort;
        // Stable: records without a key keep their relative order
        self.filtered.sort_by(|a, b| {
            let ordering = a.sort_key().cmp(&b.sort_key());
            match sort {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    pub fn open_create(&mut self) {
        self.reset_form();
        self.modal = ModalState::CreateOpen;
    }

    /// Opens the edit form seeded with an owned copy of the record's fields.
    pub fn open_edit(&mut self, record: &R) {
        self.close_modal_at = None;
        self.form = record.to_request();
        self.modal = ModalState::EditOpen(record.id());
    }

    pub fn close(&mut self) {
        self.modal = ModalState::Closed;
        self.reset_form();
        self.error_message = None;
        self.success_message = None;
    }

    fn reset_form(&mut self) {
        self.form = R::Request::default();
        self.close_modal_at = None;
    }

    /// Validates the form, then creates or updates depending on the modal
    /// mode and reloads the full list.
    pub async fn submit(&mut self) -> Result<R, ConsoleError> {
        if let Err(err) = R::validate(&self.form) {
            self.error_message = Some(err.to_string());
            return Err(err);
        }

        self.error_message = None;
        self.success_message = None;

        let (result, action) = match self.modal.clone() {
            ModalState::EditOpen(id) => (self.gateway.update(&id, &self.form).await, "update"),
            ModalState::CreateOpen | ModalState::Closed => {
                if let Some(username) = self.session.username() {
                    R::stamp_creator(&mut self.form, &username);
                }
                (self.gateway.create(&self.form).await, "create")
            }
        };

        match result {
            Ok(record) => {
                info!(resource = R::LABEL, id = %record.id(), action, "record saved");
                self.success_message = Some(format!("{} {}d successfully", capitalize(R::LABEL), action));
                self.reload_after_mutation().await;
                self.close_modal_at = Some(Instant::now() + self.modal_close_delay);
                Ok(record)
            }
            Err(err) => {
                warn!(resource = R::LABEL, action, error = %err, "save failed");
                self.error_message = Some(err.display_message(&format!("Failed to {} {}", action, R::LABEL)));
                Err(err)
            }
        }
    }

    /// Deletes after confirmation. Returns `Ok(false)` when the operator
    /// declines; no request is issued in that case.
    pub async fn remove<C: Confirm + ?Sized>(&mut self, id: &R::Id, confirm: &C) -> Result<bool, ConsoleError> {
        if !confirm.confirm(&format!("Are you sure you want to delete this {}?", R::LABEL)) {
            debug!(resource = R::LABEL, %id, "delete declined");
            return Ok(false);
        }

        match self.gateway.delete(id).await {
            Ok(()) => {
                info!(resource = R::LABEL, %id, "record deleted");
                self.success_message = Some(format!("{} deleted successfully", capitalize(R::LABEL)));
                self.reload_after_mutation().await;
                self.clear_success_at = Some(Instant::now() + self.message_clear_delay);
                Ok(true)
            }
            Err(err) => {
                warn!(resource = R::LABEL, %id, error = %err, "delete failed");
                self.error_message = Some(err.display_message(&format!("Failed to delete {}", R::LABEL)));
                Err(err)
            }
        }
    }

    async fn reload_after_mutation(&mut self) {
        // The load error is already on display; the mutation itself succeeded
        if let Err(err) = self.load().await {
            debug!(resource = R::PLURAL, error = %err, "reload after mutation failed");
        }
    }

    /// Applies deferred transitions that are due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.close_modal_at.is_some_and(|at| at <= now) {
            self.close_modal_at = None;
            self.close();
        }
        if self.clear_success_at.is_some_and(|at| at <= now) {
            self.clear_success_at = None;
            self.success_message = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Calls seen by a [`FakeGateway`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call<Id, Req> {
        List,
        Create(Req),
        Update(Id, Req),
        Delete(Id),
    }

    /// In-memory gateway: serves `records`, records calls, fails on demand.
    pub struct FakeGateway<R: Resource> {
        pub records: Mutex<Vec<R>>,
        pub calls: Mutex<Vec<Call<R::Id, R::Request>>>,
        pub fail_with: Mutex<Option<(u16, String)>>,
        pub created: Mutex<Option<R>>,
    }

    impl<R: Resource> FakeGateway<R> {
        pub fn new(records: Vec<R>) -> Self {
            Self {
                records: Mutex::new(records),
                calls: Mutex::new(Vec::new()),
                fail_with: Mutex::new(None),
                created: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> Vec<Call<R::Id, R::Request>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn fail_next(&self, status: u16, body: &str) {
            *self.fail_with.lock().unwrap() = Some((status, body.to_string()));
        }

        fn check(&self) -> Result<(), ConsoleError> {
            match self.fail_with.lock().unwrap().take() {
                Some((status, body)) => Err(ConsoleError::from_response(status, &body)),
                None => Ok(()),
            }
        }

        fn first(&self) -> R {
            self.created
                .lock()
                .unwrap()
                .clone()
                .or_else(|| self.records.lock().unwrap().first().cloned())
                .expect("fake gateway needs a record to echo")
        }
    }

    #[async_trait]
    impl<R: Resource> ResourceGateway<R> for FakeGateway<R> {
        async fn list(&self) -> Result<Vec<R>, ConsoleError> {
            self.calls.lock().unwrap().push(Call::List);
            self.check()?;
            Ok(self.records.lock().unwrap().clone())
        }

        async fn get_by_key(&self, _key: &R::Key) -> Result<R, ConsoleError> {
            self.check()?;
            Ok(self.first())
        }

        async fn create(&self, request: &R::Request) -> Result<R, ConsoleError> {
            self.calls.lock().unwrap().push(Call::Create(request.clone()));
            self.check()?;
            Ok(self.first())
        }

        async fn update(&self, id: &R::Id, request: &R::Request) -> Result<R, ConsoleError> {
            self.calls.lock().unwrap().push(Call::Update(id.clone(), request.clone()));
            self.check()?;
            Ok(self.first())
        }

        async fn delete(&self, id: &R::Id) -> Result<(), ConsoleError> {
            self.calls.lock().unwrap().push(Call::Delete(id.clone()));
            self.check()?;
            self.records.lock().unwrap().retain(|record| &record.id() != id);
            Ok(())
        }
    }

    pub fn controller<R: ListResource>(records: Vec<R>) -> ListController<R, FakeGateway<R>> {
        ListController::new(FakeGateway::new(records), Arc::new(Session::in_memory()), &UiConfig::default())
    }
}
