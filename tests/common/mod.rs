//! In-memory stand-in for the booking backend.
#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;

use travel_admin::confirm::{Confirm, ConfirmPrompt};
use travel_admin::controller::{ControllerOptions, ListController};
use travel_admin::domain::resource::{Endpoints, ResourceKind};
use travel_admin::domain::trip::Tour;
use travel_admin::domain::types::{EntityId, FlagName};
use travel_admin::dto::api::{Acknowledgement, ListPage, ListQuery};
use travel_admin::dto::payload::Payload;
use travel_admin::notifications::{ChannelNotifier, Notification};
use travel_admin::repository::errors::{RepositoryError, RepositoryResult};
use travel_admin::repository::{CollectionReader, CollectionWriter, DashboardReader};

/// A write the backend received.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteCall {
    Create(Payload),
    Update(EntityId, Payload),
    Delete(EntityId),
    SetFlag(EntityId, FlagName, bool),
}

#[derive(Default)]
pub struct FakeBackend {
    records: Mutex<Vec<Value>>,
    list_calls: Mutex<Vec<ListQuery>>,
    writes: Mutex<Vec<WriteCall>>,
    /// Delay applied to upcoming list requests, in issue order.
    list_delays: Mutex<VecDeque<Duration>>,
    /// Rejection message for the next write; `Some(None)` rejects silently.
    reject_next_write: Mutex<Option<Option<String>>>,
    next_id: Mutex<u32>,
}

impl FakeBackend {
    /// `count` tours, `Tour 01` the oldest, alternating between Bhutan and Nepal.
    pub fn with_tours(count: u32) -> Self {
        let records = (1..=count)
            .map(|n| {
                json!({
                    "_id": format!("t{n:02}"),
                    "name": format!("Tour {n:02}"),
                    "destination": if n % 2 == 0 { "Nepal" } else { "Bhutan" },
                    "price": 1000 + n * 10,
                    "isActive": true,
                    "createdAt": format!("2024-01-{n:02}T08:00:00Z"),
                })
            })
            .collect();

        Self {
            records: Mutex::new(records),
            next_id: Mutex::new(count + 1),
            ..Self::default()
        }
    }

    /// Stores `record` exactly as given.
    pub fn insert_record(&self, record: Value) {
        self.records.lock().push(record);
    }

    pub fn delay_next_lists(&self, delays: &[u64]) {
        self.list_delays
            .lock()
            .extend(delays.iter().copied().map(Duration::from_millis));
    }

    pub fn reject_next_write(&self, message: Option<&str>) {
        *self.reject_next_write.lock() = Some(message.map(str::to_string));
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.lock().clone()
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.lock().len()
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().clone()
    }

    pub fn record(&self, id: &str) -> Option<Value> {
        self.records
            .lock()
            .iter()
            .find(|record| record["_id"] == id)
            .cloned()
    }

    fn page(&self, query: &ListQuery) -> ListPage {
        let mut matching: Vec<Value> = self
            .records
            .lock()
            .iter()
            .filter(|record| matches_query(record, query))
            .cloned()
            .collect();

        let field = query.sort.trim_start_matches('-');
        matching.sort_by_key(|record| sort_value(&record[field]));
        if query.sort.starts_with('-') {
            matching.reverse();
        }

        let limit = query.limit.max(1) as usize;
        let total_pages = matching.len().div_ceil(limit) as u32;
        let start = (query.page.saturating_sub(1) as usize) * limit;
        let items = matching.into_iter().skip(start).take(limit).collect();

        ListPage {
            items,
            total_pages: Some(total_pages),
        }
    }

    fn write(&self, call: WriteCall) -> RepositoryResult<()> {
        self.writes.lock().push(call);
        match self.reject_next_write.lock().take() {
            Some(message) => Err(RepositoryError::Rejected(message)),
            None => Ok(()),
        }
    }
}

fn matches_query(record: &Value, query: &ListQuery) -> bool {
    let search_ok = query.search.as_ref().is_none_or(|search| {
        record["name"]
            .as_str()
            .is_some_and(|name| name.to_lowercase().contains(&search.to_lowercase()))
    });
    let filters_ok = query
        .filters
        .iter()
        .all(|(key, value)| sort_value(&record[key.as_str()]) == *value);
    search_ok && filters_ok
}

fn sort_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn payload_fields(payload: &Payload) -> BTreeMap<String, Value> {
    match payload {
        Payload::Json(Value::Object(map)) => map.clone().into_iter().collect(),
        Payload::Json(_) => BTreeMap::new(),
        Payload::Multipart(body) => body
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect(),
    }
}

#[async_trait]
impl CollectionReader for FakeBackend {
    async fn list_records(
        &self,
        _endpoints: &Endpoints,
        query: &ListQuery,
    ) -> RepositoryResult<ListPage> {
        self.list_calls.lock().push(query.clone());
        let delay = self.list_delays.lock().pop_front();
        let page = self.page(query);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(page)
    }
}

#[async_trait]
impl CollectionWriter for FakeBackend {
    async fn create_record(
        &self,
        _endpoints: &Endpoints,
        payload: &Payload,
    ) -> RepositoryResult<Acknowledgement> {
        self.write(WriteCall::Create(payload.clone()))?;

        let id = {
            let mut next = self.next_id.lock();
            let id = format!("t{:02}", *next);
            *next += 1;
            id
        };
        let mut record = payload_fields(payload);
        record.insert("_id".into(), Value::String(id));
        record.insert(
            "createdAt".into(),
            Value::String("2024-12-31T08:00:00Z".into()),
        );
        let record = Value::Object(record.into_iter().collect());
        self.records.lock().push(record.clone());

        Ok(Acknowledgement {
            data: Some(record),
            message: None,
        })
    }

    async fn update_record(
        &self,
        _endpoints: &Endpoints,
        id: &EntityId,
        payload: &Payload,
    ) -> RepositoryResult<Acknowledgement> {
        self.write(WriteCall::Update(id.clone(), payload.clone()))?;

        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|record| record["_id"] == id.as_str())
            .ok_or(RepositoryError::Status {
                status: 404,
                message: Some("Record not found".into()),
            })?;
        for (key, value) in payload_fields(payload) {
            record[key.as_str()] = value;
        }

        Ok(Acknowledgement {
            data: Some(record.clone()),
            message: Some("Record updated".into()),
        })
    }

    async fn delete_record(
        &self,
        _endpoints: &Endpoints,
        id: &EntityId,
    ) -> RepositoryResult<Acknowledgement> {
        self.write(WriteCall::Delete(id.clone()))?;
        self.records
            .lock()
            .retain(|record| record["_id"] != id.as_str());
        Ok(Acknowledgement::default())
    }

    async fn set_flag(
        &self,
        _endpoints: &Endpoints,
        id: &EntityId,
        flag: &FlagName,
        value: bool,
    ) -> RepositoryResult<Acknowledgement> {
        self.write(WriteCall::SetFlag(id.clone(), flag.clone(), value))?;
        if let Some(record) = self
            .records
            .lock()
            .iter_mut()
            .find(|record| record["_id"] == id.as_str())
        {
            record[flag.as_str()] = Value::Bool(value);
        }
        Ok(Acknowledgement::default())
    }
}

#[async_trait]
impl DashboardReader for FakeBackend {
    async fn resource_counts(&self, _endpoint: &str) -> RepositoryResult<BTreeMap<String, u64>> {
        let tours = self.records.lock().len() as u64;
        Ok(BTreeMap::from([("tours".to_string(), tours)]))
    }
}

/// Answers every prompt the same way and remembers what was asked.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().push(prompt.clone());
        self.answer
    }
}

pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub confirm: Arc<ScriptedConfirm>,
    pub controller: ListController<Tour, FakeBackend>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

impl Harness {
    pub fn tours(count: u32, confirm_answer: bool) -> Self {
        let backend = Arc::new(FakeBackend::with_tours(count));
        let confirm = Arc::new(ScriptedConfirm::new(confirm_answer));
        let (notifier, notifications) = ChannelNotifier::new();
        let controller = ListController::new(
            backend.clone(),
            ControllerOptions::for_kind(ResourceKind::Tours),
            Arc::new(notifier),
            confirm.clone(),
        );

        Self {
            backend,
            confirm,
            controller,
            notifications,
        }
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            out.push(notification);
        }
        out
    }
}
