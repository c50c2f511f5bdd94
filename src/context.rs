//! Application-level state shared between screens.
//!
//! Sidebar counts have exactly one writer, the dashboard refresher, which owns
//! the [`SidebarCountsWriter`]. Every other screen holds a cloneable
//! [`SidebarCountsReader`].

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;

use crate::confirm::Confirm;
use crate::controller::{ControllerOptions, ListController};
use crate::domain::entity::Entity;
use crate::domain::resource::{Endpoints, ResourceKind};
use crate::models::config::ConsoleConfig;
use crate::notifications::Notifier;
use crate::repository::{CollectionReader, CollectionWriter};

/// Number of records per collection, shown next to the sidebar links.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarCounts {
    counts: BTreeMap<ResourceKind, u64>,
}

impl SidebarCounts {
    pub fn new(counts: BTreeMap<ResourceKind, u64>) -> Self {
        Self { counts }
    }

    /// Zero for collections the dashboard did not report.
    pub fn get(&self, kind: ResourceKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u64)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// The only handle able to change the sidebar counts.
#[derive(Debug)]
pub struct SidebarCountsWriter {
    tx: watch::Sender<SidebarCounts>,
}

/// Read access to the latest sidebar counts.
#[derive(Clone, Debug)]
pub struct SidebarCountsReader {
    rx: watch::Receiver<SidebarCounts>,
}

/// Creates the writer/reader pair for a fresh, empty set of counts.
pub fn sidebar_counts() -> (SidebarCountsWriter, SidebarCountsReader) {
    let (tx, rx) = watch::channel(SidebarCounts::default());
    (SidebarCountsWriter { tx }, SidebarCountsReader { rx })
}

impl SidebarCountsWriter {
    pub fn publish(&self, counts: SidebarCounts) {
        self.tx.send_replace(counts);
    }

    pub fn subscribe(&self) -> SidebarCountsReader {
        SidebarCountsReader {
            rx: self.tx.subscribe(),
        }
    }
}

impl SidebarCountsReader {
    pub fn current(&self) -> SidebarCounts {
        self.rx.borrow().clone()
    }

    /// Waits for the next publication. Returns `false` once the writer is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// What every screen receives from the application shell.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: Arc<ConsoleConfig>,
    pub sidebar: SidebarCountsReader,
}

impl AppContext {
    pub fn new(config: ConsoleConfig, sidebar: SidebarCountsReader) -> Self {
        Self {
            config: Arc::new(config),
            sidebar,
        }
    }

    /// Endpoints of `kind`, honouring overrides from the configuration.
    pub fn endpoints(&self, kind: ResourceKind) -> Endpoints {
        self.config.endpoints(kind)
    }

    /// Controller for the list screen of `E`, configured from the console
    /// settings.
    pub fn list_controller<E, R>(
        &self,
        repo: Arc<R>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> ListController<E, R>
    where
        E: Entity,
        R: CollectionReader + CollectionWriter + 'static,
    {
        let options = ControllerOptions::from_config(&self.config, E::KIND);
        ListController::new(repo, options, notifier, confirm)
    }
}
