#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ready_core::{JobConfiguration, JobContext, UniqueJob};
use ready_queue::{
    ConfigurationCatalog, CoordinatorRegistry, DispatchClaim, MemoryRegistry, MisfireTracker,
    ReadyService, RegistryError, RegistryLayout, Result, RunningTracker,
};

pub const CRON: &str = "0/5 * * * * ?";

pub fn config(job_name: &str) -> JobConfiguration {
    JobConfiguration::new(job_name, CRON, 2)
}

pub fn context(job_name: &str) -> JobContext {
    JobContext::from_config(config(job_name))
}

#[derive(Debug, Clone, Default)]
pub struct FakeCatalog {
    configs: Arc<Mutex<HashMap<String, JobConfiguration>>>,
    loads: Arc<AtomicUsize>,
}

impl FakeCatalog {
    pub fn insert(&self, job_name: &str) {
        self.configs
            .lock()
            .expect("catalog lock")
            .insert(job_name.to_string(), config(job_name));
    }

    pub fn delete(&self, job_name: &str) {
        self.configs.lock().expect("catalog lock").remove(job_name);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ConfigurationCatalog for FakeCatalog {
    async fn load(&self, job_name: &str) -> Result<Option<JobConfiguration>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.configs.lock().expect("catalog lock").get(job_name).cloned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeRunning {
    running: Arc<Mutex<HashSet<String>>>,
    checks: Arc<AtomicUsize>,
}

impl FakeRunning {
    pub fn start(&self, job_name: &str) {
        self.running
            .lock()
            .expect("running lock")
            .insert(job_name.to_string());
    }

    pub fn finish(&self, job_name: &str) {
        self.running.lock().expect("running lock").remove(job_name);
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl RunningTracker for FakeRunning {
    async fn is_running(&self, job_name: &str) -> Result<bool> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.running.lock().expect("running lock").contains(job_name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeMisfire {
    added: Arc<Mutex<Vec<String>>>,
}

impl FakeMisfire {
    pub fn added(&self) -> Vec<String> {
        self.added.lock().expect("misfire lock").clone()
    }
}

impl MisfireTracker for FakeMisfire {
    async fn add(&self, job_name: &str) -> Result<()> {
        self.added
            .lock()
            .expect("misfire lock")
            .push(job_name.to_string());
        Ok(())
    }
}

/// Claim that denies a fixed set of jobs.
#[derive(Debug, Clone, Default)]
pub struct DenyJobs(pub HashSet<String>);

impl DispatchClaim for DenyJobs {
    async fn claim(&self, entry: &UniqueJob, _context: &JobContext) -> Result<bool> {
        Ok(!self.0.contains(entry.job_name()))
    }
}

/// Registry whose reads work but whose writes and listings fail.
#[derive(Debug, Clone, Default)]
pub struct UnavailableRegistry {
    pub inner: MemoryRegistry,
    pub fail_children: bool,
}

impl CoordinatorRegistry for UnavailableRegistry {
    async fn exists(&self, path: &str) -> std::result::Result<bool, RegistryError> {
        self.inner.exists(path).await
    }

    async fn get(&self, path: &str) -> std::result::Result<Option<String>, RegistryError> {
        self.inner.get(path).await
    }

    async fn children(&self, path: &str) -> std::result::Result<Vec<String>, RegistryError> {
        if self.fail_children {
            return Err(RegistryError::Unavailable("connection lost".into()));
        }
        self.inner.children(path).await
    }

    async fn persist(&self, path: &str, value: &str) -> std::result::Result<(), RegistryError> {
        self.inner.persist(path, value).await
    }

    async fn remove(&self, _path: &str) -> std::result::Result<(), RegistryError> {
        Err(RegistryError::Unavailable("connection lost".into()))
    }
}

pub type FakeService = ReadyService<MemoryRegistry, FakeCatalog, FakeRunning, FakeMisfire>;

/// One service with its fakes and the registry behind it.
pub struct Harness {
    pub registry: MemoryRegistry,
    pub catalog: FakeCatalog,
    pub running: FakeRunning,
    pub misfired: FakeMisfire,
    pub service: FakeService,
}

impl Harness {
    pub fn new() -> Self {
        let registry = MemoryRegistry::new();
        let catalog = FakeCatalog::default();
        let running = FakeRunning::default();
        let misfired = FakeMisfire::default();
        let service = ReadyService::new(
            registry.clone(),
            RegistryLayout::default(),
            catalog.clone(),
            running.clone(),
            misfired.clone(),
        );
        Self {
            registry,
            catalog,
            running,
            misfired,
            service,
        }
    }

    /// Another scheduler instance sharing registry and collaborators.
    pub fn peer(&self) -> FakeService {
        ReadyService::new(
            self.registry.clone(),
            RegistryLayout::default(),
            self.catalog.clone(),
            self.running.clone(),
            self.misfired.clone(),
        )
    }

    /// Unique names currently queued.
    pub async fn queued(&self) -> Vec<String> {
        let mut names = self
            .registry
            .children(&self.service.layout().ready_root())
            .await
            .expect("listing ready entries");
        names.sort();
        names
    }
}
