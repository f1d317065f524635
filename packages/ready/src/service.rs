//! The ready queue service.

use std::collections::HashMap;

use ready_core::{EntryLookup, EntryOutcome, JobContext, UniqueJob, validate_job_name};

use crate::error::Result;
use crate::layout::RegistryLayout;
use crate::plan::ResolutionPlan;
use crate::ports::{ConfigurationCatalog, DispatchClaim, MisfireTracker, RunningTracker};
use crate::registry::CoordinatorRegistry;
use crate::state::{RegistryConfigurationCatalog, RegistryMisfireTracker, RegistryRunningTracker};

/// Entries eligible for dispatch, keyed by unique name.
pub type EligibleJobs = HashMap<String, JobContext>;

/// Service wired to the registry-backed catalog and trackers.
pub type RegistryReadyService<S> = ReadyService<
    S,
    RegistryConfigurationCatalog<S>,
    RegistryRunningTracker<S>,
    RegistryMisfireTracker<S>,
>;

/// Owner of the ready namespace.
///
/// Holds no locks and no background tasks; every call is one bounded pass
/// over the registry. Several instances (in one process or many) may work on
/// the same registry concurrently.
#[derive(Debug, Clone)]
pub struct ReadyService<S, C, R, M> {
    registry: S,
    layout: RegistryLayout,
    catalog: C,
    running: R,
    misfired: M,
}

impl<S: CoordinatorRegistry> RegistryReadyService<S> {
    /// Build a service whose collaborators share the given registry.
    pub fn from_registry(registry: S, layout: RegistryLayout) -> Self {
        let catalog = RegistryConfigurationCatalog::new(registry.clone(), layout.clone());
        let running = RegistryRunningTracker::new(registry.clone(), layout.clone());
        let misfired = RegistryMisfireTracker::new(registry.clone(), layout.clone());
        ReadyService::new(registry, layout, catalog, running, misfired)
    }
}

impl<S, C, R, M> ReadyService<S, C, R, M>
where
    S: CoordinatorRegistry,
    C: ConfigurationCatalog,
    R: RunningTracker,
    M: MisfireTracker,
{
    pub fn new(registry: S, layout: RegistryLayout, catalog: C, running: R, misfired: M) -> Self {
        Self {
            registry,
            layout,
            catalog,
            running,
            misfired,
        }
    }

    pub fn layout(&self) -> &RegistryLayout {
        &self.layout
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn running(&self) -> &R {
        &self.running
    }

    pub fn misfired(&self) -> &M {
        &self.misfired
    }

    /// Queue a trigger of `job_name`.
    ///
    /// Every call adds a new entry, so triggers fired while an older one is
    /// still queued are kept. Whether the job is configured is checked at
    /// resolve time, not here.
    pub async fn enqueue(&self, job_name: &str) -> Result<UniqueJob> {
        let entry = UniqueJob::new(job_name)?;
        self.registry
            .persist(&self.layout.ready_node(entry.unique_name()), "")
            .await?;
        tracing::debug!("Enqueued {}", entry);
        Ok(entry)
    }

    /// Entries eligible for dispatch this pass.
    ///
    /// Jobs of `ineligible` are never returned. Orphaned entries are deleted,
    /// running jobs get a misfire recorded, and every other entry not
    /// returned stays queued. The caller removes what it dispatched.
    pub async fn resolve(&self, ineligible: &[JobContext]) -> Result<EligibleJobs> {
        Ok(Self::selected(self.scan(ineligible).await?))
    }

    /// Like [`resolve`](Self::resolve), then offers every selected entry to
    /// `claim`. Entries whose claim is denied stay queued and are left out.
    pub async fn resolve_claimed<D: DispatchClaim>(
        &self,
        ineligible: &[JobContext],
        claim: &D,
    ) -> Result<EligibleJobs> {
        let mut result = EligibleJobs::new();
        for (entry, outcome) in self.scan(ineligible).await? {
            let EntryOutcome::Selected(context) = outcome else {
                continue;
            };
            if claim.claim(&entry, &context).await? {
                result.insert(entry.unique_name().to_string(), context);
            } else {
                tracing::debug!("Claim denied for {}", entry);
            }
        }
        Ok(result)
    }

    /// One resolve pass returning the outcome of every queued entry.
    ///
    /// Side effects are those of [`resolve`](Self::resolve): collected
    /// entries are deleted and deferred jobs are reported to the misfire
    /// tracker, once per deferred entry.
    pub async fn scan(&self, ineligible: &[JobContext]) -> Result<Vec<(UniqueJob, EntryOutcome)>> {
        let ready_root = self.layout.ready_root();
        if !self.registry.exists(&ready_root).await? {
            return Ok(Vec::new());
        }
        let mut plan = ResolutionPlan::new(ineligible);
        let unique_names = self.registry.children(&ready_root).await?;
        let mut outcomes = Vec::with_capacity(unique_names.len());
        for unique_name in unique_names {
            let entry = UniqueJob::parse(&unique_name);
            let lookup = self.lookup(entry.job_name()).await?;
            let outcome = plan.decide(entry.job_name(), lookup);
            self.apply(&unique_name, &entry, &outcome).await?;
            outcomes.push((entry, outcome));
        }
        let selected = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, EntryOutcome::Selected(_)))
            .count();
        tracing::debug!(
            "Resolved {} ready entr(ies), {} eligible",
            outcomes.len(),
            selected
        );
        Ok(outcomes)
    }

    /// Delete dispatched entries. Absent entries, including the empty name,
    /// are ignored.
    pub async fn remove<I, N>(&self, unique_names: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        for unique_name in unique_names {
            let unique_name = unique_name.as_ref();
            if unique_name.is_empty() {
                continue;
            }
            self.registry
                .remove(&self.layout.ready_node(unique_name))
                .await?;
        }
        Ok(())
    }

    /// Number of queued entries per job.
    pub async fn ready_job_counts(&self) -> Result<HashMap<String, usize>> {
        let ready_root = self.layout.ready_root();
        let mut counts = HashMap::new();
        if !self.registry.exists(&ready_root).await? {
            return Ok(counts);
        }
        for unique_name in self.registry.children(&ready_root).await? {
            let entry = UniqueJob::parse(&unique_name);
            *counts.entry(entry.job_name().to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Delete every queued entry of one job. Returns how many were deleted.
    pub async fn purge_job(&self, job_name: &str) -> Result<usize> {
        validate_job_name(job_name)?;
        let ready_root = self.layout.ready_root();
        if !self.registry.exists(&ready_root).await? {
            return Ok(0);
        }
        let mut purged = 0;
        for unique_name in self.registry.children(&ready_root).await? {
            if UniqueJob::parse(&unique_name).job_name() == job_name {
                self.registry
                    .remove(&self.layout.ready_node(&unique_name))
                    .await?;
                purged += 1;
            }
        }
        if purged > 0 {
            tracing::info!("Purged {} queued trigger(s) of job {}", purged, job_name);
        }
        Ok(purged)
    }

    async fn lookup(&self, job_name: &str) -> Result<EntryLookup> {
        // No configuration can exist under a name that is not a valid path
        // segment, so such entries are orphans.
        if validate_job_name(job_name).is_err() {
            return Ok(EntryLookup::Missing);
        }
        let Some(config) = self.catalog.load(job_name).await? else {
            return Ok(EntryLookup::Missing);
        };
        if self.running.is_running(job_name).await? {
            return Ok(EntryLookup::Running);
        }
        Ok(EntryLookup::Idle(config))
    }

    async fn apply(&self, unique_name: &str, entry: &UniqueJob, outcome: &EntryOutcome) -> Result<()> {
        match outcome {
            EntryOutcome::Collected => {
                self.registry
                    .remove(&self.layout.ready_node(unique_name))
                    .await?;
                tracing::warn!(
                    "Collected ready entry {} of unconfigured job {}",
                    unique_name,
                    entry.job_name()
                );
            }
            EntryOutcome::Deferred => {
                self.misfired.add(entry.job_name()).await?;
                tracing::debug!("Job {} is running, deferred {}", entry.job_name(), unique_name);
            }
            EntryOutcome::Skipped(reason) => {
                tracing::debug!("Skipped {} ({})", unique_name, reason);
            }
            EntryOutcome::Selected(_) => {}
        }
        Ok(())
    }

    fn selected(outcomes: Vec<(UniqueJob, EntryOutcome)>) -> EligibleJobs {
        outcomes
            .into_iter()
            .filter_map(|(entry, outcome)| match outcome {
                EntryOutcome::Selected(context) => Some((entry.unique_name().to_string(), context)),
                _ => None,
            })
            .collect()
    }
}
