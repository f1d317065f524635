#![allow(clippy::disallowed_methods)]

mod common;

use std::collections::HashSet;
use std::error::Error;

use common::{DenyJobs, Harness, UnavailableRegistry, context};
use ready_core::{EntryOutcome, JobNameError, SkipReason, UniqueJob};
use ready_queue::{ReadyError, ReadyService, RegistryError, RegistryLayout, Unclaimed};

fn job_names(eligible: &ready_queue::EligibleJobs) -> Vec<String> {
    let mut names: Vec<String> = eligible
        .values()
        .map(|context| context.job_name().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn distinct_jobs_are_all_eligible_and_stay_queued() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("A");
    h.catalog.insert("B");
    let a = h.service.enqueue("A").await?;
    let b = h.service.enqueue("B").await?;

    let eligible = h.service.resolve(&[]).await?;

    assert_eq!(job_names(&eligible), vec!["A", "B"]);
    assert_eq!(eligible[a.unique_name()].job_name(), "A");
    assert_eq!(eligible[b.unique_name()].job_name(), "B");
    assert_eq!(h.queued().await.len(), 2);
    assert!(h.misfired.added().is_empty());
    Ok(())
}

#[tokio::test]
async fn repeated_triggers_yield_one_context() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("A");
    let first = h.service.enqueue("A").await?;
    let second = h.service.enqueue("A").await?;
    assert_ne!(first.unique_name(), second.unique_name());

    let eligible = h.service.resolve(&[]).await?;

    assert_eq!(eligible.len(), 1);
    let key = eligible.keys().next().expect("one entry");
    assert!(key == first.unique_name() || key == second.unique_name());
    assert_eq!(h.queued().await.len(), 2);
    assert_eq!(h.service.ready_job_counts().await?.get("A"), Some(&2));
    Ok(())
}

#[tokio::test]
async fn entries_of_deleted_jobs_are_collected() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("C");
    h.service.enqueue("C").await?;
    h.catalog.delete("C");

    let eligible = h.service.resolve(&[]).await?;

    assert!(eligible.is_empty());
    assert!(h.queued().await.is_empty());
    assert_eq!(h.running.checks(), 0);
    assert!(h.misfired.added().is_empty());
    Ok(())
}

#[tokio::test]
async fn running_job_is_deferred_and_kept() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("D");
    let entry = h.service.enqueue("D").await?;
    h.running.start("D");

    let eligible = h.service.resolve(&[]).await?;

    assert!(eligible.is_empty());
    assert_eq!(h.misfired.added(), vec!["D"]);
    assert_eq!(h.queued().await, vec![entry.unique_name().to_string()]);
    Ok(())
}

#[tokio::test]
async fn misfire_is_recorded_once_per_running_entry() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("D");
    h.service.enqueue("D").await?;
    h.service.enqueue("D").await?;
    h.running.start("D");

    let eligible = h.service.resolve(&[]).await?;

    assert!(eligible.is_empty());
    assert_eq!(h.misfired.added(), vec!["D", "D"]);
    assert_eq!(h.queued().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn excluded_job_is_not_returned_and_stays_queued() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("E");
    h.catalog.insert("F");
    let e = h.service.enqueue("E").await?;
    h.service.enqueue("E").await?;
    h.service.enqueue("F").await?;

    let eligible = h.service.resolve(&[context("E")]).await?;

    assert_eq!(job_names(&eligible), vec!["F"]);
    assert!(!eligible.contains_key(e.unique_name()));
    assert_eq!(h.queued().await.len(), 3);
    Ok(())
}

#[tokio::test]
async fn missing_ready_root_short_circuits() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("A");

    let eligible = h.service.resolve(&[context("A")]).await?;

    assert!(eligible.is_empty());
    assert_eq!(h.catalog.loads(), 0);
    assert_eq!(h.running.checks(), 0);
    assert!(h.misfired.added().is_empty());
    assert!(h.service.ready_job_counts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn removal_is_idempotent() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("A");
    let kept = h.service.enqueue("A").await?;

    h.service.remove(["A@-@missing", "never-queued", ""]).await?;
    h.service.remove(Vec::<String>::new()).await?;

    assert_eq!(h.queued().await, vec![kept.unique_name().to_string()]);

    h.service.remove([kept.unique_name()]).await?;
    h.service.remove([kept.unique_name()]).await?;
    assert!(h.queued().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn dispatch_cycle_drains_the_queue() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("A");
    h.catalog.insert("B");
    h.service.enqueue("A").await?;
    h.service.enqueue("A").await?;
    h.service.enqueue("B").await?;

    let first = h.service.resolve(&[]).await?;
    assert_eq!(first.len(), 2);
    h.service.remove(first.keys()).await?;

    let second = h.service.resolve(&[]).await?;
    assert_eq!(job_names(&second), vec!["A"]);
    h.service.remove(second.keys()).await?;

    assert!(h.queued().await.is_empty());
    assert!(h.service.resolve(&[]).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn deferred_job_converges_once_it_finishes() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("D");
    let entry = h.service.enqueue("D").await?;
    h.running.start("D");

    assert!(h.service.resolve(&[]).await?.is_empty());

    h.running.finish("D");
    let eligible = h.service.resolve(&[]).await?;
    assert!(eligible.contains_key(entry.unique_name()));
    Ok(())
}

#[tokio::test]
async fn scan_reports_every_outcome() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    for job in ["gone", "busy", "twice", "held"] {
        h.catalog.insert(job);
    }
    h.service.enqueue("gone").await?;
    h.service.enqueue("busy").await?;
    h.service.enqueue("twice").await?;
    h.service.enqueue("twice").await?;
    h.service.enqueue("held").await?;
    h.catalog.delete("gone");
    h.running.start("busy");

    let outcomes = h.service.scan(&[context("held")]).await?;
    assert_eq!(outcomes.len(), 5);

    let for_job = |job: &str| -> Vec<&EntryOutcome> {
        outcomes
            .iter()
            .filter(|(entry, _)| entry.job_name() == job)
            .map(|(_, outcome)| outcome)
            .collect()
    };
    assert_eq!(for_job("gone"), vec![&EntryOutcome::Collected]);
    assert_eq!(for_job("busy"), vec![&EntryOutcome::Deferred]);
    assert_eq!(
        for_job("held"),
        vec![&EntryOutcome::Skipped(SkipReason::Ineligible)]
    );
    let twice = for_job("twice");
    assert_eq!(twice.len(), 2);
    assert_eq!(
        twice
            .iter()
            .filter(|outcome| matches!(outcome, EntryOutcome::Selected(_)))
            .count(),
        1
    );
    assert!(twice.contains(&&EntryOutcome::Skipped(SkipReason::Duplicate)));

    assert_eq!(h.queued().await.len(), 4);
    Ok(())
}

#[tokio::test]
async fn denied_claims_stay_queued() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.catalog.insert("A");
    h.catalog.insert("B");
    let a = h.service.enqueue("A").await?;
    h.service.enqueue("B").await?;

    let deny = DenyJobs(HashSet::from(["A".to_string()]));
    let eligible = h.service.resolve_claimed(&[], &deny).await?;
    assert_eq!(job_names(&eligible), vec!["B"]);
    assert!(h.queued().await.contains(&a.unique_name().to_string()));

    let granted = h.service.resolve_claimed(&[], &Unclaimed).await?;
    assert_eq!(job_names(&granted), vec!["A", "B"]);
    Ok(())
}

#[tokio::test]
async fn enqueue_rejects_unencodable_names() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();

    let empty = h.service.enqueue("").await;
    assert!(matches!(
        empty,
        Err(ReadyError::InvalidJobName(JobNameError::Empty))
    ));
    let nested = h.service.enqueue("a/b").await;
    assert!(matches!(
        nested,
        Err(ReadyError::InvalidJobName(JobNameError::Reserved { .. }))
    ));

    // Unconfigured jobs are accepted and collected later.
    h.service.enqueue("unknown").await?;
    assert_eq!(h.queued().await.len(), 1);
    assert!(h.service.resolve(&[]).await?.is_empty());
    assert!(h.queued().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn purge_removes_all_entries_of_one_job() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    h.service.enqueue("A").await?;
    h.service.enqueue("A").await?;
    let b = h.service.enqueue("B").await?;

    assert_eq!(h.service.purge_job("A").await?, 2);
    assert_eq!(h.service.purge_job("A").await?, 0);
    assert_eq!(h.queued().await, vec![b.unique_name().to_string()]);
    Ok(())
}

#[tokio::test]
async fn foreign_entry_names_are_decoded_verbatim() -> Result<(), Box<dyn Error>> {
    use ready_queue::CoordinatorRegistry;

    let h = Harness::new();
    h.catalog.insert("legacy");
    h.registry.persist("/state/ready/legacy", "").await?;

    let eligible = h.service.resolve(&[]).await?;
    assert_eq!(eligible["legacy"].job_name(), "legacy");

    h.service.remove(eligible.keys()).await?;
    assert!(h.queued().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn registry_failures_propagate() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    let registry = UnavailableRegistry::default();
    let service = ReadyService::new(
        registry.clone(),
        RegistryLayout::default(),
        h.catalog.clone(),
        h.running.clone(),
        h.misfired.clone(),
    );
    service.enqueue("C").await?;

    // Orphaned entry: collecting it needs a delete, which fails.
    let collect = service.resolve(&[]).await;
    assert!(matches!(
        collect,
        Err(ReadyError::Registry(RegistryError::Unavailable(_)))
    ));

    let remove = service.remove(["C@-@x"]).await;
    assert!(matches!(
        remove,
        Err(ReadyError::Registry(RegistryError::Unavailable(_)))
    ));

    let listing = ReadyService::new(
        UnavailableRegistry {
            inner: registry.inner.clone(),
            fail_children: true,
        },
        RegistryLayout::default(),
        h.catalog.clone(),
        h.running.clone(),
        h.misfired.clone(),
    );
    assert!(listing.resolve(&[]).await.is_err());
    Ok(())
}

#[tokio::test]
async fn concurrent_instances_never_duplicate_within_a_call() -> Result<(), Box<dyn Error>> {
    let h = Harness::new();
    let peer = h.peer();
    for job in ["A", "B", "C"] {
        h.catalog.insert(job);
    }

    let enqueues = (0..12).map(|i| {
        let service = if i % 2 == 0 { &h.service } else { &peer };
        let job = ["A", "B", "C"][i % 3];
        async move { service.enqueue(job).await }
    });
    let entries: Vec<UniqueJob> = futures_util::future::try_join_all(enqueues).await?;
    assert_eq!(entries.len(), 12);
    assert_eq!(h.queued().await.len(), 12);

    let (left, right) =
        futures_util::future::try_join(h.service.resolve(&[]), peer.resolve(&[])).await?;
    for eligible in [&left, &right] {
        assert_eq!(job_names(eligible), vec!["A", "B", "C"]);
    }
    Ok(())
}
