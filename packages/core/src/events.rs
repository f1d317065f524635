//! Event types for observers of the ready queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EntryOutcome, SkipReason, UniqueJob};

/// Events emitted while the ready queue is worked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReadyEvent {
    /// A trigger was queued.
    Enqueued {
        unique_name: String,
        job_name: String,
        timestamp: DateTime<Utc>,
    },
    /// An entry whose job configuration is gone was deleted.
    Collected {
        unique_name: String,
        job_name: String,
        timestamp: DateTime<Utc>,
    },
    /// An entry was diverted to the misfire path because its job is running.
    Deferred {
        unique_name: String,
        job_name: String,
        timestamp: DateTime<Utc>,
    },
    /// An entry was left queued.
    Skipped {
        unique_name: String,
        job_name: String,
        reason: SkipReason,
        timestamp: DateTime<Utc>,
    },
    /// An entry was returned for dispatch.
    Selected {
        unique_name: String,
        job_name: String,
        sharding_items: Vec<u32>,
        timestamp: DateTime<Utc>,
    },
    /// Dispatched entries were removed.
    Removed {
        unique_names: Vec<String>,
        timestamp: DateTime<Utc>,
    },
}

impl ReadyEvent {
    /// Event describing an enqueued entry.
    pub fn enqueued(entry: &UniqueJob) -> Self {
        ReadyEvent::Enqueued {
            unique_name: entry.unique_name().to_string(),
            job_name: entry.job_name().to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Event describing the outcome of one entry in a resolve pass.
    pub fn from_outcome(entry: &UniqueJob, outcome: &EntryOutcome) -> Self {
        let unique_name = entry.unique_name().to_string();
        let job_name = entry.job_name().to_string();
        let timestamp = Utc::now();
        match outcome {
            EntryOutcome::Collected => ReadyEvent::Collected {
                unique_name,
                job_name,
                timestamp,
            },
            EntryOutcome::Deferred => ReadyEvent::Deferred {
                unique_name,
                job_name,
                timestamp,
            },
            EntryOutcome::Skipped(reason) => ReadyEvent::Skipped {
                unique_name,
                job_name,
                reason: *reason,
                timestamp,
            },
            EntryOutcome::Selected(context) => ReadyEvent::Selected {
                unique_name,
                job_name,
                sharding_items: context.assigned_sharding_items.clone(),
                timestamp,
            },
        }
    }

    /// Get the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ReadyEvent::Enqueued { timestamp, .. } => *timestamp,
            ReadyEvent::Collected { timestamp, .. } => *timestamp,
            ReadyEvent::Deferred { timestamp, .. } => *timestamp,
            ReadyEvent::Skipped { timestamp, .. } => *timestamp,
            ReadyEvent::Selected { timestamp, .. } => *timestamp,
            ReadyEvent::Removed { timestamp, .. } => *timestamp,
        }
    }

    /// Get the job name associated with this event, if any.
    pub fn job_name(&self) -> Option<&str> {
        match self {
            ReadyEvent::Enqueued { job_name, .. }
            | ReadyEvent::Collected { job_name, .. }
            | ReadyEvent::Deferred { job_name, .. }
            | ReadyEvent::Skipped { job_name, .. }
            | ReadyEvent::Selected { job_name, .. } => Some(job_name.as_str()),
            ReadyEvent::Removed { .. } => None,
        }
    }

    /// Get a short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            ReadyEvent::Enqueued { unique_name, .. } => format!("Entry {} enqueued", unique_name),
            ReadyEvent::Collected { unique_name, .. } => {
                format!("Entry {} collected (no configuration)", unique_name)
            }
            ReadyEvent::Deferred { job_name, .. } => format!("Job {} misfired (running)", job_name),
            ReadyEvent::Skipped {
                unique_name,
                reason,
                ..
            } => format!("Entry {} skipped: {}", unique_name, reason),
            ReadyEvent::Selected {
                unique_name,
                sharding_items,
                ..
            } => format!(
                "Entry {} selected for {} shard(s)",
                unique_name,
                sharding_items.len()
            ),
            ReadyEvent::Removed { unique_names, .. } => {
                format!("{} entr(ies) removed", unique_names.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JobConfiguration, JobContext};

    #[test]
    fn selected_event_carries_sharding_items() {
        let entry = UniqueJob::new("report").expect("valid name");
        let context = JobContext::from_config(JobConfiguration::new("report", "0 * * * * ?", 2));
        let event = ReadyEvent::from_outcome(&entry, &EntryOutcome::Selected(context));
        match &event {
            ReadyEvent::Selected {
                unique_name,
                sharding_items,
                ..
            } => {
                assert_eq!(unique_name.as_str(), entry.unique_name());
                assert_eq!(sharding_items, &vec![0, 1]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(event.job_name(), Some("report"));
    }

    #[test]
    fn events_serialize_with_tag() {
        let entry = UniqueJob::new("report").expect("valid name");
        let event = ReadyEvent::from_outcome(&entry, &EntryOutcome::Skipped(SkipReason::Duplicate));
        let json = serde_json::to_value(&event).expect("serializable event");
        assert_eq!(json["event"], "skipped");
        assert_eq!(json["reason"], "duplicate");
    }

    #[test]
    fn removed_event_has_no_job() {
        let before = Utc::now();
        let event = ReadyEvent::Removed {
            unique_names: vec!["report@-@a".to_string(), "audit@-@b".to_string()],
            timestamp: Utc::now(),
        };
        assert!(event.timestamp() >= before);
        assert_eq!(event.job_name(), None);
        assert_eq!(event.description(), "2 entr(ies) removed");
    }
}
