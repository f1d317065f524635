//! Message types for actor communication.

use std::collections::HashMap;

use ractor::RpcReplyPort;
use ready_core::{JobContext, ReadyEvent};
use ready_queue::EligibleJobs;
use tokio::sync::broadcast;

/// Messages for the ReadyQueueActor.
#[derive(Debug)]
pub enum ReadyMessage {
    /// Queue a trigger of a job. Replies with the unique entry name.
    Enqueue {
        job_name: String,
        reply: RpcReplyPort<Result<String, String>>,
    },

    /// Run one resolve pass, excluding the jobs of `ineligible`.
    Resolve {
        ineligible: Vec<JobContext>,
        reply: RpcReplyPort<Result<EligibleJobs, String>>,
    },

    /// Delete dispatched entries.
    Remove {
        unique_names: Vec<String>,
        reply: RpcReplyPort<Result<(), String>>,
    },

    /// Queued entries per job.
    ReadyCounts {
        reply: RpcReplyPort<Result<HashMap<String, usize>, String>>,
    },

    /// Subscribe to ready queue events.
    Subscribe {
        reply: RpcReplyPort<broadcast::Receiver<ReadyEvent>>,
    },
}
