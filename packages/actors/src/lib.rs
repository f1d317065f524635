//! Actor front end for the ready queue.
//!
//! [`ReadyQueueActor`] owns a registry-backed ready queue service and handles
//! its calls one message at a time, broadcasting a [`ReadyEvent`] for every
//! enqueue, every entry outcome of a resolve pass and every removal.
//!
//! The actor only serializes callers inside one process. Instances in other
//! processes still coordinate through the registry.
//!
//! # Usage
//!
//! ```ignore
//! use actors::{ReadyMessage, start_ready_actor};
//! use ready_queue::{MemoryRegistry, ReadyService, RegistryLayout};
//!
//! let service = ReadyService::from_registry(MemoryRegistry::new(), RegistryLayout::default());
//! let (actor, handle) = start_ready_actor(service, Some("ready".into())).await?;
//!
//! let unique_name = actor
//!     .call(|reply| ReadyMessage::Enqueue { job_name: "report".into(), reply }, None)
//!     .await?;
//! ```
//!
//! [`ReadyEvent`]: ready_core::ReadyEvent

mod messages;
mod ready_actor;

pub use messages::ReadyMessage;
pub use ready_actor::{ReadyActorState, ReadyQueueActor, start_ready_actor};

/// Re-export ractor types for convenience.
pub use ractor::{Actor, ActorRef, RpcReplyPort, concurrency};
