//! Actor serializing ready queue calls made within one process.

use std::collections::HashMap;
use std::marker::PhantomData;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use ready_core::{EntryOutcome, JobContext, ReadyEvent};
use ready_queue::{CoordinatorRegistry, EligibleJobs, RegistryReadyService};
use tokio::sync::broadcast;

use crate::messages::ReadyMessage;

/// Capacity of the event channel. Slow subscribers observe a lag error.
const EVENT_CAPACITY: usize = 1024;

/// State for the ready queue actor.
pub struct ReadyActorState<S> {
    /// Service doing the actual registry work.
    pub service: RegistryReadyService<S>,
    /// Event broadcaster.
    event_tx: broadcast::Sender<ReadyEvent>,
}

impl<S: CoordinatorRegistry> ReadyActorState<S> {
    pub fn new(service: RegistryReadyService<S>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { service, event_tx }
    }

    /// Broadcast an event. Having no subscribers is fine.
    fn broadcast(&self, event: ReadyEvent) {
        tracing::trace!("{}", event.description());
        let _ = self.event_tx.send(event);
    }

    async fn enqueue(&self, job_name: &str) -> Result<String, String> {
        let entry = self
            .service
            .enqueue(job_name)
            .await
            .map_err(|e| e.to_string())?;
        self.broadcast(ReadyEvent::enqueued(&entry));
        Ok(entry.unique_name().to_string())
    }

    async fn resolve(&self, ineligible: &[JobContext]) -> Result<EligibleJobs, String> {
        let outcomes = self
            .service
            .scan(ineligible)
            .await
            .map_err(|e| e.to_string())?;

        let mut eligible = EligibleJobs::new();
        for (entry, outcome) in outcomes {
            self.broadcast(ReadyEvent::from_outcome(&entry, &outcome));
            if let EntryOutcome::Selected(context) = outcome {
                eligible.insert(entry.unique_name().to_string(), context);
            }
        }
        Ok(eligible)
    }

    async fn remove(&self, unique_names: Vec<String>) -> Result<(), String> {
        if unique_names.is_empty() {
            return Ok(());
        }
        self.service
            .remove(&unique_names)
            .await
            .map_err(|e| e.to_string())?;
        self.broadcast(ReadyEvent::Removed {
            unique_names,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn ready_counts(&self) -> Result<HashMap<String, usize>, String> {
        self.service
            .ready_job_counts()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Ready queue actor over a registry of type `S`.
pub struct ReadyQueueActor<S> {
    _registry: PhantomData<fn() -> S>,
}

impl<S> ReadyQueueActor<S> {
    pub fn new() -> Self {
        Self {
            _registry: PhantomData,
        }
    }
}

impl<S> Default for ReadyQueueActor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CoordinatorRegistry> Actor for ReadyQueueActor<S> {
    type Msg = ReadyMessage;
    type State = ReadyActorState<S>;
    type Arguments = RegistryReadyService<S>;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            "Starting ready queue actor on {}",
            args.layout().ready_root()
        );
        Ok(ReadyActorState::new(args))
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            ReadyMessage::Enqueue { job_name, reply } => {
                let _ = reply.send(state.enqueue(&job_name).await);
            }

            ReadyMessage::Resolve { ineligible, reply } => {
                let result = state.resolve(&ineligible).await;
                if let Err(ref e) = result {
                    tracing::warn!("Resolve pass failed: {}", e);
                }
                let _ = reply.send(result);
            }

            ReadyMessage::Remove {
                unique_names,
                reply,
            } => {
                let _ = reply.send(state.remove(unique_names).await);
            }

            ReadyMessage::ReadyCounts { reply } => {
                let _ = reply.send(state.ready_counts().await);
            }

            ReadyMessage::Subscribe { reply } => {
                let _ = reply.send(state.event_tx.subscribe());
            }
        }

        Ok(())
    }
}

/// Spawn a ready queue actor around `service`.
pub async fn start_ready_actor<S: CoordinatorRegistry>(
    service: RegistryReadyService<S>,
    name: Option<String>,
) -> Result<(ActorRef<ReadyMessage>, tokio::task::JoinHandle<()>), ractor::SpawnErr> {
    let (actor, handle) = Actor::spawn(name, ReadyQueueActor::<S>::new(), service).await?;

    Ok((actor, handle))
}
