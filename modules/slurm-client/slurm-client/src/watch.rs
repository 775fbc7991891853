//! Polling watchers for jobs, nodes and partitions.
//!
//! A watcher lists the collection every `poll_interval`, diffs it against the
//! previous snapshot, and pushes events into a bounded channel. The first
//! poll only seeds the snapshot. Sends wait for capacity but give up as soon
//! as the context is done, so a slow consumer never blocks shutdown.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use slurm_client_sdk::{
    Job, JobEvent, JobEventKind, JobState, JobWatchOptions, Node, NodeEvent, NodeEventKind,
    NodeState, NodeWatchOptions, Partition, PartitionEvent, PartitionEventKind, PartitionState,
    PartitionWatchOptions, RequestContext, SlurmError,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    #[serde(with = "slurm_retry::humantime_serde")]
    pub poll_interval: Duration,
    /// Event channel capacity.
    pub buffer: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            buffer: 100,
        }
    }
}

impl WatchConfig {
    /// This config with a per-watch interval override applied.
    #[must_use]
    pub fn with_interval(self, interval: Option<Duration>) -> Self {
        Self {
            poll_interval: interval.unwrap_or(self.poll_interval),
            ..self
        }
    }
}

/// Turns successive snapshots into change events.
pub(crate) trait Tracker: Send + 'static {
    type Item: Send + 'static;
    type Event: Send + 'static;

    fn apply(&mut self, items: Vec<Self::Item>) -> Vec<Self::Event>;
}

/// Spawn the poll loop and return the event receiver.
///
/// `fetch` is called with a clone of `ctx` once per interval. Poll failures
/// are logged and the loop carries on; it ends when the context is done or
/// the receiver is dropped.
pub(crate) fn spawn_poller<T, F, Fut>(
    ctx: RequestContext,
    config: WatchConfig,
    mut fetch: F,
    mut tracker: T,
) -> mpsc::Receiver<T::Event>
where
    T: Tracker,
    F: FnMut(RequestContext) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<T::Item>, SlurmError>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.buffer.max(1));
    tokio::spawn(async move {
        loop {
            if ctx.check().is_err() || tx.is_closed() {
                break;
            }
            match fetch(ctx.clone()).await {
                Ok(items) => {
                    for event in tracker.apply(items) {
                        tokio::select! {
                            biased;
                            _ = ctx.done() => return,
                            sent = tx.send(event) => {
                                if sent.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                }
                Err(SlurmError::Cancelled { .. } | SlurmError::DeadlineExceeded { .. }) => break,
                Err(e) => warn!(
                    version = %e.version(),
                    operation = %e.operation(),
                    error = %e,
                    "watch poll failed"
                ),
            }
            tokio::select! {
                biased;
                _ = ctx.done() => break,
                () = tx.closed() => break,
                () = tokio::time::sleep(config.poll_interval) => {}
            }
        }
        debug!("watch stopped");
    });
    rx
}

pub(crate) struct JobTracker {
    opts: JobWatchOptions,
    seen: HashMap<u32, Vec<JobState>>,
    seeded: bool,
}

impl JobTracker {
    pub(crate) fn new(opts: JobWatchOptions) -> Self {
        Self {
            opts,
            seen: HashMap::new(),
            seeded: false,
        }
    }

    fn wants_state(&self, state: &[JobState]) -> bool {
        self.opts.states.is_empty() || state.iter().any(|s| self.opts.states.contains(s))
    }
}

impl Tracker for JobTracker {
    type Item = Job;
    type Event = JobEvent;

    fn apply(&mut self, jobs: Vec<Job>) -> Vec<JobEvent> {
        let jobs: Vec<Job> = jobs
            .into_iter()
            .filter(|j| self.opts.job_ids.is_empty() || self.opts.job_ids.contains(&j.id))
            .collect();
        if !self.seeded {
            self.seeded = true;
            self.seen = jobs.into_iter().map(|j| (j.id, j.state)).collect();
            return Vec::new();
        }

        let at = Utc::now();
        let mut events = Vec::new();
        let mut current = HashMap::with_capacity(jobs.len());
        for job in jobs {
            current.insert(job.id, job.state.clone());
            let (kind, previous_state) = match self.seen.get(&job.id) {
                None if self.opts.exclude_new => continue,
                None => (JobEventKind::New, Vec::new()),
                Some(previous) if *previous == job.state => continue,
                Some(previous) => (JobEventKind::StateChanged, previous.clone()),
            };
            if !self.wants_state(&job.state) {
                continue;
            }
            events.push(JobEvent {
                kind,
                job_id: job.id,
                previous_state,
                new_state: job.state.clone(),
                at,
                job: Some(job),
            });
        }
        if !self.opts.exclude_completed {
            let mut gone: Vec<(&u32, &Vec<JobState>)> = self
                .seen
                .iter()
                .filter(|(id, _)| !current.contains_key(*id))
                .collect();
            gone.sort_by_key(|(id, _)| **id);
            events.extend(gone.into_iter().map(|(id, state)| JobEvent {
                kind: JobEventKind::Completed,
                job_id: *id,
                previous_state: state.clone(),
                new_state: Vec::new(),
                at,
                job: None,
            }));
        }
        self.seen = current;
        events
    }
}

pub(crate) struct NodeTracker {
    opts: NodeWatchOptions,
    seen: HashMap<String, Vec<NodeState>>,
    seeded: bool,
}

impl NodeTracker {
    pub(crate) fn new(opts: NodeWatchOptions) -> Self {
        Self {
            opts,
            seen: HashMap::new(),
            seeded: false,
        }
    }
}

impl Tracker for NodeTracker {
    type Item = Node;
    type Event = NodeEvent;

    fn apply(&mut self, nodes: Vec<Node>) -> Vec<NodeEvent> {
        let nodes: Vec<Node> = nodes
            .into_iter()
            .filter(|n| self.opts.node_names.is_empty() || self.opts.node_names.contains(&n.name))
            .collect();
        if !self.seeded {
            self.seeded = true;
            self.seen = nodes.into_iter().map(|n| (n.name, n.state)).collect();
            return Vec::new();
        }

        let at = Utc::now();
        let mut events = Vec::new();
        let mut current = HashMap::with_capacity(nodes.len());
        for node in nodes {
            current.insert(node.name.clone(), node.state.clone());
            let (kind, previous_state) = match self.seen.remove(&node.name) {
                None if self.opts.exclude_new => continue,
                None => (NodeEventKind::New, Vec::new()),
                Some(previous) if previous == node.state => continue,
                Some(previous) => (NodeEventKind::StateChanged, previous),
            };
            let wanted = self.opts.states.is_empty()
                || node.state.iter().any(|s| self.opts.states.contains(s));
            if !wanted {
                continue;
            }
            events.push(NodeEvent {
                kind,
                node_name: node.name.clone(),
                previous_state,
                new_state: node.state.clone(),
                at,
                node,
            });
        }
        self.seen = current;
        events
    }
}

pub(crate) struct PartitionTracker {
    opts: PartitionWatchOptions,
    seen: HashMap<String, Vec<PartitionState>>,
    seeded: bool,
}

impl PartitionTracker {
    pub(crate) fn new(opts: PartitionWatchOptions) -> Self {
        Self {
            opts,
            seen: HashMap::new(),
            seeded: false,
        }
    }

    fn wants_state(&self, state: &[PartitionState]) -> bool {
        self.opts.states.is_empty() || state.iter().any(|s| self.opts.states.contains(s))
    }
}

impl Tracker for PartitionTracker {
    type Item = Partition;
    type Event = PartitionEvent;

    fn apply(&mut self, partitions: Vec<Partition>) -> Vec<PartitionEvent> {
        let names = &self.opts.partition_names;
        let partitions: Vec<Partition> = partitions
            .into_iter()
            .filter(|p| names.is_empty() || names.contains(&p.name))
            .collect();
        if !self.seeded {
            self.seeded = true;
            self.seen = partitions.into_iter().map(|p| (p.name, p.state)).collect();
            return Vec::new();
        }

        let at = Utc::now();
        let mut events = Vec::new();
        let mut current = HashMap::with_capacity(partitions.len());
        for partition in partitions {
            current.insert(partition.name.clone(), partition.state.clone());
            let (kind, previous_state) = match self.seen.remove(&partition.name) {
                None if self.opts.exclude_new => continue,
                None => (PartitionEventKind::New, Vec::new()),
                Some(previous) if previous == partition.state => continue,
                Some(previous) => (PartitionEventKind::StateChanged, previous),
            };
            if !self.wants_state(&partition.state) {
                continue;
            }
            events.push(PartitionEvent {
                kind,
                partition_name: partition.name.clone(),
                previous_state,
                new_state: partition.state.clone(),
                at,
                partition: Some(partition),
            });
        }
        if !self.opts.exclude_removed {
            let mut gone: Vec<(String, Vec<PartitionState>)> = self.seen.drain().collect();
            gone.sort_by(|a, b| a.0.cmp(&b.0));
            events.extend(gone.into_iter().map(|(name, state)| PartitionEvent {
                kind: PartitionEventKind::Removed,
                partition_name: name,
                previous_state: state,
                new_state: Vec::new(),
                at,
                partition: None,
            }));
        }
        self.seen = current;
        events
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use slurm_client_sdk::{ApiVersion, EntityKind, Operation, Origin, Verb};

    use super::*;

    fn job(id: u32, state: JobState) -> Job {
        Job {
            id,
            state: vec![state],
            ..Job::default()
        }
    }

    #[test]
    fn first_snapshot_only_seeds() {
        let mut tracker = JobTracker::new(JobWatchOptions::default());
        assert!(tracker.apply(vec![job(1, JobState::Pending)]).is_empty());
    }

    #[test]
    fn job_events_cover_new_changed_and_completed() {
        let mut tracker = JobTracker::new(JobWatchOptions::default());
        tracker.apply(vec![job(1, JobState::Pending), job(2, JobState::Running)]);
        let events = tracker.apply(vec![job(1, JobState::Running), job(3, JobState::Pending)]);
        let kinds: Vec<(JobEventKind, u32)> = events.iter().map(|e| (e.kind, e.job_id)).collect();
        assert_eq!(
            kinds,
            vec![
                (JobEventKind::StateChanged, 1),
                (JobEventKind::New, 3),
                (JobEventKind::Completed, 2),
            ]
        );
        assert_eq!(events[0].previous_state, vec![JobState::Pending]);
        assert!(events[2].job.is_none());
    }

    #[test]
    fn job_filters_apply() {
        let mut tracker = JobTracker::new(JobWatchOptions {
            states: vec![JobState::Failed],
            exclude_new: true,
            exclude_completed: true,
            ..JobWatchOptions::default()
        });
        tracker.apply(vec![job(1, JobState::Running), job(2, JobState::Running)]);
        let events = tracker.apply(vec![job(1, JobState::Failed), job(3, JobState::Failed)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].job_id, 1);
    }

    #[test]
    fn node_state_change() {
        let node = |state| Node {
            name: "c1".to_owned(),
            state: vec![state],
            ..Node::default()
        };
        let mut tracker = NodeTracker::new(NodeWatchOptions::default());
        tracker.apply(vec![node(NodeState::Idle)]);
        assert!(tracker.apply(vec![node(NodeState::Idle)]).is_empty());
        let events = tracker.apply(vec![node(NodeState::Drain)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, NodeEventKind::StateChanged);
        assert_eq!(events[0].previous_state, vec![NodeState::Idle]);
    }

    #[test]
    fn node_that_returns_is_new_again() {
        let node = |name: &str| Node {
            name: name.to_owned(),
            state: vec![NodeState::Idle],
            ..Node::default()
        };
        let mut tracker = NodeTracker::new(NodeWatchOptions::default());
        tracker.apply(vec![node("c1"), node("c2")]);
        assert!(tracker.apply(vec![node("c1")]).is_empty());
        assert_eq!(tracker.seen.len(), 1);

        let events = tracker.apply(vec![node("c1"), node("c2")]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, NodeEventKind::New);
        assert_eq!(events[0].node_name, "c2");
    }

    #[test]
    fn partition_events_cover_changed_and_removed() {
        let partition = |name: &str, state| Partition {
            name: name.to_owned(),
            state: vec![state],
            ..Partition::default()
        };
        let mut tracker = PartitionTracker::new(PartitionWatchOptions::default());
        tracker.apply(vec![
            partition("batch", PartitionState::Up),
            partition("debug", PartitionState::Up),
        ]);
        let events = tracker.apply(vec![partition("batch", PartitionState::Drain)]);
        let kinds: Vec<(PartitionEventKind, &str)> = events
            .iter()
            .map(|e| (e.kind, e.partition_name.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (PartitionEventKind::StateChanged, "batch"),
                (PartitionEventKind::Removed, "debug"),
            ]
        );
        assert_eq!(events[0].previous_state, vec![PartitionState::Up]);
        assert!(events[1].partition.is_none());

        let events = tracker.apply(vec![
            partition("batch", PartitionState::Drain),
            partition("debug", PartitionState::Up),
        ]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, PartitionEventKind::New);
    }

    #[test]
    fn partition_filters_apply() {
        let partition = |name: &str, state| Partition {
            name: name.to_owned(),
            state: vec![state],
            ..Partition::default()
        };
        let mut tracker = PartitionTracker::new(PartitionWatchOptions {
            partition_names: vec!["gpu".to_owned()],
            states: vec![PartitionState::Down],
            exclude_removed: true,
            ..PartitionWatchOptions::default()
        });
        tracker.apply(vec![partition("gpu", PartitionState::Up)]);
        assert!(tracker.apply(vec![partition("batch", PartitionState::Down)]).is_empty());
        let events = tracker.apply(vec![partition("gpu", PartitionState::Down)]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].partition_name, "gpu");
    }

    #[test]
    fn config_parses_humantime() {
        let config: WatchConfig = serde_json::from_str(r#"{"poll_interval": "250ms"}"#).unwrap();
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.buffer, 100);
        let overridden = config.with_interval(Some(Duration::from_secs(1)));
        assert_eq!(overridden.poll_interval, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn poller_emits_and_stops_on_cancel() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let ctx = RequestContext::new();
        let mut rx = spawn_poller(
            ctx.clone(),
            WatchConfig::default(),
            move |_ctx| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let state = if n == 0 {
                    JobState::Pending
                } else {
                    JobState::Running
                };
                async move { Ok(vec![job(7, state)]) }
            },
            JobTracker::new(JobWatchOptions::default()),
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, JobEventKind::StateChanged);
        assert_eq!(event.new_state, vec![JobState::Running]);

        ctx.cancel();
        assert!(rx.recv().await.is_none());
        assert!(polls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_errors_do_not_stop_the_watch() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polls);
        let ctx = RequestContext::new();
        let origin = Origin::new(
            ApiVersion::V0_0_42,
            Operation::new(EntityKind::Job, Verb::Watch),
        );
        let mut rx = spawn_poller(
            ctx.clone(),
            WatchConfig::default(),
            move |_ctx| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    match n {
                        0 => Ok(Vec::new()),
                        1 => Err(SlurmError::Server {
                            origin,
                            failure: slurm_client_sdk::ApiFailure {
                                status: 503,
                                code: slurm_client_sdk::ErrorCode::SlurmDaemonDown,
                                message: "down".to_owned(),
                                details: Vec::new(),
                            },
                        }),
                        _ => Ok(vec![job(9, JobState::Pending)]),
                    }
                }
            },
            JobTracker::new(JobWatchOptions::default()),
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, JobEventKind::New);
        assert_eq!(event.job_id, 9);
        ctx.cancel();
    }
}
