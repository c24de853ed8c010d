//! Background pathfinding: one-off tasks and a worker-pool pipeline.
//!
//! Searches run against an `Arc<NavGraph>` snapshot, never the live tiles,
//! and every worker owns its own [`PathFinder`] scratch state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, unbounded};
use hexsphere_config::{EdgeCostModel, NavConfig};
use hexsphere_tiles::TileId;
use tracing::{debug, warn};

use crate::graph::NavGraph;
use crate::pathfinder::{PathFinder, TilePath};

/// A single search running on its own thread.
#[derive(Debug)]
pub struct PathTask {
    receiver: Receiver<TilePath>,
    handle: Option<JoinHandle<()>>,
}

impl PathTask {
    /// Returns the path if the search has finished, without blocking.
    ///
    /// Yields the result at most once.
    pub fn try_result(&mut self) -> Option<TilePath> {
        match self.receiver.try_recv() {
            Ok(path) => {
                self.join();
                Some(path)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks until the search finishes.
    ///
    /// A search thread that died without answering counts as "no path".
    pub fn wait(mut self) -> TilePath {
        let path = self.receiver.recv().unwrap_or_default();
        self.join();
        path
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("path search thread panicked");
        }
    }
}

/// Starts a search on a background thread and returns immediately.
pub fn find_path_async(
    graph: Arc<NavGraph>,
    start: TileId,
    goal: TileId,
    cost_model: EdgeCostModel,
) -> PathTask {
    let (tx, rx) = bounded(1);
    let handle = std::thread::spawn(move || {
        let path = PathFinder::new().find(&graph, start, goal, cost_model);
        let _ = tx.send(path);
    });
    PathTask {
        receiver: rx,
        handle: Some(handle),
    }
}

/// A search submitted to a [`PathfindingPipeline`].
#[derive(Clone, Debug)]
pub struct PathRequest {
    /// Caller-chosen id used to match results to requests.
    pub request_id: u64,
    /// Sphere build generation the snapshot was taken from.
    pub generation: u64,
    /// Snapshot to search.
    pub graph: Arc<NavGraph>,
    /// First tile.
    pub start: TileId,
    /// Last tile.
    pub goal: TileId,
}

/// A finished search.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Id of the originating request.
    pub request_id: u64,
    /// Sphere build generation the snapshot was taken from.
    pub generation: u64,
    /// First tile.
    pub start: TileId,
    /// Last tile.
    pub goal: TileId,
    /// The path, empty if unreachable.
    pub path: TilePath,
}

/// Asynchronous pathfinding backed by a thread pool.
///
/// Callers submit [`PathRequest`]s carrying a graph snapshot and collect
/// [`PathResult`]s with [`drain_results`](Self::drain_results). Results carry
/// the sphere generation so answers computed against a deleted or rebuilt
/// sphere can be discarded.
pub struct PathfindingPipeline {
    /// Channel sender for submitting requests to workers.
    task_sender: Option<Sender<PathRequest>>,
    /// Channel receiver for collecting completed results.
    result_receiver: Receiver<PathResult>,
    /// Handles to the worker threads (for shutdown).
    worker_handles: Vec<JoinHandle<()>>,
    /// Maximum number of requests that can be in flight simultaneously.
    budget: usize,
    /// Current number of in-flight requests.
    in_flight: Arc<AtomicUsize>,
}

impl PathfindingPipeline {
    /// Spawns `worker_count` search threads accepting up to `budget` queued requests.
    pub fn new(worker_count: usize, budget: usize, cost_model: EdgeCostModel) -> Self {
        let (task_tx, task_rx) = bounded::<PathRequest>(budget.max(1));
        let (result_tx, result_rx) = unbounded();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(worker_count);
        for worker in 0..worker_count {
            let rx = task_rx.clone();
            let tx = result_tx.clone();
            let flight = Arc::clone(&in_flight);

            handles.push(std::thread::spawn(move || {
                let mut finder = PathFinder::new();
                while let Ok(request) = rx.recv() {
                    let path = finder.find(&request.graph, request.start, request.goal, cost_model);
                    let _ = tx.send(PathResult {
                        request_id: request.request_id,
                        generation: request.generation,
                        start: request.start,
                        goal: request.goal,
                        path,
                    });
                    flight.fetch_sub(1, Ordering::Relaxed);
                }
                debug!(worker, "path worker stopped");
            }));
        }

        Self {
            task_sender: Some(task_tx),
            result_receiver: result_rx,
            worker_handles: handles,
            budget,
            in_flight,
        }
    }

    /// Builds a pipeline from the navigation settings.
    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(config.worker_threads.max(1), config.queue_budget, config.edge_cost)
    }

    /// Submit a request. Returns `false` if the budget is exhausted or the
    /// pipeline has been shut down.
    ///
    /// Safe to call from several threads; the budget is never exceeded.
    pub fn submit(&self, request: PathRequest) -> bool {
        let Some(sender) = &self.task_sender else {
            return false;
        };
        if !try_reserve(&self.in_flight, self.budget) {
            return false;
        }
        if sender.send(request).is_err() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Drain all completed results without blocking.
    pub fn drain_results(&self) -> Vec<PathResult> {
        self.result_receiver.try_iter().collect()
    }

    /// Number of requests currently queued or being searched.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Shut down all worker threads gracefully.
    ///
    /// Queued requests are still searched before the workers exit.
    pub fn shutdown(&mut self) {
        self.task_sender.take();
        for handle in self.worker_handles.drain(..) {
            if handle.join().is_err() {
                warn!("path worker panicked");
            }
        }
    }
}

/// Takes one slot of `budget`, failing if every slot is taken.
fn try_reserve(in_flight: &AtomicUsize, budget: usize) -> bool {
    in_flight
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
            (n < budget).then_some(n + 1)
        })
        .is_ok()
}

impl Drop for PathfindingPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}
