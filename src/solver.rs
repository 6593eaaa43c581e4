//! Best-first search over game states.
//!
//! Key points:
//! - Frontier ordered by score, ties broken by insertion order so runs are
//!   reproducible
//! - FxHashSet of canonical keys for state deduplication
//! - Arena of `MoveRecord`s with parent indices for path reconstruction; a
//!   frontier entry owns its state, which is dropped once expanded
//! - Generated states are checked for a win before the visited set is consulted

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use tracing::info;

use crate::state::{GameState, Move, MoveRecord, StateKey};

/// Examined moves between two progress notifications by default.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Optional caps that stop a search early.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchLimits {
    /// Stop once this many moves have been generated.
    pub max_examined: Option<usize>,
    /// Stop once this much wall-clock time has passed.
    pub time_limit: Option<Duration>,
}

/// Solver tuning.
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Examined moves between two observer notifications.
    pub progress_interval: usize,
    pub limits: SearchLimits,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            limits: SearchLimits::default(),
        }
    }
}

/// Snapshot handed to a [`SearchObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Moves generated so far.
    pub examined: usize,
    /// Score of the entry just taken off the frontier.
    pub best_score: u32,
    /// Moves taken to reach that entry's state.
    pub moves_taken: u32,
    pub frontier_size: usize,
}

/// Receives periodic progress while a search runs.
pub trait SearchObserver {
    fn on_progress(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> SearchObserver for F {
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that reports progress as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl SearchObserver for LogProgress {
    fn on_progress(&mut self, progress: &Progress) {
        info!(
            event = "search_progress",
            examined = progress.examined,
            best_score = progress.best_score,
            moves_taken = progress.moves_taken,
            frontier = progress.frontier_size,
        );
    }
}

/// A winning line of play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves from the initial state to the win; empty if it was already won.
    pub moves: Vec<MoveRecord>,
    /// Score of the winning state.
    pub score: u32,
    /// Moves generated before the win was found.
    pub examined: usize,
}

/// Why a search stopped before reaching a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    MaxExamined(usize),
    TimeLimit(Duration),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxExamined(limit) => write!(f, "examined {limit} moves"),
            StopReason::TimeLimit(limit) => write!(f, "ran for {:.1}s", limit.as_secs_f64()),
        }
    }
}

/// Result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// Every reachable state was explored without finding a win.
    Unsolvable { examined: usize },
    /// A [`SearchLimits`] cap was hit first.
    Cancelled { examined: usize, reason: StopReason },
}

impl Outcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Moves generated during the search.
    pub fn examined(&self) -> usize {
        match self {
            Outcome::Solved(solution) => solution.examined,
            Outcome::Unsolvable { examined } | Outcome::Cancelled { examined, .. } => *examined,
        }
    }
}

/// An arena slot: a generated move and the slot that produced its source state.
#[derive(Clone, Copy)]
struct SearchNode {
    record: MoveRecord,
    /// `None` when the move starts from the initial state.
    parent: Option<usize>,
}

/// A state waiting on the frontier.
struct FrontierEntry {
    score: u32,
    /// Insertion order, breaks score ties first-in first-out.
    sequence: u64,
    node: usize,
    state: GameState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.sequence == other.sequence
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search bookkeeping for a single run.
struct Search<'a, O: SearchObserver> {
    config: &'a SolverConfig,
    observer: O,
    arena: Vec<SearchNode>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    visited: FxHashSet<StateKey>,
    examined: usize,
    last_report: usize,
    next_sequence: u64,
    started: Instant,
}

impl<'a, O: SearchObserver> Search<'a, O> {
    fn new(config: &'a SolverConfig, observer: O) -> Self {
        Self {
            config,
            observer,
            arena: Vec::new(),
            frontier: BinaryHeap::new(),
            visited: FxHashSet::default(),
            examined: 0,
            last_report: 0,
            next_sequence: 0,
            started: Instant::now(),
        }
    }

    /// Records a generated move. Returns the arena index if it is a win.
    fn admit(&mut self, candidate: Move, parent: Option<usize>) -> Option<usize> {
        self.examined += 1;
        let node = self.arena.len();
        self.arena.push(SearchNode {
            record: candidate.record,
            parent,
        });

        // a win must be caught here, before its key could collide with a visited state
        if candidate.state.is_win() {
            return Some(node);
        }

        self.frontier.push(Reverse(FrontierEntry {
            score: candidate.record.score,
            sequence: self.next_sequence,
            node,
            state: candidate.state,
        }));
        self.next_sequence += 1;
        None
    }

    /// Expands every move in `moves`, stopping at the first win.
    fn admit_all(&mut self, moves: Vec<Move>, parent: Option<usize>) -> Option<usize> {
        moves
            .into_iter()
            .find_map(|candidate| self.admit(candidate, parent))
    }

    fn limit_reached(&self) -> Option<StopReason> {
        let limits = &self.config.limits;
        if let Some(max) = limits.max_examined {
            if self.examined >= max {
                return Some(StopReason::MaxExamined(max));
            }
        }
        if let Some(limit) = limits.time_limit {
            if self.started.elapsed() >= limit {
                return Some(StopReason::TimeLimit(limit));
            }
        }
        None
    }

    fn report_progress(&mut self, entry: &FrontierEntry) {
        if self.examined - self.last_report < self.config.progress_interval.max(1) {
            return;
        }
        self.last_report = self.examined;
        self.observer.on_progress(&Progress {
            examined: self.examined,
            best_score: entry.score,
            moves_taken: entry.state.moves_taken(),
            frontier_size: self.frontier.len(),
        });
    }

    /// Walks parent links from `node` back to the initial state.
    fn reconstruct(&self, node: usize) -> Vec<MoveRecord> {
        let mut moves = Vec::new();
        let mut current = Some(node);
        while let Some(index) = current {
            let slot = &self.arena[index];
            moves.push(slot.record);
            current = slot.parent;
        }
        moves.reverse();
        moves
    }

    fn solved(&self, node: usize) -> Outcome {
        let moves = self.reconstruct(node);
        let score = self.arena[node].record.score;
        Outcome::Solved(Solution {
            moves,
            score,
            examined: self.examined,
        })
    }

    fn run(mut self, initial: &GameState) -> Outcome {
        if initial.is_win() {
            return Outcome::Solved(Solution {
                moves: Vec::new(),
                score: initial.score(),
                examined: 0,
            });
        }

        self.visited.insert(initial.canonical_key());
        if let Some(node) = self.admit_all(initial.list_available_moves(), None) {
            return self.solved(node);
        }

        while let Some(Reverse(entry)) = self.frontier.pop() {
            if let Some(reason) = self.limit_reached() {
                return Outcome::Cancelled {
                    examined: self.examined,
                    reason,
                };
            }
            self.report_progress(&entry);

            // only expand states that have not been seen before
            if !self.visited.insert(entry.state.canonical_key()) {
                continue;
            }

            let children = entry.state.list_available_moves();
            if let Some(node) = self.admit_all(children, Some(entry.node)) {
                return self.solved(node);
            }
        }

        Outcome::Unsolvable {
            examined: self.examined,
        }
    }
}

/// Searches for a winning sequence of moves from `initial`.
///
/// Progress is passed to `observer` every `config.progress_interval` examined
/// moves.
pub fn solve_with<O: SearchObserver>(
    initial: &GameState,
    config: &SolverConfig,
    observer: O,
) -> Outcome {
    info!(
        event = "search_start",
        poles = initial.poles().len(),
        max_height = initial.max_height(),
        score = initial.score(),
    );
    let started = Instant::now();

    let outcome = Search::new(config, observer).run(initial);

    let duration_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        Outcome::Solved(solution) => info!(
            event = "search_end",
            result = "solved",
            moves = solution.moves.len(),
            score = solution.score,
            examined = solution.examined,
            duration_ms,
        ),
        Outcome::Unsolvable { examined } => info!(
            event = "search_end",
            result = "unsolvable",
            examined = *examined,
            duration_ms,
        ),
        Outcome::Cancelled { examined, reason } => info!(
            event = "search_end",
            result = "cancelled",
            reason = %reason,
            examined = *examined,
            duration_ms,
        ),
    }
    outcome
}

/// Searches with the default configuration, logging progress via `tracing`.
pub fn solve(initial: &GameState) -> Outcome {
    solve_with(initial, &SolverConfig::default(), LogProgress)
}
