//! Negamax search with alpha-beta pruning.
//!
//! # Core Algorithm
//!
//! Every node scores the position from the perspective of the player to move
//! there, and a parent negates the score of each child. Alpha-beta keeps a
//! window [alpha, beta] of scores that can still matter to the root; once a
//! node proves a score of at least beta its remaining siblings are skipped.
//! The search is fail-soft (a node may return a score outside its window),
//! and since nothing is cached between nodes the root value is exactly the
//! plain minimax value at the same depth. `minimax_search` runs the unpruned
//! search over the same tree and is kept as a reference.
//!
//! # Node Budget
//!
//! A `SearchContext` may carry a node budget. When it runs out the search
//! unwinds immediately and the root keeps the best move among the root moves
//! that were fully searched. If none were, the first ordered move is returned
//! so that a position with legal moves always yields a move.
//!
//! # Parallel Search
//!
//! Root moves can be searched in parallel with rayon. Each worker clones the
//! state and searches its move with a full window, so the result is the same
//! as the sequential search.

use std::cmp::max;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rayon::prelude::*;
use thiserror::Error;

use super::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer};

/// Initial window bound. Negating it stays in range, unlike `i16::MIN`.
pub const SCORE_INFINITY: i16 = i16::MAX;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("cannot search an invalid position: {reason}")]
    InvalidPosition { reason: String },
}

/// Raised inside the tree when the node budget runs out.
#[derive(Debug)]
struct BudgetExhausted;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Algorithm {
    AlphaBeta,
    Minimax,
}

/// Search configuration, plus the counters of the search in progress.
#[derive(Debug)]
pub struct SearchContext {
    depth: u8,
    node_budget: Option<usize>,
    parallel: bool,
    position_count: AtomicUsize,
    cutoff_count: AtomicUsize,
}

impl SearchContext {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            node_budget: None,
            parallel: false,
            position_count: AtomicUsize::new(0),
            cutoff_count: AtomicUsize::new(0),
        }
    }

    /// Stops the search after visiting `budget` positions.
    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = Some(budget);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn search_depth(&self) -> u8 {
        self.depth
    }

    pub fn node_budget(&self) -> Option<usize> {
        self.node_budget
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn searched_position_count(&self) -> usize {
        self.position_count.load(Ordering::SeqCst)
    }

    pub fn cutoff_count(&self) -> usize {
        self.cutoff_count.load(Ordering::SeqCst)
    }

    pub fn reset_stats(&mut self) {
        self.position_count.store(0, Ordering::SeqCst);
        self.cutoff_count.store(0, Ordering::SeqCst);
    }

    fn increment_position_count(&self) -> Result<(), BudgetExhausted> {
        let visited = self.position_count.fetch_add(1, Ordering::SeqCst) + 1;
        match self.node_budget {
            Some(budget) if visited > budget => Err(BudgetExhausted),
            _ => Ok(()),
        }
    }

    fn increment_cutoff_count(&self) {
        self.cutoff_count.fetch_add(1, Ordering::SeqCst);
    }

    fn stats(&self, depth: u8, budget_exhausted: bool, duration: Duration) -> SearchStats {
        SearchStats {
            depth,
            positions: self.searched_position_count(),
            cutoffs: self.cutoff_count(),
            budget_exhausted,
            duration,
        }
    }
}

/// Statistics of a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Depth of the search the result comes from.
    pub depth: u8,
    pub positions: usize,
    pub cutoffs: usize,
    pub budget_exhausted: bool,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<M>,
    /// Score from the perspective of the player to move at the root.
    pub score: i16,
    /// The expected line of play, starting with `best_move`.
    pub principal_variation: Vec<M>,
    pub stats: SearchStats,
}

/// A fully searched root move, with the line it leads to.
struct ScoredLine<M> {
    score: i16,
    line: Vec<M>,
}

struct RootOutcome<M> {
    best: Option<ScoredLine<M>>,
    budget_exhausted: bool,
}

/// Applies a move, executes a closure with the new state, then undoes the move.
fn with_move_applied<S, M, F, R>(game_move: &M, state: &mut S, f: F) -> R
where
    S: GameState,
    M: GameMove<State = S>,
    F: FnOnce(&mut S) -> R,
{
    game_move
        .apply(state)
        .expect("move application should succeed in search");

    let result = f(state);

    game_move
        .undo(state)
        .expect("move undo should succeed in search");

    result
}

/// Searches for the best move using negamax with alpha-beta pruning, to the
/// depth configured in `context`.
///
/// # Returns
///
/// - `Ok(result)` with `best_move: None` if the root has no legal moves, in
///   which case `score` is the evaluator's terminal score
/// - `Err(SearchError::DepthTooLow)` if the search depth is < 1
///
/// # Examples
///
/// ```ignore
/// let mut context = SearchContext::new(4).with_node_budget(200_000);
/// let result = alpha_beta_search(
///     &mut context,
///     &mut board,
///     &move_gen,
///     &evaluator,
///     &move_orderer,
/// )?;
/// ```
#[must_use = "search returns the best move found"]
pub fn alpha_beta_search<S, G, E, O>(
    context: &mut SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    run_search(
        Algorithm::AlphaBeta,
        context,
        state,
        move_generator,
        evaluator,
        move_orderer,
    )
}

/// Plain minimax (in negamax form) without pruning. Visits every node of the
/// tree, so it is only practical at small depths.
#[must_use = "search returns the best move found"]
pub fn minimax_search<S, G, E, O>(
    context: &mut SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    run_search(
        Algorithm::Minimax,
        context,
        state,
        move_generator,
        evaluator,
        move_orderer,
    )
}

/// Searches at depths 1 through the configured depth, moving the best move of
/// each iteration to the front of the root move list for the next one.
///
/// The node budget is shared by all iterations. When it runs out, the result
/// of the deepest completed iteration is returned.
#[must_use = "search returns the best move found"]
pub fn iterative_deepening_search<S, G, E, O>(
    context: &mut SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let target_depth = context.search_depth();
    if target_depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.reset_stats();
    let start = Instant::now();

    let mut candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Ok(terminal_result(context, state, evaluator, start));
    }
    move_orderer.order_moves(candidates.as_mut(), state);

    let outcome = search_root(
        Algorithm::AlphaBeta,
        context,
        state,
        move_generator,
        evaluator,
        move_orderer,
        candidates.as_ref(),
        1,
    );
    let mut best = into_result(context, outcome, state, evaluator, candidates.as_ref(), 1, start);

    for depth in 2..=target_depth {
        if best.stats.budget_exhausted {
            break;
        }

        if let Some(ref previous_best) = best.best_move {
            if let Some(pos) = candidates.as_ref().iter().position(|m| m == previous_best) {
                if pos > 0 {
                    candidates.as_mut()[0..=pos].rotate_right(1);
                }
            }
        }

        let outcome = search_root(
            Algorithm::AlphaBeta,
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            candidates.as_ref(),
            depth,
        );

        if outcome.budget_exhausted {
            warn!(
                "node budget exhausted during depth {}, keeping the depth {} result",
                depth, best.stats.depth
            );
            best.stats = context.stats(best.stats.depth, true, start.elapsed());
            break;
        }

        best = into_result(
            context,
            outcome,
            state,
            evaluator,
            candidates.as_ref(),
            depth,
            start,
        );
        debug!(
            "depth {} complete: {:?} scores {} ({} positions)",
            depth,
            best.best_move,
            best.score,
            best.stats.positions
        );
    }

    info!(
        "iterative deepening chose {:?} with score {} at depth {} ({} positions in {:?})",
        best.best_move, best.score, best.stats.depth, best.stats.positions, best.stats.duration
    );
    Ok(best)
}

fn run_search<S, G, E, O>(
    algorithm: Algorithm,
    context: &mut SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
) -> Result<SearchResult<G::Move>, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let depth = context.search_depth();
    debug!("{:?} search depth: {}", algorithm, depth);
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.reset_stats();
    let start = Instant::now();

    let mut candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Ok(terminal_result(context, state, evaluator, start));
    }
    move_orderer.order_moves(candidates.as_mut(), state);

    let outcome = search_root(
        algorithm,
        context,
        state,
        move_generator,
        evaluator,
        move_orderer,
        candidates.as_ref(),
        depth,
    );
    let result = into_result(
        context,
        outcome,
        state,
        evaluator,
        candidates.as_ref(),
        depth,
        start,
    );

    info!(
        "{:?} search chose {:?} with score {} ({} positions, {} cutoffs in {:?})",
        algorithm,
        result.best_move,
        result.score,
        result.stats.positions,
        result.stats.cutoffs,
        result.stats.duration
    );
    Ok(result)
}

fn terminal_result<S, E, M>(
    context: &SearchContext,
    state: &mut S,
    evaluator: &E,
    start: Instant,
) -> SearchResult<M>
where
    S: GameState,
    E: Evaluator<S>,
{
    let score = evaluator.evaluate(state, 0);
    debug!("no legal moves at the root, score {}", score);
    SearchResult {
        best_move: None,
        score,
        principal_variation: Vec::new(),
        stats: context.stats(0, false, start.elapsed()),
    }
}

fn into_result<S, E, M>(
    context: &SearchContext,
    outcome: RootOutcome<M>,
    state: &mut S,
    evaluator: &E,
    candidates: &[M],
    depth: u8,
    start: Instant,
) -> SearchResult<M>
where
    S: GameState,
    E: Evaluator<S>,
    M: Clone,
{
    if outcome.budget_exhausted {
        warn!(
            "node budget of {:?} exhausted at depth {} after {} positions",
            context.node_budget(),
            depth,
            context.searched_position_count()
        );
    }
    let stats = context.stats(depth, outcome.budget_exhausted, start.elapsed());

    match outcome.best {
        Some(ScoredLine { score, line }) => SearchResult {
            best_move: line.first().cloned(),
            score,
            principal_variation: line,
            stats,
        },
        None => {
            // Nothing finished in time; fall back to the first ordered move.
            let fallback = candidates.first().cloned();
            SearchResult {
                best_move: fallback.clone(),
                score: evaluator.evaluate(state, 0),
                principal_variation: fallback.into_iter().collect(),
                stats,
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn search_root<S, G, E, O>(
    algorithm: Algorithm,
    context: &SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    candidates: &[G::Move],
    depth: u8,
) -> RootOutcome<G::Move>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    if context.is_parallel() && candidates.len() > 1 {
        search_root_parallel(
            algorithm,
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            candidates,
            depth,
        )
    } else {
        search_root_sequential(
            algorithm,
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            candidates,
            depth,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn search_root_sequential<S, G, E, O>(
    algorithm: Algorithm,
    context: &SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    candidates: &[G::Move],
    depth: u8,
) -> RootOutcome<G::Move>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let mut best: Option<ScoredLine<G::Move>> = None;
    let mut alpha = -SCORE_INFINITY;

    for game_move in candidates {
        let mut line = Vec::new();
        let result = with_move_applied(game_move, state, |state| {
            search_node(
                algorithm,
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                depth - 1,
                1,
                -SCORE_INFINITY,
                -alpha,
                &mut line,
            )
        });
        let score = match result {
            Ok(score) => -score,
            Err(BudgetExhausted) => {
                return RootOutcome {
                    best,
                    budget_exhausted: true,
                }
            }
        };
        debug!("root move {:?} scores {}", game_move, score);

        if best.as_ref().map_or(true, |b| score > b.score) {
            line.insert(0, game_move.clone());
            best = Some(ScoredLine { score, line });
        }
        alpha = max(alpha, score);
    }

    RootOutcome {
        best,
        budget_exhausted: false,
    }
}

#[allow(clippy::too_many_arguments)]
fn search_root_parallel<S, G, E, O>(
    algorithm: Algorithm,
    context: &SearchContext,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    candidates: &[G::Move],
    depth: u8,
) -> RootOutcome<G::Move>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    let results: Vec<Result<ScoredLine<G::Move>, BudgetExhausted>> = candidates
        .par_iter()
        .map(|game_move| -> Result<ScoredLine<G::Move>, BudgetExhausted> {
            let mut cloned_state = state.clone();
            let mut line = Vec::new();

            let score = with_move_applied(game_move, &mut cloned_state, |state| {
                search_node(
                    algorithm,
                    context,
                    state,
                    move_generator,
                    evaluator,
                    move_orderer,
                    depth - 1,
                    1,
                    -SCORE_INFINITY,
                    SCORE_INFINITY,
                    &mut line,
                )
            })?;

            line.insert(0, game_move.clone());
            Ok(ScoredLine {
                score: -score,
                line,
            })
        })
        .collect();

    let mut outcome = RootOutcome {
        best: None,
        budget_exhausted: false,
    };
    // Results come back in root order, so ties go to the earlier move just
    // as they do sequentially.
    for result in results {
        match result {
            Ok(scored) => {
                debug!("root move {:?} scores {}", scored.line[0], scored.score);
                if outcome.best.as_ref().map_or(true, |b| scored.score > b.score) {
                    outcome.best = Some(scored);
                }
            }
            Err(BudgetExhausted) => outcome.budget_exhausted = true,
        }
    }
    outcome
}

#[allow(clippy::too_many_arguments)]
fn search_node<S, G, E, O>(
    algorithm: Algorithm,
    context: &SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depth: u8,
    ply: u8,
    alpha: i16,
    beta: i16,
    line: &mut Vec<G::Move>,
) -> Result<i16, BudgetExhausted>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    match algorithm {
        Algorithm::AlphaBeta => negamax(
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            depth,
            ply,
            alpha,
            beta,
            line,
        ),
        Algorithm::Minimax => minimax(
            context,
            state,
            move_generator,
            evaluator,
            move_orderer,
            depth,
            ply,
            line,
        ),
    }
}

/// Fail-soft negamax with alpha-beta pruning. `line` receives the principal
/// variation below this node.
#[allow(clippy::too_many_arguments)]
fn negamax<S, G, E, O>(
    context: &SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depth: u8,
    ply: u8,
    mut alpha: i16,
    beta: i16,
    line: &mut Vec<G::Move>,
) -> Result<i16, BudgetExhausted>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.increment_position_count()?;
    line.clear();

    if depth == 0 {
        return Ok(evaluator.evaluate(state, ply));
    }

    let mut candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Ok(evaluator.evaluate(state, ply));
    }
    move_orderer.order_moves(candidates.as_mut(), state);

    let mut best_score = -SCORE_INFINITY;
    let mut child_line = Vec::new();

    for game_move in candidates.as_ref() {
        let score = -with_move_applied(game_move, state, |state| {
            negamax(
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                &mut child_line,
            )
        })?;

        if score > best_score {
            best_score = score;
            line.clear();
            line.push(game_move.clone());
            line.append(&mut child_line);
        }

        alpha = max(alpha, score);
        if alpha >= beta {
            trace!("cutoff at ply {} after {:?}", ply, game_move);
            context.increment_cutoff_count();
            break;
        }
    }

    Ok(best_score)
}

/// Negamax without pruning.
#[allow(clippy::too_many_arguments)]
fn minimax<S, G, E, O>(
    context: &SearchContext,
    state: &mut S,
    move_generator: &G,
    evaluator: &E,
    move_orderer: &O,
    depth: u8,
    ply: u8,
    line: &mut Vec<G::Move>,
) -> Result<i16, BudgetExhausted>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    O: MoveOrderer<S, G::Move>,
{
    context.increment_position_count()?;
    line.clear();

    if depth == 0 {
        return Ok(evaluator.evaluate(state, ply));
    }

    let mut candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        return Ok(evaluator.evaluate(state, ply));
    }
    move_orderer.order_moves(candidates.as_mut(), state);

    let mut best_score = -SCORE_INFINITY;
    let mut child_line = Vec::new();

    for game_move in candidates.as_ref() {
        let score = -with_move_applied(game_move, state, |state| {
            minimax(
                context,
                state,
                move_generator,
                evaluator,
                move_orderer,
                depth - 1,
                ply + 1,
                &mut child_line,
            )
        })?;

        if score > best_score {
            best_score = score;
            line.clear();
            line.push(game_move.clone());
            line.append(&mut child_line);
        }
    }

    Ok(best_score)
}
