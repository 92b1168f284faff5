//! Core traits for generic alpha-beta search.

use std::fmt::Debug;

/// The state of a two-player zero-sum game with alternating turns.
///
/// States are cloned only when the root move list is split across workers;
/// everywhere else the search mutates one state through apply/undo.
pub trait GameState: Clone + Send + Sync {}

/// An action that can be applied to and undone from a game state.
///
/// Applying a move must also hand the turn to the opponent, and undoing it
/// must hand it back. The search never switches turns on its own.
pub trait GameMove: Clone + Send + Sync + PartialEq + Debug {
    type State: GameState;
    type Error: Debug;

    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    fn undo(&self, state: &mut Self::State) -> Result<(), Self::Error>;
}

/// Generates all legal moves from a given game state.
pub trait MoveGenerator<S: GameState>: Clone + Send + Sync {
    type Move: GameMove<State = S>;
    type MoveList: MoveCollection<Self::Move>;

    /// Generates all legal moves for the player to move. The state may be
    /// used as scratch space but must be handed back unchanged.
    fn generate_moves(&self, state: &mut S) -> Self::MoveList;
}

/// Scores a game position.
pub trait Evaluator<S: GameState>: Clone + Send + Sync {
    /// Score of `state` from the perspective of the player to move, higher is
    /// better for that player. Must also score terminal positions (no legal
    /// moves), using `ply`, the distance from the search root, so that nearer
    /// wins score higher than distant ones.
    fn evaluate(&self, state: &mut S, ply: u8) -> i16;
}

/// Orders moves to improve alpha-beta pruning efficiency. Ordering never
/// changes the score a search returns, only how many nodes it visits.
pub trait MoveOrderer<S: GameState, M>: Clone + Send + Sync {
    /// Sorts moves in-place, placing "better" moves first.
    fn order_moves(&self, moves: &mut [M], state: &S);
}

/// A no-op move orderer for games without move ordering heuristics.
#[derive(Clone, Default, Debug)]
pub struct NoOpMoveOrderer;

impl<S: GameState, M> MoveOrderer<S, M> for NoOpMoveOrderer {
    #[inline(always)]
    fn order_moves(&self, _moves: &mut [M], _state: &S) {}
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> + Send {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M: Send> MoveCollection<M> for Vec<M> {}
