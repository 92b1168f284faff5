use super::castle_rights::CastleRights;
use super::square::Square;
use super::state_stack::StateStack;

/// The irreversible parts of a position: everything a move can change that
/// cannot be recomputed from the move itself when it is undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveState {
    pub en_passant_target: Option<Square>,
    pub castle_rights: CastleRights,
    pub halfmove_clock: u16,
}

impl Default for MoveState {
    fn default() -> Self {
        Self {
            en_passant_target: None,
            castle_rights: CastleRights::all(),
            halfmove_clock: 0,
        }
    }
}

/// Stores information about state changes related to individual chess moves,
/// including en passant targets, castle rights, and position clocks.
#[derive(Clone, Debug)]
pub struct MoveInfo {
    state_stack: StateStack<MoveState>,
    fullmove_number: u16,
}

impl Default for MoveInfo {
    fn default() -> Self {
        Self {
            state_stack: StateStack::new(MoveState::default()),
            fullmove_number: 1,
        }
    }
}

impl MoveInfo {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn current(&self) -> &MoveState {
        self.state_stack.peek()
    }

    /// Overwrites the current state in place. Used while setting a position
    /// up, never while a move is applied.
    pub fn current_mut(&mut self) -> &mut MoveState {
        self.state_stack.peek_mut()
    }

    pub fn push(&mut self, state: MoveState) {
        self.state_stack.push(state);
    }

    pub fn pop(&mut self) -> Option<MoveState> {
        self.state_stack.pop()
    }

    pub fn applied_move_count(&self) -> usize {
        self.state_stack.depth()
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }
}
