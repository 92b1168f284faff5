/// A stack of per-move state that is pushed when a move is applied and
/// popped when it is undone. The bottom entry is the state the board was
/// created with and is never popped.
#[derive(Clone, Debug)]
pub struct StateStack<T> {
    stack: Vec<T>,
}

impl<T: Clone> StateStack<T> {
    pub fn new(initial: T) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    pub fn push(&mut self, value: T) {
        self.stack.push(value);
    }

    pub fn peek(&self) -> &T {
        // The base entry is never removed, see `pop`.
        &self.stack[self.stack.len() - 1]
    }

    pub fn peek_mut(&mut self) -> &mut T {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    /// Pops the most recent entry. Returns `None` rather than removing the
    /// base entry.
    pub fn pop(&mut self) -> Option<T> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Number of entries pushed on top of the base entry.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_entry_is_never_popped() {
        let mut stack = StateStack::new(1);
        stack.push(2);
        assert_eq!(1, stack.depth());
        assert_eq!(Some(2), stack.pop());
        assert_eq!(None, stack.pop());
        assert_eq!(&1, stack.peek());
    }
}
