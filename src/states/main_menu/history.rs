//! Tracks left with "next", revisited with "previous".

#[derive(Debug, Default, Clone)]
pub struct PreviousTracks {
    stack: Vec<usize>,
}

impl PreviousTracks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the catalog index of the track being left.
    ///
    /// An index equal to the top of the stack is not pushed again.
    pub fn push(&mut self, index: usize) -> bool {
        if self.stack.last() == Some(&index) {
            return false;
        }
        self.stack.push(index);
        true
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_order() {
        let mut history = PreviousTracks::new();
        for index in [4, 9, 2, 7] {
            assert!(history.push(index));
        }
        let popped: Vec<usize> = std::iter::from_fn(|| history.pop()).collect();
        assert_eq!(popped, vec![7, 2, 9, 4]);
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn adjacent_duplicates_are_dropped() {
        let mut history = PreviousTracks::new();
        assert!(history.push(3));
        assert!(!history.push(3));
        assert!(history.push(5));
        assert!(history.push(3));
        assert_eq!(history.len(), 3);
    }
}
