//! Current-step state machine.

use log::debug;

/// Tracks the current step of a linear wizard with `len` steps.
///
/// Transitions that would leave `0..len` are no-ops. There is no terminal
/// state: the last step simply has no `advance` target. Navigation is never
/// gated on whether the current step's fields are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardNavigator {
    current: usize,
    len: usize,
}

impl WizardNavigator {
    /// Creates a navigator positioned on the first step.
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    /// Index of the current step.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.len
    }

    /// Moves to the next step. Returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        match self.current.checked_add(1) {
            Some(next) => self.jump_to(next),
            None => false,
        }
    }

    /// Moves to the previous step, stopping at the first. Returns whether the
    /// index changed.
    pub fn retreat(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(previous) => self.jump_to(previous),
            None => {
                debug!("Already on the first step");
                false
            }
        }
    }

    /// Moves to `index` if it names a step. Returns whether the index changed.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            debug!("Ignoring jump to step index {index}; {} steps", self.len);
            return false;
        }
        let moved = index != self.current;
        self.current = index;
        moved
    }

    /// Returns to the first step.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let nav = WizardNavigator::new(5);
        assert_eq!(nav.current(), 0);
        assert!(nav.is_first());
        assert!(!nav.is_last());
    }

    #[test]
    fn test_retreat_at_first_step_is_noop() {
        let mut nav = WizardNavigator::new(5);
        assert!(!nav.retreat());
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_advance_at_last_step_is_noop() {
        let mut nav = WizardNavigator::new(5);
        assert!(nav.jump_to(4));
        assert!(nav.is_last());
        assert!(!nav.advance());
        assert_eq!(nav.current(), 4);
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut nav = WizardNavigator::new(3);
        assert!(nav.advance());
        assert!(nav.advance());
        assert_eq!(nav.current(), 2);
        assert!(nav.retreat());
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_jump_to_every_valid_index() {
        let mut nav = WizardNavigator::new(8);
        for index in (0..8).rev() {
            nav.jump_to(index);
            assert_eq!(nav.current(), index);
        }
    }

    #[test]
    fn test_jump_out_of_range_is_noop() {
        let mut nav = WizardNavigator::new(8);
        nav.jump_to(3);
        assert!(!nav.jump_to(8));
        assert!(!nav.jump_to(usize::MAX));
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn test_jump_to_current_reports_no_move() {
        let mut nav = WizardNavigator::new(3);
        assert!(!nav.jump_to(0));
    }

    #[test]
    fn test_reset() {
        let mut nav = WizardNavigator::new(3);
        nav.jump_to(2);
        nav.reset();
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_single_step_wizard() {
        let mut nav = WizardNavigator::new(1);
        assert!(nav.is_first() && nav.is_last());
        assert!(!nav.advance());
        assert!(!nav.retreat());
        assert_eq!(nav.current(), 0);
    }
}
