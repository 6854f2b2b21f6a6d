//! Ordered, immutable list of wizard steps.

use crate::models::Step;

/// Maps step ids to positions and back.
///
/// Built once from a workflow definition; indices are contiguous from 0.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    steps: Vec<Step>,
}

impl StepRegistry {
    /// Creates a registry, renumbering the steps so that indices are
    /// contiguous and match their order.
    pub fn new(steps: Vec<Step>) -> Self {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| Step { index, ..step })
            .collect();
        Self { steps }
    }

    /// Every step, in wizard order.
    pub fn steps_in_order(&self) -> &[Step] {
        &self.steps
    }

    /// Position of the step with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Step at the given position; `None` when out of range.
    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Step with the given id.
    pub fn get(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Resolves a user-facing reference: a step id, or a 1-based number.
    pub fn lookup(&self, reference: &str) -> Option<&Step> {
        self.get(reference).or_else(|| {
            reference
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| self.step_at(index))
        })
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the registry holds no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
