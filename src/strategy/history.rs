//! Accumulated feedback, keyed by verdict and letter.

use std::collections::{BTreeMap, BTreeSet};

use super::{Feedback, Verdict};

/// Every position at which each verdict was seen for each letter.
///
/// Recording a [`Verdict::Correct`] fact for a letter forgets every
/// [`Verdict::Present`] fact for it: once a letter is pinned down it is no
/// longer treated as misplaced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackHistory {
    seen: BTreeMap<(Verdict, char), BTreeSet<usize>>,
}

impl FeedbackHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `verdict` for `letter` at `position`.
    pub fn record(&mut self, letter: char, verdict: Verdict, position: usize) {
        self.seen
            .entry((verdict, letter))
            .or_default()
            .insert(position);

        if verdict == Verdict::Correct {
            self.seen.remove(&(Verdict::Present, letter));
        }
    }

    /// Records every verdict of `feedback`.
    pub fn record_feedback(&mut self, feedback: &Feedback) {
        for (i, letter, verdict) in feedback.iter() {
            self.record(letter, verdict, i);
        }
    }

    /// Returns true if `verdict` was seen for `letter` at any position.
    pub fn has_seen(&self, letter: char, verdict: Verdict) -> bool {
        self.seen.contains_key(&(verdict, letter))
    }

    /// Returns true if `verdict` was seen for `letter` at `position`.
    pub fn has_seen_at(&self, letter: char, verdict: Verdict, position: usize) -> bool {
        self.seen
            .get(&(verdict, letter))
            .map_or(false, |positions| positions.contains(&position))
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
