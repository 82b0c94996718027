use std::fmt;
use std::time::Duration;

use super::ranked::Ranked;

/// Detailed solve outcome returned by
/// [`Solver::solve_detailed()`](crate::Solver::solve_detailed).
///
/// Contains the ranked results, how many frontier rounds were expanded,
/// whether the round cap cut the walk short, how many distinct nodes had
/// their gate evaluated, and the wall-clock duration of the solve.
#[derive(Debug)]
#[must_use]
pub struct SolveReport<'g, P> {
    results: Vec<Ranked<'g, P>>,
    rounds: usize,
    truncated: bool,
    gated: usize,
    duration: Duration,
}

impl<'g, P> SolveReport<'g, P> {
    pub(crate) fn new(
        results: Vec<Ranked<'g, P>>,
        rounds: usize,
        truncated: bool,
        gated: usize,
        duration: Duration,
    ) -> Self {
        Self {
            results,
            rounds,
            truncated,
            gated,
            duration,
        }
    }

    /// Ranked results, same as [`Solver::solve()`](crate::Solver::solve).
    #[must_use]
    pub fn results(&self) -> &[Ranked<'g, P>] {
        &self.results
    }

    #[must_use]
    pub fn into_results(self) -> Vec<Ranked<'g, P>> {
        self.results
    }

    /// Number of frontier expansions performed.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// `true` if the round cap stopped the walk while a non-terminal node still
    /// had a gate-passing child. The results then only cover what was
    /// collected so far.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Number of distinct nodes whose gating rule was consulted.
    #[must_use]
    pub fn gated(&self) -> usize {
        self.gated
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<P> fmt::Display for SolveReport<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results: Vec<String> = self.results.iter().map(ToString::to_string).collect();
        write!(f, "results: [{}]", results.join(", "))?;
        write!(f, ", rounds: {}", self.rounds)?;
        if self.truncated {
            write!(f, " (truncated)")?;
        }
        write!(f, ", gated: {}", self.gated)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
