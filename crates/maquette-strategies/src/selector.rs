#![forbid(unsafe_code)]

//! The metastrategy selector: fitness ranking plus explicit lock.

use tracing::trace;

use crate::session::StrategyId;
use crate::strategy::{CanvasStrategy, StrategyContext};

/// One applicable strategy with its score, for the strategy picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedStrategy {
    pub id: StrategyId,
    pub name: &'static str,
    pub fitness: f64,
}

/// The selector's output: the default choice plus the full ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySelection {
    /// The strategy to run this frame, `None` when nothing applies.
    pub chosen: Option<StrategyId>,
    /// All applicable strategies, fitness-descending, registration order
    /// on ties.
    pub ranked: Vec<RankedStrategy>,
}

/// Rank every registered strategy against the live session.
///
/// Inapplicable candidates (fitness `<= 0`) are discarded. The sort is
/// stable, so equal fitness keeps registration order. A locked strategy
/// is honored while it stays applicable; a `FORCED_` strategy is never
/// the default on a fitness tie with an ordinary candidate.
#[must_use]
pub fn select_strategy(
    strategies: &[Box<dyn CanvasStrategy>],
    ctx: &StrategyContext<'_>,
) -> StrategySelection {
    let mut ranked: Vec<RankedStrategy> = strategies
        .iter()
        .filter_map(|strategy| {
            let fitness = strategy.fitness(ctx);
            (fitness > 0.0).then(|| RankedStrategy {
                id: strategy.id(),
                name: strategy.name(),
                fitness,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    let locked = ctx
        .session
        .locked_strategy
        .filter(|id| ranked.iter().any(|r| r.id == *id));

    let chosen = match locked {
        Some(id) => Some(id),
        None => match ranked.first() {
            None => None,
            Some(top) if !top.id.is_forced() => Some(top.id),
            Some(top) => ranked
                .iter()
                .find(|r| !r.id.is_forced() && r.fitness >= top.fitness)
                .or(Some(top))
                .map(|r| r.id),
        },
    };
    trace!(?chosen, candidates = ranked.len(), "strategy selection");

    StrategySelection { chosen, ranked }
}
