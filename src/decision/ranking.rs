use crate::models::TradingOpportunity;

/// Sort by priority, highest first, and keep at most `limit`.
///
/// The sort is stable: equal priorities keep their evaluation order.
pub fn rank_opportunities(
    mut opportunities: Vec<TradingOpportunity>,
    limit: usize,
) -> Vec<TradingOpportunity> {
    opportunities.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    opportunities.truncate(limit);
    opportunities
}
