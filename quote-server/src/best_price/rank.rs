//! Candidate ranking.

use super::generator::BestPriceCandidate;

/// Rank candidates cheapest first and keep at most `max_candidates`.
///
/// The sort is stable: candidates of equal cost keep generation order.
pub fn rank_candidates(
    mut candidates: Vec<BestPriceCandidate>,
    max_candidates: usize,
) -> Vec<BestPriceCandidate> {
    candidates.sort_by(|a, b| a.total_comparison_cost.total_cmp(&b.total_comparison_cost));
    candidates.truncate(max_candidates);
    candidates
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{ContainerType, Money, Ownership};
    use crate::quote::{PricingStatus, SeaLegQuote, SeaRailQuote};
    use crate::resolve::Commentary;

    pub(crate) fn candidate(destination: &str, cost: f64) -> BestPriceCandidate {
        BestPriceCandidate {
            destination: destination.to_string(),
            carrier: None,
            rail_route: None,
            quote: SeaRailQuote {
                ownership: Ownership::Coc,
                origin: "Shanghai".to_string(),
                destination: destination.to_string(),
                container_type: ContainerType::Dc20,
                carrier: None,
                sea: SeaLegQuote {
                    base_cost: Some(Money::usd(cost)),
                    final_cost: Some(Money::usd(cost)),
                    comment: None,
                    failed: false,
                    failure: None,
                },
                rail: None,
                drop_off: None,
                commentary: Commentary::new(),
                total: Money::usd(cost),
                status: PricingStatus::Complete,
                warning: None,
            },
            total_comparison_cost: cost,
        }
    }

    #[test]
    fn cheapest_first() {
        let ranked = rank_candidates(
            vec![candidate("A", 300.0), candidate("B", 100.0), candidate("C", 200.0)],
            6,
        );
        let order: Vec<_> = ranked.iter().map(|c| c.destination.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn ties_keep_generation_order() {
        let ranked = rank_candidates(
            vec![candidate("first", 100.0), candidate("second", 100.0), candidate("cheap", 50.0)],
            6,
        );
        let order: Vec<_> = ranked.iter().map(|c| c.destination.as_str()).collect();
        assert_eq!(order, vec!["cheap", "first", "second"]);
    }

    #[test]
    fn truncates_to_limit() {
        let candidates = (0..10).map(|i| candidate("X", f64::from(10 - i))).collect();
        let ranked = rank_candidates(candidates, 6);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].total_comparison_cost, 1.0);
        assert_eq!(ranked[5].total_comparison_cost, 6.0);
    }

    #[test]
    fn empty_is_empty() {
        assert!(rank_candidates(Vec::new(), 6).is_empty());
    }
}
