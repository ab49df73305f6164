//! Itinerary ranking for generation results.

use std::cmp::Ordering;

use crate::domain::Itinerary;

/// Compare two itineraries by total price, cheapest first.
pub fn by_price(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.total_price().total_cmp(&b.total_price())
}

/// Rank itineraries by price and keep at most `max_results`.
///
/// The sort is stable: itineraries with equal totals stay in the order they
/// were accepted in.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>, max_results: usize) -> Vec<Itinerary> {
    itineraries.sort_by(by_price);
    itineraries.truncate(max_results);
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchId;
    use crate::domain::test_support::*;

    pub(super) fn make_itinerary(city: &str, price: f64) -> Itinerary {
        Itinerary::new(
            SearchId::new("search-1"),
            vec![leg("NYC", city, 1, price / 2.0), leg(city, "NYC", 4, price / 2.0)],
            vec![visit(city, 1, 3)],
            breakdown(price, 10_000.0),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn sorts_cheapest_first() {
        let ranked = rank_itineraries(
            vec![
                make_itinerary("ROM", 900.0),
                make_itinerary("BCN", 500.0),
                make_itinerary("PAR", 700.0),
            ],
            10,
        );

        let prices: Vec<f64> = ranked.iter().map(Itinerary::total_price).collect();
        assert_eq!(prices, vec![500.0, 700.0, 900.0]);
    }

    #[test]
    fn ties_keep_acceptance_order() {
        let ranked = rank_itineraries(
            vec![
                make_itinerary("ROM", 600.0),
                make_itinerary("BCN", 500.0),
                make_itinerary("PAR", 600.0),
            ],
            10,
        );

        let route: Vec<String> = ranked
            .iter()
            .map(|i| i.route()[0].to_string())
            .collect();
        assert_eq!(route, vec!["BCN", "ROM", "PAR"]);
    }

    #[test]
    fn truncates_to_max() {
        let itineraries = (0..5)
            .map(|i| make_itinerary("BCN", 100.0 * f64::from(5 - i)))
            .collect();

        let ranked = rank_itineraries(itineraries, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].total_price(), 100.0);
        assert_eq!(ranked[1].total_price(), 200.0);
    }

    #[test]
    fn empty_input() {
        assert!(rank_itineraries(vec![], 12).is_empty());
    }
}
