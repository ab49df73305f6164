//! Day distribution across the cities of a combination.
//!
//! Every city starts at the minimum stay and the days left over are handed
//! out under three policies: evenly, front-loaded and back-loaded. Entries
//! are clamped to the maximum stay, so a vector may use fewer days than the
//! trip has; it never uses more.

/// Stay lengths, one per city, in visiting order.
pub type DayDistribution = Vec<u32>;

/// Produce up to three day distributions for a trip.
///
/// Returns nothing when the trip can't give every city its minimum stay
/// (or when the bounds themselves are inverted). Identical vectors are only
/// returned once.
pub fn day_distributions(
    total_days: u32,
    city_count: usize,
    min_days: u32,
    max_days: u32,
) -> Vec<DayDistribution> {
    if city_count == 0 || min_days > max_days {
        return Vec::new();
    }

    let Ok(k) = u32::try_from(city_count) else {
        return Vec::new();
    };
    let Some(baseline) = k.checked_mul(min_days) else {
        return Vec::new();
    };
    let Some(remaining) = total_days.checked_sub(baseline) else {
        return Vec::new();
    };

    let mut distributions = vec![even(k, remaining, min_days, max_days)];

    if k > 1 && remaining > 0 {
        let front = front_loaded(k, remaining, min_days, max_days);
        let mut back = front.clone();
        back.reverse();

        for candidate in [front, back] {
            if !distributions.contains(&candidate) {
                distributions.push(candidate);
            }
        }
    }

    distributions
}

/// Spread evenly, earliest cities taking the remainder.
fn even(k: u32, remaining: u32, min_days: u32, max_days: u32) -> DayDistribution {
    let per_city = remaining / k;
    let extra = remaining % k;

    (0..k)
        .map(|i| {
            let bonus = u32::from(i < extra);
            (min_days + per_city + bonus).min(max_days)
        })
        .collect()
}

/// As much as fits into the first city, the rest spread over the others.
fn front_loaded(k: u32, remaining: u32, min_days: u32, max_days: u32) -> DayDistribution {
    let first_extra = remaining.min(max_days - min_days);
    let per_other = (remaining - first_extra) / (k - 1);

    std::iter::once(min_days + first_extra)
        .chain((1..k).map(|_| (min_days + per_other).min(max_days)))
        .collect()
}
