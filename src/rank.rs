use crate::model::Airport;

pub const DEFAULT_LIMIT: usize = 8;

const CITY_EXACT: u32 = 100;
const CITY_PREFIX: u32 = 50;
const CITY_SUBSTRING: u32 = 25;
const NAME_SUBSTRING: u32 = 15;
const IATA_EXACT: u32 = 100;
const IATA_SUBSTRING: u32 = 30;

/// Relevance of an airport for a free-text query. Field contributions
/// accumulate; within a field, exact beats prefix beats substring.
pub fn score_airport(airport: &Airport, query: &str) -> u32 {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return 0;
    }

    let city = airport
        .city_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let name = airport.name.to_lowercase();
    let iata = airport
        .iata_code
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut score = 0;

    if !city.is_empty() {
        if city == q {
            score += CITY_EXACT;
        } else if city.starts_with(&q) {
            score += CITY_PREFIX;
        } else if city.contains(&q) {
            score += CITY_SUBSTRING;
        }
    }

    if !iata.is_empty() {
        if iata == q {
            score += IATA_EXACT;
        } else if iata.contains(&q) {
            score += IATA_SUBSTRING;
        }
    }

    if name.contains(&q) {
        score += NAME_SUBSTRING;
    }

    score
}

/// Drops zero-score candidates, sorts the rest by descending score, and
/// truncates to `limit`. Upstream ordering only breaks ties.
pub fn rank_airports(candidates: Vec<Airport>, query: &str, limit: usize) -> Vec<Airport> {
    let mut scored: Vec<(u32, Airport)> = candidates
        .into_iter()
        .map(|a| (score_airport(&a, query), a))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, a)| a).collect()
}
