use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::model::{Airline, Airport, PricedOffer};

pub fn format_price(amount: &str, currency: &str) -> String {
    match currency {
        "USD" => format!("${amount}"),
        "EUR" => format!("€{amount}"),
        "GBP" => format!("£{amount}"),
        "JPY" | "CNY" => format!("¥{amount}"),
        "KRW" => format!("₩{amount}"),
        "INR" => format!("₹{amount}"),
        "THB" => format!("฿{amount}"),
        _ => format!("{amount} {currency}"),
    }
}

/// Pretty-prints an ISO 8601 duration ("PT7H30M" → "7h 30m"). Falls back
/// to the raw string when the shape is unexpected.
pub fn format_duration(duration: &str) -> String {
    let rest = match duration.strip_prefix("PT") {
        Some(rest) => rest,
        None => return duration.to_string(),
    };

    let mut hours = 0u32;
    let mut minutes = 0u32;
    let mut digits = String::new();
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'H' => {
                hours = digits.parse().unwrap_or(0);
                digits.clear();
            }
            'M' => {
                minutes = digits.parse().unwrap_or(0);
                digits.clear();
            }
            _ => return duration.to_string(),
        }
    }

    format!("{hours}h {minutes:02}m")
}

fn slice_stops(segments: usize) -> String {
    match segments {
        0 => "—".to_string(),
        1 => "Nonstop".to_string(),
        n => format!("{} stops", n - 1),
    }
}

pub fn render_offers(offers: &[PricedOffer]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Airline", "Route", "Depart", "Arrive", "Duration", "Stops", "Price", "Expires",
        ]);

    for priced in offers {
        let offer = &priced.offer;

        let route: Vec<String> = offer
            .slices
            .iter()
            .map(|s| {
                format!(
                    "{} → {}",
                    s.origin.iata_code.as_deref().unwrap_or("?"),
                    s.destination.iata_code.as_deref().unwrap_or("?"),
                )
            })
            .collect();
        let route_str = route.join("\n");

        let depart = offer
            .slices
            .first()
            .and_then(|s| s.segments.first())
            .map(|s| s.departing_at.clone())
            .unwrap_or_else(|| "—".to_string());

        let arrive = offer
            .slices
            .last()
            .and_then(|s| s.segments.last())
            .map(|s| s.arriving_at.clone())
            .unwrap_or_else(|| "—".to_string());

        let duration: Vec<String> = offer
            .slices
            .iter()
            .map(|s| {
                s.duration
                    .as_deref()
                    .map(format_duration)
                    .unwrap_or_else(|| "—".to_string())
            })
            .collect();
        let duration_str = duration.join("\n");

        let stops: Vec<String> = offer
            .slices
            .iter()
            .map(|s| slice_stops(s.segments.len()))
            .collect();
        let stops_str = stops.join("\n");

        let price = format_price(&priced.display_price, &offer.total_currency);

        table.add_row(vec![
            &offer.owner.name,
            &route_str,
            &depart,
            &arrive,
            &duration_str,
            &stops_str,
            &price,
            &offer.expires_at,
        ]);
    }

    table.to_string()
}

pub fn render_airports(airports: &[Airport]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["IATA", "Name", "City", "Country", "Time zone"]);

    for airport in airports {
        table.add_row(vec![
            airport.iata_code.as_deref().unwrap_or("—"),
            airport.name.as_str(),
            airport.city_name.as_deref().unwrap_or("—"),
            airport.iata_country_code.as_deref().unwrap_or("—"),
            airport.time_zone.as_deref().unwrap_or("—"),
        ]);
    }

    table.to_string()
}

pub fn render_airlines(airlines: &[Airline]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["IATA", "ICAO", "Name"]);

    for airline in airlines {
        table.add_row(vec![
            airline.iata_code.as_deref().unwrap_or("—"),
            airline.icao_code.as_deref().unwrap_or("—"),
            airline.name.as_str(),
        ]);
    }

    table.to_string()
}
