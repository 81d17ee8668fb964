use farelink::model::{CabinClass, PassengerType};
use farelink::query::{FlightQuery, Passengers};

fn make_valid_query() -> FlightQuery {
    FlightQuery {
        origin: "HEL".into(),
        destination: "BCN".into(),
        departure_date: "2026-03-01".into(),
        return_date: None,
        passengers: Passengers::default(),
        cabin: CabinClass::Economy,
        max_connections: None,
    }
}

#[test]
fn valid_query_passes() {
    let q = make_valid_query();
    assert!(q.validate().is_ok());
}

#[test]
fn rejects_lowercase_airport() {
    let mut q = make_valid_query();
    q.origin = "hel".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_too_short_airport() {
    let mut q = make_valid_query();
    q.origin = "HE".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_too_long_airport() {
    let mut q = make_valid_query();
    q.destination = "BCNX".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_numeric_airport() {
    let mut q = make_valid_query();
    q.origin = "H3L".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_invalid_date_format() {
    let mut q = make_valid_query();
    q.departure_date = "03-01-2026".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_invalid_month() {
    let mut q = make_valid_query();
    q.departure_date = "2026-13-01".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_feb_30() {
    let mut q = make_valid_query();
    q.departure_date = "2026-02-30".into();
    assert!(q.validate().is_err());
}

#[test]
fn accepts_feb_29_leap_year() {
    let mut q = make_valid_query();
    q.departure_date = "2028-02-29".into();
    assert!(q.validate().is_ok());
}

#[test]
fn rejects_feb_29_non_leap_year() {
    let mut q = make_valid_query();
    q.departure_date = "2026-02-29".into();
    assert!(q.validate().is_err());
}

#[test]
fn rejects_invalid_return_date() {
    let mut q = make_valid_query();
    q.return_date = Some("2026-04-31".into());
    assert!(q.validate().is_err());
}

#[test]
fn rejects_return_before_departure() {
    let mut q = make_valid_query();
    q.return_date = Some("2026-02-20".into());
    assert!(q.validate().is_err());
}

#[test]
fn rejects_zero_passengers() {
    let mut q = make_valid_query();
    q.passengers = Passengers {
        adults: 0,
        children: 0,
        infants: 0,
    };
    assert!(q.validate().is_err());
}

#[test]
fn rejects_too_many_passengers() {
    let mut q = make_valid_query();
    q.passengers = Passengers {
        adults: 5,
        children: 4,
        infants: 1,
    };
    assert!(q.validate().is_err());
}

#[test]
fn accepts_nine_passengers() {
    let mut q = make_valid_query();
    q.passengers = Passengers {
        adults: 5,
        children: 3,
        infants: 1,
    };
    assert!(q.validate().is_ok());
}

#[test]
fn rejects_infants_exceeding_adults() {
    let mut q = make_valid_query();
    q.passengers = Passengers {
        adults: 1,
        children: 0,
        infants: 2,
    };
    assert!(q.validate().is_err());
}

#[test]
fn one_way_builds_single_slice() {
    let q = make_valid_query();
    let slices = q.to_slices();
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].origin, "HEL");
    assert_eq!(slices[0].destination, "BCN");
    assert_eq!(slices[0].departure_date, "2026-03-01");
}

#[test]
fn return_date_builds_mirrored_second_slice() {
    let mut q = make_valid_query();
    q.return_date = Some("2026-03-10".into());
    let slices = q.to_slices();
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[1].origin, "BCN");
    assert_eq!(slices[1].destination, "HEL");
    assert_eq!(slices[1].departure_date, "2026-03-10");
}

#[test]
fn passenger_counts_expand_to_specs() {
    let mut q = make_valid_query();
    q.passengers = Passengers {
        adults: 2,
        children: 1,
        infants: 1,
    };
    let specs = q.to_passengers();
    assert_eq!(specs.len(), 4);
    assert_eq!(
        specs
            .iter()
            .filter(|s| s.kind == PassengerType::Adult)
            .count(),
        2
    );
    assert_eq!(
        specs
            .iter()
            .filter(|s| s.kind == PassengerType::Child)
            .count(),
        1
    );
    assert_eq!(
        specs
            .iter()
            .filter(|s| s.kind == PassengerType::InfantWithoutSeat)
            .count(),
        1
    );
}

#[test]
fn cabin_class_parses_loosely() {
    assert!(CabinClass::from_str_loose("economy").is_ok());
    assert!(CabinClass::from_str_loose("premium-economy").is_ok());
    assert!(CabinClass::from_str_loose("premium_economy").is_ok());
    assert!(CabinClass::from_str_loose("business").is_ok());
    assert!(CabinClass::from_str_loose("first").is_ok());
    assert!(CabinClass::from_str_loose("steerage").is_err());
}

#[test]
fn offer_request_serializes_snake_case_enums() {
    let mut q = make_valid_query();
    q.cabin = CabinClass::PremiumEconomy;
    q.passengers.infants = 1;
    let body = serde_json::to_value(q.to_offer_request()).unwrap();
    assert_eq!(body["cabin_class"], "premium_economy");
    assert_eq!(body["passengers"][1]["type"], "infant_without_seat");
}
