use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Envelope every successful Duffel response arrives in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub request_id: Option<String>,
    pub status: Option<u16>,
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Envelope error responses arrive in.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
    pub documentation_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub iata_code: Option<String>,
    pub icao_code: Option<String>,
    pub city_name: Option<String>,
    pub iata_country_code: Option<String>,
    pub time_zone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airline {
    pub id: String,
    pub name: String,
    pub iata_code: Option<String>,
    pub icao_code: Option<String>,
    pub logo_symbol_url: Option<String>,
    pub logo_lockup_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub name: String,
    pub iata_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub origin: Airport,
    pub destination: Airport,
    pub departing_at: String,
    pub arriving_at: String,
    pub marketing_carrier: Airline,
    pub operating_carrier: Option<Airline>,
    pub marketing_carrier_flight_number: Option<String>,
    pub duration: Option<String>,
    pub aircraft: Option<Aircraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    pub id: Option<String>,
    pub origin: Airport,
    pub destination: Airport,
    pub duration: Option<String>,
    pub segments: Vec<Segment>,
}

/// A perishable flight quote. Valid only until `expires_at`; must not be
/// reused for booking after expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub owner: Airline,
    pub slices: Vec<Slice>,
    pub total_amount: String,
    pub total_currency: String,
    pub tax_amount: Option<String>,
    pub base_amount: Option<String>,
    pub expires_at: String,
    pub conditions: Option<OfferConditions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferConditions {
    pub change_before_departure: Option<ConditionDetail>,
    pub refund_before_departure: Option<ConditionDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDetail {
    pub allowed: bool,
    pub penalty_amount: Option<String>,
    pub penalty_currency: Option<String>,
}

/// An [`Offer`] after the pricing transform: `total_amount` and
/// `display_price` carry the marked-up price, `original_amount` the
/// untouched upstream amount.
#[derive(Debug, Clone, Serialize)]
pub struct PricedOffer {
    #[serde(flatten)]
    pub offer: Offer,
    pub original_amount: String,
    pub display_price: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferRequestSlice {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerType {
    Adult,
    Child,
    InfantWithoutSeat,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassengerSpec {
    #[serde(rename = "type")]
    pub kind: PassengerType,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferRequest {
    pub slices: Vec<OfferRequestSlice>,
    pub passengers: Vec<PassengerSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<CabinClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

/// The upstream's record of a submitted search. Only the id matters to us;
/// offers are fetched with a separate list call.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferRequestCreated {
    pub id: String,
    pub live_mode: Option<bool>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub offer_request_id: String,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    pub max_connections: Option<u32>,
    /// Keep only offers owned by these airlines (IATA codes). Applied
    /// locally; the upstream has no airline parameter on this endpoint.
    pub airlines: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub selected_offers: Vec<String>,
    pub passengers: Vec<OrderPassenger>,
    pub payments: Vec<OrderPayment>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderPassenger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub given_name: String,
    pub family_name: String,
    pub gender: String,
    pub born_on: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_documents: Option<Vec<IdentityDocument>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentityDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub unique_identifier: String,
    pub issuing_country_code: String,
    pub expires_on: String,
}

/// Payment instruction forwarded verbatim to the upstream. Card data is
/// never stored or validated locally.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderPayment {
    Balance {
        amount: String,
        currency: String,
    },
    Card {
        amount: String,
        currency: String,
        card: CardDetails,
    },
    #[serde(rename = "arc_bsp_cash")]
    Cash {
        amount: String,
        currency: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct CardDetails {
    pub number: String,
    pub cvc: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub booking_reference: Option<String>,
    pub owner: Option<Airline>,
    #[serde(default)]
    pub slices: Vec<Slice>,
    pub total_amount: String,
    pub total_currency: String,
    pub created_at: Option<String>,
    pub live_mode: Option<bool>,
}

/// Outcome of the best-effort connectivity probe. Absence of a capability
/// means that probe did not succeed, nothing more.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionReport {
    pub connected: bool,
    pub capabilities: Vec<String>,
}
