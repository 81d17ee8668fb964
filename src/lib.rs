pub mod client;
pub mod error;
pub mod model;
pub mod pricing;
pub mod query;
pub mod rank;
pub mod table;

pub use client::{AirportSearch, ClientOptions, DuffelClient};
pub use error::ApiError;

use model::PricedOffer;
use query::FlightQuery;

pub async fn search(
    client: &DuffelClient,
    query: &FlightQuery,
) -> Result<Vec<PricedOffer>, ApiError> {
    client.search_flights(query).await
}
