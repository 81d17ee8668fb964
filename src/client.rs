use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use wreq::Client;

use crate::error::{self, ApiError};
use crate::model::{
    Airline, Airport, ApiResponse, ConnectionReport, ErrorBody, Offer, OfferFilter, OfferRequest,
    OfferRequestCreated, Order, OrderRequest, PricedOffer,
};
use crate::pricing;
use crate::query::FlightQuery;
use crate::rank;

const BASE_URL: &str = "https://api.duffel.com";
const API_VERSION: &str = "v2";

/// Candidates requested upstream before local re-scoring.
const AIRPORT_CANDIDATES: u32 = 50;

/// Offers fetched for a composite flight search.
const OFFER_PAGE: u32 = 50;

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Bearer credential. The library never reads the environment; the
    /// composition root resolves the ambient token and passes it here.
    pub api_token: Option<String>,
    /// Upstream base, overridable for tests and proxies.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AirportSearch {
    pub query: String,
    pub limit: Option<usize>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<u32>,
}

impl AirportSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            latitude: None,
            longitude: None,
            radius_km: None,
        }
    }
}

enum Method {
    Get,
    Post,
}

/// Typed client for the Duffel flight-booking API. Holds no mutable state
/// after construction, so one instance is safe to share across tasks.
pub struct DuffelClient {
    token: Option<String>,
    base_url: String,
}

impl DuffelClient {
    pub fn new(options: ClientOptions) -> Self {
        Self {
            token: options.api_token,
            base_url: options
                .base_url
                .unwrap_or_else(|| BASE_URL.to_string()),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(ClientOptions {
            api_token: Some(token.into()),
            base_url: None,
        })
    }

    fn token(&self) -> Result<&str, ApiError> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken)
    }

    /// Core request primitive: every operation funnels through here. The
    /// token is checked before any network activity, the body is parsed as
    /// JSON unconditionally, and transport failures are mapped into the
    /// connectivity variants so callers can tell "upstream rejected the
    /// request" from "could not reach upstream".
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let token = self.token()?;

        let client = Client::builder().build().map_err(error::from_http_error)?;
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
        }
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .header("Duffel-Version", API_VERSION)
        .header("Authorization", format!("Bearer {token}"));

        if !query.is_empty() {
            request = request.query(&query);
        }

        if let Some(ref body) = body {
            request = request.body(serde_json::to_string(body)?);
        }

        let response = request.send().await.map_err(error::from_http_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(error::from_http_error)?;

        decode_response(status, &text)
    }

    /// Free-text airport search. Fetches up to 50 candidates upstream,
    /// then re-scores, filters, and truncates locally (see [`rank`]).
    pub async fn search_airports(&self, search: &AirportSearch) -> Result<Vec<Airport>, ApiError> {
        let mut params = vec![
            ("query".to_string(), search.query.clone()),
            ("limit".to_string(), AIRPORT_CANDIDATES.to_string()),
        ];
        if let (Some(lat), Some(lng)) = (search.latitude, search.longitude) {
            params.push(("lat".to_string(), lat.to_string()));
            params.push(("lng".to_string(), lng.to_string()));
            if let Some(radius) = search.radius_km {
                let meters = radius.saturating_mul(1000);
                params.push(("rad".to_string(), meters.to_string()));
            }
        }

        let response: ApiResponse<Vec<Airport>> = self
            .send(Method::Get, "/places/suggestions", &params, None)
            .await?;

        let limit = search.limit.unwrap_or(rank::DEFAULT_LIMIT);
        Ok(rank::rank_airports(response.data, &search.query, limit))
    }

    /// Paginated pass-through; `meta` carries the cursors.
    pub async fn list_airlines(
        &self,
        limit: Option<u32>,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Result<ApiResponse<Vec<Airline>>, ApiError> {
        let mut params = Vec::new();
        if let Some(limit) = limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(after) = after {
            params.push(("after".to_string(), after.to_string()));
        }
        if let Some(before) = before {
            params.push(("before".to_string(), before.to_string()));
        }

        self.send(Method::Get, "/air/airlines", &params, None).await
    }

    /// Submits search criteria; the returned id feeds [`list_offers`].
    /// Inline offers are suppressed since they are fetched separately.
    ///
    /// [`list_offers`]: DuffelClient::list_offers
    pub async fn create_offer_request(
        &self,
        request: &OfferRequest,
    ) -> Result<OfferRequestCreated, ApiError> {
        let params = vec![("return_offers".to_string(), "false".to_string())];
        let body = json!({ "data": request });

        let response: ApiResponse<OfferRequestCreated> = self
            .send(Method::Post, "/air/offer_requests", &params, Some(body))
            .await?;
        Ok(response.data)
    }

    pub async fn list_offers(&self, filter: &OfferFilter) -> Result<Vec<Offer>, ApiError> {
        let mut params = vec![(
            "offer_request_id".to_string(),
            filter.offer_request_id.clone(),
        )];
        if let Some(limit) = filter.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(ref sort) = filter.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(max) = filter.max_connections {
            params.push(("max_connections".to_string(), max.to_string()));
        }

        let response: ApiResponse<Vec<Offer>> =
            self.send(Method::Get, "/air/offers", &params, None).await?;

        let mut offers = response.data;
        if let Some(ref airlines) = filter.airlines {
            offers.retain(|o| {
                o.owner
                    .iata_code
                    .as_deref()
                    .is_some_and(|code| airlines.iter().any(|a| a == code))
            });
        }
        Ok(offers)
    }

    /// Submits a booking. Payment data is forwarded verbatim to the
    /// upstream; nothing is stored or validated locally.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        let body = json!({ "data": request });
        let response: ApiResponse<Order> = self
            .send(Method::Post, "/air/orders", &[], Some(body))
            .await?;
        Ok(response.data)
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Order, ApiError> {
        let path = format!("/air/orders/{order_id}");
        let response: ApiResponse<Order> = self.send(Method::Get, &path, &[], None).await?;
        Ok(response.data)
    }

    /// Best-effort connectivity probe. Each probe's failure is swallowed
    /// independently; the report lists whichever capabilities answered.
    /// Never fails.
    pub async fn test_connection(&self) -> ConnectionReport {
        let mut capabilities = Vec::new();

        if self.list_airlines(Some(1), None, None).await.is_ok() {
            capabilities.push("airlines".to_string());
        }

        let mut probe = AirportSearch::new("lon");
        probe.limit = Some(1);
        if self.search_airports(&probe).await.is_ok() {
            capabilities.push("airports".to_string());
        }

        ConnectionReport {
            connected: !capabilities.is_empty(),
            capabilities,
        }
    }

    /// Composite search: offer request, then offers sorted by ascending
    /// total amount, each run through the pricing transform exactly once.
    /// Failures are logged here (message only) and propagated; no retries.
    pub async fn search_flights(&self, query: &FlightQuery) -> Result<Vec<PricedOffer>, ApiError> {
        let result = self.search_flights_inner(query).await;
        if let Err(ref err) = result {
            tracing::error!("flight search failed: {err}");
        }
        result
    }

    async fn search_flights_inner(
        &self,
        query: &FlightQuery,
    ) -> Result<Vec<PricedOffer>, ApiError> {
        query.validate()?;

        let created = self.create_offer_request(&query.to_offer_request()).await?;

        let filter = OfferFilter {
            offer_request_id: created.id,
            limit: Some(OFFER_PAGE),
            sort: Some("total_amount".to_string()),
            max_connections: query.max_connections,
            airlines: None,
        };
        let offers = self.list_offers(&filter).await?;

        let mut priced = Vec::with_capacity(offers.len());
        for mut offer in offers {
            let original = offer.total_amount.clone();
            let display = pricing::price_amount(&original)?;
            offer.total_amount = display.clone();
            priced.push(PricedOffer {
                offer,
                original_amount: original,
                display_price: display,
            });
        }

        Ok(priced)
    }
}

/// Decodes one upstream response: the body is parsed as JSON no matter the
/// status, a non-2xx status fails with the first structured error entry
/// (falling back to the bare status code), and a 2xx body is deserialized
/// into the typed envelope.
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<ApiResponse<T>, ApiError> {
    let value: Value = serde_json::from_str(body)?;

    if !(200..300).contains(&status) {
        let message =
            first_error_message(&value).unwrap_or_else(|| format!("HTTP {status}"));
        return Err(ApiError::Api { status, message });
    }

    Ok(serde_json::from_value(value)?)
}

fn first_error_message(value: &Value) -> Option<String> {
    let body: ErrorBody = serde_json::from_value(value.clone()).ok()?;
    let detail = body.errors.into_iter().next()?;
    detail.message.or(detail.title)
}
