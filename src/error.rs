use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    MissingToken,
    Api { status: u16, message: String },
    Timeout,
    ConnectionFailed(String),
    DnsResolution(String),
    TlsError(String),
    Json(serde_json::Error),
    InvalidAirport(String),
    InvalidDate(String),
    Validation(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(
                f,
                "no Duffel API token configured — pass --token or set DUFFEL_API_TOKEN"
            ),
            Self::Api { status, message } => {
                write!(f, "Duffel API error (HTTP {status}): {message}")
            }
            Self::Timeout => write!(
                f,
                "request timed out — the Duffel API may be slow or unreachable. \
                 Check your connection and try again"
            ),
            Self::ConnectionFailed(detail) => write!(
                f,
                "could not reach the Duffel API — check your internet connection ({detail})"
            ),
            Self::DnsResolution(host) => write!(
                f,
                "DNS resolution failed for {host} — check your internet connection"
            ),
            Self::TlsError(detail) => write!(
                f,
                "TLS/SSL error — secure connection to the Duffel API failed ({detail})"
            ),
            Self::Json(err) => write!(f, "failed to parse Duffel API response: {err}"),
            Self::InvalidAirport(code) => write!(
                f,
                "invalid airport code \"{code}\" — must be exactly 3 letters (e.g. JFK, LHR, NRT)"
            ),
            Self::InvalidDate(date) => write!(
                f,
                "invalid date \"{date}\" — must be YYYY-MM-DD format (e.g. 2026-03-01)"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub fn from_http_error(err: wreq::Error) -> ApiError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return ApiError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return ApiError::DnsResolution(msg);
        }
        return ApiError::ConnectionFailed(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return ApiError::TlsError(msg);
    }

    ApiError::ConnectionFailed(msg)
}
