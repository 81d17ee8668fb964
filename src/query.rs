use crate::error::ApiError;
use crate::model::{
    CabinClass, OfferRequest, OfferRequestSlice, PassengerSpec, PassengerType,
};

#[derive(Debug, Clone)]
pub struct Passengers {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

impl CabinClass {
    pub fn from_str_loose(s: &str) -> Result<Self, ApiError> {
        match s {
            "economy" => Ok(Self::Economy),
            "premium-economy" | "premium_economy" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(ApiError::Validation(format!("invalid cabin class: {s}"))),
        }
    }
}

/// Input to the composite flight search: one outbound slice, an optional
/// return slice, passenger counts, and cabin/connection constraints.
#[derive(Debug, Clone)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passengers: Passengers,
    pub cabin: CabinClass,
    pub max_connections: Option<u32>,
}

fn validate_airport(code: &str) -> Result<(), ApiError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ApiError::InvalidAirport(code.to_string()));
    }
    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year.is_multiple_of(4) && !year.is_multiple_of(100)) || year.is_multiple_of(400) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn validate_date(date: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 {
        return Err(ApiError::InvalidDate(date.to_string()));
    }
    let year: u32 = parts[0]
        .parse()
        .map_err(|_| ApiError::InvalidDate(date.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| ApiError::InvalidDate(date.to_string()))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| ApiError::InvalidDate(date.to_string()))?;

    if year < 2000 || !(1..=12).contains(&month) {
        return Err(ApiError::InvalidDate(date.to_string()));
    }

    if day < 1 || day > days_in_month(year, month) {
        return Err(ApiError::InvalidDate(date.to_string()));
    }

    Ok(())
}

impl FlightQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_airport(&self.origin)?;
        validate_airport(&self.destination)?;
        validate_date(&self.departure_date)?;

        if let Some(ref ret) = self.return_date {
            validate_date(ret)?;
            if ret.as_str() < self.departure_date.as_str() {
                return Err(ApiError::Validation(format!(
                    "return date {ret} is before departure date {}",
                    self.departure_date
                )));
            }
        }

        let total = self.passengers.adults + self.passengers.children + self.passengers.infants;

        if total == 0 {
            return Err(ApiError::Validation(
                "at least one passenger required".into(),
            ));
        }

        if total > 9 {
            return Err(ApiError::Validation(format!(
                "total passengers ({total}) exceeds maximum of 9"
            )));
        }

        if self.passengers.infants > self.passengers.adults {
            return Err(ApiError::Validation(
                "infants cannot exceed number of adults".into(),
            ));
        }

        Ok(())
    }

    /// One slice per directional leg: outbound always, return when a
    /// return date is set.
    pub fn to_slices(&self) -> Vec<OfferRequestSlice> {
        let mut slices = vec![OfferRequestSlice {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date.clone(),
        }];

        if let Some(ref ret) = self.return_date {
            slices.push(OfferRequestSlice {
                origin: self.destination.clone(),
                destination: self.origin.clone(),
                departure_date: ret.clone(),
            });
        }

        slices
    }

    pub fn to_passengers(&self) -> Vec<PassengerSpec> {
        let mut passengers = Vec::new();
        for _ in 0..self.passengers.adults {
            passengers.push(PassengerSpec {
                kind: PassengerType::Adult,
            });
        }
        for _ in 0..self.passengers.children {
            passengers.push(PassengerSpec {
                kind: PassengerType::Child,
            });
        }
        for _ in 0..self.passengers.infants {
            passengers.push(PassengerSpec {
                kind: PassengerType::InfantWithoutSeat,
            });
        }
        passengers
    }

    pub fn to_offer_request(&self) -> OfferRequest {
        OfferRequest {
            slices: self.to_slices(),
            passengers: self.to_passengers(),
            cabin_class: Some(self.cabin),
            max_connections: self.max_connections,
        }
    }
}
