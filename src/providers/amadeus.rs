//! Amadeus flight-offers client
//!
//! OAuth2 client-credentials token plus the flight-offers search
//! endpoint, mapped into [`FlightOption`] payloads.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::planner::task::{DataSource, FlightOption};

const AMADEUS_TEST_BASE_URL: &str = "https://test.api.amadeus.com";

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Amadeus API client with a cached bearer token
#[derive(Clone)]
pub struct AmadeusClient {
    client: Arc<Client>,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct OffersResponse {
    #[serde(default)]
    data: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
struct Offer {
    price: OfferPrice,
    itineraries: Vec<OfferItinerary>,
}

#[derive(Debug, Deserialize)]
struct OfferPrice {
    #[serde(rename = "grandTotal")]
    grand_total: String,
}

#[derive(Debug, Deserialize)]
struct OfferItinerary {
    duration: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(rename = "carrierCode")]
    carrier_code: String,
    number: String,
    departure: SegmentPoint,
    arrival: SegmentPoint,
}

#[derive(Debug, Deserialize)]
struct SegmentPoint {
    #[serde(rename = "iataCode")]
    iata_code: String,
    /// ISO timestamp, e.g. "2026-11-23T08:00:00"
    at: String,
}

impl AmadeusClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_url(client_id, client_secret, AMADEUS_TEST_BASE_URL.to_string())
    }

    pub fn with_base_url(client_id: String, client_secret: String, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url,
            client_id,
            client_secret,
            token: Arc::new(Mutex::new(None)),
        }
    }

    async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(t) = cached.as_ref() {
            if t.expires_at > Instant::now() {
                return Ok(t.token.clone());
            }
        }

        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .context("Amadeus token request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Amadeus token endpoint returned {}: {}", status, body);
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("failed to parse Amadeus token response")?;

        // Refresh a minute early to avoid using an expiring token
        let expires_at =
            Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60).max(30));
        let bearer = token.access_token.clone();
        *cached = Some(CachedToken {
            token: token.access_token,
            expires_at,
        });
        Ok(bearer)
    }

    /// Search one-way flight offers for a route and date
    pub async fn search_flights(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        adults: u32,
        max_price: Decimal,
    ) -> Result<Vec<FlightOption>> {
        let token = self.bearer_token().await?;
        debug!(%origin, %destination, %departure_date, "searching flight offers");

        let response = self
            .client
            .get(format!("{}/v2/shopping/flight-offers", self.base_url))
            .bearer_auth(token)
            .query(&[
                ("originLocationCode", origin.to_string()),
                ("destinationLocationCode", destination.to_string()),
                ("departureDate", departure_date.to_string()),
                ("adults", adults.to_string()),
                ("maxPrice", max_price.round().to_string()),
                ("currencyCode", "INR".to_string()),
                ("max", "5".to_string()),
            ])
            .send()
            .await
            .context("flight offers request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("flight offers endpoint returned {}: {}", status, body);
        }

        let offers: OffersResponse = response
            .json()
            .await
            .context("failed to parse flight offers response")?;

        let mut flights = Vec::new();
        for offer in offers.data {
            if let Some(flight) = map_offer(&offer) {
                flights.push(flight);
            }
        }
        flights.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(flights)
    }
}

fn map_offer(offer: &Offer) -> Option<FlightOption> {
    let itinerary = offer.itineraries.first()?;
    let first = itinerary.segments.first()?;
    let last = itinerary.segments.last()?;
    let price: Decimal = offer.price.grand_total.parse().ok()?;

    Some(FlightOption {
        airline: first.carrier_code.clone(),
        flight_number: format!("{}{}", first.carrier_code, first.number),
        route: format!("{} -> {}", first.departure.iata_code, last.arrival.iata_code),
        departure_time: time_part(&first.departure.at),
        arrival_time: time_part(&last.arrival.at),
        duration: humanize_duration(&itinerary.duration),
        cabin_class: "Economy".to_string(),
        price,
        stops: itinerary.segments.len().saturating_sub(1) as u32,
        source: DataSource::Live,
    })
}

/// "2026-11-23T08:00:00" -> "08:00"
fn time_part(iso: &str) -> String {
    iso.split('T')
        .nth(1)
        .map(|t| t.chars().take(5).collect())
        .unwrap_or_else(|| iso.to_string())
}

/// ISO-8601 duration "PT2H10M" -> "2h10m"
fn humanize_duration(iso: &str) -> String {
    iso.trim_start_matches("PT").to_lowercase()
}
