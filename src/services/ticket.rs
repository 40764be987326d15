//! Ticket issuance and check-in
//!
//! Two-step protocol: a registered participant requests a short-lived signed
//! ticket (rendered as a QR code by the client), and event staff verify it
//! at the door. Expiry bounds the exposure window of a displayed code; the
//! single-latest-jti rule stored on the registration makes a superseded
//! token worthless the moment a fresh one is issued.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::TicketConfig;
use crate::database::{EventRepository, RegistrationRepository};
use crate::models::registration::RegistrationStatus;
use crate::models::user::UserContext;
use crate::utils::errors::{Result, UniVibeError};

const TOKEN_TYPE: &str = "checkin";

/// Claims embedded in a check-in token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInClaims {
    /// Type marker, always `"checkin"`
    pub typ: String,
    /// Event the ticket is valid for
    pub evt: Uuid,
    /// Registration the ticket belongs to
    pub reg: Uuid,
    /// Ticket holder
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    /// Unique token id, compared against the registration's anti-replay marker
    pub jti: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedTicket {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResult {
    pub registration_id: Uuid,
    pub status: RegistrationStatus,
    pub check_in_time: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TicketService {
    events: EventRepository,
    registrations: RegistrationRepository,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TicketService {
    pub fn new(
        events: EventRepository,
        registrations: RegistrationRepository,
        config: &TicketConfig,
    ) -> Self {
        Self {
            events,
            registrations,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::seconds(config.ttl_seconds as i64),
        }
    }

    /// Issue a fresh check-in ticket for the user's registration.
    ///
    /// Persisting the new jti on the registration invalidates every
    /// previously issued ticket for it.
    pub async fn issue_ticket(&self, event_id: Uuid, user_id: Uuid) -> Result<IssuedTicket> {
        debug!(event_id = %event_id, user_id = %user_id, "Ticket requested");

        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let registration = self
            .registrations
            .find_by_pair(event_id, user_id)
            .await?
            .ok_or(UniVibeError::NotJoined)?;

        if registration.status != RegistrationStatus::Registered {
            return Err(UniVibeError::InvalidState(format!(
                "Cannot issue ticket for a registration in '{}' state",
                registration.status
            )));
        }

        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = CheckInClaims {
            typ: TOKEN_TYPE.to_string(),
            evt: event_id,
            reg: registration.id,
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| UniVibeError::InvalidState("Failed to sign ticket".to_string()))?;

        self.registrations
            .set_ticket_marker(registration.id, &claims.jti, expires_at)
            .await?
            .ok_or_else(|| {
                UniVibeError::InvalidState("Registration is no longer registered".to_string())
            })?;

        info!(
            event_id = %event_id,
            user_id = %user_id,
            registration_id = %registration.id,
            "Check-in ticket issued"
        );

        Ok(IssuedTicket { token, expires_at })
    }

    /// Verify a ticket and transition the registration to `attended`.
    pub async fn check_in(
        &self,
        event_id: Uuid,
        token: &str,
        checker: &UserContext,
    ) -> Result<CheckInResult> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| UniVibeError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let claims = self.decode_token(token)?;

        if claims.evt != event_id {
            warn!(
                event_id = %event_id,
                token_event = %claims.evt,
                "Check-in token presented at the wrong event"
            );
            return Err(UniVibeError::TokenMismatch);
        }

        let registration = self
            .registrations
            .find_by_id(claims.reg)
            .await?
            .ok_or(UniVibeError::RegistrationNotFound {
                registration_id: claims.reg,
            })?;

        if registration.event_id != claims.evt || registration.user_id != claims.sub {
            return Err(UniVibeError::RegistrationNotFound {
                registration_id: claims.reg,
            });
        }

        if registration.last_jti.as_deref() != Some(claims.jti.as_str()) {
            return Err(UniVibeError::TokenSuperseded);
        }

        if registration.status != RegistrationStatus::Registered {
            return Err(UniVibeError::InvalidState(format!(
                "Registration is in '{}' state",
                registration.status
            )));
        }

        // Conditional update is the atomic guard; a concurrent check-in with
        // the same token loses here even though the pre-checks passed.
        let updated = self
            .registrations
            .mark_attended(registration.id, &claims.jti, checker.user_id)
            .await?
            .ok_or_else(|| {
                UniVibeError::InvalidState("Registration was checked in concurrently".to_string())
            })?;

        info!(
            event_id = %event_id,
            registration_id = %updated.id,
            checked_in_by = %checker.user_id,
            "Participant checked in"
        );

        Ok(CheckInResult {
            registration_id: updated.id,
            status: updated.status,
            check_in_time: updated.checked_in_at.unwrap_or_else(Utc::now),
        })
    }

    fn decode_token(&self, token: &str) -> Result<CheckInClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = decode::<CheckInClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| UniVibeError::InvalidToken)?;

        if data.claims.typ != TOKEN_TYPE {
            return Err(UniVibeError::InvalidToken);
        }

        Ok(data.claims)
    }
}
