use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for a published message.
///
/// Notes:
/// - `event_id` is a UUIDv7, so ids sort by publication time.
/// - `sequence_number` is monotonically increasing per publisher (one engine).
/// - `payload` is the domain message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    sequence_number: u64,
    published_at: DateTime<Utc>,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, sequence_number: u64, published_at: DateTime<Utc>, payload: E) -> Self {
        Self {
            event_id,
            sequence_number,
            published_at,
            payload,
        }
    }

    /// Wrap `payload` with a fresh time-ordered id.
    pub fn wrap(sequence_number: u64, payload: E) -> Self {
        Self::new(Uuid::now_v7(), sequence_number, Utc::now(), payload)
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
