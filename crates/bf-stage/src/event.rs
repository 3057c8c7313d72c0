//! StageEvent — A stage occurrence with metadata
//!
//! Wraps a Stage with timing, payload, and source information.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;
use crate::taxonomy::{PlayerId, TicketId};

/// A stage event with full metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Timestamp in milliseconds (from start of draw or round)
    pub timestamp_ms: f64,

    /// Additional payload data
    #[serde(default)]
    pub payload: StagePayload,

    /// Original event name from engine (for debugging)
    #[serde(default)]
    pub source_event: Option<String>,

    /// Custom tags for filtering/routing
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
            payload: StagePayload::default(),
            source_event: None,
            tags: Vec::new(),
        }
    }

    /// Create with payload
    pub fn with_payload(stage: Stage, timestamp_ms: f64, payload: StagePayload) -> Self {
        Self {
            stage,
            timestamp_ms,
            payload,
            source_event: None,
            tags: Vec::new(),
        }
    }

    /// Add source event info
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_event = Some(source.into());
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}

/// Additional payload data for a stage event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagePayload {
    /// Ticket the event concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<TicketId>,

    /// Owning player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,

    /// Called number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u8>,

    /// Running score after the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,

    /// Marked cells on the ticket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked_count: Option<u8>,

    /// 1-based call index within the round
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_index: Option<u8>,

    /// Prize amount (currency units)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prize_amount: Option<f64>,

    /// Arbitrary JSON for host-specific data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Value>,
}

impl StagePayload {
    /// Create empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with ticket data
    pub fn with_ticket(ticket_id: TicketId) -> Self {
        Self {
            ticket_id: Some(ticket_id),
            player_id: Some(ticket_id.player),
            ..Default::default()
        }
    }

    /// Builder: set called number
    pub fn number(mut self, number: u8) -> Self {
        self.number = Some(number);
        self
    }

    /// Builder: set score
    pub fn score(mut self, score: u8) -> Self {
        self.score = Some(score);
        self
    }

    /// Builder: set marked count
    pub fn marked_count(mut self, count: u8) -> Self {
        self.marked_count = Some(count);
        self
    }

    /// Builder: set call index
    pub fn call_index(mut self, index: u8) -> Self {
        self.call_index = Some(index);
        self
    }

    /// Builder: set prize amount
    pub fn prize_amount(mut self, amount: f64) -> Self {
        self.prize_amount = Some(amount);
        self
    }

    /// Builder: set custom data
    pub fn custom(mut self, data: serde_json::Value) -> Self {
        self.custom = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_event_creation() {
        let event = StageEvent::new(
            Stage::NumberCalled {
                number: 13,
                call_index: 4,
            },
            1200.0,
        )
        .with_source("call_next")
        .with_tag("user_initiated");

        assert_eq!(event.timestamp_ms, 1200.0);
        assert_eq!(event.type_name(), "number_called");
        assert_eq!(event.source_event, Some("call_next".to_string()));
        assert!(event.tags.contains(&"user_initiated".to_string()));
    }

    #[test]
    fn test_payload_builder() {
        let id = TicketId::new(2, 1);
        let payload = StagePayload::with_ticket(id).number(77).score(88).marked_count(6);

        assert_eq!(payload.ticket_id, Some(id));
        assert_eq!(payload.player_id, Some(2));
        assert_eq!(payload.number, Some(77));
        assert_eq!(payload.score, Some(88));
        assert_eq!(payload.marked_count, Some(6));
    }

    #[test]
    fn test_payload_serialization() {
        let payload = StagePayload::new().prize_amount(0.24).call_index(10);

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("prize_amount"));
        assert!(json.contains("call_index"));

        // Empty fields should be skipped
        assert!(!json.contains("ticket_id"));
        assert!(!json.contains("custom"));
    }
}
