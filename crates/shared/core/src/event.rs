use crate::entity::Entity;
use crate::values::{Symbol, Timestamp};
use serde::{Deserialize, Serialize};

/// A single decoded swap event as delivered by the event transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapEvent {
    pub tx_hash: String,
    pub token_from: Symbol,
    pub token_to: Symbol,
    pub amount_from: f64,
    pub amount_to: f64,
    pub usd_value: f64,
    pub timestamp: Timestamp,
}

impl SwapEvent {
    /// The directional pair entity for this swap, in event order
    pub fn pair(&self) -> Entity {
        Entity::pair(self.token_from.clone(), self.token_to.clone())
    }

    /// The three entities this event increments, in processing order:
    /// from-token, to-token, pair
    pub fn entities(&self) -> [Entity; 3] {
        [
            Entity::token(self.token_from.clone()),
            Entity::token(self.token_to.clone()),
            self.pair(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_event() -> SwapEvent {
        SwapEvent {
            tx_hash: "ab12".to_string(),
            token_from: "ETH".to_string(),
            token_to: "USDT".to_string(),
            amount_from: 2.0,
            amount_to: 8400.0,
            usd_value: 8400.0,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_entities_in_processing_order() {
        let event = sample_event();
        let [from, to, pair] = event.entities();

        assert_eq!(from, Entity::token("ETH"));
        assert_eq!(to, Entity::token("USDT"));
        assert_eq!(pair, Entity::pair("ETH", "USDT"));
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(json["tx_hash"], "ab12");
        assert_eq!(json["token_from"], "ETH");
        assert_eq!(json["token_to"], "USDT");
        assert_eq!(json["amount_from"], 2.0);
        assert_eq!(json["usd_value"], 8400.0);
        assert!(json["timestamp"].is_string());
    }
}
