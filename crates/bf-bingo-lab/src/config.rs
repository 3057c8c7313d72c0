//! Bingo engine configuration

use serde::{Deserialize, Serialize};

use bf_stage::PrizeKind;

/// Highest callable number; the pool is 1..=MAX_NUMBER.
pub const MAX_NUMBER: u8 = 100;

/// Distinct numbers assigned to every ticket.
pub const NUMBERS_PER_TICKET: usize = 10;

/// Rows per ticket grid.
pub const TICKET_ROWS: usize = 2;

/// Columns per ticket grid.
pub const TICKET_COLS: usize = 9;

/// Maximum numbers a single grid column may hold (one per row).
pub const COLUMN_CAPACITY: usize = 2;

/// Filled cells per grid row.
pub const NUMBERS_PER_ROW: usize = 5;

/// Inclusive value bands per grid column. The last band is wider to close
/// the range at 100.
pub const COLUMN_BANDS: [(u8, u8); TICKET_COLS] = [
    (1, 11),
    (12, 22),
    (23, 33),
    (34, 44),
    (45, 55),
    (56, 66),
    (67, 77),
    (78, 88),
    (89, 100),
];

/// Inclusive band for a grid column.
pub fn column_band(col: usize) -> (u8, u8) {
    COLUMN_BANDS[col]
}

/// Grid column whose band contains `number`.
pub fn column_for(number: u8) -> usize {
    COLUMN_BANDS
        .iter()
        .position(|&(lo, hi)| number >= lo && number <= hi)
        .unwrap_or(TICKET_COLS - 1)
}

/// Session configuration consumed by the call engine and prize resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BingoConfig {
    /// Tickets per player, clamped to [1, 20] at round start
    pub tickets_per_player: u16,
    /// Simulated opponents, clamped to [1, 100] at round start
    pub opponents: u16,
    /// Price per ticket (currency units)
    pub ticket_price: f64,
    /// RTP split between the two prizes
    pub prize_split: PrizeSplit,
}

impl BingoConfig {
    /// Allowed range for tickets per player
    pub const TICKETS_PER_PLAYER: (u16, u16) = (1, 20);
    /// Allowed range for opponent count
    pub const OPPONENTS: (u16, u16) = (1, 100);

    /// Copy with out-of-range counts clamped into their allowed ranges
    pub fn normalized(&self) -> Self {
        let (t_lo, t_hi) = Self::TICKETS_PER_PLAYER;
        let (o_lo, o_hi) = Self::OPPONENTS;
        Self {
            tickets_per_player: self.tickets_per_player.clamp(t_lo, t_hi),
            opponents: self.opponents.clamp(o_lo, o_hi),
            ..self.clone()
        }
    }

    /// Players in the round (human + opponents)
    pub fn players(&self) -> u16 {
        1 + self.opponents
    }

    /// Tickets across all players
    pub fn total_tickets(&self) -> u32 {
        self.players() as u32 * self.tickets_per_player as u32
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate monetary fields; counts are clamped rather than rejected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ticket_price.is_finite() || self.ticket_price <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "ticket price must be positive, got {}",
                self.ticket_price
            )));
        }
        self.prize_split.validate()
    }
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            tickets_per_player: 4,
            opponents: 1,
            ticket_price: 0.10,
            prize_split: PrizeSplit::default(),
        }
    }
}

/// Fraction of the total stake returned through each prize
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PrizeSplit {
    pub full_house: f64,
    pub total_score: f64,
}

impl PrizeSplit {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, share) in [("full_house", self.full_house), ("total_score", self.total_score)] {
            if !(0.0..=1.0).contains(&share) {
                return Err(ConfigError::Validation(format!(
                    "{name} share must be in [0, 1], got {share}"
                )));
            }
        }
        if self.full_house + self.total_score > 1.0 {
            return Err(ConfigError::Validation(
                "prize shares exceed 100% of stake".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PrizeSplit {
    fn default() -> Self {
        Self {
            full_house: 0.30,
            total_score: 0.55,
        }
    }
}

/// Prize amounts derived once per round from the configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RtpAmounts {
    /// Total stake (tickets × price)
    pub base: f64,
    /// Full House payout
    pub full_house: f64,
    /// Total Score payout
    pub total_score: f64,
}

impl RtpAmounts {
    /// Compute payouts from a configuration
    pub fn from_config(config: &BingoConfig) -> Self {
        let base = config.total_tickets() as f64 * config.ticket_price;
        Self {
            base,
            full_house: round_to_pence(base * config.prize_split.full_house),
            total_score: round_to_pence(base * config.prize_split.total_score),
        }
    }

    /// Payout for a prize kind
    pub fn amount(&self, prize: PrizeKind) -> f64 {
        match prize {
            PrizeKind::FullHouse => self.full_house,
            PrizeKind::TotalScore => self.total_score,
        }
    }
}

/// Round to the nearest currency minor unit, half up
pub fn round_to_pence(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_cover_full_range() {
        let mut expected = 1u8;
        for &(lo, hi) in &COLUMN_BANDS {
            assert_eq!(lo, expected);
            assert!(hi >= lo);
            expected = hi + 1;
        }
        assert_eq!(COLUMN_BANDS[TICKET_COLS - 1].1, MAX_NUMBER);
    }

    #[test]
    fn test_column_for() {
        assert_eq!(column_for(1), 0);
        assert_eq!(column_for(11), 0);
        assert_eq!(column_for(12), 1);
        assert_eq!(column_for(89), 8);
        assert_eq!(column_for(100), 8);
    }

    #[test]
    fn test_normalized_clamps() {
        let config = BingoConfig {
            tickets_per_player: 0,
            opponents: 500,
            ..Default::default()
        };
        let normalized = config.normalized();
        assert_eq!(normalized.tickets_per_player, 1);
        assert_eq!(normalized.opponents, 100);

        let config = BingoConfig {
            tickets_per_player: 99,
            opponents: 0,
            ..Default::default()
        };
        let normalized = config.normalized();
        assert_eq!(normalized.tickets_per_player, 20);
        assert_eq!(normalized.opponents, 1);
    }

    #[test]
    fn test_rtp_worked_example() {
        // 4 tickets/player, human + 1 opponent, price 0.10
        let config = BingoConfig::default();
        let rtp = RtpAmounts::from_config(&config);

        assert!((rtp.base - 0.80).abs() < 1e-9);
        assert!((rtp.full_house - 0.24).abs() < 1e-9);
        assert!((rtp.total_score - 0.44).abs() < 1e-9);
        assert!((rtp.amount(PrizeKind::TotalScore) - 0.44).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_config_yields_zero_amounts() {
        let config = BingoConfig {
            tickets_per_player: 0,
            opponents: 0,
            ..Default::default()
        };
        // Un-normalized zero-ticket config must not panic
        let rtp = RtpAmounts::from_config(&BingoConfig {
            tickets_per_player: 0,
            ..config
        });
        assert_eq!(rtp.full_house, 0.0);
        assert_eq!(rtp.total_score, 0.0);
    }

    #[test]
    fn test_from_json_rejects_bad_price() {
        let json = r#"{
            "tickets_per_player": 4,
            "opponents": 1,
            "ticket_price": -0.10,
            "prize_split": { "full_house": 0.30, "total_score": 0.55 }
        }"#;
        assert!(matches!(
            BingoConfig::from_json(json),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_round_to_pence_half_up() {
        // 0.125 is exactly representable, so the half-up edge is exercised
        assert!((round_to_pence(0.125) - 0.13).abs() < 1e-9);
        assert!((round_to_pence(0.124) - 0.12).abs() < 1e-9);
    }
}
