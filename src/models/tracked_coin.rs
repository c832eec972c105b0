use chrono::{DateTime, Utc};

use super::ChatId;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedCoin {
    pub coin_name: String,
    pub owner: ChatId,

    // kept exactly as typed, parsed on every scan
    pub min_price: String,
    pub max_price: String,

    pub tracked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Low,
    High,
}

impl Edge {
    pub fn label(self) -> &'static str {
        match self {
            Edge::Low => "минимального",
            Edge::High => "максимального",
        }
    }
}

impl TrackedCoin {
    pub fn new(coin_name: String, owner: ChatId, min_price: String, max_price: String) -> Self {
        Self {
            coin_name,
            owner,
            min_price,
            max_price,
            tracked_at: Utc::now(),
        }
    }

    pub fn threshold(&self, edge: Edge) -> &str {
        match edge {
            Edge::Low => &self.min_price,
            Edge::High => &self.max_price,
        }
    }

    /// Low edge wins when both bounds are crossed. Both comparisons include
    /// the boundary.
    pub fn crossed_edge(&self, price: f64) -> Result<Option<Edge>, String> {
        let min = parse_threshold(&self.min_price)?;
        let max = parse_threshold(&self.max_price)?;

        if min >= price {
            Ok(Some(Edge::Low))
        } else if max <= price {
            Ok(Some(Edge::High))
        } else {
            Ok(None)
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid threshold {raw:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(min: &str, max: &str) -> TrackedCoin {
        TrackedCoin::new("Bitcoin".to_string(), ChatId(1), min.to_string(), max.to_string())
    }

    #[test]
    fn equal_to_min_is_low_edge() {
        assert_eq!(coin("100", "200").crossed_edge(100.0), Ok(Some(Edge::Low)));
    }

    #[test]
    fn equal_to_max_is_high_edge() {
        assert_eq!(coin("100", "200").crossed_edge(200.0), Ok(Some(Edge::High)));
    }

    #[test]
    fn both_crossed_reports_low_only() {
        assert_eq!(coin("500", "100").crossed_edge(300.0), Ok(Some(Edge::Low)));
    }

    #[test]
    fn inside_band_is_none() {
        assert_eq!(coin("100", "200").crossed_edge(150.5), Ok(None));
    }

    #[test]
    fn garbage_threshold_is_an_error() {
        assert!(coin("cheap", "200").crossed_edge(150.0).is_err());
    }
}
