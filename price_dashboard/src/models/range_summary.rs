use rust_decimal::Decimal;
use serde::Serialize;

/// Price change over a brush-selected sub-range of a series.
///
/// A transient view value: it is recomputed on every selection gesture and
/// has no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub start_price: Decimal,
    pub end_price: Decimal,
    /// `end_price - start_price`, rounded to 2 decimals.
    pub absolute_change: Decimal,
    /// `absolute_change / start_price * 100`, rounded to 2 decimals.
    pub percentage_change: Decimal,
}

/// Whether a change is a gain, a loss, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

impl ChangeDirection {
    pub fn of(change: Decimal) -> Self {
        if change.is_zero() {
            ChangeDirection::Flat
        } else if change.is_sign_negative() {
            ChangeDirection::Down
        } else {
            ChangeDirection::Up
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_sign() {
        assert_eq!(ChangeDirection::of(Decimal::new(-100, 2)), ChangeDirection::Down);
        assert_eq!(ChangeDirection::of(Decimal::new(1, 2)), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(Decimal::ZERO), ChangeDirection::Flat);
        assert_eq!(ChangeDirection::of(Decimal::new(0, 2)), ChangeDirection::Flat);
    }
}
