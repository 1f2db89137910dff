use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Loan length offered by the borrow dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorrowDuration {
    OneDay,
    ThreeDays,
    SevenDays,
}

impl BorrowDuration {
    pub const ALL: [BorrowDuration; 3] = [
        BorrowDuration::OneDay,
        BorrowDuration::ThreeDays,
        BorrowDuration::SevenDays,
    ];

    pub fn days(self) -> u32 {
        match self {
            BorrowDuration::OneDay => 1,
            BorrowDuration::ThreeDays => 3,
            BorrowDuration::SevenDays => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BorrowDuration::OneDay => "Borrow for 1 day",
            BorrowDuration::ThreeDays => "Borrow for 3 days",
            BorrowDuration::SevenDays => "Borrow for 7 days",
        }
    }
}

impl TryFrom<u32> for BorrowDuration {
    type Error = InvalidDuration;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        BorrowDuration::ALL
            .into_iter()
            .find(|d| d.days() == days)
            .ok_or(InvalidDuration(days))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidDuration(pub u32);

impl fmt::Display for InvalidDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid borrow duration {}: expected 1, 3 or 7 days", self.0)
    }
}

impl std::error::Error for InvalidDuration {}

/// Body of `POST /api/borrow/:id`, forwarded as-is once validated.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Loan length in days (1, 3 or 7)
    pub duration: u32,
}

impl From<BorrowDuration> for BorrowRequest {
    fn from(duration: BorrowDuration) -> Self {
        Self {
            duration: duration.days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_offered_durations_parse() {
        assert_eq!(BorrowDuration::try_from(3), Ok(BorrowDuration::ThreeDays));
        assert_eq!(BorrowDuration::try_from(7), Ok(BorrowDuration::SevenDays));
        assert_eq!(BorrowDuration::try_from(2), Err(InvalidDuration(2)));
        assert_eq!(BorrowDuration::try_from(0), Err(InvalidDuration(0)));
    }
}
