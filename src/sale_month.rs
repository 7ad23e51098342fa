//! The calendar-month key used to group transactions.

use time::OffsetDateTime;

use crate::Error;

/// A calendar month between 1 (January) and 12 (December), independent of
/// year.
///
/// This is the sole grouping key for the reporting routes: a transaction
/// sold in November 2021 and one sold in November 2022 both fall under
/// month 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleMonth(u8);

impl SaleMonth {
    /// Create a [SaleMonth] from a month number.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is outside 1-12.
    pub fn new(month: u8) -> Result<Self, Error> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(Error::InvalidMonth(month.to_string()))
        }
    }

    /// Parse a [SaleMonth] from a raw query parameter.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `raw` is not an integer between
    /// 1 and 12.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        raw.trim()
            .parse::<u8>()
            .map_err(|_| Error::InvalidMonth(raw.to_string()))
            .and_then(Self::new)
    }

    /// The month a transaction's sale date falls in.
    pub fn of(date_of_sale: OffsetDateTime) -> Self {
        Self(date_of_sale.month() as u8)
    }

    /// The month number between 1 and 12.
    pub fn as_u8(self) -> u8 {
        self.0
    }
}
