use chrono::{DateTime, FixedOffset, Offset, Utc};
use domain::{Order, OrderStatus};
use serde::Serialize;

use crate::{ReportError, Result};

/// Inclusive time range of a report, with the offset used to bucket
/// orders by local day and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    #[serde(skip)]
    offset: FixedOffset,
}

impl ReportWindow {
    /// Creates a window bucketed in UTC.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from > to {
            return Err(ReportError::InvalidWindow { from, to });
        }
        Ok(Self {
            from,
            to,
            offset: Utc.fix(),
        })
    }

    /// Creates a window covering all time.
    pub fn all_time() -> Self {
        Self {
            from: DateTime::<Utc>::MIN_UTC,
            to: DateTime::<Utc>::MAX_UTC,
            offset: Utc.fix(),
        }
    }

    /// Buckets days and hours at the given offset from UTC.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Result<Self> {
        self.offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ReportError::InvalidOffset { minutes })?;
        Ok(self)
    }

    /// Returns the bucketing offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns true if the instant lies inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }

    /// Returns the completed orders inside the window.
    pub fn select<'a>(&self, orders: &'a [Order]) -> impl Iterator<Item = &'a Order> + use<'a> {
        let window = *self;
        orders
            .iter()
            .filter(move |order| {
                order.status() == OrderStatus::Completed && window.contains(order.created_at())
            })
    }
}
