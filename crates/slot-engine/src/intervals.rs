//! Minute-resolution interval arithmetic within a single day.
//!
//! Sorts blocked spans, merges overlapping ones, then computes set
//! operations (intersection, difference) over half-open minute ranges. All
//! availability math in this crate is built on these three operations.

use chrono::{NaiveTime, Timelike};

/// A half-open `[start, end)` span in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MinuteSpan {
    pub start: u32,
    pub end: u32,
}

impl MinuteSpan {
    /// Build a span from opening and closing times, at minute resolution.
    ///
    /// Returns `None` for empty or inverted windows (`close <= open`).
    /// Seconds are truncated; the booking domain never uses them.
    pub fn from_times(open: NaiveTime, close: NaiveTime) -> Option<Self> {
        let start = minute_of(open);
        let end = minute_of(close);
        (start < end).then_some(Self { start, end })
    }

    /// Length of the span in minutes.
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    /// Whether `other` lies entirely inside this span.
    pub fn contains(&self, other: MinuteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The overlapping portion of two spans, if any.
    ///
    /// Spans that merely touch (`a.end == b.start`) do not intersect.
    pub fn intersect(&self, other: MinuteSpan) -> Option<MinuteSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(MinuteSpan { start, end })
    }
}

/// Minutes since midnight for a time, truncating seconds.
pub fn minute_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Merge overlapping or adjacent spans into a sorted, non-overlapping list.
pub fn merge(mut spans: Vec<MinuteSpan>) -> Vec<MinuteSpan> {
    if spans.is_empty() {
        return spans;
    }

    // Sort by start (then end for stability).
    spans.sort();

    let mut merged: Vec<MinuteSpan> = Vec::new();
    for span in spans {
        if let Some(last) = merged.last_mut() {
            if span.start <= last.end {
                // Overlapping or adjacent — extend the current span.
                last.end = last.end.max(span.end);
                continue;
            }
        }
        merged.push(span);
    }

    merged
}

/// Subtract blocked time from a base window.
///
/// `blocked` may overlap arbitrarily; it is merged first. Returns the open
/// sub-intervals of `base`, sorted by start time.
pub fn subtract(base: MinuteSpan, blocked: Vec<MinuteSpan>) -> Vec<MinuteSpan> {
    // Clip blockers to the base window, discarding ones entirely outside.
    let clipped: Vec<MinuteSpan> = blocked
        .into_iter()
        .filter_map(|b| base.intersect(b))
        .collect();
    let merged = merge(clipped);

    let mut open = Vec::new();
    let mut cursor = base.start;

    for block in &merged {
        if cursor < block.start {
            open.push(MinuteSpan {
                start: cursor,
                end: block.start,
            });
        }
        cursor = cursor.max(block.end);
    }

    // Trailing open span after the last blocker.
    if cursor < base.end {
        open.push(MinuteSpan {
            start: cursor,
            end: base.end,
        });
    }

    open
}
