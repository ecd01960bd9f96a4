//! Tests for minute-resolution interval arithmetic.

use chrono::NaiveTime;
use slot_engine::intervals::{merge, minute_of, subtract, MinuteSpan};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn span(start: u32, end: u32) -> MinuteSpan {
    MinuteSpan { start, end }
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn from_times_builds_minute_span() {
    let s = MinuteSpan::from_times(time(9, 0), time(17, 30)).unwrap();
    assert_eq!(s, span(540, 1050));
    assert_eq!(s.duration(), 510);
}

#[test]
fn from_times_rejects_empty_and_inverted_windows() {
    assert!(MinuteSpan::from_times(time(9, 0), time(9, 0)).is_none());
    assert!(MinuteSpan::from_times(time(17, 0), time(9, 0)).is_none());
}

#[test]
fn minute_of_truncates_seconds() {
    assert_eq!(minute_of(NaiveTime::from_hms_opt(9, 15, 59).unwrap()), 555);
}

// ── Intersection ────────────────────────────────────────────────────────────

#[test]
fn intersect_returns_overlap() {
    assert_eq!(span(540, 720).intersect(span(600, 900)), Some(span(600, 720)));
}

#[test]
fn touching_spans_do_not_intersect() {
    assert_eq!(span(540, 600).intersect(span(600, 660)), None);
}

// ── Merge ───────────────────────────────────────────────────────────────────

#[test]
fn merge_coalesces_overlapping_and_adjacent_spans() {
    let merged = merge(vec![span(600, 660), span(540, 630), span(660, 700), span(800, 860)]);
    assert_eq!(merged, vec![span(540, 700), span(800, 860)]);
}

#[test]
fn merge_of_empty_input_is_empty() {
    assert!(merge(Vec::new()).is_empty());
}

// ── Subtraction ─────────────────────────────────────────────────────────────

#[test]
fn subtract_splits_base_around_blockers() {
    // 09:00-17:00 minus 12:00-13:00 → 09:00-12:00 and 13:00-17:00.
    let open = subtract(span(540, 1020), vec![span(720, 780)]);
    assert_eq!(open, vec![span(540, 720), span(780, 1020)]);
}

#[test]
fn subtract_clips_blockers_to_the_base_window() {
    // Blocker starting before the window and one entirely outside it.
    let open = subtract(span(540, 1020), vec![span(480, 600), span(1100, 1200)]);
    assert_eq!(open, vec![span(600, 1020)]);
}

#[test]
fn subtract_with_no_blockers_returns_base() {
    assert_eq!(subtract(span(540, 1020), Vec::new()), vec![span(540, 1020)]);
}

#[test]
fn subtract_fully_blocked_base_is_empty() {
    assert!(subtract(span(540, 600), vec![span(500, 700)]).is_empty());
}
