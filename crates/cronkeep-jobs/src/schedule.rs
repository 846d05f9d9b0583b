//! Five-field cron expression validation.
//!
//! Purely syntactic: no clock, no timezone, no "next run" computation.
//! An expression is valid when it has exactly five whitespace-separated
//! fields (minute, hour, day-of-month, month, day-of-week) and every field
//! matches the vixie-cron grammar: `*`, a value, a `a-b` range, a `*/n` or
//! `a-b/n` step, or a comma list of those.

/// Inclusive (low, high) bounds per field, in field order.
///
/// Day-of-week allows 0–7: both 0 and 7 denote Sunday.
const FIELD_BOUNDS: [(u32, u32); 5] = [(0, 59), (0, 23), (1, 31), (1, 12), (0, 7)];

/// Returns true iff `expr` is a valid five-field cron expression.
pub fn is_valid_schedule(expr: &str) -> bool {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() != FIELD_BOUNDS.len() {
        return false;
    }
    fields
        .iter()
        .zip(FIELD_BOUNDS)
        .all(|(field, (low, high))| field_is_valid(field, low, high))
}

fn field_is_valid(field: &str, low: u32, high: u32) -> bool {
    // A list is valid iff every item is; an empty item ("1,,2") is not.
    !field.is_empty() && field.split(',').all(|item| item_is_valid(item, low, high))
}

fn item_is_valid(item: &str, low: u32, high: u32) -> bool {
    let (base, step) = match item.split_once('/') {
        Some((base, step)) => (base, Some(step)),
        None => (item, None),
    };

    if let Some(step) = step {
        // Steps must be positive integers, and only apply to `*` or a range.
        match parse_value(step) {
            Some(n) if n >= 1 => {}
            _ => return false,
        }
        if base != "*" && !base.contains('-') {
            return false;
        }
    }

    if base == "*" {
        return true;
    }
    if let Some((start, end)) = base.split_once('-') {
        return match (parse_value(start), parse_value(end)) {
            (Some(a), Some(b)) => a >= low && b <= high && a <= b,
            _ => false,
        };
    }
    matches!(parse_value(base), Some(n) if n >= low && n <= high)
}

/// Strict numeric parse: ASCII digits only (no sign, no empty string).
fn parse_value(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
