use crate::model::*;

// ── Free windows ────────────────────────────────────────────────

/// Opening hours of `rs` on `date` minus that day's bookings, as sorted,
/// disjoint half-open spans.
pub fn free_windows(rs: &Resource, date: &BookingDate) -> Vec<Span> {
    let booked: Vec<Span> = rs.bookings_on(date).iter().map(|b| b.span).collect();
    let booked = merge_overlapping(&booked);
    subtract_intervals(&[rs.opening_hours()], &booked)
}

/// Merge sorted overlapping/adjacent intervals into disjoint intervals.
pub fn merge_overlapping(sorted: &[Span]) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::new();
    for &span in sorted {
        if let Some(last) = merged.last_mut()
            && span.start <= last.end
        {
            last.end = last.end.max(span.end);
            continue;
        }
        merged.push(span);
    }
    merged
}

/// Remove every span in `to_remove` from `base`. Both inputs must be sorted
/// and internally disjoint.
pub fn subtract_intervals(base: &[Span], to_remove: &[Span]) -> Vec<Span> {
    let mut result = Vec::new();
    let mut ri = 0;

    for &b in base {
        let mut current_start = b.start;
        let current_end = b.end;

        while ri < to_remove.len() && to_remove[ri].end <= current_start {
            ri += 1;
        }

        let mut j = ri;
        while j < to_remove.len() && to_remove[j].start < current_end {
            let r = &to_remove[j];
            if r.start > current_start {
                result.push(Span::new(current_start, r.start));
            }
            current_start = current_start.max(r.end);
            j += 1;
        }

        if current_start < current_end {
            result.push(Span::new(current_start, current_end));
        }
    }

    result
}
