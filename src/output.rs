use std::fmt::Write;

use hashbrown::HashMap;

use crate::table::Record;

// Round to one decimal, halves toward positive infinity.
fn round_tenth(x: f64) -> f64 {
    ((x + 0.05) * 10.0).floor() / 10.0
}

// The sum is rounded once before the division to cancel accumulated
// floating-point error, then the quotient is rounded again.
fn mean(record: &Record) -> f64 {
    round_tenth(round_tenth(record.sum as f64 / 10.0) / record.count as f64)
}

/// Render the final `{a=min/mean/max, b=…}\n` line, stations sorted by
/// byte value.
pub fn render(stations: HashMap<String, Record>) -> String {
    let mut entries: Vec<(String, Record)> = stations.into_iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    let mut out = String::with_capacity(entries.len() * 32 + 3);
    out.push('{');
    for (i, (name, record)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "{name}={:.1}/{:.1}/{:.1}",
            record.min as f64 / 10.0,
            mean(record),
            record.max as f64 / 10.0
        );
    }
    out.push_str("}\n");
    out
}
