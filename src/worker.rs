use crossbeam_channel::{Receiver, Sender};

use crate::swar::{DelimiterScan, WINDOW};
use crate::table::{DEFAULT_BUCKETS, NameSpan, Table};
use crate::temperature;

/// Resolve a nominal chunk into the `[start, end)` range of whole records
/// this worker owns: records beginning at or after `offset`, through the
/// record straddling `offset + chunk_size`. Adjacent chunks resolve to
/// adjacent ranges, so every record is parsed exactly once with no
/// cross-worker coordination.
pub fn chunk_bounds(region: &[u8], offset: usize, chunk_size: usize) -> (usize, usize) {
    debug_assert!(!region.is_empty() && offset < region.len());

    let start = if offset == 0 {
        0
    } else {
        match region[offset..].byte_position(b'\n') {
            Some(nl) => offset + nl + 1,
            None => region.len(),
        }
    };

    let nominal_end = (offset + chunk_size).min(region.len() - 1);
    let end = match region[nominal_end..].byte_position(b'\n') {
        Some(nl) => nominal_end + nl + 1,
        None => region.len(),
    };

    (start, end)
}

/// Parse every record in `region[start..end]` into `table`. `end` must sit
/// just past a newline or at the region end.
pub fn process_chunk(region: &[u8], start: usize, end: usize, table: &mut Table) {
    let mut cursor = start;
    while cursor < end {
        let window = &region[cursor..(cursor + WINDOW).min(end)];
        let (mut semicolons, mut newlines) = window.delimiter_masks();

        if newlines == 0 {
            cursor = long_record(region, cursor, end, table);
            continue;
        }

        // Pop one `;`/`\n` pair per record. A trailing record cut off by
        // the window keeps its bits for the next round.
        let mut record_start = 0;
        while newlines != 0 {
            let semi_pos = semicolons.trailing_zeros() as usize;
            let nl_pos = newlines.trailing_zeros() as usize;

            let name = &window[record_start..semi_pos];
            let temp = decode_at(region, cursor + semi_pos + 1, cursor + nl_pos);

            let span = NameSpan {
                offset: cursor + record_start,
                len: (semi_pos - record_start) as u32,
            };
            table.upsert(Table::fingerprint(name), span).observe(temp);

            semicolons &= semicolons - 1;
            newlines &= newlines - 1;
            record_start = nl_pos + 1;
        }

        cursor += record_start;
    }
}

// A record longer than one window (names run up to 100 bytes): seek its
// delimiters directly instead of through the window masks.
fn long_record(region: &[u8], start: usize, end: usize, table: &mut Table) -> usize {
    let semi = start + region[start..end].byte_position(b';').expect("record without ';'");
    let nl = match region[semi + 1..end].byte_position(b'\n') {
        Some(pos) => semi + 1 + pos,
        None => end,
    };

    let name = &region[start..semi];
    let temp = decode_at(region, semi + 1, nl);

    let span = NameSpan {
        offset: start,
        len: (semi - start) as u32,
    };
    table.upsert(Table::fingerprint(name), span).observe(temp);

    nl + 1
}

// The word decoder reads eight bytes; records whose load would cross the
// end of the mapping take the byte-at-a-time path instead.
#[inline(always)]
fn decode_at(region: &[u8], temp_start: usize, temp_end: usize) -> i16 {
    if temp_start + 8 <= region.len() {
        temperature::decode(&region[temp_start..temp_end])
    } else {
        temperature::decode_tail(&region[temp_start..temp_end])
    }
}

/// Drain chunk offsets until the dispatcher closes the queue, then publish
/// the local table on the results channel.
pub fn run(region: &[u8], chunk_size: usize, offsets: Receiver<usize>, results: Sender<Table>) {
    let mut table = Table::new(DEFAULT_BUCKETS);

    while let Ok(offset) = offsets.recv() {
        let (start, end) = chunk_bounds(region, offset, chunk_size);
        process_chunk(region, start, end, &mut table);
    }

    let _ = results.send(table);
}
