use hashbrown::HashMap;

use crate::table::{Record, Table};

/// Fold worker tables into the final name-keyed map. Names are
/// materialized from the mapped region here, once per distinct station;
/// until this point they existed only as byte spans.
///
/// The combine operator is commutative and associative, so table order
/// does not matter.
pub fn merge(region: &[u8], tables: impl IntoIterator<Item = Table>) -> HashMap<String, Record> {
    let mut merged: HashMap<String, Record> = HashMap::new();

    for table in tables {
        for record in table.records() {
            let span = record.span;
            let bytes = &region[span.offset..span.offset + span.len as usize];
            let name = std::str::from_utf8(bytes).expect("station name is not UTF-8");

            merged
                .entry_ref(name)
                .and_modify(|station: &mut Record| station.combine(record))
                .or_insert(*record);
        }
    }

    merged
}
