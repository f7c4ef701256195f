//! Parallel min/mean/max aggregation over `<station>;<temperature>` record
//! files: a memory-mapped byte region is cut into per-worker chunks, each
//! worker lexes its records with SWAR word tricks into a fingerprint-keyed
//! table, and the partial tables are merged into one name-keyed map.

pub mod chunks;
pub mod engine;
pub mod mapping;
pub mod merge;
pub mod output;
pub mod swar;
pub mod table;
pub mod temperature;
pub mod worker;
