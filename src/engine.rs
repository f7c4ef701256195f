use std::thread;

use crossbeam_channel::bounded;
use hashbrown::HashMap;

use crate::chunks;
use crate::merge;
use crate::table::Record;
use crate::worker;

/// Run the full pipeline over a mapped byte region: a dispatcher thread
/// feeding nominal chunk offsets through a bounded queue, `workers` parser
/// threads with one private table each, and a single-threaded merge of the
/// published tables.
///
/// Both channels are bounded at the worker count, so the steady state
/// never blocks. The results channel closes once every worker has dropped
/// its sender.
pub fn aggregate(region: &[u8], workers: usize) -> HashMap<String, Record> {
    if region.is_empty() {
        return HashMap::new();
    }

    let workers = workers.max(1);
    let chunk_size = chunks::chunk_size(region.len(), workers);

    let (offset_tx, offset_rx) = bounded(workers);
    let (table_tx, table_rx) = bounded(workers);

    thread::scope(|scope| {
        scope.spawn(move || chunks::dispatch(region.len(), chunk_size, offset_tx));

        for _ in 0..workers {
            let offsets = offset_rx.clone();
            let results = table_tx.clone();
            scope.spawn(move || worker::run(region, chunk_size, offsets, results));
        }
        drop(offset_rx);
        drop(table_tx);

        merge::merge(region, table_rx)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::render;
    use crate::table::Table;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn run(input: &str, workers: usize) -> String {
        render(aggregate(input.as_bytes(), workers))
    }

    #[test]
    fn one_line() {
        assert_eq!(run("abc;1.2\n", 1), "{abc=1.2/1.2/1.2}\n");
    }

    #[test]
    fn negative_and_positive() {
        assert_eq!(run("x;-1.5\nx;2.5\n", 1), "{x=-1.5/0.5/2.5}\n");
    }

    #[test]
    fn output_is_sorted() {
        assert_eq!(run("b;0.1\na;0.2\n", 1), "{a=0.2/0.2/0.2, b=0.1/0.1/0.1}\n");
    }

    #[test]
    fn two_digit_integer_part() {
        assert_eq!(run("s;12.3\ns;-12.3\n", 1), "{s=-12.3/0.0/12.3}\n");
    }

    #[test]
    fn many_duplicates() {
        let input = "q;0.0\n".repeat(10);
        assert_eq!(run(&input, 1), "{q=0.0/0.0/0.0}\n");
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(run("k;0.1\nk;0.2\n", 1), "{k=0.1/0.2/0.2}\n");
    }

    #[test]
    fn empty_region_yields_empty_output() {
        assert_eq!(run("", 4), "{}\n");
    }

    #[test]
    fn worker_count_does_not_change_output() {
        let input = "Hamburg;12.0\nBulawayo;8.9\nPalembang;38.8\nSt. John's;15.2\n\
                     Cracow;12.6\nHamburg;-3.4\nBulawayo;-0.1\nPalembang;0.0\n"
            .repeat(7);

        let expected = run(&input, 1);
        for workers in [2, 4, 8] {
            assert_eq!(run(&input, workers), expected, "workers = {workers}");
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let input = "a;1.1\nb;2.2\na;3.3\n";
        assert_eq!(run(input, 4), run(input, 4));
    }

    #[test]
    fn line_permutation_does_not_change_output() {
        let forward = "a;1.0\nb;-2.0\na;3.0\nc;0.5\n";
        let shuffled = "c;0.5\na;3.0\nb;-2.0\na;1.0\n";
        assert_eq!(run(forward, 2), run(shuffled, 2));
    }

    // Sweep every chunk size over an input whose boundaries then land on
    // each ';', '\n' and name byte in turn; any tiling must reproduce the
    // single-chunk answer.
    #[test]
    fn every_chunk_size_agrees() {
        let input = b"b;0.1\nabcdef;2.2\na;0.2\nabcdef;-2.2\nzz;9.9\n";
        let expected = render(aggregate(input, 1));

        for chunk_size in 1..=input.len() {
            let mut tables = Vec::new();
            let mut offset = 0;
            while offset < input.len() {
                let mut table = Table::new(4096);
                let (start, end) = worker::chunk_bounds(input, offset, chunk_size);
                worker::process_chunk(input, start, end, &mut table);
                tables.push(table);
                offset += chunk_size;
            }
            assert_eq!(
                render(merge::merge(input, tables)),
                expected,
                "chunk_size = {chunk_size}"
            );
        }
    }

    fn random_input(rng: &mut StdRng) -> (String, usize, usize) {
        let pool: Vec<String> = (0..rng.random_range(1..=12))
            .map(|i| {
                let len = match rng.random_range(0..10) {
                    0 => rng.random_range(33..=100),
                    _ => rng.random_range(1..=12),
                };
                (0..len)
                    .map(|j| (b'A' + ((i * 7 + j) % 26) as u8) as char)
                    .collect()
            })
            .collect();

        let lines: usize = rng.random_range(1..=200);
        let mut input = String::new();
        let mut used = hashbrown::HashSet::new();
        for _ in 0..lines {
            let name = &pool[rng.random_range(0..pool.len())];
            used.insert(name.clone());
            let tenths: i32 = rng.random_range(-999..=999);
            let sign = if tenths < 0 { "-" } else { "" };
            let abs = tenths.abs();
            input.push_str(&format!("{name};{sign}{}.{}\n", abs / 10, abs % 10));
        }
        (input, lines, used.len())
    }

    #[test]
    fn randomized_inputs_agree_across_worker_counts() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..25 {
            let (input, lines, distinct) = random_input(&mut rng);

            let merged = aggregate(input.as_bytes(), 1);
            assert_eq!(merged.len(), distinct);
            assert_eq!(
                merged.values().map(|r| r.count).sum::<u64>(),
                lines as u64
            );
            for record in merged.values() {
                assert!(record.min <= record.max);
                assert!(record.sum.abs() <= record.count as i64 * 999);
            }

            let expected = render(merged);
            for workers in [2, 4, 8] {
                assert_eq!(run(&input, workers), expected);
            }
        }
    }
}
