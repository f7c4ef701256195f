use crossbeam_channel::Sender;

/// Nominal bytes per work unit: an equal share of the region per worker,
/// never zero. Workers snap the real boundaries to newlines themselves.
pub fn chunk_size(region_len: usize, workers: usize) -> usize {
    (region_len / workers.max(1)).max(1)
}

/// Emit nominal chunk offsets in file order onto the bounded queue, then
/// close it by dropping the sender. Offsets are not newline-aligned.
pub fn dispatch(region_len: usize, chunk_size: usize, offsets: Sender<usize>) {
    let mut offset = 0;
    while offset < region_len {
        if offsets.send(offset).is_err() {
            // every worker is gone; nothing left to feed
            return;
        }
        offset += chunk_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn chunk_size_splits_evenly_and_floors() {
        assert_eq!(chunk_size(100, 4), 25);
        assert_eq!(chunk_size(103, 4), 25);
        assert_eq!(chunk_size(3, 8), 1);
        assert_eq!(chunk_size(0, 4), 1);
    }

    #[test]
    fn dispatch_enumerates_offsets_in_order() {
        let (tx, rx) = bounded(16);
        dispatch(103, 25, tx);

        let offsets: Vec<usize> = rx.iter().collect();
        assert_eq!(offsets, vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn dispatch_closes_queue_when_done() {
        let (tx, rx) = bounded(4);
        dispatch(4, 2, tx);

        assert_eq!(rx.iter().count(), 2);
        assert!(rx.recv().is_err());
    }
}
