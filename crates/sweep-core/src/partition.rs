//! Contiguous, size-balanced work split.
//!
//! With `q = N / W` and `r = N % W`, workers `0..r` take `q + 1` samples and
//! the rest take `q`. Start offsets are the running sum of earlier chunk
//! lengths, so chunks stay contiguous and ascend with worker rank.

use crate::domain::{Chunk, SweepError, SweepResult};

/// Upper bound on the chunk count; one `Chunk` is allocated per worker.
pub const MAX_WORKERS: usize = 1 << 16;

pub fn partition(samples: usize, workers: usize) -> SweepResult<Vec<Chunk>> {
    if samples < 1 || !(1..=MAX_WORKERS).contains(&workers) {
        return Err(SweepError::InvalidPartition { samples, workers });
    }

    let base = samples / workers;
    let remainder = samples % workers;

    let mut offset = 0;
    let chunks = (0..workers)
        .map(|worker| {
            let len = if worker < remainder { base + 1 } else { base };
            let chunk = Chunk {
                worker,
                start: offset,
                len,
            };
            offset += len;
            chunk
        })
        .collect();

    Ok(chunks)
}

pub fn chunk_lengths(chunks: &[Chunk]) -> Vec<usize> {
    chunks.iter().map(|chunk| chunk.len).collect()
}
