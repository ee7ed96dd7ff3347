//! Reassembles per-chunk results into one index-ordered sweep.
//!
//! Placement is by each result's own index, never by chunk position, so the
//! arrival order of chunks has no effect on the output.

use crate::domain::{ResultSpace, SampleResult, SweepError, SweepResult};

pub fn merge(chunk_results: Vec<Vec<SampleResult>>, count: usize) -> SweepResult<ResultSpace> {
    let mut slots: Vec<Option<SampleResult>> = vec![None; count];

    for result in chunk_results.into_iter().flatten() {
        let slot = slots
            .get_mut(result.index)
            .ok_or(SweepError::OutOfRangeResult {
                index: result.index,
                count,
            })?;
        if slot.is_some() {
            return Err(SweepError::DuplicateResult {
                index: result.index,
            });
        }
        *slot = Some(result);
    }

    let missing: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(index, _)| index)
        .collect();
    if !missing.is_empty() {
        return Err(SweepError::IncompleteResult { missing });
    }

    Ok(ResultSpace::from_ordered(slots.into_iter().flatten().collect()))
}
