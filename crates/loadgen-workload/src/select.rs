//! Weighted operation selection.
//!
//! One uniform draw `r` in `[0, total_ratio)` is matched against the running
//! sum of entry ratios in compiled order; the first entry whose running sum
//! exceeds `r` wins.

use crate::plan::PlanEntry;
use rand::Rng;

/// Selection found no entry for a draw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no operation selected (draw {draw}, total ratio {total_ratio})")]
pub struct SelectionError {
    pub draw: u64,
    pub total_ratio: u64,
}

/// Draw once and pick an entry.
pub fn select<'a, R: Rng + ?Sized>(
    entries: &'a [PlanEntry],
    total_ratio: u64,
    rng: &mut R,
) -> Result<&'a PlanEntry, SelectionError> {
    if total_ratio == 0 {
        return Err(SelectionError {
            draw: 0,
            total_ratio,
        });
    }
    let draw = rng.gen_range(0..total_ratio);
    select_with_draw(entries, total_ratio, draw)
}

/// Pick the entry for a given draw.
pub fn select_with_draw(
    entries: &[PlanEntry],
    total_ratio: u64,
    draw: u64,
) -> Result<&PlanEntry, SelectionError> {
    let mut cumulative = 0u64;
    for entry in entries {
        cumulative = cumulative.saturating_add(entry.ratio);
        if draw < cumulative {
            return Ok(entry);
        }
    }
    Err(SelectionError { draw, total_ratio })
}
