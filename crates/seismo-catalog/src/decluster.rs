//! Removal of events that occur too close together in time.
//!
//! Used to prepare catalogs for fixed-length waveform windows: each kept
//! event is followed by at least `window_length` seconds of quiet.

use chrono::{DateTime, Utc};

use crate::catalog::{Catalog, Event};
use crate::error::{CatalogError, Result};

fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier)
        .num_microseconds()
        .map_or(f64::INFINITY, |us| us as f64 * 1e-6)
}

/// Drop events followed too closely by another event.
///
/// Events are sorted by origin time (stable). For each consecutive pair
/// less than `window_length` seconds apart, the earlier event is dropped;
/// if they are also less than `min_interval` seconds apart, both are
/// dropped. The result is sorted by time.
pub fn exclude_close_timed_events(
    catalog: &Catalog,
    window_length: f64,
    min_interval: f64,
) -> Result<Catalog> {
    if !(min_interval < window_length) {
        return Err(CatalogError::InvalidInterval {
            window_length,
            min_interval,
        });
    }

    let mut timed: Vec<(DateTime<Utc>, &Event)> = catalog
        .iter()
        .enumerate()
        .map(|(row, event)| {
            event
                .time
                .map(|t| (t, event))
                .ok_or(CatalogError::MissingTime(row))
        })
        .collect::<Result<_>>()?;
    timed.sort_by_key(|(t, _)| *t);

    let mut excluded = vec![false; timed.len()];
    for i in 1..timed.len() {
        let gap = seconds_between(timed[i - 1].0, timed[i].0);
        if gap < window_length {
            excluded[i - 1] = true;
            if gap < min_interval {
                excluded[i] = true;
            }
        }
    }

    let kept: Catalog = timed
        .into_iter()
        .zip(excluded)
        .filter(|(_, excluded)| !excluded)
        .map(|((_, event), _)| event.clone())
        .collect();

    log::info!(
        "declustering kept {} of {} events (window {window_length} s, min interval {min_interval} s)",
        kept.len(),
        catalog.len()
    );
    Ok(kept)
}
