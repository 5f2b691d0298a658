use crate::core::metrics::{self, DerivedMetrics};
use crate::core::reading::{CompleteReading, ReadingSource};
use crate::core::sample_store::{PersistedSample, SampleStore};
use crate::error::Result;
use chrono::{DateTime, Local};

/// Everything one invocation produced, ready for printing
#[derive(Debug, Clone)]
pub struct Report {
    pub reading: CompleteReading,
    pub metrics: DerivedMetrics,
    /// The sample the rate was measured against, if any
    pub previous: Option<PersistedSample>,
    /// Whether the current sample made it to the store
    pub persisted: bool,
}

/// Take one reading, derive metrics against the stored sample, then replace it.
///
/// An incomplete reading returns an error before the store is touched. A
/// failed save is logged and reflected in [`Report::persisted`] but never
/// fails the run.
pub fn run<S, T>(source: &S, store: &mut T, now: DateTime<Local>) -> Result<Report>
where
    S: ReadingSource + ?Sized,
    T: SampleStore + ?Sized,
{
    let reading = source.read()?.complete()?;

    let previous = store.load();
    let metrics = metrics::derive(&reading, previous.as_ref(), now);

    let persisted = match store.save(&PersistedSample::capture(&reading, now)) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not save battery sample: {}", e);
            false
        }
    };

    Ok(Report {
        reading,
        metrics,
        previous,
        persisted,
    })
}
