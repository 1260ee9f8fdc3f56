use connect_core::{ConnectConfig, DisplayItem, HealthSample, HealthStore, SampleType, StoreError};
use tracing::debug;

use crate::source::SourceView;
use crate::strategy::{classify, Strategy};

/// Identifies one query issued by a [`CategoryListing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

/// Samples of one category, refreshed each time the category is shown.
///
/// Results are installed only for the most recent query, so a slow answer to
/// an earlier query never replaces a newer list.
#[derive(Debug, Clone)]
pub struct CategoryListing {
    sample_type: SampleType,
    strategy: Strategy,
    samples: Vec<HealthSample>,
    latest: u64,
}

impl CategoryListing {
    pub fn new(sample_type: SampleType) -> Self {
        let strategy = classify(&sample_type);
        Self {
            sample_type,
            strategy,
            samples: Vec::new(),
            latest: 0,
        }
    }

    pub fn title(&self) -> String {
        self.sample_type.category_display_name()
    }

    pub fn sample_type(&self) -> &SampleType {
        &self.sample_type
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn samples(&self) -> &[HealthSample] {
        &self.samples
    }

    /// Start a query; older tickets become stale.
    pub fn begin_query(&mut self) -> QueryTicket {
        self.latest += 1;
        QueryTicket(self.latest)
    }

    /// Install the result of a query. Returns `Ok(false)` when the ticket is
    /// stale, in which case the result (or error) is dropped.
    pub fn apply(
        &mut self,
        ticket: QueryTicket,
        result: Result<Vec<HealthSample>, StoreError>,
    ) -> Result<bool, StoreError> {
        if ticket.0 != self.latest {
            debug!(
                ticket = ticket.0,
                latest = self.latest,
                "dropping result of superseded query"
            );
            return Ok(false);
        }
        self.samples = result?;
        Ok(true)
    }

    /// Query the store and install the result.
    pub fn refresh(
        &mut self,
        store: &dyn HealthStore,
        config: &ConnectConfig,
    ) -> Result<(), StoreError> {
        let ticket = self.begin_query();
        let result = store.samples(&self.sample_type, config.query_limit);
        self.apply(ticket, result).map(|_| ())
    }

    /// One row per sample, in store order.
    pub fn items(&self, config: &ConnectConfig) -> Vec<DisplayItem> {
        self.samples
            .iter()
            .map(|sample| self.strategy.display_item(Some(sample), config))
            .collect()
    }

    /// Source view for the row at `index`, if the row can be opened.
    pub fn detail(&self, index: usize) -> Option<SourceView> {
        self.samples
            .get(index)
            .and_then(|sample| self.strategy.detail(sample))
    }
}
