use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sample::{HealthSample, SampleType};
use crate::StoreError;

/// Answer of the authorization check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Granted,
    MustRequest,
}

/// Source of health samples.
///
/// Implementations return samples of one type sorted by start date, newest
/// first, and never more than `limit` of them.
pub trait HealthStore {
    fn authorization_status(
        &self,
        read_types: &[SampleType],
    ) -> Result<AuthorizationStatus, StoreError>;

    fn request_authorization(&mut self, read_types: &[SampleType]) -> Result<(), StoreError>;

    fn samples(
        &self,
        sample_type: &SampleType,
        limit: usize,
    ) -> Result<Vec<HealthSample>, StoreError>;
}

/// On-disk export of a health store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleExport {
    #[serde(default)]
    pub samples: Vec<HealthSample>,
    /// Treat every sample type as already authorized.
    #[serde(default)]
    pub authorized: bool,
    /// Whether an authorization request succeeds.
    #[serde(default = "default_grant")]
    pub grant_on_request: bool,
}

fn default_grant() -> bool {
    true
}

/// Health store backed by an in-memory list of samples.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    samples: Vec<HealthSample>,
    authorized: HashSet<SampleType>,
    authorize_all: bool,
    grant_on_request: bool,
}

impl MemoryStore {
    pub fn new(samples: Vec<HealthSample>) -> Self {
        Self {
            samples,
            authorized: HashSet::new(),
            authorize_all: false,
            grant_on_request: true,
        }
    }

    pub fn from_export(export: SampleExport) -> Self {
        Self {
            samples: export.samples,
            authorized: HashSet::new(),
            authorize_all: export.authorized,
            grant_on_request: export.grant_on_request,
        }
    }

    pub fn from_export_str(json: &str) -> Result<Self, StoreError> {
        let export: SampleExport =
            serde_json::from_str(json).map_err(|err| StoreError::Parse(err.to_string()))?;
        Ok(Self::from_export(export))
    }

    /// Makes authorization requests fail, as when the user declines.
    pub fn deny_requests(mut self) -> Self {
        self.grant_on_request = false;
        self
    }

    fn is_authorized(&self, sample_type: &SampleType) -> bool {
        self.authorize_all || self.authorized.contains(sample_type)
    }
}

impl HealthStore for MemoryStore {
    fn authorization_status(
        &self,
        read_types: &[SampleType],
    ) -> Result<AuthorizationStatus, StoreError> {
        if read_types.iter().all(|sample_type| self.is_authorized(sample_type)) {
            Ok(AuthorizationStatus::Granted)
        } else {
            Ok(AuthorizationStatus::MustRequest)
        }
    }

    fn request_authorization(&mut self, read_types: &[SampleType]) -> Result<(), StoreError> {
        if !self.grant_on_request {
            return Err(StoreError::AuthorizationDenied);
        }
        self.authorized.extend(read_types.iter().cloned());
        debug!(count = read_types.len(), "authorization granted");
        Ok(())
    }

    fn samples(
        &self,
        sample_type: &SampleType,
        limit: usize,
    ) -> Result<Vec<HealthSample>, StoreError> {
        if !self.is_authorized(sample_type) {
            return Err(StoreError::NotAuthorized(
                sample_type.category_display_name(),
            ));
        }

        let mut matching: Vec<HealthSample> = self
            .samples
            .iter()
            .filter(|sample| &sample.sample_type == sample_type)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        matching.truncate(limit);
        Ok(matching)
    }
}
