//! Scripted remote collaborators.
//!
//! Both sources count every call so tests can assert how often the
//! runtime actually went to the network.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use listcell_providers::{
    Error, FieldPropertySource, ListRef, RegionalSettingsSource, RemoteRegionalSettings, Result,
};
use listcell_types::FieldId;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Field property source answering from a fixed table.
#[derive(Debug, Default)]
pub struct CountingPropertySource {
    properties: HashMap<(String, String), Value>,
    delay: Option<Duration>,
    failing: bool,
    calls: AtomicUsize,
}

impl CountingPropertySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `value` for `property` of `field_id`
    pub fn with_property(mut self, field_id: &str, property: &str, value: Value) -> Self {
        self.properties
            .insert((field_id.to_string(), property.to_string()), value);
        self
    }

    /// Sleep before answering (on the tokio clock)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reject every request
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FieldPropertySource for CountingPropertySource {
    async fn fetch_property(
        &self,
        _list: &ListRef,
        field_id: &FieldId,
        property: &str,
    ) -> Result<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(Error::Remote(format!("field {} is unreachable", field_id)));
        }

        Ok(self
            .properties
            .get(&(field_id.to_string(), property.to_string()))
            .cloned())
    }
}

/// Regional settings source reporting a fixed locale and a server clock
/// shifted by a fixed number of hours.
#[derive(Debug)]
pub struct StaticRegionalSource {
    thousand_separator: String,
    decimal_separator: String,
    sample_date: String,
    offset_hours: i64,
    delay: Option<Duration>,
    failing: bool,
    calls: AtomicUsize,
}

impl StaticRegionalSource {
    /// US English locale with the server `offset_hours` ahead of UTC
    pub fn new(offset_hours: i64) -> Self {
        Self {
            thousand_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            sample_date: "4/6/1999".to_string(),
            offset_hours,
            delay: None,
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_separators(mut self, thousand: &str, decimal: &str) -> Self {
        self.thousand_separator = thousand.to_string();
        self.decimal_separator = decimal.to_string();
        self
    }

    /// Server rendering of 6 April 1999
    pub fn with_sample_date(mut self, sample: &str) -> Self {
        self.sample_date = sample.to_string();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegionalSettingsSource for StaticRegionalSource {
    async fn fetch(&self, reference: NaiveDateTime) -> Result<RemoteRegionalSettings> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(Error::Remote("regional settings query failed".to_string()));
        }

        Ok(RemoteRegionalSettings {
            decimal_separator: self.decimal_separator.clone(),
            thousand_separator: self.thousand_separator.clone(),
            work_days: 62,
            first_day_of_week: 1,
            first_week_of_year: 2,
            sample_date: self.sample_date.clone(),
            server_time: reference + chrono::Duration::hours(self.offset_hours),
        })
    }
}
