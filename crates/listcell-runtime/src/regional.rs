//! Regional settings cache.
//!
//! Settings resolve at most once per session: the first successful
//! resolution is kept in memory and persisted to the session store, and
//! every later call (in this process or a later one sharing the store)
//! reuses it until `dispose`.

use crate::{Error, Result};
use chrono::{NaiveDateTime, Timelike, Utc};
use listcell_format::derive_web_date_format;
use listcell_providers::{RegionalSettingsSource, RemoteRegionalSettings, SessionStore};
use listcell_types::RegionalSettings;
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub struct RegionalSettingsProvider {
    source: Option<Arc<dyn RegionalSettingsSource>>,
    store: Arc<dyn SessionStore>,
    key: String,
    timeout: Duration,
    cached: RwLock<Option<RegionalSettings>>,
    resolving: tokio::sync::Mutex<()>,
}

impl RegionalSettingsProvider {
    pub fn new(
        source: Option<Arc<dyn RegionalSettingsSource>>,
        store: Arc<dyn SessionStore>,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            store,
            key: key.into(),
            timeout,
            cached: RwLock::new(None),
            resolving: tokio::sync::Mutex::new(()),
        }
    }

    /// Cached settings, or the invariant defaults if nothing is resolved yet
    pub fn settings(&self) -> RegionalSettings {
        self.cached_settings().unwrap_or_default()
    }

    /// Resolve settings against the current UTC time
    pub async fn resolve(&self) -> RegionalSettings {
        self.resolve_at(Utc::now().naive_utc()).await
    }

    /// Resolve settings once; `reference` is the client's UTC time used to
    /// derive the server hour offset.
    ///
    /// A failed or timed-out remote call yields the defaults without caching
    /// them, so a later call tries again.
    pub async fn resolve_at(&self, reference: NaiveDateTime) -> RegionalSettings {
        if let Some(settings) = self.cached_settings() {
            return settings;
        }

        let _guard = self.resolving.lock().await;
        if let Some(settings) = self.cached_settings() {
            return settings;
        }

        match self.fetch_remote(reference).await {
            Ok(Some(settings)) => {
                self.remember(&settings);
                settings
            }
            Ok(None) => {
                tracing::debug!("no regional settings source configured, using invariant defaults");
                RegionalSettings::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "regional settings unavailable, using invariant defaults");
                RegionalSettings::default()
            }
        }
    }

    /// Forget resolved settings and remove them from the session store
    pub fn dispose(&self) {
        *self.cached.write().unwrap() = None;
        if let Err(err) = self.store.remove_item(&self.key) {
            tracing::warn!(key = %self.key, error = %err, "failed to clear regional settings");
        }
    }

    async fn fetch_remote(&self, reference: NaiveDateTime) -> Result<Option<RegionalSettings>> {
        let Some(source) = &self.source else {
            return Ok(None);
        };

        let remote = tokio::time::timeout(self.timeout, source.fetch(reference))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "regional settings after {} ms",
                    self.timeout.as_millis()
                ))
            })??;

        Ok(Some(settings_from_remote(&remote, reference)))
    }

    fn cached_settings(&self) -> Option<RegionalSettings> {
        if let Some(settings) = self.cached.read().unwrap().clone() {
            return Some(settings);
        }

        let persisted = match self.store.get_item(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to read regional settings");
                return None;
            }
        };

        match serde_json::from_str::<RegionalSettings>(&persisted) {
            Ok(settings) => {
                tracing::debug!(key = %self.key, "regional settings restored from session");
                *self.cached.write().unwrap() = Some(settings.clone());
                Some(settings)
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "ignoring malformed regional settings");
                None
            }
        }
    }

    fn remember(&self, settings: &RegionalSettings) {
        *self.cached.write().unwrap() = Some(settings.clone());

        let persisted = serde_json::to_string(settings)
            .map_err(Error::from)
            .and_then(|json| self.store.set_item(&self.key, &json).map_err(Error::from));
        if let Err(err) = persisted {
            tracing::warn!(key = %self.key, error = %err, "failed to persist regional settings");
        }
    }
}

fn settings_from_remote(remote: &RemoteRegionalSettings, reference: NaiveDateTime) -> RegionalSettings {
    RegionalSettings {
        thousand_separator: remote.thousand_separator.clone(),
        decimal_separator: remote.decimal_separator.clone(),
        hours_offset: hours_offset(reference, remote.server_time),
        web_date_format: derive_web_date_format(&remote.sample_date),
        work_days: remote.work_days,
        first_day_of_week: remote.first_day_of_week,
        first_week_of_year: remote.first_week_of_year,
    }
}

/// Hour difference between server and client clocks for the same instant.
///
/// The calendar dates of both readings may differ by one day around
/// midnight. Readings further apart are treated as an unknown offset (0).
pub fn hours_offset(client: NaiveDateTime, server: NaiveDateTime) -> i32 {
    let client_hours = client.hour() as i32;
    let server_hours = server.hour() as i32;

    match (server.date() - client.date()).num_days() {
        0 => server_hours - client_hours,
        -1 => server_hours - 24 - client_hours,
        1 => server_hours + 24 - client_hours,
        days => {
            tracing::warn!(
                days,
                %client,
                %server,
                "server and client clocks are more than a day apart, ignoring hour offset"
            );
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use listcell_providers::MemorySessionStore;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_hours_offset_same_day() {
        assert_eq!(hours_offset(at(10, 12), at(10, 15)), 3);
        assert_eq!(hours_offset(at(10, 12), at(10, 7)), -5);
    }

    #[test]
    fn test_hours_offset_across_midnight() {
        // client 23:00, server already 02:00 next day
        assert_eq!(hours_offset(at(10, 23), at(11, 2)), 3);
        // client 01:00, server still 20:00 the day before
        assert_eq!(hours_offset(at(10, 1), at(9, 20)), -5);
    }

    #[test]
    fn test_hours_offset_across_month_end() {
        let client = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        let server = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(hours_offset(client, server), 11);
    }

    #[test]
    fn test_hours_offset_out_of_range_is_zero() {
        assert_eq!(hours_offset(at(10, 12), at(13, 12)), 0);
    }

    #[test]
    fn test_settings_defaults_without_resolution() {
        let provider = RegionalSettingsProvider::new(
            None,
            Arc::new(MemorySessionStore::new()),
            "regional",
            Duration::from_secs(1),
        );
        assert_eq!(provider.settings(), RegionalSettings::default());
    }

    #[test]
    fn test_settings_restored_from_store() -> Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        let persisted = RegionalSettings {
            decimal_separator: ",".to_string(),
            thousand_separator: " ".to_string(),
            ..RegionalSettings::default()
        };
        store.set_item("regional", &serde_json::to_string(&persisted)?)?;

        let provider = RegionalSettingsProvider::new(None, store, "regional", Duration::from_secs(1));
        assert_eq!(provider.settings(), persisted);
        Ok(())
    }

    #[test]
    fn test_malformed_store_entry_falls_back() -> Result<()> {
        let store = Arc::new(MemorySessionStore::new());
        store.set_item("regional", "not json")?;

        let provider = RegionalSettingsProvider::new(None, store, "regional", Duration::from_secs(1));
        assert_eq!(provider.settings(), RegionalSettings::default());
        Ok(())
    }
}
