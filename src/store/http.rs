use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::dropdown::dropdown_model::DropdownConfig;
use crate::store::store_model::{DropdownStore, StoreError, StoredDropdown, UpsertOutcome};

/// Dropdown store behind the content API.
///
/// Each upsert is `PUT {base_url}/dropdowns/{dropdown_key}` with the stored
/// record as JSON body. `201 Created` means inserted, `200 OK` and
/// `204 No Content` mean an existing document was replaced.
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn endpoint(&self, dropdown_key: &str) -> String {
        format!("{}/dropdowns/{}", self.base_url, dropdown_key)
    }
}

impl DropdownStore for HttpStore {
    fn upsert(&mut self, config: &DropdownConfig) -> Result<UpsertOutcome, StoreError> {
        let record = StoredDropdown::from_config(config, Utc::now());
        let key = config.dropdown_key.clone();

        let response = self
            .client
            .put(self.endpoint(&key))
            .json(&record)
            .send()
            .map_err(|source| StoreError::Http {
                key: key.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::CREATED => Ok(UpsertOutcome::Inserted),
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(UpsertOutcome::Updated),
            status => Err(StoreError::Rejected {
                key,
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }),
        }
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
