//! Framework-neutral WASM bridge to the clinical record pipeline.

use connect_core::{ConnectConfig, HealthSample, StoreError};
use connect_fhir::classify;
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsConnectConfig {
    #[serde(default)]
    r4_supported: Option<bool>,
    #[serde(default)]
    query_limit: Option<usize>,
    #[serde(default)]
    timestamp_format: Option<String>,
    /// Minutes east of UTC, i.e. `-new Date().getTimezoneOffset()`.
    #[serde(default)]
    utc_offset_minutes: Option<i32>,
}

impl From<JsConnectConfig> for ConnectConfig {
    fn from(cfg: JsConnectConfig) -> Self {
        let mut base = ConnectConfig::default();
        if let Some(r4_supported) = cfg.r4_supported {
            base.r4_supported = r4_supported;
        }
        if let Some(limit) = cfg.query_limit {
            base.query_limit = limit;
        }
        if let Some(format) = cfg.timestamp_format {
            base.timestamp_format = format;
        }
        if let Some(minutes) = cfg.utc_offset_minutes {
            base.utc_offset_minutes = minutes;
        }
        base
    }
}

/// Display rows for an array of samples, one per sample.
#[wasm_bindgen]
pub fn summarize_samples(samples: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let samples_value = from_value::<serde_json::Value>(samples)
        .map_err(|err| JsValue::from_str(&format!("Could not read samples: {err}")))?;
    let cfg = read_config(config)?;

    let items = connect_fhir::summarize_samples_value(&samples_value, &cfg)
        .map_err(|err| JsValue::from_str(&format_store_error(err)))?;

    to_value(&items).map_err(|err| JsValue::from_str(&format!("Could not serialize rows: {err}")))
}

/// Pretty-printed FHIR source of a clinical sample, or `undefined` when the
/// sample's row cannot be opened.
#[wasm_bindgen]
pub fn source_view(sample: JsValue) -> Result<Option<String>, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let sample: HealthSample = from_value(sample)
        .map_err(|err| JsValue::from_str(&format!("Could not read sample: {err}")))?;

    match classify(&sample.sample_type).detail(&sample) {
        Some(view) => view
            .render()
            .map(Some)
            .map_err(|err| JsValue::from_str(&err.to_string())),
        None => Ok(None),
    }
}

fn read_config(config: Option<JsValue>) -> Result<ConnectConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsConnectConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(ConnectConfig::from(cfg))
        }
        _ => Ok(ConnectConfig::default()),
    }
}

fn format_store_error(err: StoreError) -> String {
    format!("Health data error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_config_overrides_only_given_fields() {
        let cfg: JsConnectConfig =
            serde_json::from_str(r#"{"r4_supported": false}"#).unwrap();
        let config = ConnectConfig::from(cfg);
        assert!(!config.r4_supported);
        assert_eq!(config.query_limit, ConnectConfig::default().query_limit);
        assert_eq!(config.timestamp_format, ConnectConfig::default().timestamp_format);
        assert_eq!(config.utc_offset_minutes, 0);
    }

    #[test]
    fn js_config_carries_host_offset() {
        let cfg: JsConnectConfig =
            serde_json::from_str(r#"{"utc_offset_minutes": 120}"#).unwrap();
        let config = ConnectConfig::from(cfg);
        assert_eq!(config.utc_offset().local_minus_utc(), 7200);
    }
}
