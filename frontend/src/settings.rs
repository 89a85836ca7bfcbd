use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "settings";

pub const CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "PHP"];

/// Display preferences kept in the browser. The currency only picks the
/// symbol; amounts are never converted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::for_currency("USD")
    }
}

impl AppSettings {
    pub fn for_currency(code: &str) -> Self {
        Self {
            currency_code: code.to_string(),
            currency_symbol: currency_symbol_for(code).to_string(),
        }
    }
}

pub fn currency_symbol_for(code: &str) -> &'static str {
    match code {
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "PHP" => "₱",
        _ => "$",
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_settings() -> AppSettings {
    storage()
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str::<AppSettings>(&raw).ok())
        .unwrap_or_default()
}

pub fn save_settings(settings: &AppSettings) {
    let Some(storage) = storage() else {
        log::warn!("localStorage unavailable, settings not saved");
        return;
    };
    match serde_json::to_string(settings) {
        Ok(raw) => {
            if storage.set_item(STORAGE_KEY, &raw).is_err() {
                log::warn!("could not write settings to localStorage");
            }
        }
        Err(e) => log::error!("Failed to serialize settings: {}", e),
    }
}
