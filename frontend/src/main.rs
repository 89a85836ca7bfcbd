mod api;
mod catalog;
mod components;
mod config;
mod controller;
mod error;
mod format;
mod grid;
mod models;
mod session;
mod settings;
mod state;
mod store;
mod summary;

use components::App;
use config::AppConfig;

fn main() {
    let config = AppConfig::from_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("starting budget client against {:?}", config.api_base_url);
    yew::Renderer::<App>::new().render();
}
