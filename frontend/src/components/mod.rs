mod app;
mod auth;
mod budget;
mod icons;
mod layout;
mod settings_page;

pub use app::App;
