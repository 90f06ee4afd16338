pub mod app;
pub mod catalog;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error;
pub mod model;
pub mod services;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
