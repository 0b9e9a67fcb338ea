// Library target exists for the integration tests in tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import types via `padhai::session::*` / `padhai::bank::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

rust_i18n::i18n!("locales", fallback = "en");

// Public: used directly by integration tests
pub mod bank;
pub mod connectivity;
pub mod i18n;
pub mod session;

// Private: required transitively (won't compile without them)
mod app;
mod config;
mod event;
mod ui;
