//! ntview configuration.
//!
//! Two layers live here. [`ViewportSettings`] is the partial, per-call
//! settings object the containment query merges from call-site arguments,
//! inline element metadata and library defaults. [`NtviewConfig`] is the
//! TOML file that supplies those library defaults together with watcher,
//! tracker and per-site settings. Every section has defaults, so an empty
//! file is a valid config.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    Container, NtviewConfig, SiteProfile, TrackingConfig, ViewportConfig, ViewportSettings,
    WatchConfig,
};
pub use toml_loader::{load_from_path, load_from_str, load_or_default};
