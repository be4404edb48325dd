//! TOML config file loading.

mod loader;


pub use loader::{load_from_path, load_from_str, load_or_default};
