pub mod toml_loader;

pub use toml_loader::{load_plan_file, parse_plan_toml};
