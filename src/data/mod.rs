mod loader;

pub use loader::{builtin_seed, load_seed_from_json, LoadError, Seed};
