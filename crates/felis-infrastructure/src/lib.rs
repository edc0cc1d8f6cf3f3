//! Filesystem adapters for felis: platform paths, the config file and the
//! persistent local storage behind the session store.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::FelisPaths;
pub use storage::{JsonFileStorage, MemoryStorage};
