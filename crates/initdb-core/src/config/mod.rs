//! Configuration: the axis key, CLI flags, environment settings, the
//! collector that fills in whatever is still missing, and package.json

pub mod collector;
pub mod detect;
pub mod flags;
pub mod generator;
pub mod key;
pub mod questions;
pub mod settings;

pub use collector::{resolve_key, Collected, CollectorState, Prompter, Step};
pub use flags::{normalize_args, AxisFlags};
pub use generator::PackageMetadata;
pub use key::{ConfigurationKey, Database, Framework, Language, PackageManager, PartialKey};
pub use settings::Settings;
