//! Namespaced settings for services.
//!
//! A setting is looked up in the environment first and, when the
//! environment has no non-empty value, in a partitioned record store. Names
//! nobody has set yet get a placeholder record so they can be found and
//! filled in from the store's side.
//!
//! ```rust,ignore
//! use nsenv::{GetOptions, ResultKind, Settings};
//! use nsenv_client::FileStore;
//!
//! let settings = Settings::new(FileStore::new("settings.json"));
//! settings.init().await?;
//! let timeout = settings
//!     .get("TIMEOUT_SECS", &GetOptions::new().result_type(ResultKind::Float))
//!     .await?;
//! ```

mod accessor;
pub mod constants;
pub mod error;
mod options;
mod value;

pub use accessor::Settings;
pub use constants::{INIT_KEY, NOT_SET_VALUE};
pub use error::{ConversionError, Result, SettingsError};
pub use options::GetOptions;
pub use value::{ResultKind, SettingValue};
