//! Reserved record values and names.

/// Value written for a name that was probed but never set.
///
/// A record holding this value is treated exactly like a missing record.
pub const NOT_SET_VALUE: &str = "___NOT_SET___";

/// Name probed by [`crate::Settings::init`] so the collection always holds
/// at least one record.
pub const INIT_KEY: &str = "___INIT_KEY___";
