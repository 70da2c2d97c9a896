//! Options for [`crate::Settings::get`].

use nsenv_client::Partition;

use crate::value::ResultKind;

/// How a `get` resolves and reports a name.
///
/// Defaults: default partition, string result, raise when unset, and
/// `None` for unset names when raising is turned off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOptions {
    pub partition: Partition,
    pub result_type: ResultKind,
    pub raise_if_unset: bool,
    pub return_none_for_unset: bool,
}

impl Default for GetOptions {
    fn default() -> Self {
        Self {
            partition: Partition::default(),
            result_type: ResultKind::String,
            raise_if_unset: true,
            return_none_for_unset: true,
        }
    }
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition the store lookup runs in.
    pub fn partition(mut self, partition: impl Into<Partition>) -> Self {
        self.partition = partition.into();
        self
    }

    /// Kind the resolved value is converted to.
    pub fn result_type(mut self, kind: ResultKind) -> Self {
        self.result_type = kind;
        self
    }

    /// Whether an unset name is an error.
    pub fn raise_if_unset(mut self, raise: bool) -> Self {
        self.raise_if_unset = raise;
        self
    }

    /// When not raising: `None` for an unset name if true, otherwise the
    /// literal placeholder string.
    pub fn return_none_for_unset(mut self, none: bool) -> Self {
        self.return_none_for_unset = none;
        self
    }
}
