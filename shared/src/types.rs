//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Outcome of a best-effort side effect attached to a primary operation.
///
/// The primary operation's result never depends on this; callers read it to
/// tell "succeeded with side effect" apart from "succeeded, side effect
/// failed".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum SideEffect {
    Applied,
    Skipped,
    Failed(String),
}
