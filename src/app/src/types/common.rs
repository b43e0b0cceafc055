use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one armed shell timer
///
/// Ids are handed out by the model and never reused, so a late `Fired` for a
/// timer that has since been cancelled or replaced can be told apart.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}
