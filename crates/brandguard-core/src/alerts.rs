use serde::{Deserialize, Serialize};

use crate::null_as_empty;

/// A detected anomaly event, e.g. a mention-volume spike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    /// Category tag such as `"volume_spike"` or `"negative_spike"`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alert_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default)]
    pub resolved: bool,
}
