use serde::{Deserialize, Serialize};

/// Assignment a directory is bound to
///
/// Persisted as `{"Id": .., "Name": ..}`. There is no update path: a binding
/// is written once after the first clone and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Assignment {
    pub id: i64,
    pub name: String,
}

impl Assignment {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
