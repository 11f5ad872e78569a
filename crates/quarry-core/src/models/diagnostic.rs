use serde::{Deserialize, Serialize};

/// Record of a fan-out branch that was dropped so its stage could continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: String,
    pub branch: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        stage: impl Into<String>,
        branch: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            branch: branch.into(),
            message: message.into(),
        }
    }
}
