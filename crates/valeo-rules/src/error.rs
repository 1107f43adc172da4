#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("unknown rule: {rule_id}")]
    NotFound { rule_id: String },

    #[error("malformed rule {rule_id}: {message}")]
    Malformed { rule_id: String, message: String },
}

impl RuleError {
    pub(crate) fn malformed(rule_id: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            rule_id: rule_id.to_string(),
            message: message.into(),
        }
    }
}
