//! Explicit operator confirmation before destructive actions.

use async_trait::async_trait;

use crate::domain::resource::ResourceKind;
use crate::domain::types::EntityId;

/// What the operator is asked to approve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub kind: ResourceKind,
    pub id: EntityId,
    /// Label of the cached record, or the id when it is not on screen.
    pub label: String,
}

impl ConfirmPrompt {
    pub fn message(&self) -> String {
        format!(
            "Delete {} \"{}\"? This cannot be undone.",
            self.kind.display_name().to_lowercase(),
            self.label
        )
    }
}

#[async_trait]
pub trait Confirm: Send + Sync {
    /// `true` only when the operator approved.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Approves every prompt. For scripted use.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeYes;

#[async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        log::debug!("Auto-confirming: {}", prompt.message());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_record() {
        let prompt = ConfirmPrompt {
            kind: ResourceKind::TailorMade,
            id: EntityId::new("r1").expect("valid id"),
            label: "Honeymoon in Pokhara".into(),
        };

        assert_eq!(
            prompt.message(),
            "Delete tailor-made request \"Honeymoon in Pokhara\"? This cannot be undone."
        );
    }
}
