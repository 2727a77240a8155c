use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Target platform for generated content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    Blog,
    Newsletter,
    LinkedIn,
    Facebook,
    #[serde(alias = "twitter")]
    #[strum(to_string = "x", serialize = "twitter")]
    X,
}

impl ContentType {
    pub const ALL: [Self; 5] = [
        Self::Blog,
        Self::Newsletter,
        Self::LinkedIn,
        Self::Facebook,
        Self::X,
    ];

    /// Parse caller input: trimmed, case-insensitive, `twitter` means `x`.
    pub fn parse(raw: &str) -> Result<Self, WorkflowError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WorkflowError::validation("Content type is required"));
        }
        Self::from_str(trimmed).map_err(|_| {
            WorkflowError::validation(format!(
                "Unsupported content type '{trimmed}'. Expected one of: {}",
                Self::ALL.map(|t| t.to_string()).join(", ")
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoleKind {
    Researcher,
    Writer,
}

/// Descriptive persona handed to the text-generation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub kind: RoleKind,
    pub title: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    /// Researchers may consult web search; writers only see task context.
    pub uses_search: bool,
    pub max_iter: u8,
}

impl Role {
    pub const fn researcher(
        title: &'static str,
        goal: &'static str,
        backstory: &'static str,
    ) -> Self {
        Self {
            kind: RoleKind::Researcher,
            title,
            goal,
            backstory,
            uses_search: true,
            max_iter: 5,
        }
    }

    pub const fn writer(title: &'static str, goal: &'static str, backstory: &'static str) -> Self {
        Self {
            kind: RoleKind::Writer,
            title,
            goal,
            backstory,
            uses_search: false,
            max_iter: 1,
        }
    }

    /// System prompt in the "You are X. backstory. goal" shape.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.title, self.backstory, self.goal
        )
    }
}
