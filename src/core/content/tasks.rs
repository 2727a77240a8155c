use super::templates::PlatformProfile;
use super::types::Role;
use std::fmt::Write;

/// One unit of work for a role. `context` lists the tasks whose output the
/// executor must feed in before this task runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTask {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub role: Role,
    pub context: Vec<ContentTask>,
}

impl ContentTask {
    pub fn depends_on(&self, other: &ContentTask) -> bool {
        self.context.iter().any(|c| c.name == other.name)
    }
}

/// The research/write pair for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineTasks {
    pub research: ContentTask,
    pub write: ContentTask,
}

impl PipelineTasks {
    /// Execution order: research strictly before write.
    pub fn in_order(&self) -> [&ContentTask; 2] {
        [&self.research, &self.write]
    }
}

/// Build the research and writing tasks for `profile` from its templates.
///
/// The writing task's context is exactly the research task.
pub fn build_tasks(
    profile: &PlatformProfile,
    url: &str,
    image_url_hint: Option<&str>,
) -> PipelineTasks {
    let research = ContentTask {
        name: format!("{}_research", profile.content_type),
        description: research_description(profile, url),
        expected_output: profile.research_expected.to_string(),
        role: profile.researcher,
        context: Vec::new(),
    };

    let write = ContentTask {
        name: format!("{}_write", profile.content_type),
        description: write_description(profile, image_url_hint),
        expected_output: profile.write_expected.to_string(),
        role: profile.writer,
        context: vec![research.clone()],
    };

    PipelineTasks { research, write }
}

fn research_description(profile: &PlatformProfile, url: &str) -> String {
    let mut out = profile.research_brief.replace("{url}", url);
    out.push('\n');
    for (i, item) in profile.research_checklist.iter().enumerate() {
        let _ = writeln!(out, "{}. {item}", i + 1);
    }
    out.push('\n');
    out.push_str(profile.research_closing);
    out
}

fn write_description(profile: &PlatformProfile, image_url_hint: Option<&str>) -> String {
    let mut out = String::from(profile.write_brief);
    out.push_str("\n\nRequirements:\n");
    let _ = writeln!(out, "- {}", profile.envelope.requirement());
    for item in profile.write_requirements {
        let _ = writeln!(out, "- {item}");
    }

    let hint = image_url_hint.map(str::trim).filter(|h| !h.is_empty());
    if let (Some(instruction), Some(hint)) = (profile.image_instruction, hint) {
        let _ = writeln!(out, "- An image URL is provided ({hint}); {instruction}.");
    }

    out.push('\n');
    out.push_str(profile.write_closing);
    out
}
