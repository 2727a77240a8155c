use super::tasks::{ContentTask, PipelineTasks, build_tasks};
use super::templates::PlatformProfile;
use super::types::{Role, RoleKind};
use crate::core::providers::{Provider, scrub_secret_patterns};
use crate::core::tools::{SearchTool, format_hits};
use crate::error::PipelineError;
use crate::links::{PageFetcher, extract_content, parse_page_url};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{debug, warn};

/// A role bound to its text-generation collaborator.
#[derive(Clone)]
pub struct Agent {
    pub role: Role,
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
    search: Option<Arc<dyn SearchTool>>,
}

impl Agent {
    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    async fn perform(
        &self,
        task: &ContentTask,
        context: &[&str],
        grounding: Option<&str>,
    ) -> Result<String, PipelineError> {
        let system_prompt = self.role.system_prompt();
        let prompt = task_prompt(task, context, grounding);

        debug!(
            task = %task.name,
            role = self.role.title,
            provider = self.provider.name(),
            prompt_chars = prompt.len(),
            "running task"
        );

        let reply = self
            .provider
            .chat_with_system(Some(&system_prompt), &prompt, &self.model, self.temperature)
            .await
            .map_err(|e| self.failure(task, scrub_secret_patterns(&format!("{e:#}")).into_owned()))?;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(self.failure(task, "text generation returned an empty response".into()));
        }
        Ok(reply.to_string())
    }

    fn failure(&self, task: &ContentTask, message: String) -> PipelineError {
        PipelineError::Llm {
            task: task.name.clone(),
            role: self.role.title.to_string(),
            message,
        }
    }
}

fn task_prompt(task: &ContentTask, context: &[&str], grounding: Option<&str>) -> String {
    let mut prompt = format!(
        "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.",
        task.description.trim(),
        task.expected_output
    );

    if !context.is_empty() {
        let _ = write!(
            prompt,
            "\n\nThis is the context you're working with:\n{}",
            context.join("\n\n")
        );
    }

    if let Some(grounding) = grounding {
        let _ = write!(
            prompt,
            "\n\nSource material gathered for this task:\n{grounding}"
        );
    }

    prompt
}

/// Output of a completed pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub research: String,
    pub content: String,
}

/// Two tasks plus the agents that run them.
pub struct ContentPipeline {
    url: String,
    tasks: PipelineTasks,
    researcher: Agent,
    writer: Agent,
    fetcher: Option<Arc<dyn PageFetcher>>,
    max_content_chars: usize,
}

impl ContentPipeline {
    pub fn tasks(&self) -> &PipelineTasks {
        &self.tasks
    }

    pub fn researcher(&self) -> &Agent {
        &self.researcher
    }

    pub fn writer(&self) -> &Agent {
        &self.writer
    }

    fn agent_for(&self, task: &ContentTask) -> &Agent {
        match task.role.kind {
            RoleKind::Researcher => &self.researcher,
            RoleKind::Writer => &self.writer,
        }
    }

    /// Run every task in order, feeding each one the outputs of its context
    /// tasks. A task whose context has not produced output yet is an error,
    /// so the writer can never run ahead of the researcher.
    pub async fn kickoff(&self) -> Result<PipelineOutput, PipelineError> {
        let mut outputs: HashMap<&str, String> = HashMap::new();

        for task in self.tasks.in_order() {
            let context = task
                .context
                .iter()
                .map(|dep| {
                    outputs.get(dep.name.as_str()).map(String::as_str).ok_or_else(|| {
                        PipelineError::MissingContext {
                            task: task.name.clone(),
                            dependency: dep.name.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let agent = self.agent_for(task);
            let grounding = match task.role.kind {
                RoleKind::Researcher => self.gather_grounding(agent).await,
                RoleKind::Writer => None,
            };

            let output = agent.perform(task, &context, grounding.as_deref()).await?;
            outputs.insert(task.name.as_str(), output);
        }

        Ok(PipelineOutput {
            research: outputs
                .remove(self.tasks.research.name.as_str())
                .unwrap_or_default(),
            content: outputs
                .remove(self.tasks.write.name.as_str())
                .unwrap_or_default(),
        })
    }

    /// Best-effort source material for the researcher: page text, then web
    /// search on the page title (or the URL). Failures only cost context.
    async fn gather_grounding(&self, agent: &Agent) -> Option<String> {
        let mut sections = Vec::new();
        let mut query = self.url.clone();

        if let Some(fetcher) = &self.fetcher {
            let page = match parse_page_url(&self.url) {
                Ok(url) => extract_content(fetcher.as_ref(), &url, self.max_content_chars).await,
                Err(e) => Err(e),
            };
            match page {
                Ok(page) => {
                    if let Some(title) = page.title {
                        sections.push(format!("Page title: {title}"));
                        query = title;
                    }
                    if !page.text.is_empty() {
                        sections.push(format!("Page text:\n{}", page.text));
                    }
                }
                Err(e) => warn!(url = %self.url, error = %e, "source page unavailable for research"),
            }
        }

        if agent.role.uses_search
            && let Some(search) = &agent.search
        {
            match search.search(&query).await {
                Ok(hits) if !hits.is_empty() => sections.push(format!(
                    "Web search results for \"{query}\":\n{}",
                    format_hits(&hits)
                )),
                Ok(_) => {}
                Err(e) => warn!(
                    tool = search.name(),
                    error = %scrub_secret_patterns(&format!("{e:#}")),
                    "web search failed"
                ),
            }
        }

        (!sections.is_empty()).then(|| sections.join("\n\n"))
    }
}

/// Builds [`ContentPipeline`]s bound to shared collaborators.
#[derive(Clone)]
pub struct PipelineFactory {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
    search: Option<Arc<dyn SearchTool>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
    max_content_chars: usize,
}

impl PipelineFactory {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            search: None,
            fetcher: None,
            max_content_chars: 2000,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SearchTool>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>, max_content_chars: usize) -> Self {
        self.fetcher = Some(fetcher);
        self.max_content_chars = max_content_chars;
        self
    }

    fn agent(&self, role: Role) -> Agent {
        Agent {
            role,
            provider: Arc::clone(&self.provider),
            model: self.model.clone(),
            temperature: self.temperature,
            search: if role.uses_search {
                self.search.clone()
            } else {
                None
            },
        }
    }

    pub fn build(
        &self,
        profile: &PlatformProfile,
        url: &str,
        image_url_hint: Option<&str>,
    ) -> ContentPipeline {
        ContentPipeline {
            url: url.to_string(),
            tasks: build_tasks(profile, url, image_url_hint),
            researcher: self.agent(profile.researcher),
            writer: self.agent(profile.writer),
            fetcher: self.fetcher.clone(),
            max_content_chars: self.max_content_chars,
        }
    }
}
