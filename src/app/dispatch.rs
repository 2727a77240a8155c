use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use content_router::Config;
use content_router::core::services::Services;
use content_router::core::workflow::WorkflowState;
use content_router::transport::gateway::{ContentResponse, ContentWithImageResponse};
use std::sync::Arc;
use tracing::info;

struct GenerateArgs {
    url: String,
    content_type: String,
    with_image: bool,
    image_prompt: Option<String>,
    aspect_ratio: Option<String>,
}

/// Run a single workflow and print the response body the gateway would send.
async fn run_generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let services = Services::from_config(config).await;
    let Some(flow) = services.flow.as_ref() else {
        bail!("LLM not initialized. Check API keys.");
    };

    let state = WorkflowState::new(args.url.clone(), args.content_type.clone());
    let content = flow
        .execute(state)
        .await
        .map_err(|failure| anyhow::Error::new(failure.error))?
        .into_final_content();

    let json = if args.with_image {
        let aspect_ratio = args
            .aspect_ratio
            .as_deref()
            .unwrap_or(&config.image.default_aspect_ratio);
        let image = services
            .image_resolver
            .resolve(&args.url, args.image_prompt.as_deref(), aspect_ratio)
            .await;
        serde_json::to_string_pretty(&ContentWithImageResponse {
            url: args.url,
            content_type: args.content_type,
            image_url: image.reference,
            image_source: image.source_kind,
            content,
        })
    } else {
        serde_json::to_string_pretty(&ContentResponse {
            url: args.url,
            content_type: args.content_type,
            content,
        })
    }
    .context("serialize generate output")?;

    println!("{json}");
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let config = Arc::new(config);

    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting content router gateway on {host} (random port)");
            } else {
                info!("Starting content router gateway on {host}:{port}");
            }
            content_router::transport::gateway::run_gateway(&host, port, Arc::clone(&config))
                .await
        }

        Commands::Generate {
            url,
            content_type,
            with_image,
            image_prompt,
            aspect_ratio,
        } => {
            run_generate(
                &config,
                GenerateArgs {
                    url,
                    content_type,
                    with_image,
                    image_prompt,
                    aspect_ratio,
                },
            )
            .await
        }

        Commands::Config => {
            let shown = toml::to_string_pretty(&config.redacted())
                .context("serialize effective config")?;
            println!("# {}", config.config_path.display());
            println!("{shown}");
            Ok(())
        }
    }
}
