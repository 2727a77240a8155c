use clap::{Parser, Subcommand};

/// `content-router` - turns a source URL into platform-tailored posts.
#[derive(Parser, Debug)]
#[command(name = "content-router")]
#[command(version)]
#[command(about = "Route a URL to a researcher/writer pipeline per platform.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Run one workflow from the terminal and print the result as JSON
    Generate {
        /// Source page URL
        #[arg(long)]
        url: String,

        /// blog, newsletter, linkedin, facebook or x
        #[arg(long = "content-type", short = 't')]
        content_type: String,

        /// Also resolve a cover image
        #[arg(long)]
        with_image: bool,

        /// Use this text instead of the page title as the image prompt core
        #[arg(long, requires = "with_image")]
        image_prompt: Option<String>,

        /// Aspect ratio passed to image generation (defaults to config)
        #[arg(long, requires = "with_image")]
        aspect_ratio: Option<String>,
    },

    /// Print the effective configuration with secrets masked
    Config,
}
