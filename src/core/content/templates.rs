use super::types::{ContentType, Role};

/// Length/style envelope for a writing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthEnvelope {
    Words { min: u32, max: u32 },
    Characters { max: u32 },
}

impl LengthEnvelope {
    pub fn requirement(self) -> String {
        match self {
            Self::Words { min, max } => format!("{min}-{max} words"),
            Self::Characters { max } => format!(
                "Adhere to the platform's character limit of {max} characters (ensure the post is concise)"
            ),
        }
    }
}

/// Per-platform configuration: personas, checklists and the writing envelope.
#[derive(Debug)]
pub struct PlatformProfile {
    pub content_type: ContentType,
    pub researcher: Role,
    pub writer: Role,
    /// First line of the research task; `{url}` is substituted.
    pub research_brief: &'static str,
    pub research_checklist: &'static [&'static str],
    pub research_closing: &'static str,
    pub research_expected: &'static str,
    pub write_brief: &'static str,
    pub envelope: LengthEnvelope,
    pub write_requirements: &'static [&'static str],
    /// How the writer should use an image URL hint, if the platform takes one.
    pub image_instruction: Option<&'static str>,
    pub write_closing: &'static str,
    pub write_expected: &'static str,
}

pub static BLOG: PlatformProfile = PlatformProfile {
    content_type: ContentType::Blog,
    researcher: Role::researcher(
        "Blog Content Researcher",
        "Extract and analyze web content to identify key insights for blog posts",
        "You are an expert content researcher who specializes in analyzing web content and \
         identifying the most valuable insights for creating engaging blog posts. You excel at \
         understanding complex topics and breaking them down into digestible content.",
    ),
    writer: Role::writer(
        "Blog Content Writer",
        "Transform research into engaging, well-structured blog posts",
        "You are a skilled blog writer with expertise in creating compelling content that engages \
         readers and drives meaningful discussions. You excel at taking complex information and \
         making it accessible and interesting.",
    ),
    research_brief: "Analyze the content from {url} and extract key insights for a blog post.\nYour analysis should identify:",
    research_checklist: &[
        "Main themes and key points",
        "Interesting insights or data points",
        "Potential angles for blog content",
        "Target audience considerations",
        "SEO-worthy topics and keywords",
    ],
    research_closing: "Provide a comprehensive research summary that will guide blog writing.",
    research_expected: "A detailed research summary with key insights, themes, and recommendations for blog content",
    write_brief: "Create an engaging blog post based on the research findings.",
    envelope: LengthEnvelope::Words { min: 800, max: 1200 },
    write_requirements: &[
        "Engaging headline",
        "Clear introduction with hook",
        "Well-structured body with subheadings",
        "Actionable insights or takeaways",
        "Strong conclusion",
        "SEO-optimized content",
        "Professional yet accessible tone",
    ],
    image_instruction: Some("suggest a suitable placement or way to incorporate it visually"),
    write_closing: "Format the output in markdown.",
    write_expected: "A complete, well-structured blog post in markdown format",
};

pub static NEWSLETTER: PlatformProfile = PlatformProfile {
    content_type: ContentType::Newsletter,
    researcher: Role::researcher(
        "Newsletter Content Researcher",
        "Extract key insights from web content for newsletter format",
        "You are an expert at identifying the most newsworthy and actionable insights from web \
         content. You understand what makes content valuable for newsletter subscribers and how \
         to present information concisely.",
    ),
    writer: Role::writer(
        "Newsletter Writer",
        "Create engaging newsletter content that provides immediate value",
        "You are a newsletter specialist who knows how to craft content that busy professionals \
         want to read. You excel at creating scannable, actionable content with clear takeaways.",
    ),
    research_brief: "Analyze the content from {url} and extract the most newsworthy insights for a newsletter.\nFocus on:",
    research_checklist: &[
        "Most important news or updates",
        "Actionable insights subscribers can use immediately",
        "Key statistics or data points",
        "Industry implications",
        "Quick takeaways for busy professionals",
    ],
    research_closing: "Prioritize information that provides immediate value.",
    research_expected: "A focused research summary highlighting the most valuable and actionable insights",
    write_brief: "Create a compelling newsletter section based on the research.",
    envelope: LengthEnvelope::Words { min: 400, max: 600 },
    write_requirements: &[
        "Catchy subject line",
        "Scannable format with bullet points",
        "Clear action items or takeaways",
        "Conversational yet professional tone",
        "Include relevant links or resources",
        "End with a clear call-to-action",
    ],
    image_instruction: None,
    write_closing: "Format for easy reading in email.",
    write_expected: "A complete newsletter section with subject line and formatted content",
};

pub static LINKEDIN: PlatformProfile = PlatformProfile {
    content_type: ContentType::LinkedIn,
    researcher: Role::researcher(
        "LinkedIn Content Researcher",
        "Extract professional insights suitable for LinkedIn audience",
        "You are an expert at identifying professional insights and industry trends that \
         resonate with LinkedIn's professional audience. You understand what content drives \
         engagement on professional networks.",
    ),
    writer: Role::writer(
        "LinkedIn Content Writer",
        "Create engaging LinkedIn posts that drive professional engagement",
        "You are a LinkedIn content specialist who knows how to craft posts that get noticed in \
         the professional feed. You excel at creating content that sparks meaningful \
         professional discussions.",
    ),
    research_brief: "Analyze the content from {url} and extract insights suitable for LinkedIn audience.",
    research_checklist: &[],
    research_closing: "Consider what would engage LinkedIn's professional audience based on the content.",
    research_expected: "Research summary focused on professional insights and engagement opportunities",
    write_brief: "Create an engaging LinkedIn post based on the research.",
    envelope: LengthEnvelope::Words { min: 150, max: 300 },
    write_requirements: &[
        "Professional yet conversational tone",
        "Include relevant hashtags (3-5)",
        "Pose a question to encourage engagement",
        "Share a key insight or lesson learned from the content",
        "Use line breaks for readability",
        "Include a call-to-action for comments",
    ],
    image_instruction: None,
    write_closing: "Make it shareable and discussion-worthy.",
    write_expected: "A complete LinkedIn post with hashtags and engagement elements",
};

pub static FACEBOOK: PlatformProfile = PlatformProfile {
    content_type: ContentType::Facebook,
    researcher: Role::researcher(
        "Facebook Content Researcher",
        "Extract and analyze web content to identify key insights for engaging Facebook posts",
        "You are an expert content researcher who specializes in analyzing web content and \
         identifying the most shareable and discussion-worthy insights for creating engaging \
         Facebook content that resonates with a broad audience.",
    ),
    writer: Role::writer(
        "Facebook Content Writer",
        "Transform research into engaging, shareable Facebook posts and updates",
        "You are a skilled Facebook writer with expertise in creating compelling content that \
         captures attention and encourages interaction on the platform. You excel at crafting \
         posts that are concise, visually appealing, and prompt engagement.",
    ),
    research_brief: "Analyze the content from {url} and extract key insights suitable for engaging Facebook posts.\nFocus on identifying:",
    research_checklist: &[
        "Main points that would resonate with a general Facebook audience.",
        "Emotional or relatable angles.",
        "Potential visual hooks or ideas (if applicable).",
        "Insights that could spark discussion.",
    ],
    research_closing: "Provide a research summary that highlights shareable moments and engagement opportunities for Facebook.",
    research_expected: "A research summary focused on insights for engaging and shareable Facebook content.",
    write_brief: "Create a compelling Facebook post based on the research findings.",
    envelope: LengthEnvelope::Words { min: 100, max: 300 },
    write_requirements: &[
        "Engaging and conversational tone.",
        "Keep it relatively concise, suitable for quick scrolling.",
        "Use emojis appropriately to increase visual appeal and convey tone.",
        "Include a clear call-to-action for likes, shares, or comments.",
        "Consider using line breaks for readability.",
        "The post should feel natural and engaging for a Facebook feed.",
    ],
    image_instruction: Some("include it at the beginning of the post"),
    write_closing: "Format the output as a single Facebook post.",
    write_expected: "A complete, engaging Facebook post formatted for easy reading.",
};

pub static X: PlatformProfile = PlatformProfile {
    content_type: ContentType::X,
    researcher: Role::researcher(
        "X Content Researcher",
        "Extract concise and trending insights from web content for X posts",
        "You are an expert at identifying the most impactful and tweetable insights from web \
         content. You understand what trends on X and how to find information that can be \
         distilled into short, engaging posts.",
    ),
    writer: Role::writer(
        "X Content Writer",
        "Create concise and engaging X posts that drive interaction",
        "You are an X content specialist who knows how to craft tweets that get retweeted, \
         liked, and commented on. You excel at creating short, punchy content with relevant \
         hashtags and calls to action.",
    ),
    research_brief: "Analyze the content from {url} and extract concise, tweetable insights for X posts.\nIdentify:",
    research_checklist: &[
        "The most impactful statistics or quotes.",
        "Key takeaways that can be summarized in a few sentences.",
        "Trending topics or hashtags related to the content.",
        "Potential angles for a punchy, attention-grabbing tweet.",
    ],
    research_closing: "Provide a research summary focused on key points and potential hashtags for X posts.",
    research_expected: "A research summary with concise insights and relevant hashtags for X.",
    write_brief: "Create an engaging X post based on the research findings.",
    envelope: LengthEnvelope::Characters { max: 280 },
    write_requirements: &[
        "Use a punchy and attention-grabbing tone.",
        "Include relevant hashtags (2-4).",
        "Consider including a question to encourage replies and engagement.",
        "Use line breaks sparingly for maximum impact.",
        "The post should be highly shareable and concise.",
    ],
    image_instruction: Some("include it at the beginning of the post"),
    write_closing: "Format the output as a single X post.",
    write_expected: "A complete, concise, and engaging X post with hashtags and engagement elements.",
};

/// Every built-in platform profile.
pub static PROFILES: [&PlatformProfile; 5] = [&BLOG, &NEWSLETTER, &LINKEDIN, &FACEBOOK, &X];
