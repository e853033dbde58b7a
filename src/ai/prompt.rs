use super::ChatMessage;

pub const COPYWRITER_SYSTEM_PROMPT: &str =
    "You are a helpful marketing copywriter. Always respond with valid JSON only.";

const NOT_SPECIFIED: &str = "Not specified";

fn or_not_specified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

pub fn build_copy_prompt(
    description: &str,
    industry: Option<&str>,
    business_name: Option<&str>,
) -> String {
    format!(
        r#"You are a marketing copywriter helping create website content.

Based on this business information, generate marketing content:

Business Name: {name}
Industry: {industry}
Description: {description}

Generate the following (respond ONLY with valid JSON, no markdown):
{{
  "tagline": "A catchy tagline, max 8 words",
  "heroHeadline": "A compelling headline for the hero section, max 10 words",
  "heroSubheadline": "A persuasive subheadline, 2 sentences max",
  "services": [
    {{"title": "Service 1 name", "description": "1 sentence description"}},
    {{"title": "Service 2 name", "description": "1 sentence description"}},
    {{"title": "Service 3 name", "description": "1 sentence description"}}
  ],
  "seoDescription": "An SEO meta description, max 160 characters"
}}"#,
        name = or_not_specified(business_name),
        industry = or_not_specified(industry),
        description = description.trim(),
    )
}

pub fn copy_messages(
    description: &str,
    industry: Option<&str>,
    business_name: Option<&str>,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(COPYWRITER_SYSTEM_PROMPT),
        ChatMessage::user(build_copy_prompt(description, industry, business_name)),
    ]
}
