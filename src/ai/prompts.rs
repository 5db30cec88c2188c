use crate::models::blog::{BlogRequest, Tone};

/// System prompt for blog generation
pub fn blog_system() -> String {
    "You are a professional blog writer. Write engaging, well-structured, SEO-friendly content. \
     Always respond with a single valid JSON object exactly as specified. \
     Do not include markdown fences or any explanation outside the JSON."
        .to_string()
}

/// Generate a full blog post for a topic, tone and audience
pub fn blog_post(request: &BlogRequest) -> String {
    let tone = request.tone();
    let style = match Tone::parse(tone) {
        Some(t) => format!("Use a {} tone ({})", t.name().to_lowercase(), t.preview()),
        None => format!("Use a {} tone", tone.to_lowercase()),
    };

    format!(
        "Write a complete SEO-friendly blog post on the topic: \"{}\"\n\n\
         Requirements:\n\
         - {}\n\
         - Target audience: {}\n\
         - An attention-grabbing title\n\
         - Start with a brief introduction\n\
         - 4-6 sections, each under a markdown H2 heading (## Heading)\n\
         - Conclude with a short summary\n\
         - The body must be at least 500 words of markdown\n\
         - A meta description of at most 160 characters\n\
         - Exactly 5 SEO-friendly tags as one comma-separated string\n\n\
         Output rules:\n\
         - Respond with ONLY a JSON object, nothing before or after it\n\
         - Use exactly these four keys: \"title\", \"meta_description\", \"tags\", \"body\"\n\
         - All four values must be strings\n\
         - Do NOT wrap the JSON in ``` code fences\n\
         - Inside string values escape every double quote as \\\" and every line break as \\n\n\n\
         Respond as JSON:\n\
         {{\"title\": \"...\", \"meta_description\": \"...\", \"tags\": \"tag1, tag2, tag3, tag4, tag5\", \"body\": \"## ...\\n\\n...\"}}",
        request.topic(),
        style,
        request.audience()
    )
}
