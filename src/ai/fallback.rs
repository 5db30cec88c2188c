use crate::models::blog::{BlogPost, BlogRequest, Tone};

const NEUTRAL_INTRO: &str = "This guide takes a closer look at";

/// Template post used whenever the model path fails. Plain interpolation only,
/// so it cannot fail.
pub fn generate(request: &BlogRequest) -> BlogPost {
    let topic = request.topic();
    let audience = request.audience();
    let intro = Tone::parse(request.tone())
        .map(|t| t.intro_phrase())
        .unwrap_or(NEUTRAL_INTRO);

    BlogPost {
        title: format!("Complete Guide to {}", topic),
        meta_description: format!(
            "A practical guide to {} for {} readers: benefits, first steps, best practices and common pitfalls.",
            topic,
            audience
        ),
        tags: format!(
            "{}, guide, tips, best practices, {}",
            topic.to_lowercase(),
            audience.to_lowercase()
        ),
        body: body(topic, audience, intro),
    }
}

fn body(topic: &str, audience: &str, intro: &str) -> String {
    format!(
        "# {topic}\n\n\
         ## Introduction\n\n\
         {intro} {topic}. Whether you are just hearing about it or already experimenting, \
         this guide is written for {audience} who want a practical, no-nonsense overview. \
         We will cover why {topic} matters, how to get started, which habits make the biggest \
         difference, and the obstacles you are most likely to meet along the way.\n\n\
         ## Key Benefits of {topic}\n\n\
         - **Better results:** {topic} helps {audience} focus effort where it counts.\n\
         - **Saved time:** a clear approach removes guesswork and repeated work.\n\
         - **Confidence:** understanding the fundamentals makes every later decision easier.\n\
         - **Growth:** small, steady improvements in {topic} compound over time.\n\n\
         ## Getting Started\n\n\
         1. **Define your goal.** Decide what success with {topic} looks like for you.\n\
         2. **Learn the basics.** Spend a little time on the core ideas before adding tools.\n\
         3. **Start small.** Pick one manageable task and complete it end to end.\n\
         4. **Review and adjust.** Look at what worked, keep it, and change what did not.\n\n\
         ## Best Practices\n\n\
         Consistency beats intensity. Set aside regular time for {topic}, keep notes on what you \
         learn, and share progress with peers. {audience} who treat {topic} as an ongoing practice \
         rather than a one-off project tend to see the most lasting benefit.\n\n\
         ## Common Challenges\n\n\
         Most people run into the same problems: limited time, information overload and uneven \
         motivation. Tackle them by narrowing your focus, relying on a few trusted sources and \
         celebrating small wins. When you get stuck, revisit your original goal and simplify.\n\n\
         ## Conclusion\n\n\
         {topic} does not have to be complicated. With a clear goal, a simple plan and steady \
         practice, {audience} can turn it into a real advantage. Start with one step today and \
         build from there.\n",
        topic = topic,
        audience = audience,
        intro = intro,
    )
}
