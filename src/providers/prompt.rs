use crate::model::VideoDetails;

/// The system message sent ahead of every rendered prompt.
pub const SYSTEM_PROMPT: &str = "You are a YouTube optimization expert.";

/// The user prompt template asking for titles, description, hashtags and timestamps.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro. Placeholders are `{title}`, `{description}`, `{tags}`,
/// `{channel}` and `{transcript}`; any other brace (the JSON example) is literal.
pub const PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Render the prompt for a video
///
/// Substitution is single-pass, so placeholder-looking text inside a title or
/// transcript is left as written.
pub fn render_prompt(details: &VideoDetails, transcript: &str) -> String {
    let tags = details.tags.join(", ");

    let mut output = String::with_capacity(PROMPT_TEMPLATE.len() + transcript.len());
    let mut rest = PROMPT_TEMPLATE;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after
            .find('}')
            .and_then(|close| {
                placeholder(&after[..close], details, &tags, transcript).map(|value| (close, value))
            });

        match value {
            Some((close, value)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);

    output
}

fn placeholder<'a>(
    name: &str,
    details: &'a VideoDetails,
    tags: &'a str,
    transcript: &'a str,
) -> Option<&'a str> {
    match name {
        "title" => Some(details.title.as_str()),
        "description" => Some(details.description.as_str()),
        "tags" => Some(tags),
        "channel" => Some(details.channel_title.as_str()),
        "transcript" => Some(transcript),
        _ => None,
    }
}
