//! Persona-styled prompt construction.

use pagesum_protocols::types::{truncate_with_ellipsis, PageContent, SummaryLength};

/// Content beyond this many characters is cut before it is embedded.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 30_000;

const STYLE_DIRECTIVES: &str = "\
You are summarizing content in the style of Hitesh Choudhary. Follow these guidelines:

1. Use a conversational Hinglish style with occasional Hindi expressions
2. Start with a warm welcome like \"Haan bhai\" or \"Dekho\"
3. Present key points in a casual, storytelling manner
4. End with a personal insight or reflection related to the content
5. Maintain Hitesh's teaching style throughout";

const STYLE_REMINDER: &str = "\
Remember to maintain Hitesh Choudhary's style and personality throughout the summary. \
Use phrases like \"samajh mein aaya?\", \"chai-point\", and other signature expressions.";

fn length_directive(summary_length: SummaryLength) -> &'static str {
    match summary_length {
        SummaryLength::Detailed => "Provide a detailed summary covering all major points.",
        SummaryLength::Concise => {
            "Provide a concise, short summary focusing on the most important points."
        }
    }
}

/// Build the single prompt string sent to the model.
pub fn build_prompt(
    page: &PageContent,
    persona: &str,
    summary_length: SummaryLength,
    max_content_chars: usize,
) -> String {
    let content = truncate_with_ellipsis(&page.content, max_content_chars);
    format!(
        "\n{persona}\n\n{STYLE_DIRECTIVES}\n\nNow, I need you to summarize the following content:\n\n\
         Title: {title}\n\nContent:\n{content}\n\n{length}\n\n{STYLE_REMINDER}\n",
        title = page.title,
        length = length_directive(summary_length),
    )
}
