use crate::input::InputRecord;

const SOURCE_TEXT_PREAMBLE: &str = "You will be provided with source text about a real estate community. \
Your first task is to identify the **Community Name, City, and State** from this text. \
Use this identified information as the primary context for your response. \
Then, follow the detailed instructions to generate a full community page. \
The source text is the primary source of truth for details like amenities and housing options. \
For any information not present in the source text (like commute times or specific neighborhood names if missing), \
use the identified community/location to perform a search.";

/// User-turn text describing the community.
pub fn user_context(input: &InputRecord) -> String {
    match input {
        InputRecord::SourceText { text } => {
            format!("{SOURCE_TEXT_PREAMBLE}\n\n**Source Text Provided:**\n{text}\n")
        }
        InputRecord::Details {
            community_name,
            city,
            state,
        } => format!("**Community:** {community_name}, {city}, {state}"),
    }
}
