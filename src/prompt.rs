use crate::models::CaptionRequest;

/// Response layout the parser is built around.
pub const RESPONSE_FORMAT: &str = "1. [First caption with hashtags and emojis]\n\
Reason: [Brief explanation]\n\n\
2. [Second caption with hashtags and emojis]\n\
Reason: [Brief explanation]\n\n\
3. [Third caption with hashtags and emojis]\n\
Reason: [Brief explanation]\n\n\
Filter: [Recommended Instagram filter name]\n\
[Filter explanation]\n\n\
Songs:\n\
- [Song Title - Artist Name]\n\
- [Song Title - Artist Name]\n\
- [Song Title - Artist Name]";

pub fn build_prompt(req: &CaptionRequest) -> String {
    let mut details = String::new();
    if !req.people.trim().is_empty() {
        details.push_str(&format!(" The following people are in the photo: {}.", req.people.trim()));
    }
    if !req.location.trim().is_empty() {
        details.push_str(&format!(" The location of the photo is: {}.", req.location.trim()));
    }
    if !req.moment.trim().is_empty() {
        details.push_str(&format!(" A special moment to highlight: {}", req.moment.trim()));
    }

    let custom_style = if req.sample_captions.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\nBelow are my favorite captions. Try to match their tone and style:\n{}",
            req.sample_captions.trim()
        )
    };

    format!(
        "Create three {length}, {style} Instagram captions for this image.{details}\n\n\
         Format your response EXACTLY like this:\n\n\
         {RESPONSE_FORMAT}{custom_style}",
        length = req.length,
        style = req.style,
    )
}
