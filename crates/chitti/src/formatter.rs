use std::fmt::Write;

use crate::model::Retrieval;

/// Render the rationale and retrieved content as markdown, one template per medium.
pub fn format_response(rationale: &str, retrieval: &Retrieval) -> String {
    let mut out = format!("**Reasoning:** {rationale}\n\n");
    match retrieval {
        Retrieval::Text(summary) => {
            out.push_str("**Wikipedia Summary:**\n");
            out.push_str(summary);
        }
        Retrieval::Image(image) => {
            let _ = write!(
                out,
                "**Generated Image:**\n![Generated Image]({url})\n\nImage URL: {url}",
                url = image.url
            );
        }
        Retrieval::Video(hits) => {
            out.push_str("**YouTube Videos:**");
            for (i, hit) in hits.iter().enumerate() {
                let _ = write!(out, "\n{}. [{}]({})", i + 1, hit.title, hit.url);
            }
        }
    }
    out
}
