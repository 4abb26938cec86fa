use serde::{Deserialize, Serialize};

/// Pending reply target for a conversation: the quoted message link and the
/// quote text that is prefilled into the composer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub link: String,
    pub content: String,
}

impl ChatReply {
    pub fn new(link: &str, content: &str) -> Self {
        Self {
            link: link.to_string(),
            content: content.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_empty() && self.content.is_empty()
    }
}

/// One content part of a posted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostContent {
    Text(String),
    Url(String),
    Mention(String),
    /// Code blocks and references are not quoted
    Code(String),
}

/// Build the composer text for replying to a post: every line of the post's
/// text quoted with `> `, then an attribution prompt for the author.
pub fn quote_reply(contents: &[PostContent], author: &str) -> String {
    let body: String = contents
        .iter()
        .filter_map(|c| match c {
            PostContent::Text(s) | PostContent::Url(s) | PostContent::Mention(s) => {
                Some(s.as_str())
            }
            PostContent::Code(_) => None,
        })
        .collect();

    let quoted = body
        .split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n~{}: ", quoted, author.trim_start_matches('~'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_reply_multiline() {
        let contents = vec![
            PostContent::Text("hello ".to_string()),
            PostContent::Mention("~nec".to_string()),
            PostContent::Code("ignored".to_string()),
            PostContent::Text("\nsee ".to_string()),
            PostContent::Url("https://urbit.org".to_string()),
        ];

        let reply = quote_reply(&contents, "~zod");

        assert_eq!(reply, "> hello ~nec\n> see https://urbit.org\n\n~zod: ");
    }

    #[test]
    fn test_empty_reply() {
        assert!(ChatReply::default().is_empty());
        assert!(!ChatReply::new("/1/2", "").is_empty());
    }
}
