use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;

static FENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json|JSON)?").expect("valid fence pattern"));

/// A vocabulary entry the tutor highlights in its reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyWord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub irish: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phonetic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub munster_note: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english: String,
}

/// One tutor reply in the shape the model is prompted to produce
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_spoken: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub words: Vec<VocabularyWord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

impl ChatTurn {
    /// Best-effort parse of the model's reply text.
    ///
    /// The outermost `{ ... }` span is decoded as a turn. When nothing in the
    /// reply decodes to a turn with a message, the raw text becomes the message.
    pub fn from_reply(text: &str) -> Self {
        let unfenced = FENCE_PATTERN.replace_all(text, "");

        let parsed = json_span(&unfenced)
            .and_then(|span| serde_json::from_str::<ChatTurn>(span).ok())
            .filter(|turn| !turn.message.trim().is_empty());

        match parsed {
            Some(mut turn) => {
                if turn.message_spoken.trim().is_empty() {
                    turn.message_spoken = turn.message.clone();
                }
                turn
            }
            None => {
                tracing::debug!(
                    reply_length = text.len(),
                    "Reply is not a structured turn, using raw text"
                );
                Self::plain(text.trim())
            }
        }
    }

    fn plain(text: &str) -> Self {
        Self {
            message: text.to_string(),
            message_spoken: text.to_string(),
            words: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

/// Models sometimes emit `null` where a string or list is expected
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
