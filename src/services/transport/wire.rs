use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::TrackerResult;
use crate::kernel::envelope::EventEnvelope;

/// Embed accent color for chat webhooks.
const EMBED_COLOR: u32 = 3_447_003;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WireFormat {
    /// The envelope itself, as JSON.
    #[default]
    Json,
    /// A chat-webhook message wrapping the event for humans.
    ChatEmbed,
}

impl WireFormat {
    pub fn encode(&self, envelope: &EventEnvelope) -> TrackerResult<Value> {
        match self {
            WireFormat::Json => Ok(serde_json::to_value(envelope)?),
            WireFormat::ChatEmbed => chat_embed(envelope),
        }
    }
}

fn chat_embed(envelope: &EventEnvelope) -> TrackerResult<Value> {
    let kind = envelope.event_type.as_str();
    let data = serde_json::to_string_pretty(&envelope.data)?;
    Ok(json!({
        "content": format!("Event: {}", kind),
        "embeds": [{
            "title": format!("Tracker - {}", kind),
            "description": format!("Event from {}", envelope.page.path),
            "color": EMBED_COLOR,
            "fields": [
                { "name": "Event Data", "value": format!("```json\n{}\n```", data) },
                { "name": "Page", "value": envelope.page.url },
                { "name": "Timestamp", "value": envelope.timestamp },
            ]
        }]
    }))
}
