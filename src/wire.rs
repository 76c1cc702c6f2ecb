//! JSON shapes exchanged with the remote collection.
//!
//! Deployments disagree on field names (`name`/`done` versus
//! `title`/`completed`). Decoding accepts either spelling; encoding uses the
//! configured `WireSchema`.

use serde_json::{Value, json};

use crate::error::{Result, TaskpadError};
use crate::item::{Draft, Item, ItemId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum WireSchema {
    /// `{ "name", "description", "done" }`
    #[default]
    NameDone,
    /// `{ "title", "description", "completed" }`
    TitleCompleted,
}

impl WireSchema {
    fn title_field(self) -> &'static str {
        match self {
            WireSchema::NameDone => "name",
            WireSchema::TitleCompleted => "title",
        }
    }

    fn completed_field(self) -> &'static str {
        match self {
            WireSchema::NameDone => "done",
            WireSchema::TitleCompleted => "completed",
        }
    }

    pub fn encode_draft(self, draft: &Draft) -> Value {
        self.encode(&draft.title, &draft.description, draft.completed)
    }

    /// Full-replace body for an update. The id travels in the path.
    pub fn encode_item(self, item: &Item) -> Value {
        self.encode(&item.title, &item.description, item.completed)
    }

    fn encode(self, title: &str, description: &str, completed: bool) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(self.title_field().to_string(), json!(title));
        body.insert("description".to_string(), json!(description));
        body.insert(self.completed_field().to_string(), json!(completed));
        Value::Object(body)
    }
}

/// Ids arrive as JSON numbers from some servers and strings from others.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawId> for ItemId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => ItemId::from(n.to_string()),
            RawId::Text(s) => ItemId::from(s),
        }
    }
}

/// Either spelling of each field is accepted; when a record carries both,
/// `title`/`completed` win over `name`/`done`.
#[derive(Debug, serde::Deserialize)]
struct ItemRecord {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    done: Option<bool>,
}

impl ItemRecord {
    fn id(&mut self) -> Option<ItemId> {
        self.id
            .take()
            .map(ItemId::from)
            .filter(|id| !id.is_empty())
    }

    fn title(&mut self) -> Option<String> {
        self.title.take().or_else(|| self.name.take())
    }

    fn completed(&self) -> Option<bool> {
        self.completed.or(self.done)
    }
}

impl TryFrom<ItemRecord> for Item {
    type Error = TaskpadError;

    fn try_from(mut record: ItemRecord) -> Result<Self> {
        let id = record
            .id()
            .ok_or_else(|| TaskpadError::transport("malformed response: item without id"))?;
        let title = record
            .title()
            .ok_or_else(|| TaskpadError::transport("malformed response: item without title"))?;
        Ok(Item {
            id,
            title,
            completed: record.completed().unwrap_or(false),
            description: record.description.unwrap_or_default(),
        })
    }
}

pub fn decode_item(body: &str) -> Result<Item> {
    let record: ItemRecord = serde_json::from_str(body)?;
    Item::try_from(record)
}

pub fn decode_items(body: &str) -> Result<Vec<Item>> {
    let records: Vec<ItemRecord> = serde_json::from_str(body)?;
    records.into_iter().map(Item::try_from).collect()
}

/// Decode the response to a successful update of `sent`.
///
/// The id is already known from the request path, so servers that omit it,
/// omit other fields, or reply with an empty body still count as having
/// stored `sent`.
pub fn decode_updated(body: &str, sent: &Item) -> Result<Item> {
    if body.trim().is_empty() {
        return Ok(sent.clone());
    }
    let mut record: ItemRecord = serde_json::from_str(body)?;
    Ok(Item {
        id: record.id().unwrap_or_else(|| sent.id.clone()),
        title: record.title().unwrap_or_else(|| sent.title.clone()),
        completed: record.completed().unwrap_or(sent.completed),
        description: record
            .description
            .unwrap_or_else(|| sent.description.clone()),
    })
}
