//! Remote collection client.
//!
//! `RemoteCollection` is the seam between the controller and the external item
//! store: four CRUD calls, no retries, no caching. `HttpCollection` talks to a
//! REST endpoint laid out as `<base>/<collection>/` and
//! `<base>/<collection>/<id>`; a 404 on update or delete surfaces as
//! `TaskpadError::NotFound`.

use std::future::Future;

use log::info;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::{Result, TaskpadError};
use crate::item::{Draft, Item, ItemId};
use crate::wire::{self, WireSchema};

pub trait RemoteCollection {
    fn list_all(&self) -> impl Future<Output = Result<Vec<Item>>> + Send;

    fn create(&self, draft: &Draft) -> impl Future<Output = Result<Item>> + Send;

    /// Full-replace update; `item` carries every field to keep.
    fn update(&self, id: &ItemId, item: &Item) -> impl Future<Output = Result<Item>> + Send;

    fn delete(&self, id: &ItemId) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpCollection {
    client: reqwest::Client,
    collection_url: Url,
    schema: WireSchema,
}

impl HttpCollection {
    pub fn new(base_url: &str, collection: &str, schema: WireSchema) -> Result<Self> {
        let mut collection_url = Url::parse(base_url)?;
        collection_url
            .path_segments_mut()
            .map_err(|_| TaskpadError::config(format!("{base_url} cannot be a base URL")))?
            .pop_if_empty()
            .push(collection)
            .push("");

        Ok(Self {
            client: reqwest::Client::new(),
            collection_url,
            schema,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &ItemId) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
        id: Option<&ItemId>,
    ) -> Result<String> {
        info!("{method} {url}");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| TaskpadError::transport(format!("{method} {url} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(TaskpadError::NotFound(id.clone()));
        }
        if !status.is_success() {
            return Err(TaskpadError::transport(format!(
                "{method} {url} failed with status {status}: {}",
                response.text().await.unwrap_or_default()
            )));
        }

        Ok(response.text().await?)
    }
}

impl RemoteCollection for HttpCollection {
    async fn list_all(&self) -> Result<Vec<Item>> {
        let body = self
            .send(Method::GET, self.collection_url.clone(), None, None)
            .await?;
        let items = wire::decode_items(&body)?;
        info!("Fetched {} items", items.len());
        Ok(items)
    }

    async fn create(&self, draft: &Draft) -> Result<Item> {
        let body = self
            .send(
                Method::POST,
                self.collection_url.clone(),
                Some(self.schema.encode_draft(draft)),
                None,
            )
            .await?;
        let created = wire::decode_item(&body)?;
        info!("Created item with ID: {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &ItemId, item: &Item) -> Result<Item> {
        let body = self
            .send(
                Method::PUT,
                self.item_url(id),
                Some(self.schema.encode_item(item)),
                Some(id),
            )
            .await?;
        let sent = Item {
            id: id.clone(),
            ..item.clone()
        };
        wire::decode_updated(&body, &sent)
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        self.send(Method::DELETE, self.item_url(id), None, Some(id))
            .await?;
        info!("Deleted item {id}");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn collection(server: &MockServer, schema: WireSchema) -> HttpCollection {
        HttpCollection::new(&server.uri(), "todos", schema).unwrap()
    }

    #[test]
    fn builds_collection_and_item_urls() {
        let remote =
            HttpCollection::new("http://127.0.0.1:8000", "todos", WireSchema::NameDone).unwrap();
        assert_eq!(
            remote.collection_url().as_str(),
            "http://127.0.0.1:8000/todos/"
        );
        assert_eq!(
            remote.item_url(&ItemId::from(5)).as_str(),
            "http://127.0.0.1:8000/todos/5"
        );

        let nested =
            HttpCollection::new("https://example.com/api/", "items", WireSchema::NameDone).unwrap();
        assert_eq!(
            nested.collection_url().as_str(),
            "https://example.com/api/items/"
        );
    }

    #[test]
    fn rejects_unparsable_base_url() {
        let err = HttpCollection::new("not a url", "todos", WireSchema::NameDone).unwrap_err();
        assert!(matches!(err, TaskpadError::Url(_)));
    }

    #[tokio::test]
    async fn test_list_all_decodes_items() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/todos/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "A", "description": "", "done": false},
                {"id": 2, "name": "B", "description": "", "done": true}
            ])))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let items = remote.list_all().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "A");
        assert!(items[1].completed);
    }

    #[tokio::test]
    async fn test_list_all_server_error_is_transport() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/todos/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let err = remote.list_all().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("failed with status 503"));
        assert!(err.to_string().contains("down for maintenance"));
    }

    #[tokio::test]
    async fn test_create_posts_schema_body_and_returns_assigned_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/todos/"))
            .and(body_json(serde_json::json!({
                "name": "Buy milk",
                "description": "",
                "done": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 17,
                "name": "Buy milk",
                "description": "",
                "done": false
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let created = remote.create(&Draft::new("Buy milk")).await.unwrap();

        assert_eq!(created.id, ItemId::from(17));
        assert_eq!(created.title, "Buy milk");
        assert!(!created.completed);
    }

    #[tokio::test]
    async fn test_create_without_id_in_response_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/todos/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"title": "x", "completed": false})),
            )
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::TitleCompleted).await;
        let err = remote.create(&Draft::new("x")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_create_rejected_payload_is_transport() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/todos/"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "detail": "field required"
            })))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let err = remote.create(&Draft::new("x")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("422"));
    }

    #[tokio::test]
    async fn test_update_puts_full_item() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/todos/3"))
            .and(body_json(serde_json::json!({
                "title": "Renamed",
                "description": "keep",
                "completed": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3,
                "title": "Renamed",
                "description": "keep",
                "completed": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::TitleCompleted).await;
        let item = Item {
            id: ItemId::from(3),
            title: "Renamed".to_string(),
            completed: true,
            description: "keep".to_string(),
        };
        let updated = remote.update(&item.id, &item).await.unwrap();
        assert_eq!(updated, item);
    }

    #[tokio::test]
    async fn test_update_response_without_id_uses_path_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/todos/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "A",
                "description": "",
                "done": true
            })))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let item = Item {
            id: ItemId::from(3),
            title: "A".to_string(),
            completed: true,
            description: String::new(),
        };
        let updated = remote.update(&item.id, &item).await.unwrap();
        assert_eq!(updated, item);
    }

    #[tokio::test]
    async fn test_update_with_empty_body_echoes_sent_item() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/todos/4"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let item = Item {
            id: ItemId::from(4),
            title: "B".to_string(),
            completed: false,
            description: "notes".to_string(),
        };
        let updated = remote.update(&item.id, &item).await.unwrap();
        assert_eq!(updated, item);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/todos/9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        let item = Item {
            id: ItemId::from(9),
            title: "gone".to_string(),
            completed: false,
            description: String::new(),
        };
        let err = remote.update(&item.id, &item).await.unwrap_err();
        assert!(matches!(err, TaskpadError::NotFound(id) if id == ItemId::from(9)));
    }

    #[tokio::test]
    async fn test_delete_success_and_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/todos/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/todos/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let remote = collection(&mock_server, WireSchema::NameDone).await;
        assert!(remote.delete(&ItemId::from(1)).await.is_ok());

        let err = remote.delete(&ItemId::from(2)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport() {
        // Nothing listens on port 9 (discard) in the test environment.
        let remote =
            HttpCollection::new("http://127.0.0.1:9", "todos", WireSchema::NameDone).unwrap();
        let err = remote.list_all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
