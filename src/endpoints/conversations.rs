//! Conversation endpoints.

use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

pub async fn list_conversations(
    client: &mut Client,
    limit: u32,
    query: Option<&str>,
    status: Option<&str>,
    location_id: Option<&str>,
) -> Result<Value> {
    let location_id = location_id
        .map(str::to_string)
        .or_else(|| client.location_id().map(str::to_string));

    let mut params = vec![("limit", limit.to_string())];
    if let Some(query) = query {
        params.push(("query", query.to_string()));
    }
    if let Some(status) = status {
        params.push(("status", status.to_string()));
    }
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }

    client.get("/conversations/search", &params).await
}

pub async fn get_conversation(client: &mut Client, conversation_id: &str) -> Result<Value> {
    client
        .get(&format!("/conversations/{conversation_id}"), &[])
        .await
}

pub async fn create_conversation(client: &mut Client, data: &Value) -> Result<Value> {
    client.post("/conversations/", Some(data), &[]).await
}

pub async fn update_conversation(
    client: &mut Client,
    conversation_id: &str,
    data: &Value,
) -> Result<Value> {
    client
        .put(&format!("/conversations/{conversation_id}"), Some(data), &[])
        .await
}

pub async fn delete_conversation(client: &mut Client, conversation_id: &str) -> Result<Value> {
    client
        .delete(&format!("/conversations/{conversation_id}"), &[])
        .await
}

pub async fn get_messages(
    client: &mut Client,
    conversation_id: &str,
    limit: u32,
) -> Result<Value> {
    let params = [("limit", limit.to_string())];
    client
        .get(&format!("/conversations/{conversation_id}/messages"), &params)
        .await
}
