//! Custom object schema and record endpoints.

use crate::client::Client;
use crate::error::Result;
use serde_json::{Value, json};

pub async fn list_schemas(client: &mut Client, location_id: Option<&str>) -> Result<Value> {
    let location_id = location_id
        .map(str::to_string)
        .or_else(|| client.location_id().map(str::to_string));

    let mut params = Vec::new();
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }

    client.get("/objects/", &params).await
}

pub async fn get_schema(
    client: &mut Client,
    key: &str,
    location_id: Option<&str>,
) -> Result<Value> {
    let location_id = location_id
        .map(str::to_string)
        .or_else(|| client.location_id().map(str::to_string));

    let mut params = Vec::new();
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }

    client.get(&format!("/objects/{key}"), &params).await
}

/// Record search is a POST with the filters in the body, unlike the other
/// list endpoints.
pub async fn list_records(
    client: &mut Client,
    schema_key: &str,
    limit: u32,
    query: Option<&str>,
    location_id: Option<&str>,
) -> Result<Value> {
    let location_id = location_id
        .map(str::to_string)
        .or_else(|| client.location_id().map(str::to_string));

    let mut body = json!({
        "pageLimit": limit,
        "page": 1,
    });
    if let Some(query) = query {
        body["query"] = json!(query);
    }
    if let Some(location_id) = location_id {
        body["locationId"] = json!(location_id);
    }

    client
        .post(&format!("/objects/{schema_key}/records/search"), Some(&body), &[])
        .await
}

pub async fn get_record(client: &mut Client, schema_key: &str, record_id: &str) -> Result<Value> {
    client
        .get(&format!("/objects/{schema_key}/records/{record_id}"), &[])
        .await
}

pub async fn create_record(client: &mut Client, schema_key: &str, data: &Value) -> Result<Value> {
    client
        .post(&format!("/objects/{schema_key}/records"), Some(data), &[])
        .await
}

pub async fn update_record(
    client: &mut Client,
    schema_key: &str,
    record_id: &str,
    data: &Value,
) -> Result<Value> {
    client
        .put(
            &format!("/objects/{schema_key}/records/{record_id}"),
            Some(data),
            &[],
        )
        .await
}

pub async fn delete_record(
    client: &mut Client,
    schema_key: &str,
    record_id: &str,
) -> Result<Value> {
    client
        .delete(&format!("/objects/{schema_key}/records/{record_id}"), &[])
        .await
}
