//! Opportunity and pipeline endpoints.

use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

pub async fn list_opportunities(
    client: &mut Client,
    limit: u32,
    query: Option<&str>,
    pipeline_id: Option<&str>,
    status: Option<&str>,
) -> Result<Value> {
    let location_id = client.location_id().map(str::to_string);

    let mut params = vec![("limit", limit.to_string())];
    if let Some(query) = query {
        params.push(("q", query.to_string()));
    }
    if let Some(pipeline_id) = pipeline_id {
        params.push(("pipeline_id", pipeline_id.to_string()));
    }
    if let Some(status) = status {
        params.push(("status", status.to_string()));
    }
    if let Some(location_id) = location_id {
        params.push(("location_id", location_id));
    }

    client.get("/opportunities/search", &params).await
}

pub async fn get_opportunity(client: &mut Client, opportunity_id: &str) -> Result<Value> {
    client
        .get(&format!("/opportunities/{opportunity_id}"), &[])
        .await
}

pub async fn create_opportunity(client: &mut Client, data: &Value) -> Result<Value> {
    client.post("/opportunities/", Some(data), &[]).await
}

pub async fn update_opportunity(
    client: &mut Client,
    opportunity_id: &str,
    data: &Value,
) -> Result<Value> {
    client
        .put(&format!("/opportunities/{opportunity_id}"), Some(data), &[])
        .await
}

pub async fn delete_opportunity(client: &mut Client, opportunity_id: &str) -> Result<Value> {
    client
        .delete(&format!("/opportunities/{opportunity_id}"), &[])
        .await
}

pub async fn list_pipelines(client: &mut Client) -> Result<Value> {
    let location_id = client.location_id().map(str::to_string);

    let mut params = Vec::new();
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }

    client.get("/opportunities/pipelines", &params).await
}
