//! Workflow endpoints.

use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

pub async fn list_workflows(client: &mut Client, location_id: Option<&str>) -> Result<Value> {
    let location_id = location_id
        .map(str::to_string)
        .or_else(|| client.location_id().map(str::to_string));

    let mut params = Vec::new();
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }

    client.get("/workflows/", &params).await
}
