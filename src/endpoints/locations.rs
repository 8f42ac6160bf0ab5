//! Location (sub-account) endpoints.

use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

pub async fn list_locations(
    client: &mut Client,
    limit: u32,
    skip: u32,
    email: Option<&str>,
    company_id: Option<&str>,
) -> Result<Value> {
    let mut params = vec![("limit", limit.to_string()), ("skip", skip.to_string())];
    if let Some(email) = email {
        params.push(("email", email.to_string()));
    }
    if let Some(company_id) = company_id {
        params.push(("companyId", company_id.to_string()));
    }

    client.get("/locations/search", &params).await
}

pub async fn get_location(client: &mut Client, location_id: &str) -> Result<Value> {
    client.get(&format!("/locations/{location_id}"), &[]).await
}

pub async fn create_location(client: &mut Client, data: &Value) -> Result<Value> {
    client.post("/locations/", Some(data), &[]).await
}

pub async fn update_location(
    client: &mut Client,
    location_id: &str,
    data: &Value,
) -> Result<Value> {
    client
        .put(&format!("/locations/{location_id}"), Some(data), &[])
        .await
}

pub async fn delete_location(
    client: &mut Client,
    location_id: &str,
    delete_twilio_account: bool,
) -> Result<Value> {
    let params = [("deleteTwilioAccount", delete_twilio_account.to_string())];
    client
        .delete(&format!("/locations/{location_id}"), &params)
        .await
}
