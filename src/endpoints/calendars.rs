//! Calendar and appointment endpoints.

use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

pub async fn list_calendars(
    client: &mut Client,
    location_id: Option<&str>,
    group_id: Option<&str>,
) -> Result<Value> {
    let location_id = location_id
        .map(str::to_string)
        .or_else(|| client.location_id().map(str::to_string));

    let mut params = Vec::new();
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }
    if let Some(group_id) = group_id {
        params.push(("groupId", group_id.to_string()));
    }

    client.get("/calendars/", &params).await
}

pub async fn get_calendar(client: &mut Client, calendar_id: &str) -> Result<Value> {
    client.get(&format!("/calendars/{calendar_id}"), &[]).await
}

pub async fn create_calendar(client: &mut Client, data: &Value) -> Result<Value> {
    client.post("/calendars/", Some(data), &[]).await
}

pub async fn update_calendar(
    client: &mut Client,
    calendar_id: &str,
    data: &Value,
) -> Result<Value> {
    client
        .put(&format!("/calendars/{calendar_id}"), Some(data), &[])
        .await
}

pub async fn delete_calendar(client: &mut Client, calendar_id: &str) -> Result<Value> {
    client
        .delete(&format!("/calendars/{calendar_id}"), &[])
        .await
}

/// List events in a time window. Times are epoch milliseconds.
pub async fn list_events(
    client: &mut Client,
    start_time: &str,
    end_time: &str,
    calendar_id: Option<&str>,
    group_id: Option<&str>,
    user_id: Option<&str>,
) -> Result<Value> {
    let location_id = client.location_id().map(str::to_string);

    let mut params = vec![
        ("startTime", start_time.to_string()),
        ("endTime", end_time.to_string()),
    ];
    if let Some(location_id) = location_id {
        params.push(("locationId", location_id));
    }
    if let Some(calendar_id) = calendar_id {
        params.push(("calendarId", calendar_id.to_string()));
    }
    if let Some(group_id) = group_id {
        params.push(("groupId", group_id.to_string()));
    }
    if let Some(user_id) = user_id {
        params.push(("userId", user_id.to_string()));
    }

    client.get("/calendars/events", &params).await
}

pub async fn get_event(client: &mut Client, event_id: &str) -> Result<Value> {
    client
        .get(&format!("/calendars/events/appointments/{event_id}"), &[])
        .await
}

pub async fn create_event(client: &mut Client, data: &Value) -> Result<Value> {
    client
        .post("/calendars/events/appointments", Some(data), &[])
        .await
}

pub async fn update_event(client: &mut Client, event_id: &str, data: &Value) -> Result<Value> {
    client
        .put(
            &format!("/calendars/events/appointments/{event_id}"),
            Some(data),
            &[],
        )
        .await
}

pub async fn delete_event(client: &mut Client, event_id: &str) -> Result<Value> {
    client
        .delete(&format!("/calendars/events/{event_id}"), &[])
        .await
}
