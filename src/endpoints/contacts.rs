//! Contact endpoints, with response field filtering.
//!
//! List/get responses are trimmed to a small field set by default; `-v`
//! widens the set and `-vv` (or an explicit field list) disables trimming.

use crate::client::Client;
use crate::error::Result;
use serde_json::{Map, Value, json};

const ESSENTIAL_FIELDS: &[&str] = &["id", "email", "name", "firstName", "lastName"];
const COMMON_FIELDS: &[&str] = &[
    "id",
    "email",
    "name",
    "firstName",
    "lastName",
    "phone",
    "tags",
    "source",
    "dateAdded",
];

/// Trim contact objects to the selected fields.
///
/// Applies recursively to arrays; non-objects pass through untouched.
fn filter_fields(data: &Value, fields: Option<&str>, verbose: u8) -> Value {
    match data {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| filter_fields(item, fields, verbose))
                .collect(),
        ),
        Value::Object(map) => {
            let selected: Vec<&str> = if let Some(fields) = fields {
                fields.split(',').collect()
            } else if verbose >= 2 {
                return data.clone();
            } else if verbose == 1 {
                COMMON_FIELDS.to_vec()
            } else {
                ESSENTIAL_FIELDS.to_vec()
            };

            let mut out = Map::new();
            for key in selected {
                if let Some(value) = map.get(key) {
                    out.insert(key.to_string(), value.clone());
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

pub async fn list_contacts(
    client: &mut Client,
    limit: u32,
    query: Option<&str>,
    fields: Option<&str>,
    verbose: u8,
) -> Result<Value> {
    let mut params = vec![("limit", limit.to_string())];
    if let Some(query) = query {
        params.push(("query", query.to_string()));
    }

    let data = client.get("/contacts/", &params).await?;
    let contacts = data
        .get("contacts")
        .map_or_else(|| Value::Array(Vec::new()), Value::clone);
    let meta = data
        .get("meta")
        .map_or_else(|| Value::Object(Map::new()), Value::clone);

    Ok(json!({
        "contacts": filter_fields(&contacts, fields, verbose),
        "meta": meta,
    }))
}

pub async fn get_contact(
    client: &mut Client,
    contact_id: &str,
    fields: Option<&str>,
    verbose: u8,
) -> Result<Value> {
    let data = client.get(&format!("/contacts/{contact_id}"), &[]).await?;
    let contact = data
        .get("contact")
        .map_or_else(|| Value::Object(Map::new()), Value::clone);
    Ok(filter_fields(&contact, fields, verbose))
}

pub async fn create_contact(client: &mut Client, data: &Value) -> Result<Value> {
    client.post("/contacts/", Some(data), &[]).await
}

pub async fn update_contact(client: &mut Client, contact_id: &str, data: &Value) -> Result<Value> {
    client
        .put(&format!("/contacts/{contact_id}"), Some(data), &[])
        .await
}

pub async fn delete_contact(client: &mut Client, contact_id: &str) -> Result<Value> {
    client.delete(&format!("/contacts/{contact_id}"), &[]).await
}

/// Search contacts. The list endpoint's `query` parameter already acts as a
/// search, so this delegates to [`list_contacts`] with a wider page.
pub async fn search_contacts(
    client: &mut Client,
    query: &str,
    fields: Option<&str>,
    verbose: u8,
) -> Result<Value> {
    list_contacts(client, 100, Some(query), fields, verbose).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> Value {
        json!({
            "id": "c1",
            "email": "ada@example.com",
            "name": "Ada Lovelace",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phone": "+15551234",
            "tags": ["vip"],
            "source": "import",
            "dateAdded": "2024-01-01",
            "customField": "hidden"
        })
    }

    #[test]
    fn test_default_keeps_essential_fields() {
        let filtered = filter_fields(&contact(), None, 0);
        let map = filtered.as_object().unwrap();
        assert_eq!(map.len(), 5);
        assert!(map.contains_key("id"));
        assert!(map.contains_key("email"));
        assert!(!map.contains_key("phone"));
    }

    #[test]
    fn test_verbose_one_adds_common_fields() {
        let filtered = filter_fields(&contact(), None, 1);
        let map = filtered.as_object().unwrap();
        assert!(map.contains_key("phone"));
        assert!(map.contains_key("tags"));
        assert!(!map.contains_key("customField"));
    }

    #[test]
    fn test_verbose_two_keeps_everything() {
        let filtered = filter_fields(&contact(), None, 2);
        assert_eq!(filtered, contact());
    }

    #[test]
    fn test_explicit_fields_override_verbosity() {
        let filtered = filter_fields(&contact(), Some("id,phone"), 2);
        let map = filtered.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("id"));
        assert!(map.contains_key("phone"));
    }

    #[test]
    fn test_missing_selected_fields_are_skipped() {
        let filtered = filter_fields(&json!({"id": "c1"}), Some("id,phone"), 0);
        let map = filtered.as_object().unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_arrays_filter_recursively() {
        let data = json!([contact(), contact()]);
        let filtered = filter_fields(&data, None, 0);
        let items = filtered.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_non_objects_pass_through() {
        assert_eq!(filter_fields(&json!("plain"), None, 0), json!("plain"));
        assert_eq!(filter_fields(&Value::Null, None, 0), Value::Null);
    }
}
