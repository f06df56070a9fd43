// Server API response types.
// Defines the response envelope and the session, connection, and environment payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every server response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    pub data: Option<T>,
}

/// Paged list payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

/// Role classification of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Local single-user install; no account menu.
    Desktop,
    Admin,
    #[default]
    #[serde(other)]
    User,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: Option<i64>,
    pub nick_name: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub role_code: Role,
}

impl LoginUser {
    pub fn display_name(&self) -> String {
        self.nick_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| match self.id {
                Some(id) => format!("user #{}", id),
                None => "anonymous".to_string(),
            })
    }
}

/// A saved database connection (data source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: i64,
    pub alias: String,
    #[serde(rename = "type")]
    pub db_type: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub environment_id: Option<i64>,
    pub gmt_modified: Option<DateTime<Utc>>,
}

/// A connection environment (e.g. release, test).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_envelope() {
        let json = r#"{
            "success": true,
            "errorCode": null,
            "errorMessage": null,
            "data": {"id": 1, "nickName": "chat2db", "admin": true, "roleCode": "ADMIN"}
        }"#;
        let response: ApiResponse<LoginUser> = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let user = response.data.unwrap();
        assert!(user.admin);
        assert_eq!(user.role_code, Role::Admin);
        assert_eq!(user.display_name(), "chat2db");
    }

    #[test]
    fn test_unknown_role_is_user() {
        let json = r#"{"id": 2, "roleCode": "AUDITOR"}"#;
        let user: LoginUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role_code, Role::User);
        assert!(!user.admin);
        assert_eq!(user.display_name(), "user #2");
    }

    #[test]
    fn test_desktop_role() {
        let json = r#"{"id": 1, "nickName": "", "admin": true, "roleCode": "DESKTOP"}"#;
        let user: LoginUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role_code, Role::Desktop);
        assert_eq!(user.display_name(), "user #1");
    }

    #[test]
    fn test_parse_connection_page() {
        let json = r#"{
            "success": true,
            "data": {
                "data": [{"id": 7, "alias": "orders", "type": "MYSQL", "host": "db", "port": "3306", "environmentId": 1}],
                "pageNo": 1,
                "pageSize": 1000,
                "total": 1
            }
        }"#;
        let response: ApiResponse<Page<Connection>> = serde_json::from_str(json).unwrap();
        let page = response.data.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].alias, "orders");
        assert_eq!(page.data[0].db_type.as_deref(), Some("MYSQL"));
        assert_eq!(page.data[0].environment_id, Some(1));
    }
}
