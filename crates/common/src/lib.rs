//! Shared helpers for the share-link service crates: logging bootstrap,
//! startup filesystem checks, and small response types.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_serializes_message_only() {
        let body = types::ErrorBody::new("Not Found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Not Found"}));
    }
}
