use serde::{Deserialize, Serialize};

/// Classification tag controlling which identities may view a resource.
///
/// Serialized exactly as `"Public"` / `"Confidential"`, the wire contract
/// of the `securityLevel` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sensitivity {
    Public,
    Confidential,
}

/// A single entry of the resource catalog.
///
/// The catalog is a fixed, ordered sequence of these, read-only for the
/// process lifetime. IDs are unique within the catalog (enforced at load).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    #[serde(rename = "securityLevel")]
    pub sensitivity: Sensitivity,
}

/// The outcome of an access decision: the visible subsequence of the catalog
/// (catalog order preserved) and its length. Derived per request, never
/// stored; `count` is always recomputed from `visible`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub visible: Vec<Resource>,
    pub count: usize,
}

// ---------- API response types ----------

/// Body of `GET /api/documents`. The field names (`documents`,
/// `documentCount`) are the externally observed contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsResponse {
    pub documents: Vec<Resource>,
    pub message: String,
    pub document_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_wire_shape() {
        let resource = Resource {
            id: 3,
            name: "Salary Data.xlsx".into(),
            sensitivity: Sensitivity::Confidential,
        };
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            value,
            json!({ "id": 3, "name": "Salary Data.xlsx", "securityLevel": "Confidential" })
        );
    }

    #[test]
    fn test_resource_parses_from_catalog_entry() {
        let resource: Resource = serde_json::from_value(json!({
            "id": 1,
            "name": "Q4 Report.pdf",
            "securityLevel": "Public",
        }))
        .unwrap();
        assert_eq!(resource.sensitivity, Sensitivity::Public);
    }

    #[test]
    fn test_documents_response_field_names() {
        let response = DocumentsResponse {
            documents: vec![],
            message: "Document list retrieved successfully".into(),
            document_count: 0,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("documents").is_some());
        assert!(value.get("documentCount").is_some());
        assert!(value.get("message").is_some());
        assert!(value.get("document_count").is_none());
    }
}
