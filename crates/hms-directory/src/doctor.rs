use serde::{Deserialize, Serialize};

/// A doctor record as served by the hospital backend.
///
/// The wire format uses camelCase keys; fields the backend may omit are
/// optional here rather than defaulted, so "no specialization" stays
/// distinguishable from an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub qualification: Option<String>,
}

/// Short blurb for a department as shown next to the filter control.
pub fn department_description(department: &str) -> Option<&'static str> {
    match department {
        "Medicine" => Some("General medicine and internal medicine services"),
        "Orthopaedics" => Some("Bone, joint, and musculoskeletal system care"),
        "Cardiology" => Some("Heart and cardiovascular system treatment"),
        "Child Development / Counselling" => {
            Some("Pediatric care and child development services")
        }
        "Dermatology" => Some("Skin, hair, and nail care"),
        "Neurology" => Some("Brain and nervous system care"),
        _ => None,
    }
}
