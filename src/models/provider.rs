use serde::{Deserialize, Serialize};

/// Bookable doctor profile. `id` equals the doctor account's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
}
