use serde::{Deserialize, Deserializer};

pub const UNKNOWN: &str = "Unknown";
pub const NO_ID: &str = "N/A";

/// Anything that can be listed per Cortex instance.
pub trait CortexModule {
    fn name(&self) -> Option<&str>;
    fn cortex_id(&self) -> Option<&str>;

    fn display_name(&self) -> &str {
        self.name().unwrap_or(UNKNOWN)
    }

    fn group_key(&self) -> &str {
        self.cortex_id().unwrap_or(UNKNOWN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cortex_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data_type_list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cortex_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Treat an explicit `null` list like a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalyzerRecord {
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or(NO_ID)
    }
}

impl ResponderRecord {
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or(NO_ID)
    }

    /// Description, if present and non-empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

impl CortexModule for AnalyzerRecord {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn cortex_id(&self) -> Option<&str> {
        self.cortex_id.as_deref()
    }
}

impl CortexModule for ResponderRecord {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn cortex_id(&self) -> Option<&str> {
        self.cortex_id.as_deref()
    }
}
