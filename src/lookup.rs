use crate::{
    client::HttpTransport,
    error::LookupError,
    models::{AnalyzerRecord, ResponderRecord},
    reporter::Reporter,
};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const ANALYZER_PATH: &str = "/connector/cortex/analyzer";
const RESPONDER_PATH: &str = "/connector/cortex/responder";

/// Platform objects a responder can be run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Case,
    Alert,
    Observable,
    /// Legacy name for an observable.
    CaseArtifact,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        EntityType::Case,
        EntityType::Alert,
        EntityType::Observable,
        EntityType::CaseArtifact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Case => "case",
            EntityType::Alert => "alert",
            EntityType::Observable => "observable",
            EntityType::CaseArtifact => "case_artifact",
        }
    }

    /// Endpoint paths to try, most preferred first.
    ///
    /// Observables were called case artifacts by older API versions, so both
    /// names are tried for either spelling, each with and without `/v1`.
    pub fn candidate_paths(&self, entity_id: &str) -> Vec<String> {
        let kinds = match self {
            EntityType::Observable | EntityType::CaseArtifact => vec!["case_artifact", "observable"],
            other => vec![other.as_str()],
        };

        kinds
            .into_iter()
            .flat_map(|kind| {
                let path = format!("{}/{}/{}", RESPONDER_PATH, kind, entity_id);
                [path.clone(), format!("/v1{}", path)]
            })
            .collect()
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(EntityType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Entity type must be one of {valid}", valid = EntityType::valid_names())]
pub struct InvalidEntityType(pub String);

impl FromStr for EntityType {
    type Err = InvalidEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| InvalidEntityType(s.to_string()))
    }
}

/// Fetch every analyzer known to the connected Cortex instances.
pub async fn fetch_analyzers<T>(transport: &T, api_base: &str) -> Result<Vec<AnalyzerRecord>, LookupError>
where
    T: HttpTransport + ?Sized,
{
    let url = format!("{}{}", api_base, ANALYZER_PATH);
    transport.get(&url).await?.into_records()
}

/// Print all analyzers, or the reason they could not be listed.
pub async fn list_all_analyzers<T, W>(transport: &T, api_base: &str, out: &mut W) -> io::Result<()>
where
    T: HttpTransport + ?Sized,
    W: Write,
{
    match fetch_analyzers(transport, api_base).await {
        Ok(analyzers) => {
            info!("retrieved {} analyzers", analyzers.len());
            Reporter::new(out).print_analyzers(analyzers)
        }
        Err(e @ LookupError::Http { .. }) => writeln!(out, "Error getting analyzers: {}", e),
        Err(e) => writeln!(out, "Error connecting to TheHive: {}", e),
    }
}

/// Ask each candidate endpoint in turn for the responders applicable to an
/// entity, returning the records from the first one that answers 200.
///
/// Every failure is reported on `out`; an unknown entity type or a lookup that
/// no endpoint satisfies yields an empty list.
pub async fn list_available_responders<T, W>(
    transport: &T,
    api_base: &str,
    entity_type: &str,
    entity_id: &str,
    out: &mut W,
) -> io::Result<Vec<ResponderRecord>>
where
    T: HttpTransport + ?Sized,
    W: Write,
{
    let kind = match entity_type.parse::<EntityType>() {
        Ok(kind) => kind,
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            return Ok(Vec::new());
        }
    };

    for endpoint in kind.candidate_paths(entity_id) {
        writeln!(out, "Trying endpoint: {}", endpoint)?;
        let url = format!("{}{}", api_base, endpoint);

        let result = transport
            .get(&url)
            .await
            .and_then(|reply| reply.into_records::<ResponderRecord>());

        match result {
            Ok(responders) => {
                writeln!(
                    out,
                    "Successfully retrieved {} responders from endpoint: {}",
                    responders.len(),
                    endpoint
                )?;
                return Ok(responders);
            }
            Err(e @ LookupError::Http { .. }) => {
                writeln!(out, "Endpoint {} returned: {}", endpoint, e)?;
            }
            Err(e) => {
                debug!("{} failed: {:?}", endpoint, e);
                writeln!(out, "Error trying endpoint {}: {}", endpoint, e)?;
            }
        }
    }

    writeln!(
        out,
        "Error: Could not get responders for {} {} from any endpoint",
        entity_type, entity_id
    )?;
    Ok(Vec::new())
}
