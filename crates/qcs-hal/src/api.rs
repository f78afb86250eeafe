//! QCS REST API client.
//!
//! Covers the read-only quantum processor endpoints: listing processors,
//! fetching an instruction set architecture, and fetching Quil-T
//! calibrations.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::QcsClientConfiguration;
use crate::error::{HalError, HalResult};

const PAGE_SIZE: u32 = 100;

/// One entry of the processor listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumProcessorSummary {
    /// Processor identifier, e.g. `Ankaa-3`.
    pub id: String,
}

/// A page of the processor listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuantumProcessorsResponse {
    /// Processors on this page.
    #[serde(default)]
    pub quantum_processors: Vec<QuantumProcessorSummary>,
    /// Token for the next page; absent or empty on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A processor's instruction set architecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionSetArchitecture {
    /// Processor name.
    pub name: String,
    /// Qubits and couplings.
    pub architecture: Architecture,
    /// Supported operations.
    #[serde(default)]
    pub instructions: Vec<IsaOperation>,
    /// Benchmark results.
    #[serde(default)]
    pub benchmarks: Vec<IsaOperation>,
}

/// Qubit layout of a processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Architecture {
    /// Processor family.
    #[serde(default)]
    pub family: Option<String>,
    /// Qubits.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Couplings.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// A qubit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Node {
    /// Qubit address.
    pub node_id: u64,
}

/// A coupling between qubits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// The coupled qubits.
    pub node_ids: Vec<u64>,
}

/// An operation listed in the ISA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsaOperation {
    /// Operation name, e.g. `RX` or `CZ`.
    pub name: String,
    /// Number of qubits it acts on.
    #[serde(default)]
    pub node_count: Option<u64>,
    /// Where it is available.
    #[serde(default)]
    pub sites: Vec<OperationSite>,
}

/// Qubits on which an operation is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSite {
    /// Qubit addresses.
    #[serde(default)]
    pub node_ids: Vec<u64>,
}

/// Quil-T calibration program for a processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuiltCalibrationsResponse {
    /// Calibration definitions in Quil-T.
    pub quilt: String,
    /// When the calibrations were last updated.
    #[serde(default)]
    pub settings_timestamp: Option<DateTime<Utc>>,
}

/// QCS REST API client.
pub struct QcsClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for QcsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QcsClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl QcsClient {
    /// Create a client from a resolved configuration.
    pub fn from_configuration(config: &QcsClientConfiguration) -> HalResult<Self> {
        Self::with_base_url(config.api_url(), config.access_token().map(str::to_string))
    }

    /// Create a client for an explicit endpoint.
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> HalResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str, query: &[(&str, String)]) -> HalResult<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("GET {}", url);

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> HalResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(HalError::AuthenticationFailed(message))
            }
            _ => Err(HalError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Public API methods
    // -----------------------------------------------------------------------

    /// List every quantum processor, following pagination.
    #[instrument(skip(self))]
    pub async fn list_quantum_processors(&self) -> HalResult<Vec<QuantumProcessorSummary>> {
        let mut processors = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }
            let page: ListQuantumProcessorsResponse = self.get("v1/quantumProcessors", &query).await?;
            processors.extend(page.quantum_processors);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        debug!("Listed {} quantum processors", processors.len());
        Ok(processors)
    }

    /// Fetch the instruction set architecture of a processor.
    #[instrument(skip(self))]
    pub async fn get_instruction_set_architecture(
        &self,
        quantum_processor_id: &str,
    ) -> HalResult<InstructionSetArchitecture> {
        self.get(
            &format!("v1/quantumProcessors/{quantum_processor_id}/instructionSetArchitecture"),
            &[],
        )
        .await
    }

    /// Fetch the Quil-T calibrations of a processor.
    #[instrument(skip(self))]
    pub async fn get_quilt_calibrations(
        &self,
        quantum_processor_id: &str,
    ) -> HalResult<GetQuiltCalibrationsResponse> {
        self.get(
            &format!("v1/quantumProcessors/{quantum_processor_id}/quiltCalibrations"),
            &[],
        )
        .await
    }
}
