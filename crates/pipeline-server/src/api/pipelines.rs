//! Pipeline analysis endpoint
//!
//! Accepts the editor's node and edge lists and reports counts plus
//! whether the pipeline is a DAG.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use pipeline_dag::{GraphReport, PipelineGraph};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::errors::ApiError;
use crate::server::PipelineServer;

/// Response body for `POST /pipelines/parse`
///
/// The edge count is serialized as `num_edge`, which existing clients
/// depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResponse {
    /// Number of submitted nodes
    pub num_nodes: usize,
    /// Number of submitted edges
    pub num_edge: usize,
    /// Whether the pipeline has no cycle
    pub is_dag: bool,
}

impl From<GraphReport> for PipelineResponse {
    fn from(report: GraphReport) -> Self {
        Self {
            num_nodes: report.num_nodes,
            num_edge: report.num_edges,
            is_dag: report.is_dag,
        }
    }
}

/// Parse a pipeline and return analysis results
pub async fn parse_pipeline(
    State(server): State<Arc<PipelineServer>>,
    payload: Result<Json<PipelineGraph>, JsonRejection>,
) -> Result<Json<PipelineResponse>, ApiError> {
    let Json(graph) = payload?;

    let report = server.validator().validate(&graph);
    info!(
        num_nodes = report.num_nodes,
        num_edges = report.num_edges,
        is_dag = report.is_dag,
        "Parsed pipeline"
    );

    Ok(Json(report.into()))
}
