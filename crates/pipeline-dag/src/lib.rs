//! # Pipeline DAG
//!
//! Graph model and acyclicity check for pipelines submitted by the editor.
//! A pipeline is a list of nodes and a list of directed edges; this crate
//! reports how many of each were submitted and whether the edges between
//! known nodes form a directed acyclic graph.
//!
//! ## Example
//!
//! ```
//! use pipeline_dag::{analyze, Edge, Node, PipelineGraph};
//!
//! let graph = PipelineGraph::new(
//!     vec![Node::new("input"), Node::new("llm"), Node::new("output")],
//!     vec![Edge::new("input", "llm"), Edge::new("llm", "output")],
//! );
//!
//! let report = analyze(&graph);
//! assert_eq!(report.num_nodes, 3);
//! assert_eq!(report.num_edges, 2);
//! assert!(report.is_dag);
//! ```

#![forbid(unsafe_code)]

mod types;
mod validator;

pub use types::{Edge, GraphReport, Node, NodeId, PipelineGraph};
pub use validator::{analyze, is_dag, DagValidator};
