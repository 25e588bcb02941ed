use bim_core::Graph;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read graph file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("graph text ended early: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("invalid {field} '{token}' in edge {edge}")]
    InvalidToken { field: &'static str, token: String, edge: usize },

    #[error("invalid header token '{0}'")]
    InvalidHeader(String),

    #[error("edge {edge} references vertex {vertex}, graph has {n} vertices")]
    VertexOutOfRange { edge: usize, vertex: usize, n: usize },

    #[error("edge {edge} has non-finite weight {weight}")]
    NonFiniteWeight { edge: usize, weight: f64 },
}

/// Read an edge-list file: a header `n m` followed by `m` lines of
/// `source target weight`.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(&text)
}

/// Parse the edge-list text format. Any whitespace separates tokens; text
/// after the `m`-th edge is ignored.
pub fn parse_graph(text: &str) -> Result<Graph, LoadError> {
    let mut tokens = text.split_whitespace();

    let n = header_token(tokens.next(), "vertex count")?;
    let m = header_token(tokens.next(), "edge count")?;
    let mut graph = Graph::new(n);

    for edge in 0..m {
        let u = vertex_token(tokens.next(), "source", edge)?;
        let v = vertex_token(tokens.next(), "target", edge)?;
        let raw = tokens.next().ok_or(LoadError::UnexpectedEnd { expected: "weight" })?;
        let w: f64 = raw.parse().map_err(|_| LoadError::InvalidToken {
            field: "weight",
            token: raw.to_string(),
            edge,
        })?;

        for vertex in [u, v] {
            if vertex >= n {
                return Err(LoadError::VertexOutOfRange { edge, vertex, n });
            }
        }
        if !w.is_finite() {
            return Err(LoadError::NonFiniteWeight { edge, weight: w });
        }
        if w <= 0.0 {
            warn!(
                edge,
                source = u,
                target = v,
                weight = w,
                "non-positive edge weight never propagates"
            );
        }
        graph.add_edge(u, v, w);
    }

    Ok(graph)
}

fn header_token(token: Option<&str>, expected: &'static str) -> Result<usize, LoadError> {
    let token = token.ok_or(LoadError::UnexpectedEnd { expected })?;
    token.parse().map_err(|_| LoadError::InvalidHeader(token.to_string()))
}

fn vertex_token(token: Option<&str>, field: &'static str, edge: usize) -> Result<usize, LoadError> {
    let token = token.ok_or(LoadError::UnexpectedEnd { expected: field })?;
    token.parse().map_err(|_| LoadError::InvalidToken {
        field,
        token: token.to_string(),
        edge,
    })
}
