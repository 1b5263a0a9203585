use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub profile_text: String,
}

/// Envelope returned by both analyze routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<AnalysisData>,
}

impl AnalyzeResponse {
    /// Node list of a successful response, `None` when any level is missing.
    pub fn top_nodes(&self) -> Option<&[TopNode]> {
        self.data
            .as_ref()
            .and_then(|d| d.summary.as_ref())
            .and_then(|s| s.top_time_consuming_nodes.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    #[serde(default)]
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_state: Option<String>,
    #[serde(default)]
    pub top_time_consuming_nodes: Option<Vec<TopNode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopNode {
    pub rank: i64,
    pub operator_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_node_id: Option<i32>,
    pub total_time: TotalTime,
    pub time_percentage: f64,
    pub is_most_consuming: bool,
    pub is_second_most_consuming: bool,
}

/// The service reports durations as preformatted strings, but plain numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalTime {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for TotalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalTime::Text(s) => f.write_str(s),
            TotalTime::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
