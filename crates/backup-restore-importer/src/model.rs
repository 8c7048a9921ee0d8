use serde::{Deserialize, Serialize};

/// Body of the problem endpoint.
#[derive(Debug, Deserialize)]
pub struct ProblemDataset {
    pub dump: String,
}

/// Body posted to the solve endpoint.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Solution {
    pub alive_ssns: Vec<String>,
}
