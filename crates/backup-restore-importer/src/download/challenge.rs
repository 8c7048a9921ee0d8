use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    BackupRestore,
    error::RunError,
    model::{ProblemDataset, Solution},
    progress::get_progress_bar,
};

impl BackupRestore {
    pub async fn fetch_problem(&self) -> Result<ProblemDataset, RunError> {
        info!("Getting problem dataset");
        let body = self
            .download_with_progress(&self.config.challenge.problem_url)
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Buffers the whole response body in memory. The access token is sent as a
    /// query parameter and stripped from any transport error.
    async fn download_with_progress(&self, url: &str) -> Result<Vec<u8>, RunError> {
        debug!("URL: {url}");
        let response = self
            .client
            .get(url)
            .query(&[("access_token", self.config.challenge.access_token.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        info!("Response status: {status}");
        if !status.is_success() {
            return Err(RunError::ProblemStatus(status));
        }

        let total_size = response.content_length();
        let pb = get_progress_bar(total_size)?;
        pb.set_message(format!("Downloading {url}"));

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let data = chunk.map_err(reqwest::Error::without_url)?;
            body.extend_from_slice(&data);
            pb.inc(data.len() as u64);
        }

        pb.finish_with_message(format!("Downloaded {url}"));
        Ok(body)
    }

    pub async fn submit_solution(&self, solution: &Solution) -> Result<Value, RunError> {
        let url = &self.config.challenge.solve_url;
        let payload = serde_json::to_string(solution)?;

        info!("Sending solution");
        debug!("URL: {url}");
        debug!("Content-Length: {}", payload.len());
        debug!("JSON payload: {payload}");

        let response = self
            .client
            .post(url)
            .query(&[("access_token", self.config.challenge.access_token.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .body(payload)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        debug!("Response status: {status}");
        debug!("Response headers: {:?}", response.headers());

        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;
        debug!("Response: {body}");

        if !status.is_success() {
            return Err(RunError::SolveStatus { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
