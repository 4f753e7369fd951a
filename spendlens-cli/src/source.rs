//! Where the expense CSV comes from: a local file or an http(s) URL.
//!
//! Loading is the only async step; everything after it is plain function calls.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendlens_core::ExpenseRecord;
use spendlens_ingest::{load_expenses, load_expenses_from_str};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::Path(PathBuf::from(s))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Source::Path(p) => p.display().to_string(),
            Source::Url(u) => u.clone(),
        }
    }
}

/// Fetch and normalize the dataset.
pub async fn load(source: &Source, today: NaiveDate, timeout: Duration) -> Result<Vec<ExpenseRecord>> {
    match source {
        Source::Path(path) => {
            if !path.exists() {
                anyhow::bail!("CSV not found: {} (pass --source <path|url>)", path.display());
            }
            load_expenses(path, today).with_context(|| format!("loading {}", path.display()))
        }
        Source::Url(url) => {
            let text = fetch_text(url, timeout).await?;
            load_expenses_from_str(&text, today).with_context(|| format!("parsing {url}"))
        }
    }
}

async fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;

    tracing::debug!(url, ?timeout, "fetching expense CSV");
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url}"))?;

    resp.text().await.with_context(|| format!("reading body of {url}"))
}
