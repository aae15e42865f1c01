//! Ticker-to-CIK directory bootstrap.
//!
//! EDGAR keys everything by CIK, not ticker. The public company directory is
//! fetched once per client and shared by all lookups.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::EdgarError;

#[derive(Deserialize)]
struct DirectoryRecord {
    cik_str: u64,
    ticker: String,
    title: String,
}

impl super::EdgarClient {
    /// Resolve a ticker symbol to its `(cik, company title)` pair.
    pub(crate) async fn resolve_cik(&self, symbol: &str) -> Result<(u64, String), EdgarError> {
        self.ensure_directory().await?;

        let ticker = symbol.trim().to_uppercase();
        let guard = self.cik_directory.read().await;
        guard
            .by_ticker
            .as_ref()
            .and_then(|m| m.get(&ticker).cloned())
            .ok_or_else(|| EdgarError::UnknownSymbol(symbol.to_string()))
    }

    async fn ensure_directory(&self) -> Result<(), EdgarError> {
        // Fast path: check with a read lock.
        if self.cik_directory.read().await.by_ticker.is_some() {
            return Ok(());
        }

        // Slow path: take the dedicated fetch lock so only one task proceeds.
        let _guard = self.cik_fetch_lock.lock().await;

        // Double-check: another task may have loaded the directory meanwhile.
        if self.cik_directory.read().await.by_ticker.is_some() {
            return Ok(());
        }

        let req = self.http.get(self.ticker_directory.clone());
        let resp = self.send_with_retry(req, None).await?;
        let body = resp.text().await?;

        // The directory is an object keyed by row index.
        let records: HashMap<String, DirectoryRecord> = serde_json::from_str(&body)?;

        let mut by_ticker = HashMap::with_capacity(records.len());
        for record in records.into_values() {
            by_ticker.insert(
                record.ticker.to_uppercase(),
                (record.cik_str, record.title),
            );
        }
        tracing::debug!(companies = by_ticker.len(), "loaded EDGAR company directory");

        self.cik_directory.write().await.by_ticker = Some(by_ticker);
        Ok(())
    }
}
