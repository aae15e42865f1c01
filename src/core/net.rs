/// Read a successful response body as text.
///
/// Status handling lives in `send_with_retry`; by the time a response reaches
/// here it is 2xx, so the only failures left are transport-level.
pub(crate) async fn read_body(resp: reqwest::Response) -> Result<String, crate::core::EdgarError> {
    let url = resp.url().to_string();
    let text = resp.text().await?;
    tracing::trace!(url = url.as_str(), bytes = text.len(), "fetched EDGAR document");
    Ok(text)
}
