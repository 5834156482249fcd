//! JSON-lines result sink.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use spgate_core::ResultSink;
use spgate_domain::{Result, SpApiError};

/// Writes every item as one JSON document per line.
pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_writer<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> std::io::Result<()>,
    {
        let mut out = self.out.lock().map_err(|_| output_error("output lock poisoned"))?;
        write(&mut *out).map_err(|e| output_error(&e.to_string()))
    }
}

fn output_error(message: &str) -> SpApiError {
    SpApiError::Parse(format!("failed to write output: {message}"))
}

#[async_trait]
impl<T, W> ResultSink<T> for JsonLinesSink<W>
where
    T: Serialize + Send + Sync,
    W: Write + Send,
{
    async fn write_batch(&self, items: &[T]) -> Result<()> {
        let mut buffer = Vec::new();
        for item in items {
            serde_json::to_writer(&mut buffer, item).map_err(|e| output_error(&e.to_string()))?;
            buffer.push(b'\n');
        }
        self.with_writer(|out| out.write_all(&buffer))
    }

    async fn finish(&self) -> Result<()> {
        self.with_writer(|out| out.flush())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use spgate_domain::Row;

    use super::*;

    #[tokio::test]
    async fn writes_one_line_per_item() {
        let sink = JsonLinesSink::new(Vec::new());
        let rows: Vec<Row> = vec![
            [("sku", "SKU-1"), ("qty", "3")].into_iter().collect(),
            [("sku", "SKU-2"), ("qty", "0")].into_iter().collect(),
        ];

        sink.write_batch(&rows[..]).await.unwrap();
        ResultSink::<Row>::finish(&sink).await.unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"sku":"SKU-1","qty":"3"}"#, r#"{"sku":"SKU-2","qty":"0"}"#]);
    }

    #[tokio::test]
    async fn empty_batch_writes_nothing() {
        let sink = JsonLinesSink::new(Vec::new());

        ResultSink::<serde_json::Value>::write_batch(&sink, &[]).await.unwrap();
        ResultSink::<serde_json::Value>::write_batch(&sink, &[json!({"ok": true})]).await.unwrap();

        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "{\"ok\":true}\n");
    }
}
