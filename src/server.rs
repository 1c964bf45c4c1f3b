//! TCP control endpoint for on-demand training.
//!
//! The endpoint accepts a single-line request of comma-separated `key=value`
//! pairs:
//!
//! ```text
//! req=true,rate=0.1,hiddensNodes=50
//! ```
//!
//! `req=true` (the default) blocks the caller until training completes;
//! `req=false` acknowledges immediately and trains in the background. At
//! most one training job runs per process: a request arriving while a job
//! is in flight is answered with `Ignored` rather than queued. There is no
//! cancellation; once started, a run goes to completion.
//!
//! Wire responses are kept byte-compatible with the original protocol:
//! `Ok`, `Failer` and `Ignored`.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::corpus::{CorpusContext, dataset};
use crate::error::{LorikeetError, Result};
use crate::network::trainer::Trainer;
use crate::training::{self, TrainingConfig};

/// Default control port.
pub const DEFAULT_PORT: u16 = 8081;

/// Response for a completed (or acknowledged background) job.
pub const RESPONSE_OK: &str = "Ok";
/// Response for a failed synchronous job.
pub const RESPONSE_FAILED: &str = "Failer";
/// Response for a request rejected because a job is already running.
pub const RESPONSE_IGNORED: &str = "Ignored";

const DEFAULT_RATE: f64 = 0.1;
const DEFAULT_HIDDEN_NODES: usize = 50;

/// A parsed control request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainRequest {
    /// Whether the caller blocks until the job completes.
    pub synchronous: bool,
    /// Learning rate for the run.
    pub rate: f64,
    /// Hidden layer width for the run.
    pub hidden_nodes: usize,
}

impl Default for TrainRequest {
    fn default() -> Self {
        TrainRequest {
            synchronous: true,
            rate: DEFAULT_RATE,
            hidden_nodes: DEFAULT_HIDDEN_NODES,
        }
    }
}

/// Parse a `key=value` request line; unknown keys and unparseable values
/// fall back to their defaults.
pub fn parse_request(raw: &str) -> TrainRequest {
    let mut request = TrainRequest::default();

    for param in raw.split(',') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let value = value.trim();

        match key {
            "req" => request.synchronous = value.parse().unwrap_or(true),
            "rate" => request.rate = value.parse().unwrap_or(DEFAULT_RATE),
            "hiddensNodes" => {
                request.hidden_nodes = value.parse().unwrap_or(DEFAULT_HIDDEN_NODES);
            }
            _ => {}
        }
    }

    request
}

/// Shared single-job admission state.
#[derive(Clone, Debug, Default)]
struct BusyFlag(Arc<Mutex<bool>>);

impl BusyFlag {
    /// Claim the training slot; `false` when a job is already running.
    fn try_claim(&self) -> bool {
        let mut busy = self.0.lock();
        if *busy {
            return false;
        }
        *busy = true;
        true
    }

    /// Release the training slot.
    fn release(&self) {
        *self.0.lock() = false;
    }
}

/// The control server for one data directory and locale.
#[derive(Clone, Debug)]
pub struct ControlServer {
    data_root: PathBuf,
    locale: String,
    busy: BusyFlag,
}

impl ControlServer {
    /// Create a control server over a data directory.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(data_root: P, locale: S) -> Self {
        ControlServer {
            data_root: data_root.into(),
            locale: locale.into(),
            busy: BusyFlag::default(),
        }
    }

    /// Bind and serve until the process exits.
    pub async fn run(self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| LorikeetError::server(format!("cannot bind {addr}: {e}")))?;

        log::info!("control server listening on {addr}");
        self.serve(listener).await
    }

    /// Serve connections from an already-bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, peer) = listener
                .accept()
                .await
                .map_err(|e| LorikeetError::server(format!("accept failed: {e}")))?;

            log::debug!("control connection from {peer}");

            let server = self.clone();
            tokio::spawn(async move {
                if let Err(e) = server.handle(stream).await {
                    log::error!("control connection error: {e}");
                }
            });
        }
    }

    async fn handle(&self, mut stream: TcpStream) -> Result<()> {
        let mut buffer = [0u8; 1024];
        let n = stream
            .read(&mut buffer)
            .await
            .map_err(|e| LorikeetError::server(format!("read failed: {e}")))?;

        let raw = String::from_utf8_lossy(&buffer[..n]);
        let request = parse_request(&raw);
        log::info!(
            "training request: synchronous={}, rate={}, hidden_nodes={}",
            request.synchronous,
            request.rate,
            request.hidden_nodes
        );

        if !self.busy.try_claim() {
            log::warn!("training already in flight; ignoring request");
            stream.write_all(RESPONSE_IGNORED.as_bytes()).await?;
            return Ok(());
        }

        if request.synchronous {
            let outcome = self.run_job(request).await;
            self.busy.release();

            let response = match outcome {
                Ok(()) => RESPONSE_OK,
                Err(e) => {
                    log::error!("training failed: {e}");
                    RESPONSE_FAILED
                }
            };
            stream.write_all(response.as_bytes()).await?;
        } else {
            stream.write_all(RESPONSE_OK.as_bytes()).await?;

            let server = self.clone();
            tokio::spawn(async move {
                match server.run_job(request).await {
                    Ok(()) => log::info!("background training succeeded"),
                    Err(e) => log::error!("background training failed: {e}"),
                }
                server.busy.release();
            });
        }

        Ok(())
    }

    /// Run one training job on a blocking worker thread.
    async fn run_job(&self, request: TrainRequest) -> Result<()> {
        let data_root = self.data_root.clone();
        let locale = self.locale.clone();

        let job = tokio::task::spawn_blocking(move || {
            let context = CorpusContext::from_data_dir(&data_root, &locale)?;
            let config = TrainingConfig {
                locale: locale.clone(),
                rate: request.rate,
                hidden_width: request.hidden_nodes,
                iterations: Trainer::DEFAULT_ITERATIONS,
            };
            let path = dataset::snapshot_path(&data_root, &locale);

            training::train_and_save(&context, &config, &path).map(|_| ())
        });

        job.await
            .map_err(|e| LorikeetError::server(format!("training task panicked: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_full() {
        let request = parse_request("req=false,rate=0.5,hiddensNodes=32");
        assert_eq!(
            request,
            TrainRequest {
                synchronous: false,
                rate: 0.5,
                hidden_nodes: 32,
            }
        );
    }

    #[test]
    fn test_parse_request_defaults() {
        assert_eq!(parse_request(""), TrainRequest::default());
        assert_eq!(parse_request("nonsense"), TrainRequest::default());
        assert_eq!(parse_request("other=1"), TrainRequest::default());
    }

    #[test]
    fn test_parse_request_invalid_values_fall_back() {
        let request = parse_request("req=maybe,rate=fast,hiddensNodes=many");
        assert_eq!(request, TrainRequest::default());
    }

    #[test]
    fn test_parse_request_whitespace() {
        let request = parse_request(" req = false , rate = 0.2 ");
        assert!(!request.synchronous);
        assert_eq!(request.rate, 0.2);
    }

    #[test]
    fn test_busy_flag_admission() {
        let busy = BusyFlag::default();

        assert!(busy.try_claim());
        assert!(!busy.try_claim());

        busy.release();
        assert!(busy.try_claim());
    }

    #[tokio::test]
    async fn test_control_round_trip() {
        use std::fs;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("locales").join("en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("intents.json"),
            r#"[
                {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hello!"], "context": ""},
                {"tag": "farewell", "patterns": ["bye", "see you"], "responses": ["Bye!"], "context": ""}
            ]"#,
        )
        .unwrap();
        fs::write(dir.join("stopwords.txt"), "the\nand\nof\n").unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = ControlServer::new(tmp.path(), "en");
        tokio::spawn(server.serve(listener));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"req=true,rate=0.1,hiddensNodes=8")
            .await
            .unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        assert_eq!(response, RESPONSE_OK.as_bytes());

        let snapshot = tmp.path().join("locales").join("en").join("training.json");
        assert!(snapshot.exists());
    }
}
