use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

use super::assembly_enumerator::{AssemblyEnumerator, EnumerationRequest, EnumerationResponse};
use super::loader::AssemblyLoader;
use crate::error::AssemblyLoadError;

pub const WORKER_FLAG: &str = "--worker";

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Load(#[from] AssemblyLoadError),

    #[error("assembly could not be loaded by the discovery worker: {0}")]
    NotLoadable(String),

    #[error("failed to start discovery worker '{program}': {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("discovery worker failed: {0}")]
    Worker(String),

    #[error("invalid discovery worker message: {0}")]
    Protocol(String),
}

impl HostError {
    pub fn is_not_loadable(&self) -> bool {
        match self {
            Self::Load(error) => error.is_not_loadable(),
            Self::NotLoadable(_) => true,
            _ => false,
        }
    }
}

/// Runs the assembly enumerator behind a boundary user code cannot cross.
pub trait IsolationHost: Send + Sync {
    fn enumerate(&self, request: &EnumerationRequest) -> Result<EnumerationResponse, HostError>;
}

pub struct InProcessHost {
    loader: Arc<dyn AssemblyLoader>,
}

impl InProcessHost {
    pub fn new(loader: Arc<dyn AssemblyLoader>) -> Self {
        Self { loader }
    }
}

impl IsolationHost for InProcessHost {
    fn enumerate(&self, request: &EnumerationRequest) -> Result<EnumerationResponse, HostError> {
        let enumerator = AssemblyEnumerator::new(self.loader.clone(), request.settings.clone());
        Ok(enumerator.handle(request)?)
    }
}

/// Reply written by a worker process.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum WorkerReply {
    Completed(EnumerationResponse),
    Failed { not_loadable: bool, message: String },
}

/// Spawns `program --worker` and talks JSON over its standard streams.
pub struct ProcessHost {
    program: PathBuf,
}

impl ProcessHost {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn current_exe() -> Result<Self, HostError> {
        let program = std::env::current_exe().map_err(|source| HostError::Spawn {
            program: PathBuf::from("<current executable>"),
            source,
        })?;
        Ok(Self::new(program))
    }
}

impl IsolationHost for ProcessHost {
    fn enumerate(&self, request: &EnumerationRequest) -> Result<EnumerationResponse, HostError> {
        debug!(program = %self.program.display(), assembly = %request.assembly_path.display(), "starting discovery worker");

        let mut child = Command::new(&self.program)
            .arg(WORKER_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| HostError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HostError::Worker("worker stdin unavailable".to_string()))?;
        send_request(stdin, request)?;

        let output = child
            .wait_with_output()
            .map_err(|e| HostError::Worker(format!("failed to collect output: {e}")))?;
        if !output.status.success() {
            return Err(HostError::Worker(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let reply: WorkerReply = serde_json::from_slice(&output.stdout)
            .map_err(|e| HostError::Protocol(e.to_string()))?;
        match reply {
            WorkerReply::Completed(response) => Ok(response),
            WorkerReply::Failed {
                not_loadable: true,
                message,
            } => Err(HostError::NotLoadable(message)),
            WorkerReply::Failed { message, .. } => Err(HostError::Worker(message)),
        }
    }
}

/// Writes the request and closes the stream so the worker sees end of input.
fn send_request<W: Write>(mut writer: W, request: &EnumerationRequest) -> Result<(), HostError> {
    let payload = serde_json::to_vec(request).map_err(|e| HostError::Protocol(e.to_string()))?;
    writer
        .write_all(&payload)
        .and_then(|()| writer.flush())
        .map_err(|e| HostError::Worker(format!("failed to send request: {e}")))
}

/// Worker side of [`ProcessHost`]: one request in, one reply out.
pub fn serve_worker<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    loader: Arc<dyn AssemblyLoader>,
) -> Result<(), HostError> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| HostError::Protocol(e.to_string()))?;
    let request: EnumerationRequest =
        serde_json::from_str(&input).map_err(|e| HostError::Protocol(e.to_string()))?;
    trace!(assembly = %request.assembly_path.display(), "worker received request");

    let reply = match InProcessHost::new(loader).enumerate(&request) {
        Ok(response) => WorkerReply::Completed(response),
        Err(error) => WorkerReply::Failed {
            not_loadable: error.is_not_loadable(),
            message: error.to_string(),
        },
    };
    serde_json::to_writer(writer, &reply).map_err(|e| HostError::Protocol(e.to_string()))
}
