//! Async runtime selection
//!
//! The runtime flavor is chosen once per process, before any notebook is
//! executed, and every executor call runs on it.

use crate::config::{RuntimeFlavor, RuntimeSettings};
use crate::error::{ErrorCode, NbpipeError, Result};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuntimePolicy {
    /// Everything on the calling thread
    #[default]
    CurrentThread,
    MultiThread { worker_threads: Option<usize> },
}

impl RuntimePolicy {
    pub fn from_settings(settings: &RuntimeSettings) -> Self {
        match settings.flavor {
            RuntimeFlavor::CurrentThread => RuntimePolicy::CurrentThread,
            RuntimeFlavor::MultiThread => RuntimePolicy::MultiThread {
                worker_threads: settings.worker_threads,
            },
        }
    }

    /// Build the runtime; I/O and timers are always enabled since the
    /// executor spawns processes and enforces timeouts
    pub fn build(self) -> Result<Runtime> {
        debug!("Building async runtime: {:?}", self);

        let mut builder = match self {
            RuntimePolicy::CurrentThread => Builder::new_current_thread(),
            RuntimePolicy::MultiThread { worker_threads } => {
                let mut builder = Builder::new_multi_thread();
                if let Some(threads) = worker_threads {
                    builder.worker_threads(threads);
                }
                builder
            }
        };

        builder
            .enable_all()
            .thread_name("nbpipe-worker")
            .build()
            .map_err(|e| {
                NbpipeError::execution_with_code(
                    ErrorCode::EXEC_RUNTIME_FAILED,
                    format!("could not start async runtime: {}", e),
                    None,
                )
                .with_source(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::RecordingExecutor;
    use crate::pipeline::{builtin_steps, PipelineRunner};
    use std::sync::Arc;

    #[test]
    fn test_from_settings() {
        assert_eq!(
            RuntimePolicy::from_settings(&RuntimeSettings::default()),
            RuntimePolicy::CurrentThread
        );
        let settings = RuntimeSettings {
            flavor: RuntimeFlavor::MultiThread,
            worker_threads: Some(2),
        };
        assert_eq!(
            RuntimePolicy::from_settings(&settings),
            RuntimePolicy::MultiThread {
                worker_threads: Some(2)
            }
        );
    }

    #[test]
    fn test_executor_calls_run_on_configured_runtime() {
        for (policy, expected) in [
            (RuntimePolicy::CurrentThread, RuntimeFlavor::CurrentThread),
            (
                RuntimePolicy::MultiThread {
                    worker_threads: Some(1),
                },
                RuntimeFlavor::MultiThread,
            ),
        ] {
            let runtime = policy.build().unwrap();
            let executor = RecordingExecutor::new();
            let runner = PipelineRunner::new(Arc::new(executor.clone()));

            runtime
                .block_on(runner.run(&builtin_steps()))
                .into_result()
                .unwrap();

            let calls = executor.calls();
            assert_eq!(calls.len(), 4);
            assert!(calls.iter().all(|c| c.runtime_flavor == Some(expected)));
        }
    }

    #[test]
    fn test_no_runtime_outside_block_on() {
        let _runtime = RuntimePolicy::default().build().unwrap();
        assert!(tokio::runtime::Handle::try_current().is_err());
    }
}
