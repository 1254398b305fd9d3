//! Build-finished hooks.
//!
//! The bundler reports a finished build once; every registered plugin sees
//! that result exactly once, in registration order.

use crate::types::{BuildResult, Result, SnagmapError};
use async_trait::async_trait;
use tracing::{debug, error};

/// A plugin that runs after the build has written all of its output.
#[async_trait]
pub trait BuildPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    async fn on_end(&self, result: &BuildResult) -> Result<()>;
}

/// A plugin whose hook returned an error.
#[derive(Debug)]
pub struct HookFailure {
    pub plugin: &'static str,
    pub error: SnagmapError,
}

/// Plugins waiting for the build to finish.
#[derive(Default)]
pub struct BuildHooks {
    plugins: Vec<Box<dyn BuildPlugin>>,
}

impl BuildHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, plugin: impl BuildPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Deliver the finished build to every plugin.
    ///
    /// A failing plugin does not stop the ones after it. Consumes the
    /// registry so a build cannot be delivered twice.
    pub async fn finish(self, result: &BuildResult) -> Vec<HookFailure> {
        let mut failures = Vec::new();

        for plugin in self.plugins {
            debug!("Running build hook {}", plugin.name());
            if let Err(e) = plugin.on_end(result).await {
                error!("[{}] {}", plugin.name(), e);
                failures.push(HookFailure {
                    plugin: plugin.name(),
                    error: e,
                });
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingPlugin {
        name: &'static str,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl BuildPlugin for CountingPlugin {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn on_end(&self, _result: &BuildResult) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SnagmapError::ConfigError("\"apiKey\" is required".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_every_plugin_runs_once() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let hooks = BuildHooks::new()
            .register(CountingPlugin {
                name: "first",
                calls: first.clone(),
                fail: true,
            })
            .register(CountingPlugin {
                name: "second",
                calls: second.clone(),
                fail: false,
            });
        assert_eq!(hooks.len(), 2);

        let failures = hooks.finish(&BuildResult::default()).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].plugin, "first");
        assert!(matches!(failures[0].error, SnagmapError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_no_plugins() {
        let hooks = BuildHooks::new();
        assert!(hooks.is_empty());
        assert!(hooks.finish(&BuildResult::default()).await.is_empty());
    }
}
