use std::sync::Arc;

use crate::capture::confirm::{OverwriteConfirm, StdinConfirm};
use crate::notification::{DesktopNotifier, Notifier};
use crate::process::{CommandRunner, ShellRunner};

/// Bundle of collaborators used by the capture pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct CaptureDependencies {
    pub runner: Arc<dyn CommandRunner>,
    pub confirm: Arc<dyn OverwriteConfirm>,
    pub notifier: Arc<dyn Notifier>,
}

impl Default for CaptureDependencies {
    fn default() -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner);
        Self {
            notifier: Arc::new(DesktopNotifier::new(Arc::clone(&runner))),
            confirm: Arc::new(StdinConfirm),
            runner,
        }
    }
}
