use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::InteractionContext;
use crate::errors::CommandError;
use crate::types::InteractionResponse;

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &InteractionContext) -> Result<InteractionResponse, CommandError>;
}

#[async_trait]
impl<F> CommandHandler for F
where
    F: Fn(&InteractionContext) -> Result<InteractionResponse, CommandError> + Send + Sync,
{
    async fn handle(&self, ctx: &InteractionContext) -> Result<InteractionResponse, CommandError> {
        self(ctx)
    }
}

/// Command name to handler. Filled in before the listener starts and shared
/// behind an `Arc` afterwards, so it is never written to while serving.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: CommandHandler + 'static>(&mut self, name: impl Into<String>, handler: H) {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
