use futures::future::BoxFuture;
use std::future::Future;

/// One named unit of work in a fan-out batch
///
/// The operation does not start until the batch is run. `fallback` is what
/// the batch reports for this name if the operation fails or times out.
pub struct ParallelTask<T> {
    pub(crate) name: String,
    pub(crate) operation: BoxFuture<'static, anyhow::Result<T>>,
    pub(crate) fallback: Option<T>,
}

impl<T> ParallelTask<T> {
    pub fn new<F>(name: impl Into<String>, operation: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self {
            name: name.into(),
            operation: Box::pin(operation),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl<T> std::fmt::Debug for ParallelTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelTask")
            .field("name", &self.name)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}
