/// Sink for the progress lines a verification run emits.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
}
