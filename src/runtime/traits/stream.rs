//! Trait for ordered execution streams

/// An ordered queue of device work
///
/// Work issued on one stream executes in issue order. Faults raised while a
/// kernel runs are not returned by the launch; they are held on the stream
/// and reported by the next [`RuntimeStream::synchronize`].
pub trait RuntimeStream: Send + Sync {
    /// Unique identifier for this stream
    fn id(&self) -> u64;

    /// Wait for all issued work and report any fault raised since the last call
    fn synchronize(&self) -> crate::error::Result<()>;
}
