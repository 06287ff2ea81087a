use std::collections::TryReserveError;

/// Growable sequence that extends its storage by a fixed chunk at a time.
///
/// Both the line reader and the tokenizer collect into one of these. The
/// buffer starts with `chunk` slots and, whenever the next push would not fit,
/// reserves exactly `chunk` more. Items already stored are never moved out or
/// lost by growth.
///
/// Running out of memory while growing is not recoverable: the process prints
/// `jsh: allocation error` and exits with a failure status.
#[derive(Debug)]
pub struct ChunkedBuf<T> {
    items: Vec<T>,
    chunk: usize,
}

impl<T> ChunkedBuf<T> {
    /// Create an empty buffer with an initial capacity of one chunk.
    pub fn with_chunk(chunk: usize) -> Self {
        let chunk = chunk.max(1);
        let mut items = Vec::new();
        if let Err(err) = items.try_reserve_exact(chunk) {
            exhausted(&err);
        }
        Self { items, chunk }
    }

    /// Append an item, growing by one chunk first if the buffer is full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            if let Err(err) = self.grow() {
                exhausted(&err);
            }
        }
        self.items.push(item);
    }

    /// Reserve one more chunk of capacity.
    ///
    /// This is the fallible half of [`push`](Self::push); callers that can
    /// survive an allocation failure may use it directly.
    pub fn grow(&mut self) -> Result<(), TryReserveError> {
        let additional = self.items.capacity() - self.items.len() + self.chunk;
        self.items.try_reserve_exact(additional)?;
        tracing::trace!(capacity = self.items.capacity(), "buffer grown");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn chunk(&self) -> usize {
        self.chunk
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

fn exhausted(err: &TryReserveError) -> ! {
    tracing::error!(%err, "buffer growth failed");
    eprintln!("jsh: allocation error");
    std::process::exit(1)
}
