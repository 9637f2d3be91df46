use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared line writer behind every [`crate::Log`] clone.
///
/// Each record reaches the writer as one `write_all` call made while the
/// lock is held, so lines from different threads never interleave.
#[derive(Clone)]
pub struct Sink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::from_writer(io::stderr())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// In-memory sink plus a handle for reading back what was written.
    pub fn capture() -> (Self, Capture) {
        let capture = Capture::default();
        (Self::from_writer(capture.clone()), capture)
    }

    pub(crate) fn write_line(&self, line: &str) {
        let mut writer = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    pub(crate) fn flush(&self) {
        let mut writer = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writer.flush();
    }

    pub fn same_as(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("shared", &Arc::strong_count(&self.inner))
            .finish()
    }
}

/// Cloneable in-memory writer. Every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn capture_collects_lines_from_clones() {
        let (sink, capture) = Sink::capture();
        let other = sink.clone();
        sink.write_line("one\n");
        other.write_line("two\n");
        assert_eq!(capture.lines(), vec!["one", "two"]);
        assert!(sink.same_as(&other));
        capture.clear();
        assert!(capture.is_empty());
    }

    #[test]
    fn write_failures_are_swallowed() {
        let sink = Sink::from_writer(Broken);
        sink.write_line("lost\n");
        sink.flush();
    }

    #[test]
    fn concurrent_lines_stay_whole() {
        let (sink, capture) = Sink::capture();
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        sink.write_line(&format!("worker-{n}-{}\n", "x".repeat(64)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let lines = capture.lines();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|line| line.ends_with(&"x".repeat(64))));
    }
}
