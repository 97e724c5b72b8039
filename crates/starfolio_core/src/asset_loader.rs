//! Background asset loading
//!
//! [`AssetLoader`] owns a worker thread that reads and parses assets so the
//! frame loop never blocks on disk. Requests go in through one channel and
//! results come back through another; the frame loop polls without waiting.

use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::asset_cache::Asset;

/// Why an asset could not be loaded
#[derive(Debug)]
pub enum AssetError {
    Io(io::Error),
    /// The file is not valid RON for the asset type
    Parse(String),
    /// Parsed data breaks an invariant of the asset, e.g. an index past the vertex list
    Invalid(String),
    /// The worker thread is gone
    LoaderClosed,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "cannot read asset: {}", err),
            AssetError::Parse(msg) => write!(f, "malformed asset: {}", msg),
            AssetError::Invalid(msg) => write!(f, "asset rejected: {}", msg),
            AssetError::LoaderClosed => f.write_str("asset loader thread has stopped"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

impl From<ron::error::SpannedError> for AssetError {
    fn from(err: ron::error::SpannedError) -> Self {
        AssetError::Parse(err.to_string())
    }
}

/// Result of a background load
pub struct LoadResult<T> {
    /// Path that was requested
    pub path: PathBuf,
    /// The loaded asset or the reason it failed
    pub result: Result<T, AssetError>,
}

/// Loads assets of one type on a dedicated worker thread
///
/// The worker exits when the loader is dropped.
pub struct AssetLoader<T: Asset> {
    sender: Sender<PathBuf>,
    receiver: Receiver<LoadResult<T>>,
    in_flight: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Asset> AssetLoader<T> {
    /// Create a loader with its worker thread
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<PathBuf>();
        let (result_tx, result_rx) = channel::<LoadResult<T>>();

        thread::spawn(move || {
            while let Ok(path) = request_rx.recv() {
                let result = T::load_from_file(&path);
                if result_tx.send(LoadResult { path, result }).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
            in_flight: 0,
            _marker: PhantomData,
        }
    }

    /// Queue a path for loading
    pub fn load_async(&mut self, path: impl Into<PathBuf>) -> Result<(), AssetError> {
        self.sender.send(path.into()).map_err(|_| AssetError::LoaderClosed)?;
        self.in_flight += 1;
        Ok(())
    }

    /// Take one finished load, if any (non-blocking)
    pub fn poll(&mut self) -> Option<LoadResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every finished load (non-blocking)
    pub fn poll_all(&mut self) -> Vec<LoadResult<T>> {
        let mut results = Vec::new();
        while let Some(result) = self.poll() {
            results.push(result);
        }
        results
    }

    /// Number of requests that have not been polled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True while any request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

impl<T: Asset> Default for AssetLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::{Duration, Instant};

    struct LineCount(usize);

    impl Asset for LineCount {
        fn load_from_file(path: &Path) -> Result<Self, AssetError> {
            Ok(LineCount(std::fs::read_to_string(path)?.lines().count()))
        }
    }

    /// Poll until `n` results arrive or a generous deadline passes
    fn wait_for<T: Asset>(loader: &mut AssetLoader<T>, n: usize) -> Vec<LoadResult<T>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < n && Instant::now() < deadline {
            results.extend(loader.poll_all());
            std::thread::yield_now();
        }
        results
    }

    #[test]
    fn test_ron_errors_become_parse_errors() {
        let err: AssetError = ron::from_str::<Vec<u32>>("[1, 2").unwrap_err().into();
        assert!(matches!(err, AssetError::Parse(_)));
        assert!(err.to_string().starts_with("malformed asset"));
    }

    #[test]
    fn test_only_io_errors_have_a_source() {
        use std::error::Error;
        let io_err: AssetError = io::Error::new(io::ErrorKind::NotFound, "toy_rocket.ron").into();
        assert!(io_err.source().is_some());
        assert!(io_err.to_string().contains("toy_rocket.ron"));
        assert!(AssetError::Invalid("index 9".into()).source().is_none());
    }

    #[test]
    fn test_poll_returns_none_when_empty() {
        let mut loader = AssetLoader::<LineCount>::new();
        assert!(loader.poll().is_none());
        assert!(loader.poll_all().is_empty());
        assert!(!loader.is_busy());
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = AssetLoader::<LineCount>::new();
        loader.load_async("/nonexistent/starfolio/mesh.ron").unwrap();
        assert!(loader.is_busy());
        let results = wait_for(&mut loader, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, PathBuf::from("/nonexistent/starfolio/mesh.ron"));
        assert!(matches!(results[0].result, Err(AssetError::Io(_))));
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn test_loads_real_file() {
        let dir = std::env::temp_dir().join("starfolio_loader_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("three_lines.txt");
        std::fs::write(&path, "a\nb\nc\n").unwrap();

        let mut loader = AssetLoader::<LineCount>::new();
        loader.load_async(&path).unwrap();
        let results = wait_for(&mut loader, 1);
        match &results[0].result {
            Ok(count) => assert_eq!(count.0, 3),
            Err(e) => panic!("load failed: {}", e),
        }
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_multiple_requests_all_answer() {
        let mut loader = AssetLoader::<LineCount>::new();
        for name in ["a", "b", "c"] {
            loader.load_async(format!("/nonexistent/{}.ron", name)).unwrap();
        }
        assert_eq!(loader.in_flight(), 3);
        let results = wait_for(&mut loader, 3);
        assert_eq!(results.len(), 3);
    }
}
