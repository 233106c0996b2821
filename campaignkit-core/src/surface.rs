//! Collaborators the formatters hand their results to: notifications,
//! clipboard and file downloads.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Toast-style notifications. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str);

    fn validation_failed(&self, err: &ValidationError) {
        tracing::warn!(code = err.code(), "validation failed");
        self.notify(NoticeKind::Error, err.title(), &err.to_string());
    }

    fn export_failed(&self, err: &ExportError) {
        tracing::warn!(code = err.code(), "export failed");
        self.notify(NoticeKind::Error, "Download failed", &err.to_string());
    }
}

/// Best-effort clipboard. Implementations swallow platform failures.
pub trait Clipboard {
    fn write_text(&self, value: &str);
}

/// A file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Where downloaded files end up.
pub trait FileSink {
    fn save(&self, blob: &FileBlob) -> io::Result<PathBuf>;
}

/// Saves files into a fixed directory, overwriting same-named files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn save(&self, blob: &FileBlob) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        // Only the final component of the name is honored.
        let name = Path::new(&blob.filename)
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty file name"))?;
        let path = self.dir.join(name);

        std::fs::write(&path, &blob.bytes)?;
        tracing::debug!(path = %path.display(), bytes = blob.bytes.len(), "saved file");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        notices: RefCell<Vec<(NoticeKind, String, String)>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
            self.notices
                .borrow_mut()
                .push((kind, title.to_string(), message.to_string()));
        }
    }

    fn blob(name: &str) -> FileBlob {
        FileBlob {
            filename: name.to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn validation_failure_becomes_error_notice() {
        let recorder = Recorder::default();
        recorder.validation_failed(&ValidationError::InvalidUrl);

        let notices = recorder.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, NoticeKind::Error);
        assert_eq!(notices[0].1, "Invalid URL");
        assert_eq!(
            notices[0].2,
            "Please enter a valid URL including http:// or https://"
        );
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("downloads"));

        let path = sink.save(&blob("qrcode.png")).unwrap();

        assert_eq!(path, dir.path().join("downloads").join("qrcode.png"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn directory_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.save(&blob("qrcode.png")).unwrap();
        let mut second = blob("qrcode.png");
        second.bytes = vec![9];
        let path = sink.save(&second).unwrap();

        assert_eq!(std::fs::read(path).unwrap(), vec![9]);
    }

    #[test]
    fn directory_sink_ignores_path_components() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        let path = sink.save(&blob("../escape/qrcode.png")).unwrap();

        assert_eq!(path, dir.path().join("qrcode.png"));
    }
}
