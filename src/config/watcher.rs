//! Settings file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// A change notification for the watched settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChanged {
    pub path: PathBuf,
}

/// A watcher that turns settings file edits into change notifications.
///
/// It does not load anything itself; the receiver decides when to run the
/// plugin's configuration change hook.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<SettingsChanged>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for change notifications.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<SettingsChanged>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. Dropping the returned watcher stops notifications.
    ///
    /// The parent directory is watched rather than the file, so saves that
    /// replace the file (write a temp file, rename it over) keep being seen.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let file_name = self.path.file_name().map(|name| name.to_os_string());
        let dir = watched_dir(&self.path);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_settings = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == file_name.as_deref());
                    if touches_settings {
                        tracing::debug!(path = ?path, kind = ?event.kind, "Settings file changed");
                        let _ = tx.send(SettingsChanged { path: path.clone() });
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Settings watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; a bare file name lives in the current directory.
fn watched_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    async fn expect_notification(rx: &mut mpsc::UnboundedReceiver<SettingsChanged>) -> SettingsChanged {
        tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("no change notification")
            .expect("channel closed")
    }

    /// Let the burst of events from one save arrive, then discard it.
    async fn drain(rx: &mut mpsc::UnboundedReceiver<SettingsChanged>) {
        tokio::time::sleep(Duration::from_millis(300)).await;
        while rx.try_recv().is_ok() {}
    }

    #[tokio::test]
    async fn test_modification_emits_notification() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[plugin]").unwrap();
        file.flush().unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(file.path());
        let _handle = watcher.run().unwrap();

        writeln!(file, "[plugin.jitsisettings]").unwrap();
        file.flush().unwrap();

        let changed = expect_notification(&mut rx).await;
        assert_eq!(changed.path, file.path());
    }

    #[tokio::test]
    async fn test_rename_over_saves_keep_notifying() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        fs::write(&path, "[plugin]\n").unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        for round in 0..2 {
            let staged = dir.path().join("host.toml.tmp");
            fs::write(&staged, format!("# save {round}\n[plugin]\n")).unwrap();
            fs::rename(&staged, &path).unwrap();

            let changed = expect_notification(&mut rx).await;
            assert_eq!(changed.path, path);
            drain(&mut rx).await;
        }

        // In-place edits are still seen after the file was replaced
        fs::write(&path, "[plugin.jitsisettings]\n").unwrap();
        expect_notification(&mut rx).await;
    }

    #[tokio::test]
    async fn test_other_files_in_directory_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        fs::write(&path, "[plugin]\n").unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();

        fs::write(dir.path().join("unrelated.toml"), "x = 1\n").unwrap();
        let result = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(result.is_err(), "unrelated file triggered a notification");
    }

    #[test]
    fn test_bare_file_name_watches_current_dir() {
        assert_eq!(watched_dir(Path::new("host.toml")), PathBuf::from("."));
        assert_eq!(watched_dir(Path::new("/etc/jitsi/host.toml")), PathBuf::from("/etc/jitsi"));
    }
}
