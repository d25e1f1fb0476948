//! The archive session: one owned file store/directory set pair and the
//! operations on it.
//!
//! ```text
//! Empty ──load──▶ Loaded ──write_text──▶ Modified
//!                   ▲                       │
//!                   └─────────load──────────┘
//! ```
//!
//! A rejected load leaves the session as it was. Loads are tagged with a
//! [`LoadTicket`]; only the most recently issued ticket may commit.

use serde::Serialize;
use tracing::{debug, info, warn};
use zs_config::{ArchiveConfig, LoadLimits};

use crate::codec::TextCodec;
use crate::loader::{self, LoadedArchive};
use crate::path::ArchivePath;
use crate::store::{ArchiveContents, ArchiveEntry};
use crate::tree::{self, TreeNode};
use crate::writer::ArchiveWriter;
use crate::{ArchiveError, Result};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Empty,
    Loaded,
    Modified,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Empty => write!(f, "empty"),
            SessionState::Loaded => write!(f, "loaded"),
            SessionState::Modified => write!(f, "modified"),
        }
    }
}

/// Token identifying one initiated load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What happened to a committed load result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The result replaced the session contents.
    Applied,
    /// A newer load was initiated; the result was discarded.
    Stale,
}

/// An in-memory, editable archive.
#[derive(Debug)]
pub struct Session {
    codec: TextCodec,
    writer: ArchiveWriter,
    limits: LoadLimits,
    contents: Option<ArchiveContents>,
    state: SessionState,
    latest_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&ArchiveConfig::default())
    }
}

impl Session {
    /// Create an empty session.
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            codec: TextCodec::new(config.text_policy),
            writer: ArchiveWriter::new(config.compression_level),
            limits: config.limits,
            contents: None,
            state: SessionState::Empty,
            latest_ticket: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.contents.is_some()
    }

    /// Load `bytes`, replacing the current contents on success.
    ///
    /// Equivalent to [`begin_load`](Self::begin_load) →
    /// [`decode`](Self::decode) → [`commit`](Self::commit).
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        let ticket = self.begin_load();
        let decoded = self.decode(bytes);
        self.commit(ticket, decoded).map(|_| ())
    }

    /// Issue a ticket for a new load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        debug!(ticket = self.latest_ticket, "Load initiated");
        LoadTicket(self.latest_ticket)
    }

    /// Parse archive bytes without touching session contents.
    pub fn decode(&self, bytes: &[u8]) -> Result<LoadedArchive> {
        loader::load(bytes, &self.limits)
    }

    /// Apply a decoded result if `ticket` is still the latest one.
    ///
    /// Stale tickets are discarded whether or not their decode succeeded.
    /// A failed decode for the latest ticket is returned unchanged and the
    /// session keeps its previous contents.
    pub fn commit(
        &mut self,
        ticket: LoadTicket,
        decoded: Result<LoadedArchive>,
    ) -> Result<CommitOutcome> {
        if ticket.0 != self.latest_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale load"
            );
            return Ok(CommitOutcome::Stale);
        }

        let loaded = decoded?;
        info!(
            ticket = ticket.0,
            files = loaded.contents.files.len(),
            directories = loaded.contents.directories.len(),
            "Session loaded"
        );
        self.contents = Some(loaded.contents);
        self.state = SessionState::Loaded;
        Ok(CommitOutcome::Applied)
    }

    fn contents(&self) -> Result<&ArchiveContents> {
        self.contents.as_ref().ok_or(ArchiveError::NotLoaded)
    }

    /// Flat ordered entry list.
    pub fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        Ok(self.contents()?.entries())
    }

    /// Current tree, rebuilt from the latest contents.
    pub fn tree(&self) -> Result<Vec<TreeNode>> {
        Ok(tree::build(&self.contents()?.entries()))
    }

    pub fn file_count(&self) -> usize {
        self.contents.as_ref().map_or(0, |c| c.files.len())
    }

    pub fn directory_count(&self) -> usize {
        self.contents.as_ref().map_or(0, |c| c.directories.len())
    }

    pub fn contains_file(&self, path: &str) -> bool {
        let Some(contents) = &self.contents else {
            return false;
        };
        ArchivePath::parse(path).is_ok_and(|p| contents.files.contains(p.as_str()))
    }

    pub fn file_paths(&self) -> Vec<&ArchivePath> {
        self.contents
            .as_ref()
            .map(|c| c.files.paths().collect())
            .unwrap_or_default()
    }

    /// Raw bytes of a file member.
    pub fn read_bytes(&self, path: &str) -> Result<&[u8]> {
        let contents = self.contents()?;
        let key = ArchivePath::parse(path)?;
        contents
            .files
            .get(key.as_str())
            .ok_or_else(|| ArchiveError::PathNotFound(key.to_string()))
    }

    /// Text content of a file member.
    pub fn read_text(&self, path: &str) -> Result<String> {
        let key = ArchivePath::parse(path)?;
        let bytes = self.read_bytes(key.as_str())?;
        self.codec.decode(key.as_str(), bytes)
    }

    /// Insert or overwrite a file member with `content`.
    ///
    /// Missing ancestor directories are created.
    pub fn write_text(&mut self, path: &str, content: &str) -> Result<()> {
        let key = ArchivePath::parse(path)?;
        let data = self.codec.encode(content);
        let contents = self.contents.as_mut().ok_or(ArchiveError::NotLoaded)?;

        let created_dirs = contents.directories.insert_ancestors(&key);
        let replaced = contents.files.insert(key.clone(), data).is_some();
        self.state = SessionState::Modified;

        debug!(
            path = %key,
            bytes = content.len(),
            replaced,
            created_dirs,
            "Member written"
        );
        Ok(())
    }

    /// Serialize the current contents to ZIP bytes.
    pub fn export(&self) -> Result<Vec<u8>> {
        let contents = self.contents()?;
        self.writer.write(&contents.files, &contents.directories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DirectorySet, FileStore};
    use zs_config::TextPolicy;

    fn archive_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut files = FileStore::new();
        for (name, data) in members {
            files.insert(ArchivePath::parse(name).unwrap(), data.to_vec());
        }
        ArchiveWriter::default()
            .write(&files, &DirectorySet::new())
            .unwrap()
    }

    fn loaded_session() -> Session {
        let mut session = Session::default();
        session
            .load(&archive_bytes(&[("src/main.rs", &b"fn main() {}"[..])]))
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::Empty);
        assert!(!session.is_loaded());
        assert!(matches!(session.tree(), Err(ArchiveError::NotLoaded)));
        assert!(matches!(session.export(), Err(ArchiveError::NotLoaded)));
        assert!(matches!(
            session.read_text("a.txt"),
            Err(ArchiveError::NotLoaded)
        ));
    }

    #[test]
    fn test_write_requires_loaded() {
        let mut session = Session::default();
        let err = session.write_text("a.txt", "x").unwrap_err();
        assert!(matches!(err, ArchiveError::NotLoaded));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_load_then_modify() {
        let mut session = loaded_session();
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.read_text("src/main.rs").unwrap(), "fn main() {}");

        session
            .write_text("src/main.rs", "fn main() { run() }")
            .unwrap();
        assert_eq!(session.state(), SessionState::Modified);
        assert_eq!(
            session.read_text("src/main.rs").unwrap(),
            "fn main() { run() }"
        );

        session.load(&archive_bytes(&[("x.txt", &b"x"[..])])).unwrap();
        assert_eq!(session.state(), SessionState::Loaded);
        assert!(!session.contains_file("src/main.rs"));
    }

    #[test]
    fn test_write_new_path_creates_ancestors() {
        let mut session = loaded_session();
        session.write_text("docs/guide/intro.md", "# Intro").unwrap();

        let roots = session.tree().unwrap();
        let docs = roots.iter().find(|n| n.name == "docs").unwrap();
        assert!(docs.is_directory);
        assert_eq!(docs.children[0].name, "guide");
        assert_eq!(docs.children[0].children[0].name, "intro.md");
        assert_eq!(session.directory_count(), 3);
    }

    #[test]
    fn test_write_invalid_path() {
        let mut session = loaded_session();
        let err = session.write_text("/", "x").unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidPath(_)));
        assert_eq!(session.state(), SessionState::Loaded);
    }

    #[test]
    fn test_read_missing_path() {
        let session = loaded_session();
        let err = session.read_text("nope.txt").unwrap_err();
        assert!(matches!(err, ArchiveError::PathNotFound(ref p) if p == "nope.txt"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_read_directory_is_not_a_file() {
        let session = loaded_session();
        assert!(matches!(
            session.read_text("src"),
            Err(ArchiveError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_trailing_separator_is_normalized() {
        let session = loaded_session();
        assert!(session.contains_file("src/main.rs/"));
        assert!(session.contains_file("src/main.rs"));
        assert!(!session.contains_file("src"));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut session = loaded_session();
        session.write_text("new.txt", "keep me").unwrap();

        let err = session.load(&[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, ArchiveError::CorruptArchive(_)));
        assert_eq!(session.state(), SessionState::Modified);
        assert_eq!(session.read_text("new.txt").unwrap(), "keep me");
    }

    #[test]
    fn test_stale_ticket_discarded() {
        let bytes_a = archive_bytes(&[("a.txt", &b"from a"[..])]);
        let bytes_b = archive_bytes(&[("b.txt", &b"from b"[..])]);

        let mut session = Session::default();
        let ticket_a = session.begin_load();
        let ticket_b = session.begin_load();

        let decoded_b = session.decode(&bytes_b);
        assert_eq!(
            session.commit(ticket_b, decoded_b).unwrap(),
            CommitOutcome::Applied
        );

        let decoded_a = session.decode(&bytes_a);
        assert_eq!(
            session.commit(ticket_a, decoded_a).unwrap(),
            CommitOutcome::Stale
        );
        assert_eq!(session.read_text("b.txt").unwrap(), "from b");
        assert!(!session.contains_file("a.txt"));
    }

    #[test]
    fn test_stale_failure_is_discarded_silently() {
        let mut session = loaded_session();
        let old = session.begin_load();
        let _new = session.begin_load();
        let outcome = session
            .commit(old, Err(ArchiveError::CorruptArchive("late".into())))
            .unwrap();
        assert_eq!(outcome, CommitOutcome::Stale);
        assert!(session.is_loaded());
    }

    #[test]
    fn test_strict_policy_reports_encoding_error() {
        let bytes = archive_bytes(&[
            ("bad.txt", &[0x66u8, 0x6f, 0xff][..]),
            ("ok.txt", &b"fine"[..]),
        ]);

        let config = ArchiveConfig::default().with_text_policy(TextPolicy::Strict);
        let mut strict = Session::new(&config);
        strict.load(&bytes).unwrap();
        assert_eq!(strict.read_text("ok.txt").unwrap(), "fine");
        assert!(matches!(
            strict.read_text("bad.txt"),
            Err(ArchiveError::Encoding { .. })
        ));
        assert_eq!(strict.read_bytes("bad.txt").unwrap(), &[0x66, 0x6f, 0xff]);

        let mut lossy = Session::default();
        lossy.load(&bytes).unwrap();
        assert_eq!(lossy.read_text("bad.txt").unwrap(), "fo\u{FFFD}");
    }

    #[test]
    fn test_encoding_error_reports_normalized_path() {
        let bytes = archive_bytes(&[("src/a.txt", &[0xffu8][..])]);
        let config = ArchiveConfig::default().with_text_policy(TextPolicy::Strict);
        let mut session = Session::new(&config);
        session.load(&bytes).unwrap();

        match session.read_text("src/a.txt/").unwrap_err() {
            ArchiveError::Encoding { path, .. } => assert_eq!(path, "src/a.txt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_compression_level_is_clamped() {
        for level in [0, 10, -3] {
            let config = ArchiveConfig::default().with_compression_level(level);
            let mut session = Session::new(&config);
            session.load(&archive_bytes(&[("a.txt", &b"a"[..])])).unwrap();
            session.write_text("b.txt", "b").unwrap();

            let mut reloaded = Session::default();
            reloaded.load(&session.export().unwrap()).unwrap();
            assert_eq!(reloaded.read_text("b.txt").unwrap(), "b");
        }
    }

    #[test]
    fn test_backslash_name_round_trips_as_file() {
        let mut session = loaded_session();
        session.write_text("notes\\", "hello").unwrap();

        let mut reloaded = Session::default();
        reloaded.load(&session.export().unwrap()).unwrap();
        assert_eq!(reloaded.read_text("notes\\").unwrap(), "hello");
        assert_eq!(reloaded.file_count(), 2);
        assert_eq!(reloaded.directory_count(), 1);
    }

    #[test]
    fn test_write_rejects_malformed_paths() {
        let mut session = loaded_session();
        for raw in ["a//b.txt", "/x", "a/./b", "src/../etc"] {
            assert!(matches!(
                session.write_text(raw, "x"),
                Err(ArchiveError::InvalidPath(_))
            ));
        }
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.directory_count(), 1);
    }
}
