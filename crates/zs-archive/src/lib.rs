//! In-memory ZIP archive session.
//!
//! Loads a ZIP container into an editable, hierarchical representation,
//! lets a caller read and rewrite individual text members, and
//! re-serializes the result into a valid ZIP.
//!
//! # Data Model
//!
//! - [`FileStore`]: member path → uncompressed bytes
//! - [`DirectorySet`]: known directory paths, closed under ancestry
//!   (implicit parents such as `a` and `a/b` for `a/b/c.txt` are synthesized
//!   on load)
//! - [`TreeNode`]: derived view, rebuilt on every [`Session::tree`] call;
//!   directories sort before files, names compare case-sensitively
//!
//! # Example
//!
//! ```no_run
//! use zs_archive::Session;
//!
//! let bytes = std::fs::read("project.zip").unwrap();
//! let mut session = Session::default();
//! session.load(&bytes).unwrap();
//!
//! for root in session.tree().unwrap() {
//!     println!("{}", root.name);
//! }
//!
//! let readme = session.read_text("README.md").unwrap();
//! session.write_text("README.md", &format!("{readme}\nEdited.")).unwrap();
//! std::fs::write("project.zip", session.export().unwrap()).unwrap();
//! ```

pub mod codec;
pub mod error;
pub mod loader;
pub mod path;
pub mod session;
pub mod store;
pub mod tree;
pub mod writer;

pub use codec::TextCodec;
pub use error::{ArchiveError, Result};
pub use loader::{load, LoadStats, LoadedArchive};
pub use path::ArchivePath;
pub use session::{CommitOutcome, LoadTicket, Session, SessionState};
pub use store::{ArchiveContents, ArchiveEntry, DirectorySet, FileStore};
pub use tree::TreeNode;
pub use writer::ArchiveWriter;
pub use zs_config::{ArchiveConfig, LoadLimits, TextPolicy};
