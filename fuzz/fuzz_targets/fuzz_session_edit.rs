//! Fuzz target for session edits.
//!
//! Writes an arbitrary path and body into a session, exports and reloads it.
//! Accepted paths must survive the round trip byte for byte.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zs_archive::Session;

fuzz_target!(|input: (&str, &str)| {
    let (path, body) = input;

    let mut session = Session::default();
    let Ok(empty) = zs_archive::ArchiveWriter::default().write(
        &zs_archive::FileStore::default(),
        &zs_archive::DirectorySet::default(),
    ) else {
        return;
    };
    if session.load(&empty).is_err() {
        return;
    }
    if session.write_text(path, body).is_err() {
        return;
    }

    let exported = session.export().expect("export of a loaded session");
    let mut reloaded = Session::default();
    reloaded.load(&exported).expect("reload of exported archive");
    assert_eq!(reloaded.read_text(path).expect("written path"), body);
});
