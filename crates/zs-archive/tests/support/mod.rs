//! Shared fixtures for archive integration tests.
//!
//! Archives are produced with the `zip` crate directly so tests exercise
//! real third-party output rather than our own writer.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// One member of a fixture archive.
pub enum Member<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

/// Build a ZIP with the given members, in order.
pub fn build_zip(members: &[Member<'_>], method: CompressionMethod) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buffer);
        let options: FileOptions<'_, ()> = FileOptions::default().compression_method(method);

        for member in members {
            match member {
                Member::File(name, data) => {
                    zip.start_file(*name, options).expect("start file");
                    zip.write_all(data).expect("write member");
                }
                Member::Dir(name) => zip.add_directory(*name, options).expect("add directory"),
            }
        }

        zip.finish().expect("finish zip");
    }
    buffer.into_inner()
}

/// Build a Deflate ZIP containing only file members.
pub fn files_only(files: &[(&str, &[u8])]) -> Vec<u8> {
    let members: Vec<Member<'_>> = files
        .iter()
        .map(|(name, data)| Member::File(name, data))
        .collect();
    build_zip(&members, CompressionMethod::Deflated)
}

/// Find the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
