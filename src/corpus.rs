//! Reference corpus on disk
//!
//! The corpus is a directory of partition files. Each line of a partition is one document of
//! whitespace separated tokens. Hidden entries (leading `.`) are skipped.
//!
//! Lines end at `\n` or `\r\n` and also at any other Unicode line boundary (`\r`, vertical tab,
//! form feed, the file/group/record separators, NEL, LS, PS), so a form feed inside a line starts
//! a new document.
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::*;

/// Open a UTF-8 text input, naming the path if that fails
pub fn open_text<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| Error::FileError(path.to_owned(), err))
}

/// Read a whole text input as lines
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    open_text(path)?
        .lines()
        .collect::<::std::io::Result<Vec<String>>>()
        .map_err(|err| Error::FileError(path.to_owned(), err))
}

/// Line boundaries besides `\n`
pub const DOCUMENT_BREAKS: &[char] = &[
    '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Call `each` with every document of a stream, in order
///
/// A boundary at the very end of an unterminated last line does not open another document.
pub fn for_each_document<R, F>(mut reader: R, mut each: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let (body, terminated) = match line.strip_suffix('\n') {
            Some(body) => (body.strip_suffix('\r').unwrap_or(body), true),
            None => (line.as_str(), false),
        };
        let mut documents: Vec<&str> = body.split(DOCUMENT_BREAKS).collect();
        if !terminated && documents.len() > 1 && documents.last() == Some(&"") {
            documents.pop();
        }
        for document in documents {
            each(document);
        }
    }
}

/// List the partitions of a corpus directory
///
/// Sorted by path so logs read the same from run to run; counting does not depend on the order.
pub fn list_partitions<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let file_error = |err| Error::FileError(dir.to_owned(), err);
    let mut partitions = vec![];
    for entry in fs::read_dir(dir).map_err(file_error)? {
        let entry = entry.map_err(file_error)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        partitions.push(entry.path());
    }
    partitions.sort();
    Ok(partitions)
}
