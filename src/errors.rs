//
// Errors
//
use std::error;
use std::fmt;
use std::io;
use std::num;
use std::path::PathBuf;
use std::result;

/// Type alias for topic coherence errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring while counting or scoring
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    ParseIntError(num::ParseIntError),
    ParseFloatError(num::ParseFloatError),
    /// A file (topics, partition, counts, fold output, ...) could not be opened, read or written
    FileError(PathBuf, io::Error),
    /// A word count line that is not `key|count` or `word|word|count`
    MalformedCount { line: usize, content: String },
    /// An SVM rank line without a usable `qid:` field or comment
    MalformedSvm { line: usize, content: String },
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::ParseIntError(ref err) => write!(f, "Error parsing integer: {}", err),
            Error::ParseFloatError(ref err) => write!(f, "Error parsing float: {}", err),
            Error::FileError(ref path, ref err) => {
                write!(f, "Problem with file {}. The OS error was: {}", path.display(), err)
            }
            Error::MalformedCount { line, ref content } => write!(
                f,
                "Word count format incorrect at line {}: {:?} \
                (expected key|count or word|word|count)",
                line, content
            ),
            Error::MalformedSvm { line, ref content } => {
                write!(f, "Bad SVM rank format at line {}: {:?}", line, content)
            }
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::ParseIntError(ref err) => Some(err),
            Error::ParseFloatError(ref err) => Some(err),
            Error::FileError(_, ref err) => Some(err),
            Error::MalformedCount { .. } => None,
            Error::MalformedSvm { .. } => None,
            Error::Other(_) => None,
        }
    }
}

//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<num::ParseIntError> for Error {
    fn from(err: num::ParseIntError) -> Self {
        Error::ParseIntError(err)
    }
}
impl From<num::ParseFloatError> for Error {
    fn from(err: num::ParseFloatError) -> Self {
        Error::ParseFloatError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::IOError(err) => err,
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn file_error_names_the_path() {
        let err = Error::FileError(
            PathBuf::from("corpus/part-0"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("corpus/part-0"), "{}", msg);
        assert!(err.source().is_some());
    }

    #[test]
    fn malformed_count_reports_line() {
        let err = Error::MalformedCount { line: 7, content: "a|b|c|4".into() };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn io_errors_round_trip() {
        let err: Error = io::Error::new(io::ErrorKind::InvalidData, "bad utf-8").into();
        let back: io::Error = err.into();
        assert_eq!(back.kind(), io::ErrorKind::InvalidData);
    }
}
