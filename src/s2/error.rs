// Copyright 2023 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt;
use std::io;

/// S2Error represents errors that can occur in S2 operations
#[derive(Debug)]
pub enum S2Error {
    /// Invalid loop (e.g., degenerate or antipodal edges)
    InvalidLoop(String),
    /// Invalid argument provided to a function
    InvalidArgument(String),
    /// Error during encoding/decoding
    EncodingError(String),
    /// The requested operation is not supported for this value
    Unsupported(String),
    /// The underlying writer failed
    Io(io::Error),
}

impl fmt::Display for S2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            S2Error::InvalidLoop(msg) => write!(f, "Invalid loop: {}", msg),
            S2Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            S2Error::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            S2Error::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            S2Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for S2Error {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            S2Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for S2Error {
    fn from(err: io::Error) -> Self {
        S2Error::Io(err)
    }
}

/// Result type for S2 operations
pub type S2Result<T> = Result<T, S2Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = S2Error::Unsupported("compressed encoding".to_string());
        assert_eq!(err.to_string(), "Unsupported: compressed encoding");
        let err = S2Error::InvalidLoop("edge 2 is degenerate".to_string());
        assert_eq!(err.to_string(), "Invalid loop: edge 2 is degenerate");
    }

    #[test]
    fn test_from_io_error() {
        let err: S2Error = io::Error::new(io::ErrorKind::WriteZero, "full").into();
        assert!(matches!(err, S2Error::Io(_)));
        assert!(err.source().is_some());
    }
}
