//! Reading a code selection from a file or stdin

use std::io::{self, Read};
use std::path::Path;

/// Source name meaning "read standard input"
pub const STDIN: &str = "-";

/// Read the selection named by `source`: a file path, or `-` for stdin.
pub fn read_selection(source: &str) -> io::Result<String> {
    if source == STDIN {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(Path::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();

        let code = read_selection(path.to_str().unwrap()).unwrap();
        assert_eq!(code, "fn main() {}\n");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_selection("/definitely/not/here.rs").is_err());
    }
}
