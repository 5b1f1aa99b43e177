use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read an import payload from `path`, or stdin when `path` is absent or `-`.
pub fn read_payload(path: Option<&Path>) -> anyhow::Result<String> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::read_payload;

    #[test]
    fn reads_named_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n- one\n").expect("write");
        assert_eq!(read_payload(Some(&path)).expect("read"), "# Notes\n- one\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_payload(Some(std::path::Path::new("/nonexistent/jot.csv"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jot.csv"));
    }
}
