use crate::extract::ExtractError;

pub struct PathSanitizer;

impl PathSanitizer {
    /// Sanitize an entry name from a ZIP-based document (EPUB, DOCX) to prevent:
    /// - Directory traversal (../)
    /// - Absolute paths (/etc/passwd, C:\...)
    /// - Zip slip attacks
    ///
    /// Both `/` and `\` separate components. Returns a normalized
    /// `/`-joined virtual path or an error.
    pub fn sanitize(raw_path: &str) -> Result<String, ExtractError> {
        if raw_path.is_empty() {
            return Err(ExtractError::InvalidPath("Empty path".to_string()));
        }

        if raw_path.starts_with(['/', '\\']) || has_drive_prefix(raw_path) {
            return Err(ExtractError::InvalidPath(format!(
                "Absolute path not allowed: {}",
                raw_path
            )));
        }

        let mut components = Vec::new();
        for part in raw_path.split(['/', '\\']) {
            match part {
                "" | "." => continue,
                ".." => {
                    return Err(ExtractError::InvalidPath(format!(
                        "Parent directory traversal not allowed: {}",
                        raw_path
                    )));
                }
                normal => components.push(normal),
            }
        }

        if components.is_empty() {
            return Err(ExtractError::InvalidPath(format!(
                "No valid components: {}",
                raw_path
            )));
        }

        Ok(components.join("/"))
    }

    /// Resolve an href found inside the document at `base_dir`.
    ///
    /// `..` may climb back toward the archive root but never past it. A
    /// leading `/` anchors the href at the root. Any `#fragment` is dropped.
    pub fn resolve_relative(base_dir: &str, href: &str) -> Result<String, ExtractError> {
        let href = href.split('#').next().unwrap_or_default();
        if href.is_empty() {
            return Err(ExtractError::InvalidPath(format!(
                "Empty href relative to {}",
                base_dir
            )));
        }

        let (start, rest) = match href.strip_prefix('/') {
            Some(rooted) => ("", rooted),
            None => (base_dir, href),
        };

        let mut components: Vec<&str> = start
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .collect();

        for part in rest.split('/') {
            match part {
                "" | "." => continue,
                ".." => {
                    if components.pop().is_none() {
                        return Err(ExtractError::InvalidPath(format!(
                            "Parent directory traversal not allowed: {}",
                            href
                        )));
                    }
                }
                normal => components.push(normal),
            }
        }

        Self::sanitize(&components.join("/"))
    }

    /// Directory part of a sanitized path, empty for top-level entries
    pub fn parent_dir(path: &str) -> &str {
        path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
