use std::borrow::Cow;
use std::path::Path;

const FILE_SCHEME: &str = "file://";

/// Turns a plain absolute path into a `file://` URI. URIs pass through.
pub fn to_file_uri(entry: &str) -> String {
    if entry.starts_with(FILE_SCHEME) {
        return entry.to_string();
    }

    let path = entry.replace('\\', "/");
    let encoded: Vec<Cow<str>> = path.split('/').map(urlencoding::encode).collect();
    if path.starts_with('/') {
        format!("{FILE_SCHEME}{}", encoded.join("/"))
    } else {
        // Drive-letter paths such as C:/x
        format!("{FILE_SCHEME}/{}", encoded.join("/").replacen("%3A", ":", 1))
    }
}

/// Last path component of a path or `file://` URI, percent-decoded.
pub fn display_name(entry: &str) -> Option<String> {
    let (path, is_uri) = match entry.strip_prefix(FILE_SCHEME) {
        Some(rest) => (rest, true),
        None => (entry, false),
    };

    let name = Path::new(path.trim_end_matches('/'))
        .file_name()?
        .to_string_lossy()
        .into_owned();

    if !is_uri {
        return Some(name);
    }
    match urlencoding::decode(&name) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_file_uri() {
        assert_eq!(to_file_uri("/tmp/a.txt"), "file:///tmp/a.txt");
        assert_eq!(
            to_file_uri("/Users/me/My Report.pdf"),
            "file:///Users/me/My%20Report.pdf"
        );
        assert_eq!(to_file_uri("file:///tmp/b.txt"), "file:///tmp/b.txt");
        assert_eq!(to_file_uri(r"C:\Temp\x y.txt"), "file:///C:/Temp/x%20y.txt");
    }

    #[test]
    fn test_display_name_decodes_uris() {
        assert_eq!(
            display_name("file:///Users/me/My%20Report.pdf").as_deref(),
            Some("My Report.pdf")
        );
        assert_eq!(display_name("file:///Users/me/photos/").as_deref(), Some("photos"));
    }

    #[test]
    fn test_display_name_keeps_plain_paths() {
        assert_eq!(display_name("/tmp/100%25.txt").as_deref(), Some("100%25.txt"));
        assert_eq!(display_name("/"), None);
    }

    #[test]
    fn test_uri_then_name() {
        let uri = to_file_uri("/tmp/naïve file.txt");
        assert_eq!(display_name(&uri).as_deref(), Some("naïve file.txt"));
    }
}
