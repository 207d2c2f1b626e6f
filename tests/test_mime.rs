use uhttp::http::mime::content_type_for;

#[test]
fn test_known_extensions() {
    let cases = [
        ("html", "text/html"),
        ("htm", "text/html"),
        ("txt", "text/plain"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("jpg", "image/jpg"),
        ("css", "text/css"),
        ("js", "application/javascript"),
    ];

    for (ext, expected) in cases {
        assert_eq!(content_type_for(Some(ext)), expected, "extension {}", ext);
    }
}

#[test]
fn test_unknown_or_missing_extension_is_plain_text() {
    assert_eq!(content_type_for(None), "text/plain");
    assert_eq!(content_type_for(Some("")), "text/plain");
    assert_eq!(content_type_for(Some("jpeg")), "text/plain");
    assert_eq!(content_type_for(Some("json")), "text/plain");
}

#[test]
fn test_matching_is_case_sensitive() {
    assert_eq!(content_type_for(Some("HTML")), "text/plain");
    assert_eq!(content_type_for(Some("Png")), "text/plain");
}
