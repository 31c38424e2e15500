use tiny::content::uri::classify_with;
use tiny::content::{ContentKind, classify};

#[test]
fn test_static_uris_prefix_dot() {
    for uri in ["/home.html", "/images/logo.png", "/a?b=c", "/x/y/z.txt", "relative.html"] {
        let target = classify(uri);

        assert_eq!(target.kind, ContentKind::Static, "{}", uri);
        assert_eq!(target.path, format!(".{}", uri));
        assert_eq!(target.query, "");
    }
}

#[test]
fn test_static_directories_get_home_html() {
    for uri in ["/", "/docs/", "/a/b/"] {
        let target = classify(uri);

        assert_eq!(target.path, format!(".{}home.html", uri));
        assert_eq!(target.kind, ContentKind::Static);
    }
}

#[test]
fn test_dynamic_uris_split_at_first_question_mark() {
    let cases = [
        ("/cgi-bin/adder?15&20", "./cgi-bin/adder", "15&20"),
        ("/cgi-bin/adder?", "./cgi-bin/adder", ""),
        ("/cgi-bin/adder?a?b", "./cgi-bin/adder", "a?b"),
        ("/x/cgi-bin/y?q=%20", "./x/cgi-bin/y", "q=%20"),
    ];

    for (uri, path, query) in cases {
        let target = classify(uri);

        assert_eq!(target.kind, ContentKind::Dynamic, "{}", uri);
        assert_eq!(target.path, path);
        assert_eq!(target.query, query);
    }
}

#[test]
fn test_dynamic_without_query() {
    let target = classify("/cgi-bin/adder");

    assert_eq!(target.kind, ContentKind::Dynamic);
    assert_eq!(target.path, "./cgi-bin/adder");
    assert_eq!(target.query, "");
}

#[test]
fn test_marker_is_a_plain_substring() {
    // Anywhere in the URI, even the query, makes the request dynamic.
    let target = classify("/page.html?from=cgi-bin");
    assert_eq!(target.kind, ContentKind::Dynamic);
    assert_eq!(target.path, "./page.html");
    assert_eq!(target.query, "from=cgi-bin");

    let target = classify("/my-cgi-binaries/tool");
    assert_eq!(target.kind, ContentKind::Dynamic);
}

#[test]
fn test_custom_marker() {
    let target = classify_with("/cgi-bin/adder?1", "run", "index.html");
    assert_eq!(target.kind, ContentKind::Static);
    assert_eq!(target.path, "./cgi-bin/adder?1");

    let target = classify_with("/", "run", "index.html");
    assert_eq!(target.path, "./index.html");
}
