//! CGI programs run with stdout wired to the client socket

mod common;

use common::{WebRoot, exchange};

const ADDER: &[u8] = b"#!/bin/sh
a=${QUERY_STRING%%&*}
b=${QUERY_STRING#*&}
printf 'Content-type: text/plain\\r\\n\\r\\n'
printf 'sum=%d\\n' $((a + b))
";

const ECHO: &[u8] = b"#!/bin/sh
printf 'Content-type: text/plain\\r\\n\\r\\n'
printf '[%s] args=%d\\n' \"$QUERY_STRING\" $#
";

const FAILING: &[u8] = b"#!/bin/sh
printf 'Content-type: text/plain\\r\\n\\r\\npartial'
exit 3
";

// All scripts are written before any of them runs, and everything runs from a
// single test, so no other thread can fork while a script is open for writing.
#[tokio::test]
async fn test_cgi_programs() {
    let root = WebRoot::new("cgi");
    root.file("cgi-bin/adder", ADDER, 0o755);
    root.file("cgi-bin/echo", ECHO, 0o755);
    root.file("cgi-bin/failing", FAILING, 0o755);

    let raw = exchange(root.site(), b"GET /cgi-bin/adder?15&20 HTTP/1.0\r\nHost: x\r\n\r\n").await;
    assert_eq!(
        String::from_utf8(raw).unwrap(),
        "HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\nContent-type: text/plain\r\n\r\nsum=35\n"
    );

    // Only the first '?' splits; the rest is passed through untouched.
    let raw = exchange(root.site(), b"GET /cgi-bin/echo?a=1?b=%20 HTTP/1.0\r\n\r\n").await;
    assert!(String::from_utf8(raw).unwrap().ends_with("\r\n\r\n[a=1?b=%20] args=0\n"));

    // No '?' means an empty query string.
    let raw = exchange(root.site(), b"GET /cgi-bin/echo HTTP/1.0\r\n\r\n").await;
    assert!(String::from_utf8(raw).unwrap().ends_with("\r\n\r\n[] args=0\n"));

    let raw = exchange(root.site(), b"GET /cgi-bin/echo? HTTP/1.0\r\n\r\n").await;
    assert!(String::from_utf8(raw).unwrap().ends_with("\r\n\r\n[] args=0\n"));

    // A failing program still produced a 200 head; its output is all the
    // client gets.
    let raw = exchange(root.site(), b"GET /cgi-bin/failing HTTP/1.0\r\n\r\n").await;
    assert_eq!(
        String::from_utf8(raw).unwrap(),
        "HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\nContent-type: text/plain\r\n\r\npartial"
    );
}
