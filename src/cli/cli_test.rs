use clap::Parser;

use super::{Cli, DEFAULT_BIND_ADDRESS, Transport};

#[test]
fn parses_flags() {
    let cli = Cli::try_parse_from([
        "gitlab-mcp",
        "--gitlab-host",
        "https://gitlab.example.com",
        "--gitlab-token",
        "glpat-x",
        "--transport",
        "streamable-http",
        "--bind-address",
        "0.0.0.0:8080",
    ])
    .unwrap();

    assert_eq!(cli.gitlab_host.as_deref(), Some("https://gitlab.example.com"));
    assert_eq!(cli.gitlab_token.as_deref(), Some("glpat-x"));
    assert_eq!(cli.transport, Transport::StreamableHttp);
    assert_eq!(cli.bind_address, "0.0.0.0:8080");
}

#[test]
fn defaults_to_stdio_on_loopback() {
    let cli = Cli::try_parse_from(["gitlab-mcp", "--gitlab-token", "t"]).unwrap();

    assert_eq!(cli.transport, Transport::Stdio);
    assert_eq!(cli.bind_address, DEFAULT_BIND_ADDRESS);
}

#[test]
fn rejects_unknown_transport() {
    let result = Cli::try_parse_from(["gitlab-mcp", "--transport", "sse"]);
    assert!(result.is_err());
}
