//! Blocking HTTP client for the registry JSON API

use std::io::Read;
use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::debug;

use super::PackageSource;
use super::types::ProjectDocument;
use crate::constants::registry::{
    DEFAULT_REGISTRY_URL, DOWNLOAD_TIMEOUT, MAX_ARCHIVE_BYTES, METADATA_TIMEOUT, USER_AGENT,
};
use crate::core::{NodeId, ResolvedArtifact};
use crate::error::DeptraceError;

/// Characters escaped in the package path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Registry client making one bounded-timeout attempt per request
pub struct RegistryClient {
    agent: ureq::Agent,
    base_url: String,
    metadata_timeout: Duration,
    download_timeout: Duration,
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL, METADATA_TIMEOUT, DOWNLOAD_TIMEOUT)
    }
}

impl RegistryClient {
    pub fn new(
        base_url: impl Into<String>,
        metadata_timeout: Duration,
        download_timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            base_url,
            metadata_timeout,
            download_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the JSON document describing `package`
    pub fn project_url(&self, package: &NodeId) -> String {
        format!(
            "{}/{}/json",
            self.base_url,
            utf8_percent_encode(package.as_str(), PATH_SEGMENT)
        )
    }
}

impl PackageSource for RegistryClient {
    fn resolve_package(
        &self,
        package: &NodeId,
        version: Option<&str>,
    ) -> Result<ResolvedArtifact, DeptraceError> {
        let url = self.project_url(package);
        debug!("Querying registry: {url}");

        let response = match self.agent.get(&url).timeout(self.metadata_timeout).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => {
                return Err(DeptraceError::PackageNotFound {
                    package: package.to_string(),
                });
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(DeptraceError::RegistryError {
                    package: package.to_string(),
                    message: format!("HTTP {code}"),
                });
            }
            Err(err) => {
                return Err(DeptraceError::RegistryError {
                    package: package.to_string(),
                    message: err.to_string(),
                });
            }
        };

        let document: ProjectDocument =
            response
                .into_json()
                .map_err(|e| DeptraceError::RegistryError {
                    package: package.to_string(),
                    message: format!("invalid registry document: {e}"),
                })?;

        document.select_artifact(package.as_str(), version)
    }

    fn download_archive(&self, url: &str) -> Result<Vec<u8>, DeptraceError> {
        debug!("Downloading archive: {url}");

        let fetch_error = |message: String| DeptraceError::FetchError {
            url: url.to_string(),
            message,
        };

        let response = self
            .agent
            .get(url)
            .timeout(self.download_timeout)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => fetch_error(format!("HTTP {code}")),
                other => fetch_error(other.to_string()),
            })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_ARCHIVE_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| fetch_error(e.to_string()))?;

        debug!("Downloaded {} bytes from {url}", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Cursor, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    use pretty_assertions::assert_eq;
    use zip::write::SimpleFileOptions;

    use super::*;
    use crate::graph::DependencyGraphBuilder;

    enum Reply {
        Status(u16, Vec<u8>),
        /// Accept the connection and never answer
        Stall,
    }

    fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        (listener, base)
    }

    /// Answer one connection per reply, in order
    fn serve(listener: TcpListener, replies: Vec<Reply>) {
        thread::spawn(move || {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                drain_request(&stream);
                match reply {
                    Reply::Status(code, body) => {
                        let head = format!(
                            "HTTP/1.1 {code} Canned\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            body.len()
                        );
                        let _ = stream.write_all(head.as_bytes());
                        let _ = stream.write_all(&body);
                    }
                    Reply::Stall => thread::sleep(Duration::from_secs(2)),
                }
            }
        });
    }

    fn drain_request(stream: &TcpStream) {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap_or(0) > 2 {
            line.clear();
        }
    }

    fn client(base: &str) -> RegistryClient {
        RegistryClient::new(
            base,
            Duration::from_millis(500),
            Duration::from_millis(500),
        )
    }

    fn json(body: &str) -> Reply {
        Reply::Status(200, body.as_bytes().to_vec())
    }

    fn wheel(requires: &[&str]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("pkg-1.0.dist-info/METADATA", SimpleFileOptions::default())
            .unwrap();
        for requirement in requires {
            writeln!(writer, "Requires-Dist: {requirement}").unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_project_url_trims_trailing_slash() {
        let client = RegistryClient::new(
            "https://registry.example/pypi/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        assert_eq!(client.base_url(), "https://registry.example/pypi");
        assert_eq!(
            client.project_url(&NodeId::new("Requests")),
            "https://registry.example/pypi/requests/json"
        );
    }

    #[test]
    fn test_project_url_escapes_path_characters() {
        let client = client("https://registry.example/pypi");
        assert_eq!(
            client.project_url(&NodeId::new("a/b?c d")),
            "https://registry.example/pypi/a%2Fb%3Fc%20d/json"
        );
        assert_eq!(
            client.project_url(&NodeId::new("zope.interface_x-y")),
            "https://registry.example/pypi/zope.interface_x-y/json"
        );
    }

    #[test]
    fn test_default_points_at_public_registry() {
        let client = RegistryClient::default();
        assert_eq!(client.base_url(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn test_resolve_404_is_package_not_found() {
        let (listener, base) = listen();
        serve(listener, vec![Reply::Status(404, Vec::new())]);

        let err = client(&base)
            .resolve_package(&NodeId::new("x"), None)
            .unwrap_err();
        assert!(matches!(
            err,
            DeptraceError::PackageNotFound { ref package } if package == "x"
        ));
    }

    #[test]
    fn test_resolve_server_error_is_registry_error() {
        let (listener, base) = listen();
        serve(listener, vec![Reply::Status(500, b"oops".to_vec())]);

        let err = client(&base)
            .resolve_package(&NodeId::new("x"), None)
            .unwrap_err();
        assert!(matches!(
            err,
            DeptraceError::RegistryError { ref message, .. } if message == "HTTP 500"
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_resolve_refused_connection_is_registry_error() {
        let (listener, base) = listen();
        drop(listener);

        let err = client(&base)
            .resolve_package(&NodeId::new("x"), None)
            .unwrap_err();
        assert!(matches!(err, DeptraceError::RegistryError { .. }));
    }

    #[test]
    fn test_resolve_invalid_document_is_registry_error() {
        let (listener, base) = listen();
        serve(listener, vec![json("<html>not json</html>")]);

        let err = client(&base)
            .resolve_package(&NodeId::new("x"), None)
            .unwrap_err();
        assert!(matches!(err, DeptraceError::RegistryError { .. }));
    }

    #[test]
    fn test_resolve_missing_version_is_not_found() {
        let (listener, base) = listen();
        serve(
            listener,
            vec![json(
                r#"{"info": {"version": "1.0"}, "releases": {"1.0": [
                    {"filename": "x-1.0-py3-none-any.whl", "url": "https://files/x-1.0.whl"}
                ]}}"#,
            )],
        );

        let err = client(&base)
            .resolve_package(&NodeId::new("x"), Some("9.9"))
            .unwrap_err();
        assert!(matches!(
            err,
            DeptraceError::VersionNotFound { ref version, .. } if version == "9.9"
        ));
    }

    #[test]
    fn test_download_404_is_fetch_error() {
        let (listener, base) = listen();
        serve(listener, vec![Reply::Status(404, Vec::new())]);

        let url = format!("{base}/files/x-1.0.whl");
        let err = client(&base).download_archive(&url).unwrap_err();
        assert!(matches!(
            err,
            DeptraceError::FetchError { url: ref failed, ref message }
                if *failed == url && message == "HTTP 404"
        ));
    }

    #[test]
    fn test_download_timeout_is_fetch_error() {
        let (listener, base) = listen();
        serve(listener, vec![Reply::Stall]);

        let url = format!("{base}/files/x-1.0.whl");
        let err = client(&base).download_archive(&url).unwrap_err();
        assert!(matches!(err, DeptraceError::FetchError { .. }));
    }

    #[test]
    fn test_build_unknown_root_over_http() {
        let (listener, base) = listen();
        serve(listener, vec![Reply::Status(404, Vec::new())]);

        let builder = DependencyGraphBuilder::new(client(&base), 2);
        let outcome = builder.build(&NodeId::new("Ghost"), None, None);

        let keys: Vec<&str> = outcome.graph.keys().map(NodeId::as_str).collect();
        assert_eq!(keys, vec!["ghost"]);
        assert!(outcome.graph.neighbours(&NodeId::new("ghost")).is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].error.is_not_found());
    }

    #[test]
    fn test_build_root_over_http() {
        let (listener, base) = listen();
        let document = format!(
            r#"{{"info": {{"version": "1.0"}}, "releases": {{"1.0": [
                {{"filename": "app-1.0-py3-none-any.whl", "url": "{base}/files/app-1.0.whl"}}
            ]}}}}"#
        );
        serve(
            listener,
            vec![
                json(&document),
                Reply::Status(200, wheel(&["Six>=1.0", "docs; extra == \"docs\""])),
            ],
        );

        let builder = DependencyGraphBuilder::new(client(&base), 0);
        let outcome = builder.build(&NodeId::new("app"), None, None);

        assert!(outcome.failures.is_empty());
        assert_eq!(
            outcome.graph.neighbours(&NodeId::new("app")),
            [NodeId::new("six")]
        );
    }
}
