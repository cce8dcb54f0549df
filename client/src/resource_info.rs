//! Reading [`ResourceInfo`] off HTTP responses.
use crate::fetch::{Fetcher, Request, Response};
use crate::{ClientError, FetchError, Result};
use http::header::{CONTENT_TYPE, LINK};
use http::{Method, StatusCode};
use solid_dataset::{Access, ResourceInfo, WacPermissions};
use solid_link::Link;
use std::collections::BTreeMap;
use url::Url;

/// The content types that are not raw data.
const RDF_CONTENT_TYPES: [&str; 2] = ["text/turtle", "application/ld+json"];

/// Options of [`response_to_resource_info`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ResourceInfoOptions {
    ignore_authentication_errors: bool,
}

impl ResourceInfoOptions {
    /// Fail on every unsuccessful response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `401` or `403` response still yields metadata
    /// (the headers of such a response are still meaningful).
    pub fn with_ignore_authentication_errors(mut self, ignore: bool) -> Self {
        self.ignore_authentication_errors = ignore;
        self
    }
}

/// The metadata of the resource `response` was served from,
/// regardless of the status of the response.
pub fn resource_info_from_response(response: &Response) -> Result<ResourceInfo> {
    let source = response.url.clone();
    let content_type = response.header(CONTENT_TYPE).map(str::to_string);
    let is_raw_data = !content_type
        .as_deref()
        .map(mime_type)
        .is_some_and(|mime| RDF_CONTENT_TYPES.contains(&mime));
    let mut info = ResourceInfo {
        is_raw_data,
        content_type,
        ..ResourceInfo::new(source.clone())
    };

    let mut link = Link::new();
    for value in response.headers.get_all(LINK) {
        let Ok(value) = value.to_str() else {
            log::warn!("ignoring non-text Link header from {source}");
            continue;
        };
        let parsed = Link::parse(value).map_err(|source_err| ClientError::Link {
            url: source.clone(),
            source: source_err,
        })?;
        for link_ref in parsed.refs() {
            link.set(link_ref.clone());
        }
    }
    if !link.is_empty() {
        let acl_links = link.rel("acl");
        if let [acl_link] = acl_links[..] {
            info.acl_url = Some(resolve(&source, &acl_link.uri)?);
        }
        let mut linked: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for link_ref in link.refs() {
            // links without a relation type carry nothing we can key them by
            let Some(rel) = link_ref.rel() else { continue };
            linked
                .entry(rel.to_string())
                .or_default()
                .push(resolve(&source, &link_ref.uri)?);
        }
        info.linked_resources = linked;
    }

    if let Some(wac_allow) = response.header("wac-allow") {
        info.permissions = Some(WacPermissions {
            user: parse_wac_allow(wac_allow, "user"),
            public: parse_wac_allow(wac_allow, "public"),
        });
    }
    Ok(info)
}

/// Fetch the metadata of the resource at `url` with a `HEAD` request.
pub fn response_to_resource_info<F: Fetcher>(
    fetcher: &F,
    url: &str,
    options: &ResourceInfoOptions,
) -> Result<ResourceInfo> {
    log::debug!("HEAD {url}");
    let response = fetcher
        .fetch(url, Request::new(Method::HEAD))
        .map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;
    let is_auth_error = matches!(
        response.status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    );
    if !response.ok() && !(options.ignore_authentication_errors && is_auth_error) {
        return Err(FetchError::new(
            format!(
                "Fetching the metadata of the Resource at [{url}] failed: [{}] [{}].",
                response.status.as_u16(),
                response.status_text
            ),
            &response,
        )
        .into());
    }
    resource_info_from_response(&response)
}

/// The access modes granted to `scope` (`user` or `public`) in a `WAC-Allow` header value,
/// e.g. `user="read write", public="read"`.
///
/// Anything ambiguous or malformed grants nothing.
/// Granting `write` also grants `append`.
pub fn parse_wac_allow(header: &str, scope: &str) -> Access {
    let relevant: Vec<&str> = header
        .split(',')
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split('=').collect();
            match parts[..] {
                [key, value] if key.trim() == scope => Some(value.trim()),
                _ => None,
            }
        })
        .collect();
    let statement = match relevant[..] {
        [value] if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') => {
            &value[1..value.len() - 1]
        }
        _ => "",
    };
    let modes: Vec<&str> = statement.split(' ').collect();
    let write = modes.contains(&"write");
    Access {
        read: modes.contains(&"read"),
        append: write || modes.contains(&"append"),
        write,
        control: modes.contains(&"control"),
    }
}

/// The MIME type part of a `Content-Type` value.
pub(crate) fn mime_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

fn resolve(base: &str, reference: &str) -> Result<String> {
    Url::parse(base)
        .and_then(|base| base.join(reference))
        .map(String::from)
        .map_err(|source| ClientError::InvalidUrl {
            url: reference.to_string(),
            source,
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fetch::mock::{test_setup, MockFetcher};
    use test_case::test_case;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const URL: &str = "https://pod.example/movies/alien";

    fn access(read: bool, append: bool, write: bool, control: bool) -> Access {
        Access {
            read,
            append,
            write,
            control,
        }
    }

    #[test_case(r#"user="read write", public="read""#, "user" => access(true, true, true, false) ; "write implies append")]
    #[test_case(r#"user="read write", public="read""#, "public" => access(true, false, false, false) ; "public")]
    #[test_case(r#"user="append control""#, "user" => access(false, true, false, true) ; "append and control")]
    #[test_case(r#"user="read""#, "public" => Access::NONE ; "missing scope")]
    #[test_case(r#"user="read", user="write""#, "user" => Access::NONE ; "ambiguous scope")]
    #[test_case("user=read", "user" => Access::NONE ; "unquoted value")]
    #[test_case(r#"user"read""#, "user" => Access::NONE ; "missing equal sign")]
    #[test_case(r#" user = "read" "#, "user" => access(true, false, false, false) ; "whitespace around entry")]
    fn wac_allow(header: &str, scope: &str) -> Access {
        parse_wac_allow(header, scope)
    }

    #[test]
    fn metadata_from_headers() -> TestResult {
        let fetcher = MockFetcher::new().respond_with(
            200,
            &[
                ("content-type", "text/turtle; charset=UTF-8"),
                (
                    "link",
                    r#"<alien.acl>; rel="acl", <http://www.w3.org/ns/ldp#Resource>; rel="type""#,
                ),
                ("link", r#"</meta>; rel="describedby", <untyped>"#),
                ("wac-allow", r#"user="read write",public="read""#),
            ],
            "",
        );
        let info = response_to_resource_info(&fetcher, URL, &ResourceInfoOptions::new())?;
        assert_eq!(info.source_url(), URL);
        assert!(!info.is_raw_data);
        assert_eq!(info.content_type(), Some("text/turtle; charset=UTF-8"));
        assert_eq!(
            info.acl_url.as_deref(),
            Some("https://pod.example/movies/alien.acl")
        );
        assert_eq!(
            info.linked_resource_url_all("type"),
            ["http://www.w3.org/ns/ldp#Resource"]
        );
        assert_eq!(
            info.linked_resource_url_all("describedby"),
            ["https://pod.example/meta"]
        );
        assert_eq!(info.linked_resources.len(), 3);
        let permissions = info.permissions.ok_or("no permissions")?;
        assert!(permissions.user.append);
        assert!(!permissions.public.write);
        let requests = fetcher.requests();
        assert_eq!(requests[0].1.method, Method::HEAD);
        Ok(())
    }

    #[test_case(None => true ; "no content type")]
    #[test_case(Some("image/png") => true ; "binary")]
    #[test_case(Some("application/ld+json") => false ; "json-ld")]
    #[test_case(Some("text/turtle;charset=utf-8") => false ; "turtle with parameters")]
    fn raw_data(content_type: Option<&'static str>) -> bool {
        let mut response = Response::new(URL, StatusCode::OK);
        if let Some(ct) = content_type {
            response = response.with_header(CONTENT_TYPE, http::HeaderValue::from_static(ct));
        }
        resource_info_from_response(&response).unwrap().is_raw_data
    }

    #[test]
    fn several_acl_links_mean_no_acl() -> TestResult {
        let response = Response::new(URL, StatusCode::OK).with_header(
            LINK,
            http::HeaderValue::from_static(r#"<a.acl>; rel="acl", <b.acl>; rel="acl""#),
        );
        let info = resource_info_from_response(&response)?;
        assert!(!info.has_accessible_acl());
        assert_eq!(info.linked_resource_url_all("acl").len(), 2);
        Ok(())
    }

    #[test]
    fn malformed_link_header() {
        let response = Response::new(URL, StatusCode::OK)
            .with_header(LINK, http::HeaderValue::from_static("acl"));
        assert!(matches!(
            resource_info_from_response(&response),
            Err(ClientError::Link { .. })
        ));
    }

    #[test]
    fn unsuccessful_response() {
        test_setup();
        let fetcher = MockFetcher::new().respond_with(404, &[], "");
        let err = response_to_resource_info(&fetcher, URL, &ResourceInfoOptions::new()).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            err.to_string(),
            format!("Fetching the metadata of the Resource at [{URL}] failed: [404] [Not Found].")
        );
    }

    #[test_case(401 ; "unauthorized")]
    #[test_case(403 ; "forbidden")]
    fn authentication_errors_can_be_ignored(status: u16) -> TestResult {
        let options = ResourceInfoOptions::new().with_ignore_authentication_errors(true);
        let fetcher = MockFetcher::new()
            .respond_with(status, &[("wac-allow", r#"public="read""#)], "")
            .respond_with(status, &[], "");
        let info = response_to_resource_info(&fetcher, URL, &options)?;
        assert!(info.permissions.ok_or("no permissions")?.public.read);
        assert!(response_to_resource_info(&fetcher, URL, &ResourceInfoOptions::new()).is_err());
        Ok(())
    }

    #[test]
    fn transport_errors() {
        let fetcher = MockFetcher::new();
        assert!(matches!(
            response_to_resource_info(&fetcher, URL, &ResourceInfoOptions::new()),
            Err(ClientError::Transport { .. })
        ));
    }
}
