//! [`SolidClient`]: reading and writing [`SolidDataset`]s over a [`Fetcher`].
use crate::fetch::{Fetcher, Request, Response};
use crate::parse::{response_to_solid_dataset, ParseOptions};
use crate::resource_info::{
    resource_info_from_response, response_to_resource_info, ResourceInfoOptions,
};
use crate::turtle::{serialize_turtle, TURTLE};
use crate::{ClientError, FetchError, Result};
use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE, IF_NONE_MATCH, LINK};
use http::{Method, StatusCode};
use solid_dataset::markdown::{change_log_as_markdown, solid_dataset_as_markdown};
use solid_dataset::{ChangeLog, HasResourceInfo, ResourceInfo, SolidDataset, ThingQuery};
use solid_term::ns::ldp;
use solid_term::{DataFactory, Quad};
use url::Url;

/// The body of the 409 response of servers refusing to create containers with `PUT`.
const CONTAINER_PUT_UNSUPPORTED: &str =
    "Can't write file: PUT not supported on containers, use POST instead";

const SPARQL_UPDATE: &str = "application/sparql-update";

/// Options of [`SolidClient::create_container_at`].
#[derive(Clone, Debug, Default)]
pub struct ContainerOptions {
    initial_content: Option<SolidDataset>,
}

impl ContainerOptions {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the container with `content` as its description.
    pub fn with_initial_content(mut self, content: SolidDataset) -> Self {
        self.initial_content = Some(content);
        self
    }
}

/// Reads and writes resources of a Solid Pod through a [`Fetcher`].
///
/// ```
/// # use solid_client::{SolidClient, fetch::NoFetcher};
/// let client = SolidClient::new(NoFetcher);
/// assert!(client.get_solid_dataset("https://pod.example/movies").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct SolidClient<F> {
    fetcher: F,
    parse_options: ParseOptions,
}

impl<F: Fetcher> SolidClient<F> {
    /// A client sending its requests through `fetcher`.
    pub fn new(fetcher: F) -> Self {
        SolidClient {
            fetcher,
            parse_options: ParseOptions::default(),
        }
    }

    /// Replace the options used to parse fetched documents.
    #[must_use]
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The options used to parse fetched documents.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    pub(crate) fn send(&self, url: &str, request: Request) -> Result<Response> {
        log::debug!("{} {url}", request.method);
        let response = self
            .fetcher
            .fetch(url, request)
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;
        log::debug!("{url} answered {}", response.status);
        Ok(response)
    }

    /// The metadata of the resource at `url`, fetched with a `HEAD` request.
    pub fn get_resource_info(
        &self,
        url: &str,
        options: &ResourceInfoOptions,
    ) -> Result<ResourceInfo> {
        response_to_resource_info(&self.fetcher, url, options)
    }

    /// Fetch and parse the dataset at `url`.
    pub fn get_solid_dataset(&self, url: &str) -> Result<SolidDataset> {
        let accept = HeaderValue::from_str(&self.parse_options.accept_header())?;
        let response = self.send(url, Request::new(Method::GET).with_header(ACCEPT, accept))?;
        if !response.ok() {
            return Err(unsuccessful("Fetching the Resource", url, &response).into());
        }
        response_to_solid_dataset(&response, &self.parse_options)
    }

    /// Store `dataset` at `url`.
    ///
    /// If `dataset` was fetched from `url` (fragments aside),
    /// only its change log is sent, as a SPARQL Update `PATCH`;
    /// otherwise the whole dataset is sent with a `PUT`
    /// that fails if a resource already exists at `url`.
    ///
    /// The returned dataset has an empty change log,
    /// the metadata of the response,
    /// and its local nodes resolved against its new URL.
    /// An update with no change sends nothing and returns `dataset` as is.
    pub fn save_solid_dataset_at(
        &self,
        url: &str,
        dataset: &SolidDataset,
    ) -> Result<SolidDataset> {
        let is_update = is_update(dataset, url);
        if is_update && dataset.change_log().is_empty() {
            log::debug!("no change to save at {url}");
            return Ok(dataset.clone());
        }
        let request = if is_update {
            prepare_update(dataset.change_log())?
        } else {
            prepare_creation(dataset)?
        };
        let response = self.send(url, request)?;
        if !response.ok() {
            let diagnostics = if is_update {
                format!(
                    "The changes that were sent to the Pod are listed below.\n\n{}",
                    change_log_as_markdown(dataset)
                )
            } else {
                format!(
                    "The SolidDataset that was sent to the Pod is listed below.\n\n{}",
                    solid_dataset_as_markdown(dataset)
                )
            };
            let message = format!(
                "{}\n\n{diagnostics}",
                unsuccessful("Storing the Resource", url, &response).message
            );
            return Err(FetchError::new(message, &response).into());
        }
        let mut info = resource_info_from_response(&response)?;
        info.is_raw_data = false;
        let source = info.source_iri.clone();
        Ok(dataset
            .with_change_log(ChangeLog::new())
            .with_resource_info(info)
            .resolve_local_iris(&source))
    }

    /// Delete the resource at `url`.
    ///
    /// Use [`HasResourceInfo::source_url`] to delete a fetched dataset.
    pub fn delete_solid_dataset(&self, url: &str) -> Result<()> {
        let response = self.send(url, Request::new(Method::DELETE))?;
        if !response.ok() {
            return Err(unsuccessful("Deleting the SolidDataset", url, &response).into());
        }
        Ok(())
    }

    /// Create a container at `url` (a trailing `/` is added if missing).
    ///
    /// Fails if something already exists at `url`.
    pub fn create_container_at(
        &self,
        url: &str,
        options: &ContainerOptions,
    ) -> Result<SolidDataset> {
        let url = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{url}/")
        };
        let mut request = Request::new(Method::PUT)
            .with_header(ACCEPT, HeaderValue::from_static(TURTLE))
            .with_header(CONTENT_TYPE, HeaderValue::from_static(TURTLE))
            .with_header(IF_NONE_MATCH, HeaderValue::from_static("*"))
            .with_header(LINK, type_link(ldp::BasicContainer)?);
        if let Some(content) = &options.initial_content {
            request = request.with_body(dataset_to_turtle(content)?);
        }
        let response = self.send(&url, request)?;
        if !response.ok() {
            if is_container_put_unsupported(&response) {
                return self.create_container_with_dummy_at(&url);
            }
            let kind = match options.initial_content {
                None => "empty",
                Some(_) => "non-empty",
            };
            let action = format!("Creating the {kind} Container");
            return Err(unsuccessful(&action, &url, &response).into());
        }
        let info = resource_info_from_response(&response)?;
        let dataset = options.initial_content.clone().unwrap_or_default();
        Ok(dataset
            .with_change_log(ChangeLog::new())
            .with_resource_info(info))
    }

    /// Create a container on servers that refuse `PUT` on containers,
    /// by creating then deleting a resource inside it.
    fn create_container_with_dummy_at(&self, url: &str) -> Result<SolidDataset> {
        log::warn!("{url} does not support PUT on containers, creating a placeholder resource in it");
        match self.get_resource_info(url, &ResourceInfoOptions::new()) {
            Ok(_) => return Err(ClientError::ContainerExists(url.to_string())),
            Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => {}
            Err(err) => return Err(err),
        }
        let dummy_url = format!("{url}.dummy");
        let request = Request::new(Method::PUT)
            .with_header(ACCEPT, HeaderValue::from_static(TURTLE))
            .with_header(CONTENT_TYPE, HeaderValue::from_static(TURTLE));
        let response = self.send(&dummy_url, request)?;
        if !response.ok() {
            return Err(unsuccessful("Creating the empty Container", url, &response).into());
        }
        self.send(&dummy_url, Request::new(Method::DELETE))?;
        let response = self.send(url, Request::new(Method::HEAD))?;
        let info = resource_info_from_response(&response)?;
        Ok(SolidDataset::new()
            .with_change_log(ChangeLog::new())
            .with_resource_info(info))
    }
}

/// An empty dataset, not attached to any resource yet.
pub fn create_solid_dataset() -> SolidDataset {
    SolidDataset::new()
}

/// The URLs of the resources contained in the container `dataset` was fetched from.
pub fn get_contained_resource_url_all(dataset: &SolidDataset) -> Result<Vec<String>> {
    let Some(source) = dataset.source_url() else {
        return Ok(vec![]);
    };
    match dataset.get_thing(source, &ThingQuery::new())? {
        Some(container) => Ok(container.get_url_all(ldp::contains)?),
        None => Ok(vec![]),
    }
}

fn unsuccessful(action: &str, url: &str, response: &Response) -> FetchError {
    FetchError::new(
        format!(
            "{action} at [{url}] failed: [{}] [{}].",
            response.status.as_u16(),
            response.status_text
        ),
        response,
    )
}

fn is_container_put_unsupported(response: &Response) -> bool {
    response.status == StatusCode::CONFLICT
        && response.status_text == "Conflict"
        && response.body.trim() == CONTAINER_PUT_UNSUPPORTED
}

/// Whether saving `dataset` at `url` only needs to send its changes.
fn is_update(dataset: &SolidDataset, url: &str) -> bool {
    dataset
        .source_url()
        .is_some_and(|source| without_fragment(source) == without_fragment(url))
}

fn without_fragment(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.into()
        }
        Err(_) => url.split('#').next().unwrap_or_default().to_string(),
    }
}

fn prepare_update(change_log: &ChangeLog) -> Result<Request> {
    let delete = data_block("DELETE", change_log.deletions())?;
    let insert = data_block("INSERT", change_log.additions())?;
    Ok(Request::new(Method::PATCH)
        .with_header(CONTENT_TYPE, HeaderValue::from_static(SPARQL_UPDATE))
        .with_body(format!("{delete} {insert}")))
}

fn data_block(keyword: &str, quads: &[Quad]) -> Result<String> {
    if quads.is_empty() {
        return Ok(String::new());
    }
    let turtle = serialize_turtle(quads)?;
    Ok(format!("{keyword} DATA {{{}}};", turtle.trim()))
}

fn prepare_creation(dataset: &SolidDataset) -> Result<Request> {
    Ok(Request::new(Method::PUT)
        .with_header(CONTENT_TYPE, HeaderValue::from_static(TURTLE))
        .with_header(IF_NONE_MATCH, HeaderValue::from_static("*"))
        .with_header(LINK, type_link(ldp::Resource)?)
        .with_body(dataset_to_turtle(dataset)?))
}

fn dataset_to_turtle(dataset: &SolidDataset) -> Result<String> {
    let quads = dataset.to_quads(&DataFactory::new())?;
    Ok(serialize_turtle(&quads)?)
}

fn type_link(iri: &str) -> Result<HeaderValue> {
    Ok(HeaderValue::from_str(&format!("<{iri}>; rel=\"type\""))?)
}

#[cfg(test)]
mod test;
