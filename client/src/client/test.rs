use super::*;
use crate::fetch::mock::{test_setup, MockFetcher};
use solid_dataset::Thing;

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

const MOVIES: &str = "https://pod.example/movies";
const NAME: &str = "https://schema.org/name";

const TURTLE_HEADERS: &[(&str, &str)] = &[
    ("content-type", "text/turtle"),
    ("link", r#"<movies.acl>; rel="acl""#),
];

fn fetched_movies(fetcher: &MockFetcher) -> Result<SolidDataset> {
    SolidClient::new(fetcher).get_solid_dataset(MOVIES)
}

#[test]
fn get_solid_dataset() -> TestResult {
    test_setup();
    let fetcher = MockFetcher::new().respond_with(
        200,
        TURTLE_HEADERS,
        r#"<#alien> <https://schema.org/name> "Alien" ."#,
    );
    let dataset = fetched_movies(&fetcher)?;
    assert_eq!(dataset.source_url(), Some(MOVIES));
    let info = dataset.resource_info().ok_or("no resource info")?;
    assert_eq!(info.acl_url.as_deref(), Some("https://pod.example/movies.acl"));
    assert!(dataset
        .get_thing("https://pod.example/movies#alien", &ThingQuery::new())?
        .is_some());

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    let (url, request) = &requests[0];
    assert_eq!(url, MOVIES);
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.header(ACCEPT), Some("text/turtle"));
    Ok(())
}

#[test]
fn get_missing_solid_dataset() {
    let fetcher = MockFetcher::new().respond_with(404, &[], "");
    let err = fetched_movies(&fetcher).unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        err.to_string(),
        format!("Fetching the Resource at [{MOVIES}] failed: [404] [Not Found].")
    );
}

#[test]
fn save_new_dataset() -> TestResult {
    test_setup();
    let draft = Thing::create_named("draft").set_string_no_locale(NAME, "Draft")?;
    let dataset = create_solid_dataset().set_thing(&draft)?;
    let fetcher = MockFetcher::new().respond_with(201, &[], "");
    let saved = SolidClient::new(&fetcher).save_solid_dataset_at(MOVIES, &dataset)?;

    let requests = fetcher.requests();
    let (url, request) = &requests[0];
    assert_eq!(url, MOVIES);
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.header(CONTENT_TYPE), Some("text/turtle"));
    assert_eq!(request.header(IF_NONE_MATCH), Some("*"));
    assert_eq!(
        request.header(LINK),
        Some(r#"<http://www.w3.org/ns/ldp#Resource>; rel="type""#)
    );
    let body = request.body.as_deref().ok_or("no body")?;
    assert!(body.contains("<#draft>"));
    assert!(body.contains("\"Draft\""));

    assert!(saved.change_log().is_empty());
    assert_eq!(saved.source_url(), Some(MOVIES));
    assert!(!saved.resource_info().ok_or("no resource info")?.is_raw_data);
    let draft = saved
        .get_thing("https://pod.example/movies#draft", &ThingQuery::new())?
        .ok_or("draft not resolved")?;
    assert_eq!(draft.get_string_no_locale(NAME)?.as_deref(), Some("Draft"));
    assert!(saved
        .get_thing_all(&ThingQuery::new())
        .iter()
        .all(|thing| !thing.is_local()));
    // the input is left untouched
    assert!(!dataset.change_log().is_empty());
    Ok(())
}

#[test]
fn save_fetched_dataset_sends_changes() -> TestResult {
    test_setup();
    let fetcher = MockFetcher::new()
        .respond_with(200, TURTLE_HEADERS, r#"<#alien> <https://schema.org/name> "Alien" ."#)
        .respond_with(200, &[], "");
    let dataset = fetched_movies(&fetcher)?;
    let alien = dataset
        .get_thing("https://pod.example/movies#alien", &ThingQuery::new())?
        .ok_or("missing thing")?
        .set_string_no_locale(NAME, "Aliens")?;
    let dataset = dataset.set_thing(&alien)?;
    let saved = SolidClient::new(&fetcher).save_solid_dataset_at("https://pod.example/movies#it", &dataset)?;

    let requests = fetcher.requests();
    let (_, request) = &requests[1];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.header(CONTENT_TYPE), Some("application/sparql-update"));
    assert_eq!(request.header(IF_NONE_MATCH), None);
    let body = request.body.as_deref().ok_or("no body")?;
    let (delete, insert) = body.split_once("}; ").ok_or("unexpected body")?;
    assert!(delete.starts_with("DELETE DATA {<https://pod.example/movies#alien>"));
    assert!(delete.contains("\"Alien\""));
    assert!(insert.starts_with("INSERT DATA {"));
    assert!(insert.contains("\"Aliens\""));
    assert!(insert.ends_with("};"));
    assert!(saved.change_log().is_empty());
    Ok(())
}

#[test]
fn patch_without_deletions() -> TestResult {
    let fetcher = MockFetcher::new()
        .respond_with(200, TURTLE_HEADERS, "")
        .respond_with(200, &[], "");
    let dataset = fetched_movies(&fetcher)?;
    let dataset = dataset.set_thing(&Thing::create_named("new").set_integer("https://schema.org/duration", 117)?)?;
    SolidClient::new(&fetcher).save_solid_dataset_at(MOVIES, &dataset)?;
    let requests = fetcher.requests();
    let body = requests[1].1.body.clone().ok_or("no body")?;
    assert!(body.starts_with(" INSERT DATA {<https://pod.example/movies#new>"));
    Ok(())
}

#[test]
fn saving_an_unchanged_dataset_sends_nothing() -> TestResult {
    let fetcher = MockFetcher::new().respond_with(200, TURTLE_HEADERS, r#"<#alien> <https://schema.org/name> "Alien" ."#);
    let dataset = fetched_movies(&fetcher)?;
    let saved = SolidClient::new(&fetcher).save_solid_dataset_at(MOVIES, &dataset)?;
    assert_eq!(saved, dataset);
    assert_eq!(fetcher.requests().len(), 1);
    Ok(())
}

#[test]
fn save_to_another_url_creates() -> TestResult {
    let fetcher = MockFetcher::new()
        .respond_with(200, TURTLE_HEADERS, r#"<#alien> <https://schema.org/name> "Alien" ."#)
        .respond_with(201, &[], "");
    let dataset = fetched_movies(&fetcher)?;
    SolidClient::new(&fetcher).save_solid_dataset_at("https://pod.example/copy", &dataset)?;
    let requests = fetcher.requests();
    assert_eq!(requests[1].1.method, Method::PUT);
    let body = requests[1].1.body.clone().ok_or("no body")?;
    assert!(body.contains("<https://pod.example/movies#alien>"));
    Ok(())
}

#[test]
fn failed_creation_lists_the_dataset() -> TestResult {
    let dataset = create_solid_dataset();
    let fetcher = MockFetcher::new().respond_with(403, &[], "");
    let err = SolidClient::new(&fetcher)
        .save_solid_dataset_at(MOVIES, &dataset)
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(
        err.to_string(),
        format!(
            "Storing the Resource at [{MOVIES}] failed: [403] [Forbidden].\n\n\
             The SolidDataset that was sent to the Pod is listed below.\n\n\
             # SolidDataset (no URL yet)\n\n<empty>\n"
        )
    );
    Ok(())
}

#[test]
fn failed_update_lists_the_changes() -> TestResult {
    let fetcher = MockFetcher::new()
        .respond_with(200, TURTLE_HEADERS, "")
        .respond_with(409, &[], "");
    let dataset = fetched_movies(&fetcher)?;
    let dataset = dataset.set_thing(&Thing::create_named("new").add_string_no_locale(NAME, "New")?)?;
    let err = SolidClient::new(&fetcher)
        .save_solid_dataset_at(MOVIES, &dataset)
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("https://schema.org/name"));
    assert!(message.starts_with(&format!(
        "Storing the Resource at [{MOVIES}] failed: [409] [Conflict].\n\n\
         The changes that were sent to the Pod are listed below.\n\n\
         ## Changes compared to {MOVIES}"
    )));
    Ok(())
}

#[test]
fn delete_solid_dataset() -> TestResult {
    let fetcher = MockFetcher::new()
        .respond_with(204, &[], "")
        .respond_with(500, &[], "");
    let client = SolidClient::new(&fetcher);
    client.delete_solid_dataset(MOVIES)?;
    let err = client.delete_solid_dataset(MOVIES).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Deleting the SolidDataset at [{MOVIES}] failed: [500] [Internal Server Error].")
    );
    assert_eq!(fetcher.requests()[0].1.method, Method::DELETE);
    Ok(())
}

#[test]
fn create_container() -> TestResult {
    let fetcher = MockFetcher::new().respond_with(201, TURTLE_HEADERS, "");
    let container = SolidClient::new(&fetcher).create_container_at(MOVIES, &ContainerOptions::new())?;
    assert_eq!(container.source_url(), Some("https://pod.example/movies/"));
    assert!(container.get_thing_all(&ThingQuery::new()).is_empty());

    let requests = fetcher.requests();
    let (url, request) = &requests[0];
    assert_eq!(url, "https://pod.example/movies/");
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.header(ACCEPT), Some("text/turtle"));
    assert_eq!(request.header(CONTENT_TYPE), Some("text/turtle"));
    assert_eq!(request.header(IF_NONE_MATCH), Some("*"));
    assert_eq!(
        request.header(LINK),
        Some(r#"<http://www.w3.org/ns/ldp#BasicContainer>; rel="type""#)
    );
    assert_eq!(request.body, None);
    Ok(())
}

#[test]
fn create_non_empty_container() -> TestResult {
    let content = create_solid_dataset()
        .set_thing(&Thing::create_named("about").set_string_no_locale(NAME, "Movies")?)?;
    let options = ContainerOptions::new().with_initial_content(content);
    let fetcher = MockFetcher::new()
        .respond_with(201, &[], "")
        .respond_with(500, &[], "");
    let client = SolidClient::new(&fetcher);
    let container = client.create_container_at("https://pod.example/movies/", &options)?;
    assert!(container.change_log().is_empty());
    assert_eq!(container.get_thing_all(&ThingQuery::new()).len(), 1);
    let body = fetcher.requests()[0].1.body.clone().ok_or("no body")?;
    assert!(body.contains("<#about>"));

    let err = client.create_container_at(MOVIES, &options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Creating the non-empty Container at [https://pod.example/movies/] failed: [500] [Internal Server Error]."
    );
    Ok(())
}

#[test]
fn create_container_with_placeholder_resource() -> TestResult {
    test_setup();
    let fetcher = MockFetcher::new()
        .respond_with(409, &[], "Can't write file: PUT not supported on containers, use POST instead\n")
        .respond_with(404, &[], "")
        .respond_with(201, &[], "")
        .respond_with(204, &[], "")
        .respond_with(200, TURTLE_HEADERS, "");
    let container = SolidClient::new(&fetcher).create_container_at(MOVIES, &ContainerOptions::new())?;
    assert_eq!(
        container.resource_info().and_then(|info| info.acl_url.as_deref()),
        Some("https://pod.example/movies/movies.acl")
    );
    let sent: Vec<(String, Method)> = fetcher
        .requests()
        .into_iter()
        .map(|(url, request)| (url, request.method))
        .collect();
    let container_url = "https://pod.example/movies/".to_string();
    let dummy_url = "https://pod.example/movies/.dummy".to_string();
    assert_eq!(
        sent,
        [
            (container_url.clone(), Method::PUT),
            (container_url.clone(), Method::HEAD),
            (dummy_url.clone(), Method::PUT),
            (dummy_url, Method::DELETE),
            (container_url, Method::HEAD),
        ]
    );
    Ok(())
}

#[test]
fn placeholder_path_detects_existing_container() {
    let fetcher = MockFetcher::new()
        .respond_with(409, &[], "Can't write file: PUT not supported on containers, use POST instead")
        .respond_with(200, &[], "");
    let err = SolidClient::new(&fetcher)
        .create_container_at(MOVIES, &ContainerOptions::new())
        .unwrap_err();
    assert!(matches!(err, ClientError::ContainerExists(url) if url == "https://pod.example/movies/"));
}

#[test]
fn placeholder_path_propagates_other_errors() {
    let fetcher = MockFetcher::new()
        .respond_with(409, &[], "Can't write file: PUT not supported on containers, use POST instead")
        .respond_with(500, &[], "");
    let err = SolidClient::new(&fetcher)
        .create_container_at(MOVIES, &ContainerOptions::new())
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[test]
fn other_conflicts_are_errors() {
    let fetcher = MockFetcher::new().respond_with(409, &[], "already exists");
    let err = SolidClient::new(&fetcher)
        .create_container_at(MOVIES, &ContainerOptions::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Creating the empty Container at [https://pod.example/movies/] failed: [409] [Conflict]."
    );
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn contained_resources() -> TestResult {
    let fetcher = MockFetcher::new().respond_with(
        200,
        &[("content-type", "text/turtle")],
        "<> <http://www.w3.org/ns/ldp#contains> <alien>, <blade-runner/> .",
    );
    let container = SolidClient::new(&fetcher).get_solid_dataset("https://pod.example/movies/")?;
    let mut urls = get_contained_resource_url_all(&container)?;
    urls.sort();
    assert_eq!(
        urls,
        [
            "https://pod.example/movies/alien",
            "https://pod.example/movies/blade-runner/"
        ]
    );
    assert!(get_contained_resource_url_all(&create_solid_dataset())?.is_empty());
    Ok(())
}
