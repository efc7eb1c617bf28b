//! Host API adapter tests against a mocked HTTP server.

use gitscribe::error::GitProviderError;
use gitscribe::git::{AzureDevOpsAdapter, GitHubAdapter, GitProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn github(server: &MockServer) -> GitHubAdapter {
    GitHubAdapter::new(
        "gh-token".to_string(),
        "acme".to_string(),
        "widgets".to_string(),
    )
    .with_base_url(server.uri())
}

fn azure(server: &MockServer) -> AzureDevOpsAdapter {
    AzureDevOpsAdapter::new(
        "az-token".to_string(),
        "acme".to_string(),
        "platform".to_string(),
        "widgets".to_string(),
    )
    .with_base_url(server.uri())
}

#[tokio::test]
async fn github_pull_request_parses_branch_pair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 7,
            "head": { "ref": "feat/login" },
            "base": { "ref": "main" },
            "html_url": "https://github.com/acme/widgets/pull/7"
        })))
        .mount(&server)
        .await;

    let info = github(&server).pull_request(7).await.unwrap();
    assert_eq!(info.number, 7);
    assert_eq!(info.from_branch, "feat/login");
    assert_eq!(info.to_branch, "main");
}

#[tokio::test]
async fn github_missing_pull_request_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found"
        })))
        .mount(&server)
        .await;

    let err = github(&server).pull_request(999).await.unwrap_err();
    assert!(matches!(err, GitProviderError::NotFound(_)));
    assert!(err.to_string().contains("not found or no access"));
}

#[tokio::test]
async fn github_forbidden_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/acme/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Resource not accessible by integration"
        })))
        .mount(&server)
        .await;

    let err = github(&server)
        .update_pull_request(7, "Title", "Body")
        .await
        .unwrap_err();
    assert!(matches!(err, GitProviderError::AuthFailed(_)));
    assert!(err.to_string().contains("invalid token or insufficient"));
}

#[tokio::test]
async fn github_update_sends_title_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/acme/widgets/pulls/7"))
        .and(body_partial_json(json!({
            "title": "New title",
            "body": "New body"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 7,
            "head": { "ref": "feat/login" },
            "base": { "ref": "main" },
            "html_url": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    github(&server)
        .update_pull_request(7, "New title", "New body")
        .await
        .unwrap();
}

#[tokio::test]
async fn github_create_returns_the_new_url() {
    let server = MockServer::start().await;
    // Duplicate check comes back empty, then the create goes through.
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls"))
        .and(query_param("state", "open"))
        .and(query_param("head", "acme:feat/login"))
        .and(query_param("base", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/pulls"))
        .and(body_partial_json(json!({
            "head": "feat/login",
            "base": "main",
            "title": "Add login",
            "body": "Adds the login flow."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 8,
            "head": { "ref": "feat/login" },
            "base": { "ref": "main" },
            "html_url": "https://github.com/acme/widgets/pull/8"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = github(&server)
        .create_pull_request("feat/login", "main", "Add login", "Adds the login flow.")
        .await
        .unwrap();
    assert_eq!(url, "https://github.com/acme/widgets/pull/8");
}

#[tokio::test]
async fn github_create_refuses_to_duplicate_an_open_pull_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls"))
        .and(query_param("state", "open"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "number": 12,
            "head": { "ref": "feat/login" },
            "base": { "ref": "main" },
            "html_url": "https://github.com/acme/widgets/pull/12"
        }])))
        .mount(&server)
        .await;
    // No POST mock mounted; a create attempt would fail loudly.

    let err = github(&server)
        .create_pull_request("feat/login", "main", "Add login", "Body")
        .await
        .unwrap_err();

    let GitProviderError::DuplicatePullRequest { number, .. } = err else {
        panic!("expected duplicate pull request error, got: {err}");
    };
    assert_eq!(number, 12);
    assert!(err.to_string().contains("--pr 12"));
}

#[tokio::test]
async fn azure_pull_request_strips_ref_prefixes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests/31",
        ))
        .and(query_param("api-version", "7.1-preview.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pullRequestId": 31,
            "sourceRefName": "refs/heads/feat/login",
            "targetRefName": "refs/heads/main",
            "url": "https://dev.azure.com/acme/platform/_apis/git/pullRequests/31"
        })))
        .mount(&server)
        .await;

    let info = azure(&server).pull_request(31).await.unwrap();
    assert_eq!(info.number, 31);
    assert_eq!(info.from_branch, "feat/login");
    assert_eq!(info.to_branch, "main");
}

#[tokio::test]
async fn azure_create_sends_full_ref_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests",
        ))
        .and(query_param("searchCriteria.status", "active"))
        .and(query_param(
            "searchCriteria.sourceRefName",
            "refs/heads/feat/login",
        ))
        .and(query_param("searchCriteria.targetRefName", "refs/heads/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests",
        ))
        .and(body_partial_json(json!({
            "sourceRefName": "refs/heads/feat/login",
            "targetRefName": "refs/heads/main",
            "title": "Add login",
            "description": "Adds the login flow."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "pullRequestId": 32,
            "sourceRefName": "refs/heads/feat/login",
            "targetRefName": "refs/heads/main",
            "url": "https://dev.azure.com/acme/platform/_apis/git/pullRequests/32"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = azure(&server)
        .create_pull_request("feat/login", "main", "Add login", "Adds the login flow.")
        .await
        .unwrap();
    assert!(url.ends_with("/pullRequests/32"));
}

#[tokio::test]
async fn azure_create_refuses_to_duplicate_an_active_pull_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests",
        ))
        .and(query_param("searchCriteria.status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "pullRequestId": 40,
                "sourceRefName": "refs/heads/feat/login",
                "targetRefName": "refs/heads/main",
                "url": null
            }]
        })))
        .mount(&server)
        .await;

    let err = azure(&server)
        .create_pull_request("feat/login", "main", "Add login", "Body")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GitProviderError::DuplicatePullRequest { number: 40, .. }
    ));
}

#[tokio::test]
async fn azure_update_uses_description_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests/31",
        ))
        .and(body_partial_json(json!({
            "title": "New title",
            "description": "New body"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pullRequestId": 31,
            "sourceRefName": "refs/heads/feat/login",
            "targetRefName": "refs/heads/main",
            "url": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    azure(&server)
        .update_pull_request(31, "New title", "New body")
        .await
        .unwrap();
}

#[tokio::test]
async fn azure_missing_repository_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests/99",
        ))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "TF401180: The requested pull request was not found."
        })))
        .mount(&server)
        .await;

    let err = azure(&server).pull_request(99).await.unwrap_err();
    assert!(matches!(err, GitProviderError::NotFound(_)));
}

#[tokio::test]
async fn azure_unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/acme/platform/_apis/git/repositories/widgets/pullrequests/31",
        ))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = azure(&server).pull_request(31).await.unwrap_err();
    assert!(matches!(err, GitProviderError::AuthFailed(_)));
}

#[tokio::test]
async fn github_server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&server)
        .await;

    let err = github(&server).pull_request(7).await.unwrap_err();
    let GitProviderError::ApiError {
        host,
        status,
        message,
    } = err
    else {
        panic!("expected api error, got: {err}");
    };
    assert_eq!(host, "GitHub");
    assert_eq!(status, 500);
    assert_eq!(message, "Server Error");
}
