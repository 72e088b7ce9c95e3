#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use repo_audience::config::CollectorConfig;
use repo_audience::progress::ProgressReporter;
use serde_json::{json, Value};
use std::path::Path;
use url::Url;

pub const OWNER: &str = "octo";
pub const REPO: &str = "widgets";

/// Config pointing at the mock server, writing into `output_dir`.
pub fn mock_config(server: &ServerGuard, output_dir: &Path) -> CollectorConfig {
    CollectorConfig::new(OWNER, REPO, "test_token")
        .expect("valid config")
        .with_api_base_url(Url::parse(&server.url()).expect("mock server url"))
        .with_output_dir(output_dir)
}

pub fn page_query(page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), "100".into()),
    ])
}

pub fn user_json(login: &str, id: u64) -> Value {
    json!({
        "login": login,
        "id": id,
        "avatar_url": format!("https://avatars.example.com/{}", login),
        "html_url": format!("https://github.com/{}", login),
    })
}

pub fn fork_json(login: &str, id: u64) -> Value {
    json!({
        "full_name": format!("{}/{}", login, REPO),
        "owner": user_json(login, id),
    })
}

pub fn repo_json(stargazers: u32, forks: u32) -> Value {
    json!({
        "name": REPO,
        "full_name": format!("{}/{}", OWNER, REPO),
        "html_url": format!("https://github.com/{}/{}", OWNER, REPO),
        "stargazers_count": stargazers,
        "forks_count": forks,
    })
}

pub fn user_detail_json(login: &str, name: Option<&str>, bio: Option<&str>) -> Value {
    json!({
        "login": login,
        "name": name,
        "html_url": format!("https://github.com/{}", login),
        "email": null,
        "company": "Acme, Inc.",
        "bio": bio,
    })
}

pub async fn mock_repo(server: &mut ServerGuard, stargazers: u32, forks: u32) -> Mock {
    server
        .mock("GET", format!("/repos/{}/{}", OWNER, REPO).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repo_json(stargazers, forks).to_string())
        .create_async()
        .await
}

pub async fn mock_page(server: &mut ServerGuard, listing: &str, page: u32, body: Value) -> Mock {
    server
        .mock("GET", format!("/repos/{}/{}/{}", OWNER, REPO, listing).as_str())
        .match_query(page_query(page))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_user(server: &mut ServerGuard, login: &str, status: usize, body: Value) -> Mock {
    server
        .mock("GET", format!("/users/{}", login).as_str())
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Reporter that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub starts: Vec<(String, Option<u64>)>,
    pub advanced: u64,
    pub collected: Vec<u64>,
    pub finished: usize,
}

impl ProgressReporter for RecordingProgress {
    fn start(&mut self, label: &str, total: Option<u64>) {
        self.starts.push((label.to_string(), total));
    }

    fn advance(&mut self, count: u64) {
        self.advanced += count;
    }

    fn collected(&mut self, count: u64) {
        self.collected.push(count);
    }

    fn finish(&mut self) {
        self.finished += 1;
    }
}
