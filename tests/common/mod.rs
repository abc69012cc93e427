#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use link_info::application::services::{AuthService, LinkInfoService};
use link_info::application::transform::PublicLinkTransformer;
use link_info::domain::entities::{
    AccessDecision, FolderPermission, Link, Tag, Workspace, WorkspaceContext,
};
use link_info::domain::lookup::LinkLookup;
use link_info::domain::repositories::{
    ApiToken, FolderAccessRepository, LinkRepository, NewApiToken, TagRepository,
    TokenRepository,
};
use link_info::error::AppError;
use link_info::state::AppState;
use link_info::utils::token_hash::hash_token;
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SIGNING_SECRET: &str = "test-signing-secret";

/// Token granted `links.read` in workspace `ws1`.
pub const READ_TOKEN: &str = "read-token";

/// Token of workspace `ws1` without any scope.
pub const NO_SCOPE_TOKEN: &str = "no-scope-token";

pub fn workspace() -> Workspace {
    Workspace {
        id: "ws1".to_string(),
        name: "Acme".to_string(),
        slug: "acme".to_string(),
    }
}

pub fn link(id: &str, domain: &str, key: &str) -> Link {
    let now = Utc::now();
    Link {
        id: id.to_string(),
        domain: domain.to_string(),
        key: key.to_string(),
        url: format!("https://example.com/{key}"),
        external_id: None,
        folder_id: None,
        workspace_id: "ws1".to_string(),
        archived: false,
        expires_at: None,
        clicks: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        color: "blue".to_string(),
    }
}

// ─── In-memory collaborators ─────────────────────────────────────────────────

/// Resolves against a fixed set of links, applying every selector as a filter.
/// A lone `domain` or `key` matches nothing.
#[derive(Default)]
pub struct FakeLinkRepository {
    links: Mutex<Vec<Link>>,
    pub calls: AtomicUsize,
}

impl FakeLinkRepository {
    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkRepository for FakeLinkRepository {
    async fn resolve(&self, lookup: &LinkLookup, workspace_id: &str) -> Result<Link, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (domain, key) = match lookup.domain_key() {
            Some((Some(domain), Some(key))) => (Some(domain), Some(key)),
            Some(_) => return Err(AppError::not_found("Link not found.", json!({}))),
            None => (None, None),
        };
        let matches: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.workspace_id == workspace_id)
            .filter(|l| domain.is_none_or(|d| l.domain == d))
            .filter(|l| key.is_none_or(|k| l.key == k))
            .filter(|l| lookup.link_id().is_none_or(|id| l.id == id))
            .filter(|l| {
                lookup
                    .external_id()
                    .is_none_or(|ext| l.external_id.as_deref() == Some(ext))
            })
            .cloned()
            .collect();

        match matches.as_slice() {
            [only] => Ok(only.clone()),
            [] => Err(AppError::not_found("Link not found.", json!({}))),
            _ => Err(AppError::ambiguous_match("Ambiguous", json!({}))),
        }
    }
}

/// Answers folder checks from a per-folder decision table.
#[derive(Default)]
pub struct FakeFolderAccessRepository {
    decisions: Mutex<HashMap<String, AccessDecision>>,
    pub requests: Mutex<Vec<(String, String, FolderPermission)>>,
}

impl FakeFolderAccessRepository {
    pub fn set(&self, folder_id: &str, decision: AccessDecision) {
        self.decisions
            .lock()
            .unwrap()
            .insert(folder_id.to_string(), decision);
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FolderAccessRepository for FakeFolderAccessRepository {
    async fn check_folder_access(
        &self,
        _workspace: &Workspace,
        user_id: &str,
        folder_id: &str,
        permission: FolderPermission,
    ) -> Result<AccessDecision, AppError> {
        self.requests.lock().unwrap().push((
            user_id.to_string(),
            folder_id.to_string(),
            permission,
        ));

        self.decisions
            .lock()
            .unwrap()
            .get(folder_id)
            .copied()
            .ok_or_else(|| AppError::not_found("Folder not found.", json!({})))
    }
}

#[derive(Default)]
pub struct FakeTagRepository {
    tags: Mutex<HashMap<String, Vec<Tag>>>,
    pub calls: AtomicUsize,
}

impl FakeTagRepository {
    pub fn attach(&self, link_id: &str, tag: Tag) {
        self.tags
            .lock()
            .unwrap()
            .entry(link_id.to_string())
            .or_default()
            .push(tag);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagRepository for FakeTagRepository {
    async fn list_for_link(&self, link_id: &str) -> Result<Vec<Tag>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tags
            .lock()
            .unwrap()
            .get(link_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Maps token hashes to contexts; management operations are not needed here.
#[derive(Default)]
pub struct FakeTokenRepository {
    contexts: Mutex<HashMap<String, WorkspaceContext>>,
}

impl FakeTokenRepository {
    pub fn issue(&self, raw_token: &str, scopes: &[&str]) {
        let ctx = WorkspaceContext {
            workspace: workspace(),
            user_id: "user1".to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        };
        self.contexts
            .lock()
            .unwrap()
            .insert(hash_token(SIGNING_SECRET, raw_token), ctx);
    }
}

#[async_trait]
impl TokenRepository for FakeTokenRepository {
    async fn find_context(&self, token_hash: &str) -> Result<Option<WorkspaceContext>, AppError> {
        Ok(self.contexts.lock().unwrap().get(token_hash).cloned())
    }

    async fn update_last_used(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_token(&self, _new_token: NewApiToken) -> Result<ApiToken, AppError> {
        unimplemented!("not used by handler tests")
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn revoke_token(&self, _id: i64) -> Result<(), AppError> {
        Ok(())
    }
}

/// Application state wired to in-memory collaborators.
pub struct TestApp {
    pub state: AppState,
    pub links: Arc<FakeLinkRepository>,
    pub folders: Arc<FakeFolderAccessRepository>,
    pub tags: Arc<FakeTagRepository>,
}

pub fn create_test_app() -> TestApp {
    let links = Arc::new(FakeLinkRepository::default());
    let folders = Arc::new(FakeFolderAccessRepository::default());
    let tags = Arc::new(FakeTagRepository::default());

    let tokens = Arc::new(FakeTokenRepository::default());
    tokens.issue(READ_TOKEN, &["links.read"]);
    tokens.issue(NO_SCOPE_TOKEN, &[]);

    let link_info_service = Arc::new(LinkInfoService::new(
        links.clone(),
        folders.clone(),
        tags.clone(),
        Arc::new(PublicLinkTransformer::new()),
    ));
    let auth_service = Arc::new(AuthService::new(tokens, SIGNING_SECRET.to_string()));

    TestApp {
        state: AppState::new(link_info_service, auth_service, None),
        links,
        folders,
        tags,
    }
}

// ─── Database fixtures ───────────────────────────────────────────────────────

pub async fn create_workspace(pool: &PgPool, id: &str, slug: &str) {
    sqlx::query("INSERT INTO workspaces (id, name, slug) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("Workspace {slug}"))
        .bind(slug)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_folder(pool: &PgPool, id: &str, workspace_id: &str, access_level: Option<&str>) {
    sqlx::query("INSERT INTO folders (id, workspace_id, name, access_level) VALUES ($1, $2, $1, $3)")
        .bind(id)
        .bind(workspace_id)
        .bind(access_level)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_folder_user(pool: &PgPool, folder_id: &str, user_id: &str, role: &str) {
    sqlx::query("INSERT INTO folder_users (folder_id, user_id, role) VALUES ($1, $2, $3)")
        .bind(folder_id)
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_link(
    pool: &PgPool,
    id: &str,
    workspace_id: &str,
    domain: &str,
    key: &str,
    external_id: Option<&str>,
    folder_id: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO links (id, domain, key, url, external_id, folder_id, workspace_id)
         VALUES ($1, $2, $3, 'https://example.com', $4, $5, $6)",
    )
    .bind(id)
    .bind(domain)
    .bind(key)
    .bind(external_id)
    .bind(folder_id)
    .bind(workspace_id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_tag(pool: &PgPool, id: &str, workspace_id: &str, name: &str) {
    sqlx::query("INSERT INTO tags (id, workspace_id, name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(workspace_id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn tag_link(pool: &PgPool, link_id: &str, tag_id: &str) {
    sqlx::query("INSERT INTO link_tags (link_id, tag_id) VALUES ($1, $2)")
        .bind(link_id)
        .bind(tag_id)
        .execute(pool)
        .await
        .unwrap();
}
