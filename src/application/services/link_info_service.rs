//! Link info retrieval: resolve, authorize, attach tags, present.

use std::sync::Arc;

use serde_json::json;

use crate::application::transform::{LinkTransformer, PublicLink, TransformOptions};
use crate::domain::entities::{
    FolderAccess, FolderPermission, Link, LinkWithTags, Tag, TagEntry, WorkspaceContext,
};
use crate::domain::lookup::LinkLookup;
use crate::domain::repositories::{FolderAccessRepository, LinkRepository, TagRepository};
use crate::error::AppError;

/// Service answering "what is this link?" for an authenticated workspace.
///
/// Each call is a single sequential pass. Every step depends on the previous
/// one, and tags are never read before the folder gate has let the request
/// through, so a denied caller learns nothing about the link's tags.
pub struct LinkInfoService {
    link_repository: Arc<dyn LinkRepository>,
    folder_access_repository: Arc<dyn FolderAccessRepository>,
    tag_repository: Arc<dyn TagRepository>,
    transformer: Arc<dyn LinkTransformer>,
}

impl LinkInfoService {
    /// Creates a new link info service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        folder_access_repository: Arc<dyn FolderAccessRepository>,
        tag_repository: Arc<dyn TagRepository>,
        transformer: Arc<dyn LinkTransformer>,
    ) -> Self {
        Self {
            link_repository,
            folder_access_repository,
            tag_repository,
            transformer,
        }
    }

    /// Returns the public representation of the link identified by `lookup`.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] / [`AppError::AmbiguousMatch`] from link resolution
    /// - [`AppError::Forbidden`] if the link sits in a folder the caller can't read
    /// - Any error raised by the folder authorizer, tag listing or transformer
    pub async fn get_link_info(
        &self,
        ctx: &WorkspaceContext,
        lookup: &LinkLookup,
    ) -> Result<PublicLink, AppError> {
        let link = self.resolve(ctx, lookup).await?;

        let access = self.check_folder_access(ctx, &link).await?;
        if !access.permits() {
            tracing::info!(
                link_id = %link.id,
                folder_id = ?link.folder_id,
                user_id = %ctx.user_id,
                "Folder access denied"
            );
            return Err(AppError::forbidden(
                "You are not allowed to read links in this folder.",
                json!({
                    "folder_id": link.folder_id,
                    "required_permission": FolderPermission::FoldersRead.as_str(),
                }),
            ));
        }

        let tags = self.collect_tags(&link).await?;

        self.assemble(link, tags)
    }

    /// Resolves the lookup to a single link inside the caller's workspace.
    ///
    /// Resolver failures are returned untouched.
    pub async fn resolve(
        &self,
        ctx: &WorkspaceContext,
        lookup: &LinkLookup,
    ) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .resolve(lookup, &ctx.workspace.id)
            .await?;

        tracing::debug!(link_id = %link.id, workspace_id = %ctx.workspace.id, "Link resolved");

        Ok(link)
    }

    /// Runs the folder gate for `link`.
    ///
    /// Links without a folder end in [`FolderAccess::Skipped`] and the
    /// authorizer is not consulted.
    pub async fn check_folder_access(
        &self,
        ctx: &WorkspaceContext,
        link: &Link,
    ) -> Result<FolderAccess, AppError> {
        let gate = FolderAccess::Unchecked;

        let Some(folder_id) = link.folder_id.as_deref() else {
            return Ok(gate.skip());
        };

        let decision = self
            .folder_access_repository
            .check_folder_access(
                &ctx.workspace,
                &ctx.user_id,
                folder_id,
                FolderPermission::FoldersRead,
            )
            .await?;

        let access = gate.decide(decision);
        tracing::debug!(link_id = %link.id, folder_id, ?access, "Folder access checked");

        Ok(access)
    }

    /// Fetches the tags attached to `link`.
    pub async fn collect_tags(&self, link: &Link) -> Result<Vec<Tag>, AppError> {
        let tags = self.tag_repository.list_for_link(&link.id).await?;

        tracing::debug!(link_id = %link.id, count = tags.len(), "Tags collected");

        Ok(tags)
    }

    /// Attaches `tags` to `link` and hands it to the transformer with key
    /// decoding disabled.
    pub fn assemble(&self, link: Link, tags: Vec<Tag>) -> Result<PublicLink, AppError> {
        let link = LinkWithTags {
            link,
            tags: tags.into_iter().map(TagEntry::from).collect(),
        };

        self.transformer.transform(
            link,
            TransformOptions {
                skip_decode_key: true,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::transform::{MockLinkTransformer, PublicLinkTransformer};
    use crate::domain::entities::AccessDecision;
    use crate::domain::entities::link::sample_link;
    use crate::domain::entities::workspace::sample_context;
    use crate::domain::repositories::{
        MockFolderAccessRepository, MockLinkRepository, MockTagRepository,
    };

    fn tag(id: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name: format!("Tag {id}"),
            color: "green".to_string(),
        }
    }

    fn lookup_by_id(id: &str) -> LinkLookup {
        LinkLookup::from_parts(None, None, Some(id.to_string()), None).unwrap()
    }

    fn service(
        links: MockLinkRepository,
        folders: MockFolderAccessRepository,
        tags: MockTagRepository,
    ) -> LinkInfoService {
        LinkInfoService::new(
            Arc::new(links),
            Arc::new(folders),
            Arc::new(tags),
            Arc::new(PublicLinkTransformer),
        )
    }

    #[tokio::test]
    async fn test_folderless_link_with_tags() {
        let mut links = MockLinkRepository::new();
        let mut folders = MockFolderAccessRepository::new();
        let mut tags = MockTagRepository::new();

        links
            .expect_resolve()
            .withf(|lookup, workspace_id| lookup.link_id() == Some("abc") && workspace_id == "ws1")
            .times(1)
            .returning(|_, _| Ok(sample_link("abc")));

        folders.expect_check_folder_access().never();

        tags.expect_list_for_link()
            .withf(|link_id| link_id == "abc")
            .times(1)
            .returning(|_| Ok(vec![tag("t1"), tag("t2")]));

        let result = service(links, folders, tags)
            .get_link_info(&sample_context(), &lookup_by_id("abc"))
            .await
            .unwrap();

        assert_eq!(result.id, "abc");
        let ids: Vec<_> = result.tags.iter().map(|e| e.tag.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[tokio::test]
    async fn test_denied_folder_never_fetches_tags() {
        let mut links = MockLinkRepository::new();
        let mut folders = MockFolderAccessRepository::new();
        let mut tags = MockTagRepository::new();

        links.expect_resolve().times(1).returning(|_, _| {
            let mut link = sample_link("abc");
            link.external_id = Some("ext1".to_string());
            link.folder_id = Some("f1".to_string());
            Ok(link)
        });

        folders
            .expect_check_folder_access()
            .withf(|workspace, user_id, folder_id, permission| {
                workspace.id == "ws1"
                    && user_id == "user1"
                    && folder_id == "f1"
                    && *permission == FolderPermission::FoldersRead
            })
            .times(1)
            .returning(|_, _, _, _| Ok(AccessDecision::Deny));

        tags.expect_list_for_link().never();

        let lookup = LinkLookup::from_parts(None, None, None, Some("ext1".to_string())).unwrap();
        let err = service(links, folders, tags)
            .get_link_info(&sample_context(), &lookup)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_allowed_folder_continues() {
        let mut links = MockLinkRepository::new();
        let mut folders = MockFolderAccessRepository::new();
        let mut tags = MockTagRepository::new();

        links.expect_resolve().returning(|_, _| {
            let mut link = sample_link("abc");
            link.folder_id = Some("f1".to_string());
            Ok(link)
        });
        folders
            .expect_check_folder_access()
            .times(1)
            .returning(|_, _, _, _| Ok(AccessDecision::Allow));
        tags.expect_list_for_link()
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = service(links, folders, tags)
            .get_link_info(&sample_context(), &lookup_by_id("abc"))
            .await
            .unwrap();

        assert_eq!(result.folder_id.as_deref(), Some("f1"));
        assert!(result.tags.is_empty());
    }

    #[tokio::test]
    async fn test_gate_skipped_distinct_from_allowed() {
        let mut folders = MockFolderAccessRepository::new();
        folders
            .expect_check_folder_access()
            .times(1)
            .returning(|_, _, _, _| Ok(AccessDecision::Allow));

        let svc = service(MockLinkRepository::new(), folders, MockTagRepository::new());
        let ctx = sample_context();

        let folderless = sample_link("a");
        let mut filed = sample_link("b");
        filed.folder_id = Some("f1".to_string());

        assert_eq!(
            svc.check_folder_access(&ctx, &folderless).await.unwrap(),
            FolderAccess::Skipped
        );
        assert_eq!(
            svc.check_folder_access(&ctx, &filed).await.unwrap(),
            FolderAccess::Allowed
        );
    }

    #[tokio::test]
    async fn test_resolver_errors_propagate_unchanged() {
        let mut links = MockLinkRepository::new();
        let mut folders = MockFolderAccessRepository::new();
        let mut tags = MockTagRepository::new();

        links
            .expect_resolve()
            .returning(|_, _| Err(AppError::not_found("Link not found.", json!({}))));
        folders.expect_check_folder_access().never();
        tags.expect_list_for_link().never();

        let lookup =
            LinkLookup::from_parts(Some("x.co".into()), Some("y".into()), None, None).unwrap();
        let err = service(links, folders, tags)
            .get_link_info(&sample_context(), &lookup)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Link not found.");
    }

    #[tokio::test]
    async fn test_ambiguous_match_propagates() {
        let mut links = MockLinkRepository::new();
        links
            .expect_resolve()
            .returning(|_, _| Err(AppError::ambiguous_match("Multiple links match", json!({}))));

        let lookup = LinkLookup::from_parts(None, Some("y".into()), None, None).unwrap();
        let err = service(
            links,
            MockFolderAccessRepository::new(),
            MockTagRepository::new(),
        )
        .get_link_info(&sample_context(), &lookup)
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::AmbiguousMatch { .. }));
    }

    #[tokio::test]
    async fn test_folder_authorizer_error_propagates() {
        let mut links = MockLinkRepository::new();
        let mut folders = MockFolderAccessRepository::new();
        let mut tags = MockTagRepository::new();

        links.expect_resolve().returning(|_, _| {
            let mut link = sample_link("abc");
            link.folder_id = Some("gone".to_string());
            Ok(link)
        });
        folders
            .expect_check_folder_access()
            .returning(|_, _, _, _| Err(AppError::not_found("Folder not found.", json!({}))));
        tags.expect_list_for_link().never();

        let err = service(links, folders, tags)
            .get_link_info(&sample_context(), &lookup_by_id("abc"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_assemble_always_skips_key_decoding() {
        let mut transformer = MockLinkTransformer::new();
        transformer
            .expect_transform()
            .withf(|link, options| {
                options.skip_decode_key && link.tags.len() == 1 && link.tags[0].tag.id == "t1"
            })
            .times(1)
            .returning(|link, options| PublicLinkTransformer.transform(link, options));

        let svc = LinkInfoService::new(
            Arc::new(MockLinkRepository::new()),
            Arc::new(MockFolderAccessRepository::new()),
            Arc::new(MockTagRepository::new()),
            Arc::new(transformer),
        );

        let mut link = sample_link("abc");
        link.key = "Hello%20World".to_string();

        let public = svc.assemble(link, vec![tag("t1")]).unwrap();

        assert_eq!(public.key, "Hello%20World");
    }
}
