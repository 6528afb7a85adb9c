use crate::client::SocialClient;
use crate::error::Result;
use crate::store::Resource;
use async_trait::async_trait;
use common_lib::domain::common::{CommentsResult, CreateComment, UpdateComment};
use common_lib::{validation, Comment};

#[async_trait]
pub trait CommentApi {
    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>>;

    /// Returns the post's comments as cached after the call.
    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Vec<Comment>>;

    async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Option<Comment>>;

    async fn delete_comment(&self, comment_id: &str) -> Result<()>;
}

#[async_trait]
impl CommentApi for SocialClient {
    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.track(Resource::Comments, async {
            let token = self.optional_token();

            let result: CommentsResult = self
                .api()
                .get_request(
                    "comments-list",
                    &format!("/posts/{post_id}/comments"),
                    token.as_deref(),
                )
                .await
                .json("Failed to load comments")
                .await?;

            let comments = result.comments.unwrap_or_default();
            self.store()
                .with_state(|state| state.set_comments(post_id, comments.clone()));
            Ok(comments)
        })
        .await
    }

    async fn create_comment(&self, post_id: &str, content: &str) -> Result<Vec<Comment>> {
        self.track(Resource::Comments, async {
            let token = self.token()?;
            let content = validation::comment_content(content)?;
            log::info!(
                "add comment - post id: {post_id}, length: {}",
                content.chars().count()
            );

            let request = CreateComment {
                content,
                post: post_id.to_string(),
            };
            let result: CommentsResult = self
                .api()
                .post_request("comment-add", "/comments", Some(&token), &request)
                .await
                .json("Failed to post comment")
                .await?;

            self.store().with_state(|state| {
                match (result.comments, result.comment) {
                    (Some(comments), _) => state.set_comments(post_id, comments),
                    (None, Some(comment)) => state.comment_added(post_id, comment),
                    (None, None) => {}
                }
            });
            self.notify_success("Comment posted successfully");
            Ok(self.store().with_state(|state| state.comments_for(post_id)))
        })
        .await
    }

    async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Option<Comment>> {
        self.track(Resource::Comments, async {
            let token = self.token()?;
            let content = validation::edited_comment_content(content)?;
            log::info!("update comment - comment id: {comment_id}");

            let result: CommentsResult = self
                .api()
                .put_request(
                    "comment-update",
                    &format!("/comments/{comment_id}"),
                    Some(&token),
                    &UpdateComment {
                        content: content.clone(),
                    },
                )
                .await
                .json("Failed to update comment")
                .await?;

            self.store()
                .with_state(|state| state.comment_content_updated(comment_id, &content));
            self.notify_success("Comment updated successfully");
            Ok(result.comment)
        })
        .await
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.track(Resource::Comments, async {
            let token = self.token()?;
            log::info!("remove comment - comment id: {comment_id}");

            self.api()
                .delete_request(
                    "comment-delete",
                    &format!("/comments/{comment_id}"),
                    Some(&token),
                )
                .await
                .ok("Failed to delete comment")
                .await?;

            self.store()
                .with_state(|state| state.comment_deleted(comment_id));
            self.notify_success("Comment deleted successfully");
            Ok(())
        })
        .await
    }
}
