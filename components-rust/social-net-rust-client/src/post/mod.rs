use crate::client::SocialClient;
use crate::comment::CommentApi;
use crate::common::attachment_part;
use crate::error::{ClientError, Result};
use crate::profile::ProfileApi;
use crate::store::Resource;
use async_trait::async_trait;
use common_lib::domain::common::{PostResult, PostsPage, UpdatePost};
use common_lib::{validation, Attachment, Comment, Post};
use reqwest::multipart::Form;
use reqwest::Method;

#[derive(Clone, Debug)]
pub struct NewPost {
    pub body: String,
    pub image: Option<Attachment>,
}

impl NewPost {
    pub fn text(body: impl Into<String>) -> Self {
        NewPost {
            body: body.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Attachment) -> Self {
        self.image = Some(image);
        self
    }
}

#[async_trait]
pub trait PostApi {
    async fn list_posts(&self, page: u32, limit: u32) -> Result<PostsPage>;

    async fn latest_posts(&self, limit: u32) -> Result<Vec<Post>>;

    async fn get_post(&self, post_id: &str) -> Result<Post>;

    /// Post and its comments, fetched concurrently.
    async fn open_post(&self, post_id: &str) -> Result<(Post, Vec<Comment>)>;

    async fn create_post(&self, post: NewPost) -> Result<Option<Post>>;

    async fn update_post(&self, post_id: &str, body: &str) -> Result<Option<Post>>;

    async fn delete_post(&self, post_id: &str) -> Result<()>;

    async fn user_posts(&self, user_id: &str, page: u32, limit: u32) -> Result<PostsPage>;

    async fn my_posts(&self, page: u32, limit: u32) -> Result<PostsPage>;
}

#[async_trait]
impl PostApi for SocialClient {
    async fn list_posts(&self, page: u32, limit: u32) -> Result<PostsPage> {
        let (page, limit) = (page.max(1), limit.max(1));
        self.track(Resource::Posts, async {
            let token = self.optional_token();

            let result: PostsPage = self
                .api()
                .get_request(
                    "posts-list",
                    &format!("/posts?page={page}&limit={limit}"),
                    token.as_deref(),
                )
                .await
                .json("Failed to fetch posts")
                .await?;

            log::debug!(
                "list posts - page: {page}, limit: {limit}, received: {}",
                result.posts.len()
            );
            self.store()
                .with_state(|state| state.set_posts_page(&result, page));
            Ok(self.store().with_state(|state| PostsPage {
                posts: state.posts.posts.clone(),
                pagination_info: result.pagination_info.clone(),
            }))
        })
        .await
    }

    async fn latest_posts(&self, limit: u32) -> Result<Vec<Post>> {
        let limit = limit.max(1);
        self.track(Resource::Posts, async {
            let token = self.optional_token();

            let result: PostsPage = self
                .api()
                .get_request(
                    "posts-latest",
                    &format!("/posts?sort=-createdAt&limit={limit}"),
                    token.as_deref(),
                )
                .await
                .json("Failed to fetch latest posts")
                .await?;

            self.store()
                .with_state(|state| state.set_latest_posts(result.posts));
            Ok(self
                .store()
                .with_state(|state| state.posts.latest_posts.clone()))
        })
        .await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post> {
        self.track(Resource::SinglePost, async {
            let token = self.optional_token();

            let result: PostResult = self
                .api()
                .get_request("post-get", &format!("/posts/{post_id}"), token.as_deref())
                .await
                .json("Failed to fetch post")
                .await?;
            let post = result
                .post
                .ok_or_else(|| ClientError::request(None, "Failed to fetch post"))?;

            self.store()
                .with_state(|state| state.set_single_post(post.clone()));
            Ok(post)
        })
        .await
    }

    async fn open_post(&self, post_id: &str) -> Result<(Post, Vec<Comment>)> {
        let (mut post, comments) =
            futures::future::try_join(self.get_post(post_id), self.list_comments(post_id))
                .await?;
        post.comments = comments.clone();
        self.store()
            .with_state(|state| state.set_comments(post_id, comments.clone()));
        Ok((post, comments))
    }

    async fn create_post(&self, post: NewPost) -> Result<Option<Post>> {
        self.track(Resource::CreatePost, async {
            let token = self.token()?;
            let body = validation::post_body(&post.body)?;
            if let Some(image) = &post.image {
                validation::post_image(image)?;
            }
            log::info!(
                "create post - length: {}, image: {}",
                body.chars().count(),
                post.image
                    .as_ref()
                    .map(|i| i.file_name.as_str())
                    .unwrap_or("N/A")
            );

            let mut form = Form::new().text("body", body);
            if let Some(image) = &post.image {
                form = form.part("image", attachment_part(image)?);
            }

            let result: PostResult = self
                .api()
                .multipart_request("post-create", Method::POST, "/posts", Some(&token), form)
                .await
                .json("Failed to create post")
                .await?;

            if let Some(created) = &result.post {
                self.store()
                    .with_state(|state| state.post_created(created.clone()));
            }
            self.notify_success("Post created successfully!");
            Ok(result.post)
        })
        .await
    }

    async fn update_post(&self, post_id: &str, body: &str) -> Result<Option<Post>> {
        self.track(Resource::Posts, async {
            let token = self.token()?;
            let body = validation::post_body(body)?;
            log::info!("update post - post id: {post_id}");

            let result: PostResult = self
                .api()
                .put_request(
                    "post-update",
                    &format!("/posts/{post_id}"),
                    Some(&token),
                    &UpdatePost { body: body.clone() },
                )
                .await
                .json("Failed to edit post")
                .await?;

            self.store()
                .with_state(|state| state.post_body_updated(post_id, &body));
            self.notify_success("Post updated successfully");
            Ok(result.post)
        })
        .await
    }

    async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.track(Resource::Posts, async {
            let token = self.token()?;
            log::info!("delete post - post id: {post_id}");

            self.api()
                .delete_request("post-delete", &format!("/posts/{post_id}"), Some(&token))
                .await
                .ok("Failed to delete post")
                .await?;

            self.store().with_state(|state| state.post_deleted(post_id));
            self.notify_success("Post deleted successfully");
            Ok(())
        })
        .await
    }

    async fn user_posts(&self, user_id: &str, page: u32, limit: u32) -> Result<PostsPage> {
        let (page, limit) = (page.max(1), limit.max(1));
        self.track(Resource::UserPosts, async {
            let token = self.token()?;

            let result: PostsPage = self
                .api()
                .get_request(
                    "user-posts-get",
                    &format!("/users/{user_id}/posts?page={page}&limit={limit}"),
                    Some(&token),
                )
                .await
                .json("Failed to fetch user posts")
                .await?;

            self.store()
                .with_state(|state| state.set_user_posts(user_id, &result, page));
            Ok(result)
        })
        .await
    }

    async fn my_posts(&self, page: u32, limit: u32) -> Result<PostsPage> {
        let (page, limit) = (page.max(1), limit.max(1));
        // Resolved before tracking so a profile failure is reported once.
        let user_id = match self.store().with_state(|state| state.current_user_id()) {
            Some(user_id) => user_id,
            None => self.get_profile().await?.user_id,
        };

        self.track(Resource::UserPosts, async {
            let token = self.token()?;

            let result: PostsPage = self
                .api()
                .get_request(
                    "my-posts-get",
                    &format!("/users/{user_id}/posts?page={page}&limit={limit}"),
                    Some(&token),
                )
                .await
                .json("Failed to fetch my posts")
                .await?;

            self.store()
                .with_state(|state| state.set_my_posts(&result, page));
            Ok(self.store().with_state(|state| PostsPage {
                posts: state.user_posts.my_posts.posts.clone(),
                pagination_info: result.pagination_info.clone(),
            }))
        })
        .await
    }
}
