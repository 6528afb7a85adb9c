//! Client-side mirror of server resources.
//!
//! Every slice holds whatever the last successful response said; there is no
//! eviction and no reconciliation with other clients.

use common_lib::domain::common::PostsPage;
use common_lib::{Comment, Post, User};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Auth,
    Profile,
    ProfilePhoto,
    Posts,
    SinglePost,
    CreatePost,
    UserPosts,
    Comments,
    ChangePassword,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Auth => "auth",
            Resource::Profile => "profile",
            Resource::ProfilePhoto => "profile-photo",
            Resource::Posts => "posts",
            Resource::SinglePost => "single-post",
            Resource::CreatePost => "create-post",
            Resource::UserPosts => "user-posts",
            Resource::Comments => "comments",
            Resource::ChangePassword => "change-password",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileState {
    pub user: Option<User>,
}

#[derive(Clone, Debug)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub latest_posts: Vec<Post>,
    pub single_post: Option<Post>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_posts: u64,
}

impl Default for PostsState {
    fn default() -> Self {
        PostsState {
            posts: Vec::new(),
            latest_posts: Vec::new(),
            single_post: None,
            current_page: 1,
            total_pages: 1,
            total_posts: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostsPageState {
    pub posts: Vec<Post>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl Default for PostsPageState {
    fn default() -> Self {
        PostsPageState {
            posts: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UserPostsState {
    pub by_user: HashMap<String, PostsPageState>,
    pub my_posts: PostsPageState,
}

#[derive(Clone, Debug, Default)]
pub struct CommentsState {
    pub by_post: HashMap<String, Vec<Comment>>,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub profile: ProfileState,
    pub posts: PostsState,
    pub user_posts: UserPostsState,
    pub comments: CommentsState,
    statuses: HashMap<Resource, RequestStatus>,
}

fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).reverse());
}

fn page_state(page: &PostsPage, requested_page: u32) -> PostsPageState {
    let info = page.pagination_info.clone().unwrap_or_default();
    PostsPageState {
        posts: page.posts.clone(),
        current_page: if info.current_page > 0 {
            info.current_page
        } else {
            requested_page
        },
        total_pages: info.number_of_pages.max(1),
        total_count: if info.total > 0 {
            info.total
        } else {
            page.posts.len() as u64
        },
    }
}

impl AppState {
    pub fn status(&self, resource: Resource) -> RequestStatus {
        self.statuses.get(&resource).cloned().unwrap_or_default()
    }

    pub fn begin(&mut self, resource: Resource) {
        let status = self.statuses.entry(resource).or_default();
        status.loading = true;
        status.error = None;
        status.success = false;
    }

    pub fn fail(&mut self, resource: Resource, message: String) {
        let status = self.statuses.entry(resource).or_default();
        status.loading = false;
        status.error = Some(message);
        status.success = false;
    }

    pub fn succeed(&mut self, resource: Resource) {
        let status = self.statuses.entry(resource).or_default();
        status.loading = false;
        status.error = None;
        status.success = true;
    }

    /// Signing in as someone else drops the previous user's profile and posts.
    pub fn sign_in(&mut self, token: String, user: Option<User>) {
        let previous = self.current_user_id();
        let next = user
            .as_ref()
            .map(|u| u.user_id.clone())
            .filter(|id| !id.is_empty());
        if previous.is_some() && previous != next {
            self.profile = ProfileState::default();
            self.user_posts.my_posts = PostsPageState::default();
        }
        self.auth.token = Some(token);
        self.auth.user = user;
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.auth.token = token;
    }

    pub fn sign_out(&mut self) {
        self.auth = AuthState::default();
        self.profile = ProfileState::default();
        self.user_posts.my_posts = PostsPageState::default();
        self.statuses.remove(&Resource::Auth);
        self.statuses.remove(&Resource::Profile);
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.profile
            .user
            .as_ref()
            .or(self.auth.user.as_ref())
            .map(|u| u.user_id.clone())
            .filter(|id| !id.is_empty())
    }

    pub fn set_profile(&mut self, user: User) {
        self.profile.user = Some(user);
    }

    pub fn set_profile_photo(&mut self, photo: Option<String>) {
        if let Some(user) = self.profile.user.as_mut() {
            user.photo = photo;
        }
    }

    pub fn set_posts_page(&mut self, page: &PostsPage, requested_page: u32) {
        let state = page_state(page, requested_page);
        self.posts.posts = state.posts;
        newest_first(&mut self.posts.posts);
        self.posts.current_page = state.current_page;
        self.posts.total_pages = state.total_pages;
        self.posts.total_posts = state.total_count;
    }

    pub fn set_latest_posts(&mut self, mut posts: Vec<Post>) {
        newest_first(&mut posts);
        self.posts.latest_posts = posts;
    }

    pub fn set_single_post(&mut self, post: Post) {
        self.posts.single_post = Some(post);
    }

    pub fn post_created(&mut self, post: Post) {
        self.posts.posts.insert(0, post.clone());
        self.posts.latest_posts.insert(0, post.clone());
        self.posts.total_posts += 1;
        self.user_posts.my_posts.posts.insert(0, post);
        self.user_posts.my_posts.total_count += 1;
    }

    pub fn post_body_updated(&mut self, post_id: &str, body: &str) {
        self.for_each_post(|post| {
            if post.post_id == post_id {
                post.body = body.to_string();
            }
        });
    }

    pub fn post_deleted(&mut self, post_id: &str) {
        self.posts.posts.retain(|p| p.post_id != post_id);
        self.posts.latest_posts.retain(|p| p.post_id != post_id);
        self.posts.total_posts = self.posts.total_posts.saturating_sub(1);
        if self
            .posts
            .single_post
            .as_ref()
            .is_some_and(|p| p.post_id == post_id)
        {
            self.posts.single_post = None;
        }

        let my_posts = &mut self.user_posts.my_posts;
        my_posts.posts.retain(|p| p.post_id != post_id);
        my_posts.total_count = my_posts.total_count.saturating_sub(1);

        for page in self.user_posts.by_user.values_mut() {
            let before = page.posts.len();
            page.posts.retain(|p| p.post_id != post_id);
            if page.posts.len() < before {
                page.total_count = page.total_count.saturating_sub(1);
            }
        }

        self.comments.by_post.remove(post_id);
    }

    pub fn set_user_posts(&mut self, user_id: &str, page: &PostsPage, requested_page: u32) {
        self.user_posts
            .by_user
            .insert(user_id.to_string(), page_state(page, requested_page));
    }

    /// The first page replaces the list, later pages append to it.
    pub fn set_my_posts(&mut self, page: &PostsPage, requested_page: u32) {
        let state = page_state(page, requested_page);
        let my_posts = &mut self.user_posts.my_posts;
        if requested_page <= 1 {
            my_posts.posts = state.posts;
        } else {
            my_posts.posts.extend(state.posts);
        }
        my_posts.current_page = state.current_page;
        my_posts.total_pages = state.total_pages;
        my_posts.total_count = state.total_count;
    }

    pub fn comments_for(&self, post_id: &str) -> Vec<Comment> {
        self.comments
            .by_post
            .get(post_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_comments(&mut self, post_id: &str, comments: Vec<Comment>) {
        if let Some(post) = self
            .posts
            .single_post
            .as_mut()
            .filter(|p| p.post_id == post_id)
        {
            post.comments = comments.clone();
        }
        self.comments.by_post.insert(post_id.to_string(), comments);
    }

    pub fn comment_added(&mut self, post_id: &str, comment: Comment) {
        if let Some(post) = self
            .posts
            .single_post
            .as_mut()
            .filter(|p| p.post_id == post_id)
        {
            post.comments.push(comment.clone());
        }
        self.comments
            .by_post
            .entry(post_id.to_string())
            .or_default()
            .push(comment);
    }

    pub fn comment_content_updated(&mut self, comment_id: &str, content: &str) {
        self.for_each_comment(|comment| {
            if comment.comment_id == comment_id {
                comment.content = content.to_string();
            }
        });
    }

    pub fn comment_deleted(&mut self, comment_id: &str) {
        for comments in self.comments.by_post.values_mut() {
            comments.retain(|c| c.comment_id != comment_id);
        }
        self.for_each_post(|post| post.comments.retain(|c| c.comment_id != comment_id));
    }

    fn for_each_post(&mut self, mut f: impl FnMut(&mut Post)) {
        self.posts.posts.iter_mut().for_each(&mut f);
        self.posts.latest_posts.iter_mut().for_each(&mut f);
        self.posts.single_post.iter_mut().for_each(&mut f);
        self.user_posts.my_posts.posts.iter_mut().for_each(&mut f);
        for page in self.user_posts.by_user.values_mut() {
            page.posts.iter_mut().for_each(&mut f);
        }
    }

    fn for_each_comment(&mut self, mut f: impl FnMut(&mut Comment)) {
        for comments in self.comments.by_post.values_mut() {
            comments.iter_mut().for_each(&mut f);
        }
        self.for_each_post(|post| post.comments.iter_mut().for_each(&mut f));
    }
}

/// Shared store; the lock is never held across an await.
#[derive(Default)]
pub struct Store {
    state: Mutex<AppState>,
}

impl Store {
    pub fn with_state<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    pub fn snapshot(&self) -> AppState {
        self.with_state(|state| state.clone())
    }

    pub fn status(&self, resource: Resource) -> RequestStatus {
        self.with_state(|state| state.status(resource))
    }
}
