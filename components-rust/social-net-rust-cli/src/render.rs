use common_lib::domain::common::PostsPage;
use common_lib::{Comment, Post, User};
use serde::Serialize;
use social_net_rust_client::notify::{Notification, Notifier};
use social_net_rust_client::SocialClient;

/// Prints notifications on stderr so stdout stays parseable with `--json`.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Success(message) => eprintln!("{message}"),
            Notification::Error(message) => eprintln!("error: {message}"),
        }
    }
}

pub struct Output<'a> {
    pub json: bool,
    pub client: &'a SocialClient,
}

impl Output<'_> {
    fn emit<T: Serialize>(&self, value: &T) -> anyhow::Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }

    pub fn user(&self, user: &User) -> anyhow::Result<()> {
        if self.emit(user)? {
            return Ok(());
        }
        println!("{} ({})", user.name, user.user_id);
        if let Some(email) = &user.email {
            println!("  email: {email}");
        }
        if let Some(gender) = &user.gender {
            println!("  gender: {gender}");
        }
        if let Some(date_of_birth) = &user.date_of_birth {
            println!("  born: {date_of_birth}");
        }
        if let Some(photo) = self.client.image_url(user.photo.as_deref()) {
            println!("  photo: {photo}");
        }
        Ok(())
    }

    pub fn photo(&self, url: Option<&str>) -> anyhow::Result<()> {
        if self.emit(&serde_json::json!({ "photo": url }))? {
            return Ok(());
        }
        match self.client.image_url(url) {
            Some(url) => println!("{url}"),
            None => println!("no photo"),
        }
        Ok(())
    }

    pub fn page(&self, page: &PostsPage) -> anyhow::Result<()> {
        if self.emit(page)? {
            return Ok(());
        }
        self.post_list(&page.posts);
        if let Some(info) = &page.pagination_info {
            println!(
                "page {} of {} ({} posts)",
                info.current_page.max(1),
                info.number_of_pages.max(1),
                info.total
            );
        }
        Ok(())
    }

    pub fn posts(&self, posts: &[Post]) -> anyhow::Result<()> {
        if self.emit(&posts)? {
            return Ok(());
        }
        self.post_list(posts);
        Ok(())
    }

    pub fn post(&self, post: &Post) -> anyhow::Result<()> {
        if self.emit(post)? {
            return Ok(());
        }
        self.post_summary(post);
        if !post.comments.is_empty() {
            println!();
            self.comment_list(&post.comments);
        }
        Ok(())
    }

    pub fn comments(&self, comments: &[Comment]) -> anyhow::Result<()> {
        if self.emit(&comments)? {
            return Ok(());
        }
        self.comment_list(comments);
        Ok(())
    }

    pub fn comment(&self, comment: &Comment) -> anyhow::Result<()> {
        if self.emit(comment)? {
            return Ok(());
        }
        self.comment_list(std::slice::from_ref(comment));
        Ok(())
    }

    fn post_list(&self, posts: &[Post]) {
        if posts.is_empty() {
            println!("no posts");
        }
        for post in posts {
            self.post_summary(post);
            println!();
        }
    }

    fn post_summary(&self, post: &Post) {
        println!(
            "[{}] {} - {}",
            post.post_id,
            author(post.user.as_ref()),
            post.created_at.format("%Y-%m-%d %H:%M")
        );
        println!("  {}", post.body);
        if let Some(image) = self.client.image_url(post.image.as_deref()) {
            println!("  image: {image}");
        }
        if !post.comments.is_empty() {
            println!("  comments: {}", post.comments.len());
        }
    }

    fn comment_list(&self, comments: &[Comment]) {
        if comments.is_empty() {
            println!("no comments");
        }
        for comment in comments {
            println!(
                "[{}] {} - {}: {}",
                comment.comment_id,
                author(comment.comment_creator.as_ref()),
                comment.created_at.format("%Y-%m-%d %H:%M"),
                comment.content
            );
        }
    }
}

fn author(user: Option<&User>) -> &str {
    match user {
        Some(user) if !user.name.is_empty() => &user.name,
        Some(user) => &user.user_id,
        None => "unknown",
    }
}
