mod data;
mod goose_ext;

use crate::goose_ext::GooseRequestExt;
use common_lib::domain::common::{
    CommentsResult, CreateComment, PostResult, PostsPage, UpdateComment,
};
use goose::prelude::*;
use rand::prelude::SliceRandom;
use reqwest::multipart::Form;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), GooseError> {
    let custom_host = match std::env::var("HOST") {
        Ok(host) => host,
        Err(_) => "".to_string(),
    };

    GooseAttack::initialize()?
        .register_scenario(
            scenario!("List Posts")
                .set_wait_time(Duration::from_secs(1), Duration::from_secs(5))?
                .register_transaction(transaction!(list_posts)),
        )
        .register_scenario(
            scenario!("Latest Posts")
                .set_wait_time(Duration::from_secs(1), Duration::from_secs(5))?
                .register_transaction(transaction!(latest_posts)),
        )
        .register_scenario(
            scenario!("Open Post")
                .set_wait_time(Duration::from_secs(2), Duration::from_secs(10))?
                .register_transaction(transaction!(open_post)),
        )
        .register_scenario(
            scenario!("Create Post, Comments and Delete")
                .set_wait_time(Duration::from_secs(5), Duration::from_secs(15))?
                .register_transaction(transaction!(create_post_comments_and_delete)),
        )
        .set_default(GooseDefault::Host, custom_host.as_str())?
        .execute()
        .await?;

    Ok(())
}

async fn list_posts(user: &mut GooseUser) -> TransactionResult {
    let page = data::rand_page();
    let limit = data::rand_limit();

    let _response = user
        .get_request("posts-list", format!("/posts?page={page}&limit={limit}").as_str())
        .await?;

    Ok(())
}

async fn latest_posts(user: &mut GooseUser) -> TransactionResult {
    let limit = data::rand_limit();

    let _response = user
        .get_request(
            "posts-latest",
            format!("/posts?sort=-createdAt&limit={limit}").as_str(),
        )
        .await?;

    Ok(())
}

async fn open_post(user: &mut GooseUser) -> TransactionResult {
    use crate::goose_ext::GooseResponseExt;

    let page = data::rand_page();
    let response = user
        .get_request("posts-list", format!("/posts?page={page}&limit=10").as_str())
        .await?;
    let posts: PostsPage = response.json().await?;

    let post_id = match posts.posts.choose(&mut rand::thread_rng()) {
        Some(post) => post.post_id.clone(),
        None => return Ok(()),
    };

    let _response = user
        .get_request("post-get", format!("/posts/{post_id}").as_str())
        .await?;
    let _response = user
        .get_request("comments-list", format!("/posts/{post_id}/comments").as_str())
        .await?;

    Ok(())
}

/// Needs `API_TOKEN`; every step below is authenticated.
async fn create_post_comments_and_delete(user: &mut GooseUser) -> TransactionResult {
    use crate::goose_ext::GooseResponseExt;

    // 1. Create Post
    let form = Form::new().text("body", data::rand_post_content());
    let response = user.multipart_request("post-create", "/posts", form).await?;
    let created: PostResult = response.json().await?;
    let post_id = match created.post {
        Some(post) => post.post_id,
        None => return Ok(()),
    };

    // 2. Add Comments
    let mut last_comment_id = None;
    for _ in 0..2 {
        let create_comment = CreateComment {
            content: data::rand_comment_content(),
            post: post_id.clone(),
        };
        let response = user
            .post_request("comment-add", "/comments", &create_comment)
            .await?;

        let result: CommentsResult = response.json().await?;
        last_comment_id = result
            .comment
            .map(|c| c.comment_id)
            .or_else(|| {
                result
                    .comments
                    .and_then(|comments| comments.last().map(|c| c.comment_id.clone()))
            })
            .or(last_comment_id);
    }

    // 3. Edit and delete one comment
    if let Some(comment_id) = last_comment_id {
        let update_comment = UpdateComment {
            content: data::rand_edited_content(),
        };
        let _response = user
            .put_request(
                "comment-update",
                format!("/comments/{comment_id}").as_str(),
                &update_comment,
            )
            .await?;
        let _response = user
            .delete_request("comment-delete", format!("/comments/{comment_id}").as_str())
            .await?;
    }

    // 4. Delete Post
    let _response = user
        .delete_request("post-delete", format!("/posts/{post_id}").as_str())
        .await?;

    Ok(())
}
