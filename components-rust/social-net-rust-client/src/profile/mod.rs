use crate::client::SocialClient;
use crate::common::attachment_part;
use crate::error::{ClientError, Result};
use crate::store::Resource;
use async_trait::async_trait;
use common_lib::domain::common::{UpdateProfile, UserResult};
use common_lib::{validation, Attachment, User};
use reqwest::multipart::Form;
use reqwest::Method;

#[async_trait]
pub trait ProfileApi {
    async fn get_profile(&self) -> Result<User>;

    async fn update_profile(&self, update: &UpdateProfile) -> Result<User>;

    /// Returns the new photo URL, when the server reports one.
    async fn upload_photo(&self, photo: Attachment) -> Result<Option<String>>;

    async fn delete_photo(&self) -> Result<()>;
}

#[async_trait]
impl ProfileApi for SocialClient {
    async fn get_profile(&self) -> Result<User> {
        self.track(Resource::Profile, async {
            let token = self.token()?;

            let result: UserResult = self
                .api()
                .get_request("profile-get", "/users/profile-data", Some(&token))
                .await
                .json("Unable to fetch profile data")
                .await?;
            let user = result
                .user
                .ok_or_else(|| ClientError::request(None, "Unable to fetch profile data"))?;

            log::debug!("profile get - user id: {}", user.user_id);
            let username = Some(user.name.clone()).filter(|name| !name.is_empty());
            self.update_session(|session| session.username = username)?;
            self.store().with_state(|state| state.set_profile(user.clone()));
            Ok(user)
        })
        .await
    }

    async fn update_profile(&self, update: &UpdateProfile) -> Result<User> {
        self.track(Resource::Profile, async {
            let token = self.token()?;
            validation::profile_update(update, chrono::Local::now().date_naive())?;

            let result: UserResult = self
                .api()
                .patch_request("profile-update", "/users/profile-data", Some(&token), update)
                .await
                .json("Failed to update profile")
                .await?;
            let user = result
                .user
                .ok_or_else(|| ClientError::request(None, "Failed to update profile"))?;

            self.store().with_state(|state| state.set_profile(user.clone()));
            self.notify_success("Profile updated successfully");
            Ok(user)
        })
        .await
    }

    async fn upload_photo(&self, photo: Attachment) -> Result<Option<String>> {
        self.track(Resource::ProfilePhoto, async {
            let token = self.token()?;
            validation::profile_photo(&photo)?;
            log::info!(
                "upload photo - file: {}, size: {}",
                photo.file_name,
                photo.size()
            );

            let form = Form::new().part("photo", attachment_part(&photo)?);
            let result: UserResult = self
                .api()
                .multipart_request(
                    "profile-photo-upload",
                    Method::PUT,
                    "/users/upload-photo",
                    Some(&token),
                    form,
                )
                .await
                .json("Failed to update photo")
                .await?;

            let photo_url = result.user.and_then(|user| user.photo);
            self.store()
                .with_state(|state| state.set_profile_photo(photo_url.clone()));
            self.notify_success("Profile photo updated successfully");
            Ok(photo_url)
        })
        .await
    }

    async fn delete_photo(&self) -> Result<()> {
        self.track(Resource::ProfilePhoto, async {
            let token = self.token()?;

            self.api()
                .delete_request("profile-photo-delete", "/users/profile-photo", Some(&token))
                .await
                .ok("Failed to remove photo")
                .await?;

            self.store().with_state(|state| state.set_profile_photo(None));
            self.notify_success("Profile photo removed successfully");
            Ok(())
        })
        .await
    }
}
