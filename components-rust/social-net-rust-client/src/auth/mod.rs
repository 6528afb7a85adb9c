use crate::client::SocialClient;
use crate::error::{ClientError, Result};
use crate::store::Resource;
use async_trait::async_trait;
use common_lib::domain::common::{PasswordChanged, SignedIn};
use common_lib::validation::{self, RegisterForm};
use common_lib::User;

#[async_trait]
pub trait AuthApi {
    /// Signs in and persists the returned token.
    async fn login(&self, email: &str, password: &str) -> Result<Option<User>>;

    /// Creates the account; does not sign in.
    async fn register(&self, form: &RegisterForm) -> Result<()>;

    fn logout(&self) -> Result<()>;

    async fn change_password(&self, current: &str, new: &str) -> Result<()>;

    fn is_authenticated(&self) -> bool;
}

#[async_trait]
impl AuthApi for SocialClient {
    async fn login(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.track(Resource::Auth, async {
            let credentials = validation::sign_in(email, password)?;
            log::info!("login - email: {}", credentials.email);

            let signed_in: SignedIn = self
                .api()
                .post_request("auth-login", "/users/signin", None, &credentials)
                .await
                .json("Login failed")
                .await?;

            if signed_in.token.is_empty() {
                return Err(ClientError::request(None, "Login failed"));
            }

            let username = signed_in.user.as_ref().map(|u| u.name.clone());
            self.update_session(|session| {
                session.token = Some(signed_in.token.clone());
                session.username = username;
            })?;
            self.store()
                .with_state(|state| state.sign_in(signed_in.token.clone(), signed_in.user.clone()));

            self.notify_success("Login successful");
            Ok(signed_in.user)
        })
        .await
    }

    async fn register(&self, form: &RegisterForm) -> Result<()> {
        self.track(Resource::Auth, async {
            let sign_up = validation::register(form, chrono::Local::now().date_naive())?;
            log::info!("register - email: {}", sign_up.email);

            self.api()
                .post_request("auth-register", "/users/signup", None, &sign_up)
                .await
                .ok("Registration failed")
                .await?;

            self.notify_success("Registration successful!");
            Ok(())
        })
        .await
    }

    fn logout(&self) -> Result<()> {
        self.session_store().clear()?;
        self.store().with_state(|state| state.sign_out());
        log::info!("logout - session cleared");
        self.notify_success("Logged out");
        Ok(())
    }

    async fn change_password(&self, current: &str, new: &str) -> Result<()> {
        self.track(Resource::ChangePassword, async {
            let token = self.token()?;
            let change = validation::change_password(current, new)?;

            let changed: PasswordChanged = self
                .api()
                .patch_request(
                    "auth-change-password",
                    "/users/change-password",
                    Some(&token),
                    &change,
                )
                .await
                .json("Failed to update password")
                .await?;

            if let Some(token) = changed.token.filter(|t| !t.is_empty()) {
                self.update_session(|session| session.token = Some(token.clone()))?;
                self.store().with_state(|state| state.set_token(Some(token)));
            }

            self.notify_success("Password updated successfully");
            Ok(())
        })
        .await
    }

    fn is_authenticated(&self) -> bool {
        self.optional_token().is_some()
    }
}
