pub mod common {
    use super::social_net::{Comment, PaginationInfo, Post, User};
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use std::fmt::{Display, Formatter};
    use std::str::FromStr;

    pub const SUCCESS_MESSAGE: &str = "success";

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Gender {
        Male,
        Female,
    }

    impl Display for Gender {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            match self {
                Gender::Male => write!(f, "male"),
                Gender::Female => write!(f, "female"),
            }
        }
    }

    impl FromStr for Gender {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_lowercase().as_str() {
                "male" => Ok(Gender::Male),
                "female" => Ok(Gender::Female),
                other => Err(format!("Unknown gender: {other}")),
            }
        }
    }

    /// Response wrapper shared by every endpoint. The API reports the outcome
    /// in `message` and sometimes puts failure details in `error`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Envelope<T> {
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub error: Option<String>,
        #[serde(flatten)]
        pub data: T,
    }

    impl<T> Envelope<T> {
        pub fn is_success(&self) -> bool {
            self.error.is_none()
                && self
                    .message
                    .as_deref()
                    .map(|m| m == SUCCESS_MESSAGE)
                    .unwrap_or(true)
        }

        pub fn failure_message(&self) -> Option<String> {
            self.message
                .clone()
                .filter(|m| m != SUCCESS_MESSAGE)
                .or_else(|| self.error.clone())
        }
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct Empty {}

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SignIn {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SignUp {
        pub name: String,
        pub email: String,
        pub password: String,
        pub re_password: String,
        pub date_of_birth: NaiveDate,
        pub gender: Gender,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChangePassword {
        pub password: String,
        pub new_password: String,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateProfile {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date_of_birth: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gender: Option<Gender>,
    }

    impl UpdateProfile {
        pub fn is_empty(&self) -> bool {
            self.name.is_none() && self.date_of_birth.is_none() && self.gender.is_none()
        }
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UpdatePost {
        pub body: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CreateComment {
        pub content: String,
        pub post: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UpdateComment {
        pub content: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct SignedIn {
        pub token: String,
        #[serde(default)]
        pub user: Option<User>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct PasswordChanged {
        #[serde(default)]
        pub token: Option<String>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostsPage {
        #[serde(default)]
        pub posts: Vec<Post>,
        #[serde(default)]
        pub pagination_info: Option<PaginationInfo>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct PostResult {
        #[serde(default)]
        pub post: Option<Post>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct CommentsResult {
        #[serde(default)]
        pub comments: Option<Vec<Comment>>,
        #[serde(default)]
        pub comment: Option<Comment>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct UserResult {
        #[serde(default)]
        pub user: Option<User>,
    }

    /// An image file about to be sent as a multipart part.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Attachment {
        pub file_name: String,
        pub content_type: String,
        pub bytes: Vec<u8>,
    }

    impl Attachment {
        pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
            let file_name = file_name.into();
            let content_type = content_type_for(&file_name).to_string();
            Attachment {
                file_name,
                content_type,
                bytes,
            }
        }

        pub fn size(&self) -> usize {
            self.bytes.len()
        }
    }

    pub fn content_type_for(file_name: &str) -> &'static str {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            "txt" => "text/plain",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

pub mod social_net {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize};

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        #[serde(rename = "_id", default)]
        pub user_id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date_of_birth: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub gender: Option<String>,
        #[serde(default)]
        pub photo: Option<String>,
        #[serde(default, deserialize_with = "count", skip_serializing_if = "Option::is_none")]
        pub posts: Option<u64>,
        #[serde(default, deserialize_with = "count", skip_serializing_if = "Option::is_none")]
        pub followers: Option<u64>,
        #[serde(default, deserialize_with = "count", skip_serializing_if = "Option::is_none")]
        pub following: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub created_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Comment {
        #[serde(rename = "_id")]
        pub comment_id: String,
        #[serde(default)]
        pub content: String,
        #[serde(default, deserialize_with = "user_ref")]
        pub comment_creator: Option<User>,
        #[serde(default, deserialize_with = "id_ref")]
        pub post: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Post {
        #[serde(rename = "_id")]
        pub post_id: String,
        #[serde(default)]
        pub body: String,
        #[serde(default)]
        pub image: Option<String>,
        #[serde(default, deserialize_with = "user_ref")]
        pub user: Option<User>,
        pub created_at: DateTime<Utc>,
        #[serde(default)]
        pub comments: Vec<Comment>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaginationInfo {
        #[serde(default)]
        pub current_page: u32,
        #[serde(default)]
        pub number_of_pages: u32,
        #[serde(default)]
        pub limit: u32,
        #[serde(default)]
        pub next_page: Option<u32>,
        #[serde(default)]
        pub total: u64,
    }

    // Authors are populated objects on reads but bare ids on some writes.
    fn user_ref<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        match value {
            Some(serde_json::Value::String(user_id)) => Ok(Some(User {
                user_id,
                ..User::default()
            })),
            Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }

    fn id_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(id)) => Some(id),
            Some(serde_json::Value::Object(fields)) => fields
                .get("_id")
                .and_then(|id| id.as_str())
                .map(str::to_string),
            _ => None,
        })
    }

    // Profile counters arrive either as numbers or as id lists.
    fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::Number(n)) => n.as_u64(),
            Some(serde_json::Value::Array(items)) => Some(items.len() as u64),
            _ => None,
        })
    }
}
