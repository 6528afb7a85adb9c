pub mod domain;
pub mod snapshot;
pub mod validation;

pub use domain::common::{Attachment, Envelope, Gender};
pub use domain::social_net::{Comment, PaginationInfo, Post, User};
pub use validation::ValidationError;
