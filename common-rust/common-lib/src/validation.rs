//! Form-level checks applied before a request is sent.
//!
//! These mirror the rules the API enforces but are not guaranteed to match
//! them; the server stays the authority.

use crate::domain::common::{Attachment, ChangePassword, Gender, SignIn, SignUp, UpdateProfile};
use chrono::NaiveDate;
use email_address::EmailAddress;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

pub const MIN_REGISTER_PASSWORD_LENGTH: usize = 6;
pub const MIN_NEW_PASSWORD_LENGTH: usize = 8;
pub const MAX_NEW_PASSWORD_LENGTH: usize = 100;
pub const MAX_POST_LENGTH: usize = 5000;
pub const MIN_COMMENT_LENGTH: usize = 2;
pub const MAX_POST_IMAGE_SIZE: usize = 3 * 1024 * 1024;
pub const MAX_PROFILE_PHOTO_SIZE: usize = 4 * 1024 * 1024;
pub const POST_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Invalid email")]
    InvalidEmail,
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Passwords must match")]
    PasswordMismatch,
    #[error("Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character")]
    WeakPassword,
    #[error("New password cannot be the same as the current password")]
    PasswordUnchanged,
    #[error("Gender must be male or female")]
    InvalidGender,
    #[error("Date of birth cannot be in the future")]
    BirthDateInFuture,
    #[error("Please select a valid image file (JPEG, PNG, GIF, WebP)")]
    UnsupportedImageType,
    #[error("Please select a valid image file")]
    NotAnImage,
    #[error("Image size should be less than {max_mb}MB")]
    ImageTooLarge { max_mb: usize },
    #[error("Nothing to update")]
    NothingToUpdate,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub re_password: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    required(email, "Email")?;
    EmailAddress::from_str(email.trim())
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidEmail)
}

pub fn sign_in(email: &str, password: &str) -> Result<SignIn, ValidationError> {
    check_email(email)?;
    required(password, "Password")?;
    Ok(SignIn {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

pub fn register(form: &RegisterForm, today: NaiveDate) -> Result<SignUp, ValidationError> {
    required(&form.name, "Name")?;
    check_email(&form.email)?;
    required(&form.password, "Password")?;
    if form.password.chars().count() < MIN_REGISTER_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password",
            min: MIN_REGISTER_PASSWORD_LENGTH,
        });
    }
    required(&form.re_password, "Repeat password")?;
    if form.password != form.re_password {
        return Err(ValidationError::PasswordMismatch);
    }
    required(&form.gender, "Gender")?;
    let gender = Gender::from_str(&form.gender).map_err(|_| ValidationError::InvalidGender)?;
    let date_of_birth = form
        .date_of_birth
        .ok_or(ValidationError::Required("Date of birth"))?;
    if date_of_birth > today {
        return Err(ValidationError::BirthDateInFuture);
    }

    Ok(SignUp {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        re_password: form.re_password.clone(),
        date_of_birth,
        gender,
    })
}

fn password_alphabet() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z\d@$!%*?&]+$").expect("valid password pattern"))
}

pub fn change_password(current: &str, new: &str) -> Result<ChangePassword, ValidationError> {
    required(current, "Current password")?;
    required(new, "New password")?;

    let length = new.chars().count();
    if length < MIN_NEW_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password",
            min: MIN_NEW_PASSWORD_LENGTH,
        });
    }
    if length > MAX_NEW_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Password",
            max: MAX_NEW_PASSWORD_LENGTH,
        });
    }

    let strong = password_alphabet().is_match(new)
        && new.chars().any(|c| c.is_ascii_lowercase())
        && new.chars().any(|c| c.is_ascii_uppercase())
        && new.chars().any(|c| c.is_ascii_digit())
        && new.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));
    if !strong {
        return Err(ValidationError::WeakPassword);
    }
    if current == new {
        return Err(ValidationError::PasswordUnchanged);
    }

    Ok(ChangePassword {
        password: current.to_string(),
        new_password: new.to_string(),
    })
}

pub fn profile_update(update: &UpdateProfile, today: NaiveDate) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::NothingToUpdate);
    }
    if let Some(name) = &update.name {
        required(name, "Name")?;
    }
    if update.date_of_birth.is_some_and(|dob| dob > today) {
        return Err(ValidationError::BirthDateInFuture);
    }
    Ok(())
}

/// Returns the trimmed post body.
pub fn post_body(body: &str) -> Result<String, ValidationError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ValidationError::Required("Post content"));
    }
    if body.chars().count() > MAX_POST_LENGTH {
        return Err(ValidationError::TooLong {
            field: "Post content",
            max: MAX_POST_LENGTH,
        });
    }
    Ok(body.to_string())
}

/// Returns the trimmed comment content.
pub fn comment_content(content: &str) -> Result<String, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::Required("Content"));
    }
    if content.chars().count() < MIN_COMMENT_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Comment",
            min: MIN_COMMENT_LENGTH,
        });
    }
    Ok(content.to_string())
}

pub fn edited_comment_content(content: &str) -> Result<String, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        Err(ValidationError::Required("Content"))
    } else {
        Ok(content.to_string())
    }
}

pub fn post_image(image: &Attachment) -> Result<(), ValidationError> {
    if !POST_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        return Err(ValidationError::UnsupportedImageType);
    }
    if image.size() > MAX_POST_IMAGE_SIZE {
        return Err(ValidationError::ImageTooLarge {
            max_mb: MAX_POST_IMAGE_SIZE / (1024 * 1024),
        });
    }
    Ok(())
}

pub fn profile_photo(photo: &Attachment) -> Result<(), ValidationError> {
    if photo.bytes.is_empty() {
        return Err(ValidationError::Required("Photo"));
    }
    if !photo.content_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage);
    }
    if photo.size() > MAX_PROFILE_PHOTO_SIZE {
        return Err(ValidationError::ImageTooLarge {
            max_mb: MAX_PROFILE_PHOTO_SIZE / (1024 * 1024),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            name: "Ann".to_string(),
            email: "ann@test.com".to_string(),
            password: "secret1".to_string(),
            re_password: "secret1".to_string(),
            gender: "Female".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 10, 7),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn register_builds_payload() {
        let sign_up = register(&form(), today()).unwrap();
        assert_eq!(sign_up.gender, Gender::Female);

        let json = serde_json::to_value(&sign_up).unwrap();
        assert_eq!(json["dateOfBirth"], "1994-10-07");
        assert_eq!(json["rePassword"], "secret1");
        assert_eq!(json["gender"], "female");
    }

    #[test]
    fn register_rejects_bad_forms() {
        let mut f = form();
        f.email = "not-an-email".to_string();
        assert_eq!(register(&f, today()), Err(ValidationError::InvalidEmail));

        let mut f = form();
        f.password = "abc".to_string();
        f.re_password = "abc".to_string();
        assert_eq!(
            register(&f, today()).unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );

        let mut f = form();
        f.re_password = "secret2".to_string();
        assert_eq!(register(&f, today()), Err(ValidationError::PasswordMismatch));

        let mut f = form();
        f.gender = "other".to_string();
        assert_eq!(register(&f, today()), Err(ValidationError::InvalidGender));

        let mut f = form();
        f.date_of_birth = NaiveDate::from_ymd_opt(2030, 1, 1);
        assert_eq!(register(&f, today()), Err(ValidationError::BirthDateInFuture));

        let mut f = form();
        f.date_of_birth = None;
        assert_eq!(
            register(&f, today()).unwrap_err().to_string(),
            "Date of birth is required"
        );
    }

    #[test]
    fn sign_in_requires_both_fields() {
        assert_eq!(sign_in("", "x").unwrap_err(), ValidationError::Required("Email"));
        assert_eq!(
            sign_in("ann@test.com", "").unwrap_err(),
            ValidationError::Required("Password")
        );
        assert_eq!(sign_in(" ann@test.com ", "pw").unwrap().email, "ann@test.com");
    }

    #[test]
    fn new_password_rules() {
        assert!(change_password("Old#pass1", "New!pass1").is_ok());
        assert_eq!(
            change_password("Old#pass1", "Sh#1a").unwrap_err(),
            ValidationError::TooShort {
                field: "Password",
                min: MIN_NEW_PASSWORD_LENGTH
            }
        );
        assert_eq!(
            change_password("Old#pass1", "alllowercase1!").unwrap_err(),
            ValidationError::WeakPassword
        );
        // '#' is outside the accepted alphabet
        assert_eq!(
            change_password("Old#pass1", "Newpass1#").unwrap_err(),
            ValidationError::WeakPassword
        );
        assert_eq!(
            change_password("Same!pass1", "Same!pass1").unwrap_err(),
            ValidationError::PasswordUnchanged
        );
        let long = format!("Aa1!{}", "x".repeat(MAX_NEW_PASSWORD_LENGTH));
        assert!(matches!(
            change_password("Old!pass1", &long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn profile_update_needs_a_change() {
        assert_eq!(
            profile_update(&UpdateProfile::default(), today()),
            Err(ValidationError::NothingToUpdate)
        );
        let rename = UpdateProfile {
            name: Some("  ".to_string()),
            ..UpdateProfile::default()
        };
        assert_eq!(
            profile_update(&rename, today()),
            Err(ValidationError::Required("Name"))
        );
        let gender = UpdateProfile {
            gender: Some(Gender::Male),
            ..UpdateProfile::default()
        };
        assert!(profile_update(&gender, today()).is_ok());
    }

    #[test]
    fn post_and_comment_content() {
        assert_eq!(post_body("  hi  ").unwrap(), "hi");
        assert_eq!(
            post_body("   ").unwrap_err(),
            ValidationError::Required("Post content")
        );
        assert!(post_body(&"a".repeat(MAX_POST_LENGTH)).is_ok());
        assert!(post_body(&"a".repeat(MAX_POST_LENGTH + 1)).is_err());

        assert_eq!(comment_content(" ok ").unwrap(), "ok");
        assert_eq!(
            comment_content("a").unwrap_err().to_string(),
            "Comment must be at least 2 characters"
        );
        assert_eq!(edited_comment_content(" a ").unwrap(), "a");
    }

    #[test]
    fn image_limits() {
        let png = Attachment::new("cat.png", vec![0; 16]);
        assert!(post_image(&png).is_ok());
        assert!(profile_photo(&png).is_ok());

        let bmp = Attachment::new("cat.bmp", vec![0; 16]);
        assert_eq!(post_image(&bmp), Err(ValidationError::UnsupportedImageType));
        assert!(profile_photo(&bmp).is_ok());

        let big = Attachment::new("big.jpg", vec![0; MAX_POST_IMAGE_SIZE + 1]);
        assert_eq!(
            post_image(&big).unwrap_err().to_string(),
            "Image size should be less than 3MB"
        );
        assert!(profile_photo(&big).is_ok());

        let text = Attachment::new("notes.txt", vec![1]);
        assert_eq!(profile_photo(&text), Err(ValidationError::NotAnImage));
        let empty = Attachment::new("empty.png", vec![]);
        assert_eq!(profile_photo(&empty), Err(ValidationError::Required("Photo")));
    }
}
