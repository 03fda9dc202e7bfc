//! Validated scalar values. Each type can only be built through `FromStr`, which rejects bad input.

use crate::utils::error::{EduError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static NAME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("name pattern is valid"));
static PHONE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,}$").expect("phone pattern is valid"));
static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.\-]+@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?$")
        .expect("email pattern is valid")
});
static TAG_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("tag pattern is valid"));

fn invalid(field: &'static str, message: &str) -> EduError {
    EduError::InvalidValue {
        field,
        message: message.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Names should only contain alphanumeric characters and spaces, and it should not be blank";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !NAME_FORMAT.is_match(trimmed) {
            return Err(invalid("name", Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Phone numbers should only contain numbers, and it should be at least 3 digits long";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Phone {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !PHONE_FORMAT.is_match(trimmed) {
            return Err(invalid("phone", Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Gender of a student, normalized to `Male`, `Female` or `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Gender should only be 'Male', 'Female', or 'Other' (case-insensitive).";

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(invalid("gender", Self::MESSAGE_CONSTRAINTS)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Emails should be of the format local-part@domain, where the domain labels are alphanumeric";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let top_label_ok = trimmed
            .rsplit_once('.')
            .map(|(_, last)| last.len() >= 2)
            .unwrap_or(false);
        if !EMAIL_FORMAT.is_match(trimmed) || !top_label_ok {
            return Err(invalid("email", Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub const MESSAGE_CONSTRAINTS: &'static str =
        "Addresses can take any values, and it should not be blank";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("address", Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub const MESSAGE_CONSTRAINTS: &'static str = "Tags names should be alphanumeric";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Tag {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !TAG_FORMAT.is_match(trimmed) {
            return Err(invalid("tag", Self::MESSAGE_CONSTRAINTS));
        }
        Ok(Self(trimmed.to_string()))
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Name, Phone, Gender, Email, Address, Tag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!("John Doe".parse::<Name>().unwrap().as_str(), "John Doe");
        assert_eq!("  Alice  ".parse::<Name>().unwrap().as_str(), "Alice");
        assert!("Peter the 2nd".parse::<Name>().is_ok());
        assert!("".parse::<Name>().is_err());
        assert!("   ".parse::<Name>().is_err());
        assert!("^".parse::<Name>().is_err());
        assert!("peter*".parse::<Name>().is_err());
        assert!("José".parse::<Name>().is_err());
        assert!("李雷".parse::<Name>().is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert!("911".parse::<Phone>().is_ok());
        assert!("99887766".parse::<Phone>().is_ok());
        assert!("91".parse::<Phone>().is_err());
        assert!("phone".parse::<Phone>().is_err());
        assert!("9011p041".parse::<Phone>().is_err());
        assert!("9312 1534".parse::<Phone>().is_err());
        assert!("１２３".parse::<Phone>().is_err());
        assert!("٩٨٧٦".parse::<Phone>().is_err());
    }

    #[test]
    fn test_gender_is_case_insensitive_and_normalized() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("FEMALE".parse::<Gender>().unwrap().to_string(), "Female");
        assert_eq!(" oThEr ".parse::<Gender>().unwrap().to_string(), "Other");
        assert_eq!(
            "MALE".parse::<Gender>().unwrap(),
            "male".parse::<Gender>().unwrap()
        );

        let err = "unknown".parse::<Gender>().unwrap_err();
        assert_eq!(err.to_string(), Gender::MESSAGE_CONSTRAINTS);
    }

    #[test]
    fn test_legacy_field_validation() {
        assert!("alexyeoh@example.com".parse::<Email>().is_ok());
        assert!("a+b_c.d-e@sub.example-domain.org".parse::<Email>().is_ok());
        assert!("peterjack@example.c".parse::<Email>().is_err());
        assert!("@example.com".parse::<Email>().is_err());
        assert!("peterjack@-example.com".parse::<Email>().is_err());

        assert!("Blk 30 Geylang Street 29".parse::<Address>().is_ok());
        assert!(" ".parse::<Address>().is_err());

        assert!("friends".parse::<Tag>().is_ok());
        assert!("best friends".parse::<Tag>().is_err());
    }
}
