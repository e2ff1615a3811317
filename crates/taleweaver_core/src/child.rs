//! Child profile submitted for a generation run.

use crate::ReferenceImage;
use serde::{Deserialize, Serialize};
use taleweaver_error::{ValidationError, ValidationErrorKind};

/// Youngest supported age.
pub const MIN_CHILD_AGE: u8 = 1;
/// Oldest supported age.
pub const MAX_CHILD_AGE: u8 = 12;

/// The child a story is written for.
///
/// Only constructible through [`ChildProfile::new`], so every profile in
/// circulation has a non-empty name, an age in 1–12 and a non-empty photo.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{ChildProfile, ImageMediaType, ReferenceImage};
///
/// let photo = ReferenceImage::new(vec![0xFF, 0xD8], ImageMediaType::Jpeg);
/// let child = ChildProfile::new("  Mia ", 6, photo).unwrap();
/// assert_eq!(child.name(), "Mia");
/// assert_eq!(*child.age(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ChildProfile {
    /// Child's name, trimmed
    name: String,
    /// Age in years
    age: u8,
    /// Reference photo the illustrations must resemble
    reference_image: ReferenceImage,
}

impl ChildProfile {
    /// Validate caller input and build a profile.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the trimmed name is empty, the age is
    /// outside 1–12, or the reference image has no bytes.
    pub fn new(
        name: impl AsRef<str>,
        age: u8,
        reference_image: ReferenceImage,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyName));
        }
        if !(MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&age) {
            return Err(ValidationError::new(ValidationErrorKind::AgeOutOfRange(age)));
        }
        if reference_image.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyImage));
        }

        Ok(Self {
            name: name.to_string(),
            age,
            reference_image,
        })
    }
}
