//! Forms for portfolio photos.

use serde::Deserialize;
use validator::Validate;

use crate::domain::photo::{NewPhoto, UpdatePhoto};
use crate::domain::types::{ImageUrl, PhotoTitle, SanitizedText};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct PhotoForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: String,
}

impl TryFrom<PhotoForm> for NewPhoto {
    type Error = FormError;

    fn try_from(form: PhotoForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewPhoto::new(
            PhotoTitle::new(form.title)?,
            SanitizedText::optional(form.description),
            ImageUrl::new(form.image_url)?,
        ))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Partial photo update. An empty description clears the stored one.
pub struct UpdatePhotoForm {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl TryFrom<UpdatePhotoForm> for UpdatePhoto {
    type Error = FormError;

    fn try_from(form: UpdatePhotoForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(UpdatePhoto {
            title: form.title.map(PhotoTitle::new).transpose()?,
            description: form.description.map(|d| SanitizedText::optional(Some(d))),
            image_url: form.image_url.map(ImageUrl::new).transpose()?,
        })
    }
}
