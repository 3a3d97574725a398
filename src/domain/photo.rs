use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageUrl, PhotoId, PhotoTitle, SanitizedText};

/// Portfolio entry showcasing finished work.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    pub title: PhotoTitle,
    pub description: Option<SanitizedText>,
    pub image_url: ImageUrl,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewPhoto {
    pub title: PhotoTitle,
    pub description: Option<SanitizedText>,
    pub image_url: ImageUrl,
}

impl NewPhoto {
    #[must_use]
    pub fn new(title: PhotoTitle, description: Option<SanitizedText>, image_url: ImageUrl) -> Self {
        Self {
            title,
            description,
            image_url,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePhoto {
    pub title: Option<PhotoTitle>,
    pub description: Option<Option<SanitizedText>>,
    pub image_url: Option<ImageUrl>,
}

impl UpdatePhoto {
    pub fn apply_to(&self, photo: &mut Photo) {
        if let Some(title) = &self.title {
            photo.title = title.clone();
        }
        if let Some(description) = &self.description {
            photo.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            photo.image_url = image_url.clone();
        }
    }
}
