use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::photo::{NewPhoto as DomainNewPhoto, Photo as DomainPhoto};
use crate::domain::types::{ImageUrl, PhotoId, PhotoTitle, SanitizedText, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::photos)]
/// Diesel model for [`crate::domain::photo::Photo`].
pub struct Photo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::photos)]
pub struct NewPhoto<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub image_url: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::photos, treat_none_as_null = true)]
pub struct PhotoChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub image_url: &'a str,
}

impl TryFrom<Photo> for DomainPhoto {
    type Error = TypeConstraintError;

    fn try_from(photo: Photo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PhotoId::new(photo.id)?,
            title: PhotoTitle::new(photo.title)?,
            description: SanitizedText::optional(photo.description),
            image_url: ImageUrl::new(photo.image_url)?,
            created_at: photo.created_at,
        })
    }
}

impl<'a> NewPhoto<'a> {
    pub fn from_domain(photo: &'a DomainNewPhoto, created_at: NaiveDateTime) -> Self {
        Self {
            title: photo.title.as_str(),
            description: photo.description.as_ref().map(SanitizedText::as_str),
            image_url: photo.image_url.as_str(),
            created_at,
        }
    }
}

impl<'a> From<&'a DomainPhoto> for PhotoChangeset<'a> {
    fn from(photo: &'a DomainPhoto) -> Self {
        Self {
            title: photo.title.as_str(),
            description: photo.description.as_ref().map(SanitizedText::as_str),
            image_url: photo.image_url.as_str(),
        }
    }
}
