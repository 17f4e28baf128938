//! Request validation and output sanitization for bookmarks.
//!
//! Everything here is a pure function. Validation runs before any repository
//! call, and sanitization only ever touches the copy being sent to a client.

use crate::error::{Field, ValidationError};
use crate::model::{Bookmark, BookmarkPatch, BookmarkPayload, NewBookmark, PatchPayload};

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

fn is_blank(value: &Option<String>) -> bool {
    value.as_ref().map_or(true, |v| v.is_empty())
}

/// Fails with the first of `title`, `url`, `rating` that is absent.
pub fn validate_required_fields(payload: &BookmarkPayload) -> Result<(), ValidationError> {
    if is_blank(&payload.title) {
        return Err(ValidationError::MissingField(Field::Title));
    }
    if is_blank(&payload.url) {
        return Err(ValidationError::MissingField(Field::Url));
    }
    if payload.rating.is_none() {
        return Err(ValidationError::MissingField(Field::Rating));
    }
    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<u8, ValidationError> {
    // the column is an integer, so 4.5 is rejected along with 0 and 6
    if !(MIN_RATING..=MAX_RATING).contains(&rating) || rating.fract() != 0.0 {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(rating as u8)
}

pub fn validate_patch_non_empty(payload: &PatchPayload) -> Result<(), ValidationError> {
    if payload.title.is_none()
        && payload.url.is_none()
        && payload.rating.is_none()
        && payload.description.is_none()
    {
        return Err(ValidationError::EmptyUpdate);
    }
    Ok(())
}

impl BookmarkPayload {
    pub fn into_new_bookmark(self) -> Result<NewBookmark, ValidationError> {
        validate_required_fields(&self)?;

        let rating = self.rating.ok_or(ValidationError::MissingField(Field::Rating))?;

        Ok(NewBookmark {
            id: self.id,
            rating: validate_rating(rating)?,
            title: self.title.ok_or(ValidationError::MissingField(Field::Title))?,
            url: self.url.ok_or(ValidationError::MissingField(Field::Url))?,
            description: self.description,
        })
    }
}

impl PatchPayload {
    pub fn into_patch(self) -> Result<BookmarkPatch, ValidationError> {
        validate_patch_non_empty(&self)?;

        if self.title.as_deref() == Some("") {
            return Err(ValidationError::MissingField(Field::Title));
        }
        if self.url.as_deref() == Some("") {
            return Err(ValidationError::MissingField(Field::Url));
        }
        let rating = self.rating.map(validate_rating).transpose()?;

        Ok(BookmarkPatch {
            title: self.title,
            url: self.url,
            rating,
            description: self.description,
        })
    }
}

/// Escapes the characters that are significant in HTML text and attribute
/// values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn sanitize_for_output(bookmark: &Bookmark) -> Bookmark {
    Bookmark {
        id: bookmark.id,
        title: escape_html(&bookmark.title),
        url: escape_html(&bookmark.url),
        rating: bookmark.rating,
        description: bookmark.description.as_deref().map(escape_html),
    }
}
