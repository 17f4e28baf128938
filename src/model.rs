use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub rating: u8,
    pub description: Option<String>,
}

/// Request body of `POST`. Every field is optional so validation can report
/// which one is missing instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body of `PATCH`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated bookmark ready to be stored. `id` is a caller-supplied
/// identifier the repository will honor when it is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
    pub rating: u8,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<u8>,
    pub description: Option<String>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.rating.is_none() && self.description.is_none()
    }

    pub fn apply(self, bookmark: &mut Bookmark) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(rating) = self.rating {
            bookmark.rating = rating;
        }
        if let Some(description) = self.description {
            bookmark.description = Some(description);
        }
    }
}
