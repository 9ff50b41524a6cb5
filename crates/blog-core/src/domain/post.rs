use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a post, stored as two name parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Single display string, e.g. "Bilbo Baggins".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// BlogPost entity - the only persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a generated ID and timestamps.
    pub fn new(post: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: post.title,
            author: post.author,
            content: post.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy the set fields of `changes` onto this post.
    ///
    /// Returns `false` when the change set was empty and nothing was touched.
    pub fn apply(&mut self, changes: PostChanges) -> bool {
        if changes.is_empty() {
            return false;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
        true
    }
}

/// Fields required to create a post. Also the shape of the seed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author: Author,
    pub content: String,
}

/// The only fields an update may change.
///
/// Anything else a client sends never reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub author: Option<Author>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.content.is_none()
    }
}

/// Lookup criteria for `find_one` style queries. Set fields are AND-ed;
/// the default filter matches any post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub id: Option<Uuid>,
    pub title: Option<String>,
}

impl PostFilter {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        self.id.is_none_or(|id| post.id == id)
            && self.title.as_deref().is_none_or(|title| post.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlogPost {
        BlogPost::new(NewPost {
            title: "new post".to_string(),
            author: Author::new("Alex", "Pogromko"),
            content: "qwerty".to_string(),
        })
    }

    #[test]
    fn test_display_name_joins_parts() {
        assert_eq!(Author::new("Bilbo", "Baggins").display_name(), "Bilbo Baggins");
        assert_eq!(Author::new("Gandalf", "").display_name(), "Gandalf");
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut post = sample();
        let before = post.clone();

        let changed = post.apply(PostChanges {
            title: Some("changed post".to_string()),
            ..PostChanges::default()
        });

        assert!(changed);
        assert_eq!(post.title, "changed post");
        assert_eq!(post.content, before.content);
        assert_eq!(post.author, before.author);
        assert_eq!(post.created_at, before.created_at);
        assert_eq!(post.id, before.id);
    }

    #[test]
    fn test_apply_empty_changes_is_noop() {
        let mut post = sample();
        let before = post.clone();
        assert!(!post.apply(PostChanges::default()));
        assert_eq!(post, before);
    }

    #[test]
    fn test_filter_matching() {
        let post = sample();
        assert!(PostFilter::default().matches(&post));
        assert!(PostFilter::by_id(post.id).matches(&post));
        assert!(PostFilter::by_title("new post").matches(&post));
        assert!(!PostFilter::by_id(Uuid::new_v4()).matches(&post));
        assert!(
            !PostFilter {
                id: Some(post.id),
                title: Some("other".to_string()),
            }
            .matches(&post)
        );
    }

    #[test]
    fn test_new_post_deserializes_camel_case_author() {
        let json = r#"{"title":"t","author":{"firstName":"Bilbo","lastName":"Baggins"},"content":"c"}"#;
        let post: NewPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.author, Author::new("Bilbo", "Baggins"));
    }
}
