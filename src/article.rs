//! The article record and its JSON wire format.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A single article.
///
/// On the wire the description travels under the key `desc`.
///
/// Decoding is lenient:
/// - absent fields, and fields set to `null`, stay empty;
/// - keys match case-insensitively (`"Title"` sets `title`);
/// - a repeated key overwrites the earlier value;
/// - unknown keys are skipped;
/// - a bare `null` decodes to an empty article.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub content: String,
}

impl Article {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            content: content.into(),
        }
    }

    /// Replaces everything but the `id` with `other`'s values.
    pub fn overwrite_with(&mut self, other: Article) {
        self.title = other.title;
        self.description = other.description;
        self.content = other.content;
    }
}

impl<'de> Deserialize<'de> for Article {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArticleVisitor;

        impl<'de> Visitor<'de> for ArticleVisitor {
            type Value = Article;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an article object or null")
            }

            fn visit_unit<E>(self) -> Result<Article, E>
            where
                E: de::Error,
            {
                Ok(Article::default())
            }

            fn visit_none<E>(self) -> Result<Article, E>
            where
                E: de::Error,
            {
                Ok(Article::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Article, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut article = Article::default();
                while let Some(key) = map.next_key::<String>()? {
                    let field = if key.eq_ignore_ascii_case("id") {
                        &mut article.id
                    } else if key.eq_ignore_ascii_case("title") {
                        &mut article.title
                    } else if key.eq_ignore_ascii_case("desc") {
                        &mut article.description
                    } else if key.eq_ignore_ascii_case("content") {
                        &mut article.content
                    } else {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    };
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        *field = value;
                    }
                }
                Ok(article)
            }
        }

        deserializer.deserialize_any(ArticleVisitor)
    }
}
