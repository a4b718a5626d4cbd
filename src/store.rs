//! In-memory article collection.
//!
//! Every operation takes the lock once and finishes its scan and mutation
//! under it. Lookups are linear and return the first record with a matching
//! id; ids are not required to be unique.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::article::Article;

/// Ordered collection of articles, insertion order preserved.
#[derive(Debug, Default)]
pub struct ArticleStore {
    articles: Mutex<Vec<Article>>,
}

impl ArticleStore {
    pub fn new(seed: impl IntoIterator<Item = Article>) -> Self {
        Self { articles: Mutex::new(seed.into_iter().collect()) }
    }

    /// Snapshot of every article in current order.
    pub fn all(&self) -> Vec<Article> {
        self.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<Article> {
        self.lock().iter().find(|a| a.id == id).cloned()
    }

    /// Appends `article` without checking for an existing id.
    pub fn push(&self, article: Article) {
        self.lock().push(article);
    }

    /// Overwrites the title, description and content of the article with
    /// `id`, returning the updated record.
    pub fn update(&self, id: &str, changes: Article) -> Option<Article> {
        let mut articles = self.lock();
        let article = articles.iter_mut().find(|a| a.id == id)?;
        article.overwrite_with(changes);
        Some(article.clone())
    }

    /// Removes the article with `id`, keeping the others in order.
    pub fn remove(&self, id: &str) -> Option<Article> {
        let mut articles = self.lock();
        let index = articles.iter().position(|a| a.id == id)?;
        Some(articles.remove(index))
    }

    // No operation can leave the vector half-modified, so a poisoned lock
    // still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Vec<Article>> {
        self.articles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ArticleStore {
        ArticleStore::new([
            Article::new("1", "one", "d1", "c1"),
            Article::new("2", "two", "d2", "c2"),
            Article::new("3", "three", "d3", "c3"),
        ])
    }

    fn ids(store: &ArticleStore) -> Vec<String> {
        store.all().into_iter().map(|a| a.id).collect()
    }

    #[test]
    fn push_appends_in_order() {
        let store = store();
        store.push(Article::new("4", "", "", ""));
        assert_eq!(ids(&store), ["1", "2", "3", "4"]);
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let store = store();
        store.push(Article::new("1", "dup", "", ""));
        assert_eq!(store.all().len(), 4);
        assert_eq!(store.get("1").unwrap().title, "one");
    }

    #[test]
    fn update_changes_fields_but_not_id() {
        let store = store();
        let updated = store.update("2", Article::new("zzz", "T", "D", "C")).unwrap();
        assert_eq!(updated, Article::new("2", "T", "D", "C"));
        assert_eq!(store.get("2"), Some(updated));
        assert_eq!(store.get("zzz"), None);
    }

    #[test]
    fn update_missing_is_none() {
        let store = store();
        assert_eq!(store.update("9", Article::default()), None);
        assert_eq!(ids(&store), ["1", "2", "3"]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let store = store();
        let removed = store.remove("2").unwrap();
        assert_eq!(removed.title, "two");
        assert_eq!(ids(&store), ["1", "3"]);
        assert_eq!(store.remove("2"), None);
    }

    #[test]
    fn empty_store() {
        let store = ArticleStore::default();
        assert!(store.all().is_empty());
        assert_eq!(store.remove("1"), None);
    }
}
