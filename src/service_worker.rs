//! Service worker generation.
//!
//! The worker is a fixed script with two values filled in: the cache name
//! and the list of URLs to precache on install.
//!
//! - **install**: `cache.addAll(urls)`. All-or-nothing: if any URL fails to
//!   fetch, installation fails and the worker never activates.
//! - **fetch**: cached response if present, network otherwise.
//!
//! The cache name is the project name, unversioned. A browser that already
//! installed the worker keeps serving its cached copies after a rebuild.

use serde::Serialize;

/// Relative URLs the service worker precaches, in insertion order.
///
/// A URL can appear only once; pushing a duplicate is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CachedResourceList {
    urls: Vec<String>,
}

impl CachedResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `url`; returns `false` if it was already listed.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.contains(&url) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Render the service worker script.
///
/// Both values are embedded as JSON literals, which are valid JavaScript.
pub fn build_service_worker(
    cache_name: &str,
    cached: &CachedResourceList,
) -> Result<String, serde_json::Error> {
    let name = serde_json::to_string(cache_name)?;
    let urls = serde_json::to_string(cached)?;
    Ok(format!(
        r#"// sw.js, generated by pwap8
var cacheName = {name};

self.addEventListener('install', function(event) {{
    event.waitUntil(
        caches.open(cacheName).then(function(cache) {{ return cache.addAll({urls}); }})
    );
}});

self.addEventListener('fetch', function(event) {{
    event.respondWith(
        caches.match(event.request).then(function(response) {{ return response || fetch(event.request); }})
    );
}});
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> CachedResourceList {
        let mut list = CachedResourceList::new();
        for url in ["index.html", "export.js", "sw.js", "mg.manifest"] {
            list.push(url);
        }
        list
    }

    #[test]
    fn push_ignores_duplicates() {
        let mut list = sample_list();
        assert!(!list.push("sw.js"));
        assert!(list.push("images/mg-icon-32.png"));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let list = sample_list();
        assert_eq!(list.urls(), ["index.html", "export.js", "sw.js", "mg.manifest"]);
    }

    #[test]
    fn list_serializes_as_plain_array() {
        let json = serde_json::to_string(&sample_list()).unwrap();
        assert_eq!(json, r#"["index.html","export.js","sw.js","mg.manifest"]"#);
    }

    #[test]
    fn script_embeds_cache_name_and_urls() {
        let sw = build_service_worker("My Game", &sample_list()).unwrap();
        assert!(sw.contains(r#"var cacheName = "My Game";"#));
        assert!(sw.contains(r#"cache.addAll(["index.html","export.js","sw.js","mg.manifest"])"#));
        assert!(sw.starts_with("// sw.js, generated by pwap8\n"));
    }

    #[test]
    fn script_has_install_and_fetch_handlers() {
        let sw = build_service_worker("g", &sample_list()).unwrap();
        assert!(sw.contains("addEventListener('install'"));
        assert!(sw.contains("addEventListener('fetch'"));
        assert!(sw.contains("response || fetch(event.request)"));
    }

    #[test]
    fn cache_name_is_escaped() {
        let sw = build_service_worker(r#"Bob's "Game""#, &sample_list()).unwrap();
        assert!(sw.contains(r#"var cacheName = "Bob's \"Game\"";"#));
    }

    #[test]
    fn braces_in_values_are_kept_literally() {
        let mut list = CachedResourceList::new();
        list.push("{name}.manifest");
        let sw = build_service_worker("{urls}", &list).unwrap();
        assert!(sw.contains(r#"var cacheName = "{urls}";"#));
        assert!(sw.contains(r#"cache.addAll(["{name}.manifest"])"#));
    }

    #[test]
    fn script_is_deterministic() {
        let a = build_service_worker("g", &sample_list()).unwrap();
        let b = build_service_worker("g", &sample_list()).unwrap();
        assert_eq!(a, b);
    }
}
