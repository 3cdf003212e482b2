//! Previous/next linking between sibling pages.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::front_matter::FrontMatter;
use crate::page::{NavLink, Navigation, PageId};

/// What navigation linking needs to know about a page before it is loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct PageSummary {
    /// Page identifier.
    pub id: PageId,
    /// Display title.
    pub title: String,
    /// Page URL.
    pub permalink: String,
    /// Front matter (`sidebar_position`, `pagination_prev`, `pagination_next`).
    pub front_matter: FrontMatter,
}

impl PageSummary {
    fn link(&self) -> NavLink {
        NavLink {
            id: self.id.clone(),
            title: self.title.clone(),
            permalink: self.permalink.clone(),
        }
    }

    fn directory(&self) -> &str {
        self.id.as_str().rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

/// Compute previous/next links for a set of pages.
///
/// Pages are ordered by directory (root first), then `sidebar_position`
/// (pages without one last), then id. Each page links to its neighbors in
/// that order unless its front matter names them explicitly with
/// `pagination_prev` / `pagination_next`; a `null` value removes the link.
///
/// Explicit references to unknown ids are dropped with a warning.
#[must_use]
pub fn link_navigation(pages: &[PageSummary]) -> HashMap<PageId, Navigation> {
    let mut ordered = pages.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| compare(a, b));

    let by_id = pages
        .iter()
        .map(|page| (page.id.as_str(), page))
        .collect::<HashMap<_, _>>();

    let explicit = |page: &PageSummary, target: &str, key: &str| -> Option<NavLink> {
        if let Some(found) = by_id.get(target) {
            Some(found.link())
        } else {
            tracing::warn!(id = %page.id, %target, key, "Pagination target does not exist");
            None
        }
    };

    ordered
        .iter()
        .enumerate()
        .map(|(i, &page)| {
            let previous = match &page.front_matter.pagination_prev {
                Some(Some(target)) => explicit(page, target, "pagination_prev"),
                Some(None) => None,
                None => i.checked_sub(1).map(|j| ordered[j].link()),
            };
            let next = match &page.front_matter.pagination_next {
                Some(Some(target)) => explicit(page, target, "pagination_next"),
                Some(None) => None,
                None => ordered.get(i + 1).map(|p| p.link()),
            };
            (page.id.clone(), Navigation { previous, next })
        })
        .collect()
}

fn compare(a: &PageSummary, b: &PageSummary) -> Ordering {
    let position = match (a.front_matter.sidebar_position, b.front_matter.sidebar_position) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    a.directory()
        .cmp(b.directory())
        .then(position)
        .then_with(|| a.id.cmp(&b.id))
}
