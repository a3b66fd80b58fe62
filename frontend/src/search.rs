use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use cookbook_model::RecipeSummary;
use leptos::{provide_context, use_context};

use crate::api;

/// The seam where a real recipe-search backend attaches: take a free-text
/// query, return an ordered sequence of summaries to render as cards.
pub trait SearchCollaborator {
    fn search(
        &self,
        query: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecipeSummary>, api::Error>>>>;
}

/// Placeholder collaborator until a backend exists: records the query and
/// returns nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlySearch;

impl SearchCollaborator for LogOnlySearch {
    fn search(
        &self,
        query: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecipeSummary>, api::Error>>>> {
        log::info!("search submitted with no backend wired: {query:?}");
        Box::pin(async { Ok(vec![]) })
    }
}

#[derive(Clone)]
pub struct SearchSeam(pub Rc<dyn SearchCollaborator>);

pub fn provide_default() {
    provide_context(SearchSeam(Rc::new(LogOnlySearch)));
}

pub fn use_search() -> SearchSeam {
    use_context::<SearchSeam>().expect("SearchSeam must be provided at the app root")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn log_only_search_discards_every_query() {
        for query in ["", "chicken", "3 Onions,"] {
            let results = block_on(LogOnlySearch.search(query)).expect("placeholder never fails");
            assert!(results.is_empty());
        }
    }
}
