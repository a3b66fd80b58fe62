use cookbook_model::RecipeSummary;
use leptos::ev::SubmitEvent;
use leptos::*;

use crate::content::PLACEHOLDER_CARD_COUNT;
use crate::search::use_search;

#[component]
pub fn RecipesPage() -> impl IntoView {
    let (query_text, set_query_text) = create_signal(String::new());
    let (results, set_results) = create_signal::<Vec<RecipeSummary>>(vec![]);
    let seam = use_search();

    let on_submit = move |ev: SubmitEvent| {
        // Never let the browser navigate on submit.
        ev.prevent_default();
        let seam = seam.clone();
        let query = query_text.get_untracked();
        spawn_local(async move {
            match seam.0.search(&query).await {
                Ok(found) => set_results.set(found),
                Err(err) => log::warn!("search failed: {err}"),
            }
        });
    };

    view! {
        <div class="recipes">
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Enter your recipe"
                    prop:value=query_text
                    on:input=move |ev| set_query_text.set(event_target_value(&ev))
                />
            </form>
            <div class="result-grid">
                {move || {
                    let found = results.get();
                    if found.is_empty() {
                        placeholder_cards()
                    } else {
                        found
                            .into_iter()
                            .map(|recipe| view! {
                                <div class="recipe-card">
                                    <h3>{recipe.title}</h3>
                                    <p>{recipe.description}</p>
                                </div>
                            })
                            .collect_view()
                    }
                }}
            </div>
        </div>
    }
}

fn placeholder_cards() -> View {
    (0..PLACEHOLDER_CARD_COUNT)
        .map(|_| view! {
            <div class="recipe-card placeholder">
                <div class="skeleton-line title"></div>
                <div class="skeleton-line"></div>
                <div class="skeleton-line short"></div>
            </div>
        })
        .collect_view()
}
