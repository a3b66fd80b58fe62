use leptos::*;

use crate::content::{ABOUT_BLURB, HERO, SITE_NAME, STATS};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <section class="hero fade-up">
                <span class="pill">{SITE_NAME}</span>
                <h1>{HERO.tagline}</h1>
                <p>{HERO.description}</p>
                <a href=HERO.cta_link class="btn">{HERO.cta_text}</a>
                <img class="hero-photo" src="/static/kitchen.svg" alt=""/>
            </section>
            <hr class="divider"/>
            <section class="about-blurb">
                <div class="section-label">"About"</div>
                <div>
                    <h2>{ABOUT_BLURB.heading}</h2>
                    {ABOUT_BLURB
                        .paragraphs
                        .iter()
                        .map(|paragraph| view! { <p>{*paragraph}</p> })
                        .collect_view()}
                </div>
            </section>
            <div class="stats">
                {STATS
                    .iter()
                    .map(|stat| view! {
                        <div class="stat-card">
                            <span class="stat-number">{stat.number}</span>
                            <span class="stat-label">{stat.label}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
