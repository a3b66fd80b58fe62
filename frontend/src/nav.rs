use leptos::*;

use crate::content::SITE_NAME;

#[component]
pub fn NavBar() -> impl IntoView {
    view! {
        <nav class="nav">
            <a href="/" class="wordmark">
                <img class="logo" src="/static/logo.svg" alt=""/>
                <strong>{SITE_NAME}</strong>
            </a>
            <a href="/">"Home"</a>
            <a href="/recipes">"Recipes"</a>
            <a href="/about">"About"</a>
            <div class="nav-right">
                <a href="/login">"Login"</a>
            </div>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();
    view! {
        <footer class="footer">{format!("{year} {SITE_NAME}")}</footer>
    }
}
