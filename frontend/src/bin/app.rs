use leptos::*;
use leptos_router::{Route, Router, Routes};

use frontend::nav::{Footer, NavBar};
use frontend::pages::{AboutPage, HomePage, LoginPage, RecipesPage};
use frontend::search;
use frontend::session::SessionContext;

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! {
            <App />
        }
    })
}

#[component]
fn App() -> impl IntoView {
    SessionContext::provide();
    search::provide_default();
    view! {
        <Router>
            <NavBar/>
            <main class="content">
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/recipes" view=RecipesPage/>
                    <Route path="/about" view=AboutPage/>
                    <Route path="/login" view=LoginPage/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
