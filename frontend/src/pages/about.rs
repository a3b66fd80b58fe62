use leptos::*;

use crate::content;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about">
            <h1>"About us:"</h1>
            <div class="team-grid">
                <For
                    each=content::team
                    key=|member| member.name.clone()
                    children=move |member| {
                        let initials = member.initials();
                        view! {
                            <div class="team-card">
                                <span class="initials-badge">{initials}</span>
                                <h3>{member.name}</h3>
                                <p class="role">{member.role}</p>
                                <p>{member.bio}</p>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
