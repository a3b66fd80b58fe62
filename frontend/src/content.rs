//! Site copy as immutable configuration data, kept out of the markup so it
//! can be externalized without touching rendering logic.

use cookbook_model::TeamMember;

pub const SITE_NAME: &str = "Dr. Dan's Cookbook";

pub struct Hero {
    pub tagline: &'static str,
    pub description: &'static str,
    pub cta_text: &'static str,
    pub cta_link: &'static str,
}

pub const HERO: Hero = Hero {
    tagline: "Find recipes based on basic filters",
    description: "If you have ever found yourself trying to find something to do \
        with a random assortment of ingredients, this website is for you. Our \
        catalog of recipes can be searched with a wide variety of filters.",
    cta_text: "Search Recipes Quickly",
    cta_link: "/recipes",
};

pub struct AboutBlurb {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
}

pub const ABOUT_BLURB: AboutBlurb = AboutBlurb {
    heading: "About This Website",
    paragraphs: &[
        "This website was made by a group of software engineers who wanted a \
         place that stores various recipe types while letting users search for \
         them based on certain qualities of the dish.",
        "If you would like to find out more about the developers, there is an \
         about page link at the top of the website.",
    ],
};

pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 3] = [
    Stat {
        number: "X many",
        label: "Recipes in the catalog",
    },
    Stat {
        number: "X many",
        label: "Filters to search by",
    },
    Stat {
        number: "X many",
        label: "Cooks finding dinner ideas",
    },
];

/// Inert skeleton cards shown in the results area until a real search
/// collaborator is wired.
pub const PLACEHOLDER_CARD_COUNT: usize = 6;

pub fn team() -> Vec<TeamMember> {
    [
        ("Tristan Coull", "Frontend Developer"),
        ("Caelan Eakman", "Frontend Developer"),
        ("Jamie Farrow", "Backend Developer"),
        ("Miles Taylor", "Scraper & Data"),
        ("Amin Weinman", "Design"),
    ]
    .into_iter()
    .map(|(name, role)| TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        bio: "Bio coming soon.".to_string(),
    })
    .collect()
}
