mod about;
mod home;
mod login;
mod recipes;

pub use about::AboutPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use recipes::RecipesPage;
