pub mod api;
pub mod content;
pub mod nav;
pub mod pages;
pub mod search;
pub mod session;
