mod cart;
mod home;
mod not_found;

pub use cart::CartPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
