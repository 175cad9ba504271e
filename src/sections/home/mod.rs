mod hero;

pub use hero::HomeHeroSection;
