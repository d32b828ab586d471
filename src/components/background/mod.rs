//! Decorative canvases behind the landing page.

mod component;
mod plexus;
mod pointer;
mod stars;

pub use component::AmbientBackground;
