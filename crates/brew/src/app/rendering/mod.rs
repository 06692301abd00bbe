mod font;
mod raster;
mod renderer;
mod sprites;

pub use renderer::Renderer;
