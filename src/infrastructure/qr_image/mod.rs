pub mod png_renderer;
