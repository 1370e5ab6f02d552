mod component;
mod config;
mod frame_loop;
mod render;
mod state;
mod types;

pub use component::NeuralFieldCanvas;
