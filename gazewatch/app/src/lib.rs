pub mod overlay;
pub mod pipeline;
pub mod source;
pub mod status;
pub mod strategies;
