pub mod chat_area;
pub mod gallery;
pub mod input_bar;
