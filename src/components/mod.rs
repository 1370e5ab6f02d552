pub mod anchor;
pub mod bubbles;
pub mod countdown;
pub mod faq;
pub mod header;
pub mod hero_slider;
pub mod neural_field;
pub mod pricing;
pub mod visibility;
