pub mod catalog;
pub mod collection;
pub mod demo;
pub mod error;
pub mod filters;
pub mod model;
pub mod pipeline;
pub mod selection;
pub mod session;
pub mod shopping;
pub mod spoonacular;
