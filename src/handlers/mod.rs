pub mod pages;
pub mod recipes;
