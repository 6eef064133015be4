pub mod generator;
pub mod playwright;
pub mod selenium;
