// HTTP handlers

pub mod health;
pub mod pokemon;
pub mod teams;
