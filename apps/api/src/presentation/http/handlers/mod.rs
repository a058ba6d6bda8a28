pub mod health;
pub mod poem;
pub mod root;
