pub mod poem;
