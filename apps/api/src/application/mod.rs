pub mod generate_poem;
