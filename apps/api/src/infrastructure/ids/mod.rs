pub mod monotonic;
