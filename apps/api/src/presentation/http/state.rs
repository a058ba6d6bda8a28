use crate::application::generate_poem::use_case::GeneratePoemUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub generate_poem: Arc<GeneratePoemUseCase>,
}
