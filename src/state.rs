use crate::completion::CompletionClient;

#[derive(Clone)]
pub struct AppState {
    pub completion: CompletionClient,
}
