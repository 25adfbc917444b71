use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Effect {
    ReadDroppedFile(PathBuf),
    CloneRepo {
        owner: String,
        repo: String,
    },
    RequestCompletion {
        message: String,
        persona: String,
    },
}
