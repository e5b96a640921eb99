/// Snapshot of how far a session has come.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub asked: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
