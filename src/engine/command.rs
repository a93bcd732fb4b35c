/// A unit of work drained from the task queue
///
/// Commands are self-contained values: everything a worker needs travels in
/// the variant, so any worker can process any command. Shared run state is
/// only reached through the registries the engine owns. The queue hands each
/// command to exactly one worker and it is never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch one catalog page and fan out per-entry commands
    FetchPage { page: u32 },

    /// Entry without a direct IMDB id: resolve via title search, then count
    ResolveAndCount { entry_id: String, title: String },

    /// Entry with a known IMDB id: fetch its page and count image tags
    CountImages {
        entry_id: String,
        title: String,
        imdb_id: String,
    },
}

impl Command {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Command::FetchPage { .. } => "page",
            Command::ResolveAndCount { .. } => "search",
            Command::CountImages { .. } => "count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(Command::FetchPage { page: 1 }.kind(), "page");
        assert_eq!(
            Command::ResolveAndCount {
                entry_id: "1".into(),
                title: "A".into()
            }
            .kind(),
            "search"
        );
        assert_eq!(
            Command::CountImages {
                entry_id: "1".into(),
                title: "A".into(),
                imdb_id: "1234567".into()
            }
            .kind(),
            "count"
        );
    }
}
