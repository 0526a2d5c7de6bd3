use std::sync::OnceLock;

static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Process-wide runtime for network work; the UI thread never blocks on it.
pub fn rt() -> &'static tokio::runtime::Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("post-cards-net")
            .enable_all()
            .build()
            .expect("tokio runtime")
    })
}
