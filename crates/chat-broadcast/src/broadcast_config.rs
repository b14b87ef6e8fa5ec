/// Tunables for one broadcast channel instance.
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Maximum registered subscribers across all groups.
    pub max_subscribers: usize,
    /// Per-subscriber delivery queue depth. A subscriber whose queue
    /// fills up is disconnected rather than buffered without bound.
    pub send_buffer_size: usize,
    /// Maximum messages loaded per catch-up query.
    pub catch_up_limit: i64,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            max_subscribers: 10_000,
            send_buffer_size: 100,
            catch_up_limit: 500,
        }
    }
}
