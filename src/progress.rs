use tracing::info;

/// Receives progress events from the paginator and the enricher.
///
/// Collection itself never depends on what a reporter does with the events.
pub trait ProgressReporter {
    /// A new phase begins; `total` is the expected item count when known.
    fn start(&mut self, label: &str, total: Option<u64>);

    /// `count` more items were fetched.
    fn advance(&mut self, count: u64);

    /// Running number of successfully collected users.
    fn collected(&mut self, count: u64);

    fn finish(&mut self);
}

/// Reporter that writes progress through `tracing`.
#[derive(Debug, Default)]
pub struct LogProgress {
    label: String,
    total: Option<u64>,
    position: u64,
    collected: u64,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogProgress {
    fn start(&mut self, label: &str, total: Option<u64>) {
        self.label = label.to_string();
        self.total = total;
        self.position = 0;
        self.collected = 0;
        match total {
            Some(total) => info!(total, "{}", self.label),
            None => info!("{}", self.label),
        }
    }

    fn advance(&mut self, count: u64) {
        self.position += count;
        match self.total {
            Some(total) => info!(position = self.position, total, "{}", self.label),
            None => info!(position = self.position, "{}", self.label),
        }
    }

    fn collected(&mut self, count: u64) {
        self.collected = count;
        info!(users_collected = count, "{}", self.label);
    }

    fn finish(&mut self) {
        info!(
            position = self.position,
            users_collected = self.collected,
            "{} finished",
            self.label
        );
    }
}

/// Reporter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _label: &str, _total: Option<u64>) {}
    fn advance(&mut self, _count: u64) {}
    fn collected(&mut self, _count: u64) {}
    fn finish(&mut self) {}
}
