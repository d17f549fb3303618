use tracing::warn;

use crate::api::SummaryGateway;

/// Per-name aggregate panel opened from a list screen.
#[derive(Debug)]
pub struct SummaryPanel<S> {
    open: bool,
    name: Option<String>,
    data: Option<S>,
}

impl<S> Default for SummaryPanel<S> {
    fn default() -> Self {
        Self {
            open: false,
            name: None,
            data: None,
        }
    }
}

impl<S> SummaryPanel<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the summary for `name` and opens the panel. A failed fetch
    /// still opens the panel, without data.
    pub async fn show<G>(&mut self, gateway: &G, name: &str)
    where
        G: SummaryGateway<Summary = S> + ?Sized,
    {
        self.data = match gateway.summary(name).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(name, error = %err, "summary fetch failed");
                None
            }
        };
        self.name = Some(name.to_string());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.name = None;
        self.data = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data(&self) -> Option<&S> {
        self.data.as_ref()
    }
}
