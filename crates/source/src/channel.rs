use crate::Source;
use async_trait::async_trait;
use feed_core::Result;
use tokio::sync::mpsc;

/// In-process source fed through a bounded channel.
///
/// Closed once every sender has been dropped and the buffer is drained.
pub struct ChannelSource {
    rx:       mpsc::Receiver<Vec<u8>>,
    endpoint: String,
}

/// Create a source and the sender that feeds it. `bound` must be non-zero.
pub fn channel(bound: usize) -> (mpsc::Sender<Vec<u8>>, ChannelSource) {
    let (tx, rx) = mpsc::channel(bound);
    let source = ChannelSource {
        rx,
        endpoint: "channel".to_string(),
    };
    (tx, source)
}

#[async_trait]
impl Source for ChannelSource {
    async fn receive(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.rx.recv().await)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
