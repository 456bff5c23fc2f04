use dotaware_store::Message;
use dotaware_view::{LiveView, Render};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error};

/// Sole owner of the [`LiveView`]. Messages from every requester funnel
/// through [`Self::rx_channel`] so the store only ever sees one at a time.
#[derive(Debug)]
pub struct ViewHandler<R: Render> {
    live_view: LiveView<R>,
    rx_channel: UnboundedReceiver<Message>,
}

impl<R: Render> ViewHandler<R> {
    pub fn new(live_view: LiveView<R>, rx_channel: UnboundedReceiver<Message>) -> Self {
        Self {
            live_view,
            rx_channel,
        }
    }

    /// Iterate on trying to receive messages from [`Self::rx_channel`], and
    /// apply each one to the live view.
    #[tracing::instrument(skip_all)]
    pub async fn start(mut self) -> LiveView<R> {
        loop {
            let Some(message) = self.rx_channel.recv().await else {
                error!("Receiving channel closed, stopping view handler");
                return self.live_view;
            };
            match &message {
                Message::Games { updates, new_games } => debug!(
                    "Received games message: {} updates, {} new games",
                    updates.len(),
                    new_games.len()
                ),
                Message::Leagues(leagues) => {
                    debug!("Received leagues message: {} leagues", leagues.len())
                }
                Message::Heroes(heroes) => {
                    debug!("Received heroes message: {} heroes", heroes.len())
                }
            }
            self.live_view.apply(message);
        }
    }
}
