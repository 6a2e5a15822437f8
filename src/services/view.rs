//! Dashboard activation lifecycle.
//!
//! Each activation publishes `Loading` immediately, runs the builder on the
//! runtime, and replaces the snapshot wholesale once it settles. Dropping the
//! [`ViewHandle`] tears the view down: in-flight fetches are abandoned and
//! their results are never published.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::db::DataSource;
use crate::errors::AppError;
use crate::models::dashboard::ViewState;
use crate::services::dashboard;

/// The presentation side of one activation.
#[derive(Debug)]
pub struct ViewHandle {
    activation_id: Uuid,
    rx: watch::Receiver<Arc<ViewState>>,
}

impl ViewHandle {
    pub fn activation_id(&self) -> Uuid {
        self.activation_id
    }

    /// Latest published snapshot.
    pub fn current(&self) -> Arc<ViewState> {
        self.rx.borrow().clone()
    }

    /// Wait until the activation reaches `Ready` or `Failed`.
    pub async fn settled(&mut self) -> Result<Arc<ViewState>, AppError> {
        let activation_id = self.activation_id;
        let state = self
            .rx
            .wait_for(|state| state.is_settled())
            .await
            .map_err(|_| {
                AppError::Internal(format!("activation {activation_id} ended without settling"))
            })?;
        Ok(state.clone())
    }
}

/// Start a new activation against `source`. Must be called within a tokio
/// runtime.
pub fn activate<S>(source: Arc<S>) -> ViewHandle
where
    S: DataSource + 'static,
{
    let activation_id = Uuid::now_v7();
    let (tx, rx) = watch::channel(Arc::new(ViewState::Loading));
    let span = tracing::info_span!("dashboard_activation", %activation_id);

    tokio::spawn(
        async move {
            tracing::debug!("Dashboard activation started");
            tokio::select! {
                state = dashboard::build_view_state(source.as_ref()) => publish(&tx, state),
                _ = tx.closed() => {
                    tracing::warn!("View torn down before dashboard settled; discarding in-flight results");
                }
            }
        }
        .instrument(span),
    );

    ViewHandle { activation_id, rx }
}

fn publish(tx: &watch::Sender<Arc<ViewState>>, state: ViewState) {
    let ready = matches!(state, ViewState::Ready(_));
    if tx.send(Arc::new(state)).is_err() {
        tracing::warn!("View torn down while publishing; dashboard state discarded");
        return;
    }
    tracing::info!(ready, "Dashboard state published");
}
