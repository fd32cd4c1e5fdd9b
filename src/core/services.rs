use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::SplitError;
use crate::core::estimator::Estimator;
use crate::core::models::{BalanceMap, TransferInstruction};
use crate::core::resolver::{Resolution, Strategy, resolve_balances};
use crate::core::settlement::settle;

#[derive(Serialize, Debug, ToSchema, Clone, PartialEq)]
pub struct ResolvedBalances {
    pub event_id: String,
    pub strategy: Strategy,
    pub balances: BalanceMap,
}

#[derive(Serialize, Debug, ToSchema, Clone, PartialEq)]
pub struct SplitOutcome {
    pub event_id: String,
    pub strategy: Strategy,
    pub balances: BalanceMap,
    pub transfers: Vec<TransferInstruction>,
}

/// Entry point used by the transport layer. Holds the process-wide estimator, which is loaded
/// once at startup and never mutated.
#[derive(Clone, Default)]
pub struct SplitService {
    estimator: Option<Arc<dyn Estimator>>,
}

impl SplitService {
    pub fn new(estimator: Option<Arc<dyn Estimator>>) -> Self {
        SplitService { estimator }
    }

    pub fn has_estimator(&self) -> bool {
        self.estimator.is_some()
    }

    /// Resolves balances without settling them.
    pub fn resolve(&self, method: &str, payload: serde_json::Value) -> Result<ResolvedBalances, SplitError> {
        let event_id = Uuid::new_v4().to_string();
        let Resolution { strategy, balances } = self.run_resolution(&event_id, method, payload)?;
        Ok(ResolvedBalances {
            event_id,
            strategy,
            balances,
        })
    }

    /// Resolves balances and settles them in one event.
    pub fn split(&self, method: &str, payload: serde_json::Value) -> Result<SplitOutcome, SplitError> {
        let event_id = Uuid::new_v4().to_string();
        let Resolution { strategy, balances } = self.run_resolution(&event_id, method, payload)?;
        let transfers = settle(&balances).inspect_err(|e| {
            warn!(%event_id, ?strategy, error = %e, "resolved balances cannot be settled");
        })?;
        info!(%event_id, transfers = transfers.len(), "settlement computed");
        Ok(SplitOutcome {
            event_id,
            strategy,
            balances,
            transfers,
        })
    }

    pub fn settle(&self, balances: &BalanceMap) -> Result<Vec<TransferInstruction>, SplitError> {
        let transfers = settle(balances).inspect_err(|e| warn!(error = %e, "settlement rejected"))?;
        info!(participants = balances.len(), transfers = transfers.len(), "settlement computed");
        Ok(transfers)
    }

    fn run_resolution(
        &self,
        event_id: &str,
        method: &str,
        payload: serde_json::Value,
    ) -> Result<Resolution, SplitError> {
        let resolution = resolve_balances(method, payload, self.estimator.as_deref())
            .inspect_err(|e| warn!(%event_id, method, kind = e.kind(), error = %e, "resolution failed"))?;
        info!(
            %event_id,
            method,
            strategy = ?resolution.strategy,
            participants = resolution.balances.len(),
            "balances resolved"
        );
        Ok(resolution)
    }
}
