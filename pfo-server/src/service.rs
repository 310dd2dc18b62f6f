use crate::error::ApiError;
use pfo_structs::{
    api::{HealthResp, OptimizeReq, OptimizeResp},
    config::ServiceConfig,
};
use tokio::task::spawn_blocking;
use tracing::{info, info_span, Span};

/// Immutable per-process state shared by every request handler.
pub struct Service {
    config: ServiceConfig,
    span: Span,
}

impl Service {
    pub fn new(config: ServiceConfig) -> Self {
        let span = info_span!(
            "service",
            name = %config.service_name,
            version = %config.version
        );
        Self { config, span }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn health(&self) -> HealthResp {
        HealthResp::healthy(&self.config.service_name, &self.config.version)
    }

    pub async fn optimize(&self, body: &[u8]) -> Result<OptimizeResp, ApiError> {
        let challenge = OptimizeReq::from_body(body)?.validate()?;
        let max_cells = self.config.max_table_cells;
        challenge.check_table_budget(max_cells)?;

        info!(
            capacity = challenge.capacity,
            num_items = challenge.items.len(),
            "optimizing portfolio"
        );
        let span = Span::current();
        let solution = spawn_blocking(move || {
            let _entered = span.enter();
            challenge.solve_within_budget(max_cells)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

        info!(
            num_selected = solution.items.len(),
            total_gain = solution.total_gain,
            total_weight = solution.total_weight,
            "optimization completed"
        );
        Ok(OptimizeResp::from(solution))
    }
}
