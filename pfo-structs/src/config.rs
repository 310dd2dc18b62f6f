use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SERVICE_NAME: &str = "Portfolio Optimization Service";
/// 2^24 cells, 128 MiB of u64 gains.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 16_777_216;
pub const DEFAULT_MAX_BODY_BYTES: u64 = 1024 * 1024;

serializable_struct_with_getters! {
    ServiceConfig {
        host: String,
        port: u16,
        service_name: String,
        version: String,
        max_table_cells: usize,
        max_body_bytes: u64,
    }
}

impl ServiceConfig {
    pub fn new(version: &str) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            version: version.to_string(),
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
