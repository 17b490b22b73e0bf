//! Account information tool definition.
//!
//! Returns the terminal's account record (login, balance, equity, ...).

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{decode_params, error_value, record_value};
use crate::domains::tools::terminal::TradingTerminal;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the account information tool (none required).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountInfoParams {}

// ============================================================================
// Tool Definition
// ============================================================================

/// Account information tool.
pub struct AccountInfoTool;

impl AccountInfoTool {
    /// Tool name as registered in the gateway (without namespace).
    pub const NAME: &'static str = "get_account_info";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(_params: &AccountInfoParams, terminal: &dyn TradingTerminal) -> Value {
        info!("Account info tool called");

        match terminal.account_info() {
            Ok(record) => record_value(record),
            Err(e) => error_value(e),
        }
    }

    /// Decode raw arguments and run the tool.
    pub fn handler(arguments: Value, terminal: &dyn TradingTerminal) -> Result<Value, ToolError> {
        let params: AccountInfoParams = decode_params(arguments)?;
        Ok(Self::execute(&params, terminal))
    }
}
