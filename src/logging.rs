use flexi_logger::{opt_format, Logger};

use crate::{AgentError, Result};

/// Initializes logging for binaries embedding the agent: level from the
/// environment with an "info" fallback.
pub fn setup_logging() -> Result<()> {
    Logger::try_with_env_or_str("info")
        .map_err(|e| AgentError::Logging(e.to_string()))?
        .format(opt_format)
        .log_to_stderr()
        .start()
        .map_err(|e| AgentError::Logging(e.to_string()))?;
    Ok(())
}
