//! Serve command handler.

use crate::error::Result;
use crate::server;
use crate::store::Store;
use tracing::warn;

/// Run the legacy-file migration check, then bind the HTTP API.
///
/// Migration is best-effort: a failure is logged and startup continues
/// with whatever `read()` can serve.
pub async fn serve_command(store: Store, port: u16) -> Result<()> {
    if let Err(e) = store.migrate_legacy() {
        warn!(error = %e, "legacy checklist migration failed, continuing");
    }
    server::serve(store, port).await
}
