/* packages/server/adapter/axum/src/lib.rs */

mod error;
mod handler;
mod middleware;

use ceremonia_core::CeremoniaServer;
use tracing::info;

/// Re-export ceremonia-core for convenience
pub use ceremonia_core;
pub use middleware::ResolvedLocale;

/// Extension trait that converts a `CeremoniaServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for CeremoniaServer {
  fn into_axum_router(self) -> axum::Router {
    handler::build_router(self.into_parts())
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!("Ceremonia running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn into_axum_router_builds_without_panic() {
    let server = CeremoniaServer::new();
    let _router = server.into_axum_router();
  }
}
