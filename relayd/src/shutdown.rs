//! Shutdown handling for graceful daemon termination
//!
//! Waits for a termination signal and hands every relay pin back in a safe
//! (off) state before the daemon exits.

use crate::relays::RelayRegistry;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Serve `app` until `signal` resolves, then release every relay.
///
/// Relays are released only after in-flight requests have drained, so a
/// request accepted before the signal still reaches its driver.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    registry: &RelayRegistry,
    signal: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await?;

    release_relays(registry).await;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Turn every relay off and release its pin.
///
/// Safe to call more than once; only the first call touches the drivers.
pub async fn release_relays(registry: &RelayRegistry) {
    let on: Vec<String> = registry
        .list()
        .await
        .into_iter()
        .filter(|(_, on)| *on)
        .map(|(id, _)| id.to_string())
        .collect();

    if !on.is_empty() {
        info!("Switching off relay(s) {} before exit", on.join(", "));
    }

    registry.release_all().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{create_router, AppState};
    use relayswitch_core::RelayId;
    use relayswitch_hardware::{MockSwitch, SwitchDriver};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn raw_request(addr: std::net::SocketAddr, method: &str, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "{} {} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            method, path
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serve_releases_relays_after_server_stops() {
        let switches: Vec<MockSwitch> = [6u8, 13].into_iter().map(MockSwitch::new).collect();
        let probes: Vec<_> = switches.iter().map(MockSwitch::probe).collect();
        let drivers = switches
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn SwitchDriver>)
            .collect();
        let registry = Arc::new(RelayRegistry::new(drivers));
        let app = create_router(AppState::new(registry.clone(), RelayId::from_index(0)).unwrap());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server_registry = registry.clone();
        let server = tokio::spawn(async move {
            serve(listener, app, &server_registry, async move {
                let _ = stop_rx.await;
            })
            .await
        });

        let response = raw_request(addr, "PUT", "/relays/2/on").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
        assert!(probes[1].is_on());
        assert!(probes.iter().all(|p| p.releases() == 0));

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();

        for probe in &probes {
            assert!(!probe.is_on());
            assert_eq!(probe.releases(), 1);
        }
    }

    #[tokio::test]
    async fn test_release_relays_switches_off_and_releases_once() {
        let switches: Vec<MockSwitch> = [6u8, 13].into_iter().map(MockSwitch::new).collect();
        let probes: Vec<_> = switches.iter().map(MockSwitch::probe).collect();
        let drivers = switches
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn SwitchDriver>)
            .collect();
        let registry = RelayRegistry::new(drivers);
        registry.turn_on("1").await.unwrap();

        release_relays(&registry).await;
        release_relays(&registry).await;
        drop(registry);

        for probe in &probes {
            assert!(!probe.is_on());
            assert_eq!(probe.releases(), 1);
        }
    }
}
