// Server loop module
// Accepts connections until a shutdown signal arrives

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop until `shutdown` resolves
///
/// Accept errors are logged and the loop keeps going. Connections already
/// handed off keep running on their own tasks after the loop returns.
pub async fn start_server_loop<S>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: S,
) -> std::io::Result<()>
where
    S: Future<Output = ()>,
{
    let local_addr = listener.local_addr()?;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger::log_server_stop(&local_addr);
                return Ok(());
            }
        }
    }
}

/// Resolve on Ctrl-C (SIGINT)
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for shutdown signal: {e}"));
        // Without a signal handler, keep serving forever
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use std::sync::atomic::Ordering;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn test_state(max_connections: Option<u64>) -> Arc<AppState> {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.logging.access_log = false;
        cfg.performance.max_connections = max_connections;
        Arc::new(AppState::new(&cfg))
    }

    async fn roundtrip(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_products_over_tcp() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = test_state(None);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let shutdown = async move {
            let _ = stop_rx.await;
        };
        let server = tokio::spawn(start_server_loop(listener, Arc::clone(&state), shutdown));

        let health = roundtrip(
            addr,
            "GET /healthz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(health.starts_with("HTTP/1.1 200 OK"), "{health}");
        assert!(health.ends_with("ok"), "{health}");

        let body = r#"{"sku":"ABC-1","weight":500}"#;
        let put = roundtrip(
            addr,
            &format!(
                "POST /products/42/details HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            ),
        )
        .await;
        assert!(put.starts_with("HTTP/1.1 204 No Content"), "{put}");

        let get = roundtrip(
            addr,
            "GET /products/42 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(get.starts_with("HTTP/1.1 200 OK"), "{get}");
        assert!(get.contains("application/json"), "{get}");
        assert!(get.contains(r#""sku":"ABC-1""#), "{get}");

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_rejects_past_connection_cap() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = test_state(Some(0));
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let shutdown = async move {
            let _ = stop_rx.await;
        };
        let server = tokio::spawn(start_server_loop(listener, Arc::clone(&state), shutdown));

        // Closed without a response
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        assert!(response.is_empty());
        assert_eq!(state.active_connections.load(Ordering::SeqCst), 0);

        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
