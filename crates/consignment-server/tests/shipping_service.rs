use consignment_core::proto::{
    Consignment, Container, GetRequest, shipping_service_client::ShippingServiceClient,
};
use consignment_server::server::{
    listener::run_server_with_incoming, repository::InMemoryRepository,
    service::ConsignmentService,
};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{codec::CompressionEncoding, transport::Channel};
use tonic_health::pb::{
    HealthCheckRequest, health_check_response::ServingStatus, health_client::HealthClient,
};
use tonic_reflection::pb::v1::{
    ServerReflectionRequest, server_reflection_client::ServerReflectionClient,
    server_reflection_request::MessageRequest, server_reflection_response::MessageResponse,
};

const SHIPPING_SERVICE: &str = "consignment.ShippingService";

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let service: ConsignmentService = ConsignmentService::new(InMemoryRepository::new());

        let handle = tokio::spawn(run_server_with_incoming(
            service,
            TcpListenerStream::new(listener),
            async move {
                let _ = rx.await;
            },
        ));

        Self {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn channel(&self) -> Channel {
        let endpoint = format!("http://{}", self.addr);
        for _ in 0..50 {
            if let Ok(channel) = Channel::from_shared(endpoint.clone()).unwrap().connect().await {
                return channel;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server at {} never became reachable", self.addr);
    }

    async fn client(&self) -> ShippingServiceClient<Channel> {
        ShippingServiceClient::new(self.channel().await)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

fn consignment(id: &str, weight: i32) -> Consignment {
    Consignment {
        id: id.to_string(),
        weight,
        ..Default::default()
    }
}

#[tokio::test]
async fn list_on_fresh_server_is_empty() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let resp = client.get_consignments(GetRequest {}).await.unwrap().into_inner();
    assert!(resp.consignments.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    let resp = client
        .create_consignment(consignment("C1", 75))
        .await
        .unwrap()
        .into_inner();
    assert!(resp.created);
    assert_eq!(resp.consignment, Some(consignment("C1", 75)));

    client
        .create_consignment(consignment("C2", 200))
        .await
        .unwrap();

    let resp = client.get_consignments(GetRequest {}).await.unwrap().into_inner();
    assert_eq!(
        resp.consignments,
        vec![consignment("C1", 75), consignment("C2", 200)]
    );

    server.stop().await;
}

#[tokio::test]
async fn nested_fields_survive_the_wire() {
    let server = TestServer::start().await;
    let mut client = server
        .client()
        .await
        .send_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip);

    let submitted = Consignment {
        id: "C7".to_string(),
        description: "Refrigerated produce".to_string(),
        weight: 55_000,
        containers: vec![
            Container {
                id: "cont-1".to_string(),
                customer_id: "cust-1".to_string(),
                origin: "Rotterdam".to_string(),
                user_id: "user-1".to_string(),
            },
            Container {
                id: "cont-2".to_string(),
                customer_id: "cust-1".to_string(),
                origin: "Rotterdam".to_string(),
                user_id: "user-2".to_string(),
            },
        ],
        vessel_id: "vessel-42".to_string(),
    };

    let resp = client
        .create_consignment(submitted.clone())
        .await
        .unwrap()
        .into_inner();
    assert_eq!(resp.consignment.as_ref(), Some(&submitted));

    let listed = client.get_consignments(GetRequest {}).await.unwrap().into_inner();
    assert_eq!(listed.consignments, vec![submitted]);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn hundred_concurrent_creates_are_all_listed_once() {
    let server = TestServer::start().await;
    let client = server.client().await;

    let handles: Vec<_> = (0..100)
        .map(|i| {
            let mut client = client.clone();
            tokio::spawn(async move {
                client
                    .create_consignment(consignment(&format!("C{i}"), i))
                    .await
                    .map(|resp| resp.into_inner())
            })
        })
        .collect();

    for handle in handles {
        let resp = handle.await.unwrap().unwrap();
        assert!(resp.created);
    }

    let listed = client
        .clone()
        .get_consignments(GetRequest {})
        .await
        .unwrap()
        .into_inner()
        .consignments;
    assert_eq!(listed.len(), 100);

    let ids: HashSet<_> = listed.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids.len(), 100);
    for i in 0..100 {
        assert!(ids.contains(&format!("C{i}")));
    }

    server.stop().await;
}

#[tokio::test]
async fn sequential_creates_are_listed_in_completion_order() {
    let server = TestServer::start().await;
    let mut client = server.client().await;

    for i in 0..20 {
        client
            .create_consignment(consignment(&format!("C{i}"), i))
            .await
            .unwrap();
    }

    let ids: Vec<_> = client
        .get_consignments(GetRequest {})
        .await
        .unwrap()
        .into_inner()
        .consignments
        .into_iter()
        .map(|c| c.id)
        .collect();
    let expected: Vec<_> = (0..20).map(|i| format!("C{i}")).collect();
    assert_eq!(ids, expected);

    server.stop().await;
}

#[tokio::test]
async fn health_reports_serving() {
    let server = TestServer::start().await;
    let mut health = HealthClient::new(server.channel().await);

    let resp = health
        .check(HealthCheckRequest {
            service: SHIPPING_SERVICE.to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(resp.status, ServingStatus::Serving as i32);

    server.stop().await;
}

#[tokio::test]
async fn health_reports_not_serving_on_shutdown() {
    let mut server = TestServer::start().await;
    let channel = server.channel().await;
    let mut health = HealthClient::new(channel);

    let mut updates = health
        .watch(HealthCheckRequest {
            service: SHIPPING_SERVICE.to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    let first = updates.message().await.unwrap().unwrap();
    assert_eq!(first.status, ServingStatus::Serving as i32);

    server.shutdown.take().unwrap().send(()).unwrap();
    let next = tokio::time::timeout(Duration::from_secs(5), updates.message())
        .await
        .expect("no health update after shutdown")
        .unwrap()
        .unwrap();
    assert_eq!(next.status, ServingStatus::NotServing as i32);

    drop(updates);
    drop(health);
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not drain")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn reflection_lists_shipping_service() {
    let server = TestServer::start().await;
    let mut reflection = ServerReflectionClient::new(server.channel().await);

    let request = ServerReflectionRequest {
        host: String::new(),
        message_request: Some(MessageRequest::ListServices(String::new())),
    };
    let mut responses = reflection
        .server_reflection_info(tokio_stream::once(request))
        .await
        .unwrap()
        .into_inner();
    let resp = responses.message().await.unwrap().unwrap();

    let Some(MessageResponse::ListServicesResponse(list)) = resp.message_response else {
        panic!("unexpected reflection response: {:?}", resp.message_response);
    };
    let names: Vec<_> = list.service.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&SHIPPING_SERVICE), "listed: {names:?}");

    drop(responses);
    server.stop().await;
}

#[cfg(unix)]
#[tokio::test]
async fn unix_socket_listener_serves_until_shutdown() {
    use tokio::net::{UnixListener, UnixStream};
    use tokio_stream::wrappers::UnixListenerStream;

    let path = std::env::temp_dir().join(format!("consignment-{}.sock", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path).unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    let service: ConsignmentService = ConsignmentService::new(InMemoryRepository::new());

    let handle = tokio::spawn(run_server_with_incoming(
        service,
        UnixListenerStream::new(listener),
        async move {
            let _ = rx.await;
        },
    ));

    let conn = UnixStream::connect(&path).await.unwrap();
    drop(conn);

    tx.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
    std::fs::remove_file(&path).unwrap();
}
