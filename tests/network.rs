mod common;

use common::{logger, responder};
use kvs_view::{Controller, Entry, Request, TcpTransport, Transport, TransportError};
use std::net::TcpListener;

#[test]
fn sends_one_request_and_reads_the_response() {
    let (addr, server) = responder(vec![
        r#"{"key":"a","value":"1","message":"Set Success","error":""}"#,
    ]);
    let transport = TcpTransport::new(addr).unwrap();
    let copied: TcpTransport = transport;
    assert_eq!(copied.addr(), transport.addr());

    let response = transport
        .send(&Request::Set {
            key: "a".to_owned(),
            value: "1".to_owned(),
        })
        .unwrap();

    assert_eq!(response.key.as_ref().map(String::as_str), Some("a"));
    assert_eq!(response.value.as_ref().map(String::as_str), Some("1"));
    assert_eq!(response.message.as_ref().map(String::as_str), Some("Set Success"));
    assert_eq!(response.failure(), None);
    assert_eq!(
        server.join().unwrap(),
        vec![Request::Set {
            key: "a".to_owned(),
            value: "1".to_owned()
        }]
    );
}

#[test]
fn missing_response_is_an_error() {
    let (addr, server) = responder(vec![""]);
    let transport = TcpTransport::new(addr).unwrap();

    let err = transport
        .send(&Request::Get {
            key: "a".to_owned(),
        })
        .unwrap_err();

    match err.downcast::<TransportError>() {
        Ok(TransportError::NoResponse) => {}
        other => panic!("unexpected error: {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn garbage_response_is_an_error() {
    let (addr, server) = responder(vec!["<html>502 Bad Gateway</html>"]);
    let transport = TcpTransport::new(addr).unwrap();

    let err = transport
        .send(&Request::Delete {
            key: "a".to_owned(),
        })
        .unwrap_err();

    match err.downcast::<TransportError>() {
        Ok(TransportError::ResponseDeserialisation) => {}
        other => panic!("unexpected error: {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn controller_round_trip_over_tcp() {
    let (addr, server) = responder(vec![
        r#"{"key":"a","value":"1","message":"Set Success"}"#,
        r#"{"key":"b","value":"2","message":"Get Success"}"#,
        r#"{"message":"Delete Success"}"#,
        r#"{"message":"Get Failed","error":"key not found"}"#,
    ]);
    let mut controller = Controller::new(logger(), TcpTransport::new(addr).unwrap());

    controller.set("a,1").unwrap();
    controller.get("b").unwrap();
    controller.delete("a").unwrap();
    assert!(controller.get("zzz").is_err());

    assert_eq!(controller.snapshot(), &[Entry::new("b", "2")][..]);
    assert_eq!(
        server.join().unwrap(),
        vec![
            Request::Set {
                key: "a".to_owned(),
                value: "1".to_owned()
            },
            Request::Get {
                key: "b".to_owned()
            },
            Request::Delete {
                key: "a".to_owned()
            },
            Request::Get {
                key: "zzz".to_owned()
            },
        ]
    );
}

#[test]
fn unreachable_server_leaves_store_unchanged() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut controller = Controller::new(logger(), TcpTransport::new(addr).unwrap());

    let err = controller.set("a,1").unwrap_err();

    assert!(!err.is_validation());
    assert!(controller.snapshot().is_empty());
}
