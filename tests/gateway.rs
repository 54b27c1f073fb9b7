//! End-to-end tests of the gateway router against a mocked provider
//!
//! Each test drives the axum router in-process and counts what reaches the
//! provider through wiremock.

mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{Gateway, BEARER};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const KINDS: [&str; 10] = [
    "virtualmachine",
    "kubernetescluster",
    "namespace",
    "firewall",
    "ip",
    "database",
    "objectstorage",
    "objectstoragecredential",
    "domain",
    "sshkey",
];

mod credential_gate {
    use super::*;

    #[tokio::test]
    async fn test_missing_header_never_reaches_provider() {
        let gw = Gateway::start().await;
        gw.mount_empty_provider().await;

        for kind in KINDS {
            for op in ["list", "get", "create", "delete"] {
                let (status, body) = gw.post(&format!("/v1/{kind}/{op}"), None, json!({})).await;
                assert_eq!(status, StatusCode::UNAUTHORIZED, "{kind}/{op}");
                assert_eq!(body["code"], "unauthenticated");
                assert_eq!(body["error"], "Request unauthenticated with bearer");
            }
        }

        assert_eq!(gw.provider_calls().await, 0);
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_rejected() {
        let gw = Gateway::start().await;
        let (status, _) = gw
            .post("/v1/sshkey/list", Some("Basic dXNlcjpwYXNz"), json!({}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(gw.provider_calls().await, 0);
    }

    #[tokio::test]
    async fn test_empty_bearer_fails_at_first_use() {
        let gw = Gateway::start().await;
        let (status, body) = gw.post("/v1/sshkey/list", Some("Bearer "), json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "no provider session for this call");
        assert_eq!(gw.provider_calls().await, 0);
    }

    #[tokio::test]
    async fn test_bare_scheme_is_rejected() {
        let gw = Gateway::start().await;
        gw.mount_empty_provider().await;
        let (status, body) = gw.post("/v1/sshkey/list", Some("Bearer"), json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Request unauthenticated with bearer");
        assert_eq!(gw.provider_calls().await, 0);
    }

    #[tokio::test]
    async fn test_scheme_is_case_insensitive() {
        let gw = Gateway::start().await;
        gw.mount_list("/v2/sshkeys", json!([])).await;
        let (status, body) = gw
            .post("/v1/sshkey/list", Some("bearer test-token"), json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "SSHKeyList");
    }

    #[tokio::test]
    async fn test_provider_rejection_is_unauthenticated() {
        let gw = Gateway::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/sshkeys"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "authentication_invalid_key",
                "reason": "The API key provided is invalid"
            })))
            .mount(&gw.provider)
            .await;

        let (status, body) = gw.call("/v1/sshkey/list", json!({})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "The API key provided is invalid");
    }

    #[tokio::test]
    async fn test_discovery_and_health_are_open() {
        let gw = Gateway::start().await;

        let (status, kinds) = gw.get("/v1/kinds").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(kinds.as_array().unwrap().len(), KINDS.len());

        let (status, health) = gw.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "ok");
    }
}

mod login_check {
    use super::*;

    #[tokio::test]
    async fn test_valid_token() {
        let gw = Gateway::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts"))
            .and(wiremock::matchers::bearer_token("other-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1, "per_page": 100, "pages": 1,
                "items": [{"id": "acc-1"}]
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;

        let (status, body) = gw
            .post("/v1/login/check", Some("Bearer "), json!({"token": "other-key"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"valid": true}));
    }

    #[tokio::test]
    async fn test_rejected_token_is_invalid_not_an_error() {
        let gw = Gateway::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/accounts"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "reason": "The API key provided is invalid"
            })))
            .mount(&gw.provider)
            .await;

        let (status, body) = gw.call("/v1/login/check", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"valid": false}));
    }
}

mod translators {
    use super::*;

    /// Deleting something that does not exist is a no-op for every kind
    #[tokio::test]
    async fn test_delete_missing_is_null_for_every_kind() {
        let gw = Gateway::start().await;
        gw.mount_empty_provider().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&gw.provider)
            .await;

        for kind in KINDS {
            let (status, body) = gw
                .call(&format!("/v1/{kind}/delete"), json!({"name": "ghost"}))
                .await;
            assert_eq!(status, StatusCode::OK, "{kind}: {body}");
            assert!(body.is_null(), "{kind}: {body}");
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let gw = Gateway::start().await;
        gw.mount_empty_provider().await;

        let (status, body) = gw.call("/v1/ip/get", json!({"name": "ghost"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["error"], "unable to find ghost, zero matches");
    }

    #[tokio::test]
    async fn test_get_without_selector_is_invalid() {
        let gw = Gateway::start().await;
        let (status, body) = gw.call("/v1/database/get", json!({"namespace": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_argument");
        assert_eq!(gw.provider_calls().await, 0);
    }

    #[tokio::test]
    async fn test_ssh_key_create_then_get() {
        let gw = Gateway::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/sshkeys"))
            .and(body_json(json!({"name": "laptop", "public_key": "ssh-ed25519 AAAA"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "k-1", "result": "success"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_list(
            "/v2/sshkeys",
            json!([{
                "id": "k-1",
                "name": "laptop",
                "public_key": "ssh-ed25519 AAAA",
                "fingerprint": "SHA256:abc",
                "created_at": "2024-05-01T12:00:00Z"
            }]),
        )
        .await;

        let (status, created) = gw
            .call(
                "/v1/sshkey/create",
                json!({
                    "metadata": {"name": "laptop"},
                    "spec": {"publicKey": "ssh-ed25519 AAAA"}
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["metadata"]["name"], "laptop");
        assert_eq!(created["metadata"]["uid"], "k-1");
        assert_eq!(created["status"]["fingerPrint"], "SHA256:abc");
        assert_eq!(created["status"]["state"], "Active");

        let (_, fetched) = gw.call("/v1/sshkey/get", json!({"name": "laptop"})).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_delete_found_returns_snapshot() {
        let gw = Gateway::start().await;
        gw.mount_list("/v2/sshkeys", json!([{"id": "k-1", "name": "laptop"}]))
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v2/sshkeys/k-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "success"})))
            .expect(1)
            .mount(&gw.provider)
            .await;

        let (status, body) = gw.call("/v1/sshkey/delete", json!({"id": "k-1"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["uid"], "k-1");
    }

    #[tokio::test]
    async fn test_delete_by_name_prefix_is_noop() {
        let gw = Gateway::start().await;
        gw.mount_list("/v2/sshkeys", json!([{"id": "k-2", "name": "web-2"}]))
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&gw.provider)
            .await;

        let (status, body) = gw.call("/v1/sshkey/delete", json!({"name": "web"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null(), "{body}");

        let (status, body) = gw.call("/v1/sshkey/get", json!({"name": "web"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn test_namespace_prefix_does_not_match() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        gw.mount_list("/v2/firewalls", json!([])).await;
        gw.mount_page(
            "/v2/databases",
            json!([{"id": "db-1", "name": "orders", "network_id": "n-a"}]),
        )
        .await;

        let (status, body) = gw
            .call("/v1/database/get", json!({"name": "orders", "namespace": "net"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null(), "{body}");

        let (_, list) = gw
            .call("/v1/database/list", json!({"namespace": "net"}))
            .await;
        assert!(list["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_namespace() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        gw.mount_list("/v2/firewalls", json!([])).await;
        gw.mount_page(
            "/v2/instances",
            json!([
                {"id": "i-1", "hostname": "web-1", "network_id": "n-0"},
                {"id": "i-2", "hostname": "web-2", "network_id": "n-a"},
                {"id": "i-3", "hostname": "web-3", "network_id": "n-a"}
            ]),
        )
        .await;

        let (_, all) = gw.call("/v1/virtualmachine/list", json!({})).await;
        assert_eq!(all["kind"], "VirtualMachineList");
        assert_eq!(all["items"].as_array().unwrap().len(), 3);

        let (_, filtered) = gw
            .call("/v1/virtualmachine/list", json!({"namespace": "net-a"}))
            .await;
        let items = filtered["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item["metadata"]["namespace"], "net-a");
            assert_eq!(item["spec"]["ipv4"], false);
        }
    }

    #[tokio::test]
    async fn test_dangling_references_resolve_to_empty() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        gw.mount_list("/v2/firewalls", json!([])).await;
        gw.mount_page(
            "/v2/instances",
            json!([{
                "id": "i-1",
                "hostname": "orphan",
                "network_id": "n-gone",
                "firewall_id": "f-gone"
            }]),
        )
        .await;

        let (status, list) = gw.call("/v1/virtualmachine/list", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["items"][0]["metadata"]["namespace"], "");
        assert_eq!(list["items"][0]["spec"]["firewall"], "");

        let (status, vm) = gw.call("/v1/virtualmachine/get", json!({"name": "orphan"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vm["metadata"]["namespace"], "");
        assert_eq!(vm["spec"]["firewall"], "");
    }

    #[tokio::test]
    async fn test_get_outside_namespace_is_null() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        gw.mount_list("/v2/firewalls", json!([])).await;
        gw.mount_page(
            "/v2/databases",
            json!([{"id": "db-1", "name": "orders", "network_id": "n-0"}]),
        )
        .await;

        let (status, body) = gw
            .call("/v1/database/get", json!({"name": "orders", "namespace": "net-a"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());

        let (_, body) = gw
            .call("/v1/database/get", json!({"name": "orders", "namespace": "default"}))
            .await;
        assert_eq!(body["metadata"]["namespace"], "default");
    }

    #[tokio::test]
    async fn test_namespace_and_firewall_scenario() {
        let gw = Gateway::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/networks"))
            .and(body_partial_json(json!({"label": "net-a"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "n-a", "label": "net-a", "result": "success"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/networks/n-a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "n-a", "name": "cust-net-a", "label": "net-a"
            })))
            .mount(&gw.provider)
            .await;
        gw.mount_networks().await;
        Mock::given(method("POST"))
            .and(path("/v2/firewalls"))
            .and(body_partial_json(json!({
                "name": "fw-a",
                "network_id": "n-a",
                "create_rules": false,
                "rules": [{
                    "direction": "ingress",
                    "cidr": ["0.0.0.0/0"],
                    "protocol": "tcp",
                    "ports": "22"
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "f-1", "name": "fw-a", "result": "success"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_list(
            "/v2/firewalls",
            json!([{
                "id": "f-1",
                "name": "fw-a",
                "network_id": "n-a",
                "rules_count": 1,
                "instance_count": 0,
                "cluster_count": 0,
                "loadbalancer_count": 0,
                "rules": [{
                    "direction": "ingress",
                    "cidr": ["0.0.0.0/0"],
                    "protocol": "tcp",
                    "ports": "22"
                }]
            }]),
        )
        .await;

        let (status, ns) = gw
            .call("/v1/namespace/create", json!({"metadata": {"name": "net-a"}}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ns["metadata"]["name"], "net-a");
        assert_eq!(ns["status"]["phase"], "Active");

        let (status, fw) = gw
            .call(
                "/v1/firewall/create",
                json!({
                    "metadata": {"name": "fw-a", "namespace": "net-a"},
                    "spec": {
                        "ingress": [{"cidr": "0.0.0.0/0", "protocol": "tcp", "ports": "22"}]
                    }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{fw}");
        assert_eq!(fw["metadata"]["namespace"], "net-a");

        let (_, list) = gw
            .call("/v1/firewall/list", json!({"namespace": "net-a"}))
            .await;
        let items = list["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["metadata"]["name"], "fw-a");
        assert_eq!(items[0]["status"]["state"], "Inactive");
        assert_eq!(items[0]["status"]["totalRules"], "1");
        assert_eq!(items[0]["spec"]["ingress"].as_array().unwrap().len(), 1);
        assert_eq!(items[0]["spec"]["egress"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_domain_without_records() {
        let gw = Gateway::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/dns"))
            .and(body_json(json!({"name": "example.test"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "d-1", "name": "example.test"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_list("/v2/dns", json!([{"id": "d-1", "name": "example.test"}]))
            .await;
        gw.mount_list("/v2/dns/d-1/records", json!([])).await;

        let (status, created) = gw
            .call("/v1/domain/create", json!({"metadata": {"name": "example.test"}}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["metadata"]["uid"], "d-1");

        let (_, domain) = gw.call("/v1/domain/get", json!({"name": "example.test"})).await;
        assert!(domain["spec"]["records"].as_array().unwrap().is_empty());
        assert_eq!(domain["status"]["state"], "Active");
    }

    #[tokio::test]
    async fn test_record_without_ttl_reads_back_unset() {
        let gw = Gateway::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/dns"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "d-1", "name": "example.test"
            })))
            .mount(&gw.provider)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/dns/d-1/records"))
            .and(body_json(json!({"type": "A", "name": "www", "value": "1.2.3.4"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "r-1", "domain_id": "d-1", "type": "A", "name": "www", "value": "1.2.3.4"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_list("/v2/dns", json!([{"id": "d-1", "name": "example.test"}]))
            .await;
        gw.mount_list(
            "/v2/dns/d-1/records",
            json!([{
                "id": "r-1", "domain_id": "d-1", "type": "A",
                "name": "www", "value": "1.2.3.4", "ttl": 0, "priority": 0
            }]),
        )
        .await;

        let (status, domain) = gw
            .call(
                "/v1/domain/create",
                json!({
                    "metadata": {"name": "example.test"},
                    "spec": {"records": [{"name": "www", "type": "A", "value": "1.2.3.4"}]}
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{domain}");
        let record = &domain["spec"]["records"][0];
        assert_eq!(record["name"], "www");
        assert!(record["ttl"].is_null());
        assert!(record["priority"].is_null());
    }

    #[tokio::test]
    async fn test_credential_delete_targets_credential_endpoint() {
        let gw = Gateway::start().await;
        gw.mount_page(
            "/v2/objectstore/credentials",
            json!([{"id": "c-1", "name": "ci-writer", "access_key_id": "AK", "status": "ready"}]),
        )
        .await;
        Mock::given(method("DELETE"))
            .and(path("/v2/objectstore/credentials/c-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&gw.provider)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v2/objectstores/c-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&gw.provider)
            .await;

        let (status, body) = gw
            .call("/v1/objectstoragecredential/delete", json!({"name": "ci-writer"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["spec"]["accessKey"], "AK");
    }

    #[tokio::test]
    async fn test_list_of_empty_collection_is_empty() {
        let gw = Gateway::start().await;
        gw.mount_empty_provider().await;

        for kind in KINDS {
            let (status, body) = gw.call(&format!("/v1/{kind}/list"), json!({})).await;
            assert_eq!(status, StatusCode::OK, "{kind}");
            assert!(body["items"].as_array().unwrap().is_empty(), "{kind}");
        }
    }
}

mod creates {
    use super::*;
    use serde_json::Value;

    async fn mount_firewalls(gw: &Gateway) {
        gw.mount_list(
            "/v2/firewalls",
            json!([
                {"id": "f-1", "name": "fw-a", "network_id": "n-a"},
                {"id": "f-0", "name": "fw-default", "network_id": "n-0"}
            ]),
        )
        .await;
    }

    async fn mount_disk_images(gw: &Gateway) {
        gw.mount_list(
            "/v2/disk_images",
            json!([
                {"id": "d-1", "name": "ubuntu-jammy", "state": "available"},
                {"id": "d-2", "name": "debian-12", "state": "available"}
            ]),
        )
        .await;
    }

    /// JSON bodies the provider received as POSTs to `route`
    async fn posted(gw: &Gateway, route: &str) -> Vec<Value> {
        gw.provider
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == route)
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_virtual_machine_create_resolves_references() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        mount_firewalls(&gw).await;
        mount_disk_images(&gw).await;
        Mock::given(method("POST"))
            .and(path("/v2/instances"))
            .and(body_partial_json(json!({
                "count": 1,
                "hostname": "web",
                "size": "g3.small",
                "public_ip": "create",
                "network_id": "n-a",
                "template_id": "d-1",
                "firewall_id": "f-1",
                "tags": "blue green"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "i-1", "hostname": "web"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_page(
            "/v2/instances",
            json!([{
                "id": "i-1",
                "hostname": "web",
                "size": "g3.small",
                "network_id": "n-a",
                "firewall_id": "f-1",
                "source_id": "d-1",
                "public_ip": "74.220.1.1",
                "status": "ACTIVE",
                "tags": ["blue", "green"]
            }]),
        )
        .await;

        let (status, vm) = gw
            .call(
                "/v1/virtualmachine/create",
                json!({
                    "metadata": {"name": "web", "namespace": "net-a"},
                    "spec": {
                        "size": "g3.small",
                        "firewall": "fw-a",
                        "ipv4": true,
                        "image": "ubuntu-jammy",
                        "tags": ["blue", "green"]
                    }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{vm}");
        assert_eq!(vm["metadata"]["uid"], "i-1");
        assert_eq!(vm["metadata"]["namespace"], "net-a");
        assert_eq!(vm["spec"]["firewall"], "fw-a");
        assert_eq!(vm["spec"]["image"], "d-1");
        assert_eq!(vm["status"]["publicIp"], "74.220.1.1");
    }

    #[tokio::test]
    async fn test_virtual_machine_create_defaults() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        mount_firewalls(&gw).await;
        mount_disk_images(&gw).await;
        Mock::given(method("POST"))
            .and(path("/v2/instances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "i-2"})))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_page(
            "/v2/instances",
            json!([{"id": "i-2", "hostname": "plain", "network_id": "n-0", "source_id": "d-2"}]),
        )
        .await;

        let (status, vm) = gw
            .call(
                "/v1/virtualmachine/create",
                json!({
                    "metadata": {"name": "plain"},
                    "spec": {"size": "g3.xsmall", "image": "d-2"}
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{vm}");
        assert_eq!(vm["metadata"]["namespace"], "default");
        assert_eq!(vm["spec"]["firewall"], "");

        let bodies = posted(&gw, "/v2/instances").await;
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["public_ip"], "none");
        assert_eq!(bodies[0]["network_id"], "n-0");
        assert_eq!(bodies[0]["template_id"], "d-2");
        assert!(bodies[0].get("firewall_id").is_none());
        assert!(bodies[0].get("initial_user").is_none());
    }

    #[tokio::test]
    async fn test_cluster_create_maps_firewall_both_ways() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        mount_firewalls(&gw).await;
        Mock::given(method("POST"))
            .and(path("/v2/kubernetes/clusters"))
            .and(body_partial_json(json!({
                "name": "apps",
                "network_id": "n-a",
                "instance_firewall": "f-1",
                "pools": [{"id": "p-1", "size": "g4s.kube.small", "count": 3}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "c-1", "name": "apps"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_page(
            "/v2/kubernetes/clusters",
            json!([{
                "id": "c-1",
                "name": "apps",
                "network_id": "n-a",
                "firewall_id": "f-1",
                "status": "ACTIVE",
                "pools": [{"id": "p-1", "size": "g4s.kube.small", "count": 3}]
            }]),
        )
        .await;

        let (status, cluster) = gw
            .call(
                "/v1/kubernetescluster/create",
                json!({
                    "metadata": {"name": "apps", "namespace": "net-a"},
                    "spec": {
                        "firewall": "fw-a",
                        "pools": [{"id": "p-1", "size": "g4s.kube.small", "count": 3}]
                    }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{cluster}");
        assert_eq!(cluster["metadata"]["uid"], "c-1");
        assert_eq!(cluster["metadata"]["namespace"], "net-a");
        assert_eq!(cluster["spec"]["firewall"], "fw-a");
        assert_eq!(cluster["spec"]["pools"][0]["count"], 3);
    }

    #[tokio::test]
    async fn test_database_create_uses_default_network() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        mount_firewalls(&gw).await;
        Mock::given(method("POST"))
            .and(path("/v2/databases"))
            .and(body_partial_json(json!({
                "name": "orders",
                "size": "g3.db.small",
                "software": "PostgreSQL",
                "software_version": "14",
                "network_id": "n-0",
                "nodes": 1,
                "firewall_id": "f-0"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "db-1", "name": "orders"
            })))
            .expect(1)
            .mount(&gw.provider)
            .await;
        gw.mount_page(
            "/v2/databases",
            json!([{
                "id": "db-1",
                "name": "orders",
                "nodes": 1,
                "size": "g3.db.small",
                "software": "PostgreSQL",
                "software_version": "14",
                "network_id": "n-0",
                "firewall_id": "f-0",
                "port": 5432,
                "status": "Ready"
            }]),
        )
        .await;

        let (status, db) = gw
            .call(
                "/v1/database/create",
                json!({
                    "metadata": {"name": "orders"},
                    "spec": {
                        "nodes": 1,
                        "size": "g3.db.small",
                        "engine": "PostgreSQL",
                        "engineVersion": "14",
                        "firewall": "fw-default"
                    }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{db}");
        assert_eq!(db["metadata"]["namespace"], "default");
        assert_eq!(db["spec"]["engine"], "PostgreSQL");
        assert_eq!(db["spec"]["firewall"], "fw-default");
        assert_eq!(db["status"]["port"], 5432);
    }

    #[tokio::test]
    async fn test_unresolved_reference_aborts_create() {
        let cases = [
            (
                "virtualmachine",
                "/v2/instances",
                json!({
                    "metadata": {"name": "web", "namespace": "nowhere"},
                    "spec": {"image": "d-1"}
                }),
            ),
            (
                "virtualmachine",
                "/v2/instances",
                json!({"metadata": {"name": "web"}, "spec": {"image": "d-1", "firewall": "fw"}}),
            ),
            (
                "kubernetescluster",
                "/v2/kubernetes/clusters",
                json!({"metadata": {"name": "apps", "namespace": "net"}}),
            ),
            (
                "kubernetescluster",
                "/v2/kubernetes/clusters",
                json!({"metadata": {"name": "apps"}, "spec": {"firewall": "missing"}}),
            ),
            (
                "database",
                "/v2/databases",
                json!({"metadata": {"name": "orders"}, "spec": {"firewall": "fw"}}),
            ),
        ];

        for (kind, native, body) in cases {
            let gw = Gateway::start().await;
            gw.mount_networks().await;
            mount_firewalls(&gw).await;
            mount_disk_images(&gw).await;
            Mock::given(method("POST"))
                .and(path(native))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
                .expect(0)
                .mount(&gw.provider)
                .await;

            let (status, err) = gw.call(&format!("/v1/{kind}/create"), body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{kind}: {err}");
            assert_eq!(err["code"], "not_found");
            assert!(posted(&gw, native).await.is_empty(), "{kind}");
        }
    }

    #[tokio::test]
    async fn test_list_fails_whole_when_firewalls_unavailable() {
        let gw = Gateway::start().await;
        gw.mount_networks().await;
        gw.mount_page(
            "/v2/instances",
            json!([
                {"id": "i-1", "hostname": "web", "network_id": "n-0"},
                {"id": "i-2", "hostname": "db", "network_id": "n-a", "firewall_id": "f-1"}
            ]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/v2/firewalls"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "code": "internal_error",
                "reason": "firewall service down"
            })))
            .mount(&gw.provider)
            .await;

        let (status, body) = gw.call("/v1/virtualmachine/list", json!({})).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "unavailable");
        assert!(body.get("items").is_none(), "{body}");
    }
}

#[tokio::test]
async fn test_bearer_constant_matches_token() {
    assert_eq!(BEARER, format!("Bearer {}", support::TOKEN));
}
