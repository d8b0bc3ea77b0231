use icuplan::remote::FolderRequest;
use icuplan::transform::{WorkoutRecord, to_record};
use icuplan::{
    Config, FolderId, IntervalsClient, Plan, Publisher, RunState, Stage, UploadError,
    WorkoutService,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH: &str = "Basic QVBJX0tFWTprM3k=";

fn config(server: &MockServer) -> Config {
    Config::new("i42", "k3y", "Spring Base").with_base_url(&format!("{}/athlete", server.uri()))
}

fn easy_run() -> Plan {
    Plan::from_json(
        r#"{"trainings":[{"name":"Easy Run","type":"run","day":"Mon","steps":[{"description":"Jog3x","distance":"10m","zone":"Z2"}]}]}"#,
    )
    .unwrap()
}

#[tokio::test]
async fn create_folder_posts_plan_folder_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/folders/"))
        .and(header("authorization", AUTH))
        .and(body_json(json!({
            "name": "Spring Base",
            "type": "PLAN",
            "parent_id": null,
            "description": "Folder for Spring Base"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 555, "name": "Spring Base"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = IntervalsClient::new(&config(&server)).unwrap();
    let id = client
        .create_folder(&FolderRequest::plan("Spring Base"))
        .await
        .unwrap();
    assert_eq!(id, FolderId::Number(555));
}

#[tokio::test]
async fn create_folder_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/folders/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"bad key\"}"))
        .mount(&server)
        .await;

    let client = IntervalsClient::new(&config(&server)).unwrap();
    let err = client
        .create_folder(&FolderRequest::plan("Spring Base"))
        .await
        .unwrap_err();
    match err {
        UploadError::Remote {
            stage,
            status,
            body,
        } => {
            assert_eq!(stage, Stage::CreateFolder);
            assert_eq!(status, 401);
            assert_eq!(body, "{\"error\":\"bad key\"}");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn create_folder_without_id_is_a_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/folders/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = IntervalsClient::new(&config(&server)).unwrap();
    let err = client
        .create_folder(&FolderRequest::plan("Spring Base"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UploadError::Remote {
            stage: Stage::CreateFolder,
            status: 200,
            ..
        }
    ));
}

#[tokio::test]
async fn bulk_upload_sends_records_with_encoded_header() {
    let server = MockServer::start().await;
    let plan = easy_run();
    let record: WorkoutRecord = to_record(&plan.trainings[0], &FolderId::from(7));

    Mock::given(method("POST"))
        .and(path("/athlete/i42/workouts/bulk"))
        .and(header("authorization", AUTH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!([{
            "name": "Easy Run",
            "description": "-Jog  10m Z2\n-Jog  10m Z2\n-Jog  10m Z2",
            "folder_id": 7,
            "type": "Run",
            "day": "Mon"
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = IntervalsClient::new(&config(&server)).unwrap();
    client.bulk_create_workouts(&[record]).await.unwrap();
}

#[tokio::test]
async fn bulk_upload_reports_status_and_body() {
    let server = MockServer::start().await;
    let plan = easy_run();
    let record = to_record(&plan.trainings[0], &FolderId::from(7));

    Mock::given(method("POST"))
        .and(path("/athlete/i42/workouts/bulk"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string("{\"error\":\"unknown type\"}"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = IntervalsClient::new(&config(&server)).unwrap();
    let err = client.bulk_create_workouts(&[record]).await.unwrap_err();
    assert_eq!(err.exit_code(), 5);
    match err {
        UploadError::Remote {
            stage,
            status,
            body,
        } => {
            assert_eq!(stage, Stage::BulkUpload);
            assert_eq!(status, 422);
            assert_eq!(body, "{\"error\":\"unknown type\"}");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let config = Config::new("i42", "k3y", "Spring Base").with_base_url("http://127.0.0.1:1/athlete");
    let client = IntervalsClient::new(&config).unwrap();
    let err = client
        .create_folder(&FolderRequest::plan("Spring Base"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        UploadError::Transport {
            stage: Stage::CreateFolder,
            ..
        }
    ));
    assert_eq!(err.exit_code(), 6);
}

#[tokio::test]
async fn publisher_creates_folder_then_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/folders/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 900})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/workouts/bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server);
    let publisher = Publisher::from_config(IntervalsClient::new(&config).unwrap(), &config);
    let report = publisher.publish(&easy_run()).await.unwrap();
    assert_eq!(report.folder_id, FolderId::Number(900));
    assert_eq!(report.uploaded, 1);
    assert_eq!(publisher.state(), RunState::WorkoutsUploaded);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.path().ends_with("/folders/"));
    assert!(requests[1].url.path().ends_with("/workouts/bulk"));
    let uploaded: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(uploaded[0]["folder_id"], json!(900));
}

#[tokio::test]
async fn publisher_stops_after_folder_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/folders/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/athlete/i42/workouts/bulk"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config(&server);
    let publisher = Publisher::from_config(IntervalsClient::new(&config).unwrap(), &config);
    let err = publisher.publish(&easy_run()).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::CreateFolder));
    assert_eq!(err.exit_code(), 5);
    assert_eq!(publisher.state(), RunState::FolderCreateFailed);
}
