//! End-to-end export against a mock backend.

use ktng::data::{BusinessYear, ExportRequest};
use ktng::output::BOM;
use ktng::{ErrorKind, ExportConfig, ExportController, ExportState, Submission};
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(start: u16, end: u16) -> ExportRequest {
    ExportRequest::new(
        BusinessYear::new(start).unwrap(),
        BusinessYear::new(end).unwrap(),
    )
}

fn config(server: &MockServer, output_dir: &Path) -> ExportConfig {
    ExportConfig {
        base_url: Some(server.uri()),
        output_dir: output_dir.to_path_buf(),
        ..ExportConfig::default()
    }
}

async fn mount(server: &MockServer, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/api/financials/00244455"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_export_writes_merged_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/financials/00244455"))
        .and(query_param("start_year", "2021"))
        .and(query_param("end_year", "2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"rcept_no": "20220315000598", "bsns_year": "2021", "sj_nm": "연결재무상태표",
                 "account_nm": "자산총계", "account_id": "ifrs-full_Assets",
                 "thstrm_amount": "13251573000000", "frmtrm_amount": "12698224000000"},
                {"rcept_no": "20230308000798", "bsns_year": "2022", "sj_nm": "연결손익계산서",
                 "account_nm": "매출액", "account_id": "ifrs-full_Revenue",
                 "thstrm_amount": "5851390000000", "frmtrm_amount": "5228382000000"},
                {"rcept_no": "20230308000798", "bsns_year": "2022", "sj_nm": "연결손익계산서",
                 "account_nm": "당기순이익"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let controller = ExportController::from_config(&config(&server, dir.path())).unwrap();

    let Submission::Delivered(summary) = controller.submit(request(2021, 2022)).await else {
        panic!("export should be delivered");
    };

    let contents = std::fs::read_to_string(&summary.path).unwrap();
    let expected = format!(
        "{}사업연도,재무제표명,계정명,계정ID,당기금액(원),전기금액(원)\n\
         2022,\"연결손익계산서\",\"당기순이익\",\"\",0,0\n\
         2022,\"연결손익계산서\",\"매출액\",\"ifrs-full_Revenue\",5851390000000,5228382000000\n\
         2021,\"연결재무상태표\",\"자산총계\",\"ifrs-full_Assets\",13251573000000,12698224000000",
        BOM
    );

    assert_eq!(contents, expected);
    assert_eq!(
        summary.path,
        dir.path().join("ktng_financials_CFS_CIS_2021_2022.csv")
    );
    assert_eq!(controller.state(), ExportState::Idle);
}

#[tokio::test]
async fn test_upstream_error_produces_no_file() {
    let server = MockServer::start().await;
    mount(&server, json!({"data": {"error": "X"}}), Duration::ZERO).await;

    let dir = tempfile::tempdir().unwrap();
    let controller = ExportController::from_config(&config(&server, dir.path())).unwrap();

    let outcome = controller.submit(request(2022, 2022)).await;

    assert!(matches!(
        outcome,
        Submission::Failed { kind: ErrorKind::Upstream, ref message } if message.contains('X')
    ));
    assert!(matches!(controller.state(), ExportState::Error(ref m) if m.contains('X')));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_empty_data_produces_no_file() {
    let server = MockServer::start().await;
    mount(&server, json!({"data": []}), Duration::ZERO).await;

    let dir = tempfile::tempdir().unwrap();
    let controller = ExportController::from_config(&config(&server, dir.path())).unwrap();

    let outcome = controller.submit(request(2022, 2022)).await;

    assert!(matches!(
        outcome,
        Submission::Failed { kind: ErrorKind::EmptyDataset, .. }
    ));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_second_submission_while_loading_issues_no_request() {
    let server = MockServer::start().await;
    mount(
        &server,
        json!({"data": [{"rcept_no": "1", "bsns_year": "2022", "sj_nm": "연결재무상태표", "account_nm": "자산총계"}]}),
        Duration::from_millis(300),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let controller = ExportController::from_config(&config(&server, dir.path())).unwrap();

    let first = controller.submit(request(2022, 2022));
    let second = async {
        while !controller.state().is_loading() {
            tokio::task::yield_now().await;
        }
        controller.submit(request(2022, 2022)).await
    };

    let (first, second) = tokio::join!(first, second);

    assert!(matches!(first, Submission::Delivered(_)));
    assert_eq!(second, Submission::Rejected);
    // `expect(1)` is verified when the server drops
}

#[tokio::test]
async fn test_missing_base_url_is_network_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig {
        base_url: None,
        output_dir: dir.path().to_path_buf(),
        ..ExportConfig::default()
    };
    let controller = ExportController::from_config(&config).unwrap();

    let outcome = controller.submit(request(2022, 2022)).await;

    assert!(matches!(
        outcome,
        Submission::Failed { kind: ErrorKind::Network, .. }
    ));
}
