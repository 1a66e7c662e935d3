use busbar_at_api::{CellFormat, DynamicFields, ListRecordsOptions, SortDirection};
use futures::TryStreamExt;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{airtable, record_json, Task, BASE_ID};

fn page(ids: &[&str], offset: Option<&str>) -> serde_json::Value {
    let records: Vec<_> = ids.iter().map(|id| record_json(id, &format!("task {id}"))).collect();
    let mut body = serde_json::json!({ "records": records });
    if let Some(offset) = offset {
        body["offset"] = serde_json::json!(offset);
    }
    body
}

#[tokio::test]
async fn test_iter_records_walks_every_page() {
    let server = MockServer::start().await;
    let table_path = format!("/v0/{BASE_ID}/Tasks");

    Mock::given(method("GET"))
        .and(path(table_path.as_str()))
        .and(query_param("filterByFormula", "NOT({Done})"))
        .and(query_param("pageSize", "25"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["rec1", "rec2", "rec3"], Some("o1"))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(table_path.as_str()))
        .and(query_param("filterByFormula", "NOT({Done})"))
        .and(query_param("pageSize", "25"))
        .and(query_param("offset", "o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["rec4", "rec5", "rec6"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let airtable = airtable(&server);
    let table = airtable.base(BASE_ID).unwrap().table::<Task>("Tasks").unwrap();

    let records: Vec<_> = table
        .iter_records(ListRecordsOptions::new().filter_by_formula("NOT({Done})"))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].fields().name, "task rec1");
    assert_eq!(records[5].id(), "rec6");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_records_single_page_with_all_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v0/{BASE_ID}/Tasks").as_str()))
        .and(query_param("fields[]", "Name"))
        .and(query_param("maxRecords", "3"))
        .and(query_param("sort[0][field]", "Name"))
        .and(query_param("sort[0][direction]", "desc"))
        .and(query_param("view", "Open"))
        .and(query_param("cellFormat", "string"))
        .and(query_param("timeZone", "Europe/Berlin"))
        .and(query_param("userLocale", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["rec9"], Some("next"))))
        .expect(1)
        .mount(&server)
        .await;

    let airtable = airtable(&server);
    let table = airtable
        .base(BASE_ID)
        .unwrap()
        .table::<DynamicFields>("Tasks")
        .unwrap();

    let options = ListRecordsOptions::new()
        .fields(["Name"])
        .max_records(3)
        .sort("Name", SortDirection::Desc)
        .view("Open")
        .cell_format(CellFormat::String)
        .time_zone("Europe/Berlin")
        .user_locale("de");
    let (records, offset) = table.list_records(&options).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields()["Name"], "task rec9");
    assert_eq!(offset.as_deref(), Some("next"));
}
